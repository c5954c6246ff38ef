// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::wizard::tests::{NoteFlow, NOTE_FLOW};
use cb_adapters::FakeChatAdapter;
use cb_core::test_support::page_entry;
use cb_core::Patch;
use cb_storage::{MemoryClubRepo, MemorySessionRepo};
use parking_lot::Mutex;

const ADMIN: AdminId = AdminId::new(42);
const CHAT: i64 = 900;

struct Harness {
    runner: WizardRunner<MemorySessionRepo, FakeChatAdapter>,
    nav: Arc<Navigator<MemorySessionRepo>>,
    repo: MemorySessionRepo,
    chat: FakeChatAdapter,
    commits: Arc<Mutex<Vec<WizardData>>>,
}

impl Harness {
    fn new(policy: FailurePolicy) -> Self {
        let repo = MemorySessionRepo::new();
        let chat = FakeChatAdapter::new();
        let flow = NoteFlow::new(policy);
        let commits = Arc::clone(&flow.commits);
        let nav = Arc::new(Navigator::new(SessionStore::new(repo.clone())));
        let runner = WizardRunner::new(
            FlowRegistry::new().register(flow),
            SessionStore::new(repo.clone()),
            Arc::clone(&nav),
            chat.clone(),
            Club::new(Arc::new(MemoryClubRepo::new())),
            Tz::UTC,
        );
        Self {
            runner,
            nav,
            repo,
            chat,
            commits,
        }
    }

    async fn stored(&self) -> Option<WizardState> {
        let session = SessionStore::new(self.repo.clone()).load(ADMIN).await.unwrap();
        session.active_wizard().cloned()
    }

    async fn reply(&self, text: &str) -> Option<ScreenRequest> {
        let state = self.stored().await.expect("wizard in progress");
        self.runner.reply(ADMIN, CHAT, &state, text).await.unwrap()
    }
}

#[tokio::test]
async fn start_persists_step_zero_with_navigation() {
    let h = Harness::new(FailurePolicy::Clear);
    h.nav.push(ADMIN, page_entry("tournaments_page", 2)).await;

    let seed: WizardData = [("id", "7")].into_iter().collect();
    h.runner.start(ADMIN, CHAT, NOTE_FLOW, seed.clone()).await.unwrap();

    let state = h.stored().await.unwrap();
    assert_eq!(state, WizardState::new(NOTE_FLOW).with_data(seed));
    let session = SessionStore::new(h.repo.clone()).load(ADMIN).await.unwrap();
    assert_eq!(session.nav, vec![page_entry("tournaments_page", 2)]);
    assert_eq!(h.chat.texts(), vec!["Имя?"]);
}

#[tokio::test]
async fn unknown_flow_cannot_start() {
    let h = Harness::new(FailurePolicy::Clear);

    let err = h
        .runner
        .start(ADMIN, CHAT, "nope", WizardData::new())
        .await
        .unwrap_err();

    assert!(matches!(err, EngineError::UnknownFlow(tag) if tag == "nope"));
    assert!(h.repo.row(ADMIN).is_none());
}

#[tokio::test]
async fn rejected_reply_keeps_stored_state() {
    let h = Harness::new(FailurePolicy::Clear);
    h.runner.start(ADMIN, CHAT, NOTE_FLOW, WizardData::new()).await.unwrap();
    let before = h.stored().await;

    h.reply("  ").await;

    assert_eq!(h.stored().await, before);
    assert_eq!(h.chat.texts().last().map(String::as_str), Some("Пусто."));
}

#[tokio::test]
async fn completed_flow_commits_once_and_clears_session() {
    let h = Harness::new(FailurePolicy::Clear);
    h.nav.push(ADMIN, page_entry("players_menu", 1)).await;
    h.runner.start(ADMIN, CHAT, NOTE_FLOW, WizardData::new()).await.unwrap();

    assert_eq!(h.reply("Eagles").await, None);
    assert_eq!(h.stored().await.unwrap().step, 1);
    let screen = h.reply("-").await;

    assert_eq!(screen, Some(ScreenRequest::Teams));
    let commits = h.commits.lock().clone();
    assert_eq!(commits.len(), 1);
    assert_eq!(commits[0].get("name"), Some("Eagles"));
    assert_eq!(commits[0].patch("note"), Patch::Unchanged);
    assert!(h.repo.row(ADMIN).is_none());
    assert_eq!(h.nav.depth(ADMIN), 0);
    assert_eq!(h.chat.texts(), vec!["Имя?", "Заметка?", "Готово."]);
}

#[tokio::test]
async fn failed_commit_with_clear_policy_drops_session() {
    let h = Harness::new(FailurePolicy::Clear);
    h.runner.start(ADMIN, CHAT, NOTE_FLOW, WizardData::new()).await.unwrap();
    h.reply("fail").await;

    assert_eq!(h.reply("note").await, None);

    assert!(h.repo.row(ADMIN).is_none());
    assert_eq!(
        h.chat.texts().last().map(String::as_str),
        Some("Не получилось: name: validation error")
    );
}

#[tokio::test]
async fn failed_commit_with_keep_policy_asks_last_step_again() {
    let h = Harness::new(FailurePolicy::Keep);
    h.runner.start(ADMIN, CHAT, NOTE_FLOW, WizardData::new()).await.unwrap();
    h.reply("fail").await;

    h.reply("note").await;

    let state = h.stored().await.unwrap();
    assert_eq!(state.step, 1);
    assert_eq!(state.data.patch("note"), Patch::Unchanged);
    let texts = h.chat.texts();
    assert_eq!(
        texts[texts.len() - 2..],
        ["Не получилось: name: validation error".to_string(), "Заметка?".to_string()]
    );
}

#[tokio::test]
async fn one_failed_save_is_retried() {
    let h = Harness::new(FailurePolicy::Clear);
    h.runner.start(ADMIN, CHAT, NOTE_FLOW, WizardData::new()).await.unwrap();
    h.repo.fail_next_writes(1);

    h.reply("Eagles").await;

    assert_eq!(h.stored().await.unwrap().step, 1);
    assert_eq!(h.chat.texts().last().map(String::as_str), Some("Заметка?"));
}

#[tokio::test]
async fn repeated_save_failure_reports_and_stays_put() {
    let h = Harness::new(FailurePolicy::Clear);
    h.runner.start(ADMIN, CHAT, NOTE_FLOW, WizardData::new()).await.unwrap();
    h.repo.fail_next_writes(2);

    h.reply("Eagles").await;

    assert_eq!(h.stored().await.unwrap().step, 0);
    assert_eq!(h.chat.texts().last().map(String::as_str), Some(SAVE_FAILED));
}

#[tokio::test]
async fn unregistered_flow_in_storage_is_dropped() {
    let h = Harness::new(FailurePolicy::Clear);
    let stale = WizardState::new("retired_flow");

    let screen = h.runner.reply(ADMIN, CHAT, &stale, "hello").await.unwrap();

    assert_eq!(screen, None);
    assert!(h.chat.texts().is_empty());
    assert!(h.repo.calls().iter().any(|c| matches!(c, cb_storage::SessionCall::Delete { .. })));
}
