// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use cb_core::test_support::page_entry;
use cb_storage::{MemorySessionRepo, SessionCall};
use proptest::prelude::*;
use std::sync::Arc;

const ADMIN: AdminId = AdminId::new(42);
const OTHER: AdminId = AdminId::new(7);

fn navigator() -> (Navigator<MemorySessionRepo>, MemorySessionRepo) {
    let repo = MemorySessionRepo::new();
    (Navigator::new(SessionStore::new(repo.clone())), repo)
}

fn entry(n: usize) -> NavEntry {
    page_entry("tournaments_page", n as u32)
}

#[test]
fn push_ignores_blank_action() {
    let mut stacks = NavStacks::new();
    assert!(stacks.push(ADMIN, NavEntry::new("")).is_none());
    assert_eq!(stacks.depth(ADMIN), 0);
}

#[test]
fn push_deduplicates_top_regardless_of_param_order() {
    let mut stacks = NavStacks::new();
    let a = NavEntry::new("games_open_team").with("t", 1).with("team", 2);
    let b = NavEntry::new("games_open_team").with("team", 2).with("t", 1);

    assert!(stacks.push(ADMIN, a).is_some());
    assert!(stacks.push(ADMIN, b).is_none());
    assert_eq!(stacks.depth(ADMIN), 1);
}

#[test]
fn push_evicts_oldest_beyond_max_depth() {
    let mut stacks = NavStacks::new();
    for n in 0..MAX_DEPTH + 2 {
        stacks.push(ADMIN, entry(n));
    }

    let snapshot = stacks.snapshot(ADMIN);
    assert_eq!(snapshot.len(), MAX_DEPTH);
    assert_eq!(snapshot[0], entry(2));
    assert_eq!(snapshot.last(), Some(&entry(MAX_DEPTH + 1)));
}

#[test]
fn pop_of_last_entry_removes_stack() {
    let mut stacks = NavStacks::new();
    stacks.push(ADMIN, entry(1));

    let (top, rest) = stacks.pop(ADMIN).unwrap();
    assert_eq!(top, entry(1));
    assert!(rest.is_empty());
    assert!(stacks.pop(ADMIN).is_none());
    assert!(!stacks.clear(ADMIN));
}

#[test]
fn restore_keeps_most_recent_entries() {
    let mut stacks = NavStacks::new();
    let entries: Vec<NavEntry> = (0..15).map(entry).collect();

    stacks.restore(ADMIN, entries.clone());

    assert_eq!(stacks.snapshot(ADMIN), entries[5..].to_vec());
    assert!(stacks.is_loaded(ADMIN));
}

proptest! {
    #[test]
    fn distinct_pushes_pop_in_reverse(count in 0usize..30) {
        let mut stacks = NavStacks::new();
        for n in 0..count {
            stacks.push(ADMIN, entry(n));
        }
        prop_assert_eq!(stacks.depth(ADMIN), count.min(MAX_DEPTH));

        let mut expected: Vec<NavEntry> = (0..count).map(entry).collect();
        expected.reverse();
        expected.truncate(MAX_DEPTH);
        let mut popped = Vec::new();
        while let Some((top, _)) = stacks.pop(ADMIN) {
            popped.push(top);
        }
        prop_assert_eq!(popped, expected);
    }

    #[test]
    fn repeated_push_never_changes_top(pages in proptest::collection::vec(0usize..5, 1..20)) {
        let mut stacks = NavStacks::new();
        for page in pages {
            stacks.push(ADMIN, entry(page));
            let before = stacks.snapshot(ADMIN);
            stacks.push(ADMIN, entry(page));
            prop_assert_eq!(stacks.snapshot(ADMIN), before);
        }
    }

    #[test]
    fn restore_then_snapshot_round_trips(count in 0usize..25) {
        let mut stacks = NavStacks::new();
        let entries: Vec<NavEntry> = (0..count).map(entry).collect();
        stacks.restore(ADMIN, entries.clone());

        let start = count.saturating_sub(MAX_DEPTH);
        prop_assert_eq!(stacks.snapshot(ADMIN), entries[start..].to_vec());
    }
}

#[tokio::test]
async fn push_persists_stack_without_flow() {
    let (nav, repo) = navigator();

    nav.push(ADMIN, entry(1)).await;

    let row = repo.row(ADMIN).unwrap();
    assert_eq!(row.current_flow, None);
    let (wizard, stored) = cb_storage::decode_flow_state(ADMIN, &row.flow_state.unwrap()).unwrap();
    assert!(wizard.is_none());
    assert_eq!(stored, vec![entry(1)]);
}

#[tokio::test]
async fn duplicate_push_writes_nothing() {
    let (nav, repo) = navigator();

    nav.push(ADMIN, entry(1)).await;
    nav.push(ADMIN, entry(1)).await;

    assert_eq!(repo.calls().len(), 1);
}

#[tokio::test]
async fn pop_persists_remaining_stack_even_when_empty() {
    let (nav, repo) = navigator();
    nav.push(ADMIN, entry(1)).await;

    assert_eq!(nav.pop(ADMIN).await, Some(entry(1)));
    assert_eq!(nav.pop(ADMIN).await, None);

    assert_eq!(
        repo.calls().last(),
        Some(&SessionCall::Upsert {
            admin: ADMIN,
            current_flow: None,
            flow_state: None,
        })
    );
    assert_eq!(repo.calls().len(), 2);
}

#[tokio::test]
async fn clear_writes_only_when_stack_existed() {
    let (nav, repo) = navigator();

    nav.clear(ADMIN).await;
    assert!(repo.calls().is_empty());

    nav.push(ADMIN, entry(1)).await;
    nav.clear(ADMIN).await;
    assert_eq!(repo.calls().len(), 2);
    assert_eq!(nav.depth(ADMIN), 0);
}

#[tokio::test]
async fn clear_keeping_writes_the_wizard_back() {
    let (nav, repo) = navigator();
    nav.push(ADMIN, entry(1)).await;
    let wizard = WizardState {
        flow: "edit_team".into(),
        step: 1,
        data: cb_core::WizardData::new(),
    };

    nav.clear_keeping(ADMIN, Some(&wizard)).await;

    assert_eq!(nav.depth(ADMIN), 0);
    let loaded = SessionStore::new(repo.clone()).load(ADMIN).await.unwrap();
    assert_eq!(loaded.flow.as_deref(), Some("edit_team"));
    assert_eq!(loaded.active_wizard(), Some(&wizard));
    assert!(loaded.nav.is_empty());
}

#[tokio::test]
async fn persist_failure_keeps_navigation_working() {
    let (nav, repo) = navigator();
    repo.fail_next_writes(1);

    nav.push(ADMIN, entry(1)).await;

    assert_eq!(nav.snapshot(ADMIN), vec![entry(1)]);
    assert!(repo.row(ADMIN).is_none());
}

#[tokio::test]
async fn ensure_loaded_hydrates_once() {
    let (nav, repo) = navigator();
    let blob = cb_storage::encode_flow_state(None, &[entry(3), entry(4)])
        .unwrap()
        .unwrap();
    repo.insert_raw(ADMIN, None, Some(&blob));

    nav.ensure_loaded(ADMIN).await;
    assert_eq!(nav.snapshot(ADMIN), vec![entry(3), entry(4)]);

    // Later storage changes are not re-read
    repo.insert_raw(ADMIN, None, None);
    nav.ensure_loaded(ADMIN).await;
    assert_eq!(nav.depth(ADMIN), 2);
}

#[tokio::test]
async fn push_before_hydrate_is_not_overwritten() {
    let (nav, repo) = navigator();
    let blob = cb_storage::encode_flow_state(None, &[entry(3)]).unwrap().unwrap();
    repo.insert_raw(ADMIN, None, Some(&blob));

    nav.push(ADMIN, entry(9)).await;
    nav.ensure_loaded(ADMIN).await;

    assert_eq!(nav.snapshot(ADMIN), vec![entry(9)]);
}

#[tokio::test]
async fn failed_hydrate_is_retried() {
    let (nav, repo) = navigator();
    let blob = cb_storage::encode_flow_state(None, &[entry(3)]).unwrap().unwrap();
    repo.insert_raw(ADMIN, None, Some(&blob));
    repo.set_failing_reads(true);

    nav.ensure_loaded(ADMIN).await;
    assert_eq!(nav.depth(ADMIN), 0);

    repo.set_failing_reads(false);
    nav.ensure_loaded(ADMIN).await;
    assert_eq!(nav.depth(ADMIN), 1);
}

#[tokio::test]
async fn discard_forgets_without_writing() {
    let (nav, repo) = navigator();
    nav.push(ADMIN, entry(1)).await;

    nav.discard(ADMIN);

    assert_eq!(nav.depth(ADMIN), 0);
    assert_eq!(repo.calls().len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_admins_keep_separate_stacks() {
    let (nav, _) = navigator();
    let nav = Arc::new(nav);

    let mut tasks = Vec::new();
    for admin in [ADMIN, OTHER] {
        let nav = Arc::clone(&nav);
        tasks.push(tokio::spawn(async move {
            for n in 0..8 {
                nav.push(admin, NavEntry::new("players_menu").with("page", n).with("who", admin))
                    .await;
                if n % 3 == 2 {
                    nav.pop(admin).await;
                }
            }
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    for admin in [ADMIN, OTHER] {
        let stack = nav.snapshot(admin);
        assert_eq!(stack.len(), 6);
        let who = admin.to_string();
        assert!(stack.iter().all(|e| e.param("who") == Some(who.as_str())));
    }
}
