// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use cb_adapters::{ChatCall, FakeChatAdapter};
use cb_core::test_support::{new_team, new_tournament};
use cb_core::{FakeClock, NavEntry, TournamentId};
use cb_engine::screens::HELP;
use cb_storage::{MemoryClubRepo, MemorySessionRepo, Mutation};
use chrono_tz::Europe::Moscow;

mod actions;

const ADMIN: AdminId = AdminId::new(7);
const STRANGER: AdminId = AdminId::new(666);
const CHAT: i64 = 7;
const PRESSED: MessageRef = MessageRef {
    chat_id: CHAT,
    message_id: 10,
};

struct Harness {
    dispatcher: Dispatcher<MemorySessionRepo, FakeChatAdapter, FakeClock>,
    sessions: MemorySessionRepo,
    club: MemoryClubRepo,
    chat: FakeChatAdapter,
    clock: FakeClock,
}

impl Harness {
    fn new() -> Self {
        Self::with_sessions(MemorySessionRepo::with_clock(FakeClock::new()))
    }

    /// A fresh process over existing session rows
    fn with_sessions(sessions: MemorySessionRepo) -> Self {
        let clock = FakeClock::new();
        let club = MemoryClubRepo::new();
        let chat = FakeChatAdapter::new();
        let dispatcher = Dispatcher::new(
            HashSet::from([ADMIN]),
            sessions.clone(),
            Club::new(Arc::new(club.clone())),
            chat.clone(),
            clock.clone(),
            Moscow,
        );
        Self {
            dispatcher,
            sessions,
            club,
            chat,
            clock,
        }
    }

    async fn text(&self, text: &str) {
        self.text_from(ADMIN, text).await;
    }

    async fn text_from(&self, sender: AdminId, text: &str) {
        self.dispatcher
            .handle(Inbound::Text {
                sender,
                chat_id: CHAT,
                text: text.to_string(),
            })
            .await;
    }

    async fn press(&self, data: &str) {
        self.press_from(ADMIN, data).await;
    }

    async fn press_from(&self, sender: AdminId, data: &str) {
        self.dispatcher
            .handle(Inbound::Callback {
                sender,
                callback_id: "cb-1".into(),
                message: Some(PRESSED),
                data: data.to_string(),
            })
            .await;
    }

    fn last_text(&self) -> String {
        self.chat.texts().last().cloned().unwrap_or_default()
    }

    /// Toast of the most recent callback answer
    fn answer(&self) -> Option<Option<String>> {
        self.chat.calls().into_iter().rev().find_map(|c| match c {
            ChatCall::AnswerCallback { text, .. } => Some(text),
            _ => None,
        })
    }

    fn nav(&self) -> Vec<NavEntry> {
        self.dispatcher.navigator().snapshot(ADMIN)
    }

    async fn wizard_flow(&self) -> Option<String> {
        let session = SessionStore::new(self.sessions.clone()).load(ADMIN).await.unwrap();
        session.active_wizard().map(|w| w.flow.clone())
    }
}

#[tokio::test]
async fn stranger_text_gets_permission_notice() {
    let h = Harness::new();

    h.text_from(STRANGER, "/tournaments").await;

    assert_eq!(h.chat.texts(), vec![NO_PERMISSION.to_string()]);
    assert!(h.sessions.calls().is_empty());
}

#[tokio::test]
async fn stranger_button_is_refused() {
    let h = Harness::new();

    h.press_from(STRANGER, "teams_menu").await;

    assert_eq!(h.answer(), Some(Some(NO_PERMISSION_BUTTON.to_string())));
    assert!(h.chat.texts().is_empty());
}

#[tokio::test]
async fn start_command_shows_help() {
    let h = Harness::new();
    h.text("/start").await;
    assert_eq!(h.last_text(), HELP);
}

#[tokio::test]
async fn command_addressed_to_the_bot() {
    let h = Harness::new();
    h.text("/start@club_bot").await;
    assert_eq!(h.last_text(), HELP);
}

#[tokio::test]
async fn unknown_command() {
    let h = Harness::new();
    h.text("/stats").await;
    assert_eq!(h.last_text(), UNKNOWN_COMMAND);
}

#[tokio::test]
async fn open_tournament_then_back() {
    let h = Harness::new();
    let mut id = TournamentId::new(0);
    for n in 1..=5 {
        id = h.club.seed_tournament(new_tournament(&format!("Cup {n}")));
    }

    h.text("/tournaments").await;
    assert!(h.last_text().starts_with("*Турниры*"));

    h.press(&format!("open_tournament|id={id}|page=1")).await;
    assert_eq!(h.nav(), vec![NavEntry::new("tournaments_page").with("page", 1)]);
    match h.chat.last_render() {
        Some(ChatCall::Edit { message, text, .. }) => {
            assert_eq!(message, PRESSED);
            assert!(text.starts_with("*Cup 5*"));
        }
        other => panic!("expected the detail to replace the list, got {other:?}"),
    }

    h.press("nav_back").await;
    assert!(h.nav().is_empty());
    assert!(h.last_text().starts_with("*Турниры*"));
    assert_eq!(h.answer(), Some(None));
}

#[tokio::test]
async fn back_with_no_history() {
    let h = Harness::new();
    h.press("nav_back").await;
    assert_eq!(h.last_text(), NO_HISTORY);
}

#[tokio::test]
async fn back_to_a_screen_that_cannot_be_redrawn() {
    let h = Harness::new();
    h.dispatcher
        .navigator()
        .push(ADMIN, NavEntry::new("match_edit").with("id", 3))
        .await;

    h.press("nav_back").await;

    assert_eq!(h.last_text(), BACK_FAILED);
}

#[tokio::test]
async fn navigation_survives_a_restart() {
    let sessions = MemorySessionRepo::new();
    let before = Harness::with_sessions(sessions.clone());
    let team = before.club.seed_team(new_team("Eagles", "U12"));
    before.press(&format!("team_open|id={team}")).await;

    let after = Harness::with_sessions(sessions);
    after.press("nav_back").await;

    assert!(after.last_text().starts_with("*Команды*"));
    assert!(after.nav().is_empty());
}

#[tokio::test]
async fn commands_reset_navigation() {
    let h = Harness::new();
    let team = h.club.seed_team(new_team("Eagles", "U12"));
    h.press(&format!("team_open|id={team}")).await;
    assert_eq!(h.nav().len(), 1);

    h.text("/players").await;

    assert!(h.nav().is_empty());
}

#[yare::parameterized(
    empty = { "" },
    malformed = { "open_tournament|oops" },
    missing_id = { "team_open" },
    zero_id = { "open_match|id=0" },
)]
#[test_macro(tokio::test)]
async fn bad_buttons(data: &str) {
    let h = Harness::new();

    h.press(data).await;

    assert_eq!(h.answer(), Some(Some(INVALID_BUTTON.to_string())));
    assert!(h.chat.texts().is_empty());
    assert!(h.nav().is_empty());
}

#[tokio::test]
async fn unknown_action_is_in_development() {
    let h = Harness::new();
    h.press("stats_export").await;
    assert_eq!(h.answer(), Some(Some(IN_DEVELOPMENT.to_string())));
}

#[tokio::test]
async fn free_text_without_wizard_is_ignored() {
    let h = Harness::new();

    h.text("hello").await;

    assert!(h.chat.calls().is_empty());
    assert!(h.club.mutations().is_empty());
}

#[tokio::test]
async fn create_team_end_to_end() {
    let h = Harness::new();

    h.press("teams_start_create").await;
    for reply in ["Eagles", "U12", "да", "-"] {
        h.text(reply).await;
    }

    assert_eq!(h.club.mutations(), vec![Mutation::CreateTeam(new_team("Eagles", "U12"))]);
    assert_eq!(h.wizard_flow().await, None);
    assert!(h.sessions.row(ADMIN).is_none());
    assert!(h.chat.texts().iter().any(|t| t == "Команда создана."));
    assert!(h.last_text().starts_with("*Команды*"));
}

#[tokio::test]
async fn wizard_reply_is_trimmed() {
    let h = Harness::new();
    h.press("teams_start_create").await;

    h.text("  Eagles  ").await;
    for reply in ["U12", "да", "-"] {
        h.text(reply).await;
    }

    assert_eq!(h.club.mutations(), vec![Mutation::CreateTeam(new_team("Eagles", "U12"))]);
}

#[tokio::test]
async fn stale_wizard_is_dropped() {
    let sessions = MemorySessionRepo::with_clock(FakeClock::new());
    let h = Harness::with_sessions(sessions);
    let h = Harness {
        dispatcher: h.dispatcher.with_session_ttl(Some(Duration::from_secs(3600))),
        ..h
    };
    h.press("teams_start_create").await;
    h.clock.advance(Duration::from_secs(2 * 3600));
    let sent = h.chat.texts().len();

    h.text("Eagles").await;

    assert_eq!(h.chat.texts().len(), sent);
    assert_eq!(h.wizard_flow().await, None);
    assert!(h.club.mutations().is_empty());
}

#[tokio::test]
async fn fresh_wizard_survives_ttl() {
    let h = Harness::new();
    let h = Harness {
        dispatcher: h.dispatcher.with_session_ttl(Some(Duration::from_secs(3600))),
        ..h
    };
    h.press("teams_start_create").await;

    h.text("Eagles").await;

    assert_eq!(h.wizard_flow().await.as_deref(), Some(flows::CREATE_TEAM));
}

#[tokio::test]
async fn edit_of_missing_team_reports_the_error() {
    let h = Harness::new();

    h.press("team_edit|id=99").await;

    assert!(h.last_text().starts_with("Ошибка: "));
    assert_eq!(h.wizard_flow().await, None);
    assert_eq!(h.answer(), Some(None));
}

#[tokio::test]
async fn unknown_card_type_starts_nothing() {
    let h = Harness::new();

    h.press("match_events_card_type|match=1|player=2|type=green").await;

    assert_eq!(h.last_text(), "Неизвестный тип карточки.");
    assert_eq!(h.wizard_flow().await, None);
}

#[tokio::test]
async fn card_type_is_case_insensitive() {
    let h = Harness::new();

    h.press("match_events_card_type|match=1|player=2|type=RED").await;

    assert_eq!(h.wizard_flow().await.as_deref(), Some(flows::EVENT_CARD));
}

#[tokio::test]
async fn substitution_needs_two_players() {
    let h = Harness::new();

    h.press("match_events_sub_pick_in|match=1|out=4|player=4").await;

    assert_eq!(h.last_text(), "Игроки замены должны отличаться.");
    assert!(h.sessions.calls().is_empty());
}

#[yare::parameterized(
    tournament = { "open_tournament|id=5|page=2", Some("tournaments_page|page=2") },
    tournament_first_page = { "open_tournament|id=5", Some("tournaments_page|page=1") },
    team = { "team_open|id=3", Some("teams_menu") },
    player = { "player_open|id=4|page=3", Some("players_menu|page=3") },
    roster = { "roster_open_team|t=2|team=3", Some("roster_open_tournament|id=2") },
    games = { "games_open_team|t=2|team=3", Some("games_open_tournament|id=2") },
    game = { "open_match|id=9|t=2|team=3", Some("games_open_team|t=2|team=3") },
    game_without_list = { "open_match|id=9", None },
    list_screen = { "teams_menu", None },
    wizard_start = { "team_edit|id=3", None },
)]
fn back_target_table(pressed: &str, expected: Option<&str>) {
    let pressed = payload::parse(pressed).unwrap();
    let expected = expected.map(|e| payload::parse(e).unwrap());
    assert_eq!(callbacks::back_target(&pressed), expected);
}
