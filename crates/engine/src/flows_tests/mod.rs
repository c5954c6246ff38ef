// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::navigation::Navigator;
use crate::screens::ScreenRequest;
use crate::service::Club;
use crate::wizard::WizardRunner;
use cb_adapters::FakeChatAdapter;
use cb_core::test_support::{new_match, new_player, new_team, new_tournament, utc};
use cb_core::{AdminId, LineupPatch, LineupRole, TournamentPatch, WizardState};
use cb_storage::{MemoryClubRepo, MemorySessionRepo, Mutation, SessionStore};
use chrono_tz::Europe::Moscow;
use std::sync::Arc;

mod matches;
mod people;

const ADMIN: AdminId = AdminId::new(1);
const CHAT: i64 = 500;

struct Harness {
    runner: WizardRunner<MemorySessionRepo, FakeChatAdapter>,
    sessions: MemorySessionRepo,
    club: MemoryClubRepo,
    chat: FakeChatAdapter,
}

impl Harness {
    fn new() -> Self {
        let sessions = MemorySessionRepo::new();
        let club = MemoryClubRepo::new();
        let chat = FakeChatAdapter::new();
        let nav = Arc::new(Navigator::new(SessionStore::new(sessions.clone())));
        let runner = WizardRunner::new(
            registry(),
            SessionStore::new(sessions.clone()),
            nav,
            chat.clone(),
            Club::new(Arc::new(club.clone())),
            Moscow,
        );
        Self {
            runner,
            sessions,
            club,
            chat,
        }
    }

    async fn state(&self) -> Option<WizardState> {
        let session = SessionStore::new(self.sessions.clone()).load(ADMIN).await.unwrap();
        session.active_wizard().cloned()
    }

    async fn start(&self, tag: &str, seed: WizardData) {
        self.runner.start(ADMIN, CHAT, tag, seed).await.unwrap();
    }

    /// Feed replies in order, returning the screen after the last one.
    async fn answer(&self, replies: &[&str]) -> Option<ScreenRequest> {
        let mut screen = None;
        for reply in replies {
            let state = self.state().await.expect("wizard in progress");
            screen = self.runner.reply(ADMIN, CHAT, &state, reply).await.unwrap();
        }
        screen
    }

    fn last_text(&self) -> String {
        self.chat.texts().last().cloned().unwrap_or_default()
    }
}

/// A match with one player on the roster and in the starting lineup
fn fixture(h: &Harness) -> (MatchId, PlayerId) {
    let team = h.club.seed_team(new_team("Eagles", "U12"));
    let tournament = h.club.seed_tournament(new_tournament("Cup"));
    let player = h.club.seed_player(new_player("Ivan"));
    h.club.seed_roster(RosterKey::new(tournament, team, player), Some(7));
    let game = h
        .club
        .seed_match(new_match(tournament, team, "Falcons", utc(2024, 3, 2, 15, 0)));
    h.club.seed_lineup(game, player, LineupRole::Start);
    (game, player)
}

#[test]
fn registry_knows_every_flow() {
    assert_eq!(
        registry().tags(),
        vec![
            CREATE_PLAYER,
            CREATE_TEAM,
            CREATE_TOURNAMENT,
            EDIT_PLAYER,
            EDIT_TEAM,
            EDIT_TOURNAMENT,
            EVENT_CARD,
            EVENT_GOAL,
            EVENT_SUB,
            LINEUP_NUMBER,
            MATCH_CREATE,
            MATCH_EDIT,
            ROSTER_ADD_PLAYER,
            ROSTER_CHANGE_NUMBER,
        ]
    );
}

#[test]
fn substitution_needs_two_players() {
    let game = MatchId::new(3);
    assert!(sub_seed(game, PlayerId::new(5), PlayerId::new(5)).is_none());
    let data = sub_seed(game, PlayerId::new(5), PlayerId::new(6)).unwrap();
    assert_eq!(data.get("out_id"), Some("5"));
    assert_eq!(data.get("in_id"), Some("6"));
}

#[test]
fn edit_seed_stashes_only_present_values() {
    let team = Team {
        id: TeamId::new(4),
        name: "Eagles".into(),
        short_code: "U12".into(),
        active: true,
        note: None,
        created_at: utc(2024, 1, 1, 0, 0),
        updated_at: utc(2024, 1, 1, 0, 0),
    };

    let data = edit_team_seed(&team);

    assert_eq!(data.get("id"), Some("4"));
    assert_eq!(data.get("orig_name"), Some("Eagles"));
    assert!(!data.contains("orig_note"));
}

#[tokio::test]
async fn create_tournament_defaults_blank_status_to_planned() {
    let h = Harness::new();
    h.start(CREATE_TOURNAMENT, WizardData::new()).await;

    let screen = h
        .answer(&["Spring Cup", "-", "", "2024-04-01", "-", "-"])
        .await;

    assert_eq!(screen, Some(ScreenRequest::Tournaments { page: 1 }));
    let mut expected = new_tournament("Spring Cup");
    expected.start_date = chrono::NaiveDate::from_ymd_opt(2024, 4, 1);
    assert_eq!(h.club.mutations(), vec![Mutation::CreateTournament(expected)]);
    assert_eq!(h.last_text(), "Турнир создан.");
}

#[tokio::test]
async fn invalid_status_asks_again() {
    let h = Harness::new();
    h.start(CREATE_TOURNAMENT, WizardData::new()).await;

    h.answer(&["Spring Cup", "-", "soon"]).await;

    assert_eq!(h.last_text(), "Неверный статус. Попробуйте ещё раз.");
    assert_eq!(h.state().await.map(|s| s.step), Some(2));
}

#[tokio::test]
async fn edit_tournament_clearing_only_the_note() {
    let h = Harness::new();
    let mut tournament = new_tournament("Spring Cup");
    tournament.note = Some("old".into());
    let id = h.club.seed_tournament(tournament);
    let seed = edit_tournament_seed(&h.club.tournament(id).unwrap());
    h.start(EDIT_TOURNAMENT, seed).await;

    h.answer(&["-", "-", "-", "-", "-", "удалить"]).await;

    let patch = TournamentPatch {
        note: Patch::Cleared,
        ..TournamentPatch::default()
    };
    assert_eq!(h.club.mutations(), vec![Mutation::UpdateTournament(id, patch)]);
    assert!(h.state().await.is_none());
    assert_eq!(h.club.tournament(id).unwrap().note, None);
}

#[tokio::test]
async fn edit_tournament_prompts_show_current_values() {
    let h = Harness::new();
    let mut tournament = new_tournament("spring_cup");
    tournament.kind = Some("league".into());
    let id = h.club.seed_tournament(tournament);
    h.start(EDIT_TOURNAMENT, edit_tournament_seed(&h.club.tournament(id).unwrap()))
        .await;

    assert_eq!(
        h.last_text(),
        "Текущее название: spring\\_cup\nВведите новое название (или '-' чтобы оставить)."
    );
    h.answer(&["-", "-"]).await;
    assert!(h.last_text().starts_with("Текущий статус: planned\n"));
    h.answer(&["-"]).await;
    assert!(h.last_text().starts_with("Текущая дата начала: (не задана)\n"));
}

#[tokio::test]
async fn roster_number_skip_adds_without_number() {
    let h = Harness::new();
    let key = RosterKey::new(TournamentId::new(1), TeamId::new(2), PlayerId::new(3));
    h.start(ROSTER_ADD_PLAYER, roster_seed(key)).await;

    h.answer(&["семь"]).await;
    assert_eq!(h.last_text(), "Номер должен быть целым числом или '-' для пропуска.");

    let screen = h.answer(&["-"]).await;

    assert_eq!(
        screen,
        Some(ScreenRequest::Roster {
            tournament: key.tournament_id,
            team: key.team_id,
        })
    );
    assert_eq!(h.club.mutations(), vec![Mutation::AddRosterPlayer(key, None)]);
}

#[tokio::test]
async fn roster_number_change() {
    let h = Harness::new();
    let key = RosterKey::new(TournamentId::new(1), TeamId::new(2), PlayerId::new(3));
    h.club.seed_roster(key, Some(7));
    h.start(ROSTER_CHANGE_NUMBER, roster_seed(key)).await;

    h.answer(&["10"]).await;

    assert_eq!(h.club.mutations(), vec![Mutation::UpdateRosterNumber(key, Some(10))]);
    assert_eq!(h.last_text(), "Номер обновлён.");
}

#[tokio::test]
async fn lineup_number_dash_clears_override() {
    let h = Harness::new();
    let (game, player) = fixture(&h);
    h.start(LINEUP_NUMBER, match_player_seed(game, player)).await;

    h.answer(&[""]).await;
    assert_eq!(h.last_text(), "Введите номер или '-' для удаления.");
    let screen = h.answer(&["-"]).await;

    assert_eq!(screen, Some(ScreenRequest::Lineup { game }));
    let patch = LineupPatch {
        number_override: Patch::Cleared,
        ..LineupPatch::default()
    };
    assert_eq!(h.club.mutations(), vec![Mutation::UpdateLineup(game, player, patch)]);
}

#[tokio::test]
async fn card_is_recorded_with_its_type() {
    let h = Harness::new();
    let (game, player) = fixture(&h);
    h.start(EVENT_CARD, card_seed(game, player, CardType::Red)).await;

    let screen = h.answer(&["90+3"]).await;

    assert_eq!(screen, Some(ScreenRequest::Match { id: game }));
    let events = h.club.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].card_type, Some(CardType::Red));
    assert_eq!(events[0].time_text, "90+3");
    assert_eq!(h.last_text(), "Карточка добавлена.");
}

#[tokio::test]
async fn failed_goal_keeps_the_wizard_open() {
    let h = Harness::new();
    h.club.set_failing(true);
    h.start(EVENT_GOAL, match_player_seed(MatchId::new(1), PlayerId::new(2)))
        .await;

    let screen = h.answer(&["45+2"]).await;

    assert_eq!(screen, None);
    assert!(h.chat.texts().iter().any(|t| t.starts_with("Не удалось добавить гол: ")));
    let state = h.state().await.unwrap();
    assert_eq!(state.flow, EVENT_GOAL);
    assert_eq!(state.step, 0);
}

#[tokio::test]
async fn failed_create_drops_the_wizard() {
    let h = Harness::new();
    h.club.set_failing(true);
    h.start(CREATE_TEAM, WizardData::new()).await;

    h.answer(&["Eagles", "U12", "да", "-"]).await;

    assert!(h.state().await.is_none());
    assert!(h.last_text().starts_with("Не удалось создать команду: "));
}
