// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use cb_core::{MatchPatch, MatchStatus, NewMatch};
use yare::parameterized;

const SCORES_ERROR_COUNT: &str = "Ожидалось 6 значений для счётов, получено 1.";

#[parameterized(
    blank = { "" },
    dash = { " - " },
)]
fn skipped_scores_line(input: &str) {
    assert_eq!(parse_scores(input), Ok(None));
}

#[test]
fn scores_line_with_cleared_slots() {
    let scores = parse_scores("1:0 2:1 - - 2 -").unwrap().unwrap();

    assert_eq!(scores.ht, Patch::Set("1:0".to_string()));
    assert_eq!(scores.ft, Patch::Set("2:1".to_string()));
    assert_eq!(scores.et, Patch::Cleared);
    assert_eq!(scores.pen, Patch::Cleared);
    assert_eq!(scores.us, Patch::Set(2));
    assert_eq!(scores.them, Patch::Cleared);
}

#[parameterized(
    too_few = { "2:1", SCORES_ERROR_COUNT },
    no_colon = { "1-0 2:1 - - 2 1", "Некорректный формат счёта «1-0»." },
    not_a_number = { "1:0 2:1 - - два 1", "Некорректное значение счёта «два»." },
)]
fn malformed_scores_line(input: &str, message: &str) {
    assert_eq!(parse_scores(input), Err(message.to_string()));
}

#[tokio::test]
async fn match_create_reads_kickoff_in_club_time() {
    let h = Harness::new();
    let team = h.club.seed_team(new_team("Eagles", "U12"));
    let tournament = h.club.seed_tournament(new_tournament("Cup"));
    let player = h.club.seed_player(new_player("Ivan"));
    h.club.seed_roster(RosterKey::new(tournament, team, player), None);
    h.start(MATCH_CREATE, match_create_seed(tournament, team)).await;

    h.answer(&["Falcons", "2024-03-10", "25:00"]).await;
    assert_eq!(h.last_text(), "Неверный формат времени. Используйте HH:MM (24 часа).");
    let screen = h.answer(&["18:00", "Central"]).await;

    assert_eq!(screen, Some(ScreenRequest::GamesMatches { tournament, team }));
    assert_eq!(
        h.club.mutations(),
        vec![Mutation::CreateMatch(NewMatch {
            tournament_id: tournament,
            team_id: team,
            opponent: "Falcons".into(),
            start_time: utc(2024, 3, 10, 15, 0),
            location: Some("Central".into()),
            status: MatchStatus::Scheduled,
        })]
    );
}

#[tokio::test]
async fn match_create_needs_a_date() {
    let h = Harness::new();
    h.start(MATCH_CREATE, match_create_seed(TournamentId::new(1), TeamId::new(2)))
        .await;

    h.answer(&["Falcons", "-"]).await;

    assert_eq!(h.last_text(), "Неверный формат. Используйте YYYY-MM-DD.");
    assert_eq!(h.state().await.map(|s| s.step), Some(1));
}

#[tokio::test]
async fn match_edit_new_date_keeps_kickoff_time() {
    let h = Harness::new();
    let (game, _) = fixture(&h);
    h.start(MATCH_EDIT, match_edit_seed(game)).await;

    let screen = h.answer(&["-", "2024-03-09", "-", "-", "-"]).await;

    assert_eq!(screen, Some(ScreenRequest::Match { id: game }));
    let patch = MatchPatch {
        start_time: Some(utc(2024, 3, 9, 15, 0)),
        ..MatchPatch::default()
    };
    assert_eq!(h.club.mutations(), vec![Mutation::UpdateMatch(game, patch)]);
    assert_eq!(h.last_text(), "Матч обновлён.");
}

#[tokio::test]
async fn match_edit_location_can_be_cleared() {
    let h = Harness::new();
    let (game, _) = fixture(&h);
    h.start(MATCH_EDIT, match_edit_seed(game)).await;

    h.answer(&["-", "-", "-", "Удалить", "-"]).await;

    let patch = MatchPatch {
        location: Patch::Cleared,
        ..MatchPatch::default()
    };
    assert_eq!(h.club.mutations(), vec![Mutation::UpdateMatch(game, patch)]);
}

#[tokio::test]
async fn canceling_a_match_drops_entered_scores() {
    let h = Harness::new();
    let (game, _) = fixture(&h);
    h.start(MATCH_EDIT, match_edit_seed(game)).await;

    h.answer(&["canceled", "-", "-", "-", "1:0 2:1 - - 2 1"]).await;

    let mut patch = MatchPatch {
        status: Some(MatchStatus::Canceled),
        ..MatchPatch::default()
    };
    patch.clear_scores();
    assert_eq!(h.club.mutations(), vec![Mutation::UpdateMatch(game, patch)]);
}

#[tokio::test]
async fn bad_scores_line_is_asked_again() {
    let h = Harness::new();
    let (game, _) = fixture(&h);
    h.start(MATCH_EDIT, match_edit_seed(game)).await;

    h.answer(&["played", "-", "-", "-", "2:1"]).await;

    assert_eq!(h.last_text(), SCORES_ERROR_COUNT);
    assert_eq!(h.state().await.map(|s| s.step), Some(4));
    assert!(h.club.mutations().is_empty());

    h.answer(&["1:0 2:1 - - 2 1"]).await;

    let patch = MatchPatch {
        status: Some(MatchStatus::Played),
        score_ht: Patch::Set("1:0".into()),
        score_ft: Patch::Set("2:1".into()),
        score_et: Patch::Cleared,
        score_pen: Patch::Cleared,
        final_us: Patch::Set(2),
        final_them: Patch::Set(1),
        ..MatchPatch::default()
    };
    assert_eq!(h.club.mutations(), vec![Mutation::UpdateMatch(game, patch)]);
}
