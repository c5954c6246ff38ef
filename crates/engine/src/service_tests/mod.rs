// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Club service tests

use super::*;
use cb_core::test_support::{new_match, new_player, new_team, new_tournament, utc};
use cb_core::{
    CardType, DomainError, EventKind, LineupRole, MatchPatch, MatchStatus, NewTeam, Patch,
    PlayerId, RosterKey, TeamPatch,
};
use cb_storage::{MemoryClubRepo, Mutation};

fn club() -> (Club, MemoryClubRepo) {
    let repo = MemoryClubRepo::new();
    (Club::new(Arc::new(repo.clone())), repo)
}

/// Tournament, team and two rostered players plus one scheduled match.
struct Fixture {
    key: RosterKey,
    other: PlayerId,
    game: cb_core::MatchId,
}

fn seed_fixture(repo: &MemoryClubRepo) -> Fixture {
    let tournament = repo.seed_tournament(new_tournament("Spring Cup"));
    let team = repo.seed_team(new_team("Eagles", "U12"));
    let player = repo.seed_player(new_player("Ivan Petrov"));
    let other = repo.seed_player(new_player("Oleg Sidorov"));
    let key = RosterKey::new(tournament, team, player);
    repo.seed_roster(key, Some(7));
    repo.seed_roster(RosterKey::new(tournament, team, other), None);
    let game = repo.seed_match(new_match(tournament, team, "Falcons", utc(2024, 3, 2, 15, 0)));
    Fixture { key, other, game }
}

#[tokio::test]
async fn create_team_requires_name_and_code() {
    let (club, repo) = club();

    let err = club.create_team(new_team("  ", "U12")).await.unwrap_err();
    assert_eq!(err, DomainError::validation("name"));

    let err = club.create_team(new_team("Eagles", "")).await.unwrap_err();
    assert_eq!(err.to_string(), "short_code: validation error");

    assert!(repo.mutations().is_empty());
}

#[tokio::test]
async fn create_team_reaches_repository() {
    let (club, repo) = club();
    let team = NewTeam {
        note: Some("juniors".into()),
        ..new_team("Eagles", "U12")
    };

    let id = club.create_team(team.clone()).await.unwrap();

    assert_eq!(repo.mutations(), vec![Mutation::CreateTeam(team)]);
    assert_eq!(club.team(id).await.unwrap().name, "Eagles");
}

#[tokio::test]
async fn empty_patch_is_a_no_op() {
    let (club, repo) = club();
    let id = repo.seed_team(new_team("Eagles", "U12"));

    club.update_team(id, TeamPatch::default()).await.unwrap();

    assert!(repo.mutations().is_empty());
}

#[tokio::test]
async fn players_are_created_active() {
    let (club, repo) = club();
    let mut player = new_player("Ivan Petrov");
    player.active = false;

    let id = club.create_player(player).await.unwrap();

    assert!(club.player(id).await.unwrap().active);
    assert!(matches!(&repo.mutations()[0], Mutation::CreatePlayer(p) if p.active));
}

#[tokio::test]
async fn players_page_reports_next_page() {
    let (club, repo) = club();
    for name in ["Anna", "Boris", "Clara"] {
        repo.seed_player(new_player(name));
    }

    let first = club.players_page(1, 2).await.unwrap();
    assert_eq!(first.players.len(), 2);
    assert!(first.has_next);

    let second = club.players_page(2, 2).await.unwrap();
    assert_eq!(second.players.len(), 1);
    assert!(!second.has_next);
}

#[tokio::test]
async fn tournament_end_before_start_is_rejected() {
    let (club, _) = club();
    let mut t = new_tournament("Cup");
    t.start_date = chrono::NaiveDate::from_ymd_opt(2024, 5, 10);
    t.end_date = chrono::NaiveDate::from_ymd_opt(2024, 5, 1);

    let err = club.create_tournament(t).await.unwrap_err();
    assert!(err.is_validation());
}

#[tokio::test]
async fn roster_removal_blocked_by_participation() {
    let (club, repo) = club();
    let fx = seed_fixture(&repo);
    repo.seed_lineup(fx.game, fx.key.player_id, LineupRole::Start);

    let err = club.remove_from_roster(fx.key).await.unwrap_err();

    assert_eq!(err.to_string(), "player has participation records: validation error");
    assert!(repo.mutations().is_empty());
}

#[tokio::test]
async fn roster_removal_without_participation() {
    let (club, repo) = club();
    let fx = seed_fixture(&repo);

    club.remove_from_roster(fx.key).await.unwrap();

    assert_eq!(repo.mutations(), vec![Mutation::RemoveRosterPlayer(fx.key)]);
}

#[tokio::test]
async fn match_needs_roster_players() {
    let (club, repo) = club();
    let tournament = repo.seed_tournament(new_tournament("Cup"));
    let team = repo.seed_team(new_team("Eagles", "U12"));

    let err = club
        .create_match(new_match(tournament, team, "Falcons", utc(2024, 3, 2, 15, 0)))
        .await
        .unwrap_err();

    assert_eq!(err, DomainError::validation("team has no players in roster"));
}

#[tokio::test]
async fn match_requires_opponent() {
    let (club, repo) = club();
    let fx = seed_fixture(&repo);

    let err = club
        .create_match(new_match(fx.key.tournament_id, fx.key.team_id, " ", utc(2024, 3, 2, 15, 0)))
        .await
        .unwrap_err();

    assert_eq!(err, DomainError::validation("opponent"));
}

#[tokio::test]
async fn canceling_clears_scores() {
    let (club, repo) = club();
    let fx = seed_fixture(&repo);
    let patch = MatchPatch {
        status: Some(MatchStatus::Canceled),
        score_ft: Patch::Set("2:1".into()),
        ..MatchPatch::default()
    };

    club.update_match(fx.game, patch).await.unwrap();

    let Mutation::UpdateMatch(_, written) = &repo.mutations()[0] else {
        panic!("expected match update");
    };
    assert_eq!(written.score_ft, Patch::Cleared);
    assert_eq!(written.final_them, Patch::Cleared);
    assert_eq!(written.status, Some(MatchStatus::Canceled));
}

#[tokio::test]
async fn lineup_requires_roster_membership() {
    let (club, repo) = club();
    let fx = seed_fixture(&repo);
    let stranger = repo.seed_player(new_player("Stranger"));

    let err = club
        .upsert_lineup(fx.game, stranger, LineupRole::Start, None, None)
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::validation("player not in tournament roster"));

    club.upsert_lineup(fx.game, fx.key.player_id, LineupRole::Start, None, None)
        .await
        .unwrap();
    assert_eq!(club.lineup(fx.game).await.unwrap().len(), 1);
}

#[tokio::test]
async fn toggle_role_flips_and_reports() {
    let (club, repo) = club();
    let fx = seed_fixture(&repo);
    repo.seed_lineup(fx.game, fx.key.player_id, LineupRole::Start);

    assert_eq!(
        club.toggle_lineup_role(fx.game, fx.key.player_id).await.unwrap(),
        LineupRole::Sub
    );
    assert_eq!(
        club.toggle_lineup_role(fx.game, fx.key.player_id).await.unwrap(),
        LineupRole::Start
    );

    let err = club.toggle_lineup_role(fx.game, fx.other).await.unwrap_err();
    assert_eq!(err, DomainError::NotFound("lineup entry"));
}

#[tokio::test]
async fn events_validate_time_and_roster() {
    let (club, repo) = club();
    let fx = seed_fixture(&repo);
    let stranger = repo.seed_player(new_player("Stranger"));

    let err = club.add_goal(fx.game, fx.key.player_id, "  ").await.unwrap_err();
    assert_eq!(err, DomainError::validation("event_time"));

    let err = club.add_goal(fx.game, stranger, "12").await.unwrap_err();
    assert_eq!(err, DomainError::validation(format!("player {stranger} not in roster")));

    club.add_card(fx.game, fx.key.player_id, CardType::Yellow, "45+2")
        .await
        .unwrap();
    let events = repo.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, EventKind::Card);
    assert_eq!(events[0].time_text, "45+2");
}

#[tokio::test]
async fn substitution_needs_two_players() {
    let (club, repo) = club();
    let fx = seed_fixture(&repo);

    let err = club
        .add_substitution(fx.game, fx.other, fx.other, "60")
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::validation("players identical"));

    club.add_substitution(fx.game, fx.key.player_id, fx.other, "60")
        .await
        .unwrap();
    let event = &repo.events()[0];
    assert_eq!(event.player_main, Some(fx.key.player_id));
    assert_eq!(event.player_alt, Some(fx.other));
}

#[tokio::test]
async fn upcoming_skips_played_and_stale_fixtures() {
    let (club, repo) = club();
    let fx = seed_fixture(&repo);
    let (t, team) = (fx.key.tournament_id, fx.key.team_id);
    // seed_fixture already scheduled a match on 2024-03-02 15:00
    repo.seed_match(new_match(t, team, "Old", utc(2024, 2, 1, 10, 0)));
    repo.seed_match(new_match(t, team, "Just started", utc(2024, 3, 1, 11, 30)));
    let played = repo.seed_match(new_match(t, team, "Done", utc(2024, 3, 5, 10, 0)));
    club.update_match(
        played,
        MatchPatch {
            status: Some(MatchStatus::Played),
            ..MatchPatch::default()
        },
    )
    .await
    .unwrap();
    repo.seed_match(new_match(t, team, "Later", utc(2024, 3, 9, 10, 0)));
    repo.seed_match(new_match(t, team, "Much later", utc(2024, 4, 9, 10, 0)));

    let upcoming = club.upcoming(&[(t, team, "Eagles")], utc(2024, 3, 1, 12, 0)).await;

    let opponents: Vec<&str> = upcoming.iter().map(|u| u.game.opponent.as_str()).collect();
    assert_eq!(opponents, vec!["Just started", "Falcons", "Later"]);
    assert!(upcoming.iter().all(|u| u.context == "Eagles"));
}

#[tokio::test]
async fn storage_failures_surface_as_storage_errors() {
    let (club, repo) = club();
    repo.set_failing(true);

    let err = club.create_team(new_team("Eagles", "U12")).await.unwrap_err();
    assert!(matches!(err, DomainError::Storage(_)));
}
