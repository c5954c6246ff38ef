// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use cb_core::test_support::{new_match, new_player, new_team, new_tournament, utc};
use cb_core::{CardType, EventKind, Patch};

struct Seeded {
    repo: MemoryClubRepo,
    tournament: TournamentId,
    team: TeamId,
    anna: PlayerId,
    boris: PlayerId,
}

fn seeded() -> Seeded {
    let repo = MemoryClubRepo::new();
    let tournament = repo.seed_tournament(new_tournament("Spring Cup"));
    let team = repo.seed_team(new_team("Eagles", "U12"));
    let anna = repo.seed_player(new_player("Anna"));
    let boris = repo.seed_player(new_player("Boris"));
    Seeded {
        repo,
        tournament,
        team,
        anna,
        boris,
    }
}

#[tokio::test]
async fn seeding_records_no_mutations() {
    let s = seeded();
    assert!(s.repo.mutations().is_empty());
    assert_eq!(s.repo.count_players().await.unwrap(), 2);
}

#[tokio::test]
async fn create_team_is_recorded_and_listed() {
    let repo = MemoryClubRepo::new();
    let id = repo.create_team(new_team("Falcons", "U10")).await.unwrap();

    assert_eq!(repo.mutations(), vec![Mutation::CreateTeam(new_team("Falcons", "U10"))]);
    let teams = repo.list_active_teams().await.unwrap();
    assert_eq!(teams.len(), 1);
    assert_eq!(teams[0].id, id);
}

#[tokio::test]
async fn inactive_teams_are_not_listed() {
    let s = seeded();
    let patch = TeamPatch {
        active: Some(false),
        ..TeamPatch::default()
    };
    s.repo.update_team(s.team, patch).await.unwrap();
    assert!(s.repo.list_active_teams().await.unwrap().is_empty());
}

#[tokio::test]
async fn cleared_patch_nulls_the_note() {
    let repo = MemoryClubRepo::new();
    let mut team = new_team("Owls", "U14");
    team.note = Some("old".into());
    let id = repo.seed_team(team);

    let patch = TeamPatch {
        note: Patch::Cleared,
        ..TeamPatch::default()
    };
    repo.update_team(id, patch).await.unwrap();
    assert_eq!(repo.team(id).unwrap().note, None);
}

#[tokio::test]
async fn unknown_ids_are_not_found() {
    let repo = MemoryClubRepo::new();
    let err = repo.get_team(TeamId::new(42)).await.unwrap_err();
    assert_eq!(err, DomainError::NotFound("team"));
}

#[tokio::test]
async fn roster_orders_by_number_then_name() {
    let s = seeded();
    let carl = s.repo.seed_player(new_player("Carl"));
    s.repo.seed_roster(RosterKey::new(s.tournament, s.team, s.boris), Some(7));
    s.repo.seed_roster(RosterKey::new(s.tournament, s.team, s.anna), None);
    s.repo.seed_roster(RosterKey::new(s.tournament, s.team, carl), Some(3));

    let names: Vec<String> = s
        .repo
        .list_roster(s.tournament, s.team)
        .await
        .unwrap()
        .into_iter()
        .map(|e| e.player_name)
        .collect();
    assert_eq!(names, vec!["Carl", "Boris", "Anna"]);
}

#[tokio::test]
async fn duplicate_roster_add_conflicts() {
    let s = seeded();
    let key = RosterKey::new(s.tournament, s.team, s.anna);
    s.repo.add_roster_player(key, Some(9)).await.unwrap();
    let err = s.repo.add_roster_player(key, None).await.unwrap_err();
    assert!(matches!(err, DomainError::Conflict(_)));
}

#[tokio::test]
async fn participation_counts_lineups_and_events() {
    let s = seeded();
    let m = s
        .repo
        .seed_match(new_match(s.tournament, s.team, "Lions", utc(2024, 3, 2, 10, 0)));
    let anna = RosterKey::new(s.tournament, s.team, s.anna);
    let boris = RosterKey::new(s.tournament, s.team, s.boris);
    assert!(!s.repo.has_participation(anna).await.unwrap());

    s.repo.seed_lineup(m, s.anna, LineupRole::Start);
    assert!(s.repo.has_participation(anna).await.unwrap());
    assert!(!s.repo.has_participation(boris).await.unwrap());

    s.repo
        .add_event(NewMatchEvent {
            match_id: m,
            kind: EventKind::Card,
            time_text: "12".into(),
            player_main: Some(s.boris),
            player_alt: None,
            card_type: Some(CardType::Yellow),
        })
        .await
        .unwrap();
    assert!(s.repo.has_participation(boris).await.unwrap());
}

#[tokio::test]
async fn lineup_lists_starters_first_with_roster_numbers() {
    let s = seeded();
    let m = s
        .repo
        .seed_match(new_match(s.tournament, s.team, "Lions", utc(2024, 3, 2, 10, 0)));
    s.repo.seed_roster(RosterKey::new(s.tournament, s.team, s.anna), Some(4));
    s.repo.seed_lineup(m, s.anna, LineupRole::Sub);
    s.repo.seed_lineup(m, s.boris, LineupRole::Start);

    let lineup = s.repo.get_lineup(m).await.unwrap();
    assert_eq!(lineup[0].player_id, s.boris);
    assert_eq!(lineup[1].player_id, s.anna);
    assert_eq!(lineup[1].roster_number, Some(4));
}

#[tokio::test]
async fn events_carry_player_names() {
    let s = seeded();
    let m = s
        .repo
        .seed_match(new_match(s.tournament, s.team, "Lions", utc(2024, 3, 2, 10, 0)));
    s.repo
        .add_event(NewMatchEvent {
            match_id: m,
            kind: EventKind::Sub,
            time_text: "60".into(),
            player_main: Some(s.anna),
            player_alt: Some(s.boris),
            card_type: None,
        })
        .await
        .unwrap();

    let events = s.repo.list_events(m).await.unwrap();
    assert_eq!(events[0].player_main_name.as_deref(), Some("Anna"));
    assert_eq!(events[0].player_alt_name.as_deref(), Some("Boris"));
}

#[tokio::test]
async fn failing_repo_returns_storage_errors() {
    let s = seeded();
    s.repo.set_failing(true);
    let err = s.repo.list_active_teams().await.unwrap_err();
    assert!(matches!(err, DomainError::Storage(_)));
}
