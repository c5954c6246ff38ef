// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use cb_core::test_support::{new_match, new_player, utc};
use cb_core::{LineupPatch, LineupRole, MatchId, MatchStatus, PlayerId, RosterKey};

/// A match whose roster holds one player, already in the starting lineup
fn fixture(h: &Harness) -> (RosterKey, MatchId) {
    let team = h.club.seed_team(new_team("Eagles", "U12"));
    let tournament = h.club.seed_tournament(new_tournament("Cup"));
    let player = h.club.seed_player(new_player("Ivan"));
    let key = RosterKey::new(tournament, team, player);
    h.club.seed_roster(key, Some(9));
    let game = h
        .club
        .seed_match(new_match(tournament, team, "Falcons", utc(2024, 3, 2, 15, 0)));
    h.club.seed_lineup(game, player, LineupRole::Start);
    (key, game)
}

#[tokio::test]
async fn role_toggle_flips_to_bench() {
    let h = Harness::new();
    let (key, game) = fixture(&h);

    h.press(&format!("match_lineup_role_toggle|match={game}|player={}", key.player_id))
        .await;

    let patch = LineupPatch {
        role: Some(LineupRole::Sub),
        ..LineupPatch::default()
    };
    assert_eq!(
        h.club.mutations(),
        vec![Mutation::UpdateLineup(game, key.player_id, patch)]
    );
    assert!(h.chat.texts().contains(&"Роль обновлена.".to_string()));
    assert!(h.last_text().starts_with("*Состав матча*"));
}

#[tokio::test]
async fn role_toggle_for_player_not_in_lineup() {
    let h = Harness::new();
    let (_, game) = fixture(&h);

    h.press(&format!("match_lineup_role_toggle|match={game}|player=404")).await;

    assert_eq!(h.last_text(), "Игрок не найден в составе.");
    assert!(h.club.mutations().is_empty());
}

#[tokio::test]
async fn lineup_pick_adds_a_starter() {
    let h = Harness::new();
    let (key, game) = fixture(&h);
    let other = h.club.seed_player(new_player("Petr"));
    h.club.seed_roster(RosterKey::new(key.tournament_id, key.team_id, other), None);

    h.press(&format!("match_lineup_add_pick|match={game}|player={other}")).await;

    assert_eq!(
        h.club.mutations(),
        vec![Mutation::UpsertLineup {
            match_id: game,
            player_id: other,
            role: LineupRole::Start,
            number_override: None,
            note: None,
        }]
    );
    assert!(h.chat.texts().contains(&"Игрок добавлен в состав.".to_string()));
}

#[tokio::test]
async fn lineup_pick_outside_roster_is_refused() {
    let h = Harness::new();
    let (_, game) = fixture(&h);

    h.press(&format!("match_lineup_add_pick|match={game}|player={}", PlayerId::new(77)))
        .await;

    assert!(h.last_text().starts_with("Не удалось добавить игрока: "));
    assert_eq!(h.answer(), Some(None));
}

#[tokio::test]
async fn lineup_remove() {
    let h = Harness::new();
    let (key, game) = fixture(&h);

    h.press(&format!("match_lineup_remove|match={game}|player={}", key.player_id))
        .await;

    assert_eq!(h.club.mutations(), vec![Mutation::RemoveLineup(game, key.player_id)]);
    assert!(h.chat.texts().contains(&"Игрок удалён из состава.".to_string()));
}

#[tokio::test]
async fn cancel_status_clears_scores() {
    let h = Harness::new();
    let (_, game) = fixture(&h);

    h.press(&format!("match_status_set|id={game}|status=canceled")).await;

    assert!(h.chat.texts().contains(&"Статус матча: Отменён".to_string()));
    let stored = h.club.game(game).unwrap();
    assert_eq!(stored.status, MatchStatus::Canceled);
    assert_eq!(stored.final_us, None);
    assert!(h.last_text().starts_with("*Матч*"));
}

#[tokio::test]
async fn unknown_status_changes_nothing() {
    let h = Harness::new();
    let (_, game) = fixture(&h);

    h.press(&format!("match_status_set|id={game}|status=postponed")).await;

    assert_eq!(h.last_text(), "Неизвестный статус.");
    assert!(h.club.mutations().is_empty());
}

#[tokio::test]
async fn score_reset() {
    let h = Harness::new();
    let (_, game) = fixture(&h);

    h.press(&format!("match_scores_reset|id={game}")).await;

    assert!(h.chat.texts().contains(&"Счёт матча сброшен.".to_string()));
    assert!(matches!(h.club.mutations()[..], [Mutation::UpdateMatch(id, _)] if id == game));
}

#[tokio::test]
async fn failed_roster_removal_still_redraws_roster() {
    let h = Harness::new();
    let (key, _) = fixture(&h);
    h.club.set_failing(true);

    h.press(&format!(
        "roster_remove_player|t={}|team={}|player={}",
        key.tournament_id, key.team_id, key.player_id
    ))
    .await;

    let texts = h.chat.texts();
    assert!(texts.iter().any(|t| t.starts_with("Не удалось удалить игрока: ")));
    // Roster screen fails to load too while the store is down
    assert!(h.last_text().starts_with("Ошибка: "));
}

#[tokio::test]
async fn roster_removal() {
    let h = Harness::new();
    let (played, _) = fixture(&h);
    let bench = h.club.seed_player(new_player("Petr"));
    let key = RosterKey::new(played.tournament_id, played.team_id, bench);
    h.club.seed_roster(key, None);

    h.press(&format!(
        "roster_remove_player|t={}|team={}|player={bench}",
        key.tournament_id, key.team_id
    ))
    .await;

    assert_eq!(h.club.mutations(), vec![Mutation::RemoveRosterPlayer(key)]);
    assert!(h.chat.texts().contains(&"Игрок удалён из заявки.".to_string()));
    assert!(h.last_text().starts_with("*Состав заявки*"));
}

#[tokio::test]
async fn player_with_lineup_stays_in_roster() {
    let h = Harness::new();
    let (key, _) = fixture(&h);

    h.press(&format!(
        "roster_remove_player|t={}|team={}|player={}",
        key.tournament_id, key.team_id, key.player_id
    ))
    .await;

    assert!(h.club.mutations().is_empty());
    assert!(h.chat.texts().iter().any(|t| t.starts_with("Не удалось удалить игрока: ")));
    assert!(h.last_text().starts_with("*Состав заявки*"));
}

#[tokio::test]
async fn open_match_remembers_the_team_list() {
    let h = Harness::new();
    let (key, game) = fixture(&h);

    h.press(&format!("open_match|id={game}")).await;

    assert_eq!(
        h.nav(),
        vec![NavEntry::new("games_open_team")
            .with("t", key.tournament_id)
            .with("team", key.team_id)]
    );
    h.press("nav_back").await;
    assert!(h.last_text().starts_with("*Матчи команды*"));
}

#[tokio::test]
async fn roster_pick_starts_number_wizard() {
    let h = Harness::new();
    let (key, _) = fixture(&h);

    h.press(&format!(
        "roster_add_pick|t={}|team={}|player={}",
        key.tournament_id, key.team_id, key.player_id
    ))
    .await;

    assert_eq!(h.wizard_flow().await.as_deref(), Some(flows::ROSTER_ADD_PLAYER));
    assert_eq!(h.last_text(), "Введите номер игрока в турнире (или '-' для пропуска).");
}

#[tokio::test]
async fn starting_a_wizard_keeps_navigation() {
    let h = Harness::new();
    let (key, game) = fixture(&h);
    h.press(&format!("open_match|id={game}")).await;

    h.press(&format!("match_lineup_number|match={game}|player={}", key.player_id))
        .await;

    assert_eq!(h.wizard_flow().await.as_deref(), Some(flows::LINEUP_NUMBER));
    let stored = SessionStore::new(h.sessions.clone()).load(ADMIN).await.unwrap();
    assert_eq!(stored.nav.len(), 1);
}

#[tokio::test]
async fn command_resets_navigation_but_keeps_the_form() {
    let h = Harness::new();
    let (key, game) = fixture(&h);
    h.press(&format!("open_match|id={game}")).await;
    h.press(&format!("match_lineup_number|match={game}|player={}", key.player_id))
        .await;

    h.text("/games").await;

    assert!(h.nav().is_empty());
    assert_eq!(h.wizard_flow().await.as_deref(), Some(flows::LINEUP_NUMBER));
    let stored = SessionStore::new(h.sessions.clone()).load(ADMIN).await.unwrap();
    assert!(stored.nav.is_empty());
}
