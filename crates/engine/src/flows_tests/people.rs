// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use cb_core::{NewTeam, PlayerPatch, TeamPatch};

#[tokio::test]
async fn create_team_with_defaults() {
    let h = Harness::new();
    h.start(CREATE_TEAM, WizardData::new()).await;

    let screen = h.answer(&["Eagles", "U12", "да", "-"]).await;

    assert_eq!(screen, Some(ScreenRequest::Teams));
    assert_eq!(
        h.club.mutations(),
        vec![Mutation::CreateTeam(NewTeam {
            name: "Eagles".into(),
            short_code: "U12".into(),
            active: true,
            note: None,
        })]
    );
    assert!(h.state().await.is_none());
    assert_eq!(h.last_text(), "Команда создана.");
}

#[tokio::test]
async fn blank_team_name_is_rejected() {
    let h = Harness::new();
    h.start(CREATE_TEAM, WizardData::new()).await;

    h.answer(&["   "]).await;

    assert_eq!(h.last_text(), "Название не может быть пустым. Повторите ввод.");
    assert_eq!(h.state().await.map(|s| s.step), Some(0));
}

#[tokio::test]
async fn team_activity_must_be_yes_or_no() {
    let h = Harness::new();
    h.start(CREATE_TEAM, WizardData::new()).await;

    h.answer(&["Eagles", "U12", "может"]).await;

    assert_eq!(h.last_text(), "Введите 'да' или 'нет'.");
}

#[tokio::test]
async fn edit_team_changes_only_answered_fields() {
    let h = Harness::new();
    let id = h.club.seed_team(new_team("Eagles", "U12"));
    h.start(EDIT_TEAM, edit_team_seed(&h.club.team(id).unwrap())).await;

    let screen = h.answer(&["-", "U13", "нет", "-"]).await;

    assert_eq!(screen, Some(ScreenRequest::Team { id }));
    let patch = TeamPatch {
        short_code: Some("U13".into()),
        active: Some(false),
        ..TeamPatch::default()
    };
    assert_eq!(h.club.mutations(), vec![Mutation::UpdateTeam(id, patch)]);
    assert_eq!(h.last_text(), "Команда обновлена.");
}

#[tokio::test]
async fn edit_team_reads_legacy_answers() {
    let h = Harness::new();
    let id = h.club.seed_team(new_team("Eagles", "U12"));
    let mut seed = edit_team_seed(&h.club.team(id).unwrap());
    seed.set("name_new", "Hawks");
    seed.set("note_action", "delete");
    let state = WizardState {
        flow: EDIT_TEAM.into(),
        step: 3,
        data: seed,
    };

    h.runner.reply(ADMIN, CHAT, &state, "-").await.unwrap();

    let patch = TeamPatch {
        name: Some("Hawks".into()),
        note: Patch::Cleared,
        ..TeamPatch::default()
    };
    assert_eq!(h.club.mutations(), vec![Mutation::UpdateTeam(id, patch)]);
}

#[tokio::test]
async fn create_player_parses_birth_date() {
    let h = Harness::new();
    h.start(CREATE_PLAYER, WizardData::new()).await;

    h.answer(&["Ivan Petrov", "2012-13-40"]).await;
    assert_eq!(h.last_text(), "Неверный формат даты. Используйте YYYY-MM-DD.");

    let screen = h.answer(&["2012-05-04", "вратарь", "-"]).await;

    assert_eq!(screen, Some(ScreenRequest::Players { page: 1 }));
    let mut expected = new_player("Ivan Petrov");
    expected.birth_date = chrono::NaiveDate::from_ymd_opt(2012, 5, 4);
    expected.position = Some("вратарь".into());
    assert_eq!(h.club.mutations(), vec![Mutation::CreatePlayer(expected)]);
}

#[tokio::test]
async fn edit_player_returns_to_the_page_it_came_from() {
    let h = Harness::new();
    let mut player = new_player("Ivan Petrov");
    player.position = Some("вратарь".into());
    let id = h.club.seed_player(player);
    h.start(EDIT_PLAYER, edit_player_seed(&h.club.player(id).unwrap(), 3))
        .await;

    h.answer(&["-", "удалить", "удалить"]).await;
    assert_eq!(
        h.last_text(),
        "Игрок сейчас активен.\nВведите 'да'/'нет' чтобы изменить активность или '-' чтобы оставить."
    );
    let screen = h.answer(&["-", "-"]).await;

    assert_eq!(screen, Some(ScreenRequest::Player { id, page: 3 }));
    let patch = PlayerPatch {
        birth_date: Patch::Cleared,
        position: Patch::Cleared,
        ..PlayerPatch::default()
    };
    assert_eq!(h.club.mutations(), vec![Mutation::UpdatePlayer(id, patch)]);
}

#[tokio::test]
async fn failed_player_edit_asks_the_last_question_again() {
    let h = Harness::new();
    let id = h.club.seed_player(new_player("Ivan Petrov"));
    h.start(EDIT_PLAYER, edit_player_seed(&h.club.player(id).unwrap(), 1))
        .await;
    h.answer(&["Ivan Sidorov", "-", "-", "-"]).await;
    h.club.set_failing(true);

    h.answer(&["-"]).await;

    let texts = h.chat.texts();
    let n = texts.len();
    assert!(texts[n - 2].starts_with("Не удалось обновить игрока: "));
    assert!(texts[n - 1].starts_with("Текущее примечание: (пусто)\n"));
    assert_eq!(h.state().await.map(|s| s.step), Some(4));
}
