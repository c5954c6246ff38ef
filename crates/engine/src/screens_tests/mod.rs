// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Screen rendering tests

use super::*;
use cb_adapters::{ChatCall, FakeChatAdapter};
use cb_core::test_support::{new_match, new_player, new_team, new_tournament, utc};
use cb_core::{FakeClock, LineupRole, MatchStatus, NewTournament, RosterKey};
use cb_storage::MemoryClubRepo;
use std::sync::Arc;

const CHAT: i64 = 900;

struct Harness {
    screens: Screens<FakeChatAdapter, FakeClock>,
    repo: MemoryClubRepo,
    chat: FakeChatAdapter,
}

impl Harness {
    fn new() -> Self {
        let repo = MemoryClubRepo::new();
        let chat = FakeChatAdapter::new();
        let clock = FakeClock::at(utc(2024, 3, 1, 12, 0));
        let screens = Screens::new(
            Club::new(Arc::new(repo.clone())),
            chat.clone(),
            clock,
            chrono_tz::Europe::Moscow,
        );
        Self {
            screens,
            repo,
            chat,
        }
    }

    async fn view(&self, req: ScreenRequest) -> View {
        match self.screens.build(req).await.unwrap() {
            Page::Show(view) => view,
            other => panic!("expected a view, got {other:?}"),
        }
    }
}

fn labels(view: &View) -> Vec<Vec<String>> {
    view.keyboard
        .as_ref()
        .map(|k| {
            k.rows()
                .iter()
                .map(|row| row.iter().map(|b| b.label.clone()).collect())
                .collect()
        })
        .unwrap_or_default()
}

fn payload_of(view: &View, label: &str) -> String {
    view.keyboard
        .as_ref()
        .and_then(|k| k.find(label))
        .map(|b| b.payload.clone())
        .unwrap_or_else(|| panic!("no button {label:?}"))
}

#[tokio::test]
async fn empty_tournament_list_offers_creation() {
    let h = Harness::new();

    let view = h.view(ScreenRequest::Tournaments { page: 1 }).await;

    assert_eq!(view.text, "*Турниры*\nНет турниров. Нажмите кнопку, чтобы создать.\n");
    assert_eq!(labels(&view), vec![vec!["➕ Создать турнир".to_string()]]);
}

#[tokio::test]
async fn tournament_list_paginates_past_twenty() {
    let h = Harness::new();
    for i in 0..21 {
        h.repo.seed_tournament(new_tournament(&format!("Cup {i:02}")));
    }

    let first = h.view(ScreenRequest::Tournaments { page: 1 }).await;
    let second = h.view(ScreenRequest::Tournaments { page: 2 }).await;
    let beyond = h.view(ScreenRequest::Tournaments { page: 9 }).await;

    assert_eq!(payload_of(&first, "Вперёд ➡"), "tournaments_page|page=2");
    assert!(first.keyboard.as_ref().unwrap().find("⬅ Назад").is_none());
    assert_eq!(second.text, "*Турниры*\n- Cup 20 (planned)\n");
    assert_eq!(payload_of(&second, "⬅ Назад"), "tournaments_page|page=1");
    assert_eq!(beyond, first);
}

#[tokio::test]
async fn tournament_card_lists_teams_and_upcoming_fixtures() {
    let h = Harness::new();
    let tournament = h.repo.seed_tournament(NewTournament {
        kind: Some("league".into()),
        start_date: chrono::NaiveDate::from_ymd_opt(2024, 3, 1),
        note: Some("spring_cup".into()),
        ..new_tournament("Spring Cup")
    });
    let team = h.repo.seed_team(new_team("Eagles", "U12"));
    let player = h.repo.seed_player(new_player("Ivan"));
    h.repo.seed_roster(RosterKey::new(tournament, team, player), None);
    h.repo.seed_match(new_match(tournament, team, "Falcons", utc(2024, 3, 2, 15, 0)));
    // Kicked off two hours ago: no longer upcoming.
    h.repo.seed_match(new_match(tournament, team, "Hawks", utc(2024, 3, 1, 10, 0)));

    let view = h.view(ScreenRequest::Tournament { id: tournament }).await;

    assert_eq!(
        view.text,
        "*Spring Cup*\n_league_\nСтатус: planned\nСтарт: 01.03.2024\nЗаметка: spring\\_cup\n\
         \n*Команды в турнире:*\n- Eagles\n\
         \n*Ближайшие матчи:*\n- 02.03 18:00 • Eagles vs Falcons (План)\n"
    );
    assert_eq!(
        labels(&view),
        vec![
            vec!["✏ Редактировать".to_string()],
            vec!["👥 Заявки".to_string(), "🏟 Матчи".to_string()],
            vec!["⬅ Назад".to_string()],
        ]
    );
}

#[tokio::test]
async fn tournament_card_edits_the_pressed_message() {
    let h = Harness::new();
    let id = h.repo.seed_tournament(new_tournament("Spring Cup"));
    let pressed = MessageRef {
        chat_id: CHAT,
        message_id: 55,
    };

    h.screens
        .render(CHAT, Some(pressed), ScreenRequest::Tournament { id })
        .await
        .unwrap();

    assert!(matches!(
        h.chat.last_render(),
        Some(ChatCall::Edit { message, .. }) if message == pressed
    ));
}

#[tokio::test]
async fn list_screens_always_send_new_messages() {
    let h = Harness::new();
    let pressed = MessageRef {
        chat_id: CHAT,
        message_id: 55,
    };

    h.screens
        .render(CHAT, Some(pressed), ScreenRequest::Teams)
        .await
        .unwrap();

    assert!(matches!(h.chat.last_render(), Some(ChatCall::Send { .. })));
}

#[tokio::test]
async fn team_card_shows_participation() {
    let h = Harness::new();
    let tournament = h.repo.seed_tournament(new_tournament("Spring Cup"));
    let team = h.repo.seed_team(new_team("Eagles", "U12"));
    for name in ["Ivan", "Oleg"] {
        let player = h.repo.seed_player(new_player(name));
        h.repo.seed_roster(RosterKey::new(tournament, team, player), None);
    }

    let view = h.view(ScreenRequest::Team { id: team }).await;

    assert_eq!(
        view.text,
        "*Eagles*\nКод: `U12`\nСтатус: Активна\n\n*Участие в турнирах:*\n- Spring Cup (2 игроков)\n"
    );
    assert_eq!(payload_of(&view, "✏ Редактировать"), format!("team_edit|id={team}"));
}

#[tokio::test]
async fn players_page_puts_pager_first() {
    let h = Harness::new();
    for i in 0..25 {
        h.repo.seed_player(new_player(&format!("Player {i:02}")));
    }

    let view = h.view(ScreenRequest::Players { page: 1 }).await;

    let rows = labels(&view);
    assert_eq!(rows[0], vec!["Вперёд ➡".to_string()]);
    assert_eq!(rows[1], vec!["➕ Создать игрока".to_string()]);
    assert_eq!(rows[2], vec!["Открыть Player 00".to_string()]);
    assert_eq!(rows.len(), 22);
    assert!(view.text.starts_with("*Игроки — страница 1*\n- Player 00\n"));
}

#[tokio::test]
async fn roster_teams_offer_unentered_teams_in_name_order() {
    let h = Harness::new();
    let tournament = h.repo.seed_tournament(new_tournament("Spring Cup"));
    let entered = h.repo.seed_team(new_team("Eagles", "U12"));
    let player = h.repo.seed_player(new_player("Ivan"));
    h.repo.seed_roster(RosterKey::new(tournament, entered, player), None);
    h.repo.seed_team(new_team("bravo", "B"));
    h.repo.seed_team(new_team("Alpha", "A"));

    let view = h.view(ScreenRequest::RosterTeams { tournament }).await;

    assert_eq!(
        view.text,
        "*Заявка — выберите команду*\n\n*Команды без заявки:*\n- Alpha\n- bravo\n\
         Нажмите, чтобы начать заполнять заявку.\n"
    );
    assert_eq!(
        labels(&view),
        vec![
            vec!["Eagles (`U12`)".to_string()],
            vec!["➕ Alpha (`A`)".to_string()],
            vec!["➕ bravo (`B`)".to_string()],
            vec!["⬅ Назад".to_string()],
        ]
    );
    assert_eq!(payload_of(&view, "⬅ Назад"), "tournament_rosters");
}

#[tokio::test]
async fn roster_add_ticks_rostered_players() {
    let h = Harness::new();
    let tournament = h.repo.seed_tournament(new_tournament("Spring Cup"));
    let team = h.repo.seed_team(new_team("Eagles", "U12"));
    let ivan = h.repo.seed_player(new_player("Ivan"));
    h.repo.seed_player(new_player("Oleg"));
    h.repo.seed_roster(RosterKey::new(tournament, team, ivan), Some(7));

    let view = h
        .view(ScreenRequest::RosterAddPlayers {
            tournament,
            team,
            page: 1,
        })
        .await;

    assert_eq!(view.text, "*Выберите игрока*\n✅ Ivan\n- Oleg\n");
    assert_eq!(
        labels(&view),
        vec![vec!["➕ Oleg".to_string()], vec!["⬅ К заявке".to_string()]]
    );
}

#[tokio::test]
async fn match_card_marks_current_status() {
    let h = Harness::new();
    let tournament = h.repo.seed_tournament(new_tournament("Spring Cup"));
    let team = h.repo.seed_team(new_team("Eagles", "U12"));
    let game = h
        .repo
        .seed_match(new_match(tournament, team, "Falcons", utc(2024, 3, 2, 15, 0)));

    let view = h.view(ScreenRequest::Match { id: game }).await;

    assert_eq!(
        view.text,
        "*Матч*\n02.03.2024 18:00 vs Falcons\nСтатус: scheduled\n\n*Состав*\nПока пусто.\n\n*События*\nПока нет событий.\n"
    );
    assert_eq!(
        labels(&view)[1],
        vec!["✅ План".to_string(), "⚪ Сыгран".to_string(), "⚪ Отменён".to_string()]
    );
    assert_eq!(
        payload_of(&view, "⚪ Отменён"),
        format!("match_status_set|id={game}|status={}", MatchStatus::Canceled)
    );
}

#[tokio::test]
async fn full_lineup_redirects_to_lineup_menu() {
    let h = Harness::new();
    let tournament = h.repo.seed_tournament(new_tournament("Spring Cup"));
    let team = h.repo.seed_team(new_team("Eagles", "U12"));
    let player = h.repo.seed_player(new_player("Ivan"));
    h.repo.seed_roster(RosterKey::new(tournament, team, player), Some(9));
    let game = h
        .repo
        .seed_match(new_match(tournament, team, "Falcons", utc(2024, 3, 2, 15, 0)));
    h.repo.seed_lineup(game, player, LineupRole::Start);

    h.screens
        .render(CHAT, None, ScreenRequest::LineupAdd { game, page: 1 })
        .await
        .unwrap();

    assert_eq!(
        h.chat.texts(),
        vec![
            "Все игроки заявки уже в составе.".to_string(),
            "*Состав матча*\n- Ivan #9 (start)\n".to_string(),
        ]
    );
}

#[tokio::test]
async fn goal_picker_needs_a_lineup() {
    let h = Harness::new();
    let tournament = h.repo.seed_tournament(new_tournament("Spring Cup"));
    let team = h.repo.seed_team(new_team("Eagles", "U12"));
    let game = h
        .repo
        .seed_match(new_match(tournament, team, "Falcons", utc(2024, 3, 2, 15, 0)));

    h.screens
        .render(CHAT, None, ScreenRequest::GoalScorer { game })
        .await
        .unwrap();

    assert_eq!(
        h.chat.texts(),
        vec!["Добавьте игроков в состав перед фиксацией событий.".to_string()]
    );
}

#[tokio::test]
async fn card_kind_offers_both_colours() {
    let h = Harness::new();
    let game = cb_core::MatchId::new(4);
    let player = cb_core::PlayerId::new(9);

    let view = h.view(ScreenRequest::CardKind { game, player }).await;

    assert_eq!(
        payload_of(&view, "🟥 Красная"),
        "match_events_card_type|match=4|player=9|type=red"
    );
}

#[test]
fn navigation_frames_map_to_screens() {
    let t = TournamentId::new(3);
    let cases = [
        (cb_core::test_support::page_entry("tournaments_page", 2), Some(ScreenRequest::Tournaments { page: 2 })),
        (NavEntry::new("teams_menu"), Some(ScreenRequest::Teams)),
        (NavEntry::new("players_menu"), Some(ScreenRequest::Players { page: 1 })),
        (
            NavEntry::new("games_open_team").with("t", 3).with("team", 5),
            Some(ScreenRequest::GamesMatches {
                tournament: t,
                team: TeamId::new(5),
            }),
        ),
        (
            NavEntry::new("roster_open_tournament").with("id", 3),
            Some(ScreenRequest::RosterTeams { tournament: t }),
        ),
        (NavEntry::new("games_open_tournament"), None),
        (NavEntry::new("open_match").with("id", 1), None),
    ];
    for (entry, expected) in cases {
        assert_eq!(ScreenRequest::from_nav(&entry), expected, "{entry:?}");
    }
}
