//! Screen history and the back button

use crate::prelude::*;
use cb_core::test_support::new_player;
use cb_core::NavEntry;

#[tokio::test]
async fn open_tournament_and_go_back() {
    let bot = Bot::start();
    let mut fifth = None;
    for n in 1..=5 {
        fifth = Some(bot.club.seed_tournament(new_tournament(&format!("Кубок {n}"))));
    }
    let fifth = fifth.unwrap();

    bot.say("/tournaments").await;
    assert!(bot.last_text().starts_with("*Турниры*"));

    bot.press(&format!("open_tournament|id={fifth}|page=1")).await;
    assert_eq!(bot.nav(ADMIN), vec![NavEntry::new("tournaments_page").with("page", 1)]);
    assert!(bot.last_text().starts_with("*Кубок 5*"));

    bot.press("nav_back").await;
    assert!(bot.nav(ADMIN).is_empty());
    assert!(bot.last_text().starts_with("*Турниры*"));
    assert!(bot.stored(ADMIN).await.nav.is_empty());
}

#[tokio::test]
async fn back_without_history_says_so() {
    let bot = Bot::start();
    bot.press("nav_back").await;
    assert_eq!(bot.last_text(), "История экранов пуста.");
}

#[tokio::test]
async fn history_outlives_a_restart() {
    let bot = Bot::start();
    let team = bot.club.seed_team(new_team("Eagles", "U12"));
    let tournament = bot.club.seed_tournament(new_tournament("Кубок"));
    bot.press(&format!("roster_open_team|t={tournament}|team={team}")).await;

    let after = bot.restarted();
    after.press("nav_back").await;

    assert!(after.last_text().starts_with("*Заявка — выберите команду*"));
    assert!(after.stored(ADMIN).await.nav.is_empty());
}

#[tokio::test]
async fn admins_keep_separate_histories() {
    let bot = Bot::start();
    let player = bot.club.seed_player(new_player("Иван Петров"));
    let tournament = bot.club.seed_tournament(new_tournament("Кубок"));

    let first = async {
        for page in 1..=3 {
            bot.press_as(ADMIN, &format!("player_open|id={player}|page={page}")).await;
        }
    };
    let second = async {
        for page in 1..=2 {
            bot.press_as(OTHER_ADMIN, &format!("open_tournament|id={tournament}|page={page}"))
                .await;
        }
    };
    tokio::join!(first, second);

    let pages = |action: &str, n: u32| -> Vec<NavEntry> {
        (1..=n).map(|p| NavEntry::new(action).with("page", p)).collect()
    };
    assert_eq!(bot.nav(ADMIN), pages("players_menu", 3));
    assert_eq!(bot.nav(OTHER_ADMIN), pages("tournaments_page", 2));
    assert_eq!(bot.stored(ADMIN).await.nav, pages("players_menu", 3));
    assert_eq!(bot.stored(OTHER_ADMIN).await.nav, pages("tournaments_page", 2));
}

#[tokio::test]
async fn reopening_the_same_screen_does_not_grow_history() {
    let bot = Bot::start();
    let team = bot.club.seed_team(new_team("Eagles", "U12"));

    for _ in 0..3 {
        bot.press(&format!("team_open|id={team}")).await;
    }

    assert_eq!(bot.nav(ADMIN), vec![NavEntry::new("teams_menu")]);
}

#[tokio::test]
async fn history_is_bounded() {
    let bot = Bot::start();
    let player = bot.club.seed_player(new_player("Иван Петров"));

    for page in 1..=15 {
        bot.press(&format!("player_open|id={player}|page={page}")).await;
    }

    let nav = bot.nav(ADMIN);
    assert_eq!(nav.len(), cb_engine::MAX_DEPTH);
    assert_eq!(nav.first(), Some(&NavEntry::new("players_menu").with("page", 6)));
    assert_eq!(nav.last(), Some(&NavEntry::new("players_menu").with("page", 15)));
}
