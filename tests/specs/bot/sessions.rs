//! What the session row holds between messages

use crate::prelude::*;
use cb_core::{NavEntry, WizardData, WizardState};
use cb_storage::SessionStore;

#[tokio::test]
async fn saved_session_loads_back_unchanged() {
    let bot = Bot::start();
    let store = SessionStore::new(bot.sessions.clone());
    let mut data = WizardData::new();
    data.set("name", "Eagles");
    data.clear_field("note");
    let wizard = WizardState {
        flow: "edit_team".into(),
        step: 3,
        data,
    };
    let nav = vec![
        NavEntry::new("teams_menu"),
        NavEntry::new("players_menu").with("page", 2),
    ];

    store.save(ADMIN, Some("edit_team"), Some(&wizard), &nav).await.unwrap();
    let loaded = store.load(ADMIN).await.unwrap();

    assert_eq!(loaded.flow.as_deref(), Some("edit_team"));
    assert_eq!(loaded.wizard, Some(wizard));
    assert_eq!(loaded.nav, nav);
}

#[tokio::test]
async fn form_started_before_the_envelope_format_still_finishes() {
    let bot = Bot::start();
    bot.sessions.insert_raw(
        ADMIN,
        Some("create_team"),
        Some(br#"{"flow":"create_team","step":1,"data":{"name":"Eagles"}}"#.as_slice()),
    );

    for reply in ["U12", "да", "-"] {
        bot.say(reply).await;
    }

    assert_eq!(bot.club.mutations(), vec![Mutation::CreateTeam(new_team("Eagles", "U12"))]);
}

#[tokio::test]
async fn unreadable_session_is_reported_not_ignored() {
    let bot = Bot::start();
    bot.sessions.insert_raw(ADMIN, Some("create_team"), Some(b"[1, 2, 3]".as_slice()));

    bot.say("Eagles").await;

    assert!(bot.last_text().starts_with("Ошибка: "));
    assert!(bot.club.mutations().is_empty());
}

#[tokio::test]
async fn navigation_only_row_has_no_flow() {
    let bot = Bot::start();
    let team = bot.club.seed_team(new_team("Eagles", "U12"));

    bot.press(&format!("team_open|id={team}")).await;

    let row = bot.sessions.row(ADMIN).unwrap();
    assert_eq!(row.current_flow, None);
    let stored = bot.stored(ADMIN).await;
    assert_eq!(stored.wizard, None);
    assert_eq!(stored.nav, vec![NavEntry::new("teams_menu")]);
}

#[tokio::test]
async fn navigating_keeps_a_form_in_progress_saved_with_history() {
    let bot = Bot::start();
    let team = bot.club.seed_team(new_team("Eagles", "U12"));
    bot.press(&format!("team_open|id={team}")).await;

    bot.press(&format!("team_edit|id={team}")).await;

    let stored = bot.stored(ADMIN).await;
    assert_eq!(stored.flow.as_deref(), Some("edit_team"));
    assert_eq!(stored.nav, vec![NavEntry::new("teams_menu")]);
}
