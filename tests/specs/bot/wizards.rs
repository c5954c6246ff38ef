//! Multi-step forms driven by free-text replies

use crate::prelude::*;
use cb_core::{NewTournament, Patch, TeamPatch, TournamentPatch, TournamentStatus};

#[tokio::test]
async fn create_team() {
    let bot = Bot::start();

    bot.press("teams_start_create").await;
    for reply in ["Eagles", "U12", "да", "-"] {
        bot.say(reply).await;
    }

    assert_eq!(bot.club.mutations(), vec![Mutation::CreateTeam(new_team("Eagles", "U12"))]);
    assert_eq!(bot.stored(ADMIN).await.flow, None);
    assert!(bot.sessions.row(ADMIN).is_none());
}

#[tokio::test]
async fn invalid_answer_repeats_the_step() {
    let bot = Bot::start();
    bot.press("teams_start_create").await;
    bot.say("Eagles").await;
    bot.say("U12").await;
    let before = bot.stored(ADMIN).await.wizard.unwrap();

    bot.say("может быть").await;

    assert_eq!(bot.last_text(), "Введите 'да' или 'нет'.");
    assert_eq!(bot.stored(ADMIN).await.wizard.unwrap(), before);
    assert_eq!(before.step, 2);

    bot.say("нет").await;
    assert_eq!(bot.stored(ADMIN).await.wizard.unwrap().step, 3);
}

#[tokio::test]
async fn edit_tournament_clears_only_the_note() {
    let bot = Bot::start();
    let id = bot.club.seed_tournament(NewTournament {
        note: Some("old".into()),
        ..new_tournament("Кубок")
    });

    bot.press(&format!("tournament_edit|id={id}")).await;
    for reply in ["-", "-", "-", "-", "-", "удалить"] {
        bot.say(reply).await;
    }

    let patch = TournamentPatch {
        note: Patch::Cleared,
        ..TournamentPatch::default()
    };
    assert_eq!(bot.club.mutations(), vec![Mutation::UpdateTournament(id, patch)]);
    let stored = bot.club.tournament(id).unwrap();
    assert_eq!(stored.note, None);
    assert_eq!(stored.status, TournamentStatus::Planned);
    assert!(bot.sessions.row(ADMIN).is_none());
}

#[tokio::test]
async fn finished_wizard_ignores_further_text() {
    let bot = Bot::start();
    bot.press("teams_start_create").await;
    for reply in ["Eagles", "U12", "да", "-"] {
        bot.say(reply).await;
    }
    let shown = bot.texts().len();

    bot.say("Falcons").await;

    assert_eq!(bot.texts().len(), shown);
    assert_eq!(bot.club.mutations().len(), 1);
}

#[tokio::test]
async fn a_command_abandons_navigation_but_not_the_form() {
    let bot = Bot::start();
    bot.press("teams_start_create").await;
    bot.say("Eagles").await;

    bot.say("/teams").await;
    bot.say("U12").await;

    let wizard = bot.stored(ADMIN).await.wizard.unwrap();
    assert_eq!(wizard.step, 2);
    assert_eq!(wizard.data.get("short_code"), Some("U12"));
}

#[tokio::test]
async fn a_command_with_history_still_keeps_the_form() {
    let bot = Bot::start();
    let team = bot.club.seed_team(new_team("Eagles", "U12"));
    bot.press(&format!("team_open|id={team}")).await;
    bot.press(&format!("team_edit|id={team}")).await;
    assert_eq!(bot.nav(ADMIN).len(), 1);

    bot.say("/teams").await;
    assert!(bot.nav(ADMIN).is_empty());
    bot.say("Falcons").await;

    let stored = bot.stored(ADMIN).await;
    assert_eq!(stored.flow.as_deref(), Some("edit_team"));
    assert_eq!(stored.wizard.unwrap().step, 1);
    assert!(stored.nav.is_empty());

    for reply in ["-", "-", "-"] {
        bot.say(reply).await;
    }
    let patch = TeamPatch {
        name: Some("Falcons".into()),
        ..TeamPatch::default()
    };
    assert_eq!(bot.club.mutations(), vec![Mutation::UpdateTeam(team, patch)]);
}

#[tokio::test]
async fn form_survives_a_restart() {
    let bot = Bot::start();
    bot.press("teams_start_create").await;
    bot.say("Eagles").await;

    let after = bot.restarted();
    for reply in ["U12", "да", "-"] {
        after.say(reply).await;
    }

    assert_eq!(after.club.mutations(), vec![Mutation::CreateTeam(new_team("Eagles", "U12"))]);
}
