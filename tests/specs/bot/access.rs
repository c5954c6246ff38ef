//! Only listed admins are served

use crate::prelude::*;

#[tokio::test]
async fn stranger_gets_a_notice_and_nothing_is_stored() {
    let bot = Bot::start();

    bot.say_as(STRANGER, "/teams").await;
    bot.press_as(STRANGER, "teams_start_create").await;

    assert_eq!(
        bot.texts(),
        vec!["У вас нет прав. Обратитесь к директору клуба.".to_string()]
    );
    assert_eq!(bot.toast().as_deref(), Some("Недостаточно прав"));
    assert!(bot.sessions.calls().is_empty());
    assert!(bot.nav(STRANGER).is_empty());
}

#[tokio::test]
async fn every_button_press_is_answered() {
    let bot = Bot::start();

    for data in ["teams_menu", "not|a|button", "stats_export"] {
        let before = bot.chat.calls().len();
        bot.press(data).await;
        let answered = bot.chat.calls()[before..]
            .iter()
            .filter(|c| matches!(c, cb_adapters::ChatCall::AnswerCallback { .. }))
            .count();
        assert_eq!(answered, 1, "{data}");
    }
}
