// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn fake_chat_records_calls() {
    let chat = FakeChatAdapter::new();
    let kb = Keyboard::new().button("Назад", "nav_back");

    let first = chat.send(7, "Турниры", Some(&kb)).await.unwrap();
    let second = chat.send(7, "Команды", None).await.unwrap();
    chat.edit(first, "Турнир", None).await.unwrap();
    chat.answer_callback("cb-1", None).await.unwrap();

    assert_eq!(first.message_id, 1);
    assert_eq!(second.message_id, 2);
    assert_eq!(chat.texts(), vec!["Турниры", "Команды", "Турнир"]);
    assert_eq!(chat.calls()[0].keyboard(), Some(&kb));
    assert_eq!(
        chat.calls()[3],
        ChatCall::AnswerCallback {
            callback_id: "cb-1".into(),
            text: None
        }
    );
}

#[tokio::test]
async fn last_render_skips_callback_answers() {
    let chat = FakeChatAdapter::new();
    chat.send(7, "one", None).await.unwrap();
    chat.answer_callback("cb", Some("toast")).await.unwrap();
    assert_eq!(chat.last_render().and_then(|c| c.text().map(str::to_string)), Some("one".into()));
}

#[tokio::test]
async fn failing_sends_are_not_recorded() {
    let chat = FakeChatAdapter::new();
    chat.set_fail_sends(true);
    assert!(chat.send(7, "lost", None).await.is_err());
    assert!(chat.calls().is_empty());
}
