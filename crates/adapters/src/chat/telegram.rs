// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Telegram Bot API transport

use super::{ChatAdapter, ChatError, Inbound, Keyboard, MessageRef};
use async_trait::async_trait;
use cb_core::AdminId;
use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, MessageId, ParseMode, User};

/// Legacy Markdown, matching the escaping applied to user-provided text.
#[allow(deprecated)]
const PARSE_MODE: ParseMode = ParseMode::Markdown;

#[derive(Clone)]
pub struct TelegramAdapter {
    bot: Bot,
}

impl TelegramAdapter {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    pub fn bot(&self) -> &Bot {
        &self.bot
    }

    /// Convert an incoming message. Non-text messages and anonymous
    /// senders yield `None`.
    pub fn inbound_from_message(msg: &Message) -> Option<Inbound> {
        let sender = admin_id(msg.from()?)?;
        let text = msg.text()?;
        Some(Inbound::Text {
            sender,
            chat_id: msg.chat.id.0,
            text: text.to_string(),
        })
    }

    /// Convert a button press. Presses without callback data are dropped.
    pub fn inbound_from_callback(q: &CallbackQuery) -> Option<Inbound> {
        let sender = admin_id(&q.from)?;
        let data = q.data.clone()?;
        Some(Inbound::Callback {
            sender,
            callback_id: q.id.clone(),
            message: q.message.as_ref().map(|m| MessageRef {
                chat_id: m.chat.id.0,
                message_id: m.id.0,
            }),
            data,
        })
    }
}

fn admin_id(user: &User) -> Option<AdminId> {
    i64::try_from(user.id.0).ok().map(AdminId::new)
}

fn markup(keyboard: &Keyboard) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(keyboard.rows().iter().map(|row| {
        row.iter()
            .map(|b| InlineKeyboardButton::callback(b.label.clone(), b.payload.clone()))
            .collect::<Vec<_>>()
    }))
}

#[async_trait]
impl ChatAdapter for TelegramAdapter {
    async fn send(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> Result<MessageRef, ChatError> {
        let mut request = self
            .bot
            .send_message(ChatId(chat_id), text)
            .parse_mode(PARSE_MODE);
        if let Some(kb) = keyboard {
            request = request.reply_markup(markup(kb));
        }
        let sent = request
            .await
            .map_err(|e| ChatError::SendFailed(e.to_string()))?;
        Ok(MessageRef {
            chat_id: sent.chat.id.0,
            message_id: sent.id.0,
        })
    }

    async fn edit(
        &self,
        message: MessageRef,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> Result<(), ChatError> {
        let mut request = self
            .bot
            .edit_message_text(ChatId(message.chat_id), MessageId(message.message_id), text)
            .parse_mode(PARSE_MODE);
        if let Some(kb) = keyboard {
            request = request.reply_markup(markup(kb));
        }
        request
            .await
            .map_err(|e| ChatError::EditFailed(e.to_string()))?;
        Ok(())
    }

    async fn answer_callback(
        &self,
        callback_id: &str,
        text: Option<&str>,
    ) -> Result<(), ChatError> {
        let mut request = self.bot.answer_callback_query(callback_id);
        if let Some(text) = text {
            request = request.text(text);
        }
        request
            .await
            .map_err(|e| ChatError::AnswerFailed(e.to_string()))?;
        Ok(())
    }
}
