// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Chat transport adapters

mod keyboard;
mod telegram;

pub use keyboard::{Button, Keyboard};
pub use telegram::TelegramAdapter;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{ChatCall, FakeChatAdapter};

use async_trait::async_trait;
use cb_core::AdminId;
use thiserror::Error;

/// Errors from chat operations
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("send failed: {0}")]
    SendFailed(String),
    #[error("edit failed: {0}")]
    EditFailed(String),
    #[error("callback answer failed: {0}")]
    AnswerFailed(String),
}

/// A message previously delivered to a chat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageRef {
    pub chat_id: i64,
    pub message_id: i32,
}

/// An event received from the chat platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    /// Plain message; commands arrive here too with a leading `/`
    Text {
        sender: AdminId,
        chat_id: i64,
        text: String,
    },
    /// Inline button press
    Callback {
        sender: AdminId,
        callback_id: String,
        /// The message carrying the pressed keyboard, when the platform
        /// still has it
        message: Option<MessageRef>,
        data: String,
    },
}

impl Inbound {
    pub fn sender(&self) -> AdminId {
        match self {
            Inbound::Text { sender, .. } | Inbound::Callback { sender, .. } => *sender,
        }
    }
}

/// Render sink for outbound messages.
///
/// Text is Markdown; callers escape user-provided content.
#[async_trait]
pub trait ChatAdapter: Clone + Send + Sync + 'static {
    async fn send(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> Result<MessageRef, ChatError>;

    /// Replace the text and keyboard of an existing message
    async fn edit(
        &self,
        message: MessageRef,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> Result<(), ChatError>;

    /// Stop the client's spinner, optionally with a toast
    async fn answer_callback(&self, callback_id: &str, text: Option<&str>)
        -> Result<(), ChatError>;
}
