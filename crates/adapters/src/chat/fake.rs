// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake chat adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{ChatAdapter, ChatError, Keyboard, MessageRef};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;

/// Recorded chat call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCall {
    Send {
        chat_id: i64,
        text: String,
        keyboard: Option<Keyboard>,
    },
    Edit {
        message: MessageRef,
        text: String,
        keyboard: Option<Keyboard>,
    },
    AnswerCallback {
        callback_id: String,
        text: Option<String>,
    },
}

impl ChatCall {
    /// Text of a send or edit
    pub fn text(&self) -> Option<&str> {
        match self {
            ChatCall::Send { text, .. } | ChatCall::Edit { text, .. } => Some(text),
            ChatCall::AnswerCallback { text, .. } => text.as_deref(),
        }
    }

    pub fn keyboard(&self) -> Option<&Keyboard> {
        match self {
            ChatCall::Send { keyboard, .. } | ChatCall::Edit { keyboard, .. } => keyboard.as_ref(),
            ChatCall::AnswerCallback { .. } => None,
        }
    }
}

struct FakeChatState {
    calls: Vec<ChatCall>,
    next_message_id: i32,
    fail_sends: bool,
}

/// Fake chat adapter for testing
#[derive(Clone)]
pub struct FakeChatAdapter {
    inner: Arc<Mutex<FakeChatState>>,
}

impl Default for FakeChatAdapter {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeChatState {
                calls: Vec::new(),
                next_message_id: 1,
                fail_sends: false,
            })),
        }
    }
}

impl FakeChatAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<ChatCall> {
        self.inner.lock().calls.clone()
    }

    /// Texts of every send and edit, in order
    pub fn texts(&self) -> Vec<String> {
        self.inner
            .lock()
            .calls
            .iter()
            .filter(|c| !matches!(c, ChatCall::AnswerCallback { .. }))
            .filter_map(|c| c.text().map(str::to_string))
            .collect()
    }

    /// The most recent send or edit
    pub fn last_render(&self) -> Option<ChatCall> {
        self.inner
            .lock()
            .calls
            .iter()
            .rev()
            .find(|c| !matches!(c, ChatCall::AnswerCallback { .. }))
            .cloned()
    }

    pub fn clear(&self) {
        self.inner.lock().calls.clear();
    }

    /// Make sends and edits fail until reset
    pub fn set_fail_sends(&self, fail: bool) {
        self.inner.lock().fail_sends = fail;
    }
}

#[async_trait]
impl ChatAdapter for FakeChatAdapter {
    async fn send(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> Result<MessageRef, ChatError> {
        let mut state = self.inner.lock();
        if state.fail_sends {
            return Err(ChatError::SendFailed("injected failure".into()));
        }
        state.calls.push(ChatCall::Send {
            chat_id,
            text: text.to_string(),
            keyboard: keyboard.cloned(),
        });
        let message_id = state.next_message_id;
        state.next_message_id += 1;
        Ok(MessageRef {
            chat_id,
            message_id,
        })
    }

    async fn edit(
        &self,
        message: MessageRef,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> Result<(), ChatError> {
        let mut state = self.inner.lock();
        if state.fail_sends {
            return Err(ChatError::EditFailed("injected failure".into()));
        }
        state.calls.push(ChatCall::Edit {
            message,
            text: text.to_string(),
            keyboard: keyboard.cloned(),
        });
        Ok(())
    }

    async fn answer_callback(
        &self,
        callback_id: &str,
        text: Option<&str>,
    ) -> Result<(), ChatError> {
        self.inner.lock().calls.push(ChatCall::AnswerCallback {
            callback_id: callback_id.to_string(),
            text: text.map(str::to_string),
        });
        Ok(())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
