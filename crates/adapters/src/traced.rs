// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::chat::{ChatAdapter, ChatError, Keyboard, MessageRef};
use async_trait::async_trait;
use tracing::Instrument;

/// Wrapper that adds tracing to any ChatAdapter
#[derive(Clone)]
pub struct TracedChat<C> {
    inner: C,
}

impl<C> TracedChat<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }
}

#[async_trait]
impl<C: ChatAdapter> ChatAdapter for TracedChat<C> {
    async fn send(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> Result<MessageRef, ChatError> {
        async {
            tracing::debug!(
                text_len = text.len(),
                buttons = keyboard.map(|k| k.buttons().count()).unwrap_or(0),
                "sending"
            );
            let start = std::time::Instant::now();
            let result = self.inner.send(chat_id, text, keyboard).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;
            match &result {
                Ok(m) => tracing::debug!(message_id = m.message_id, elapsed_ms, "sent"),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "send failed"),
            }
            result
        }
        .instrument(tracing::info_span!("chat.send", chat_id))
        .await
    }

    async fn edit(
        &self,
        message: MessageRef,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> Result<(), ChatError> {
        let result = self.inner.edit(message, text, keyboard).await;
        tracing::info_span!(
            "chat.edit",
            chat_id = message.chat_id,
            message_id = message.message_id
        )
        .in_scope(|| match &result {
            Ok(()) => tracing::debug!(text_len = text.len(), "edited"),
            Err(e) => tracing::error!(error = %e, "edit failed"),
        });
        result
    }

    async fn answer_callback(
        &self,
        callback_id: &str,
        text: Option<&str>,
    ) -> Result<(), ChatError> {
        let result = self.inner.answer_callback(callback_id, text).await;
        if let Err(ref e) = result {
            // Expired queries are common after restarts
            tracing::warn!(callback_id, error = %e, "answer_callback failed");
        }
        result
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
