// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::chat::{ChatCall, FakeChatAdapter};
use serial_test::{parallel, serial};
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

/// A writer that captures log output for testing
#[derive(Clone, Default)]
struct CapturedLogs {
    logs: Arc<Mutex<Vec<u8>>>,
}

impl CapturedLogs {
    fn new() -> Self {
        Self::default()
    }

    fn contents(&self) -> String {
        let logs = self.logs.lock().unwrap();
        String::from_utf8_lossy(&logs).to_string()
    }
}

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.logs.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run a test with captured tracing output
fn with_tracing<F, Fut>(f: F) -> (String, Fut::Output)
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future,
{
    let logs = CapturedLogs::new();
    let logs_clone = logs.clone();

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_writer(logs_clone)
        .with_ansi(false)
        .without_time()
        .finish();

    let result = tracing::subscriber::with_default(subscriber, || {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
            .block_on(f())
    });

    (logs.contents(), result)
}

/// Assert that captured logs contain the expected substring
fn assert_log(logs: &str, label: &str, expected: &str) {
    assert!(logs.contains(expected), "Should log {label}. Logs:\n{logs}",);
}

// =============================================================================
// Tracing output verification tests
// =============================================================================

#[test]
#[serial(tracing)]
fn traced_send_logs_entry_and_completion() {
    let (logs, result) = with_tracing(|| async {
        let traced = TracedChat::new(FakeChatAdapter::new());
        let kb = Keyboard::new().button("Назад", "nav_back");
        traced.send(42, "Турниры", Some(&kb)).await
    });

    assert!(result.is_ok(), "send should succeed: {:?}", result);
    assert_log(&logs, "span name", "chat.send");
    assert_log(&logs, "chat id", "chat_id=42");
    assert_log(&logs, "entry message", "sending");
    assert_log(&logs, "button count", "buttons=1");
    assert_log(&logs, "completion", "sent");
    assert_log(&logs, "timing", "elapsed_ms");
}

#[test]
#[serial(tracing)]
fn traced_send_logs_error_on_failure() {
    let (logs, result) = with_tracing(|| async {
        let fake = FakeChatAdapter::new();
        fake.set_fail_sends(true);
        TracedChat::new(fake).send(42, "lost", None).await
    });

    assert!(result.is_err());
    assert_log(&logs, "send failure", "send failed");
}

#[test]
#[serial(tracing)]
fn traced_edit_logs_operation() {
    let (logs, _) = with_tracing(|| async {
        let traced = TracedChat::new(FakeChatAdapter::new());
        let message = MessageRef {
            chat_id: 42,
            message_id: 9,
        };
        traced.edit(message, "Турнир", None).await
    });

    assert_log(&logs, "edit span", "chat.edit");
    assert_log(&logs, "message id", "message_id=9");
    assert_log(&logs, "edit completion", "edited");
}

#[test]
#[serial(tracing)]
fn traced_edit_logs_error_on_failure() {
    let (logs, result) = with_tracing(|| async {
        let fake = FakeChatAdapter::new();
        fake.set_fail_sends(true);
        let message = MessageRef {
            chat_id: 42,
            message_id: 9,
        };
        TracedChat::new(fake).edit(message, "x", None).await
    });

    assert!(result.is_err());
    assert_log(&logs, "edit failure", "edit failed");
}

// =============================================================================
// Delegation tests - verify traced wrapper delegates to inner adapter
// =============================================================================

#[tokio::test]
#[parallel(tracing)]
async fn traced_chat_delegates_to_inner() {
    let fake = FakeChatAdapter::new();
    let traced = TracedChat::new(fake.clone());

    let sent = traced.send(42, "hello", None).await.unwrap();
    traced.edit(sent, "hello again", None).await.unwrap();
    traced.answer_callback("cb-7", Some("ok")).await.unwrap();

    let calls = fake.calls();
    assert_eq!(calls.len(), 3);
    match &calls[1] {
        ChatCall::Edit { message, text, .. } => {
            assert_eq!(*message, sent);
            assert_eq!(text, "hello again");
        }
        other => panic!("Expected Edit call, got {:?}", other),
    }
    assert_eq!(
        calls[2],
        ChatCall::AnswerCallback {
            callback_id: "cb-7".into(),
            text: Some("ok".into()),
        }
    );
}
