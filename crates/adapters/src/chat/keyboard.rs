// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Inline keyboards, independent of the transport

/// Telegram rejects callback data longer than this many bytes.
pub const MAX_PAYLOAD_LEN: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub payload: String,
}

impl Button {
    pub fn new(label: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            payload: payload.into(),
        }
    }
}

/// Rows of buttons, top to bottom
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keyboard {
    rows: Vec<Vec<Button>>,
}

impl Keyboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a row; empty rows are dropped.
    pub fn row(mut self, buttons: Vec<Button>) -> Self {
        if !buttons.is_empty() {
            self.rows.push(buttons);
        }
        self
    }

    /// Append a single-button row
    pub fn button(self, label: impl Into<String>, payload: impl Into<String>) -> Self {
        self.row(vec![Button::new(label, payload)])
    }

    pub fn rows(&self) -> &[Vec<Button>] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn buttons(&self) -> impl Iterator<Item = &Button> {
        self.rows.iter().flatten()
    }

    /// Find a button by its exact label
    pub fn find(&self, label: &str) -> Option<&Button> {
        self.buttons().find(|b| b.label == label)
    }

    /// Payloads that exceed the platform limit
    pub fn oversized_payloads(&self) -> Vec<&str> {
        self.buttons()
            .filter(|b| b.payload.len() > MAX_PAYLOAD_LEN)
            .map(|b| b.payload.as_str())
            .collect()
    }
}

#[cfg(test)]
#[path = "keyboard_tests.rs"]
mod tests;
