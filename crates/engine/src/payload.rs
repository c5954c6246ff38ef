// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Inline button payloads: `action|key=value|key=value`.
//!
//! A payload decodes into the same shape as a navigation frame, so a
//! pressed button and a remembered screen share one type.

use cb_adapters::Button;
use cb_core::NavEntry;
use thiserror::Error;

const SEPARATOR: char = '|';

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    #[error("empty payload")]
    Empty,
    #[error("malformed parameter {0:?}")]
    Malformed(String),
}

pub fn parse(data: &str) -> Result<NavEntry, PayloadError> {
    let mut parts = data.split(SEPARATOR);
    let action = parts.next().map(str::trim).unwrap_or_default();
    if action.is_empty() {
        return Err(PayloadError::Empty);
    }
    let mut entry = NavEntry::new(action);
    for part in parts.filter(|p| !p.is_empty()) {
        match part.split_once('=') {
            Some((key, value)) if !key.is_empty() => {
                entry.params.insert(key.to_string(), value.to_string());
            }
            _ => return Err(PayloadError::Malformed(part.to_string())),
        }
    }
    Ok(entry)
}

pub fn encode(entry: &NavEntry) -> String {
    let mut out = entry.action.clone();
    for (key, value) in &entry.params {
        out.push(SEPARATOR);
        out.push_str(key);
        out.push('=');
        out.push_str(value);
    }
    out
}

/// A button that presses `action`
pub fn button(label: impl Into<String>, action: NavEntry) -> Button {
    Button::new(label, encode(&action))
}

#[cfg(test)]
#[path = "payload_tests.rs"]
mod tests;
