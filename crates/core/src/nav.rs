// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Navigation stack frames

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A previously rendered screen: the action that redraws it plus the
/// parameters it was drawn with.
///
/// Params live in a `BTreeMap`, so two entries compare equal regardless of
/// insertion order. Serialized as `{"action": "...", "params": {...}}` with
/// `params` omitted when empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NavEntry {
    pub action: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub params: BTreeMap<String, String>,
}

impl NavEntry {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            params: BTreeMap::new(),
        }
    }

    /// Builder-style parameter setter
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.insert(key.into(), value.to_string());
        self
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Parse a parameter, returning `None` when missing or malformed.
    pub fn parse_param<T: std::str::FromStr>(&self, key: &str) -> Option<T> {
        self.param(key).and_then(|v| v.trim().parse().ok())
    }
}

#[cfg(test)]
#[path = "nav_tests.rs"]
mod tests;
