// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Persisted wizard cursor and accumulated answers

use crate::patch::Patch;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Marker suffix written by older sessions to flag a cleared field
/// (`note_action = "delete"`).
const LEGACY_ACTION_SUFFIX: &str = "_action";
const LEGACY_DELETE: &str = "delete";
/// Older edit sessions stored new values as `note_new`.
const LEGACY_VALUE_SUFFIX: &str = "_new";

/// Where an admin is inside a multi-step form.
///
/// `step` only ever moves forward within one flow instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardState {
    pub flow: String,
    pub step: usize,
    #[serde(default)]
    pub data: WizardData,
}

impl WizardState {
    /// Step 0 with no answers yet.
    pub fn new(flow: impl Into<String>) -> Self {
        Self {
            flow: flow.into(),
            step: 0,
            data: WizardData::default(),
        }
    }

    pub fn with_data(mut self, data: WizardData) -> Self {
        self.data = data;
        self
    }
}

/// Answers collected so far, keyed by field name.
///
/// Each field is tri-state: absent (leave unchanged), a string value (set),
/// or JSON `null` (clear). Plain string maps written by older sessions
/// deserialize unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WizardData(BTreeMap<String, Option<String>>);

impl WizardData {
    pub fn new() -> Self {
        Self::default()
    }

    /// The stored value, if the field was set to one.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|v| v.as_deref())
    }

    /// Parse a stored value; `None` when missing or malformed.
    pub fn parse<T: std::str::FromStr>(&self, key: &str) -> Option<T> {
        self.get(key).and_then(|v| v.parse().ok())
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), Some(value.into()));
    }

    /// Record an explicit "clear this field" answer.
    pub fn clear_field(&mut self, key: impl Into<String>) {
        self.0.insert(key.into(), None);
    }

    /// Forget the field entirely, which reads back as "unchanged".
    pub fn remove(&mut self, key: &str) {
        self.0.remove(key);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn set_patch(&mut self, key: impl Into<String>, patch: Patch<String>) {
        let key = key.into();
        match patch {
            Patch::Unchanged => {
                self.0.remove(&key);
            }
            Patch::Set(v) => {
                self.0.insert(key, Some(v));
            }
            Patch::Cleared => {
                self.0.insert(key, None);
            }
        }
    }

    /// Read a field back as a tri-state answer.
    pub fn patch(&self, key: &str) -> Patch<&str> {
        let legacy_marker = format!("{key}{LEGACY_ACTION_SUFFIX}");
        if self.get(&legacy_marker) == Some(LEGACY_DELETE) {
            return Patch::Cleared;
        }
        match self.0.get(key) {
            Some(Some(v)) => Patch::Set(v.as_str()),
            Some(None) => Patch::Cleared,
            None => match self.get(&format!("{key}{LEGACY_VALUE_SUFFIX}")) {
                Some(v) if !v.is_empty() => Patch::Set(v),
                _ => Patch::Unchanged,
            },
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for WizardData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), Some(v.into())))
                .collect(),
        )
    }
}

#[cfg(test)]
#[path = "wizard_tests.rs"]
mod tests;
