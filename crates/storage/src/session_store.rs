// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Typed load/save over the opaque `flow_state` blob.
//!
//! The blob is a JSON envelope `{"wizard": {...}, "nav": [...]}` with both
//! parts optional. Rows written before the envelope existed hold a bare
//! wizard object instead. Decoding tries, in order:
//!
//! 1. SQL NULL, empty bytes, JSON `null` or `{}`: nothing stored
//! 2. an object carrying a `wizard` or `nav` key: the envelope
//! 3. a bare wizard object: legacy row, no navigation
//!
//! Anything else is reported as corrupt rather than read as "no session".

use crate::sessions::SessionRepo;
use crate::StorageError;
use cb_core::{AdminId, NavEntry, WizardState};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Default, Serialize, Deserialize)]
struct Envelope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    wizard: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    nav: Option<Vec<NavEntry>>,
}

/// Everything persisted for one admin
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedSession {
    /// Flow tag from its own column; `None` when no wizard is active
    pub flow: Option<String>,
    pub wizard: Option<WizardState>,
    pub nav: Vec<NavEntry>,
    /// `None` when the admin has no row at all
    pub updated_at: Option<DateTime<Utc>>,
}

impl LoadedSession {
    /// The wizard, only when the flow column agrees it is active.
    pub fn active_wizard(&self) -> Option<&WizardState> {
        match (&self.flow, &self.wizard) {
            (Some(flow), Some(wizard)) if *flow == wizard.flow => Some(wizard),
            _ => None,
        }
    }
}

/// Decode a stored blob into its wizard and navigation parts.
pub fn decode_flow_state(
    admin: AdminId,
    blob: &[u8],
) -> Result<(Option<WizardState>, Vec<NavEntry>), StorageError> {
    if blob.iter().all(u8::is_ascii_whitespace) {
        return Ok((None, Vec::new()));
    }
    let corrupt = || StorageError::Corrupt { admin: admin.get() };
    let value: Value = serde_json::from_slice(blob).map_err(|_| corrupt())?;

    let is_envelope = match &value {
        Value::Null => return Ok((None, Vec::new())),
        Value::Object(map) if map.is_empty() => return Ok((None, Vec::new())),
        Value::Object(map) => map.contains_key("wizard") || map.contains_key("nav"),
        _ => return Err(corrupt()),
    };

    if is_envelope {
        let envelope: Envelope = serde_json::from_value(value).map_err(|_| corrupt())?;
        let wizard = envelope
            .wizard
            .map(serde_json::from_value::<WizardState>)
            .transpose()
            .map_err(|_| corrupt())?;
        return Ok((wizard, envelope.nav.unwrap_or_default()));
    }

    let legacy: WizardState = serde_json::from_value(value).map_err(|_| corrupt())?;
    Ok((Some(legacy), Vec::new()))
}

/// Encode wizard and navigation into a blob; `None` when both are empty.
pub fn encode_flow_state(
    wizard: Option<&WizardState>,
    nav: &[NavEntry],
) -> Result<Option<Vec<u8>>, StorageError> {
    if wizard.is_none() && nav.is_empty() {
        return Ok(None);
    }
    let envelope = Envelope {
        wizard: wizard.map(serde_json::to_value).transpose()?,
        nav: (!nav.is_empty()).then(|| nav.to_vec()),
    };
    Ok(Some(serde_json::to_vec(&envelope)?))
}

/// Session facade over a [`SessionRepo`]
#[derive(Clone)]
pub struct SessionStore<R> {
    repo: R,
}

impl<R: SessionRepo> SessionStore<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Missing rows load as an empty session, not an error.
    pub async fn load(&self, admin: AdminId) -> Result<LoadedSession, StorageError> {
        let Some(record) = self.repo.get(admin).await? else {
            return Ok(LoadedSession::default());
        };
        let (wizard, nav) = match record.flow_state.as_deref() {
            Some(blob) => decode_flow_state(admin, blob)?,
            None => (None, Vec::new()),
        };
        Ok(LoadedSession {
            flow: record.current_flow,
            wizard,
            nav,
            updated_at: Some(record.updated_at),
        })
    }

    /// Overwrite the admin's row with exactly this flow, wizard and stack.
    pub async fn save(
        &self,
        admin: AdminId,
        flow: Option<&str>,
        wizard: Option<&WizardState>,
        nav: &[NavEntry],
    ) -> Result<(), StorageError> {
        let blob = encode_flow_state(wizard, nav)?;
        self.repo.upsert(admin, flow, blob.as_deref()).await
    }

    /// Delete the row, wizard and navigation alike.
    pub async fn clear(&self, admin: AdminId) -> Result<(), StorageError> {
        self.repo.delete(admin).await
    }
}

#[cfg(test)]
#[path = "session_store_tests.rs"]
mod tests;
