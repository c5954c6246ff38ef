// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Durable per-admin session row

use crate::id::AdminId;
use chrono::{DateTime, Utc};

/// One row of `admin_sessions`.
///
/// `current_flow` mirrors the wizard tag so "is a wizard active" can be
/// answered without decoding `flow_state`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    pub admin_id: AdminId,
    pub current_flow: Option<String>,
    pub flow_state: Option<Vec<u8>>,
    pub updated_at: DateTime<Utc>,
}

impl SessionRecord {
    /// Age of the row relative to `now`; zero if the clock went backwards.
    pub fn age(&self, now: DateTime<Utc>) -> chrono::Duration {
        (now - self.updated_at).max(chrono::Duration::zero())
    }
}
