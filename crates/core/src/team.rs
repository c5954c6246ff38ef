// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Club teams

use crate::id::TeamId;
use crate::patch::Patch;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub short_code: String,
    pub active: bool,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for a team insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTeam {
    pub name: String,
    pub short_code: String,
    pub active: bool,
    pub note: Option<String>,
}

/// Partial team update; `None` leaves non-nullable columns untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamPatch {
    pub name: Option<String>,
    pub short_code: Option<String>,
    pub active: Option<bool>,
    pub note: Patch<String>,
}

impl TeamPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.short_code.is_none()
            && self.active.is_none()
            && self.note.is_unchanged()
    }
}
