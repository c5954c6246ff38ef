// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Club players

use crate::id::PlayerId;
use crate::patch::Patch;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub full_name: String,
    pub birth_date: Option<NaiveDate>,
    pub position: Option<String>,
    pub active: bool,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPlayer {
    pub full_name: String,
    pub birth_date: Option<NaiveDate>,
    pub position: Option<String>,
    pub active: bool,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerPatch {
    pub full_name: Option<String>,
    pub birth_date: Patch<NaiveDate>,
    pub position: Patch<String>,
    pub active: Option<bool>,
    pub note: Patch<String>,
}

impl PlayerPatch {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.birth_date.is_unchanged()
            && self.position.is_unchanged()
            && self.active.is_none()
            && self.note.is_unchanged()
    }
}
