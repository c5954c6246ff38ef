// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tournaments

use crate::error::string_enum;
use crate::id::TournamentId;
use crate::patch::Patch;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

string_enum! {
    /// Lifecycle of a tournament
    #[derive(Default)]
    pub enum TournamentStatus("tournament status") {
        #[default]
        Planned => "planned",
        Active => "active",
        Finished => "finished",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub kind: Option<String>,
    pub status: TournamentStatus,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTournament {
    pub name: String,
    pub kind: Option<String>,
    pub status: TournamentStatus,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TournamentPatch {
    pub name: Option<String>,
    pub kind: Patch<String>,
    pub status: Option<TournamentStatus>,
    pub start_date: Patch<NaiveDate>,
    pub end_date: Patch<NaiveDate>,
    pub note: Patch<String>,
}

impl TournamentPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.kind.is_unchanged()
            && self.status.is_none()
            && self.start_date.is_unchanged()
            && self.end_date.is_unchanged()
            && self.note.is_unchanged()
    }
}
