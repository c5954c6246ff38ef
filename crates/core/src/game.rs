// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Matches, lineups and in-match events

use crate::error::string_enum;
use crate::id::{MatchId, PlayerId, TeamId, TournamentId};
use crate::patch::Patch;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

string_enum! {
    /// Lifecycle of a match
    #[derive(Default)]
    pub enum MatchStatus("match status") {
        #[default]
        Scheduled => "scheduled",
        Played => "played",
        Canceled => "canceled",
    }
}

/// A fixture of one club team against an external opponent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub tournament_id: TournamentId,
    pub team_id: TeamId,
    pub opponent: String,
    pub start_time: DateTime<Utc>,
    pub location: Option<String>,
    pub status: MatchStatus,
    /// Half-time score as `"us:them"`
    pub score_ht: Option<String>,
    pub score_ft: Option<String>,
    pub score_et: Option<String>,
    pub score_pen: Option<String>,
    pub final_us: Option<i32>,
    pub final_them: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMatch {
    pub tournament_id: TournamentId,
    pub team_id: TeamId,
    pub opponent: String,
    pub start_time: DateTime<Utc>,
    pub location: Option<String>,
    pub status: MatchStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchPatch {
    pub start_time: Option<DateTime<Utc>>,
    pub location: Patch<String>,
    pub status: Option<MatchStatus>,
    pub score_ht: Patch<String>,
    pub score_ft: Patch<String>,
    pub score_et: Patch<String>,
    pub score_pen: Patch<String>,
    pub final_us: Patch<i32>,
    pub final_them: Patch<i32>,
    pub opponent: Option<String>,
}

impl MatchPatch {
    /// Null out every score field.
    pub fn clear_scores(&mut self) {
        self.score_ht = Patch::Cleared;
        self.score_ft = Patch::Cleared;
        self.score_et = Patch::Cleared;
        self.score_pen = Patch::Cleared;
        self.final_us = Patch::Cleared;
        self.final_them = Patch::Cleared;
    }

    pub fn is_empty(&self) -> bool {
        self.start_time.is_none()
            && self.location.is_unchanged()
            && self.status.is_none()
            && self.score_ht.is_unchanged()
            && self.score_ft.is_unchanged()
            && self.score_et.is_unchanged()
            && self.score_pen.is_unchanged()
            && self.final_us.is_unchanged()
            && self.final_them.is_unchanged()
            && self.opponent.is_none()
    }
}

string_enum! {
    /// Whether a player starts or sits on the bench
    pub enum LineupRole("lineup role") {
        Start => "start",
        Sub => "sub",
    }
}

impl LineupRole {
    pub fn toggled(self) -> Self {
        match self {
            LineupRole::Start => LineupRole::Sub,
            LineupRole::Sub => LineupRole::Start,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineupEntry {
    pub match_id: MatchId,
    pub player_id: PlayerId,
    pub player_name: String,
    /// Tournament shirt number from the roster
    pub roster_number: Option<i32>,
    pub role: LineupRole,
    /// Per-match shirt number; wins over the roster number
    pub number_override: Option<i32>,
    pub note: Option<String>,
}

impl LineupEntry {
    pub fn shirt_number(&self) -> Option<i32> {
        self.number_override.or(self.roster_number)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineupPatch {
    pub role: Option<LineupRole>,
    pub number_override: Patch<i32>,
    pub note: Patch<String>,
}

impl LineupPatch {
    pub fn is_empty(&self) -> bool {
        self.role.is_none() && self.number_override.is_unchanged() && self.note.is_unchanged()
    }
}

string_enum! {
    pub enum EventKind("event type") {
        Goal => "goal",
        Card => "card",
        Sub => "sub",
    }
}

string_enum! {
    pub enum CardType("card type") {
        Yellow => "yellow",
        Red => "red",
    }
}

/// Something that happened during a match.
///
/// `time_text` is free-form (`"45+2"`). For substitutions `player_main` is
/// the player leaving and `player_alt` the one coming on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchEvent {
    pub id: i64,
    pub match_id: MatchId,
    pub kind: EventKind,
    pub time_text: String,
    pub player_main: Option<PlayerId>,
    pub player_alt: Option<PlayerId>,
    pub card_type: Option<CardType>,
    pub player_main_name: Option<String>,
    pub player_alt_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMatchEvent {
    pub match_id: MatchId,
    pub kind: EventKind,
    pub time_text: String,
    pub player_main: Option<PlayerId>,
    pub player_alt: Option<PlayerId>,
    pub card_type: Option<CardType>,
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod tests;
