// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tournament rosters: which players a team entered into a tournament

use crate::id::{PlayerId, TeamId, TournamentId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub tournament_id: TournamentId,
    pub team_id: TeamId,
    pub player_id: PlayerId,
    pub player_name: String,
    /// Shirt number for this tournament
    pub number: Option<i32>,
}

/// A player's roster assignment, seen from the player's side
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterAssignment {
    pub tournament_id: TournamentId,
    pub team_id: TeamId,
    pub team_name: String,
    pub number: Option<i32>,
}

/// A team with at least one roster entry in a tournament
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentTeam {
    pub team_id: TeamId,
    pub team_name: String,
    pub short_code: String,
}

/// Composite key of a roster slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RosterKey {
    pub tournament_id: TournamentId,
    pub team_id: TeamId,
    pub player_id: PlayerId,
}

impl RosterKey {
    pub fn new(tournament_id: TournamentId, team_id: TeamId, player_id: PlayerId) -> Self {
        Self {
            tournament_id,
            team_id,
            player_id,
        }
    }
}
