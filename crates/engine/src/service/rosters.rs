// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::{audit, Club};
use cb_core::{DomainError, RosterEntry, RosterKey, TeamId, TournamentId, TournamentTeam};
use cb_storage::RepoResult;

/// Key rendering for audit logs: `tournament/team/player`
fn key_id(key: &RosterKey) -> String {
    format!("{}/{}/{}", key.tournament_id, key.team_id, key.player_id)
}

impl Club {
    pub async fn tournament_teams(&self, tournament: TournamentId) -> RepoResult<Vec<TournamentTeam>> {
        self.repo.list_tournament_teams(tournament).await
    }

    pub async fn roster(&self, tournament: TournamentId, team: TeamId) -> RepoResult<Vec<RosterEntry>> {
        self.repo.list_roster(tournament, team).await
    }

    pub async fn add_to_roster(&self, key: RosterKey, number: Option<i32>) -> RepoResult<()> {
        audit("add", "roster", key_id(&key), self.repo.add_roster_player(key, number).await)
    }

    pub async fn change_roster_number(&self, key: RosterKey, number: Option<i32>) -> RepoResult<()> {
        audit(
            "update",
            "roster",
            key_id(&key),
            self.repo.update_roster_number(key, number).await,
        )
    }

    /// Players that already appear in a lineup or event stay on the roster.
    pub async fn remove_from_roster(&self, key: RosterKey) -> RepoResult<()> {
        let result = match self.repo.has_participation(key).await {
            Ok(true) => Err(DomainError::validation("player has participation records")),
            Ok(false) => self.repo.remove_roster_player(key).await,
            Err(e) => Err(e),
        };
        audit("remove", "roster", key_id(&key), result)
    }
}
