// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::{audit, audit_created, required, Club};
use cb_core::{
    DomainError, NewTournament, Tournament, TournamentId, TournamentPatch, TournamentStatus,
};
use cb_storage::RepoResult;

impl Club {
    pub async fn tournaments(&self, status: Option<TournamentStatus>) -> RepoResult<Vec<Tournament>> {
        self.repo.list_tournaments(status).await
    }

    pub async fn tournament(&self, id: TournamentId) -> RepoResult<Tournament> {
        self.repo.get_tournament(id).await
    }

    pub async fn create_tournament(&self, tournament: NewTournament) -> RepoResult<TournamentId> {
        required("name", &tournament.name)?;
        if let (Some(start), Some(end)) = (tournament.start_date, tournament.end_date) {
            if end < start {
                return Err(DomainError::validation("end_date"));
            }
        }
        audit_created("tournament", self.repo.create_tournament(tournament).await)
    }

    pub async fn update_tournament(&self, id: TournamentId, patch: TournamentPatch) -> RepoResult<()> {
        if patch.is_empty() {
            return Ok(());
        }
        if let Some(name) = &patch.name {
            required("name", name)?;
        }
        audit("update", "tournament", id, self.repo.update_tournament(id, patch).await)
    }
}
