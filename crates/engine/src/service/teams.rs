// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::{audit, audit_created, required, Club};
use cb_core::{NewTeam, Team, TeamId, TeamPatch, Tournament};
use cb_storage::RepoResult;

impl Club {
    pub async fn active_teams(&self) -> RepoResult<Vec<Team>> {
        self.repo.list_active_teams().await
    }

    pub async fn team(&self, id: TeamId) -> RepoResult<Team> {
        self.repo.get_team(id).await
    }

    pub async fn create_team(&self, team: NewTeam) -> RepoResult<TeamId> {
        required("name", &team.name)?;
        required("short_code", &team.short_code)?;
        audit_created("team", self.repo.create_team(team).await)
    }

    pub async fn update_team(&self, id: TeamId, patch: TeamPatch) -> RepoResult<()> {
        if patch.is_empty() {
            return Ok(());
        }
        if let Some(name) = &patch.name {
            required("name", name)?;
        }
        if let Some(code) = &patch.short_code {
            required("short_code", code)?;
        }
        audit("update", "team", id, self.repo.update_team(id, patch).await)
    }

    /// Tournaments the team has players entered in, with the roster size.
    pub async fn team_tournaments(&self, team: TeamId) -> RepoResult<Vec<(Tournament, i64)>> {
        let mut out = Vec::new();
        for tournament in self.repo.list_tournaments(None).await? {
            let size = self.repo.roster_size(tournament.id, team).await?;
            if size > 0 {
                out.push((tournament, size));
            }
        }
        Ok(out)
    }
}
