// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::{audit, Club};
use cb_core::{DomainError, LineupEntry, LineupPatch, LineupRole, MatchId, PlayerId, RosterKey};
use cb_storage::RepoResult;

fn slot_id(m: MatchId, player: PlayerId) -> String {
    format!("{m}/{player}")
}

impl Club {
    /// Starters first, then by shirt number and name
    pub async fn lineup(&self, m: MatchId) -> RepoResult<Vec<LineupEntry>> {
        self.repo.get_lineup(m).await
    }

    /// Add or overwrite a lineup slot; the player must be on the roster
    /// of the match's tournament and team.
    pub async fn upsert_lineup(
        &self,
        m: MatchId,
        player: PlayerId,
        role: LineupRole,
        number_override: Option<i32>,
        note: Option<String>,
    ) -> RepoResult<()> {
        let game = self.repo.get_match(m).await?;
        let key = RosterKey::new(game.tournament_id, game.team_id, player);
        let result = if self.repo.is_in_roster(key).await? {
            self.repo
                .upsert_lineup(m, player, role, number_override, note)
                .await
        } else {
            Err(DomainError::validation("player not in tournament roster"))
        };
        audit("upsert", "lineup", slot_id(m, player), result)
    }

    pub async fn update_lineup(&self, m: MatchId, player: PlayerId, patch: LineupPatch) -> RepoResult<()> {
        if patch.is_empty() {
            return Ok(());
        }
        audit(
            "update",
            "lineup",
            slot_id(m, player),
            self.repo.update_lineup(m, player, patch).await,
        )
    }

    pub async fn remove_from_lineup(&self, m: MatchId, player: PlayerId) -> RepoResult<()> {
        audit(
            "remove",
            "lineup",
            slot_id(m, player),
            self.repo.remove_lineup(m, player).await,
        )
    }

    /// Flip a player between starter and substitute, returning the new role.
    pub async fn toggle_lineup_role(&self, m: MatchId, player: PlayerId) -> RepoResult<LineupRole> {
        let current = self
            .repo
            .get_lineup(m)
            .await?
            .into_iter()
            .find(|entry| entry.player_id == player)
            .ok_or(DomainError::NotFound("lineup entry"))?;
        let role = current.role.toggled();
        let patch = LineupPatch {
            role: Some(role),
            ..LineupPatch::default()
        };
        self.update_lineup(m, player, patch).await?;
        Ok(role)
    }
}
