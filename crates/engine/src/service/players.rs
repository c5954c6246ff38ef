// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::{audit, audit_created, required, Club};
use cb_core::{NewPlayer, Pagination, Player, PlayerId, PlayerPatch, RosterAssignment};
use cb_storage::RepoResult;

/// One page of the player directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerPage {
    pub players: Vec<Player>,
    pub has_next: bool,
}

impl Club {
    pub async fn players_page(&self, page: i64, per_page: i64) -> RepoResult<PlayerPage> {
        let pagination = Pagination::new(page, per_page);
        let players = self.repo.list_players(pagination).await?;
        let total = self.repo.count_players().await?;
        let has_next = pagination.offset + (players.len() as i64) < total;
        Ok(PlayerPage { players, has_next })
    }

    pub async fn player(&self, id: PlayerId) -> RepoResult<Player> {
        self.repo.get_player(id).await
    }

    /// Players are always created active.
    pub async fn create_player(&self, mut player: NewPlayer) -> RepoResult<PlayerId> {
        required("full_name", &player.full_name)?;
        player.active = true;
        audit_created("player", self.repo.create_player(player).await)
    }

    pub async fn update_player(&self, id: PlayerId, patch: PlayerPatch) -> RepoResult<()> {
        if patch.is_empty() {
            return Ok(());
        }
        if let Some(name) = &patch.full_name {
            required("full_name", name)?;
        }
        audit("update", "player", id, self.repo.update_player(id, patch).await)
    }

    pub async fn player_assignments(&self, id: PlayerId) -> RepoResult<Vec<RosterAssignment>> {
        self.repo.list_assignments(id).await
    }
}
