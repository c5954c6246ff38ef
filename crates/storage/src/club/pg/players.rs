// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::{expect_row, set_column, set_patch, PgClubRepo};
use crate::club::{PlayerRepo, RepoResult};
use crate::error::domain_error;
use async_trait::async_trait;
use cb_core::{
    NewPlayer, Pagination, Player, PlayerId, PlayerPatch, RosterAssignment, TeamId, TournamentId,
};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, Postgres, QueryBuilder};

const ENTITY: &str = "player";

#[derive(FromRow)]
struct PlayerRow {
    id: i64,
    full_name: String,
    birth_date: Option<NaiveDate>,
    position: Option<String>,
    active: bool,
    note: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<PlayerRow> for Player {
    fn from(row: PlayerRow) -> Self {
        Player {
            id: PlayerId::new(row.id),
            full_name: row.full_name,
            birth_date: row.birth_date,
            position: row.position,
            active: row.active,
            note: row.note,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(FromRow)]
struct AssignmentRow {
    tournament_id: i64,
    team_id: i64,
    team_name: String,
    tournament_number: Option<i32>,
}

#[async_trait]
impl PlayerRepo for PgClubRepo {
    async fn list_players(&self, page: Pagination) -> RepoResult<Vec<Player>> {
        let rows = sqlx::query_as::<_, PlayerRow>(
            "SELECT id, full_name, birth_date, position, active, note, created_at, updated_at
             FROM players ORDER BY full_name LIMIT $1 OFFSET $2",
        )
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| domain_error(ENTITY, e))?;
        Ok(rows.into_iter().map(Player::from).collect())
    }

    async fn count_players(&self) -> RepoResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM players")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| domain_error(ENTITY, e))
    }

    async fn get_player(&self, id: PlayerId) -> RepoResult<Player> {
        sqlx::query_as::<_, PlayerRow>(
            "SELECT id, full_name, birth_date, position, active, note, created_at, updated_at
             FROM players WHERE id = $1",
        )
        .bind(id.get())
        .fetch_one(&self.pool)
        .await
        .map(Player::from)
        .map_err(|e| domain_error(ENTITY, e))
    }

    async fn create_player(&self, player: NewPlayer) -> RepoResult<PlayerId> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO players (full_name, birth_date, position, active, note)
             VALUES ($1, $2, $3, $4, $5) RETURNING id",
        )
        .bind(player.full_name)
        .bind(player.birth_date)
        .bind(player.position)
        .bind(player.active)
        .bind(player.note)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| domain_error(ENTITY, e))?;
        Ok(PlayerId::new(id))
    }

    async fn update_player(&self, id: PlayerId, patch: PlayerPatch) -> RepoResult<()> {
        if patch.is_empty() {
            return Ok(());
        }
        let mut qb = QueryBuilder::<Postgres>::new("UPDATE players SET ");
        let mut set = qb.separated(", ");
        if let Some(name) = patch.full_name {
            set_column!(set, "full_name", name);
        }
        set_patch!(set, "birth_date", patch.birth_date);
        set_patch!(set, "position", patch.position);
        if let Some(active) = patch.active {
            set_column!(set, "active", active);
        }
        set_patch!(set, "note", patch.note);
        set.push("updated_at = NOW()");
        qb.push(" WHERE id = ").push_bind(id.get());

        let result = qb
            .build()
            .execute(&self.pool)
            .await
            .map_err(|e| domain_error(ENTITY, e))?;
        expect_row(ENTITY, result)
    }

    async fn list_assignments(&self, player: PlayerId) -> RepoResult<Vec<RosterAssignment>> {
        let rows = sqlx::query_as::<_, AssignmentRow>(
            "SELECT tr.tournament_id, tr.team_id, t.name AS team_name, tr.tournament_number
             FROM tournament_roster tr
             JOIN teams t ON t.id = tr.team_id
             WHERE tr.player_id = $1
             ORDER BY tr.updated_at DESC",
        )
        .bind(player.get())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| domain_error(ENTITY, e))?;
        Ok(rows
            .into_iter()
            .map(|row| RosterAssignment {
                tournament_id: TournamentId::new(row.tournament_id),
                team_id: TeamId::new(row.team_id),
                team_name: row.team_name,
                number: row.tournament_number,
            })
            .collect())
    }
}
