// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::{expect_row, parse_code, set_column, set_patch, PgClubRepo};
use crate::club::{LineupRepo, RepoResult};
use crate::error::domain_error;
use async_trait::async_trait;
use cb_core::{DomainError, LineupEntry, LineupPatch, LineupRole, MatchId, PlayerId};
use sqlx::{FromRow, Postgres, QueryBuilder};

const ENTITY: &str = "lineup entry";

#[derive(FromRow)]
struct LineupRow {
    match_id: i64,
    player_id: i64,
    role: String,
    number_override: Option<i32>,
    note: Option<String>,
    full_name: String,
    tournament_number: Option<i32>,
}

impl TryFrom<LineupRow> for LineupEntry {
    type Error = DomainError;

    fn try_from(row: LineupRow) -> Result<Self, Self::Error> {
        Ok(LineupEntry {
            match_id: MatchId::new(row.match_id),
            player_id: PlayerId::new(row.player_id),
            player_name: row.full_name,
            roster_number: row.tournament_number,
            role: parse_code(&row.role)?,
            number_override: row.number_override,
            note: row.note,
        })
    }
}

#[async_trait]
impl LineupRepo for PgClubRepo {
    async fn get_lineup(&self, m: MatchId) -> RepoResult<Vec<LineupEntry>> {
        let rows = sqlx::query_as::<_, LineupRow>(
            "SELECT ml.match_id, ml.player_id, ml.role, ml.number_override, ml.note,
                    p.full_name, tr.tournament_number
             FROM match_lineups ml
             JOIN players p ON p.id = ml.player_id
             LEFT JOIN matches m ON m.id = ml.match_id
             LEFT JOIN tournament_roster tr
                    ON tr.tournament_id = m.tournament_id
                   AND tr.team_id = m.team_id
                   AND tr.player_id = ml.player_id
             WHERE ml.match_id = $1
             ORDER BY ml.role, COALESCE(ml.number_override, tr.tournament_number, 999), p.full_name",
        )
        .bind(m.get())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| domain_error(ENTITY, e))?;
        rows.into_iter().map(LineupEntry::try_from).collect()
    }

    async fn upsert_lineup(
        &self,
        m: MatchId,
        player: PlayerId,
        role: LineupRole,
        number_override: Option<i32>,
        note: Option<String>,
    ) -> RepoResult<()> {
        sqlx::query(
            "INSERT INTO match_lineups (match_id, player_id, role, number_override, note)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (match_id, player_id)
             DO UPDATE SET role = EXCLUDED.role,
                           number_override = EXCLUDED.number_override,
                           note = EXCLUDED.note,
                           updated_at = NOW()",
        )
        .bind(m.get())
        .bind(player.get())
        .bind(role.as_str())
        .bind(number_override)
        .bind(note)
        .execute(&self.pool)
        .await
        .map_err(|e| domain_error(ENTITY, e))?;
        Ok(())
    }

    async fn update_lineup(&self, m: MatchId, player: PlayerId, patch: LineupPatch) -> RepoResult<()> {
        if patch.is_empty() {
            return Ok(());
        }
        let mut qb = QueryBuilder::<Postgres>::new("UPDATE match_lineups SET ");
        let mut set = qb.separated(", ");
        if let Some(role) = patch.role {
            set_column!(set, "role", role.as_str());
        }
        set_patch!(set, "number_override", patch.number_override);
        set_patch!(set, "note", patch.note);
        set.push("updated_at = NOW()");
        qb.push(" WHERE match_id = ")
            .push_bind(m.get())
            .push(" AND player_id = ")
            .push_bind(player.get());

        let result = qb
            .build()
            .execute(&self.pool)
            .await
            .map_err(|e| domain_error(ENTITY, e))?;
        expect_row(ENTITY, result)
    }

    async fn remove_lineup(&self, m: MatchId, player: PlayerId) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM match_lineups WHERE match_id = $1 AND player_id = $2")
            .bind(m.get())
            .bind(player.get())
            .execute(&self.pool)
            .await
            .map_err(|e| domain_error(ENTITY, e))?;
        expect_row(ENTITY, result)
    }

    async fn lineup_has_player(&self, m: MatchId, player: PlayerId) -> RepoResult<bool> {
        sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM match_lineups WHERE match_id = $1 AND player_id = $2)",
        )
        .bind(m.get())
        .bind(player.get())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| domain_error(ENTITY, e))
    }

    async fn lineup_player_ids(&self, m: MatchId) -> RepoResult<Vec<PlayerId>> {
        let ids: Vec<i64> = sqlx::query_scalar("SELECT player_id FROM match_lineups WHERE match_id = $1")
            .bind(m.get())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| domain_error(ENTITY, e))?;
        Ok(ids.into_iter().map(PlayerId::new).collect())
    }
}
