// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::{expect_row, parse_code, set_column, set_patch, PgClubRepo};
use crate::club::{RepoResult, TournamentRepo};
use crate::error::domain_error;
use async_trait::async_trait;
use cb_core::{
    DomainError, NewTournament, Tournament, TournamentId, TournamentPatch, TournamentStatus,
};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, Postgres, QueryBuilder};

const ENTITY: &str = "tournament";

const COLUMNS: &str =
    "SELECT id, name, type, status, start_date, end_date, note, created_at, updated_at FROM tournaments";

#[derive(FromRow)]
struct TournamentRow {
    id: i64,
    name: String,
    #[sqlx(rename = "type")]
    kind: Option<String>,
    status: String,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    note: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<TournamentRow> for Tournament {
    type Error = DomainError;

    fn try_from(row: TournamentRow) -> Result<Self, Self::Error> {
        Ok(Tournament {
            id: TournamentId::new(row.id),
            name: row.name,
            kind: row.kind,
            status: parse_code(&row.status)?,
            start_date: row.start_date,
            end_date: row.end_date,
            note: row.note,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl TournamentRepo for PgClubRepo {
    async fn list_tournaments(
        &self,
        status: Option<TournamentStatus>,
    ) -> RepoResult<Vec<Tournament>> {
        let mut qb = QueryBuilder::<Postgres>::new(COLUMNS);
        if let Some(status) = status {
            qb.push(" WHERE status = ").push_bind(status.as_str());
        }
        qb.push(" ORDER BY start_date NULLS LAST, name");
        let rows = qb
            .build_query_as::<TournamentRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| domain_error(ENTITY, e))?;
        rows.into_iter().map(Tournament::try_from).collect()
    }

    async fn get_tournament(&self, id: TournamentId) -> RepoResult<Tournament> {
        let row = sqlx::query_as::<_, TournamentRow>(&format!("{COLUMNS} WHERE id = $1"))
            .bind(id.get())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| domain_error(ENTITY, e))?;
        Tournament::try_from(row)
    }

    async fn create_tournament(&self, t: NewTournament) -> RepoResult<TournamentId> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO tournaments (name, type, status, start_date, end_date, note)
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING id",
        )
        .bind(t.name)
        .bind(t.kind)
        .bind(t.status.as_str())
        .bind(t.start_date)
        .bind(t.end_date)
        .bind(t.note)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| domain_error(ENTITY, e))?;
        Ok(TournamentId::new(id))
    }

    async fn update_tournament(&self, id: TournamentId, patch: TournamentPatch) -> RepoResult<()> {
        if patch.is_empty() {
            return Ok(());
        }
        let mut qb = QueryBuilder::<Postgres>::new("UPDATE tournaments SET ");
        let mut set = qb.separated(", ");
        if let Some(name) = patch.name {
            set_column!(set, "name", name);
        }
        set_patch!(set, "type", patch.kind);
        if let Some(status) = patch.status {
            set_column!(set, "status", status.as_str());
        }
        set_patch!(set, "start_date", patch.start_date);
        set_patch!(set, "end_date", patch.end_date);
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
}
