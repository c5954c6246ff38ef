// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::{expect_row, set_column, set_patch, PgClubRepo};
use crate::club::{RepoResult, TeamRepo};
use crate::error::domain_error;
use async_trait::async_trait;
use cb_core::{NewTeam, Team, TeamId, TeamPatch};
use chrono::{DateTime, Utc};
use sqlx::{FromRow, Postgres, QueryBuilder};

const ENTITY: &str = "team";

#[derive(FromRow)]
struct TeamRow {
    id: i64,
    name: String,
    short_code: String,
    active: bool,
    note: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<TeamRow> for Team {
    fn from(row: TeamRow) -> Self {
        Team {
            id: TeamId::new(row.id),
            name: row.name,
            short_code: row.short_code,
            active: row.active,
            note: row.note,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl TeamRepo for PgClubRepo {
    async fn list_active_teams(&self) -> RepoResult<Vec<Team>> {
        let rows = sqlx::query_as::<_, TeamRow>(
            "SELECT id, name, short_code, active, note, created_at, updated_at
             FROM teams WHERE active = TRUE ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| domain_error(ENTITY, e))?;
        Ok(rows.into_iter().map(Team::from).collect())
    }

    async fn get_team(&self, id: TeamId) -> RepoResult<Team> {
        sqlx::query_as::<_, TeamRow>(
            "SELECT id, name, short_code, active, note, created_at, updated_at
             FROM teams WHERE id = $1",
        )
        .bind(id.get())
        .fetch_one(&self.pool)
        .await
        .map(Team::from)
        .map_err(|e| domain_error(ENTITY, e))
    }

    async fn create_team(&self, team: NewTeam) -> RepoResult<TeamId> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO teams (name, short_code, active, note)
             VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(team.name)
        .bind(team.short_code)
        .bind(team.active)
        .bind(team.note)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| domain_error(ENTITY, e))?;
        Ok(TeamId::new(id))
    }

    async fn update_team(&self, id: TeamId, patch: TeamPatch) -> RepoResult<()> {
        if patch.is_empty() {
            return Ok(());
        }
        let mut qb = QueryBuilder::<Postgres>::new("UPDATE teams SET ");
        let mut set = qb.separated(", ");
        if let Some(name) = patch.name {
            set_column!(set, "name", name);
        }
        if let Some(code) = patch.short_code {
            set_column!(set, "short_code", code);
        }
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
}
