// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `admin_sessions` table

use super::SessionRepo;
use crate::StorageError;
use async_trait::async_trait;
use cb_core::{AdminId, SessionRecord};
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

#[derive(Clone)]
pub struct PgSessionRepo {
    pool: PgPool,
}

impl PgSessionRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct SessionRow {
    admin_tg_id: i64,
    current_flow: Option<String>,
    flow_state: Option<Vec<u8>>,
    updated_at: DateTime<Utc>,
}

impl From<SessionRow> for SessionRecord {
    fn from(row: SessionRow) -> Self {
        SessionRecord {
            admin_id: AdminId::new(row.admin_tg_id),
            current_flow: row.current_flow,
            flow_state: row.flow_state,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl SessionRepo for PgSessionRepo {
    async fn get(&self, admin: AdminId) -> Result<Option<SessionRecord>, StorageError> {
        let row = sqlx::query_as::<_, SessionRow>(
            "SELECT admin_tg_id, current_flow, flow_state, updated_at
             FROM admin_sessions WHERE admin_tg_id = $1",
        )
        .bind(admin.get())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(SessionRecord::from))
    }

    async fn upsert(
        &self,
        admin: AdminId,
        current_flow: Option<&str>,
        flow_state: Option<&[u8]>,
    ) -> Result<(), StorageError> {
        sqlx::query(
            "INSERT INTO admin_sessions (admin_tg_id, current_flow, flow_state, updated_at)
             VALUES ($1, $2, $3, NOW())
             ON CONFLICT (admin_tg_id)
             DO UPDATE SET current_flow = EXCLUDED.current_flow,
                           flow_state = EXCLUDED.flow_state,
                           updated_at = NOW()",
        )
        .bind(admin.get())
        .bind(current_flow)
        .bind(flow_state)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete(&self, admin: AdminId) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM admin_sessions WHERE admin_tg_id = $1")
            .bind(admin.get())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<SessionRecord>, StorageError> {
        let rows = sqlx::query_as::<_, SessionRow>(
            "SELECT admin_tg_id, current_flow, flow_state, updated_at
             FROM admin_sessions ORDER BY updated_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(SessionRecord::from).collect())
    }
}
