// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Versioned SQL schema migrations.
//!
//! Each migration moves the schema from `version - 1` to `version`. The
//! registry checks the chain is contiguous and hands back whatever is
//! still pending for the version recorded in `schema_migrations`.

use sqlx::PgPool;
use thiserror::Error;

/// Errors that can occur during migration
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("migration v{version} ({name}) failed: {reason}")]
    Failed {
        version: u32,
        name: &'static str,
        reason: String,
    },
    #[error("no migration path from v{0} to v{1}")]
    NoPath(u32, u32),
    #[error("database schema version {0} is newer than supported ({1})")]
    TooNew(u32, u32),
}

/// One forward-only schema step
#[derive(Debug, Clone, Copy)]
pub struct Migration {
    pub version: u32,
    pub name: &'static str,
    pub sql: &'static str,
}

const BUILTIN: &[Migration] = &[
    Migration {
        version: 1,
        name: "club_schema",
        sql: include_str!("../migrations/0001_club_schema.sql"),
    },
    Migration {
        version: 2,
        name: "admin_sessions",
        sql: include_str!("../migrations/0002_admin_sessions.sql"),
    },
    Migration {
        version: 3,
        name: "match_indexes",
        sql: include_str!("../migrations/0003_match_indexes.sql"),
    },
];

/// Registry of migrations for upgrading the database schema.
pub struct MigrationRegistry {
    migrations: Vec<Migration>,
}

impl MigrationRegistry {
    /// Create a new registry with all known migrations.
    pub fn new() -> Self {
        Self::with(BUILTIN.to_vec())
    }

    pub fn with(mut migrations: Vec<Migration>) -> Self {
        migrations.sort_by_key(|m| m.version);
        Self { migrations }
    }

    /// Highest version this build knows about (0 when empty).
    pub fn latest(&self) -> u32 {
        self.migrations.last().map_or(0, |m| m.version)
    }

    /// Migrations to run, in order, to move from `current` to `latest()`.
    pub fn pending(&self, current: u32) -> Result<Vec<Migration>, MigrationError> {
        let target = self.latest();
        if current > target {
            return Err(MigrationError::TooNew(current, target));
        }

        let mut out = Vec::new();
        let mut version = current;
        while version < target {
            let next = self
                .migrations
                .iter()
                .find(|m| m.version == version + 1)
                .ok_or(MigrationError::NoPath(version, target))?;
            out.push(*next);
            version = next.version;
        }
        Ok(out)
    }

    /// Apply pending migrations, each in its own transaction.
    ///
    /// Returns the number of migrations applied.
    pub async fn apply(&self, pool: &PgPool) -> Result<usize, crate::StorageError> {
        sqlx::raw_sql(
            "CREATE TABLE IF NOT EXISTS schema_migrations (
                version     INTEGER PRIMARY KEY,
                name        TEXT NOT NULL,
                applied_at  TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )",
        )
        .execute(pool)
        .await?;

        let current: Option<i32> = sqlx::query_scalar("SELECT MAX(version) FROM schema_migrations")
            .fetch_one(pool)
            .await?;
        let current = current.map_or(0, |v| v.max(0) as u32);

        let pending = self.pending(current)?;
        for migration in &pending {
            let mut tx = pool.begin().await?;
            sqlx::raw_sql(migration.sql)
                .execute(&mut *tx)
                .await
                .map_err(|e| MigrationError::Failed {
                    version: migration.version,
                    name: migration.name,
                    reason: e.to_string(),
                })?;
            sqlx::query("INSERT INTO schema_migrations (version, name) VALUES ($1, $2)")
                .bind(migration.version as i32)
                .bind(migration.name)
                .execute(&mut *tx)
                .await?;
            tx.commit().await?;
            tracing::info!(version = migration.version, name = migration.name, "applied migration");
        }
        Ok(pending.len())
    }
}

impl Default for MigrationRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "migration_tests.rs"]
mod tests;
