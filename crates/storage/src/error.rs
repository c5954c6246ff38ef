// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Storage errors and their mapping onto domain errors

use cb_core::DomainError;
use thiserror::Error;

/// Postgres SQLSTATE for a unique constraint violation
const UNIQUE_VIOLATION: &str = "23505";
/// Postgres SQLSTATE for a foreign key violation
const FOREIGN_KEY_VIOLATION: &str = "23503";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("session payload error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("session payload for admin {admin} matches neither envelope nor wizard shape")]
    Corrupt { admin: i64 },
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error(transparent)]
    Migration(#[from] crate::migration::MigrationError),
}

impl From<StorageError> for DomainError {
    fn from(e: StorageError) -> Self {
        DomainError::Storage(e.to_string())
    }
}

/// Translate a driver error for a query against `entity`.
pub(crate) fn domain_error(entity: &'static str, e: sqlx::Error) -> DomainError {
    match &e {
        sqlx::Error::RowNotFound => DomainError::NotFound(entity),
        sqlx::Error::Database(db) => match db.code().as_deref() {
            Some(UNIQUE_VIOLATION) => DomainError::Conflict(format!("{entity} already exists")),
            Some(FOREIGN_KEY_VIOLATION) => {
                DomainError::validation(format!("{entity} references a missing record"))
            }
            _ => DomainError::Storage(e.to_string()),
        },
        _ => DomainError::Storage(e.to_string()),
    }
}
