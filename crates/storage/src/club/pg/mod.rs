// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! PostgreSQL-backed club repositories

mod events;
mod lineups;
mod matches;
mod players;
mod rosters;
mod teams;
mod tournaments;

use cb_core::DomainError;
use sqlx::postgres::PgQueryResult;
use sqlx::PgPool;

#[derive(Clone)]
pub struct PgClubRepo {
    pool: PgPool,
}

impl PgClubRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Append `column = $n` to a separated SET list.
macro_rules! set_column {
    ($set:expr, $column:literal, $value:expr) => {
        $set.push(concat!($column, " = ")).push_bind_unseparated($value);
    };
}

/// Append `column = $n` for a touched tri-state field.
macro_rules! set_patch {
    ($set:expr, $column:literal, $patch:expr) => {
        if let Some(value) = $patch.into_update() {
            set_column!($set, $column, value);
        }
    };
}

pub(crate) use {set_column, set_patch};

/// Zero affected rows on an UPDATE/DELETE by key means the key is unknown.
fn expect_row(entity: &'static str, result: PgQueryResult) -> Result<(), DomainError> {
    if result.rows_affected() == 0 {
        return Err(DomainError::NotFound(entity));
    }
    Ok(())
}

/// Decode a string-coded column into its enum.
fn parse_code<T>(raw: &str) -> Result<T, DomainError>
where
    T: std::str::FromStr<Err = cb_core::ParseEnumError>,
{
    raw.parse().map_err(|e: cb_core::ParseEnumError| DomainError::Storage(e.to_string()))
}
