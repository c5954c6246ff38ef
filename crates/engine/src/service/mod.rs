// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Club domain services.
//!
//! Thin validation layer over the repositories. Every rule here fails with
//! [`DomainError::Validation`] before the repository is touched, so the
//! reason can be shown to the admin verbatim. Mutations are logged with
//! `action`, `entity`, `entity_id` and `status` (or `error`); the admin id
//! comes from the enclosing dispatcher span.

mod events;
mod lineup;
mod matches;
mod players;
mod rosters;
mod teams;
mod tournaments;

pub use matches::{UpcomingMatch, UPCOMING_LIMIT};
pub use players::PlayerPage;

use cb_core::DomainError;
use cb_storage::{ClubRepo, RepoResult};
use std::fmt::Display;
use std::sync::Arc;

/// Entry point to every club operation
#[derive(Clone)]
pub struct Club {
    repo: Arc<dyn ClubRepo>,
}

impl Club {
    pub fn new(repo: Arc<dyn ClubRepo>) -> Self {
        Self { repo }
    }

    pub fn repo(&self) -> &dyn ClubRepo {
        self.repo.as_ref()
    }
}

/// Reject blank required text.
fn required(field: &'static str, value: &str) -> RepoResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(field));
    }
    Ok(())
}

/// Log the outcome of a mutation and pass the result through.
fn audit<T>(
    action: &'static str,
    entity: &'static str,
    entity_id: impl Display,
    result: RepoResult<T>,
) -> RepoResult<T> {
    match &result {
        Ok(_) => tracing::info!(action, entity, entity_id = %entity_id, status = "ok", "club record changed"),
        Err(e) if e.is_validation() => {
            tracing::info!(action, entity, entity_id = %entity_id, status = "rejected", error = %e, "club change rejected")
        }
        Err(e) => {
            tracing::error!(action, entity, entity_id = %entity_id, error = %e, "club change failed")
        }
    }
    result
}

/// Log the outcome of an insert, keyed by the id it produced.
fn audit_created<I: Display>(entity: &'static str, result: RepoResult<I>) -> RepoResult<I> {
    match &result {
        Ok(id) => tracing::info!(action = "create", entity, entity_id = %id, status = "ok", "club record created"),
        Err(e) if e.is_validation() => {
            tracing::info!(action = "create", entity, status = "rejected", error = %e, "club change rejected")
        }
        Err(e) => tracing::error!(action = "create", entity, error = %e, "club change failed"),
    }
    result
}

#[cfg(test)]
#[path = "../service_tests/mod.rs"]
mod tests;
