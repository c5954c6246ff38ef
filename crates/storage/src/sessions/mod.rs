// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Persistent per-admin session rows

mod pg;

pub use pg::PgSessionRepo;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod memory;
#[cfg(any(test, feature = "test-support"))]
pub use memory::{MemorySessionRepo, SessionCall};

use crate::StorageError;
use async_trait::async_trait;
use cb_core::{AdminId, SessionRecord};

/// Key-value store of admin sessions with last-write-wins semantics.
///
/// Every write replaces the whole row.
#[async_trait]
pub trait SessionRepo: Clone + Send + Sync + 'static {
    /// `None` when the admin has no row.
    async fn get(&self, admin: AdminId) -> Result<Option<SessionRecord>, StorageError>;

    /// Insert or overwrite; `updated_at` is set by the store.
    async fn upsert(
        &self,
        admin: AdminId,
        current_flow: Option<&str>,
        flow_state: Option<&[u8]>,
    ) -> Result<(), StorageError>;

    async fn delete(&self, admin: AdminId) -> Result<(), StorageError>;

    /// All rows, newest first. Used by operator tooling only.
    async fn list(&self) -> Result<Vec<SessionRecord>, StorageError>;
}
