// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Storage layer for the club bot
//!
//! PostgreSQL repositories for club records, the per-admin session store
//! and the embedded schema migrations.

pub mod club;
mod error;
mod migration;
mod session_store;
pub mod sessions;

pub use club::{
    ClubRepo, EventRepo, LineupRepo, MatchRepo, PgClubRepo, PlayerRepo, RepoResult, RosterRepo,
    TeamRepo, TournamentRepo,
};
pub use error::StorageError;
pub use migration::{Migration, MigrationError, MigrationRegistry};
pub use session_store::{decode_flow_state, encode_flow_state, LoadedSession, SessionStore};
pub use sessions::{PgSessionRepo, SessionRepo};

#[cfg(any(test, feature = "test-support"))]
pub use club::{MemoryClubRepo, Mutation};
#[cfg(any(test, feature = "test-support"))]
pub use sessions::{MemorySessionRepo, SessionCall};
