// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Numeric identifier newtypes
//!
//! Every row in the club database is keyed by a `BIGINT`, and admins are
//! keyed by their Telegram user id. Wrapping them keeps a `TeamId` from
//! being passed where a `PlayerId` is expected.

/// Define a newtype ID wrapper around `i64`.
///
/// Generates `new()`, `get()`, `Display`, `FromStr`, `From<i64>` and
/// transparent serde implementations.
///
/// ```ignore
/// define_id! {
///     /// Doc comment for the ID type.
///     pub struct MyId;
/// }
/// ```
#[macro_export]
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        pub struct $name:ident;
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
            serde::Serialize, serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<i64>().map(Self)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }
    };
}

define_id! {
    /// Telegram user id of an authorized operator.
    pub struct AdminId;
}

define_id! {
    /// Primary key of a team.
    pub struct TeamId;
}

define_id! {
    /// Primary key of a player.
    pub struct PlayerId;
}

define_id! {
    /// Primary key of a tournament.
    pub struct TournamentId;
}

define_id! {
    /// Primary key of a match.
    pub struct MatchId;
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
