// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! cb-core: Domain types for the club management bot

pub mod clock;
pub mod error;
pub mod game;
pub mod id;
pub mod nav;
pub mod pagination;
pub mod patch;
pub mod player;
pub mod roster;
pub mod session;
pub mod team;
pub mod time_fmt;
pub mod tournament;
pub mod wizard;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use clock::{Clock, FakeClock, SystemClock};
pub use error::{DomainError, ParseEnumError};
pub use game::{
    CardType, EventKind, LineupEntry, LineupPatch, LineupRole, Match, MatchEvent, MatchPatch,
    MatchStatus, NewMatch, NewMatchEvent,
};
pub use id::{AdminId, MatchId, PlayerId, TeamId, TournamentId};
pub use nav::NavEntry;
pub use pagination::{Pagination, DEFAULT_PER_PAGE, MAX_PER_PAGE};
pub use patch::Patch;
pub use player::{NewPlayer, Player, PlayerPatch};
pub use roster::{RosterAssignment, RosterEntry, RosterKey, TournamentTeam};
pub use session::SessionRecord;
pub use team::{NewTeam, Team, TeamPatch};
pub use time_fmt::format_age;
pub use tournament::{NewTournament, Tournament, TournamentPatch, TournamentStatus};
pub use wizard::{WizardData, WizardState};
