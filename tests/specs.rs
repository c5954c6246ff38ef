//! Behavioral specifications for the club bot.
//!
//! Binary specs invoke `cb` and `clubbotd` and check stdout, stderr and
//! exit codes. Bot specs drive whole conversations through the dispatcher
//! with in-memory stores.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

#[path = "specs/prelude.rs"]
mod prelude;

// cli/
#[path = "specs/cli/errors.rs"]
mod cli_errors;
#[path = "specs/cli/help.rs"]
mod cli_help;

// daemon/
#[path = "specs/daemon/config.rs"]
mod daemon_config;
#[path = "specs/daemon/help.rs"]
mod daemon_help;

// bot/
#[path = "specs/bot/access.rs"]
mod bot_access;
#[path = "specs/bot/navigation.rs"]
mod bot_navigation;
#[path = "specs/bot/sessions.rs"]
mod bot_sessions;
#[path = "specs/bot/wizards.rs"]
mod bot_wizards;
