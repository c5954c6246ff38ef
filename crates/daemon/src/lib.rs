// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Club bot daemon library
//!
//! Configuration, logging and the update dispatcher used by `clubbotd`.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod config;
pub mod dispatcher;
pub mod logging;

pub use config::{Config, ConfigError, LogFormat};
pub use dispatcher::Dispatcher;
