// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Club bot engine: domain services, navigation, wizards and screens

mod error;
pub mod flows;
pub mod navigation;
pub mod payload;
pub mod screens;
pub mod service;
pub mod wizard;

pub use error::EngineError;
pub use navigation::{NavStacks, Navigator, MAX_DEPTH};
pub use payload::PayloadError;
pub use screens::{Page, ScreenRequest, Screens, View};
pub use service::{Club, PlayerPage, UpcomingMatch};
pub use wizard::{FlowRegistry, WizardRunner};
