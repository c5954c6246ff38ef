// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the engine

use cb_adapters::ChatError;
use cb_core::DomainError;
use cb_storage::StorageError;
use thiserror::Error;

/// Errors that can occur while handling an admin's interaction
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("session storage: {0}")]
    Session(#[from] StorageError),
    #[error("chat: {0}")]
    Chat(#[from] ChatError),
    #[error("flow not registered: {0}")]
    UnknownFlow(String),
    #[error("flow {flow} has no step {step}")]
    StepOutOfRange { flow: String, step: usize },
    #[error("wizard field {field} is missing or malformed")]
    BadField { field: &'static str },
}
