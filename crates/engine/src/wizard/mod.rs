// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Multi-step forms driven by free-text replies.
//!
//! A flow is an ordered list of [`Step`]s plus a commit that applies the
//! collected answers. The state machine is `(flow, step)`: a valid reply
//! moves the cursor forward by one, an invalid one leaves state untouched,
//! and the reply to the last step commits. What happens to the session
//! when the commit fails is chosen per flow with [`FailurePolicy`].

mod field;
mod runner;

pub use field::{
    parse_date, parse_time, parse_yes_no, FieldStep, Prompt, Rule, CLEAR, DATE_FORMAT, KEEP,
    TIME_FORMAT,
};
pub use runner::{WizardRunner, SAVE_FAILED};

use crate::error::EngineError;
use crate::screens::ScreenRequest;
use crate::service::Club;
use async_trait::async_trait;
use cb_core::{DomainError, WizardData, WizardState};
use chrono_tz::Tz;
use std::collections::HashMap;
use std::sync::Arc;

/// One question of a flow
pub trait Step: Send + Sync {
    fn prompt(&self, data: &WizardData) -> String;

    /// Validate a trimmed reply and record it. `Err` carries the message
    /// asking the admin to try again; `data` must be left as it was.
    fn accept(&self, input: &str, data: &mut WizardData) -> Result<(), String>;
}

/// What happens to the session when a flow's commit fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Drop the session; the admin starts over
    Clear,
    /// Stay on the last step so the admin can answer it again
    Keep,
}

/// What a flow's commit needs from the outside world
pub struct FlowContext<'a> {
    pub club: &'a Club,
    pub tz: Tz,
}

/// A successful commit: the confirmation and the screen to show next
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Committed {
    pub message: String,
    pub screen: Option<ScreenRequest>,
}

impl Committed {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            screen: None,
        }
    }

    pub fn then(mut self, screen: ScreenRequest) -> Self {
        self.screen = Some(screen);
        self
    }
}

#[async_trait]
pub trait Flow: Send + Sync {
    fn tag(&self) -> &'static str;

    fn steps(&self) -> &[Box<dyn Step>];

    fn failure_policy(&self) -> FailurePolicy {
        FailurePolicy::Clear
    }

    /// Shown before the error when the commit fails
    fn failure_prefix(&self) -> &'static str;

    /// Apply the collected answers.
    async fn commit(
        &self,
        ctx: &FlowContext<'_>,
        data: &WizardData,
    ) -> Result<Committed, DomainError>;
}

/// Result of feeding one reply to a wizard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// Invalid reply; state is unchanged
    Reject(String),
    /// Moved to the next step
    Advance(WizardState),
    /// Last step answered; `WizardState::data` is ready to commit
    Finish(WizardState),
}

/// Apply `input` to the current step without touching storage.
pub fn advance(flow: &dyn Flow, state: &WizardState, input: &str) -> Result<StepOutcome, EngineError> {
    let steps = flow.steps();
    let step = steps.get(state.step).ok_or_else(|| EngineError::StepOutOfRange {
        flow: state.flow.clone(),
        step: state.step,
    })?;

    let mut data = state.data.clone();
    if let Err(message) = step.accept(input.trim(), &mut data) {
        return Ok(StepOutcome::Reject(message));
    }

    let next = WizardState {
        flow: state.flow.clone(),
        step: state.step + 1,
        data,
    };
    if next.step >= steps.len() {
        Ok(StepOutcome::Finish(next))
    } else {
        Ok(StepOutcome::Advance(next))
    }
}

/// The prompt for the step `state` is waiting on
pub fn current_prompt(flow: &dyn Flow, state: &WizardState) -> Option<String> {
    flow.steps().get(state.step).map(|s| s.prompt(&state.data))
}

/// Flows by tag
#[derive(Clone, Default)]
pub struct FlowRegistry {
    flows: HashMap<&'static str, Arc<dyn Flow>>,
}

impl FlowRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, flow: impl Flow + 'static) -> Self {
        self.flows.insert(flow.tag(), Arc::new(flow));
        self
    }

    pub fn get(&self, tag: &str) -> Option<Arc<dyn Flow>> {
        self.flows.get(tag).cloned()
    }

    pub fn tags(&self) -> Vec<&'static str> {
        let mut tags: Vec<_> = self.flows.keys().copied().collect();
        tags.sort_unstable();
        tags
    }
}

#[cfg(test)]
#[path = "wizard_tests.rs"]
mod tests;
