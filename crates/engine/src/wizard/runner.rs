// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Drives flows against session storage and the chat.

use super::{advance, current_prompt, FailurePolicy, Flow, FlowContext, FlowRegistry, StepOutcome};
use crate::error::EngineError;
use crate::navigation::Navigator;
use crate::screens::ScreenRequest;
use crate::service::Club;
use cb_adapters::ChatAdapter;
use cb_core::{AdminId, WizardData, WizardState};
use cb_storage::{SessionRepo, SessionStore};
use chrono_tz::Tz;
use std::sync::Arc;

/// Sent when the wizard state could not be stored
pub const SAVE_FAILED: &str = "Не удалось сохранить ответ. Повторите попытку.";

const SAVE_ATTEMPTS: u32 = 2;

/// Starts flows, feeds them replies and commits them
pub struct WizardRunner<R, C> {
    flows: FlowRegistry,
    store: SessionStore<R>,
    nav: Arc<Navigator<R>>,
    chat: C,
    club: Club,
    tz: Tz,
}

impl<R: SessionRepo, C: ChatAdapter> WizardRunner<R, C> {
    pub fn new(
        flows: FlowRegistry,
        store: SessionStore<R>,
        nav: Arc<Navigator<R>>,
        chat: C,
        club: Club,
        tz: Tz,
    ) -> Self {
        Self {
            flows,
            store,
            nav,
            chat,
            club,
            tz,
        }
    }

    pub fn flows(&self) -> &FlowRegistry {
        &self.flows
    }

    /// Begin `tag` with pre-seeded answers and ask the first question.
    pub async fn start(
        &self,
        admin: AdminId,
        chat_id: i64,
        tag: &str,
        data: WizardData,
    ) -> Result<(), EngineError> {
        let flow = self
            .flows
            .get(tag)
            .ok_or_else(|| EngineError::UnknownFlow(tag.to_string()))?;
        let state = WizardState::new(tag).with_data(data);
        if !self.save(admin, &state).await {
            self.chat.send(chat_id, SAVE_FAILED, None).await?;
            return Ok(());
        }
        tracing::info!(admin_id = %admin, flow = tag, "wizard started");
        if let Some(prompt) = current_prompt(flow.as_ref(), &state) {
            self.chat.send(chat_id, &prompt, None).await?;
        }
        Ok(())
    }

    /// Feed a free-text reply to the admin's wizard.
    ///
    /// Returns the screen to show after a successful commit.
    pub async fn reply(
        &self,
        admin: AdminId,
        chat_id: i64,
        state: &WizardState,
        text: &str,
    ) -> Result<Option<ScreenRequest>, EngineError> {
        let flow = match self.flows.get(&state.flow) {
            Some(flow) if state.step < flow.steps().len() => flow,
            _ => {
                tracing::warn!(admin_id = %admin, flow = %state.flow, step = state.step, "dropping unusable wizard");
                self.clear(admin).await;
                return Ok(None);
            }
        };

        match advance(flow.as_ref(), state, text)? {
            StepOutcome::Reject(message) => {
                tracing::debug!(admin_id = %admin, flow = %state.flow, step = state.step, "reply rejected");
                self.chat.send(chat_id, &message, None).await?;
                Ok(None)
            }
            StepOutcome::Advance(next) => {
                if !self.save(admin, &next).await {
                    self.chat.send(chat_id, SAVE_FAILED, None).await?;
                    return Ok(None);
                }
                if let Some(prompt) = current_prompt(flow.as_ref(), &next) {
                    self.chat.send(chat_id, &prompt, None).await?;
                }
                Ok(None)
            }
            StepOutcome::Finish(done) => self.commit(admin, chat_id, flow.as_ref(), state, &done).await,
        }
    }

    async fn commit(
        &self,
        admin: AdminId,
        chat_id: i64,
        flow: &dyn Flow,
        before: &WizardState,
        done: &WizardState,
    ) -> Result<Option<ScreenRequest>, EngineError> {
        let ctx = FlowContext {
            club: &self.club,
            tz: self.tz,
        };
        match flow.commit(&ctx, &done.data).await {
            Ok(committed) => {
                self.clear(admin).await;
                tracing::info!(admin_id = %admin, flow = flow.tag(), status = "ok", "wizard committed");
                self.chat.send(chat_id, &committed.message, None).await?;
                Ok(committed.screen)
            }
            Err(e) => {
                let policy = flow.failure_policy();
                tracing::info!(admin_id = %admin, flow = flow.tag(), ?policy, error = %e, "wizard commit failed");
                let message = format!("{}: {e}", flow.failure_prefix());
                if policy == FailurePolicy::Clear {
                    self.clear(admin).await;
                }
                self.chat.send(chat_id, &message, None).await?;
                if policy == FailurePolicy::Keep {
                    if let Some(prompt) = current_prompt(flow, before) {
                        self.chat.send(chat_id, &prompt, None).await?;
                    }
                }
                Ok(None)
            }
        }
    }

    /// Drop the admin's session row along with the in-memory history.
    pub async fn clear(&self, admin: AdminId) {
        if let Err(e) = self.store.clear(admin).await {
            tracing::error!(admin_id = %admin, error = %e, "session clear failed");
        }
        self.nav.discard(admin);
    }

    /// Persist the wizard next to the current navigation stack, retrying
    /// once. `false` when both attempts failed.
    async fn save(&self, admin: AdminId, state: &WizardState) -> bool {
        let nav = self.nav.snapshot(admin);
        for attempt in 1..=SAVE_ATTEMPTS {
            match self
                .store
                .save(admin, Some(&state.flow), Some(state), &nav)
                .await
            {
                Ok(()) => return true,
                Err(e) => {
                    tracing::warn!(admin_id = %admin, flow = %state.flow, attempt, error = %e, "wizard save failed")
                }
            }
        }
        tracing::error!(admin_id = %admin, flow = %state.flow, step = state.step, "wizard answer lost");
        false
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
