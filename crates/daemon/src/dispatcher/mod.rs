// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Update dispatcher: the single entry point for inbound chat events.
//!
//! Every event is checked against the admin allow-list first. Commands
//! reset navigation and draw a top-level screen. Button presses are routed
//! by action tag (see `callbacks`). Other text only matters while a
//! wizard owns the conversation and is otherwise ignored.
//!
//! Failures never escape [`Dispatcher::handle`]: they are logged and the
//! admin is told something went wrong.

mod actions;
mod callbacks;

use cb_adapters::{ChatAdapter, Inbound, MessageRef};
use cb_core::{AdminId, Clock};
use cb_engine::flows;
use cb_engine::payload;
use cb_engine::{Club, EngineError, Navigator, ScreenRequest, Screens, WizardRunner};
use cb_storage::{LoadedSession, SessionRepo, SessionStore};
use chrono_tz::Tz;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

pub const NO_PERMISSION: &str = "У вас нет прав. Обратитесь к директору клуба.";
pub const NO_PERMISSION_BUTTON: &str = "Недостаточно прав";
pub const INVALID_BUTTON: &str = "Некорректная кнопка";
pub const IN_DEVELOPMENT: &str = "Функция в разработке";
pub const UNKNOWN_COMMAND: &str = "Неизвестная команда.";
pub const NO_HISTORY: &str = "История экранов пуста.";
pub const BACK_FAILED: &str = "Вернуться не удалось.";

/// Routes inbound events to screens, wizards and direct actions
pub struct Dispatcher<R, C, K> {
    admins: HashSet<AdminId>,
    store: SessionStore<R>,
    nav: Arc<Navigator<R>>,
    runner: WizardRunner<R, C>,
    screens: Screens<C, K>,
    club: Club,
    chat: C,
    clock: K,
    session_ttl: Option<Duration>,
}

impl<R: SessionRepo, C: ChatAdapter, K: Clock> Dispatcher<R, C, K> {
    pub fn new(
        admins: HashSet<AdminId>,
        sessions: R,
        club: Club,
        chat: C,
        clock: K,
        tz: Tz,
    ) -> Self {
        let store = SessionStore::new(sessions);
        let nav = Arc::new(Navigator::new(store.clone()));
        let runner = WizardRunner::new(
            flows::registry(),
            store.clone(),
            Arc::clone(&nav),
            chat.clone(),
            club.clone(),
            tz,
        );
        let screens = Screens::new(club.clone(), chat.clone(), clock.clone(), tz);
        Self {
            admins,
            store,
            nav,
            runner,
            screens,
            club,
            chat,
            clock,
            session_ttl: None,
        }
    }

    /// Drop wizards whose session row is older than `ttl`.
    pub fn with_session_ttl(mut self, ttl: Option<Duration>) -> Self {
        self.session_ttl = ttl;
        self
    }

    pub fn navigator(&self) -> &Navigator<R> {
        &self.nav
    }

    /// Handle one inbound event to completion.
    pub async fn handle(&self, inbound: Inbound) {
        let admin = inbound.sender();
        if !self.admins.contains(&admin) {
            tracing::info!(admin_id = %admin, "rejected update from unknown sender");
            self.deny(inbound).await;
            return;
        }

        match inbound {
            Inbound::Text { chat_id, text, .. } => {
                if let Err(e) = self.on_text(admin, chat_id, text.trim()).await {
                    self.report(admin, chat_id, "text", e).await;
                }
            }
            Inbound::Callback {
                callback_id,
                message,
                data,
                ..
            } => self.on_callback(admin, &callback_id, message, &data).await,
        }
    }

    async fn deny(&self, inbound: Inbound) {
        let result = match inbound {
            Inbound::Text { chat_id, .. } => self.chat.send(chat_id, NO_PERMISSION, None).await.map(drop),
            Inbound::Callback { callback_id, .. } => {
                self.chat
                    .answer_callback(&callback_id, Some(NO_PERMISSION_BUTTON))
                    .await
            }
        };
        if let Err(e) = result {
            tracing::warn!(error = %e, "permission notice not delivered");
        }
    }

    async fn on_text(&self, admin: AdminId, chat_id: i64, text: &str) -> Result<(), EngineError> {
        if let Some(command) = text.strip_prefix('/') {
            return self.on_command(admin, chat_id, command).await;
        }

        let session = self.store.load(admin).await?;
        self.nav.restore(admin, session.nav.clone());
        let Some(state) = session.active_wizard() else {
            return Ok(());
        };
        if self.is_stale(&session) {
            tracing::info!(admin_id = %admin, flow = %state.flow, "stale wizard dropped");
            self.runner.clear(admin).await;
            return Ok(());
        }

        if let Some(screen) = self.runner.reply(admin, chat_id, state, text).await? {
            self.screens.render(chat_id, None, screen).await?;
        }
        Ok(())
    }

    /// `/name@bot args` → `name`
    async fn on_command(&self, admin: AdminId, chat_id: i64, command: &str) -> Result<(), EngineError> {
        let name = command
            .split_whitespace()
            .next()
            .and_then(|c| c.split('@').next())
            .unwrap_or_default();

        // Commands reset navigation; a stored form stays resumable
        self.nav.ensure_loaded(admin).await;
        match self.store.load(admin).await {
            Ok(session) => {
                // Rewriting refreshes the row, so a stale form is not carried over
                let wizard = session.active_wizard().filter(|_| !self.is_stale(&session));
                self.nav.clear_keeping(admin, wizard).await;
            }
            Err(e) => {
                tracing::warn!(admin_id = %admin, error = %e, "session unreadable on command");
                self.nav.clear(admin).await;
            }
        }

        let screen = match name {
            "start" => ScreenRequest::Help,
            "tournaments" => ScreenRequest::Tournaments { page: 1 },
            "teams" => ScreenRequest::Teams,
            "players" => ScreenRequest::Players { page: 1 },
            "tournament_rosters" => ScreenRequest::RosterTournaments,
            "games" => ScreenRequest::GamesTournaments,
            _ => {
                tracing::debug!(admin_id = %admin, command = name, "unknown command");
                self.chat.send(chat_id, UNKNOWN_COMMAND, None).await?;
                return Ok(());
            }
        };
        self.screens.render(chat_id, None, screen).await
    }

    async fn on_callback(
        &self,
        admin: AdminId,
        callback_id: &str,
        message: Option<MessageRef>,
        data: &str,
    ) {
        let chat_id = message.map_or(admin.get(), |m| m.chat_id);
        let notice = match payload::parse(data) {
            Err(e) => {
                tracing::debug!(admin_id = %admin, data, error = %e, "unparseable button");
                Some(INVALID_BUTTON)
            }
            Ok(entry) => {
                self.nav.ensure_loaded(admin).await;
                match self.route(admin, chat_id, message, &entry).await {
                    Ok(notice) => notice,
                    Err(EngineError::BadField { field }) => {
                        tracing::debug!(admin_id = %admin, action = %entry.action, field, "button missing parameter");
                        Some(INVALID_BUTTON)
                    }
                    Err(e) => {
                        self.report(admin, chat_id, &entry.action, e).await;
                        None
                    }
                }
            }
        };
        if let Err(e) = self.chat.answer_callback(callback_id, notice).await {
            tracing::warn!(admin_id = %admin, error = %e, "callback answer failed");
        }
    }

    fn is_stale(&self, session: &LoadedSession) -> bool {
        let (Some(ttl), Some(updated_at)) = (self.session_ttl, session.updated_at) else {
            return false;
        };
        let age = self.clock.now() - updated_at;
        age.to_std().is_ok_and(|age| age > ttl)
    }

    async fn say(&self, chat_id: i64, text: &str) -> Result<(), EngineError> {
        self.chat.send(chat_id, text, None).await?;
        Ok(())
    }

    async fn show(&self, chat_id: i64, screen: ScreenRequest) -> Result<(), EngineError> {
        self.screens.render(chat_id, None, screen).await
    }

    /// Log a failed interaction and tell the admin.
    async fn report(&self, admin: AdminId, chat_id: i64, action: &str, error: EngineError) {
        match &error {
            EngineError::Domain(e) if e.is_validation() => {
                tracing::info!(admin_id = %admin, action, error = %error, "interaction rejected")
            }
            _ => tracing::error!(admin_id = %admin, action, error = %error, "interaction failed"),
        }
        let text = format!("Ошибка: {error}");
        if let Err(e) = self.chat.send(chat_id, &text, None).await {
            tracing::warn!(admin_id = %admin, error = %e, "failure notice not delivered");
        }
    }
}

#[cfg(test)]
#[path = "../dispatcher_tests/mod.rs"]
mod tests;
