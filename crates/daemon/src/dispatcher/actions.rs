// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! One-press changes: a confirmation (or the reason it failed) followed by
//! a refreshed screen.

use super::Dispatcher;
use cb_adapters::ChatAdapter;
use cb_core::{Clock, DomainError, LineupRole, MatchId, MatchPatch, MatchStatus, PlayerId, RosterKey};
use cb_engine::screens::format::match_status_label;
use cb_engine::{EngineError, ScreenRequest};
use cb_storage::SessionRepo;

impl<R: SessionRepo, C: ChatAdapter, K: Clock> Dispatcher<R, C, K> {
    /// New lineup slots start on the pitch.
    pub(super) async fn add_to_lineup(
        &self,
        chat_id: i64,
        game: MatchId,
        player: PlayerId,
    ) -> Result<(), EngineError> {
        match self.club.upsert_lineup(game, player, LineupRole::Start, None, None).await {
            Ok(()) => {
                self.say(chat_id, "Игрок добавлен в состав.").await?;
                self.show(chat_id, ScreenRequest::Lineup { game }).await
            }
            Err(e) => self.say(chat_id, &format!("Не удалось добавить игрока: {e}")).await,
        }
    }

    pub(super) async fn remove_from_lineup(
        &self,
        chat_id: i64,
        game: MatchId,
        player: PlayerId,
    ) -> Result<(), EngineError> {
        match self.club.remove_from_lineup(game, player).await {
            Ok(()) => {
                self.say(chat_id, "Игрок удалён из состава.").await?;
                self.show(chat_id, ScreenRequest::Lineup { game }).await
            }
            Err(e) => self.say(chat_id, &format!("Не удалось удалить игрока: {e}")).await,
        }
    }

    pub(super) async fn toggle_role(
        &self,
        chat_id: i64,
        game: MatchId,
        player: PlayerId,
    ) -> Result<(), EngineError> {
        match self.club.toggle_lineup_role(game, player).await {
            Ok(_) => {
                self.say(chat_id, "Роль обновлена.").await?;
                self.show(chat_id, ScreenRequest::Lineup { game }).await
            }
            Err(DomainError::NotFound("lineup entry")) => {
                self.say(chat_id, "Игрок не найден в составе.").await
            }
            Err(e) => self.say(chat_id, &format!("Не удалось изменить роль: {e}")).await,
        }
    }

    /// `status` comes straight from the button and is checked here.
    pub(super) async fn set_match_status(
        &self,
        chat_id: i64,
        game: MatchId,
        status: &str,
    ) -> Result<(), EngineError> {
        let Ok(status) = status.to_ascii_lowercase().parse::<MatchStatus>() else {
            return self.say(chat_id, "Неизвестный статус.").await;
        };
        let patch = MatchPatch {
            status: Some(status),
            ..MatchPatch::default()
        };
        match self.club.update_match(game, patch).await {
            Ok(()) => {
                let text = format!("Статус матча: {}", match_status_label(status));
                self.say(chat_id, &text).await?;
                self.show(chat_id, ScreenRequest::Match { id: game }).await
            }
            Err(e) => self.say(chat_id, &format!("Не удалось обновить статус: {e}")).await,
        }
    }

    pub(super) async fn reset_scores(&self, chat_id: i64, game: MatchId) -> Result<(), EngineError> {
        match self.club.reset_scores(game).await {
            Ok(()) => {
                self.say(chat_id, "Счёт матча сброшен.").await?;
                self.show(chat_id, ScreenRequest::Match { id: game }).await
            }
            Err(e) => self.say(chat_id, &format!("Не удалось сбросить счёт: {e}")).await,
        }
    }

    /// The roster is redrawn whether or not the removal worked.
    pub(super) async fn remove_from_roster(&self, chat_id: i64, key: RosterKey) -> Result<(), EngineError> {
        match self.club.remove_from_roster(key).await {
            Ok(()) => self.say(chat_id, "Игрок удалён из заявки.").await?,
            Err(e) => self.say(chat_id, &format!("Не удалось удалить игрока: {e}")).await?,
        }
        let screen = ScreenRequest::Roster {
            tournament: key.tournament_id,
            team: key.team_id,
        };
        self.show(chat_id, screen).await
    }
}
