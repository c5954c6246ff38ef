// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Match events: the log and the player pickers that start event wizards

use super::format;
use super::{Page, Screens, View, CARD_CHOICES};
use crate::error::EngineError;
use crate::payload::button;
use cb_adapters::{Button, ChatAdapter, Keyboard};
use cb_core::{Clock, LineupEntry, MatchId, NavEntry, PlayerId};

const EMPTY_LINEUP: &str = "Добавьте игроков в состав перед фиксацией событий.";

fn events_back(game: MatchId) -> Button {
    button("⬅ Назад", NavEntry::new("match_events_menu").with("match", game))
}

/// One button per lineup player, then back to the events menu.
fn lineup_picker(title: &str, game: MatchId, lineup: &[LineupEntry], pick: NavEntry) -> View {
    let mut keyboard = Keyboard::new();
    for entry in lineup {
        keyboard = keyboard.row(vec![button(
            format::label(&entry.player_name),
            pick.clone().with("player", entry.player_id),
        )]);
    }
    View::new(title.to_string(), keyboard.row(vec![events_back(game)]))
}

impl<C: ChatAdapter, K: Clock> Screens<C, K> {
    pub(super) async fn events(&self, game: MatchId) -> Result<Page, EngineError> {
        let events = self.club.events(game).await?;

        let mut text = String::from("*События матча*\n");
        if events.is_empty() {
            text.push_str("Пока нет событий.\n");
        }
        for event in &events {
            text.push_str(&format::event_line(event));
        }
        let add = |action: &str| NavEntry::new(action).with("match", game);
        let keyboard = Keyboard::new()
            .row(vec![
                button("⚽ Гол", add("match_events_add_goal")),
                button("🟥 Карточка", add("match_events_add_card")),
                button("🔄 Замена", add("match_events_add_sub")),
            ])
            .row(vec![button("⬅ К матчу", NavEntry::new("open_match").with("id", game))]);
        Ok(Page::Show(View::new(text, keyboard)))
    }

    pub(super) async fn goal_scorer(&self, game: MatchId) -> Result<Page, EngineError> {
        let lineup = self.club.lineup(game).await?;
        if lineup.is_empty() {
            return Ok(Page::Redirect {
                notice: EMPTY_LINEUP,
                to: None,
            });
        }
        let pick = NavEntry::new("match_events_goal_pick").with("match", game);
        Ok(Page::Show(lineup_picker("Выберите автора гола:", game, &lineup, pick)))
    }

    pub(super) async fn card_player(&self, game: MatchId) -> Result<Page, EngineError> {
        let lineup = self.club.lineup(game).await?;
        if lineup.is_empty() {
            return Ok(Page::Redirect {
                notice: EMPTY_LINEUP,
                to: None,
            });
        }
        let pick = NavEntry::new("match_events_card_pick").with("match", game);
        Ok(Page::Show(lineup_picker(
            "Выберите игрока для карточки:",
            game,
            &lineup,
            pick,
        )))
    }

    pub(super) fn card_kind(&self, game: MatchId, player: PlayerId) -> Page {
        let row = CARD_CHOICES
            .iter()
            .map(|(card, label)| {
                button(
                    *label,
                    NavEntry::new("match_events_card_type")
                        .with("match", game)
                        .with("player", player)
                        .with("type", card),
                )
            })
            .collect();
        Page::Show(View::new(
            "Выберите тип карточки:".to_string(),
            Keyboard::new().row(row),
        ))
    }

    pub(super) async fn sub_off(&self, game: MatchId) -> Result<Page, EngineError> {
        let lineup = self.club.lineup(game).await?;
        if lineup.is_empty() {
            return Ok(Page::Redirect {
                notice: "Нет игроков в составе для замены.",
                to: None,
            });
        }
        let pick = NavEntry::new("match_events_sub_pick_out").with("match", game);
        Ok(Page::Show(lineup_picker(
            "Выберите игрока, который уходит:",
            game,
            &lineup,
            pick,
        )))
    }

    /// Anyone on the roster may come on, including players outside the
    /// lineup.
    pub(super) async fn sub_on(&self, game: MatchId, off: PlayerId) -> Result<Page, EngineError> {
        let fixture = self.club.game(game).await?;
        let roster = self
            .club
            .roster(fixture.tournament_id, fixture.team_id)
            .await?;

        let mut keyboard = Keyboard::new();
        for entry in &roster {
            keyboard = keyboard.row(vec![button(
                format::label(&entry.player_name),
                NavEntry::new("match_events_sub_pick_in")
                    .with("match", game)
                    .with("out", off)
                    .with("player", entry.player_id),
            )]);
        }
        Ok(Page::Show(View::new(
            "Выберите игрока, который выходит на поле:".to_string(),
            keyboard.row(vec![events_back(game)]),
        )))
    }
}
