// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::format::{self, escape};
use super::{pager, Page, ScreenRequest, Screens, View, PER_PAGE};
use crate::error::EngineError;
use crate::payload::button;
use cb_adapters::{ChatAdapter, Keyboard};
use cb_core::{Clock, MatchId, NavEntry};
use std::collections::HashSet;
use std::fmt::Write;

impl<C: ChatAdapter, K: Clock> Screens<C, K> {
    pub(super) async fn lineup(&self, game: MatchId) -> Result<Page, EngineError> {
        let lineup = self.club.lineup(game).await?;

        let mut text = String::from("*Состав матча*\n");
        if lineup.is_empty() {
            text.push_str("Пока пусто.\n");
        }
        let mut keyboard = Keyboard::new().row(vec![button(
            "➕ Добавить из заявки",
            NavEntry::new("match_lineup_add").with("match", game).with("page", 1),
        )]);
        for entry in &lineup {
            text.push_str(&format::lineup_line(entry));
            let player = |action: &str| {
                NavEntry::new(action)
                    .with("match", game)
                    .with("player", entry.player_id)
            };
            keyboard = keyboard.row(vec![
                button("↕ Роль", player("match_lineup_role_toggle")),
                button("№", player("match_lineup_number")),
                button("🗑", player("match_lineup_remove")),
            ]);
        }
        keyboard = keyboard.row(vec![button(
            "⬅ К матчу",
            NavEntry::new("open_match").with("id", game),
        )]);
        Ok(Page::Show(View::new(text, keyboard)))
    }

    /// Roster players not yet in the lineup, paged.
    pub(super) async fn lineup_add(&self, game: MatchId, page: u32) -> Result<Page, EngineError> {
        let fixture = self.club.game(game).await?;
        let roster = self
            .club
            .roster(fixture.tournament_id, fixture.team_id)
            .await?;
        let taken: HashSet<_> = self
            .club
            .lineup(game)
            .await?
            .into_iter()
            .map(|l| l.player_id)
            .collect();
        let available: Vec<_> = roster
            .into_iter()
            .filter(|e| !taken.contains(&e.player_id))
            .collect();
        if available.is_empty() {
            return Ok(Page::Redirect {
                notice: "Все игроки заявки уже в составе.",
                to: Some(ScreenRequest::Lineup { game }),
            });
        }

        let (page, window) = format::page_window(available.len(), page, PER_PAGE);
        let has_next = window.end < available.len();
        let mut text = String::from("*Добавить в состав*\n");
        let mut keyboard = Keyboard::new();
        for entry in &available[window] {
            let title = match entry.number {
                Some(n) => format!("#{n} {}", entry.player_name),
                None => entry.player_name.clone(),
            };
            let _ = writeln!(text, "- {}", escape(&title));
            keyboard = keyboard.row(vec![button(
                format!("➕ {}", format::label(&entry.player_name)),
                NavEntry::new("match_lineup_add_pick")
                    .with("match", game)
                    .with("player", entry.player_id),
            )]);
        }
        keyboard = keyboard
            .row(pager(page, has_next, |p| {
                NavEntry::new("match_lineup_add").with("match", game).with("page", p)
            }))
            .row(vec![button(
                "⬅ К составу",
                NavEntry::new("match_lineup_menu").with("match", game),
            )]);
        Ok(Page::Show(View::new(text, keyboard)))
    }
}
