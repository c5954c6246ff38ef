// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::format::{self, escape};
use super::{back_button, pager, Page, Screens, View, PER_PAGE};
use crate::error::EngineError;
use crate::payload::button;
use cb_adapters::{ChatAdapter, Keyboard};
use cb_core::{Clock, NavEntry, TournamentId};
use std::fmt::Write;

impl<C: ChatAdapter, K: Clock> Screens<C, K> {
    /// Paged list of every tournament. Pagination only appears once the
    /// list outgrows a page.
    pub(super) async fn tournaments(&self, page: u32) -> Result<Page, EngineError> {
        let tournaments = self.club.tournaments(None).await?;
        let (page, window) = format::page_window(tournaments.len(), page, PER_PAGE);
        let shown = &tournaments[window.clone()];

        let mut text = String::from("*Турниры*\n");
        if tournaments.is_empty() {
            text.push_str("Нет турниров. Нажмите кнопку, чтобы создать.\n");
        }
        for t in shown {
            let _ = writeln!(text, "- {} ({})", escape(&t.name), t.status);
        }

        let mut keyboard = Keyboard::new();
        for t in shown {
            keyboard = keyboard.row(vec![button(
                format!("Открыть {}", t.name),
                NavEntry::new("open_tournament").with("id", t.id).with("page", page),
            )]);
        }
        if tournaments.len() > PER_PAGE {
            let has_next = window.end < tournaments.len();
            keyboard = keyboard.row(pager(page, has_next, |p| {
                NavEntry::new("tournaments_page").with("page", p)
            }));
        }
        keyboard = keyboard.row(vec![button(
            "➕ Создать турнир",
            NavEntry::new("tournaments_start_create"),
        )]);
        Ok(Page::Show(View::new(text, keyboard)))
    }

    pub(super) async fn tournament(&self, id: TournamentId) -> Result<Page, EngineError> {
        let t = self.club.tournament(id).await?;

        let mut text = format!("*{}*\n", escape(&t.name));
        if let Some(kind) = &t.kind {
            let _ = writeln!(text, "_{}_", escape(kind));
        }
        let _ = writeln!(text, "Статус: {}", t.status);
        if let Some(d) = t.start_date {
            let _ = writeln!(text, "Старт: {}", format::date(d));
        }
        if let Some(d) = t.end_date {
            let _ = writeln!(text, "Финиш: {}", format::date(d));
        }
        if let Some(note) = t.note.as_deref().filter(|n| !n.is_empty()) {
            let _ = writeln!(text, "Заметка: {}", escape(note));
        }

        // Teams and fixtures are decoration; a failure here still shows the card.
        match self.club.tournament_teams(id).await {
            Ok(teams) if !teams.is_empty() => {
                text.push_str("\n*Команды в турнире:*\n");
                for team in &teams {
                    let _ = writeln!(text, "- {}", escape(&team.team_name));
                }
                let pairs: Vec<_> = teams
                    .iter()
                    .map(|team| (id, team.team_id, team.team_name.clone()))
                    .collect();
                let upcoming = self.club.upcoming(&pairs, self.clock.now()).await;
                if !upcoming.is_empty() {
                    text.push_str("\n*Ближайшие матчи:*\n");
                    for u in &upcoming {
                        let _ = writeln!(
                            text,
                            "- {} • {} vs {} ({})",
                            format::kickoff(u.game.start_time, self.tz),
                            escape(&u.context),
                            escape(&u.game.opponent),
                            format::match_status_label(u.game.status),
                        );
                    }
                }
            }
            Ok(_) => {}
            Err(e) => tracing::warn!(tournament_id = %id, error = %e, "tournament teams unavailable"),
        }

        let keyboard = Keyboard::new()
            .row(vec![button(
                "✏ Редактировать",
                NavEntry::new("tournament_edit").with("id", id),
            )])
            .row(vec![
                button("👥 Заявки", NavEntry::new("roster_open_tournament").with("id", id)),
                button("🏟 Матчи", NavEntry::new("games_open_tournament").with("id", id)),
            ])
            .row(vec![back_button()]);
        Ok(Page::Show(View::new(text, keyboard)))
    }
}
