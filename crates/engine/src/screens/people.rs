// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Team and player directories

use super::format::{self, escape};
use super::{back_button, pager, Page, Screens, View, PER_PAGE};
use crate::error::EngineError;
use crate::payload::button;
use cb_adapters::{ChatAdapter, Keyboard};
use cb_core::{Clock, NavEntry, PlayerId, TeamId};
use std::fmt::Write;

impl<C: ChatAdapter, K: Clock> Screens<C, K> {
    pub(super) async fn teams(&self) -> Result<Page, EngineError> {
        let teams = self.club.active_teams().await?;

        let mut text = String::from("*Команды*\n");
        if teams.is_empty() {
            text.push_str("Активных команд пока нет.\n");
        }
        let mut keyboard = Keyboard::new();
        for team in &teams {
            keyboard = keyboard.row(vec![button(
                format!("{} ({})", team.name, team.short_code),
                NavEntry::new("team_open").with("id", team.id),
            )]);
        }
        keyboard = keyboard.row(vec![button(
            "➕ Создать команду",
            NavEntry::new("teams_start_create"),
        )]);
        Ok(Page::Show(View::new(text, keyboard)))
    }

    pub(super) async fn team(&self, id: TeamId) -> Result<Page, EngineError> {
        let team = self.club.team(id).await?;

        let mut text = format!("*{}*\n", escape(&team.name));
        let _ = writeln!(text, "Код: `{}`", escape(&team.short_code));
        let status = if team.active { "Активна" } else { "Неактивна" };
        let _ = writeln!(text, "Статус: {status}");
        if let Some(note) = team.note.as_deref().filter(|n| !n.is_empty()) {
            let _ = writeln!(text, "Заметка: {}", escape(note));
        }

        match self.club.tournaments(None).await {
            Ok(tournaments) => {
                let mut participation = String::new();
                for t in &tournaments {
                    match self.club.roster(t.id, id).await {
                        Ok(roster) if !roster.is_empty() => {
                            let _ = writeln!(
                                participation,
                                "- {} ({} игроков)",
                                escape(&t.name),
                                roster.len()
                            );
                        }
                        _ => {}
                    }
                }
                if !participation.is_empty() {
                    text.push_str("\n*Участие в турнирах:*\n");
                    text.push_str(&participation);
                }

                let pairs: Vec<_> = tournaments.iter().map(|t| (t.id, id, t.name.clone())).collect();
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
            Err(e) => tracing::warn!(team_id = %id, error = %e, "team participation unavailable"),
        }

        let keyboard = Keyboard::new()
            .row(vec![button("✏ Редактировать", NavEntry::new("team_edit").with("id", id))])
            .row(vec![back_button()]);
        Ok(Page::Show(View::new(text, keyboard)))
    }

    /// One page of the player directory. The pager sits on top so it stays
    /// reachable on long pages.
    pub(super) async fn players(&self, page: u32) -> Result<Page, EngineError> {
        let page = page.max(1);
        let listing = self
            .club
            .players_page(i64::from(page), PER_PAGE as i64)
            .await?;

        let mut text = format!("*Игроки — страница {page}*\n");
        if listing.players.is_empty() {
            text.push_str("Пока пусто.");
        }
        let mut keyboard = Keyboard::new()
            .row(pager(page, listing.has_next, |p| {
                NavEntry::new("players_page").with("page", p)
            }))
            .row(vec![button("➕ Создать игрока", NavEntry::new("players_start_create"))]);
        for p in &listing.players {
            text.push_str("- ");
            text.push_str(&escape(&p.full_name));
            if let Some(position) = &p.position {
                let _ = write!(text, " ({})", escape(position));
            }
            text.push('\n');
            keyboard = keyboard.row(vec![button(
                format!("Открыть {}", format::label(&p.full_name)),
                NavEntry::new("player_open").with("id", p.id).with("page", page),
            )]);
        }
        Ok(Page::Show(View::new(text, keyboard)))
    }

    pub(super) async fn player(&self, id: PlayerId, page: u32) -> Result<Page, EngineError> {
        let player = self.club.player(id).await?;
        let assignments = self.club.player_assignments(id).await.unwrap_or_else(|e| {
            tracing::warn!(player_id = %id, error = %e, "player assignments unavailable");
            Vec::new()
        });

        let mut text = format!("*{}*\n", escape(&player.full_name));
        if let Some(d) = player.birth_date {
            let _ = writeln!(text, "Дата рождения: {}", format::date(d));
        }
        if let Some(position) = player.position.as_deref().filter(|p| !p.is_empty()) {
            let _ = writeln!(text, "Позиция: {}", escape(position));
        }
        let status = if player.active { "Активен" } else { "Неактивен" };
        let _ = writeln!(text, "Статус: {status}");
        if let Some(note) = player.note.as_deref().filter(|n| !n.is_empty()) {
            let _ = writeln!(text, "Заметка: {}", escape(note));
        }
        if !assignments.is_empty() {
            text.push_str("\n*Заявки:*\n");
            for a in &assignments {
                let _ = write!(
                    text,
                    "- Турнир #{}, Команда {}",
                    a.tournament_id,
                    escape(&a.team_name)
                );
                if let Some(n) = a.number {
                    let _ = write!(text, ", № {n}");
                }
                text.push('\n');
            }
        }

        let keyboard = Keyboard::new()
            .row(vec![button(
                "✏ Редактировать",
                NavEntry::new("player_edit").with("id", id).with("page", page.max(1)),
            )])
            .row(vec![back_button()]);
        Ok(Page::Show(View::new(text, keyboard)))
    }
}
