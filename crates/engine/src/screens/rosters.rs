// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tournament rosters: which players a team entered for a tournament

use super::format::{self, escape};
use super::{back_button, pager, Page, Screens, View, PER_PAGE};
use crate::error::EngineError;
use crate::payload::button;
use cb_adapters::{ChatAdapter, Keyboard};
use cb_core::{Clock, NavEntry, Team, TeamId, TournamentId};
use std::collections::HashSet;
use std::fmt::Write;

fn team_entry(action: &str, tournament: TournamentId, team: TeamId) -> NavEntry {
    NavEntry::new(action).with("t", tournament).with("team", team)
}

impl<C: ChatAdapter, K: Clock> Screens<C, K> {
    pub(super) async fn roster_tournaments(&self) -> Result<Page, EngineError> {
        let tournaments = self.club.tournaments(None).await?;

        let mut text = String::from("*Заявки — выберите турнир*\n");
        if tournaments.is_empty() {
            text.push_str("Турниров пока нет.");
        }
        let mut keyboard = Keyboard::new();
        for t in &tournaments {
            keyboard = keyboard.row(vec![button(
                format!("{} ({})", t.name, t.status),
                NavEntry::new("roster_open_tournament").with("id", t.id),
            )]);
        }
        Ok(Page::Show(View::new(text, keyboard)))
    }

    /// Entered teams first, then active teams that could still enter.
    pub(super) async fn roster_teams(&self, tournament: TournamentId) -> Result<Page, EngineError> {
        let teams = self.club.tournament_teams(tournament).await?;
        let entered: HashSet<TeamId> = teams.iter().map(|t| t.team_id).collect();
        let mut available: Vec<Team> = match self.club.active_teams().await {
            Ok(all) => all.into_iter().filter(|t| !entered.contains(&t.id)).collect(),
            Err(e) => {
                tracing::warn!(tournament_id = %tournament, error = %e, "active teams unavailable");
                Vec::new()
            }
        };
        available.sort_by_key(|t| t.name.to_lowercase());

        let mut text = String::from("*Заявка — выберите команду*\n");
        if teams.is_empty() {
            text.push_str("В этом турнире пока нет заявленных команд.\n");
        }
        if !available.is_empty() {
            text.push_str("\n*Команды без заявки:*\n");
            for team in &available {
                let _ = writeln!(text, "- {}", escape(&team.name));
            }
            text.push_str("Нажмите, чтобы начать заполнять заявку.\n");
        }

        let mut keyboard = Keyboard::new();
        for team in &teams {
            keyboard = keyboard.row(vec![button(
                format!("{} (`{}`)", team.team_name, team.short_code),
                team_entry("roster_open_team", tournament, team.team_id),
            )]);
        }
        for team in &available {
            let label = if team.short_code.is_empty() {
                format!("➕ {}", team.name)
            } else {
                format!("➕ {} (`{}`)", team.name, team.short_code)
            };
            keyboard = keyboard.row(vec![button(
                label,
                team_entry("roster_open_team", tournament, team.id),
            )]);
        }
        keyboard = keyboard.row(vec![button("⬅ Назад", NavEntry::new("tournament_rosters"))]);
        Ok(Page::Show(View::new(text, keyboard)))
    }

    pub(super) async fn roster(
        &self,
        tournament: TournamentId,
        team: TeamId,
    ) -> Result<Page, EngineError> {
        let entries = self.club.roster(tournament, team).await?;

        let mut text = String::from("*Состав заявки*\n");
        if entries.is_empty() {
            text.push_str("Игроков пока нет.\n");
        }
        for entry in &entries {
            match entry.number {
                Some(n) => {
                    let _ = writeln!(text, "- #{n} {}", escape(&entry.player_name));
                }
                None => {
                    let _ = writeln!(text, "- {}", escape(&entry.player_name));
                }
            }
        }

        let mut keyboard = Keyboard::new().row(vec![button(
            "➕ Добавить игрока",
            team_entry("roster_add_player", tournament, team).with("page", 1),
        )]);
        for entry in &entries {
            let player = |action: &str| {
                team_entry(action, tournament, team).with("player", entry.player_id)
            };
            keyboard = keyboard.row(vec![
                button("✏ Номер", player("roster_change_number")),
                button("🗑 Удалить", player("roster_remove_player")),
            ]);
        }
        keyboard = keyboard.row(vec![back_button()]);
        Ok(Page::Show(View::new(text, keyboard)))
    }

    /// Player directory page with rostered players ticked off.
    pub(super) async fn roster_add_players(
        &self,
        tournament: TournamentId,
        team: TeamId,
        page: u32,
    ) -> Result<Page, EngineError> {
        let page = page.max(1);
        let rostered: HashSet<_> = self
            .club
            .roster(tournament, team)
            .await?
            .into_iter()
            .map(|e| e.player_id)
            .collect();
        let listing = self
            .club
            .players_page(i64::from(page), PER_PAGE as i64)
            .await?;

        let mut text = String::from("*Выберите игрока*\n");
        let mut keyboard = Keyboard::new();
        for p in &listing.players {
            if rostered.contains(&p.id) {
                let _ = writeln!(text, "✅ {}", escape(&p.full_name));
                continue;
            }
            let _ = writeln!(text, "- {}", escape(&p.full_name));
            keyboard = keyboard.row(vec![button(
                format!("➕ {}", format::label(&p.full_name)),
                team_entry("roster_add_pick", tournament, team).with("player", p.id),
            )]);
        }
        keyboard = keyboard
            .row(pager(page, listing.has_next, |p| {
                team_entry("roster_add_player", tournament, team).with("page", p)
            }))
            .row(vec![button(
                "⬅ К заявке",
                team_entry("roster_open_team", tournament, team),
            )]);
        Ok(Page::Show(View::new(text, keyboard)))
    }
}
