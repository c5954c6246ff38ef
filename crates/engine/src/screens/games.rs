// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fixtures: tournament → team → match card

use super::format::{self, escape};
use super::{back_button, Page, Screens, View};
use crate::error::EngineError;
use crate::payload::button;
use cb_adapters::{Button, ChatAdapter, Keyboard};
use cb_core::{Clock, Match, MatchId, MatchStatus, NavEntry, TeamId, TournamentId};
use std::fmt::Write;

/// `✅ План` for the current status, `⚪ Сыгран` for the others
fn status_button(game: &Match, target: MatchStatus) -> Button {
    let mark = if game.status == target { "✅" } else { "⚪" };
    button(
        format!("{mark} {}", format::match_status_label(target)),
        NavEntry::new("match_status_set")
            .with("id", game.id)
            .with("status", target),
    )
}

impl<C: ChatAdapter, K: Clock> Screens<C, K> {
    pub(super) async fn games_tournaments(&self) -> Result<Page, EngineError> {
        let tournaments = self.club.tournaments(None).await?;

        let mut text = String::from("*Матчи — выберите турнир*\n");
        if tournaments.is_empty() {
            text.push_str("Пока нет турниров.");
        }
        let mut keyboard = Keyboard::new();
        for t in &tournaments {
            keyboard = keyboard.row(vec![button(
                format!("{} ({})", t.name, t.status),
                NavEntry::new("games_open_tournament").with("id", t.id),
            )]);
        }
        Ok(Page::Show(View::new(text, keyboard)))
    }

    pub(super) async fn games_teams(&self, tournament: TournamentId) -> Result<Page, EngineError> {
        let teams = self.club.tournament_teams(tournament).await?;

        let mut text = String::from("*Матчи — выберите команду*\n");
        if teams.is_empty() {
            text.push_str("Нет команд с заявкой в этом турнире.");
        }
        let mut keyboard = Keyboard::new();
        for team in &teams {
            keyboard = keyboard.row(vec![button(
                team.team_name.clone(),
                NavEntry::new("games_open_team")
                    .with("t", tournament)
                    .with("team", team.team_id),
            )]);
        }
        keyboard = keyboard.row(vec![button("⬅ Назад", NavEntry::new("games"))]);
        Ok(Page::Show(View::new(text, keyboard)))
    }

    pub(super) async fn games_matches(
        &self,
        tournament: TournamentId,
        team: TeamId,
    ) -> Result<Page, EngineError> {
        let matches = self.club.matches(tournament, team).await?;

        let mut text = String::from("*Матчи команды*\n");
        if matches.is_empty() {
            text.push_str("Матчей пока нет.\n");
        }
        let mut keyboard = Keyboard::new();
        for m in &matches {
            let _ = writeln!(
                text,
                "- {} — {} ({})",
                format::kickoff(m.start_time, self.tz),
                escape(&m.opponent),
                m.status
            );
            keyboard = keyboard.row(vec![button(
                "Открыть матч",
                NavEntry::new("open_match").with("id", m.id),
            )]);
        }
        keyboard = keyboard
            .row(vec![button(
                "➕ Создать матч",
                NavEntry::new("match_start_create")
                    .with("t", tournament)
                    .with("team", team),
            )])
            .row(vec![back_button()]);
        Ok(Page::Show(View::new(text, keyboard)))
    }

    /// The match card: fixture, scores, lineup and events with the
    /// status switcher.
    pub(super) async fn game(&self, id: MatchId) -> Result<Page, EngineError> {
        let game = self.club.game(id).await?;
        let lineup = self.club.lineup(id).await?;
        let events = self.club.events(id).await?;

        let mut text = String::from("*Матч*\n");
        let _ = writeln!(
            text,
            "{} vs {}",
            format::kickoff_full(game.start_time, self.tz),
            escape(&game.opponent)
        );
        if let Some(location) = game.location.as_deref().filter(|l| !l.is_empty()) {
            let _ = writeln!(text, "Место: {}", escape(location));
        }
        let _ = writeln!(text, "Статус: {}", game.status);
        let scores = [
            ("HT", &game.score_ht),
            ("FT", &game.score_ft),
            ("ET", &game.score_et),
            ("PEN", &game.score_pen),
        ];
        for (label, score) in scores {
            if let Some(score) = score {
                let _ = writeln!(text, "{label}: {score}");
            }
        }
        if game.final_us.is_some() || game.final_them.is_some() {
            let _ = writeln!(
                text,
                "Итог: {}:{}",
                game.final_us.unwrap_or(0),
                game.final_them.unwrap_or(0)
            );
        }

        text.push_str("\n*Состав*\n");
        if lineup.is_empty() {
            text.push_str("Пока пусто.\n");
        }
        for entry in &lineup {
            text.push_str(&format::lineup_line(entry));
        }
        text.push_str("\n*События*\n");
        if events.is_empty() {
            text.push_str("Пока нет событий.\n");
        }
        for event in &events {
            text.push_str(&format::event_line(event));
        }

        let keyboard = Keyboard::new()
            .row(vec![button("✏ Редактировать", NavEntry::new("match_edit").with("id", id))])
            .row(
                MatchStatus::ALL
                    .iter()
                    .map(|s| status_button(&game, *s))
                    .collect(),
            )
            .row(vec![
                button("👥 Состав", NavEntry::new("match_lineup_menu").with("match", id)),
                button("⚽ События", NavEntry::new("match_events_menu").with("match", id)),
            ])
            .row(vec![button(
                "🔁 Сбросить счёт",
                NavEntry::new("match_scores_reset").with("id", id),
            )])
            .row(vec![back_button()]);
        Ok(Page::Show(View::new(text, keyboard)))
    }
}
