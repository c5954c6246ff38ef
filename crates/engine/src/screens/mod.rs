// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Menu screens.
//!
//! Every screen is described by a [`ScreenRequest`]. [`Screens::render`]
//! loads what the screen needs, builds the Markdown text and keyboard, and
//! sends it. A screen with nothing to show may redirect with a notice
//! instead (an empty lineup has nobody to pick as goal scorer).

pub mod format;

mod events;
mod games;
mod lineup;
mod people;
mod rosters;
mod tournaments;

use crate::error::EngineError;
use crate::payload;
use crate::service::Club;
use cb_adapters::{Button, ChatAdapter, Keyboard, MessageRef};
use cb_core::{CardType, Clock, MatchId, NavEntry, PlayerId, TeamId, TournamentId};
use chrono_tz::Tz;

/// Items per page on paginated screens
pub const PER_PAGE: usize = 20;

/// A screen and the parameters it is drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenRequest {
    Help,
    Tournaments { page: u32 },
    Tournament { id: TournamentId },
    Teams,
    Team { id: TeamId },
    Players { page: u32 },
    Player { id: PlayerId, page: u32 },
    RosterTournaments,
    RosterTeams { tournament: TournamentId },
    Roster { tournament: TournamentId, team: TeamId },
    RosterAddPlayers { tournament: TournamentId, team: TeamId, page: u32 },
    GamesTournaments,
    GamesTeams { tournament: TournamentId },
    GamesMatches { tournament: TournamentId, team: TeamId },
    Match { id: MatchId },
    Lineup { game: MatchId },
    LineupAdd { game: MatchId, page: u32 },
    Events { game: MatchId },
    GoalScorer { game: MatchId },
    CardPlayer { game: MatchId },
    CardKind { game: MatchId, player: PlayerId },
    SubOff { game: MatchId },
    SubOn { game: MatchId, off: PlayerId },
}

impl ScreenRequest {
    /// The screen a remembered navigation frame redraws.
    ///
    /// Only list-like screens are ever pushed; anything else is `None`.
    pub fn from_nav(entry: &NavEntry) -> Option<Self> {
        let page = || entry.parse_param::<u32>("page").unwrap_or(1).max(1);
        let id = |key: &str| entry.parse_param::<i64>(key).filter(|v| *v > 0);
        Some(match entry.action.as_str() {
            "tournaments_page" => ScreenRequest::Tournaments { page: page() },
            "teams_menu" => ScreenRequest::Teams,
            "players_menu" => ScreenRequest::Players { page: page() },
            "games_open_team" => ScreenRequest::GamesMatches {
                tournament: TournamentId::new(id("t")?),
                team: TeamId::new(id("team")?),
            },
            "games_open_tournament" => ScreenRequest::GamesTeams {
                tournament: TournamentId::new(id("id")?),
            },
            "roster_open_tournament" => ScreenRequest::RosterTeams {
                tournament: TournamentId::new(id("id")?),
            },
            _ => return None,
        })
    }

    /// Screens that replace the pressed message rather than sending anew
    pub fn edits_in_place(&self) -> bool {
        matches!(self, ScreenRequest::Tournament { .. })
    }
}

/// Text and keyboard of a rendered screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub text: String,
    pub keyboard: Option<Keyboard>,
}

impl View {
    pub fn new(text: String, keyboard: Keyboard) -> Self {
        let keyboard = (!keyboard.is_empty()).then_some(keyboard);
        Self { text, keyboard }
    }
}

/// Outcome of building a screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    Show(View),
    /// Nothing to show: send `notice`, then draw `to` if given
    Redirect {
        notice: &'static str,
        to: Option<ScreenRequest>,
    },
}

/// The help line for `/start`
pub const HELP: &str =
    "Доступные разделы: /tournaments, /teams, /players, /tournament_rosters, /games.";

/// Builds and sends screens
#[derive(Clone)]
pub struct Screens<C, K> {
    club: Club,
    chat: C,
    clock: K,
    tz: Tz,
}

impl<C: ChatAdapter, K: Clock> Screens<C, K> {
    pub fn new(club: Club, chat: C, clock: K, tz: Tz) -> Self {
        Self {
            club,
            chat,
            clock,
            tz,
        }
    }

    /// Draw `req` in `chat_id`. `pressed` is the message whose button led
    /// here; screens that edit in place reuse it.
    pub async fn render(
        &self,
        chat_id: i64,
        pressed: Option<MessageRef>,
        req: ScreenRequest,
    ) -> Result<(), EngineError> {
        let mut next = Some(req);
        while let Some(req) = next.take() {
            match self.build(req).await? {
                Page::Show(view) => {
                    let target = pressed.filter(|_| req.edits_in_place());
                    self.show(chat_id, target, &view).await?;
                }
                Page::Redirect { notice, to } => {
                    self.chat.send(chat_id, notice, None).await?;
                    next = to;
                }
            }
        }
        Ok(())
    }

    /// Load and lay out a screen without sending it.
    pub async fn build(&self, req: ScreenRequest) -> Result<Page, EngineError> {
        match req {
            ScreenRequest::Help => Ok(Page::Show(View::new(HELP.to_string(), Keyboard::new()))),
            ScreenRequest::Tournaments { page } => self.tournaments(page).await,
            ScreenRequest::Tournament { id } => self.tournament(id).await,
            ScreenRequest::Teams => self.teams().await,
            ScreenRequest::Team { id } => self.team(id).await,
            ScreenRequest::Players { page } => self.players(page).await,
            ScreenRequest::Player { id, page } => self.player(id, page).await,
            ScreenRequest::RosterTournaments => self.roster_tournaments().await,
            ScreenRequest::RosterTeams { tournament } => self.roster_teams(tournament).await,
            ScreenRequest::Roster { tournament, team } => self.roster(tournament, team).await,
            ScreenRequest::RosterAddPlayers {
                tournament,
                team,
                page,
            } => self.roster_add_players(tournament, team, page).await,
            ScreenRequest::GamesTournaments => self.games_tournaments().await,
            ScreenRequest::GamesTeams { tournament } => self.games_teams(tournament).await,
            ScreenRequest::GamesMatches { tournament, team } => {
                self.games_matches(tournament, team).await
            }
            ScreenRequest::Match { id } => self.game(id).await,
            ScreenRequest::Lineup { game } => self.lineup(game).await,
            ScreenRequest::LineupAdd { game, page } => self.lineup_add(game, page).await,
            ScreenRequest::Events { game } => self.events(game).await,
            ScreenRequest::GoalScorer { game } => self.goal_scorer(game).await,
            ScreenRequest::CardPlayer { game } => self.card_player(game).await,
            ScreenRequest::CardKind { game, player } => Ok(self.card_kind(game, player)),
            ScreenRequest::SubOff { game } => self.sub_off(game).await,
            ScreenRequest::SubOn { game, off } => self.sub_on(game, off).await,
        }
    }

    async fn show(
        &self,
        chat_id: i64,
        target: Option<MessageRef>,
        view: &View,
    ) -> Result<(), EngineError> {
        if let Some(message) = target {
            match self.chat.edit(message, &view.text, view.keyboard.as_ref()).await {
                Ok(()) => return Ok(()),
                Err(e) => tracing::warn!(error = %e, "edit in place failed, sending instead"),
            }
        }
        self.chat
            .send(chat_id, &view.text, view.keyboard.as_ref())
            .await?;
        Ok(())
    }
}

/// Card types offered on the card screen, with their labels
pub(crate) const CARD_CHOICES: [(CardType, &str); 2] =
    [(CardType::Yellow, "🟨 Жёлтая"), (CardType::Red, "🟥 Красная")];

fn back_button() -> Button {
    payload::button("⬅ Назад", NavEntry::new("nav_back"))
}

/// `⬅ Назад` / `Вперёд ➡` row; empty when neither side exists.
fn pager(page: u32, has_next: bool, entry: impl Fn(u32) -> NavEntry) -> Vec<Button> {
    let mut row = Vec::new();
    if page > 1 {
        row.push(payload::button("⬅ Назад", entry(page - 1)));
    }
    if has_next {
        row.push(payload::button("Вперёд ➡", entry(page + 1)));
    }
    row
}

#[cfg(test)]
#[path = "../screens_tests/mod.rs"]
mod tests;
