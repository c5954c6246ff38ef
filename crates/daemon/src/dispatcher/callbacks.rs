// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Button routing.
//!
//! Each action either draws a screen, starts a wizard, or performs a
//! direct change followed by a refresh. The few screens reachable by
//! "back" push the entry that redraws their predecessor before rendering;
//! [`back_target`] holds that adjacency.

use super::{Dispatcher, BACK_FAILED, IN_DEVELOPMENT, NO_HISTORY};
use cb_adapters::{ChatAdapter, MessageRef};
use cb_core::{AdminId, CardType, Clock, MatchId, NavEntry, PlayerId, RosterKey, TeamId, TournamentId, WizardData};
use cb_engine::flows::*;
use cb_engine::{EngineError, ScreenRequest};
use cb_storage::SessionRepo;

const UNKNOWN_CARD: &str = "Неизвестный тип карточки.";
const SAME_PLAYERS: &str = "Игроки замены должны отличаться.";

/// Required positive id parameter
fn id<T: From<i64>>(entry: &NavEntry, key: &'static str) -> Result<T, EngineError> {
    entry
        .parse_param::<i64>(key)
        .filter(|v| *v > 0)
        .map(T::from)
        .ok_or(EngineError::BadField { field: key })
}

/// 1-based page; missing or nonsense means the first page
fn page(entry: &NavEntry) -> u32 {
    entry.parse_param::<u32>("page").unwrap_or(1).max(1)
}

fn roster_key(entry: &NavEntry) -> Result<RosterKey, EngineError> {
    Ok(RosterKey::new(id(entry, "t")?, id(entry, "team")?, id(entry, "player")?))
}

/// Screen adjacency for "back": the entry that redraws the screen a
/// press navigates away from. `None` for presses that leave no history.
pub(super) fn back_target(pressed: &NavEntry) -> Option<NavEntry> {
    let param = |key: &str| pressed.parse_param::<i64>(key);
    let entry = match pressed.action.as_str() {
        "open_tournament" => NavEntry::new("tournaments_page").with("page", page(pressed)),
        "team_open" => NavEntry::new("teams_menu"),
        "player_open" => NavEntry::new("players_menu").with("page", page(pressed)),
        "roster_open_team" => NavEntry::new("roster_open_tournament").with("id", param("t")?),
        "games_open_team" => NavEntry::new("games_open_tournament").with("id", param("t")?),
        "open_match" => NavEntry::new("games_open_team")
            .with("t", param("t")?)
            .with("team", param("team")?),
        _ => return None,
    };
    Some(entry)
}

impl<R: SessionRepo, C: ChatAdapter, K: Clock> Dispatcher<R, C, K> {
    /// Handle a pressed button. Returns the toast for the callback answer.
    pub(super) async fn route(
        &self,
        admin: AdminId,
        chat_id: i64,
        pressed: Option<MessageRef>,
        entry: &NavEntry,
    ) -> Result<Option<&'static str>, EngineError> {
        tracing::debug!(admin_id = %admin, action = %entry.action, "button pressed");
        match entry.action.as_str() {
            // Tournaments
            "tournaments_page" => self.show(chat_id, ScreenRequest::Tournaments { page: page(entry) }).await?,
            "open_tournament" => {
                let tournament = id(entry, "id")?;
                self.remember(admin, entry).await;
                self.screens
                    .render(chat_id, pressed, ScreenRequest::Tournament { id: tournament })
                    .await?;
            }
            "tournaments_start_create" => self.start(admin, chat_id, CREATE_TOURNAMENT, WizardData::new()).await?,
            "tournament_edit" => {
                let tournament = self.club.tournament(id(entry, "id")?).await?;
                self.start(admin, chat_id, EDIT_TOURNAMENT, edit_tournament_seed(&tournament))
                    .await?;
            }

            // Teams
            "teams_menu" => self.show(chat_id, ScreenRequest::Teams).await?,
            "team_open" => {
                let team = id(entry, "id")?;
                self.remember(admin, entry).await;
                self.show(chat_id, ScreenRequest::Team { id: team }).await?;
            }
            "teams_start_create" => self.start(admin, chat_id, CREATE_TEAM, WizardData::new()).await?,
            "team_edit" => {
                let team = self.club.team(id(entry, "id")?).await?;
                self.start(admin, chat_id, EDIT_TEAM, edit_team_seed(&team)).await?;
            }

            // Players
            "players_page" | "players_menu" => {
                self.show(chat_id, ScreenRequest::Players { page: page(entry) }).await?
            }
            "player_open" => {
                let player = id(entry, "id")?;
                let page = page(entry);
                self.remember(admin, entry).await;
                self.show(chat_id, ScreenRequest::Player { id: player, page }).await?;
            }
            "players_start_create" => self.start(admin, chat_id, CREATE_PLAYER, WizardData::new()).await?,
            "player_edit" => {
                let player = self.club.player(id(entry, "id")?).await?;
                self.start(admin, chat_id, EDIT_PLAYER, edit_player_seed(&player, page(entry)))
                    .await?;
            }

            // Rosters
            "tournament_rosters" => self.show(chat_id, ScreenRequest::RosterTournaments).await?,
            "roster_open_tournament" => {
                let tournament = id(entry, "id")?;
                self.show(chat_id, ScreenRequest::RosterTeams { tournament }).await?;
            }
            "roster_open_team" => {
                let tournament: TournamentId = id(entry, "t")?;
                let team: TeamId = id(entry, "team")?;
                self.remember(admin, entry).await;
                self.show(chat_id, ScreenRequest::Roster { tournament, team }).await?;
            }
            "roster_add_player" => {
                let screen = ScreenRequest::RosterAddPlayers {
                    tournament: id(entry, "t")?,
                    team: id(entry, "team")?,
                    page: page(entry),
                };
                self.show(chat_id, screen).await?;
            }
            "roster_add_pick" => {
                let key = roster_key(entry)?;
                self.start(admin, chat_id, ROSTER_ADD_PLAYER, roster_seed(key)).await?;
            }
            "roster_change_number" => {
                let key = roster_key(entry)?;
                self.start(admin, chat_id, ROSTER_CHANGE_NUMBER, roster_seed(key)).await?;
            }
            "roster_remove_player" => self.remove_from_roster(chat_id, roster_key(entry)?).await?,

            // Games
            "games" => self.show(chat_id, ScreenRequest::GamesTournaments).await?,
            "games_open_tournament" => {
                let tournament = id(entry, "id")?;
                self.show(chat_id, ScreenRequest::GamesTeams { tournament }).await?;
            }
            "games_open_team" => {
                let tournament: TournamentId = id(entry, "t")?;
                let team: TeamId = id(entry, "team")?;
                self.remember(admin, entry).await;
                self.show(chat_id, ScreenRequest::GamesMatches { tournament, team }).await?;
            }
            "match_start_create" => {
                let seed = match_create_seed(id(entry, "t")?, id(entry, "team")?);
                self.start(admin, chat_id, MATCH_CREATE, seed).await?;
            }
            "open_match" => {
                let game = self.club.game(id(entry, "id")?).await?;
                // The button carries only the match; its list comes from the record
                let pressed = entry
                    .clone()
                    .with("t", game.tournament_id)
                    .with("team", game.team_id);
                self.remember(admin, &pressed).await;
                self.show(chat_id, ScreenRequest::Match { id: game.id }).await?;
            }
            "match_edit" => {
                let game = self.club.game(id(entry, "id")?).await?;
                self.start(admin, chat_id, MATCH_EDIT, match_edit_seed(game.id)).await?;
            }
            "match_status_set" => {
                let status = entry.param("status").unwrap_or_default();
                self.set_match_status(chat_id, id(entry, "id")?, status).await?;
            }
            "match_scores_reset" => self.reset_scores(chat_id, id(entry, "id")?).await?,

            // Lineup
            "match_lineup_menu" => {
                let game = id(entry, "match")?;
                self.show(chat_id, ScreenRequest::Lineup { game }).await?;
            }
            "match_lineup_add" => {
                let screen = ScreenRequest::LineupAdd {
                    game: id(entry, "match")?,
                    page: page(entry),
                };
                self.show(chat_id, screen).await?;
            }
            "match_lineup_add_pick" => {
                self.add_to_lineup(chat_id, id(entry, "match")?, id(entry, "player")?)
                    .await?
            }
            "match_lineup_remove" => {
                self.remove_from_lineup(chat_id, id(entry, "match")?, id(entry, "player")?)
                    .await?
            }
            "match_lineup_role_toggle" => {
                self.toggle_role(chat_id, id(entry, "match")?, id(entry, "player")?)
                    .await?
            }
            "match_lineup_number" => {
                let seed = match_player_seed(id(entry, "match")?, id(entry, "player")?);
                self.start(admin, chat_id, LINEUP_NUMBER, seed).await?;
            }

            // Events
            "match_events_menu" => {
                let game = id(entry, "match")?;
                self.show(chat_id, ScreenRequest::Events { game }).await?;
            }
            "match_events_add_goal" => {
                let game = id(entry, "match")?;
                self.show(chat_id, ScreenRequest::GoalScorer { game }).await?;
            }
            "match_events_goal_pick" => {
                let seed = match_player_seed(id(entry, "match")?, id(entry, "player")?);
                self.start(admin, chat_id, EVENT_GOAL, seed).await?;
            }
            "match_events_add_card" => {
                let game = id(entry, "match")?;
                self.show(chat_id, ScreenRequest::CardPlayer { game }).await?;
            }
            "match_events_card_pick" => {
                let screen = ScreenRequest::CardKind {
                    game: id(entry, "match")?,
                    player: id(entry, "player")?,
                };
                self.show(chat_id, screen).await?;
            }
            "match_events_card_type" => {
                let game: MatchId = id(entry, "match")?;
                let player: PlayerId = id(entry, "player")?;
                let card = entry
                    .param("type")
                    .and_then(|t| t.to_ascii_lowercase().parse::<CardType>().ok());
                match card {
                    Some(card) => {
                        self.start(admin, chat_id, EVENT_CARD, card_seed(game, player, card))
                            .await?
                    }
                    None => self.say(chat_id, UNKNOWN_CARD).await?,
                }
            }
            "match_events_add_sub" => {
                let game = id(entry, "match")?;
                self.show(chat_id, ScreenRequest::SubOff { game }).await?;
            }
            "match_events_sub_pick_out" => {
                let screen = ScreenRequest::SubOn {
                    game: id(entry, "match")?,
                    off: id(entry, "player")?,
                };
                self.show(chat_id, screen).await?;
            }
            "match_events_sub_pick_in" => {
                let seed = sub_seed(id(entry, "match")?, id(entry, "out")?, id(entry, "player")?);
                match seed {
                    Some(seed) => self.start(admin, chat_id, EVENT_SUB, seed).await?,
                    None => self.say(chat_id, SAME_PLAYERS).await?,
                }
            }

            "nav_back" => self.back(admin, chat_id).await?,
            other => {
                tracing::debug!(admin_id = %admin, action = other, "unhandled button");
                return Ok(Some(IN_DEVELOPMENT));
            }
        }
        Ok(None)
    }

    /// Push the predecessor of `pressed`, if it has one.
    async fn remember(&self, admin: AdminId, pressed: &NavEntry) {
        if let Some(target) = back_target(pressed) {
            self.nav.push(admin, target).await;
        }
    }

    async fn start(
        &self,
        admin: AdminId,
        chat_id: i64,
        tag: &str,
        seed: WizardData,
    ) -> Result<(), EngineError> {
        self.runner.start(admin, chat_id, tag, seed).await
    }

    /// Pop one frame and redraw it.
    async fn back(&self, admin: AdminId, chat_id: i64) -> Result<(), EngineError> {
        let Some(entry) = self.nav.pop(admin).await else {
            return self.say(chat_id, NO_HISTORY).await;
        };
        match ScreenRequest::from_nav(&entry) {
            Some(screen) => self.show(chat_id, screen).await,
            None => {
                tracing::warn!(admin_id = %admin, action = %entry.action, "no screen for navigation entry");
                self.say(chat_id, BACK_FAILED).await
            }
        }
    }
}
