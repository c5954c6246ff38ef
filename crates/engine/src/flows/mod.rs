// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The club's wizards.
//!
//! Each flow lives under its tag in the session record, so tags are part
//! of the stored format and must not be renamed. Flows that need context
//! (which tournament, which player) are started with seed data built by
//! the `*_seed` functions here; edit flows also stash the current values
//! as `orig_*` so prompts can show them.

mod events;
mod matches;
mod people;
mod rosters;
mod tournaments;

pub use events::{EventCard, EventGoal, EventSub, LineupNumber};
pub use matches::{parse_scores, MatchCreate, MatchEdit, Scores};
pub use people::{CreatePlayer, CreateTeam, EditPlayer, EditTeam};
pub use rosters::{RosterAddPlayer, RosterChangeNumber};
pub use tournaments::{CreateTournament, EditTournament};

use crate::wizard::{FlowRegistry, DATE_FORMAT};
use cb_core::{
    CardType, DomainError, MatchId, Patch, Player, PlayerId, RosterKey, Team, TeamId, Tournament,
    TournamentId, WizardData,
};
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

pub const CREATE_TOURNAMENT: &str = "create_tournament";
pub const EDIT_TOURNAMENT: &str = "edit_tournament";
pub const CREATE_TEAM: &str = "create_team";
pub const EDIT_TEAM: &str = "edit_team";
pub const CREATE_PLAYER: &str = "create_player";
pub const EDIT_PLAYER: &str = "edit_player";
pub const ROSTER_ADD_PLAYER: &str = "roster_add_player";
pub const ROSTER_CHANGE_NUMBER: &str = "roster_change_number";
pub const MATCH_CREATE: &str = "match_create";
pub const MATCH_EDIT: &str = "match_edit";
pub const LINEUP_NUMBER: &str = "lineup_number";
pub const EVENT_GOAL: &str = "event_goal";
pub const EVENT_CARD: &str = "event_card";
pub const EVENT_SUB: &str = "event_sub";

/// Every club flow, ready to hand to a runner
pub fn registry() -> FlowRegistry {
    FlowRegistry::new()
        .register(CreateTournament::default())
        .register(EditTournament::default())
        .register(CreateTeam::default())
        .register(EditTeam::default())
        .register(CreatePlayer::default())
        .register(EditPlayer::default())
        .register(RosterAddPlayer::default())
        .register(RosterChangeNumber::default())
        .register(MatchCreate::default())
        .register(MatchEdit::default())
        .register(LineupNumber::default())
        .register(EventGoal::default())
        .register(EventCard::default())
        .register(EventSub::default())
}

// ── Seeds ───────────────────────────────────────────────────────────────────

fn stash(data: &mut WizardData, key: &str, value: Option<String>) {
    if let Some(value) = value {
        data.set(key, value);
    }
}

fn format_date(d: NaiveDate) -> String {
    d.format(DATE_FORMAT).to_string()
}

pub fn edit_tournament_seed(t: &Tournament) -> WizardData {
    let mut data: WizardData = [
        ("id", t.id.to_string()),
        ("orig_name", t.name.clone()),
        ("orig_status", t.status.to_string()),
    ]
    .into_iter()
    .collect();
    stash(&mut data, "orig_type", t.kind.clone());
    stash(&mut data, "orig_start", t.start_date.map(format_date));
    stash(&mut data, "orig_end", t.end_date.map(format_date));
    stash(&mut data, "orig_note", t.note.clone());
    data
}

pub fn edit_team_seed(team: &Team) -> WizardData {
    let mut data: WizardData = [("id", team.id.to_string()), ("orig_name", team.name.clone())]
        .into_iter()
        .collect();
    stash(&mut data, "orig_note", team.note.clone());
    data
}

/// `page` is the player list page to return to.
pub fn edit_player_seed(player: &Player, page: u32) -> WizardData {
    let mut data: WizardData = [
        ("id", player.id.to_string()),
        ("return_page", page.max(1).to_string()),
        ("orig_name", player.full_name.clone()),
        ("orig_active", player.active.to_string()),
    ]
    .into_iter()
    .collect();
    stash(&mut data, "orig_birth", player.birth_date.map(format_date));
    stash(&mut data, "orig_position", player.position.clone());
    stash(&mut data, "orig_note", player.note.clone());
    data
}

pub fn roster_seed(key: RosterKey) -> WizardData {
    [
        ("tournament_id", key.tournament_id.to_string()),
        ("team_id", key.team_id.to_string()),
        ("player_id", key.player_id.to_string()),
    ]
    .into_iter()
    .collect()
}

pub fn match_create_seed(tournament: TournamentId, team: TeamId) -> WizardData {
    [
        ("tournament_id", tournament.to_string()),
        ("team_id", team.to_string()),
    ]
    .into_iter()
    .collect()
}

pub fn match_edit_seed(game: MatchId) -> WizardData {
    [("match_id", game.to_string())].into_iter().collect()
}

/// Seed for `lineup_number` and `event_goal`
pub fn match_player_seed(game: MatchId, player: PlayerId) -> WizardData {
    [("match_id", game.to_string()), ("player_id", player.to_string())]
        .into_iter()
        .collect()
}

pub fn card_seed(game: MatchId, player: PlayerId, card: CardType) -> WizardData {
    let mut data = match_player_seed(game, player);
    data.set("card_type", card.as_str());
    data
}

/// `None` when a player would be swapped for themselves.
pub fn sub_seed(game: MatchId, off: PlayerId, on: PlayerId) -> Option<WizardData> {
    if off == on {
        return None;
    }
    Some(
        [
            ("match_id", game.to_string()),
            ("out_id", off.to_string()),
            ("in_id", on.to_string()),
        ]
        .into_iter()
        .collect(),
    )
}

// ── Reading answers back ────────────────────────────────────────────────────

/// A positive id stashed when the flow started
fn id<T: From<i64>>(data: &WizardData, key: &'static str) -> Result<T, DomainError> {
    data.parse::<i64>(key)
        .filter(|v| *v > 0)
        .map(T::from)
        .ok_or_else(|| DomainError::validation(key))
}

/// A non-blank answer
fn text(data: &WizardData, key: &str) -> Option<String> {
    data.get(key).filter(|v| !v.is_empty()).map(str::to_string)
}

/// A replacement value in an edit flow; clearing is not allowed for the field
fn replacement(data: &WizardData, key: &str) -> Option<String> {
    match data.patch(key) {
        Patch::Set(v) if !v.is_empty() => Some(v.to_string()),
        _ => None,
    }
}

fn text_patch(data: &WizardData, key: &str) -> Patch<String> {
    data.patch(key).map(str::to_string)
}

fn parse_answer<T: std::str::FromStr>(value: &str, field: &'static str) -> Result<T, DomainError> {
    value.parse().map_err(|_| DomainError::validation(field))
}

fn date(value: &str, field: &'static str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| DomainError::validation(field))
}

fn date_patch(data: &WizardData, key: &'static str) -> Result<Patch<NaiveDate>, DomainError> {
    data.patch(key).try_map(|v| date(v, key))
}

fn optional_date(data: &WizardData, key: &'static str) -> Result<Option<NaiveDate>, DomainError> {
    data.get(key).map(|v| date(v, key)).transpose()
}

/// A number answer where both skip and clear mean "no number"
fn optional_number(data: &WizardData, key: &'static str) -> Result<Option<i32>, DomainError> {
    match data.patch(key) {
        Patch::Set(v) => parse_answer(v, key).map(Some),
        Patch::Unchanged | Patch::Cleared => Ok(None),
    }
}

/// Interpret a wall-clock date and time in the club timezone.
///
/// Times that fall in a DST gap are rejected; ambiguous ones take the
/// earlier instant.
pub(crate) fn local_to_utc(tz: Tz, date: NaiveDate, time: NaiveTime) -> Result<DateTime<Utc>, DomainError> {
    tz.from_local_datetime(&date.and_time(time))
        .earliest()
        .map(|t| t.with_timezone(&Utc))
        .ok_or_else(|| DomainError::validation("start_time"))
}

#[cfg(test)]
#[path = "../flows_tests/mod.rs"]
mod tests;
