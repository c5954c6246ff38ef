// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{
    LineupEntry, LineupRole, Match, MatchId, MatchStatus, NavEntry, NewMatch, NewPlayer, NewTeam,
    NewTournament, PlayerId, TeamId, TournamentId, TournamentStatus,
};
use chrono::{DateTime, TimeZone, Utc};

// ── Record factories ────────────────────────────────────────────────────────

pub fn new_team(name: &str, short_code: &str) -> NewTeam {
    NewTeam {
        name: name.to_string(),
        short_code: short_code.to_string(),
        active: true,
        note: None,
    }
}

pub fn new_player(full_name: &str) -> NewPlayer {
    NewPlayer {
        full_name: full_name.to_string(),
        birth_date: None,
        position: None,
        active: true,
        note: None,
    }
}

pub fn new_tournament(name: &str) -> NewTournament {
    NewTournament {
        name: name.to_string(),
        kind: None,
        status: TournamentStatus::Planned,
        start_date: None,
        end_date: None,
        note: None,
    }
}

pub fn new_match(tournament: TournamentId, team: TeamId, opponent: &str, start: DateTime<Utc>) -> NewMatch {
    NewMatch {
        tournament_id: tournament,
        team_id: team,
        opponent: opponent.to_string(),
        start_time: start,
        location: None,
        status: MatchStatus::Scheduled,
    }
}

/// A scheduled match with no scores, for rendering tests.
pub fn scheduled_match(id: i64, opponent: &str, start: DateTime<Utc>) -> Match {
    Match {
        id: MatchId::new(id),
        tournament_id: TournamentId::new(1),
        team_id: TeamId::new(1),
        opponent: opponent.to_string(),
        start_time: start,
        location: None,
        status: MatchStatus::Scheduled,
        score_ht: None,
        score_ft: None,
        score_et: None,
        score_pen: None,
        final_us: None,
        final_them: None,
    }
}

pub fn lineup_entry(match_id: i64, player_id: i64, name: &str, role: LineupRole) -> LineupEntry {
    LineupEntry {
        match_id: MatchId::new(match_id),
        player_id: PlayerId::new(player_id),
        player_name: name.to_string(),
        roster_number: None,
        role,
        number_override: None,
        note: None,
    }
}

// ── Navigation ──────────────────────────────────────────────────────────────

pub fn page_entry(action: &str, page: u32) -> NavEntry {
    NavEntry::new(action).with("page", page)
}

// ── Time ────────────────────────────────────────────────────────────────────

/// UTC timestamp helper that never panics on valid literals.
pub fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0)
        .single()
        .unwrap_or_default()
}
