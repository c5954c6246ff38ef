// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[test]
fn clear_scores_touches_all_six_fields() {
    let mut patch = MatchPatch::default();
    assert!(patch.is_empty());
    patch.clear_scores();
    assert_eq!(patch.score_ht, Patch::Cleared);
    assert_eq!(patch.score_pen, Patch::Cleared);
    assert_eq!(patch.final_us, Patch::Cleared);
    assert_eq!(patch.final_them, Patch::Cleared);
    assert!(!patch.is_empty());
}

#[test]
fn lineup_role_toggles_both_ways() {
    assert_eq!(LineupRole::Start.toggled(), LineupRole::Sub);
    assert_eq!(LineupRole::Sub.toggled(), LineupRole::Start);
}

#[parameterized(
    override_wins = { Some(9), Some(7), Some(7) },
    roster_fallback = { Some(9), None, Some(9) },
    neither = { None, None, None },
)]
fn shirt_number_prefers_override(roster: Option<i32>, over: Option<i32>, expected: Option<i32>) {
    let entry = LineupEntry {
        match_id: MatchId::new(1),
        player_id: PlayerId::new(2),
        player_name: "Ivan".into(),
        roster_number: roster,
        role: LineupRole::Start,
        number_override: over,
        note: None,
    };
    assert_eq!(entry.shirt_number(), expected);
}

#[parameterized(
    scheduled = { "scheduled", Some(MatchStatus::Scheduled) },
    played = { "played", Some(MatchStatus::Played) },
    canceled = { "canceled", Some(MatchStatus::Canceled) },
    british_spelling = { "cancelled", None },
    upper = { "PLAYED", None },
)]
fn match_status_codes(input: &str, expected: Option<MatchStatus>) {
    assert_eq!(input.parse::<MatchStatus>().ok(), expected);
}

#[test]
fn defaults_match_new_record_states() {
    assert_eq!(MatchStatus::default(), MatchStatus::Scheduled);
    assert_eq!(crate::TournamentStatus::default(), crate::TournamentStatus::Planned);
}
