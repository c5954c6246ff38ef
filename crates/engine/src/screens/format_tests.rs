// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use cb_core::test_support::{lineup_entry, utc};
use cb_core::{CardType, LineupRole, MatchId, PlayerId};
use yare::parameterized;

#[test]
fn escape_marks_markdown_characters() {
    assert_eq!(escape("a_b*c`d[e]"), "a\\_b\\*c\\`d\\[e]");
    assert_eq!(escape("Орлы"), "Орлы");
}

#[parameterized(
    short = { "Eagles", 25, "Eagles" },
    exact = { "abcde", 5, "abcde" },
    long = { "abcdefgh", 6, "abc..." },
    cyrillic = { "Александр Сергеевич Пушкин", 10, "Алексан..." },
    tiny = { "abcdef", 2, "ab" },
)]
fn labels_truncate_by_character(input: &str, max: usize, expected: &str) {
    assert_eq!(truncate_label(input, max), expected);
}

#[test]
fn kickoff_uses_club_timezone() {
    let t = utc(2024, 3, 1, 21, 30);
    assert_eq!(kickoff(t, chrono_tz::Europe::Moscow), "02.03 00:30");
    assert_eq!(kickoff_full(t, chrono_tz::Europe::Moscow), "02.03.2024 00:30");
}

#[parameterized(
    first = { 45, 1, 1, 0..20 },
    middle = { 45, 2, 2, 20..40 },
    last_partial = { 45, 3, 3, 40..45 },
    past_end_resets = { 45, 9, 1, 0..20 },
    zero_is_first = { 45, 0, 1, 0..20 },
    empty = { 0, 1, 1, 0..0 },
)]
fn page_window_clamps(total: usize, page: u32, shown: u32, range: Range<usize>) {
    assert_eq!(page_window(total, page, 20), (shown, range));
}

#[test]
fn lineup_line_prefers_match_number() {
    let mut entry = lineup_entry(1, 2, "Ivan_P", LineupRole::Start);
    assert_eq!(lineup_line(&entry), "- Ivan\\_P (start)\n");

    entry.roster_number = Some(7);
    assert_eq!(lineup_line(&entry), "- Ivan\\_P #7 (start)\n");

    entry.number_override = Some(10);
    entry.role = LineupRole::Sub;
    assert_eq!(lineup_line(&entry), "- Ivan\\_P #10 (sub)\n");
}

fn event(kind: EventKind) -> MatchEvent {
    MatchEvent {
        id: 1,
        match_id: MatchId::new(1),
        kind,
        time_text: "45+2".into(),
        player_main: Some(PlayerId::new(1)),
        player_alt: Some(PlayerId::new(2)),
        card_type: None,
        player_main_name: Some("Ivan".into()),
        player_alt_name: Some("Oleg".into()),
        created_at: utc(2024, 3, 1, 12, 0),
    }
}

#[test]
fn event_lines_by_kind() {
    assert_eq!(event_line(&event(EventKind::Goal)), "- goal — 45+2 Ivan\n");
    assert_eq!(event_line(&event(EventKind::Sub)), "- sub — 45+2 Ivan ↔ Oleg\n");

    let mut card = event(EventKind::Card);
    card.card_type = Some(CardType::Red);
    assert_eq!(event_line(&card), "- card — 45+2 Ivan (red)\n");
}
