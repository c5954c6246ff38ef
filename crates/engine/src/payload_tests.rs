// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[test]
fn parses_action_and_params() {
    let entry = parse("roster_open_team|t=3|team=12").unwrap();
    assert_eq!(entry, NavEntry::new("roster_open_team").with("t", 3).with("team", 12));
}

#[test]
fn bare_action_has_no_params() {
    assert_eq!(parse("nav_back").unwrap(), NavEntry::new("nav_back"));
}

#[test]
fn empty_segments_are_skipped() {
    let entry = parse("players_page||page=2|").unwrap();
    assert_eq!(entry.param("page"), Some("2"));
}

#[test]
fn value_may_contain_equals_sign() {
    let entry = parse("x|note=a=b").unwrap();
    assert_eq!(entry.param("note"), Some("a=b"));
}

#[parameterized(
    empty = { "", PayloadError::Empty },
    only_params = { "|id=1", PayloadError::Empty },
    no_equals = { "open_match|5", PayloadError::Malformed("5".into()) },
    empty_key = { "open_match|=5", PayloadError::Malformed("=5".into()) },
)]
fn malformed_payloads_are_rejected(data: &str, expected: PayloadError) {
    assert_eq!(parse(data).unwrap_err(), expected);
}

#[test]
fn encode_orders_params_by_key() {
    let entry = NavEntry::new("match_events_sub_pick_in")
        .with("player", 9)
        .with("match", 4)
        .with("out", 7);
    assert_eq!(encode(&entry), "match_events_sub_pick_in|match=4|out=7|player=9");
    assert_eq!(parse(&encode(&entry)).unwrap(), entry);
}
