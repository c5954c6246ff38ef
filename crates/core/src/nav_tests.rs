// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn equality_ignores_param_insertion_order() {
    let a = NavEntry::new("games_open_team").with("t", 1).with("team", 2);
    let b = NavEntry::new("games_open_team").with("team", 2).with("t", 1);
    assert_eq!(a, b);
}

#[test]
fn equality_compares_values() {
    let a = NavEntry::new("tournaments_page").with("page", 1);
    let b = NavEntry::new("tournaments_page").with("page", 2);
    assert_ne!(a, b);
}

#[test]
fn empty_params_are_omitted_when_serialized() {
    let json = serde_json::to_string(&NavEntry::new("teams_menu")).unwrap();
    assert_eq!(json, r#"{"action":"teams_menu"}"#);
}

#[test]
fn params_deserialize_when_present_or_missing() {
    let with: NavEntry =
        serde_json::from_str(r#"{"action":"players_menu","params":{"page":"3"}}"#).unwrap();
    assert_eq!(with.parse_param::<u32>("page"), Some(3));

    let without: NavEntry = serde_json::from_str(r#"{"action":"teams_menu"}"#).unwrap();
    assert!(without.params.is_empty());
}

#[test]
fn parse_param_rejects_garbage() {
    let entry = NavEntry::new("roster_open_tournament").with("id", "abc");
    assert_eq!(entry.parse_param::<i64>("id"), None);
    assert_eq!(entry.parse_param::<i64>("missing"), None);
}
