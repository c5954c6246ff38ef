// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[test]
fn new_state_starts_at_step_zero_with_no_answers() {
    let state = WizardState::new("create_team");
    assert_eq!(state.flow, "create_team");
    assert_eq!(state.step, 0);
    assert!(state.data.is_empty());
}

#[test]
fn fields_are_tri_state() {
    let mut data = WizardData::new();
    data.set("name", "Eagles");
    data.clear_field("note");

    assert_eq!(data.patch("name"), Patch::Set("Eagles"));
    assert_eq!(data.patch("note"), Patch::Cleared);
    assert_eq!(data.patch("type"), Patch::Unchanged);
    assert_eq!(data.get("note"), None);
    assert!(data.contains("note"));
}

#[parameterized(
    unchanged = { Patch::Unchanged, Patch::Unchanged },
    set = { Patch::Set("x".to_string()), Patch::Set("x") },
    cleared = { Patch::Cleared, Patch::Cleared },
)]
fn set_patch_round_trips(input: Patch<String>, expected: Patch<&str>) {
    let mut data = WizardData::new();
    data.set("note", "stale");
    data.set_patch("note", input);
    assert_eq!(data.patch("note"), expected);
}

#[test]
fn legacy_delete_marker_reads_as_cleared() {
    let data: WizardData =
        serde_json::from_str(r#"{"note":"ignored","note_action":"delete"}"#).unwrap();
    assert_eq!(data.patch("note"), Patch::Cleared);
}

#[test]
fn legacy_new_value_reads_as_set() {
    let data: WizardData = [("id", "3"), ("type_new", "league"), ("name_new", "")]
        .into_iter()
        .collect();
    assert_eq!(data.patch("type"), Patch::Set("league"));
    assert_eq!(data.patch("name"), Patch::Unchanged);
}

#[test]
fn legacy_string_map_deserializes() {
    let state: WizardState = serde_json::from_str(
        r#"{"flow":"create_team","step":2,"data":{"name":"Eagles","short_code":"U12"}}"#,
    )
    .unwrap();
    assert_eq!(state.step, 2);
    assert_eq!(state.data.get("short_code"), Some("U12"));
}

#[test]
fn cleared_field_serializes_as_null() {
    let mut data = WizardData::new();
    data.clear_field("note");
    assert_eq!(serde_json::to_string(&data).unwrap(), r#"{"note":null}"#);
}

#[test]
fn missing_data_defaults_to_empty() {
    let state: WizardState = serde_json::from_str(r#"{"flow":"event_goal","step":0}"#).unwrap();
    assert!(state.data.is_empty());
}

#[test]
fn parse_reads_typed_values() {
    let data: WizardData = [("id", "17"), ("bad", "x")].into_iter().collect();
    assert_eq!(data.parse::<i64>("id"), Some(17));
    assert_eq!(data.parse::<i64>("bad"), None);
}
