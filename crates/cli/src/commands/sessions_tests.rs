// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use cb_core::test_support::utc;
use cb_core::{WizardData, WizardState};

fn record(admin: i64, flow: Option<&str>, updated_at: DateTime<Utc>) -> SessionRecord {
    SessionRecord {
        admin_id: AdminId::new(admin),
        current_flow: flow.map(str::to_string),
        flow_state: None,
        updated_at,
    }
}

fn output_string(buf: &[u8]) -> String {
    String::from_utf8(buf.to_vec()).unwrap()
}

#[test]
fn list_shows_flow_and_age() {
    let now = utc(2024, 3, 1, 12, 0);
    let rows = vec![
        SessionSummary::new(&record(1001, Some("create_team"), utc(2024, 3, 1, 11, 18)), now),
        SessionSummary::new(&record(7, None, utc(2024, 2, 27, 9, 0)), now),
    ];

    let mut buf = Vec::new();
    format_session_list(&mut buf, &rows);
    let out = output_string(&buf);
    let lines: Vec<&str> = out.lines().collect();

    assert_eq!(lines[0], "ADMIN  FLOW          AGE");
    assert_eq!(lines[1], "1001   create_team   42m");
    assert_eq!(lines[2], "7      -            3d3h");
}

#[test]
fn detail_shows_fields_and_history() {
    let mut data = WizardData::new();
    data.set("name", "Eagles");
    data.clear_field("note");
    let session = LoadedSession {
        flow: Some("edit_team".into()),
        wizard: Some(WizardState {
            flow: "edit_team".into(),
            step: 2,
            data,
        }),
        nav: vec![
            NavEntry::new("teams_menu"),
            NavEntry::new("players_menu").with("page", 2),
        ],
        updated_at: Some(utc(2024, 3, 1, 12, 0)),
    };

    let detail = SessionDetail::new(AdminId::new(7), &session);
    let mut buf = Vec::new();
    format_session_detail(&mut buf, &detail);

    similar_asserts::assert_eq!(
        output_string(&buf),
        "Admin: 7\n\
         Flow:  edit_team (step 2)\n\
         Updated: 2024-03-01 12:00:00 UTC\n\
         \n\
         Fields:\n  \
           name = Eagles\n  \
           note = (cleared)\n\
         \n\
         Navigation (oldest first):\n  \
           teams_menu\n  \
           players_menu page=2\n"
    );
}

#[test]
fn detail_of_navigation_only_session() {
    let session = LoadedSession {
        flow: None,
        wizard: None,
        nav: Vec::new(),
        updated_at: None,
    };
    let detail = SessionDetail::new(AdminId::new(7), &session);
    let mut buf = Vec::new();
    format_session_detail(&mut buf, &detail);

    assert_eq!(output_string(&buf), "Admin: 7\nFlow:  -\n\nNavigation: empty\n");
}

#[test]
fn detail_serializes_cleared_fields_as_null() {
    let mut data = WizardData::new();
    data.clear_field("note");
    let session = LoadedSession {
        flow: Some("edit_team".into()),
        wizard: Some(WizardState::new("edit_team").with_data(data)),
        nav: Vec::new(),
        updated_at: None,
    };
    let json = serde_json::to_value(SessionDetail::new(AdminId::new(7), &session)).unwrap();
    assert_eq!(json["fields"], serde_json::json!([["note", null]]));
    assert_eq!(json["step"], 0);
}
