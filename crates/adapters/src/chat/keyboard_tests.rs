// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn empty_rows_are_dropped() {
    let kb = Keyboard::new()
        .row(vec![])
        .button("Назад", "nav_back")
        .row(vec![Button::new("1", "a"), Button::new("2", "b")]);

    assert_eq!(kb.rows().len(), 2);
    assert_eq!(kb.buttons().count(), 3);
    assert!(!kb.is_empty());
}

#[test]
fn find_matches_exact_label() {
    let kb = Keyboard::new().button("Команды", "teams_menu");
    assert_eq!(kb.find("Команды").map(|b| b.payload.as_str()), Some("teams_menu"));
    assert!(kb.find("Команд").is_none());
}

#[test]
fn oversized_payloads_are_reported() {
    let long = format!("open_match|id={}", "9".repeat(60));
    let kb = Keyboard::new().button("ok", "open_match|id=1").button("long", long.clone());
    assert_eq!(kb.oversized_payloads(), vec![long.as_str()]);
}
