// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[parameterized(
    not_found = { DomainError::NotFound("team"), "team not found" },
    validation = { DomainError::validation("name"), "name: validation error" },
    conflict = { DomainError::Conflict("duplicate roster entry".into()), "conflict: duplicate roster entry" },
    storage = { DomainError::Storage("connection reset".into()), "storage error: connection reset" },
)]
fn domain_error_messages(error: DomainError, expected: &str) {
    assert_eq!(error.to_string(), expected);
}

#[test]
fn only_validation_is_flagged_as_validation() {
    assert!(DomainError::validation("opponent").is_validation());
    assert!(!DomainError::NotFound("match").is_validation());
}

string_enum! {
    /// Enum declared through the macro for testing.
    pub enum Color("color") {
        Red => "red",
        Blue => "blue",
    }
}

#[test]
fn string_enum_parses_and_displays_codes() {
    assert_eq!("red".parse::<Color>(), Ok(Color::Red));
    assert_eq!(Color::Blue.to_string(), "blue");
    assert_eq!(Color::ALL.len(), 2);
}

#[test]
fn string_enum_reports_unknown_value() {
    let err = "green".parse::<Color>().unwrap_err();
    assert_eq!(err.to_string(), r#"unknown color: "green""#);
}

#[test]
fn string_enum_serde_uses_codes() {
    assert_eq!(serde_json::to_string(&Color::Red).unwrap(), r#""red""#);
    let back: Color = serde_json::from_str(r#""blue""#).unwrap();
    assert_eq!(back, Color::Blue);
}
