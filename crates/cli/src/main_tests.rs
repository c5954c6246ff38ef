// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use clap::CommandFactory;

#[test]
fn cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[yare::parameterized(
    migrate = { &["cb", "migrate"] },
    list = { &["cb", "sessions", "list"] },
    show_json = { &["cb", "-o", "json", "sessions", "show", "42"] },
    clear = { &["cb", "sessions", "clear", "42"] },
)]
fn parses(args: &[&str]) {
    assert!(Cli::try_parse_from(args).is_ok());
}

#[test]
fn admin_id_must_be_numeric() {
    assert!(Cli::try_parse_from(["cb", "sessions", "show", "bob"]).is_err());
}

#[test]
fn redundant_cause_is_not_repeated() {
    let err = anyhow::Error::msg("timeout").context("cannot connect: timeout");
    assert_eq!(format_error(&err), "cannot connect: timeout");
}

#[test]
fn distinct_cause_is_listed() {
    let err = anyhow::Error::msg("timeout").context("cannot connect to the database");
    assert_eq!(
        format_error(&err),
        "cannot connect to the database\n\nCaused by:\n    0: timeout"
    );
}
