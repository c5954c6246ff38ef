//! CLI help output specs

use crate::prelude::*;

#[test]
fn cb_no_args_shows_usage_and_exits_zero() {
    cli().passes().stdout_has("Usage:");
}

#[test]
fn cb_help_lists_commands() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_has("migrate")
        .stdout_has("sessions");
}

#[test]
fn cb_sessions_help_shows_subcommands() {
    cli()
        .args(&["sessions", "--help"])
        .passes()
        .stdout_has("list")
        .stdout_has("show")
        .stdout_has("clear");
}

#[test]
fn cb_version_shows_version() {
    cli().args(&["--version"]).passes().stdout_has("0.1");
}
