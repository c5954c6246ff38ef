//! CLI error handling specs

use crate::prelude::*;

#[test]
fn missing_dsn_is_reported() {
    cli()
        .args(&["sessions", "list"])
        .fails()
        .stderr_has("Error: DB_DSN is not set");
}

#[test]
fn admin_id_must_be_a_number() {
    cli()
        .args(&["sessions", "clear", "someone"])
        .fails()
        .stderr_has("invalid value 'someone'");
}

#[test]
fn unknown_subcommand_is_rejected() {
    cli()
        .args(&["sessions", "purge"])
        .fails()
        .stderr_has("unrecognized subcommand 'purge'");
}
