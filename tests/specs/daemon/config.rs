//! Daemon startup configuration specs
//!
//! Each case fails before any connection is attempted.

use crate::prelude::*;

fn configured() -> CliBuilder {
    daemon()
        .env("BOT_TOKEN", "123:abc")
        .env("DB_DSN", "postgres://localhost:1/none")
        .env("ADMIN_IDS", "1001")
        .env("CLUB_TZ", "Europe/Moscow")
}

#[test]
fn token_is_required() {
    daemon()
        .fails()
        .stderr_has("error: BOT_TOKEN is required");
}

#[test]
fn unknown_time_zone_is_named() {
    configured()
        .env("CLUB_TZ", "Mars/Olympus")
        .fails()
        .stderr_has("error: CLUB_TZ: invalid value \"Mars/Olympus\"");
}

#[test]
fn admin_list_of_blanks_is_rejected() {
    configured()
        .env("ADMIN_IDS", " , ,")
        .fails()
        .stderr_has("error: ADMIN_IDS must list at least one id");
}

#[test]
fn zero_session_ttl_is_rejected() {
    configured()
        .env("SESSION_TTL_HOURS", "0")
        .fails()
        .stderr_has("SESSION_TTL_HOURS");
}
