// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;
use std::collections::HashMap;
use yare::parameterized;

fn base() -> HashMap<&'static str, &'static str> {
    HashMap::from([
        ("BOT_TOKEN", "123:abc"),
        ("DB_DSN", "postgres://localhost/club"),
        ("ADMIN_IDS", "42"),
        ("CLUB_TZ", "Europe/Moscow"),
    ])
}

fn load(vars: &HashMap<&'static str, &'static str>) -> Result<Config, ConfigError> {
    Config::from_lookup(|key| vars.get(key).map(|v| v.to_string()))
}

#[test]
fn minimal_environment() {
    let config = load(&base()).unwrap();

    assert_eq!(config.bot_token, "123:abc");
    assert_eq!(config.tz, chrono_tz::Europe::Moscow);
    assert_eq!(config.admin_ids, HashSet::from([AdminId::new(42)]));
    assert_eq!(config.session_ttl, None);
    assert_eq!(config.log_format, LogFormat::Text);
    assert!(!config.debug);
}

#[parameterized(
    token = { "BOT_TOKEN" },
    dsn = { "DB_DSN" },
    admins = { "ADMIN_IDS" },
    tz = { "CLUB_TZ" },
)]
fn missing_variable_is_named(var: &'static str) {
    let mut vars = base();
    vars.remove(var);
    assert_eq!(load(&vars).unwrap_err(), ConfigError::Missing(var));
}

#[test]
fn blank_value_counts_as_missing() {
    let mut vars = base();
    vars.insert("BOT_TOKEN", "   ");
    assert_eq!(load(&vars).unwrap_err(), ConfigError::Missing("BOT_TOKEN"));
}

#[parameterized(
    single = { "7", &[7] },
    spaced = { " 1, 2 ,3 ", &[1, 2, 3] },
    blanks_skipped = { "5,,6,", &[5, 6] },
    negative_chat = { "-100200", &[-100200] },
)]
fn admin_ids(raw: &str, expected: &[i64]) {
    let ids = parse_admin_ids(raw).unwrap();
    let expected: HashSet<AdminId> = expected.iter().copied().map(AdminId::new).collect();
    assert_eq!(ids, expected);
}

#[test]
fn admin_ids_need_one_entry() {
    assert_eq!(parse_admin_ids(" , ,"), Err(ConfigError::NoAdmins));
}

#[test]
fn admin_id_must_be_numeric() {
    assert_eq!(
        parse_admin_ids("1,bob"),
        Err(ConfigError::Invalid {
            var: "ADMIN_IDS",
            value: "bob".into(),
        })
    );
}

#[test]
fn unknown_timezone() {
    let mut vars = base();
    vars.insert("CLUB_TZ", "Mars/Olympus");
    let err = load(&vars).unwrap_err();
    assert_eq!(err.to_string(), "CLUB_TZ: invalid value \"Mars/Olympus\"");
}

#[parameterized(
    day = { "24", Some(Duration::from_secs(24 * 3600)) },
    unset = { "", None },
)]
fn session_ttl(raw: &'static str, expected: Option<Duration>) {
    let mut vars = base();
    vars.insert("SESSION_TTL_HOURS", raw);
    assert_eq!(load(&vars).unwrap().session_ttl, expected);
}

#[parameterized(
    zero = { "0" },
    words = { "a day" },
    negative = { "-3" },
    overflowing = { "18446744073709551615" },
)]
fn session_ttl_rejects(raw: &'static str) {
    let mut vars = base();
    vars.insert("SESSION_TTL_HOURS", raw);
    assert!(matches!(
        load(&vars),
        Err(ConfigError::Invalid {
            var: "SESSION_TTL_HOURS",
            ..
        })
    ));
}

#[test]
fn json_logs_and_debug() {
    let mut vars = base();
    vars.insert("LOG_FORMAT", "JSON");
    vars.insert("DEBUG", "1");
    let config = load(&vars).unwrap();
    assert_eq!(config.log_format, LogFormat::Json);
    assert!(config.debug);
}

#[test]
fn unknown_log_format() {
    let mut vars = base();
    vars.insert("LOG_FORMAT", "xml");
    assert!(matches!(
        load(&vars),
        Err(ConfigError::Invalid {
            var: "LOG_FORMAT",
            ..
        })
    ));
}

#[test]
#[serial]
fn from_env_reads_process_environment() {
    for (key, value) in base() {
        std::env::set_var(key, value);
    }
    std::env::set_var("ADMIN_IDS", "10,20");

    let config = Config::from_env();

    for key in base().keys() {
        std::env::remove_var(key);
    }
    let config = config.unwrap();
    assert_eq!(
        config.admin_ids,
        HashSet::from([AdminId::new(10), AdminId::new(20)])
    );
}

#[test]
#[serial]
fn from_env_reports_missing_token() {
    std::env::remove_var("BOT_TOKEN");
    assert_eq!(
        Config::from_env().unwrap_err(),
        ConfigError::Missing("BOT_TOKEN")
    );
}
