// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bot configuration from the environment.
//!
//! A `.env` file in the working directory is read first; variables already
//! set in the process environment win.

use cb_core::AdminId;
use chrono_tz::Tz;
use std::collections::HashSet;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while reading configuration. Each names the variable.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("{var}: invalid value {value:?}")]
    Invalid { var: &'static str, value: String },
    #[error("ADMIN_IDS must list at least one id")]
    NoAdmins,
}

/// Output format of the log lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bot_token: String,
    pub db_dsn: String,
    pub admin_ids: HashSet<AdminId>,
    pub tz: Tz,
    /// Wizards idle for longer are dropped; `None` keeps them forever
    pub session_ttl: Option<Duration>,
    pub log_format: LogFormat,
    pub debug: bool,
}

impl Config {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let value = |var: &'static str| lookup(var).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let required = |var: &'static str| value(var).ok_or(ConfigError::Missing(var));

        let bot_token = required("BOT_TOKEN")?;
        let db_dsn = required("DB_DSN")?;
        let admin_ids = parse_admin_ids(&required("ADMIN_IDS")?)?;

        let tz_name = required("CLUB_TZ")?;
        let tz = tz_name.parse::<Tz>().map_err(|_| ConfigError::Invalid {
            var: "CLUB_TZ",
            value: tz_name.clone(),
        })?;

        let session_ttl = value("SESSION_TTL_HOURS")
            .map(|raw| {
                let secs = raw
                    .parse::<u64>()
                    .ok()
                    .filter(|hours| *hours > 0)
                    .and_then(|hours| hours.checked_mul(3600));
                secs.map(Duration::from_secs).ok_or(ConfigError::Invalid {
                    var: "SESSION_TTL_HOURS",
                    value: raw,
                })
            })
            .transpose()?;

        let log_format = match value("LOG_FORMAT").as_deref().map(str::to_ascii_lowercase) {
            None => LogFormat::Text,
            Some(f) if f == "text" => LogFormat::Text,
            Some(f) if f == "json" => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    var: "LOG_FORMAT",
                    value: other,
                })
            }
        };

        Ok(Self {
            bot_token,
            db_dsn,
            admin_ids,
            tz,
            session_ttl,
            log_format,
            debug: value("DEBUG").as_deref() == Some("1"),
        })
    }
}

/// Comma-separated Telegram user ids; blank entries are skipped.
pub fn parse_admin_ids(raw: &str) -> Result<HashSet<AdminId>, ConfigError> {
    let mut ids = HashSet::new();
    for part in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let id = part.parse::<i64>().map_err(|_| ConfigError::Invalid {
            var: "ADMIN_IDS",
            value: part.to_string(),
        })?;
        ids.insert(AdminId::new(id));
    }
    if ids.is_empty() {
        return Err(ConfigError::NoAdmins);
    }
    Ok(ids)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
