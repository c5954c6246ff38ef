// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `cb sessions` - inspect and reset per-admin bot sessions
//!
//! Clearing a session is the way out for an admin stuck in a form after
//! a crash: the next message they send starts from a clean slate.

use std::io::Write;

use anyhow::{bail, Result};
use cb_core::{format_age, AdminId, NavEntry, SessionRecord};
use cb_storage::{LoadedSession, PgSessionRepo, SessionRepo, SessionStore};
use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};
use serde::Serialize;
use sqlx::PgPool;

use crate::output::{self, OutputFormat};
use crate::table::{Column, Table};

#[derive(Args)]
pub struct SessionsArgs {
    #[command(subcommand)]
    pub command: SessionsCommand,
}

#[derive(Subcommand)]
pub enum SessionsCommand {
    /// List stored sessions, newest first
    List,
    /// Show the decoded form and navigation history of one admin
    Show {
        /// Telegram user id of the admin
        admin: i64,
    },
    /// Delete an admin's session
    Clear {
        /// Telegram user id of the admin
        admin: i64,
    },
}

#[derive(Debug, Serialize)]
pub(crate) struct SessionSummary {
    admin_id: i64,
    flow: Option<String>,
    updated_at: DateTime<Utc>,
    age: String,
}

impl SessionSummary {
    pub(crate) fn new(record: &SessionRecord, now: DateTime<Utc>) -> Self {
        Self {
            admin_id: record.admin_id.get(),
            flow: record.current_flow.clone(),
            updated_at: record.updated_at,
            age: format_age(record.age(now)),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct SessionDetail {
    admin_id: i64,
    flow: Option<String>,
    step: Option<usize>,
    fields: Vec<(String, Option<String>)>,
    nav: Vec<NavEntry>,
    updated_at: Option<DateTime<Utc>>,
}

impl SessionDetail {
    pub(crate) fn new(admin: AdminId, session: &LoadedSession) -> Self {
        let wizard = session.wizard.as_ref();
        Self {
            admin_id: admin.get(),
            flow: session.flow.clone(),
            step: wizard.map(|w| w.step),
            fields: wizard
                .map(|w| {
                    w.data
                        .iter()
                        .map(|(k, v)| (k.to_string(), v.map(str::to_string)))
                        .collect()
                })
                .unwrap_or_default(),
            nav: session.nav.clone(),
            updated_at: session.updated_at,
        }
    }
}

pub async fn handle(command: SessionsCommand, pool: &PgPool, format: OutputFormat) -> Result<()> {
    let repo = PgSessionRepo::new(pool.clone());
    match command {
        SessionsCommand::List => {
            let now = Utc::now();
            let rows: Vec<_> = repo
                .list()
                .await?
                .iter()
                .map(|r| SessionSummary::new(r, now))
                .collect();
            output::print(format, &rows, |out| {
                if rows.is_empty() {
                    println!("No sessions");
                } else {
                    format_session_list(out, &rows);
                }
            })?;
        }
        SessionsCommand::Show { admin } => {
            let admin = AdminId::new(admin);
            let session = SessionStore::new(repo).load(admin).await?;
            if session.updated_at.is_none() {
                bail!("no session for admin {admin}");
            }
            let detail = SessionDetail::new(admin, &session);
            output::print(format, &detail, |out| format_session_detail(out, &detail))?;
        }
        SessionsCommand::Clear { admin } => {
            let admin = AdminId::new(admin);
            if repo.get(admin).await?.is_none() {
                bail!("no session for admin {admin}");
            }
            repo.delete(admin).await?;
            let cleared = serde_json::json!({ "cleared": admin.get() });
            output::print(format, &cleared, |_| println!("Cleared session of admin {admin}"))?;
        }
    }
    Ok(())
}

pub(crate) fn format_session_list(w: &mut impl Write, rows: &[SessionSummary]) {
    let mut table = Table::new(vec![
        Column::left("ADMIN"),
        Column::left("FLOW").with_max(32),
        Column::right("AGE"),
    ]);
    for row in rows {
        table.row(vec![
            row.admin_id.to_string(),
            row.flow.clone().unwrap_or_else(|| "-".to_string()),
            row.age.clone(),
        ]);
    }
    table.render(w);
}

pub(crate) fn format_session_detail(w: &mut impl Write, detail: &SessionDetail) {
    let _ = writeln!(w, "Admin: {}", detail.admin_id);
    match (&detail.flow, detail.step) {
        (Some(flow), Some(step)) => {
            let _ = writeln!(w, "Flow:  {flow} (step {step})");
        }
        (Some(flow), None) => {
            let _ = writeln!(w, "Flow:  {flow} (no saved state)");
        }
        (None, _) => {
            let _ = writeln!(w, "Flow:  -");
        }
    }
    if let Some(at) = detail.updated_at {
        let _ = writeln!(w, "Updated: {}", at.format("%Y-%m-%d %H:%M:%S UTC"));
    }

    if !detail.fields.is_empty() {
        let _ = writeln!(w, "\nFields:");
        for (key, value) in &detail.fields {
            let _ = writeln!(w, "  {key} = {}", value.as_deref().unwrap_or("(cleared)"));
        }
    }

    if detail.nav.is_empty() {
        let _ = writeln!(w, "\nNavigation: empty");
    } else {
        let _ = writeln!(w, "\nNavigation (oldest first):");
        for entry in &detail.nav {
            let params: Vec<String> = entry.params.iter().map(|(k, v)| format!("{k}={v}")).collect();
            if params.is_empty() {
                let _ = writeln!(w, "  {}", entry.action);
            } else {
                let _ = writeln!(w, "  {} {}", entry.action, params.join(" "));
            }
        }
    }
}

#[cfg(test)]
#[path = "sessions_tests.rs"]
mod tests;
