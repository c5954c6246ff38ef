// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Text helpers for Telegram Markdown screens

use cb_core::{EventKind, LineupEntry, MatchEvent, MatchStatus};
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use std::ops::Range;

/// Longest button label before truncation
pub const LABEL_MAX: usize = 25;

/// Escape Markdown control characters in user-provided text.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '_' | '*' | '`' | '[') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Cut `text` to `max` characters, ending in `...` when shortened.
pub fn truncate_label(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    if max <= 3 {
        return text.chars().take(max).collect();
    }
    let mut out: String = text.chars().take(max - 3).collect();
    out.push_str("...");
    out
}

/// Button label from a name
pub fn label(text: &str) -> String {
    truncate_label(text, LABEL_MAX)
}

pub fn date(d: NaiveDate) -> String {
    d.format("%d.%m.%Y").to_string()
}

/// Kick-off in the club timezone, `DD.MM HH:MM`
pub fn kickoff(t: DateTime<Utc>, tz: Tz) -> String {
    t.with_timezone(&tz).format("%d.%m %H:%M").to_string()
}

/// Kick-off in the club timezone with the year
pub fn kickoff_full(t: DateTime<Utc>, tz: Tz) -> String {
    t.with_timezone(&tz).format("%d.%m.%Y %H:%M").to_string()
}

pub fn match_status_label(status: MatchStatus) -> &'static str {
    match status {
        MatchStatus::Scheduled => "План",
        MatchStatus::Played => "Сыгран",
        MatchStatus::Canceled => "Отменён",
    }
}

/// Clamp a 1-based page over `total` items, returning the page actually
/// shown and its slice. Pages past the end fall back to the first.
pub fn page_window(total: usize, page: u32, per_page: usize) -> (u32, Range<usize>) {
    let mut page = page.max(1);
    let mut start = (page as usize - 1).saturating_mul(per_page);
    if start >= total {
        page = 1;
        start = 0;
    }
    let end = (start + per_page).min(total);
    (page, start..end)
}

/// `- name #7 (start)`
pub fn lineup_line(entry: &LineupEntry) -> String {
    match entry.shirt_number() {
        Some(n) => format!("- {} #{} ({})\n", escape(&entry.player_name), n, entry.role),
        None => format!("- {} ({})\n", escape(&entry.player_name), entry.role),
    }
}

/// `- goal — 45+2 Ivan`
pub fn event_line(event: &MatchEvent) -> String {
    let mut line = format!("- {} — {}", event.kind, escape(&event.time_text));
    if let Some(name) = &event.player_main_name {
        line.push(' ');
        line.push_str(&escape(name));
    }
    if event.kind == EventKind::Sub {
        if let Some(name) = &event.player_alt_name {
            line.push_str(" ↔ ");
            line.push_str(&escape(name));
        }
    }
    if let Some(card) = event.card_type {
        line.push_str(&format!(" ({card})"));
    }
    line.push('\n');
    line
}

#[cfg(test)]
#[path = "format_tests.rs"]
mod tests;
