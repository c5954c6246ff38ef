// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Human-readable ages for operator output

use chrono::Duration;

/// Compact age of a stored row: `"<1m"`, `"42m"`, `"5h"`, `"2d7h"`.
///
/// Negative ages (clock skew) print as `"<1m"`.
pub fn format_age(age: Duration) -> String {
    let minutes = age.num_minutes();
    if minutes < 1 {
        return "<1m".to_string();
    }
    let (days, hours) = (age.num_days(), age.num_hours() % 24);
    match (days, hours) {
        (0, 0) => format!("{minutes}m"),
        (0, h) => format!("{h}h"),
        (d, 0) => format!("{d}d"),
        (d, h) => format!("{d}d{h}h"),
    }
}

#[cfg(test)]
#[path = "time_fmt_tests.rs"]
mod tests;
