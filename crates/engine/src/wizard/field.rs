// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Single-field wizard steps.
//!
//! Most steps read one answer into one field. A [`FieldStep`] pairs the
//! prompt with a [`Rule`] that turns the trimmed reply into a tri-state
//! value or a rejection message.

use super::Step;
use crate::screens::format::escape;
use cb_core::{Patch, WizardData};
use chrono::{NaiveDate, NaiveTime};

/// Reply meaning "skip" or "keep the current value"
pub const KEEP: &str = "-";
/// Reply that clears a field in edit flows; matched case-insensitively
pub const CLEAR: &str = "удалить";

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";

pub fn parse_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).ok()
}

pub fn parse_time(input: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(input.trim(), TIME_FORMAT).ok()
}

pub fn parse_yes_no(input: &str) -> Option<bool> {
    match input.trim().to_lowercase().as_str() {
        "да" | "yes" | "y" | "true" | "1" => Some(true),
        "нет" | "no" | "n" | "false" | "0" => Some(false),
        _ => None,
    }
}

fn is_clear(input: &str) -> bool {
    input.to_lowercase() == CLEAR
}

fn is_skip(input: &str) -> bool {
    input.is_empty() || input == KEEP
}

/// How a reply becomes a field value
#[derive(Debug, Clone, Copy)]
pub enum Rule {
    /// Any non-blank text
    Required { blank: &'static str },
    /// `-` or blank skips
    Optional,
    /// `-` keeps, `удалить` clears
    Clearable,
    /// `YYYY-MM-DD`. Required dates reject `-`.
    Date {
        required: bool,
        clearable: bool,
        invalid: &'static str,
    },
    /// `HH:MM`, 24 hour
    Time {
        required: bool,
        invalid: &'static str,
    },
    /// One of `options`, case-insensitive. A skip takes `default`.
    Choice {
        options: &'static [&'static str],
        default: Option<&'static str>,
        invalid: &'static str,
    },
    /// Stored as `true`/`false`. A skip takes `default`.
    YesNo {
        default: Option<bool>,
        invalid: &'static str,
    },
    /// Integer; `-` clears. Blank is rejected with `blank` when given.
    Number {
        blank: Option<&'static str>,
        invalid: &'static str,
    },
}

impl Rule {
    /// Interpret a trimmed reply.
    pub fn apply(&self, input: &str) -> Result<Patch<String>, &'static str> {
        match *self {
            Rule::Required { blank } => {
                if input.is_empty() {
                    return Err(blank);
                }
                Ok(Patch::Set(input.to_string()))
            }
            Rule::Optional => Ok(if is_skip(input) {
                Patch::Unchanged
            } else {
                Patch::Set(input.to_string())
            }),
            Rule::Clearable => Ok(if is_skip(input) {
                Patch::Unchanged
            } else if is_clear(input) {
                Patch::Cleared
            } else {
                Patch::Set(input.to_string())
            }),
            Rule::Date {
                required,
                clearable,
                invalid,
            } => {
                if is_skip(input) {
                    return if required { Err(invalid) } else { Ok(Patch::Unchanged) };
                }
                if clearable && is_clear(input) {
                    return Ok(Patch::Cleared);
                }
                let date = parse_date(input).ok_or(invalid)?;
                Ok(Patch::Set(date.format(DATE_FORMAT).to_string()))
            }
            Rule::Time { required, invalid } => {
                if is_skip(input) {
                    return if required { Err(invalid) } else { Ok(Patch::Unchanged) };
                }
                let time = parse_time(input).ok_or(invalid)?;
                Ok(Patch::Set(time.format(TIME_FORMAT).to_string()))
            }
            Rule::Choice {
                options,
                default,
                invalid,
            } => {
                if is_skip(input) {
                    return Ok(default.map_or(Patch::Unchanged, |d| Patch::Set(d.to_string())));
                }
                let normalized = input.to_lowercase();
                if options.contains(&normalized.as_str()) {
                    Ok(Patch::Set(normalized))
                } else {
                    Err(invalid)
                }
            }
            Rule::YesNo { default, invalid } => {
                let answer = if is_skip(input) {
                    default
                } else {
                    Some(parse_yes_no(input).ok_or(invalid)?)
                };
                Ok(answer.map_or(Patch::Unchanged, |b| Patch::Set(b.to_string())))
            }
            Rule::Number { blank, invalid } => {
                if input.is_empty() {
                    return match blank {
                        Some(msg) => Err(msg),
                        None => Ok(Patch::Unchanged),
                    };
                }
                if input == KEEP {
                    return Ok(Patch::Cleared);
                }
                let n: i32 = input.parse().map_err(|_| invalid)?;
                Ok(Patch::Set(n.to_string()))
            }
        }
    }
}

/// What a step asks
#[derive(Clone, Copy)]
pub enum Prompt {
    Fixed(&'static str),
    /// `"{label}: {current}\n{ask}"`, reading the current value from the
    /// stashed `orig` field
    Current {
        label: &'static str,
        orig: &'static str,
        empty: &'static str,
        ask: &'static str,
    },
    Custom(fn(&WizardData) -> String),
}

impl Prompt {
    pub fn render(&self, data: &WizardData) -> String {
        match *self {
            Prompt::Fixed(text) => text.to_string(),
            Prompt::Current {
                label,
                orig,
                empty,
                ask,
            } => {
                let current = match data.get(orig) {
                    Some(v) if !v.is_empty() => escape(v),
                    _ => empty.to_string(),
                };
                format!("{label}: {current}\n{ask}")
            }
            Prompt::Custom(render) => render(data),
        }
    }
}

/// Reads one reply into one field
#[derive(Clone, Copy)]
pub struct FieldStep {
    key: &'static str,
    prompt: Prompt,
    rule: Rule,
}

impl FieldStep {
    pub fn new(key: &'static str, prompt: Prompt, rule: Rule) -> Self {
        Self { key, prompt, rule }
    }

    pub fn boxed(self) -> Box<dyn Step> {
        Box::new(self)
    }
}

impl Step for FieldStep {
    fn prompt(&self, data: &WizardData) -> String {
        self.prompt.render(data)
    }

    fn accept(&self, input: &str, data: &mut WizardData) -> Result<(), String> {
        let value = self.rule.apply(input).map_err(str::to_string)?;
        data.set_patch(self.key, value);
        Ok(())
    }
}

#[cfg(test)]
#[path = "field_tests.rs"]
mod tests;
