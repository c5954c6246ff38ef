// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scheduling and editing fixtures

use super::{id, local_to_utc, parse_answer, text, text_patch, MATCH_CREATE, MATCH_EDIT};
use crate::screens::ScreenRequest;
use crate::wizard::{
    parse_date, parse_time, Committed, FailurePolicy, FieldStep, Flow, FlowContext, Prompt, Rule,
    Step, KEEP,
};
use async_trait::async_trait;
use cb_core::{DomainError, MatchPatch, MatchStatus, NewMatch, Patch, WizardData};
use chrono::{NaiveTime, Timelike};

const SCORE_SLOTS: usize = 6;

/// Scores entered in one line: `HT FT ET PEN FINAL_US FINAL_THEM`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scores {
    pub ht: Patch<String>,
    pub ft: Patch<String>,
    pub et: Patch<String>,
    pub pen: Patch<String>,
    pub us: Patch<i32>,
    pub them: Patch<i32>,
}

impl Scores {
    fn apply(self, patch: &mut MatchPatch) {
        patch.score_ht = self.ht;
        patch.score_ft = self.ft;
        patch.score_et = self.et;
        patch.score_pen = self.pen;
        patch.final_us = self.us;
        patch.final_them = self.them;
    }
}

fn score(token: &str) -> Result<Patch<String>, String> {
    if token == KEEP {
        return Ok(Patch::Cleared);
    }
    if !token.contains(':') {
        return Err(format!("Некорректный формат счёта «{token}»."));
    }
    Ok(Patch::Set(token.to_string()))
}

fn final_score(token: &str) -> Result<Patch<i32>, String> {
    if token == KEEP {
        return Ok(Patch::Cleared);
    }
    token
        .parse()
        .map(Patch::Set)
        .map_err(|_| format!("Некорректное значение счёта «{token}»."))
}

/// Parse a scores line. `Ok(None)` when the whole line is skipped; a `-`
/// in one slot clears that score.
pub fn parse_scores(input: &str) -> Result<Option<Scores>, String> {
    let input = input.trim();
    if input.is_empty() || input == KEEP {
        return Ok(None);
    }
    let tokens: Vec<&str> = input.split_whitespace().collect();
    if tokens.len() != SCORE_SLOTS {
        return Err(format!(
            "Ожидалось {SCORE_SLOTS} значений для счётов, получено {}.",
            tokens.len()
        ));
    }
    Ok(Some(Scores {
        ht: score(tokens[0])?,
        ft: score(tokens[1])?,
        et: score(tokens[2])?,
        pen: score(tokens[3])?,
        us: final_score(tokens[4])?,
        them: final_score(tokens[5])?,
    }))
}

/// Reads the scores line, rejecting it up front if it will not parse
struct ScoresStep;

impl Step for ScoresStep {
    fn prompt(&self, _data: &WizardData) -> String {
        "Введите счёты через пробел: HT FT ET PEN FINAL_US FINAL_THEM. \
         Используйте '-' для каждого значения или '-' целиком чтобы пропустить."
            .to_string()
    }

    fn accept(&self, input: &str, data: &mut WizardData) -> Result<(), String> {
        match parse_scores(input)? {
            Some(_) => data.set("scores", input),
            None => data.remove("scores"),
        }
        Ok(())
    }
}

pub struct MatchCreate {
    steps: Vec<Box<dyn Step>>,
}

impl Default for MatchCreate {
    fn default() -> Self {
        Self {
            steps: vec![
                FieldStep::new(
                    "opponent",
                    Prompt::Fixed("Создание матча: укажите соперника."),
                    Rule::Required {
                        blank: "Соперник не может быть пустым.",
                    },
                )
                .boxed(),
                FieldStep::new(
                    "date",
                    Prompt::Fixed("Введите дату матча (YYYY-MM-DD)."),
                    Rule::Date {
                        required: true,
                        clearable: false,
                        invalid: "Неверный формат. Используйте YYYY-MM-DD.",
                    },
                )
                .boxed(),
                FieldStep::new(
                    "time",
                    Prompt::Fixed("Введите время матча (HH:MM)."),
                    Rule::Time {
                        required: true,
                        invalid: "Неверный формат времени. Используйте HH:MM (24 часа).",
                    },
                )
                .boxed(),
                FieldStep::new(
                    "location",
                    Prompt::Fixed("Введите место проведения (или '-' для пропуска)."),
                    Rule::Optional,
                )
                .boxed(),
            ],
        }
    }
}

#[async_trait]
impl Flow for MatchCreate {
    fn tag(&self) -> &'static str {
        MATCH_CREATE
    }

    fn steps(&self) -> &[Box<dyn Step>] {
        &self.steps
    }

    fn failure_prefix(&self) -> &'static str {
        "Не удалось создать матч"
    }

    async fn commit(&self, ctx: &FlowContext<'_>, data: &WizardData) -> Result<Committed, DomainError> {
        let tournament = id(data, "tournament_id")?;
        let team = id(data, "team_id")?;
        let date = data
            .get("date")
            .and_then(parse_date)
            .ok_or_else(|| DomainError::validation("date"))?;
        let time = data
            .get("time")
            .and_then(parse_time)
            .ok_or_else(|| DomainError::validation("time"))?;
        let game = NewMatch {
            tournament_id: tournament,
            team_id: team,
            opponent: text(data, "opponent").unwrap_or_default(),
            start_time: local_to_utc(ctx.tz, date, time)?,
            location: text(data, "location"),
            status: MatchStatus::Scheduled,
        };
        ctx.club.create_match(game).await?;
        Ok(Committed::new("Матч создан.").then(ScreenRequest::GamesMatches { tournament, team }))
    }
}

pub struct MatchEdit {
    steps: Vec<Box<dyn Step>>,
}

impl Default for MatchEdit {
    fn default() -> Self {
        Self {
            steps: vec![
                FieldStep::new(
                    "status",
                    Prompt::Fixed(
                        "Введите статус (scheduled/played/canceled) или '-' чтобы оставить без изменений.",
                    ),
                    Rule::Choice {
                        options: &["scheduled", "played", "canceled"],
                        default: None,
                        invalid: "Допустимые статусы: scheduled, played, canceled или '-'.",
                    },
                )
                .boxed(),
                FieldStep::new(
                    "date",
                    Prompt::Fixed("Введите дату матча (YYYY-MM-DD) или '-' чтобы оставить без изменений."),
                    Rule::Date {
                        required: false,
                        clearable: false,
                        invalid: "Неверный формат даты. Используйте YYYY-MM-DD или '-'.",
                    },
                )
                .boxed(),
                FieldStep::new(
                    "time",
                    Prompt::Fixed("Введите время матча (HH:MM) или '-' чтобы оставить без изменений."),
                    Rule::Time {
                        required: false,
                        invalid: "Неверный формат времени. Используйте HH:MM или '-'.",
                    },
                )
                .boxed(),
                FieldStep::new(
                    "location",
                    Prompt::Fixed(
                        "Введите место проведения, '-' чтобы оставить, 'удалить' чтобы очистить.",
                    ),
                    Rule::Clearable,
                )
                .boxed(),
                Box::new(ScoresStep),
            ],
        }
    }
}

#[async_trait]
impl Flow for MatchEdit {
    fn tag(&self) -> &'static str {
        MATCH_EDIT
    }

    fn steps(&self) -> &[Box<dyn Step>] {
        &self.steps
    }

    fn failure_policy(&self) -> FailurePolicy {
        FailurePolicy::Keep
    }

    fn failure_prefix(&self) -> &'static str {
        "Не удалось обновить матч"
    }

    async fn commit(&self, ctx: &FlowContext<'_>, data: &WizardData) -> Result<Committed, DomainError> {
        let game = id(data, "match_id")?;
        let mut patch = MatchPatch {
            status: data
                .get("status")
                .map(|s| parse_answer(s, "status"))
                .transpose()?,
            location: text_patch(data, "location"),
            ..MatchPatch::default()
        };

        let date = data.get("date").and_then(parse_date);
        let time = data.get("time").and_then(parse_time);
        if date.is_some() || time.is_some() {
            // Fill the untouched half from the current kick-off, seen in
            // club time.
            let current = ctx.club.game(game).await?.start_time.with_timezone(&ctx.tz);
            let date = date.unwrap_or_else(|| current.date_naive());
            let time = match time {
                Some(t) => t,
                None => NaiveTime::from_hms_opt(current.hour(), current.minute(), 0)
                    .ok_or_else(|| DomainError::validation("time"))?,
            };
            patch.start_time = Some(local_to_utc(ctx.tz, date, time)?);
        }

        if let Some(line) = data.get("scores") {
            if let Some(scores) = parse_scores(line).map_err(DomainError::Validation)? {
                scores.apply(&mut patch);
            }
        }

        ctx.club.update_match(game, patch).await?;
        Ok(Committed::new("Матч обновлён.").then(ScreenRequest::Match { id: game }))
    }
}
