// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::{
    date_patch, id, optional_date, parse_answer, replacement, text, text_patch, CREATE_TOURNAMENT,
    EDIT_TOURNAMENT,
};
use crate::screens::ScreenRequest;
use crate::wizard::{Committed, FailurePolicy, FieldStep, Flow, FlowContext, Prompt, Rule, Step};
use async_trait::async_trait;
use cb_core::{DomainError, NewTournament, TournamentPatch, TournamentStatus, WizardData};

const STATUSES: &[&str] = &["planned", "active", "finished"];

pub struct CreateTournament {
    steps: Vec<Box<dyn Step>>,
}

impl Default for CreateTournament {
    fn default() -> Self {
        let date = |key: &'static str, prompt: &'static str| {
            FieldStep::new(
                key,
                Prompt::Fixed(prompt),
                Rule::Date {
                    required: false,
                    clearable: false,
                    invalid: "Неверный формат даты. Укажите YYYY-MM-DD.",
                },
            )
            .boxed()
        };
        Self {
            steps: vec![
                FieldStep::new(
                    "name",
                    Prompt::Fixed("Создание турнира: введите название."),
                    Rule::Required {
                        blank: "Название не может быть пустым. Повторите ввод.",
                    },
                )
                .boxed(),
                FieldStep::new(
                    "type",
                    Prompt::Fixed("Введите тип турнира (или '-' для пропуска)."),
                    Rule::Optional,
                )
                .boxed(),
                FieldStep::new(
                    "status",
                    Prompt::Fixed("Укажите статус (planned/active/finished)."),
                    Rule::Choice {
                        options: STATUSES,
                        default: Some("planned"),
                        invalid: "Неверный статус. Попробуйте ещё раз.",
                    },
                )
                .boxed(),
                date(
                    "start_date",
                    "Введите дату начала в формате YYYY-MM-DD или '-' для пропуска.",
                ),
                date(
                    "end_date",
                    "Введите дату окончания в формате YYYY-MM-DD или '-' для пропуска.",
                ),
                FieldStep::new(
                    "note",
                    Prompt::Fixed("Введите примечание (или '-' для пропуска)."),
                    Rule::Optional,
                )
                .boxed(),
            ],
        }
    }
}

#[async_trait]
impl Flow for CreateTournament {
    fn tag(&self) -> &'static str {
        CREATE_TOURNAMENT
    }

    fn steps(&self) -> &[Box<dyn Step>] {
        &self.steps
    }

    fn failure_prefix(&self) -> &'static str {
        "Не удалось создать турнир"
    }

    async fn commit(&self, ctx: &FlowContext<'_>, data: &WizardData) -> Result<Committed, DomainError> {
        let status = match data.get("status") {
            Some(s) => parse_answer(s, "status")?,
            None => TournamentStatus::Planned,
        };
        let tournament = NewTournament {
            name: text(data, "name").unwrap_or_default(),
            kind: text(data, "type"),
            status,
            start_date: optional_date(data, "start_date")?,
            end_date: optional_date(data, "end_date")?,
            note: text(data, "note"),
        };
        ctx.club.create_tournament(tournament).await?;
        Ok(Committed::new("Турнир создан.").then(ScreenRequest::Tournaments { page: 1 }))
    }
}

pub struct EditTournament {
    steps: Vec<Box<dyn Step>>,
}

fn status_prompt(data: &WizardData) -> String {
    let current = data.get("orig_status").unwrap_or("planned");
    format!(
        "Текущий статус: {current}\nВведите новый статус (planned/active/finished) или '-' чтобы оставить."
    )
}

impl Default for EditTournament {
    fn default() -> Self {
        let date = |key: &'static str, label: &'static str, orig: &'static str| {
            FieldStep::new(
                key,
                Prompt::Current {
                    label,
                    orig,
                    empty: "(не задана)",
                    ask: "Введите новую дату (YYYY-MM-DD), '-' чтобы оставить, 'удалить' чтобы очистить.",
                },
                Rule::Date {
                    required: false,
                    clearable: true,
                    invalid: "Неверный формат даты. Используйте YYYY-MM-DD, '-' или 'удалить'.",
                },
            )
            .boxed()
        };
        Self {
            steps: vec![
                FieldStep::new(
                    "name",
                    Prompt::Current {
                        label: "Текущее название",
                        orig: "orig_name",
                        empty: "(пусто)",
                        ask: "Введите новое название (или '-' чтобы оставить).",
                    },
                    Rule::Optional,
                )
                .boxed(),
                FieldStep::new(
                    "type",
                    Prompt::Current {
                        label: "Текущий тип",
                        orig: "orig_type",
                        empty: "(пусто)",
                        ask: "Введите новый тип (или '-' чтобы оставить, 'удалить' чтобы очистить).",
                    },
                    Rule::Clearable,
                )
                .boxed(),
                FieldStep::new(
                    "status",
                    Prompt::Custom(status_prompt),
                    Rule::Choice {
                        options: STATUSES,
                        default: None,
                        invalid: "Недопустимый статус. Используйте planned/active/finished или '-'.",
                    },
                )
                .boxed(),
                date("start_date", "Текущая дата начала", "orig_start"),
                date("end_date", "Текущая дата окончания", "orig_end"),
                FieldStep::new(
                    "note",
                    Prompt::Current {
                        label: "Текущее примечание",
                        orig: "orig_note",
                        empty: "(пусто)",
                        ask: "Введите новое примечание, '-' чтобы оставить, 'удалить' чтобы очистить.",
                    },
                    Rule::Clearable,
                )
                .boxed(),
            ],
        }
    }
}

#[async_trait]
impl Flow for EditTournament {
    fn tag(&self) -> &'static str {
        EDIT_TOURNAMENT
    }

    fn steps(&self) -> &[Box<dyn Step>] {
        &self.steps
    }

    fn failure_policy(&self) -> FailurePolicy {
        FailurePolicy::Keep
    }

    fn failure_prefix(&self) -> &'static str {
        "Ошибка обновления турнира"
    }

    async fn commit(&self, ctx: &FlowContext<'_>, data: &WizardData) -> Result<Committed, DomainError> {
        let tournament = id(data, "id")?;
        let patch = TournamentPatch {
            name: replacement(data, "name"),
            kind: text_patch(data, "type"),
            status: replacement(data, "status")
                .map(|s| parse_answer(&s, "status"))
                .transpose()?,
            start_date: date_patch(data, "start_date")?,
            end_date: date_patch(data, "end_date")?,
            note: text_patch(data, "note"),
        };
        ctx.club.update_tournament(tournament, patch).await?;
        Ok(Committed::new("Турнир обновлён.").then(ScreenRequest::Tournaments { page: 1 }))
    }
}
