// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Team and player cards

use super::{
    date_patch, id, optional_date, replacement, text, text_patch, CREATE_PLAYER, CREATE_TEAM,
    EDIT_PLAYER, EDIT_TEAM,
};
use crate::screens::ScreenRequest;
use crate::wizard::{Committed, FailurePolicy, FieldStep, Flow, FlowContext, Prompt, Rule, Step};
use async_trait::async_trait;
use cb_core::{DomainError, NewPlayer, NewTeam, PlayerPatch, TeamPatch, WizardData};

fn note_step(orig: bool) -> Box<dyn Step> {
    if orig {
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
        .boxed()
    } else {
        FieldStep::new(
            "note",
            Prompt::Fixed("Введите примечание (или '-' для пропуска)."),
            Rule::Optional,
        )
        .boxed()
    }
}

// ── Teams ───────────────────────────────────────────────────────────────────

pub struct CreateTeam {
    steps: Vec<Box<dyn Step>>,
}

impl Default for CreateTeam {
    fn default() -> Self {
        Self {
            steps: vec![
                FieldStep::new(
                    "name",
                    Prompt::Fixed("Создание команды: введите название."),
                    Rule::Required {
                        blank: "Название не может быть пустым. Повторите ввод.",
                    },
                )
                .boxed(),
                FieldStep::new(
                    "short_code",
                    Prompt::Fixed("Введите короткий код (например, U12)."),
                    Rule::Required {
                        blank: "Короткий код не может быть пустым.",
                    },
                )
                .boxed(),
                FieldStep::new(
                    "active",
                    Prompt::Fixed("Команда активна? (да/нет, по умолчанию да)."),
                    Rule::YesNo {
                        default: Some(true),
                        invalid: "Введите 'да' или 'нет'.",
                    },
                )
                .boxed(),
                note_step(false),
            ],
        }
    }
}

#[async_trait]
impl Flow for CreateTeam {
    fn tag(&self) -> &'static str {
        CREATE_TEAM
    }

    fn steps(&self) -> &[Box<dyn Step>] {
        &self.steps
    }

    fn failure_prefix(&self) -> &'static str {
        "Не удалось создать команду"
    }

    async fn commit(&self, ctx: &FlowContext<'_>, data: &WizardData) -> Result<Committed, DomainError> {
        let team = NewTeam {
            name: text(data, "name").unwrap_or_default(),
            short_code: text(data, "short_code").unwrap_or_default(),
            active: data.parse("active").unwrap_or(true),
            note: text(data, "note"),
        };
        ctx.club.create_team(team).await?;
        Ok(Committed::new("Команда создана.").then(ScreenRequest::Teams))
    }
}

pub struct EditTeam {
    steps: Vec<Box<dyn Step>>,
}

impl Default for EditTeam {
    fn default() -> Self {
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
                    "code",
                    Prompt::Fixed("Введите новый короткий код (или '-' чтобы оставить)."),
                    Rule::Optional,
                )
                .boxed(),
                FieldStep::new(
                    "active",
                    Prompt::Fixed("Команда активна? (да/нет, '-' чтобы оставить текущее значение)."),
                    Rule::YesNo {
                        default: None,
                        invalid: "Введите 'да', 'нет' или '-' чтобы оставить без изменений.",
                    },
                )
                .boxed(),
                note_step(true),
            ],
        }
    }
}

#[async_trait]
impl Flow for EditTeam {
    fn tag(&self) -> &'static str {
        EDIT_TEAM
    }

    fn steps(&self) -> &[Box<dyn Step>] {
        &self.steps
    }

    fn failure_policy(&self) -> FailurePolicy {
        FailurePolicy::Keep
    }

    fn failure_prefix(&self) -> &'static str {
        "Не удалось обновить команду"
    }

    async fn commit(&self, ctx: &FlowContext<'_>, data: &WizardData) -> Result<Committed, DomainError> {
        let team = id(data, "id")?;
        let patch = TeamPatch {
            name: replacement(data, "name"),
            short_code: replacement(data, "code"),
            active: replacement(data, "active").and_then(|v| v.parse().ok()),
            note: text_patch(data, "note"),
        };
        ctx.club.update_team(team, patch).await?;
        Ok(Committed::new("Команда обновлена.").then(ScreenRequest::Team { id: team }))
    }
}

// ── Players ─────────────────────────────────────────────────────────────────

pub struct CreatePlayer {
    steps: Vec<Box<dyn Step>>,
}

impl Default for CreatePlayer {
    fn default() -> Self {
        Self {
            steps: vec![
                FieldStep::new(
                    "full_name",
                    Prompt::Fixed("Создание игрока: укажите ФИО."),
                    Rule::Required {
                        blank: "ФИО не может быть пустым.",
                    },
                )
                .boxed(),
                FieldStep::new(
                    "birth_date",
                    Prompt::Fixed("Введите дату рождения (YYYY-MM-DD) или '-' для пропуска."),
                    Rule::Date {
                        required: false,
                        clearable: false,
                        invalid: "Неверный формат даты. Используйте YYYY-MM-DD.",
                    },
                )
                .boxed(),
                FieldStep::new(
                    "position",
                    Prompt::Fixed("Введите игровую позицию (или '-' для пропуска)."),
                    Rule::Optional,
                )
                .boxed(),
                note_step(false),
            ],
        }
    }
}

#[async_trait]
impl Flow for CreatePlayer {
    fn tag(&self) -> &'static str {
        CREATE_PLAYER
    }

    fn steps(&self) -> &[Box<dyn Step>] {
        &self.steps
    }

    fn failure_prefix(&self) -> &'static str {
        "Не удалось создать игрока"
    }

    async fn commit(&self, ctx: &FlowContext<'_>, data: &WizardData) -> Result<Committed, DomainError> {
        let player = NewPlayer {
            full_name: text(data, "full_name").unwrap_or_default(),
            birth_date: optional_date(data, "birth_date")?,
            position: text(data, "position"),
            active: true,
            note: text(data, "note"),
        };
        ctx.club.create_player(player).await?;
        Ok(Committed::new("Игрок создан.").then(ScreenRequest::Players { page: 1 }))
    }
}

pub struct EditPlayer {
    steps: Vec<Box<dyn Step>>,
}

fn active_prompt(data: &WizardData) -> String {
    let state = match data.parse::<bool>("orig_active") {
        Some(false) => "неактивен",
        _ => "активен",
    };
    format!("Игрок сейчас {state}.\nВведите 'да'/'нет' чтобы изменить активность или '-' чтобы оставить.")
}

impl Default for EditPlayer {
    fn default() -> Self {
        Self {
            steps: vec![
                FieldStep::new(
                    "full_name",
                    Prompt::Current {
                        label: "Текущее ФИО",
                        orig: "orig_name",
                        empty: "(пусто)",
                        ask: "Введите новое ФИО (или '-' чтобы оставить).",
                    },
                    Rule::Optional,
                )
                .boxed(),
                FieldStep::new(
                    "birth_date",
                    Prompt::Current {
                        label: "Текущая дата рождения",
                        orig: "orig_birth",
                        empty: "(не задана)",
                        ask: "Введите новую дату (YYYY-MM-DD), '-' чтобы оставить, 'удалить' чтобы очистить.",
                    },
                    Rule::Date {
                        required: false,
                        clearable: true,
                        invalid: "Неверный формат даты. Используйте YYYY-MM-DD, '-' или 'удалить'.",
                    },
                )
                .boxed(),
                FieldStep::new(
                    "position",
                    Prompt::Current {
                        label: "Текущая позиция",
                        orig: "orig_position",
                        empty: "(пусто)",
                        ask: "Введите новую позицию, '-' чтобы оставить, 'удалить' чтобы очистить.",
                    },
                    Rule::Clearable,
                )
                .boxed(),
                FieldStep::new(
                    "active",
                    Prompt::Custom(active_prompt),
                    Rule::YesNo {
                        default: None,
                        invalid: "Введите 'да', 'нет' или '-'.",
                    },
                )
                .boxed(),
                note_step(true),
            ],
        }
    }
}

#[async_trait]
impl Flow for EditPlayer {
    fn tag(&self) -> &'static str {
        EDIT_PLAYER
    }

    fn steps(&self) -> &[Box<dyn Step>] {
        &self.steps
    }

    fn failure_policy(&self) -> FailurePolicy {
        FailurePolicy::Keep
    }

    fn failure_prefix(&self) -> &'static str {
        "Не удалось обновить игрока"
    }

    async fn commit(&self, ctx: &FlowContext<'_>, data: &WizardData) -> Result<Committed, DomainError> {
        let player = id(data, "id")?;
        let page = data.parse::<u32>("return_page").filter(|p| *p > 0).unwrap_or(1);
        let patch = PlayerPatch {
            full_name: replacement(data, "full_name"),
            birth_date: date_patch(data, "birth_date")?,
            position: text_patch(data, "position"),
            active: replacement(data, "active").and_then(|v| v.parse().ok()),
            note: text_patch(data, "note"),
        };
        ctx.club.update_player(player, patch).await?;
        Ok(Committed::new("Игрок обновлён.").then(ScreenRequest::Player { id: player, page }))
    }
}
