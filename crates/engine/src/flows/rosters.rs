// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::{id, optional_number, ROSTER_ADD_PLAYER, ROSTER_CHANGE_NUMBER};
use crate::screens::ScreenRequest;
use crate::wizard::{Committed, FieldStep, Flow, FlowContext, Prompt, Rule, Step};
use async_trait::async_trait;
use cb_core::{DomainError, RosterKey, WizardData};

fn roster_key(data: &WizardData) -> Result<RosterKey, DomainError> {
    Ok(RosterKey::new(
        id(data, "tournament_id")?,
        id(data, "team_id")?,
        id(data, "player_id")?,
    ))
}

fn back_to_roster(key: RosterKey) -> ScreenRequest {
    ScreenRequest::Roster {
        tournament: key.tournament_id,
        team: key.team_id,
    }
}

pub struct RosterAddPlayer {
    steps: Vec<Box<dyn Step>>,
}

impl Default for RosterAddPlayer {
    fn default() -> Self {
        Self {
            steps: vec![FieldStep::new(
                "number",
                Prompt::Fixed("Введите номер игрока в турнире (или '-' для пропуска)."),
                Rule::Number {
                    blank: None,
                    invalid: "Номер должен быть целым числом или '-' для пропуска.",
                },
            )
            .boxed()],
        }
    }
}

#[async_trait]
impl Flow for RosterAddPlayer {
    fn tag(&self) -> &'static str {
        ROSTER_ADD_PLAYER
    }

    fn steps(&self) -> &[Box<dyn Step>] {
        &self.steps
    }

    fn failure_prefix(&self) -> &'static str {
        "Не удалось добавить игрока"
    }

    async fn commit(&self, ctx: &FlowContext<'_>, data: &WizardData) -> Result<Committed, DomainError> {
        let key = roster_key(data)?;
        ctx.club
            .add_to_roster(key, optional_number(data, "number")?)
            .await?;
        Ok(Committed::new("Игрок добавлен в заявку.").then(back_to_roster(key)))
    }
}

pub struct RosterChangeNumber {
    steps: Vec<Box<dyn Step>>,
}

impl Default for RosterChangeNumber {
    fn default() -> Self {
        Self {
            steps: vec![FieldStep::new(
                "number",
                Prompt::Fixed("Введите новый номер игрока (или '-' для удаления номера)."),
                Rule::Number {
                    blank: None,
                    invalid: "Номер должен быть целым числом или '-' для удаления.",
                },
            )
            .boxed()],
        }
    }
}

#[async_trait]
impl Flow for RosterChangeNumber {
    fn tag(&self) -> &'static str {
        ROSTER_CHANGE_NUMBER
    }

    fn steps(&self) -> &[Box<dyn Step>] {
        &self.steps
    }

    fn failure_prefix(&self) -> &'static str {
        "Не удалось изменить номер"
    }

    async fn commit(&self, ctx: &FlowContext<'_>, data: &WizardData) -> Result<Committed, DomainError> {
        let key = roster_key(data)?;
        ctx.club
            .change_roster_number(key, optional_number(data, "number")?)
            .await?;
        Ok(Committed::new("Номер обновлён.").then(back_to_roster(key)))
    }
}
