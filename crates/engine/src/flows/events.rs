// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-match flows started from the lineup and events screens. The
//! players are picked with buttons; the wizard only asks for what is
//! typed.

use super::{id, parse_answer, text, EVENT_CARD, EVENT_GOAL, EVENT_SUB, LINEUP_NUMBER};
use crate::screens::ScreenRequest;
use crate::wizard::{Committed, FailurePolicy, FieldStep, Flow, FlowContext, Prompt, Rule, Step};
use async_trait::async_trait;
use cb_core::{CardType, DomainError, LineupPatch, MatchId, PlayerId, WizardData};

const BLANK_TIME: &str = "Время события не может быть пустым.";

fn time_step(prompt: &'static str) -> Box<dyn Step> {
    FieldStep::new("time", Prompt::Fixed(prompt), Rule::Required { blank: BLANK_TIME }).boxed()
}

fn time_text(data: &WizardData) -> Result<String, DomainError> {
    text(data, "time").ok_or_else(|| DomainError::validation("time"))
}

pub struct LineupNumber {
    steps: Vec<Box<dyn Step>>,
}

impl Default for LineupNumber {
    fn default() -> Self {
        Self {
            steps: vec![FieldStep::new(
                "number",
                Prompt::Fixed("Введите номер игрока на матч (или '-' чтобы очистить)."),
                Rule::Number {
                    blank: Some("Введите номер или '-' для удаления."),
                    invalid: "Номер должен быть целым числом.",
                },
            )
            .boxed()],
        }
    }
}

#[async_trait]
impl Flow for LineupNumber {
    fn tag(&self) -> &'static str {
        LINEUP_NUMBER
    }

    fn steps(&self) -> &[Box<dyn Step>] {
        &self.steps
    }

    fn failure_policy(&self) -> FailurePolicy {
        FailurePolicy::Keep
    }

    fn failure_prefix(&self) -> &'static str {
        "Не удалось обновить номер"
    }

    async fn commit(&self, ctx: &FlowContext<'_>, data: &WizardData) -> Result<Committed, DomainError> {
        let game: MatchId = id(data, "match_id")?;
        let player: PlayerId = id(data, "player_id")?;
        let patch = LineupPatch {
            number_override: data.patch("number").try_map(|n| parse_answer(n, "number"))?,
            ..LineupPatch::default()
        };
        ctx.club.update_lineup(game, player, patch).await?;
        Ok(Committed::new("Номер в составе обновлён.").then(ScreenRequest::Lineup { game }))
    }
}

pub struct EventGoal {
    steps: Vec<Box<dyn Step>>,
}

impl Default for EventGoal {
    fn default() -> Self {
        Self {
            steps: vec![time_step("Введите время гола (например, 45+2).")],
        }
    }
}

#[async_trait]
impl Flow for EventGoal {
    fn tag(&self) -> &'static str {
        EVENT_GOAL
    }

    fn steps(&self) -> &[Box<dyn Step>] {
        &self.steps
    }

    fn failure_policy(&self) -> FailurePolicy {
        FailurePolicy::Keep
    }

    fn failure_prefix(&self) -> &'static str {
        "Не удалось добавить гол"
    }

    async fn commit(&self, ctx: &FlowContext<'_>, data: &WizardData) -> Result<Committed, DomainError> {
        let game = id(data, "match_id")?;
        ctx.club
            .add_goal(game, id(data, "player_id")?, &time_text(data)?)
            .await?;
        Ok(Committed::new("Гол добавлен.").then(ScreenRequest::Match { id: game }))
    }
}

pub struct EventCard {
    steps: Vec<Box<dyn Step>>,
}

impl Default for EventCard {
    fn default() -> Self {
        Self {
            steps: vec![time_step("Введите время карточки (например, 12 или 90+3).")],
        }
    }
}

#[async_trait]
impl Flow for EventCard {
    fn tag(&self) -> &'static str {
        EVENT_CARD
    }

    fn steps(&self) -> &[Box<dyn Step>] {
        &self.steps
    }

    fn failure_policy(&self) -> FailurePolicy {
        FailurePolicy::Keep
    }

    fn failure_prefix(&self) -> &'static str {
        "Не удалось добавить карточку"
    }

    async fn commit(&self, ctx: &FlowContext<'_>, data: &WizardData) -> Result<Committed, DomainError> {
        let game = id(data, "match_id")?;
        let card: CardType = data
            .get("card_type")
            .ok_or_else(|| DomainError::validation("card_type"))
            .and_then(|c| parse_answer(c, "card_type"))?;
        ctx.club
            .add_card(game, id(data, "player_id")?, card, &time_text(data)?)
            .await?;
        Ok(Committed::new("Карточка добавлена.").then(ScreenRequest::Match { id: game }))
    }
}

pub struct EventSub {
    steps: Vec<Box<dyn Step>>,
}

impl Default for EventSub {
    fn default() -> Self {
        Self {
            steps: vec![time_step("Введите время замены (например, 60).")],
        }
    }
}

#[async_trait]
impl Flow for EventSub {
    fn tag(&self) -> &'static str {
        EVENT_SUB
    }

    fn steps(&self) -> &[Box<dyn Step>] {
        &self.steps
    }

    fn failure_policy(&self) -> FailurePolicy {
        FailurePolicy::Keep
    }

    fn failure_prefix(&self) -> &'static str {
        "Не удалось добавить замену"
    }

    async fn commit(&self, ctx: &FlowContext<'_>, data: &WizardData) -> Result<Committed, DomainError> {
        let game = id(data, "match_id")?;
        ctx.club
            .add_substitution(game, id(data, "out_id")?, id(data, "in_id")?, &time_text(data)?)
            .await?;
        Ok(Committed::new("Замена добавлена.").then(ScreenRequest::Match { id: game }))
    }
}
