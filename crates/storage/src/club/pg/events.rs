// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::{parse_code, PgClubRepo};
use crate::club::{EventRepo, RepoResult};
use crate::error::domain_error;
use async_trait::async_trait;
use cb_core::{DomainError, MatchEvent, MatchId, NewMatchEvent, PlayerId};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

const ENTITY: &str = "match event";

#[derive(FromRow)]
struct EventRow {
    id: i64,
    match_id: i64,
    event_type: String,
    event_time: String,
    player_id_main: Option<i64>,
    player_id_alt: Option<i64>,
    card_type: Option<String>,
    player_main: Option<String>,
    player_alt: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<EventRow> for MatchEvent {
    type Error = DomainError;

    fn try_from(row: EventRow) -> Result<Self, Self::Error> {
        Ok(MatchEvent {
            id: row.id,
            match_id: MatchId::new(row.match_id),
            kind: parse_code(&row.event_type)?,
            time_text: row.event_time,
            player_main: row.player_id_main.map(PlayerId::new),
            player_alt: row.player_id_alt.map(PlayerId::new),
            card_type: row.card_type.as_deref().map(parse_code::<cb_core::CardType>).transpose()?,
            player_main_name: row.player_main,
            player_alt_name: row.player_alt,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl EventRepo for PgClubRepo {
    async fn list_events(&self, m: MatchId) -> RepoResult<Vec<MatchEvent>> {
        let rows = sqlx::query_as::<_, EventRow>(
            "SELECT me.id, me.match_id, me.event_type, me.event_time,
                    me.player_id_main, me.player_id_alt, me.card_type,
                    p1.full_name AS player_main, p2.full_name AS player_alt,
                    me.created_at
             FROM match_events me
             LEFT JOIN players p1 ON p1.id = me.player_id_main
             LEFT JOIN players p2 ON p2.id = me.player_id_alt
             WHERE me.match_id = $1
             ORDER BY me.created_at, me.id",
        )
        .bind(m.get())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| domain_error(ENTITY, e))?;
        rows.into_iter().map(MatchEvent::try_from).collect()
    }

    async fn add_event(&self, event: NewMatchEvent) -> RepoResult<i64> {
        sqlx::query_scalar(
            "INSERT INTO match_events
                 (match_id, event_type, event_time, player_id_main, player_id_alt, card_type)
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING id",
        )
        .bind(event.match_id.get())
        .bind(event.kind.as_str())
        .bind(event.time_text)
        .bind(event.player_main.map(PlayerId::get))
        .bind(event.player_alt.map(PlayerId::get))
        .bind(event.card_type.map(|c| c.as_str()))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| domain_error(ENTITY, e))
    }
}
