// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::{expect_row, parse_code, set_column, set_patch, PgClubRepo};
use crate::club::{MatchRepo, RepoResult};
use crate::error::domain_error;
use async_trait::async_trait;
use cb_core::{DomainError, Match, MatchId, MatchPatch, NewMatch, TeamId, TournamentId};
use chrono::{DateTime, Utc};
use sqlx::{FromRow, Postgres, QueryBuilder};

const ENTITY: &str = "match";

const COLUMNS: &str = "SELECT id, tournament_id, team_id, opponent_name, start_time, location,
        status, score_ht, score_ft, score_et, score_pen, score_final_us, score_final_them
    FROM matches";

#[derive(FromRow)]
struct MatchRow {
    id: i64,
    tournament_id: i64,
    team_id: i64,
    opponent_name: String,
    start_time: DateTime<Utc>,
    location: Option<String>,
    status: String,
    score_ht: Option<String>,
    score_ft: Option<String>,
    score_et: Option<String>,
    score_pen: Option<String>,
    score_final_us: Option<i32>,
    score_final_them: Option<i32>,
}

impl TryFrom<MatchRow> for Match {
    type Error = DomainError;

    fn try_from(row: MatchRow) -> Result<Self, Self::Error> {
        Ok(Match {
            id: MatchId::new(row.id),
            tournament_id: TournamentId::new(row.tournament_id),
            team_id: TeamId::new(row.team_id),
            opponent: row.opponent_name,
            start_time: row.start_time,
            location: row.location,
            status: parse_code(&row.status)?,
            score_ht: row.score_ht,
            score_ft: row.score_ft,
            score_et: row.score_et,
            score_pen: row.score_pen,
            final_us: row.score_final_us,
            final_them: row.score_final_them,
        })
    }
}

#[async_trait]
impl MatchRepo for PgClubRepo {
    async fn list_matches(&self, tournament: TournamentId, team: TeamId) -> RepoResult<Vec<Match>> {
        let rows = sqlx::query_as::<_, MatchRow>(&format!(
            "{COLUMNS} WHERE tournament_id = $1 AND team_id = $2 ORDER BY start_time"
        ))
        .bind(tournament.get())
        .bind(team.get())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| domain_error(ENTITY, e))?;
        rows.into_iter().map(Match::try_from).collect()
    }

    async fn get_match(&self, id: MatchId) -> RepoResult<Match> {
        let row = sqlx::query_as::<_, MatchRow>(&format!("{COLUMNS} WHERE id = $1"))
            .bind(id.get())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| domain_error(ENTITY, e))?;
        Match::try_from(row)
    }

    async fn create_match(&self, m: NewMatch) -> RepoResult<MatchId> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO matches (tournament_id, team_id, opponent_name, start_time, location, status)
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING id",
        )
        .bind(m.tournament_id.get())
        .bind(m.team_id.get())
        .bind(m.opponent)
        .bind(m.start_time)
        .bind(m.location)
        .bind(m.status.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| domain_error(ENTITY, e))?;
        Ok(MatchId::new(id))
    }

    async fn update_match(&self, id: MatchId, patch: MatchPatch) -> RepoResult<()> {
        if patch.is_empty() {
            return Ok(());
        }
        let mut qb = QueryBuilder::<Postgres>::new("UPDATE matches SET ");
        let mut set = qb.separated(", ");
        if let Some(start) = patch.start_time {
            set_column!(set, "start_time", start);
        }
        set_patch!(set, "location", patch.location);
        if let Some(status) = patch.status {
            set_column!(set, "status", status.as_str());
        }
        set_patch!(set, "score_ht", patch.score_ht);
        set_patch!(set, "score_ft", patch.score_ft);
        set_patch!(set, "score_et", patch.score_et);
        set_patch!(set, "score_pen", patch.score_pen);
        set_patch!(set, "score_final_us", patch.final_us);
        set_patch!(set, "score_final_them", patch.final_them);
        if let Some(opponent) = patch.opponent {
            set_column!(set, "opponent_name", opponent);
        }
        set.push("updated_at = NOW()");
        qb.push(" WHERE id = ").push_bind(id.get());

        let result = qb
            .build()
            .execute(&self.pool)
            .await
            .map_err(|e| domain_error(ENTITY, e))?;
        expect_row(ENTITY, result)
    }
}
