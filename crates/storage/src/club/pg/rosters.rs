// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::{expect_row, PgClubRepo};
use crate::club::{RepoResult, RosterRepo};
use crate::error::domain_error;
use async_trait::async_trait;
use cb_core::{PlayerId, RosterEntry, RosterKey, TeamId, TournamentId, TournamentTeam};
use sqlx::FromRow;

const ENTITY: &str = "roster entry";

#[derive(FromRow)]
struct TournamentTeamRow {
    id: i64,
    name: String,
    short_code: String,
}

#[derive(FromRow)]
struct RosterRow {
    tournament_id: i64,
    team_id: i64,
    player_id: i64,
    tournament_number: Option<i32>,
    full_name: String,
}

#[async_trait]
impl RosterRepo for PgClubRepo {
    async fn list_tournament_teams(
        &self,
        tournament: TournamentId,
    ) -> RepoResult<Vec<TournamentTeam>> {
        let rows = sqlx::query_as::<_, TournamentTeamRow>(
            "SELECT DISTINCT t.id, t.name, t.short_code
             FROM tournament_roster tr
             JOIN teams t ON t.id = tr.team_id
             WHERE tr.tournament_id = $1
             ORDER BY t.name",
        )
        .bind(tournament.get())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| domain_error(ENTITY, e))?;
        Ok(rows
            .into_iter()
            .map(|row| TournamentTeam {
                team_id: TeamId::new(row.id),
                team_name: row.name,
                short_code: row.short_code,
            })
            .collect())
    }

    async fn list_roster(
        &self,
        tournament: TournamentId,
        team: TeamId,
    ) -> RepoResult<Vec<RosterEntry>> {
        let rows = sqlx::query_as::<_, RosterRow>(
            "SELECT tr.tournament_id, tr.team_id, tr.player_id, tr.tournament_number, p.full_name
             FROM tournament_roster tr
             JOIN players p ON p.id = tr.player_id
             WHERE tr.tournament_id = $1 AND tr.team_id = $2
             ORDER BY COALESCE(tr.tournament_number, 999), p.full_name",
        )
        .bind(tournament.get())
        .bind(team.get())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| domain_error(ENTITY, e))?;
        Ok(rows
            .into_iter()
            .map(|row| RosterEntry {
                tournament_id: TournamentId::new(row.tournament_id),
                team_id: TeamId::new(row.team_id),
                player_id: PlayerId::new(row.player_id),
                player_name: row.full_name,
                number: row.tournament_number,
            })
            .collect())
    }

    async fn add_roster_player(&self, key: RosterKey, number: Option<i32>) -> RepoResult<()> {
        sqlx::query(
            "INSERT INTO tournament_roster (tournament_id, team_id, player_id, tournament_number)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(key.tournament_id.get())
        .bind(key.team_id.get())
        .bind(key.player_id.get())
        .bind(number)
        .execute(&self.pool)
        .await
        .map_err(|e| domain_error(ENTITY, e))?;
        Ok(())
    }

    async fn update_roster_number(&self, key: RosterKey, number: Option<i32>) -> RepoResult<()> {
        let result = sqlx::query(
            "UPDATE tournament_roster
             SET tournament_number = $4, updated_at = NOW()
             WHERE tournament_id = $1 AND team_id = $2 AND player_id = $3",
        )
        .bind(key.tournament_id.get())
        .bind(key.team_id.get())
        .bind(key.player_id.get())
        .bind(number)
        .execute(&self.pool)
        .await
        .map_err(|e| domain_error(ENTITY, e))?;
        expect_row(ENTITY, result)
    }

    async fn remove_roster_player(&self, key: RosterKey) -> RepoResult<()> {
        let result = sqlx::query(
            "DELETE FROM tournament_roster
             WHERE tournament_id = $1 AND team_id = $2 AND player_id = $3",
        )
        .bind(key.tournament_id.get())
        .bind(key.team_id.get())
        .bind(key.player_id.get())
        .execute(&self.pool)
        .await
        .map_err(|e| domain_error(ENTITY, e))?;
        expect_row(ENTITY, result)
    }

    async fn has_participation(&self, key: RosterKey) -> RepoResult<bool> {
        sqlx::query_scalar(
            "SELECT EXISTS (
                 SELECT 1 FROM match_lineups ml
                 JOIN matches m ON m.id = ml.match_id
                 WHERE m.tournament_id = $1 AND m.team_id = $2 AND ml.player_id = $3
             ) OR EXISTS (
                 SELECT 1 FROM match_events me
                 JOIN matches m ON m.id = me.match_id
                 WHERE m.tournament_id = $1 AND m.team_id = $2
                   AND (me.player_id_main = $3 OR me.player_id_alt = $3)
             )",
        )
        .bind(key.tournament_id.get())
        .bind(key.team_id.get())
        .bind(key.player_id.get())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| domain_error(ENTITY, e))
    }

    async fn roster_size(&self, tournament: TournamentId, team: TeamId) -> RepoResult<i64> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM tournament_roster WHERE tournament_id = $1 AND team_id = $2",
        )
        .bind(tournament.get())
        .bind(team.get())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| domain_error(ENTITY, e))
    }

    async fn is_in_roster(&self, key: RosterKey) -> RepoResult<bool> {
        sqlx::query_scalar(
            "SELECT EXISTS (
                 SELECT 1 FROM tournament_roster
                 WHERE tournament_id = $1 AND team_id = $2 AND player_id = $3
             )",
        )
        .bind(key.tournament_id.get())
        .bind(key.team_id.get())
        .bind(key.player_id.get())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| domain_error(ENTITY, e))
    }
}
