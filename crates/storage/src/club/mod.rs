// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Repositories for club records.
//!
//! One trait per table family; [`ClubRepo`] bundles them so services can
//! hold a single `Arc<dyn ClubRepo>`.

mod pg;

pub use pg::PgClubRepo;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod memory;
#[cfg(any(test, feature = "test-support"))]
pub use memory::{MemoryClubRepo, Mutation};

use async_trait::async_trait;
use cb_core::{
    DomainError, LineupEntry, LineupPatch, LineupRole, Match, MatchEvent, MatchId, MatchPatch,
    NewMatch, NewMatchEvent, NewPlayer, NewTeam, NewTournament, Pagination, Player, PlayerId,
    PlayerPatch, RosterAssignment, RosterEntry, RosterKey, Team, TeamId, TeamPatch, Tournament,
    TournamentId, TournamentPatch, TournamentStatus, TournamentTeam,
};

pub type RepoResult<T> = Result<T, DomainError>;

#[async_trait]
pub trait TeamRepo: Send + Sync {
    /// Active teams ordered by name
    async fn list_active_teams(&self) -> RepoResult<Vec<Team>>;
    async fn get_team(&self, id: TeamId) -> RepoResult<Team>;
    async fn create_team(&self, team: NewTeam) -> RepoResult<TeamId>;
    async fn update_team(&self, id: TeamId, patch: TeamPatch) -> RepoResult<()>;
}

#[async_trait]
pub trait PlayerRepo: Send + Sync {
    /// Players ordered by full name
    async fn list_players(&self, page: Pagination) -> RepoResult<Vec<Player>>;
    async fn count_players(&self) -> RepoResult<i64>;
    async fn get_player(&self, id: PlayerId) -> RepoResult<Player>;
    async fn create_player(&self, player: NewPlayer) -> RepoResult<PlayerId>;
    async fn update_player(&self, id: PlayerId, patch: PlayerPatch) -> RepoResult<()>;
    /// Roster slots held by the player, most recently touched first
    async fn list_assignments(&self, player: PlayerId) -> RepoResult<Vec<RosterAssignment>>;
}

#[async_trait]
pub trait TournamentRepo: Send + Sync {
    /// Ordered by start date (undated last), then name
    async fn list_tournaments(
        &self,
        status: Option<TournamentStatus>,
    ) -> RepoResult<Vec<Tournament>>;
    async fn get_tournament(&self, id: TournamentId) -> RepoResult<Tournament>;
    async fn create_tournament(&self, tournament: NewTournament) -> RepoResult<TournamentId>;
    async fn update_tournament(&self, id: TournamentId, patch: TournamentPatch)
        -> RepoResult<()>;
}

#[async_trait]
pub trait RosterRepo: Send + Sync {
    /// Teams with at least one roster entry, ordered by name
    async fn list_tournament_teams(&self, tournament: TournamentId)
        -> RepoResult<Vec<TournamentTeam>>;
    /// Ordered by shirt number (unnumbered last), then name
    async fn list_roster(
        &self,
        tournament: TournamentId,
        team: TeamId,
    ) -> RepoResult<Vec<RosterEntry>>;
    async fn add_roster_player(&self, key: RosterKey, number: Option<i32>) -> RepoResult<()>;
    async fn update_roster_number(&self, key: RosterKey, number: Option<i32>) -> RepoResult<()>;
    async fn remove_roster_player(&self, key: RosterKey) -> RepoResult<()>;
    /// Whether the player appears in any lineup or event of this team's
    /// matches in the tournament
    async fn has_participation(&self, key: RosterKey) -> RepoResult<bool>;
    async fn roster_size(&self, tournament: TournamentId, team: TeamId) -> RepoResult<i64>;
    async fn is_in_roster(&self, key: RosterKey) -> RepoResult<bool>;
}

#[async_trait]
pub trait MatchRepo: Send + Sync {
    /// Ordered by start time
    async fn list_matches(&self, tournament: TournamentId, team: TeamId)
        -> RepoResult<Vec<Match>>;
    async fn get_match(&self, id: MatchId) -> RepoResult<Match>;
    async fn create_match(&self, m: NewMatch) -> RepoResult<MatchId>;
    async fn update_match(&self, id: MatchId, patch: MatchPatch) -> RepoResult<()>;
}

#[async_trait]
pub trait LineupRepo: Send + Sync {
    /// Starters first, then by shirt number and name
    async fn get_lineup(&self, m: MatchId) -> RepoResult<Vec<LineupEntry>>;
    async fn upsert_lineup(
        &self,
        m: MatchId,
        player: PlayerId,
        role: LineupRole,
        number_override: Option<i32>,
        note: Option<String>,
    ) -> RepoResult<()>;
    async fn update_lineup(&self, m: MatchId, player: PlayerId, patch: LineupPatch)
        -> RepoResult<()>;
    async fn remove_lineup(&self, m: MatchId, player: PlayerId) -> RepoResult<()>;
    async fn lineup_has_player(&self, m: MatchId, player: PlayerId) -> RepoResult<bool>;
    async fn lineup_player_ids(&self, m: MatchId) -> RepoResult<Vec<PlayerId>>;
}

#[async_trait]
pub trait EventRepo: Send + Sync {
    /// Events in the order they were recorded
    async fn list_events(&self, m: MatchId) -> RepoResult<Vec<MatchEvent>>;
    async fn add_event(&self, event: NewMatchEvent) -> RepoResult<i64>;
}

/// Every club repository behind one object.
pub trait ClubRepo:
    TeamRepo + PlayerRepo + TournamentRepo + RosterRepo + MatchRepo + LineupRepo + EventRepo
{
}

impl<T> ClubRepo for T where
    T: TeamRepo + PlayerRepo + TournamentRepo + RosterRepo + MatchRepo + LineupRepo + EventRepo
{
}
