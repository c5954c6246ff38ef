// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory club repositories for tests
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{
    EventRepo, LineupRepo, MatchRepo, PlayerRepo, RepoResult, RosterRepo, TeamRepo,
    TournamentRepo,
};
use async_trait::async_trait;
use cb_core::{
    Clock, DomainError, FakeClock, LineupEntry, LineupPatch, LineupRole, Match, MatchEvent,
    MatchId, MatchPatch, NewMatch, NewMatchEvent, NewPlayer, NewTeam, NewTournament, Pagination,
    Player, PlayerId, PlayerPatch, RosterAssignment, RosterEntry, RosterKey, Team, TeamId,
    TeamPatch, Tournament, TournamentId, TournamentPatch, TournamentStatus, TournamentTeam,
};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Recorded write against the club tables
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    CreateTeam(NewTeam),
    UpdateTeam(TeamId, TeamPatch),
    CreatePlayer(NewPlayer),
    UpdatePlayer(PlayerId, PlayerPatch),
    CreateTournament(NewTournament),
    UpdateTournament(TournamentId, TournamentPatch),
    AddRosterPlayer(RosterKey, Option<i32>),
    UpdateRosterNumber(RosterKey, Option<i32>),
    RemoveRosterPlayer(RosterKey),
    CreateMatch(NewMatch),
    UpdateMatch(MatchId, MatchPatch),
    UpsertLineup {
        match_id: MatchId,
        player_id: PlayerId,
        role: LineupRole,
        number_override: Option<i32>,
        note: Option<String>,
    },
    UpdateLineup(MatchId, PlayerId, LineupPatch),
    RemoveLineup(MatchId, PlayerId),
    AddEvent(NewMatchEvent),
}

#[derive(Debug, Clone)]
struct LineupRow {
    role: LineupRole,
    number_override: Option<i32>,
    note: Option<String>,
}

#[derive(Default)]
struct ClubState {
    next_id: i64,
    teams: BTreeMap<TeamId, Team>,
    players: BTreeMap<PlayerId, Player>,
    tournaments: BTreeMap<TournamentId, Tournament>,
    roster: BTreeMap<RosterKey, Option<i32>>,
    matches: BTreeMap<MatchId, Match>,
    lineups: BTreeMap<(MatchId, PlayerId), LineupRow>,
    events: Vec<MatchEvent>,
    mutations: Vec<Mutation>,
    failing: bool,
}

impl ClubState {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn check(&self) -> RepoResult<()> {
        if self.failing {
            return Err(DomainError::Storage("injected failure".into()));
        }
        Ok(())
    }

    fn player_name(&self, id: PlayerId) -> Option<String> {
        self.players.get(&id).map(|p| p.full_name.clone())
    }
}

/// Club repositories backed by ordered maps, recording every write
#[derive(Clone)]
pub struct MemoryClubRepo {
    inner: Arc<Mutex<ClubState>>,
    clock: FakeClock,
}

impl Default for MemoryClubRepo {
    fn default() -> Self {
        Self::with_clock(FakeClock::new())
    }
}

impl MemoryClubRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clock(clock: FakeClock) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ClubState::default())),
            clock,
        }
    }

    /// Get all recorded writes
    pub fn mutations(&self) -> Vec<Mutation> {
        self.inner.lock().mutations.clone()
    }

    pub fn clear_mutations(&self) {
        self.inner.lock().mutations.clear();
    }

    /// Make every call fail with a storage error until reset.
    pub fn set_failing(&self, failing: bool) {
        self.inner.lock().failing = failing;
    }

    // Seeding helpers bypass mutation recording.

    pub fn seed_team(&self, team: NewTeam) -> TeamId {
        let now = self.clock.now();
        let mut state = self.inner.lock();
        let id = TeamId::new(state.next_id());
        state.teams.insert(id, build_team(id, team, now));
        id
    }

    pub fn seed_player(&self, player: NewPlayer) -> PlayerId {
        let now = self.clock.now();
        let mut state = self.inner.lock();
        let id = PlayerId::new(state.next_id());
        state.players.insert(id, build_player(id, player, now));
        id
    }

    pub fn seed_tournament(&self, tournament: NewTournament) -> TournamentId {
        let now = self.clock.now();
        let mut state = self.inner.lock();
        let id = TournamentId::new(state.next_id());
        state.tournaments.insert(id, build_tournament(id, tournament, now));
        id
    }

    pub fn seed_roster(&self, key: RosterKey, number: Option<i32>) {
        self.inner.lock().roster.insert(key, number);
    }

    pub fn seed_match(&self, m: NewMatch) -> MatchId {
        let mut state = self.inner.lock();
        let id = MatchId::new(state.next_id());
        state.matches.insert(id, build_match(id, m));
        id
    }

    pub fn seed_lineup(&self, m: MatchId, player: PlayerId, role: LineupRole) {
        self.inner.lock().lineups.insert(
            (m, player),
            LineupRow {
                role,
                number_override: None,
                note: None,
            },
        );
    }

    pub fn team(&self, id: TeamId) -> Option<Team> {
        self.inner.lock().teams.get(&id).cloned()
    }

    pub fn player(&self, id: PlayerId) -> Option<Player> {
        self.inner.lock().players.get(&id).cloned()
    }

    pub fn tournament(&self, id: TournamentId) -> Option<Tournament> {
        self.inner.lock().tournaments.get(&id).cloned()
    }

    pub fn game(&self, id: MatchId) -> Option<Match> {
        self.inner.lock().matches.get(&id).cloned()
    }

    pub fn events(&self) -> Vec<MatchEvent> {
        self.inner.lock().events.clone()
    }
}

fn build_team(id: TeamId, team: NewTeam, now: chrono::DateTime<chrono::Utc>) -> Team {
    Team {
        id,
        name: team.name,
        short_code: team.short_code,
        active: team.active,
        note: team.note,
        created_at: now,
        updated_at: now,
    }
}

fn build_player(id: PlayerId, player: NewPlayer, now: chrono::DateTime<chrono::Utc>) -> Player {
    Player {
        id,
        full_name: player.full_name,
        birth_date: player.birth_date,
        position: player.position,
        active: player.active,
        note: player.note,
        created_at: now,
        updated_at: now,
    }
}

fn build_tournament(
    id: TournamentId,
    t: NewTournament,
    now: chrono::DateTime<chrono::Utc>,
) -> Tournament {
    Tournament {
        id,
        name: t.name,
        kind: t.kind,
        status: t.status,
        start_date: t.start_date,
        end_date: t.end_date,
        note: t.note,
        created_at: now,
        updated_at: now,
    }
}

fn build_match(id: MatchId, m: NewMatch) -> Match {
    Match {
        id,
        tournament_id: m.tournament_id,
        team_id: m.team_id,
        opponent: m.opponent,
        start_time: m.start_time,
        location: m.location,
        status: m.status,
        score_ht: None,
        score_ft: None,
        score_et: None,
        score_pen: None,
        final_us: None,
        final_them: None,
    }
}

#[async_trait]
impl TeamRepo for MemoryClubRepo {
    async fn list_active_teams(&self) -> RepoResult<Vec<Team>> {
        let state = self.inner.lock();
        state.check()?;
        let mut teams: Vec<Team> = state.teams.values().filter(|t| t.active).cloned().collect();
        teams.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(teams)
    }

    async fn get_team(&self, id: TeamId) -> RepoResult<Team> {
        let state = self.inner.lock();
        state.check()?;
        state.teams.get(&id).cloned().ok_or(DomainError::NotFound("team"))
    }

    async fn create_team(&self, team: NewTeam) -> RepoResult<TeamId> {
        let now = self.clock.now();
        let mut state = self.inner.lock();
        state.check()?;
        state.mutations.push(Mutation::CreateTeam(team.clone()));
        let id = TeamId::new(state.next_id());
        state.teams.insert(id, build_team(id, team, now));
        Ok(id)
    }

    async fn update_team(&self, id: TeamId, patch: TeamPatch) -> RepoResult<()> {
        let now = self.clock.now();
        let mut state = self.inner.lock();
        state.check()?;
        state.mutations.push(Mutation::UpdateTeam(id, patch.clone()));
        let team = state.teams.get_mut(&id).ok_or(DomainError::NotFound("team"))?;
        if let Some(name) = patch.name {
            team.name = name;
        }
        if let Some(code) = patch.short_code {
            team.short_code = code;
        }
        if let Some(active) = patch.active {
            team.active = active;
        }
        patch.note.apply_to(&mut team.note);
        team.updated_at = now;
        Ok(())
    }
}

#[async_trait]
impl PlayerRepo for MemoryClubRepo {
    async fn list_players(&self, page: Pagination) -> RepoResult<Vec<Player>> {
        let state = self.inner.lock();
        state.check()?;
        let mut players: Vec<Player> = state.players.values().cloned().collect();
        players.sort_by(|a, b| a.full_name.cmp(&b.full_name));
        Ok(players
            .into_iter()
            .skip(page.offset as usize)
            .take(page.limit as usize)
            .collect())
    }

    async fn count_players(&self) -> RepoResult<i64> {
        let state = self.inner.lock();
        state.check()?;
        Ok(state.players.len() as i64)
    }

    async fn get_player(&self, id: PlayerId) -> RepoResult<Player> {
        let state = self.inner.lock();
        state.check()?;
        state.players.get(&id).cloned().ok_or(DomainError::NotFound("player"))
    }

    async fn create_player(&self, player: NewPlayer) -> RepoResult<PlayerId> {
        let now = self.clock.now();
        let mut state = self.inner.lock();
        state.check()?;
        state.mutations.push(Mutation::CreatePlayer(player.clone()));
        let id = PlayerId::new(state.next_id());
        state.players.insert(id, build_player(id, player, now));
        Ok(id)
    }

    async fn update_player(&self, id: PlayerId, patch: PlayerPatch) -> RepoResult<()> {
        let now = self.clock.now();
        let mut state = self.inner.lock();
        state.check()?;
        state.mutations.push(Mutation::UpdatePlayer(id, patch.clone()));
        let player = state.players.get_mut(&id).ok_or(DomainError::NotFound("player"))?;
        if let Some(name) = patch.full_name {
            player.full_name = name;
        }
        patch.birth_date.apply_to(&mut player.birth_date);
        patch.position.apply_to(&mut player.position);
        if let Some(active) = patch.active {
            player.active = active;
        }
        patch.note.apply_to(&mut player.note);
        player.updated_at = now;
        Ok(())
    }

    async fn list_assignments(&self, player: PlayerId) -> RepoResult<Vec<RosterAssignment>> {
        let state = self.inner.lock();
        state.check()?;
        Ok(state
            .roster
            .iter()
            .filter(|(key, _)| key.player_id == player)
            .map(|(key, number)| RosterAssignment {
                tournament_id: key.tournament_id,
                team_id: key.team_id,
                team_name: state
                    .teams
                    .get(&key.team_id)
                    .map(|t| t.name.clone())
                    .unwrap_or_default(),
                number: *number,
            })
            .collect())
    }
}

#[async_trait]
impl TournamentRepo for MemoryClubRepo {
    async fn list_tournaments(
        &self,
        status: Option<TournamentStatus>,
    ) -> RepoResult<Vec<Tournament>> {
        let state = self.inner.lock();
        state.check()?;
        let mut list: Vec<Tournament> = state
            .tournaments
            .values()
            .filter(|t| status.is_none_or(|s| t.status == s))
            .cloned()
            .collect();
        list.sort_by(|a, b| {
            let key = |t: &Tournament| (t.start_date.is_none(), t.start_date, t.name.clone());
            key(a).cmp(&key(b))
        });
        Ok(list)
    }

    async fn get_tournament(&self, id: TournamentId) -> RepoResult<Tournament> {
        let state = self.inner.lock();
        state.check()?;
        state.tournaments.get(&id).cloned().ok_or(DomainError::NotFound("tournament"))
    }

    async fn create_tournament(&self, tournament: NewTournament) -> RepoResult<TournamentId> {
        let now = self.clock.now();
        let mut state = self.inner.lock();
        state.check()?;
        state.mutations.push(Mutation::CreateTournament(tournament.clone()));
        let id = TournamentId::new(state.next_id());
        state.tournaments.insert(id, build_tournament(id, tournament, now));
        Ok(id)
    }

    async fn update_tournament(
        &self,
        id: TournamentId,
        patch: TournamentPatch,
    ) -> RepoResult<()> {
        let now = self.clock.now();
        let mut state = self.inner.lock();
        state.check()?;
        state.mutations.push(Mutation::UpdateTournament(id, patch.clone()));
        let t = state.tournaments.get_mut(&id).ok_or(DomainError::NotFound("tournament"))?;
        if let Some(name) = patch.name {
            t.name = name;
        }
        patch.kind.apply_to(&mut t.kind);
        if let Some(status) = patch.status {
            t.status = status;
        }
        patch.start_date.apply_to(&mut t.start_date);
        patch.end_date.apply_to(&mut t.end_date);
        patch.note.apply_to(&mut t.note);
        t.updated_at = now;
        Ok(())
    }
}

#[async_trait]
impl RosterRepo for MemoryClubRepo {
    async fn list_tournament_teams(
        &self,
        tournament: TournamentId,
    ) -> RepoResult<Vec<TournamentTeam>> {
        let state = self.inner.lock();
        state.check()?;
        let mut ids: Vec<TeamId> = state
            .roster
            .keys()
            .filter(|k| k.tournament_id == tournament)
            .map(|k| k.team_id)
            .collect();
        ids.dedup();
        let mut teams: Vec<TournamentTeam> = ids
            .into_iter()
            .filter_map(|id| state.teams.get(&id))
            .map(|t| TournamentTeam {
                team_id: t.id,
                team_name: t.name.clone(),
                short_code: t.short_code.clone(),
            })
            .collect();
        teams.sort_by(|a, b| a.team_name.cmp(&b.team_name));
        Ok(teams)
    }

    async fn list_roster(
        &self,
        tournament: TournamentId,
        team: TeamId,
    ) -> RepoResult<Vec<RosterEntry>> {
        let state = self.inner.lock();
        state.check()?;
        let mut entries: Vec<RosterEntry> = state
            .roster
            .iter()
            .filter(|(k, _)| k.tournament_id == tournament && k.team_id == team)
            .map(|(k, number)| RosterEntry {
                tournament_id: k.tournament_id,
                team_id: k.team_id,
                player_id: k.player_id,
                player_name: state.player_name(k.player_id).unwrap_or_default(),
                number: *number,
            })
            .collect();
        entries.sort_by(|a, b| {
            (a.number.unwrap_or(999), &a.player_name).cmp(&(b.number.unwrap_or(999), &b.player_name))
        });
        Ok(entries)
    }

    async fn add_roster_player(&self, key: RosterKey, number: Option<i32>) -> RepoResult<()> {
        let mut state = self.inner.lock();
        state.check()?;
        state.mutations.push(Mutation::AddRosterPlayer(key, number));
        if state.roster.contains_key(&key) {
            return Err(DomainError::Conflict("roster entry already exists".into()));
        }
        state.roster.insert(key, number);
        Ok(())
    }

    async fn update_roster_number(&self, key: RosterKey, number: Option<i32>) -> RepoResult<()> {
        let mut state = self.inner.lock();
        state.check()?;
        state.mutations.push(Mutation::UpdateRosterNumber(key, number));
        let slot = state.roster.get_mut(&key).ok_or(DomainError::NotFound("roster entry"))?;
        *slot = number;
        Ok(())
    }

    async fn remove_roster_player(&self, key: RosterKey) -> RepoResult<()> {
        let mut state = self.inner.lock();
        state.check()?;
        state.mutations.push(Mutation::RemoveRosterPlayer(key));
        state.roster.remove(&key).map(|_| ()).ok_or(DomainError::NotFound("roster entry"))
    }

    async fn has_participation(&self, key: RosterKey) -> RepoResult<bool> {
        let state = self.inner.lock();
        state.check()?;
        let in_scope = |m: MatchId| {
            state
                .matches
                .get(&m)
                .is_some_and(|m| m.tournament_id == key.tournament_id && m.team_id == key.team_id)
        };
        let in_lineup = state
            .lineups
            .keys()
            .any(|(m, p)| *p == key.player_id && in_scope(*m));
        let in_events = state.events.iter().any(|e| {
            in_scope(e.match_id)
                && (e.player_main == Some(key.player_id) || e.player_alt == Some(key.player_id))
        });
        Ok(in_lineup || in_events)
    }

    async fn roster_size(&self, tournament: TournamentId, team: TeamId) -> RepoResult<i64> {
        let state = self.inner.lock();
        state.check()?;
        Ok(state
            .roster
            .keys()
            .filter(|k| k.tournament_id == tournament && k.team_id == team)
            .count() as i64)
    }

    async fn is_in_roster(&self, key: RosterKey) -> RepoResult<bool> {
        let state = self.inner.lock();
        state.check()?;
        Ok(state.roster.contains_key(&key))
    }
}

#[async_trait]
impl MatchRepo for MemoryClubRepo {
    async fn list_matches(
        &self,
        tournament: TournamentId,
        team: TeamId,
    ) -> RepoResult<Vec<Match>> {
        let state = self.inner.lock();
        state.check()?;
        let mut list: Vec<Match> = state
            .matches
            .values()
            .filter(|m| m.tournament_id == tournament && m.team_id == team)
            .cloned()
            .collect();
        list.sort_by_key(|m| m.start_time);
        Ok(list)
    }

    async fn get_match(&self, id: MatchId) -> RepoResult<Match> {
        let state = self.inner.lock();
        state.check()?;
        state.matches.get(&id).cloned().ok_or(DomainError::NotFound("match"))
    }

    async fn create_match(&self, m: NewMatch) -> RepoResult<MatchId> {
        let mut state = self.inner.lock();
        state.check()?;
        state.mutations.push(Mutation::CreateMatch(m.clone()));
        let id = MatchId::new(state.next_id());
        state.matches.insert(id, build_match(id, m));
        Ok(id)
    }

    async fn update_match(&self, id: MatchId, patch: MatchPatch) -> RepoResult<()> {
        let mut state = self.inner.lock();
        state.check()?;
        state.mutations.push(Mutation::UpdateMatch(id, patch.clone()));
        let m = state.matches.get_mut(&id).ok_or(DomainError::NotFound("match"))?;
        if let Some(start) = patch.start_time {
            m.start_time = start;
        }
        patch.location.apply_to(&mut m.location);
        if let Some(status) = patch.status {
            m.status = status;
        }
        patch.score_ht.apply_to(&mut m.score_ht);
        patch.score_ft.apply_to(&mut m.score_ft);
        patch.score_et.apply_to(&mut m.score_et);
        patch.score_pen.apply_to(&mut m.score_pen);
        patch.final_us.apply_to(&mut m.final_us);
        patch.final_them.apply_to(&mut m.final_them);
        if let Some(opponent) = patch.opponent {
            m.opponent = opponent;
        }
        Ok(())
    }
}

#[async_trait]
impl LineupRepo for MemoryClubRepo {
    async fn get_lineup(&self, m: MatchId) -> RepoResult<Vec<LineupEntry>> {
        let state = self.inner.lock();
        state.check()?;
        let game = state.matches.get(&m);
        let mut entries: Vec<LineupEntry> = state
            .lineups
            .iter()
            .filter(|((mid, _), _)| *mid == m)
            .map(|((mid, pid), row)| LineupEntry {
                match_id: *mid,
                player_id: *pid,
                player_name: state.player_name(*pid).unwrap_or_default(),
                roster_number: game.and_then(|g| {
                    state
                        .roster
                        .get(&RosterKey::new(g.tournament_id, g.team_id, *pid))
                        .copied()
                        .flatten()
                }),
                role: row.role,
                number_override: row.number_override,
                note: row.note.clone(),
            })
            .collect();
        entries.sort_by(|a, b| {
            let key = |e: &LineupEntry| {
                (e.role.as_str(), e.shirt_number().unwrap_or(999), e.player_name.clone())
            };
            key(a).cmp(&key(b))
        });
        Ok(entries)
    }

    async fn upsert_lineup(
        &self,
        m: MatchId,
        player: PlayerId,
        role: LineupRole,
        number_override: Option<i32>,
        note: Option<String>,
    ) -> RepoResult<()> {
        let mut state = self.inner.lock();
        state.check()?;
        state.mutations.push(Mutation::UpsertLineup {
            match_id: m,
            player_id: player,
            role,
            number_override,
            note: note.clone(),
        });
        state.lineups.insert(
            (m, player),
            LineupRow {
                role,
                number_override,
                note,
            },
        );
        Ok(())
    }

    async fn update_lineup(
        &self,
        m: MatchId,
        player: PlayerId,
        patch: LineupPatch,
    ) -> RepoResult<()> {
        let mut state = self.inner.lock();
        state.check()?;
        state.mutations.push(Mutation::UpdateLineup(m, player, patch.clone()));
        let row = state
            .lineups
            .get_mut(&(m, player))
            .ok_or(DomainError::NotFound("lineup entry"))?;
        if let Some(role) = patch.role {
            row.role = role;
        }
        patch.number_override.apply_to(&mut row.number_override);
        patch.note.apply_to(&mut row.note);
        Ok(())
    }

    async fn remove_lineup(&self, m: MatchId, player: PlayerId) -> RepoResult<()> {
        let mut state = self.inner.lock();
        state.check()?;
        state.mutations.push(Mutation::RemoveLineup(m, player));
        state
            .lineups
            .remove(&(m, player))
            .map(|_| ())
            .ok_or(DomainError::NotFound("lineup entry"))
    }

    async fn lineup_has_player(&self, m: MatchId, player: PlayerId) -> RepoResult<bool> {
        let state = self.inner.lock();
        state.check()?;
        Ok(state.lineups.contains_key(&(m, player)))
    }

    async fn lineup_player_ids(&self, m: MatchId) -> RepoResult<Vec<PlayerId>> {
        let state = self.inner.lock();
        state.check()?;
        Ok(state
            .lineups
            .keys()
            .filter(|(mid, _)| *mid == m)
            .map(|(_, pid)| *pid)
            .collect())
    }
}

#[async_trait]
impl EventRepo for MemoryClubRepo {
    async fn list_events(&self, m: MatchId) -> RepoResult<Vec<MatchEvent>> {
        let state = self.inner.lock();
        state.check()?;
        Ok(state.events.iter().filter(|e| e.match_id == m).cloned().collect())
    }

    async fn add_event(&self, event: NewMatchEvent) -> RepoResult<i64> {
        let now = self.clock.now();
        let mut state = self.inner.lock();
        state.check()?;
        state.mutations.push(Mutation::AddEvent(event.clone()));
        let id = state.next_id();
        let record = MatchEvent {
            id,
            match_id: event.match_id,
            kind: event.kind,
            time_text: event.time_text,
            player_main: event.player_main,
            player_alt: event.player_alt,
            card_type: event.card_type,
            player_main_name: event.player_main.and_then(|p| state.player_name(p)),
            player_alt_name: event.player_alt.and_then(|p| state.player_name(p)),
            created_at: now,
        };
        state.events.push(record);
        Ok(id)
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
