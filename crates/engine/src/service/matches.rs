// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::{audit, audit_created, required, Club};
use cb_core::{DomainError, Match, MatchId, MatchPatch, MatchStatus, NewMatch, TeamId, TournamentId};
use cb_storage::RepoResult;
use chrono::{DateTime, Duration, Utc};

/// How many upcoming fixtures detail screens show
pub const UPCOMING_LIMIT: usize = 3;

/// A scheduled fixture together with whichever side of it the caller
/// asked about
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpcomingMatch<K> {
    pub game: Match,
    pub context: K,
}

impl Club {
    /// Ordered by start time
    pub async fn matches(&self, tournament: TournamentId, team: TeamId) -> RepoResult<Vec<Match>> {
        self.repo.list_matches(tournament, team).await
    }

    pub async fn game(&self, id: MatchId) -> RepoResult<Match> {
        self.repo.get_match(id).await
    }

    /// The team needs at least one roster player before it can be scheduled.
    pub async fn create_match(&self, mut m: NewMatch) -> RepoResult<MatchId> {
        if m.tournament_id.get() <= 0 || m.team_id.get() <= 0 {
            return Err(DomainError::validation("tournament/team"));
        }
        required("opponent", &m.opponent)?;
        if self.repo.roster_size(m.tournament_id, m.team_id).await? == 0 {
            return Err(DomainError::validation("team has no players in roster"));
        }
        m.status = MatchStatus::Scheduled;
        audit_created("match", self.repo.create_match(m).await)
    }

    /// Canceling a match wipes its scores.
    pub async fn update_match(&self, id: MatchId, mut patch: MatchPatch) -> RepoResult<()> {
        if patch.status == Some(MatchStatus::Canceled) {
            patch.clear_scores();
        }
        if patch.is_empty() {
            return Ok(());
        }
        if let Some(opponent) = &patch.opponent {
            required("opponent", opponent)?;
        }
        audit("update", "match", id, self.repo.update_match(id, patch).await)
    }

    pub async fn reset_scores(&self, id: MatchId) -> RepoResult<()> {
        let mut patch = MatchPatch::default();
        patch.clear_scores();
        self.update_match(id, patch).await
    }

    /// Next scheduled fixtures across `(tournament, team, context)` pairs.
    ///
    /// A match counts as upcoming until an hour after kick-off. Pairs whose
    /// fixtures cannot be loaded are skipped.
    pub async fn upcoming<K: Clone>(
        &self,
        pairs: &[(TournamentId, TeamId, K)],
        now: DateTime<Utc>,
    ) -> Vec<UpcomingMatch<K>> {
        let cutoff = now - Duration::hours(1);
        let mut out = Vec::new();
        for (tournament, team, context) in pairs {
            let fixtures = match self.repo.list_matches(*tournament, *team).await {
                Ok(fixtures) => fixtures,
                Err(e) => {
                    tracing::warn!(tournament_id = %tournament, team_id = %team, error = %e, "skipping fixtures");
                    continue;
                }
            };
            out.extend(
                fixtures
                    .into_iter()
                    .filter(|m| m.status == MatchStatus::Scheduled && m.start_time > cutoff)
                    .map(|game| UpcomingMatch {
                        game,
                        context: context.clone(),
                    }),
            );
        }
        out.sort_by_key(|u| u.game.start_time);
        out.truncate(UPCOMING_LIMIT);
        out
    }
}
