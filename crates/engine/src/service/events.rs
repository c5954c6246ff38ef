// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::{audit_created, required, Club};
use cb_core::{
    CardType, DomainError, EventKind, MatchEvent, MatchId, NewMatchEvent, PlayerId, RosterKey,
};
use cb_storage::RepoResult;

impl Club {
    /// Events in the order they were recorded
    pub async fn events(&self, m: MatchId) -> RepoResult<Vec<MatchEvent>> {
        self.repo.list_events(m).await
    }

    pub async fn add_goal(&self, m: MatchId, scorer: PlayerId, time_text: &str) -> RepoResult<i64> {
        self.record_event(m, EventKind::Goal, time_text, &[scorer], None)
            .await
    }

    pub async fn add_card(
        &self,
        m: MatchId,
        player: PlayerId,
        card: CardType,
        time_text: &str,
    ) -> RepoResult<i64> {
        self.record_event(m, EventKind::Card, time_text, &[player], Some(card))
            .await
    }

    /// `off` leaves the pitch, `on` replaces them.
    pub async fn add_substitution(
        &self,
        m: MatchId,
        off: PlayerId,
        on: PlayerId,
        time_text: &str,
    ) -> RepoResult<i64> {
        if off == on {
            return Err(DomainError::validation("players identical"));
        }
        self.record_event(m, EventKind::Sub, time_text, &[off, on], None)
            .await
    }

    async fn record_event(
        &self,
        m: MatchId,
        kind: EventKind,
        time_text: &str,
        players: &[PlayerId],
        card_type: Option<CardType>,
    ) -> RepoResult<i64> {
        required("event_time", time_text)?;
        let game = self.repo.get_match(m).await?;
        for player in players {
            let key = RosterKey::new(game.tournament_id, game.team_id, *player);
            if !self.repo.is_in_roster(key).await? {
                return Err(DomainError::validation(format!("player {player} not in roster")));
            }
        }
        let event = NewMatchEvent {
            match_id: m,
            kind,
            time_text: time_text.trim().to_string(),
            player_main: players.first().copied(),
            player_alt: players.get(1).copied(),
            card_type,
        };
        audit_created("match_event", self.repo.add_event(event).await)
    }
}
