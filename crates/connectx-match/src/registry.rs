//! Match registry: creates matches and serializes access to each one.
//!
//! # Locking
//!
//! ```text
//! MatchRegistry
//!   └─ Mutex<HashMap<MatchId, Arc<Mutex<Match>>>>   ← held for lookups only
//!                               └─ Mutex<Match>      ← held for join / move
//! ```
//!
//! The map lock is released before a match lock is taken, so a slow move
//! in one match never blocks lookups for another. Tokio's mutex is fair,
//! so concurrent moves on one match are applied in arrival order.

use std::collections::HashMap;
use std::sync::Arc;

use connectx_protocol::{MatchId, MoveRequest, PlayerId};
use tokio::sync::Mutex;

use crate::config::validate;
use crate::{Limits, Match, MatchError, MatchOptions, Outcome, Variant};

/// Result of a successful join.
#[derive(Debug, Clone)]
pub struct Joined<V: Variant> {
    /// The match as it stands after the join.
    pub snapshot: Match<V>,
    /// `true` only for the join that seated player 2.
    pub first_join: bool,
}

/// Result of a successful move, with everything needed to report it.
#[derive(Debug, Clone)]
pub struct MoveApplied<V: Variant> {
    pub target: V::Target,
    pub outcome: Outcome<V::Point>,
    pub time_left_p1: u64,
    pub time_left_p2: u64,
    /// The player who should be told about this move.
    pub opponent: PlayerId,
}

type SharedMatch<V> = Arc<Mutex<Match<V>>>;

/// All live matches of one variant.
pub struct MatchRegistry<V: Variant> {
    matches: Mutex<HashMap<MatchId, SharedMatch<V>>>,
    limits: Limits,
}

impl<V: Variant> MatchRegistry<V> {
    /// Creates an empty registry using the variant's default limits.
    pub fn new() -> Self {
        Self::with_limits(V::DEFAULT_LIMITS)
    }

    pub fn with_limits(limits: Limits) -> Self {
        Self {
            matches: Mutex::new(HashMap::new()),
            limits,
        }
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    /// Validates `options` and opens a new match with `creator` seated as
    /// player 1.
    ///
    /// # Errors
    /// [`MatchError::InvalidOptions`] if the options break the limits.
    pub async fn create_match(
        &self,
        creator: PlayerId,
        options: MatchOptions<V::Dims>,
    ) -> Result<MatchId, MatchError> {
        validate::<V>(&options, &self.limits)?;

        let match_id = MatchId(uuid::Uuid::new_v4().to_string());
        let created = Match::<V>::new(match_id.clone(), creator.clone(), options);
        self.matches
            .lock()
            .await
            .insert(match_id.clone(), Arc::new(Mutex::new(created)));

        tracing::info!(%match_id, %creator, variant = V::NAME, "match created");
        Ok(match_id)
    }

    /// Joins `player_id` to a match, or re-reads it if they're already in.
    ///
    /// # Errors
    /// - [`MatchError::NotFound`] for an unknown id
    /// - [`MatchError::Unjoinable`] if both seats belong to others
    pub async fn join_match(
        &self,
        player_id: PlayerId,
        match_id: &MatchId,
    ) -> Result<Joined<V>, MatchError> {
        let shared = self.lookup(match_id).await?;
        let mut game = shared.lock().await;

        let first_join = game.join(player_id.clone())?;
        if first_join {
            tracing::info!(%match_id, %player_id, variant = V::NAME, "match started");
        }

        Ok(Joined {
            snapshot: game.clone(),
            first_join,
        })
    }

    /// Applies a move under the match's lock.
    ///
    /// # Errors
    /// [`MatchError::NotFound`] for an unknown id, otherwise whatever
    /// [`Match::register_move`] rejects.
    pub async fn register_move(
        &self,
        player_id: &PlayerId,
        request: MoveRequest<V::Target>,
    ) -> Result<MoveApplied<V>, MatchError> {
        let shared = self.lookup(&request.match_id).await?;
        let mut game = shared.lock().await;

        let outcome = game.register_move(player_id, request.target)?;
        let (time_left_p1, time_left_p2) = game.clocks();
        let opponent = game
            .opponent_of(player_id)
            .cloned()
            .ok_or(MatchError::NotStarted)?;

        match &outcome {
            Outcome::Continue => {}
            Outcome::Win { lines } => tracing::info!(
                match_id = %request.match_id,
                winner = %player_id,
                lines = lines.len(),
                "match won"
            ),
            Outcome::Draw => {
                tracing::info!(match_id = %request.match_id, "match drawn")
            }
        }

        Ok(MoveApplied {
            target: request.target,
            outcome,
            time_left_p1,
            time_left_p2,
            opponent,
        })
    }

    /// A copy of the match as it is right now.
    pub async fn get(&self, match_id: &MatchId) -> Option<Match<V>> {
        let shared = self.lookup(match_id).await.ok()?;
        let game = shared.lock().await;
        Some(game.clone())
    }

    pub async fn len(&self) -> usize {
        self.matches.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.matches.lock().await.is_empty()
    }

    async fn lookup(&self, match_id: &MatchId) -> Result<SharedMatch<V>, MatchError> {
        self.matches
            .lock()
            .await
            .get(match_id)
            .cloned()
            .ok_or_else(|| MatchError::NotFound(match_id.clone()))
    }
}

impl<V: Variant> Default for MatchRegistry<V> {
    fn default() -> Self {
        Self::new()
    }
}
