//! The match state machine: seats, turn order, clocks, and outcomes.

use std::time::{SystemTime, UNIX_EPOCH};

use connectx_protocol::{MatchId, PlayerId};
use serde::{Deserialize, Serialize};

use crate::{Line, MatchError, MatchOptions, Slot, Variant, lines_through};

/// Milliseconds since the Unix epoch.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// A seated player and their remaining clock, in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub time_left: u64,
}

/// One applied move. `registered_at` is when the server accepted it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move<T> {
    #[serde(flatten)]
    pub target: T,
    pub registered_at: u64,
}

/// What a successful move did to the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<P> {
    Continue,
    /// Every line the move completed. Usually one, but a single piece can
    /// close several at once.
    Win { lines: Vec<Line<P>> },
    Draw,
}

impl<P> Outcome<P> {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Continue)
    }
}

/// A single game between two players.
///
/// Player 1 is the creator. Player 2 is empty until someone joins, at
/// which point the match starts. Whose turn it is isn't stored; it
/// follows from the number of moves and `starts1`.
#[derive(Debug, Clone)]
pub struct Match<V: Variant> {
    id: MatchId,
    board: V::Board,
    options: MatchOptions<V::Dims>,
    p1: Player,
    p2: Option<Player>,
    moves: Vec<Move<V::Target>>,
    started: bool,
    game_over: bool,
    started_at: Option<u64>,
}

impl<V: Variant> Match<V> {
    /// Creates an unstarted match with `creator` in the first seat.
    ///
    /// Options are taken as-is; the registry validates them first.
    pub fn new(id: MatchId, creator: PlayerId, options: MatchOptions<V::Dims>) -> Self {
        Self {
            id,
            board: V::new_board(&options.dims),
            p1: Player {
                id: creator,
                time_left: options.t0,
            },
            p2: None,
            moves: Vec::new(),
            started: false,
            game_over: false,
            started_at: None,
            options,
        }
    }

    pub fn id(&self) -> &MatchId {
        &self.id
    }

    pub fn board(&self) -> &V::Board {
        &self.board
    }

    pub fn options(&self) -> &MatchOptions<V::Dims> {
        &self.options
    }

    pub fn player1(&self) -> &Player {
        &self.p1
    }

    pub fn player2(&self) -> Option<&Player> {
        self.p2.as_ref()
    }

    pub fn moves(&self) -> &[Move<V::Target>] {
        &self.moves
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn started_at(&self) -> Option<u64> {
        self.started_at
    }

    pub fn is_participant(&self, player_id: &PlayerId) -> bool {
        self.p1.id == *player_id || self.p2.as_ref().is_some_and(|p| p.id == *player_id)
    }

    /// The player whose turn it is. `None` while the second seat is empty
    /// and it would be player 2's turn.
    pub fn current_player(&self) -> Option<&PlayerId> {
        let p1_turn = (self.moves.len() % 2 == 0) == self.options.starts_first;
        if p1_turn {
            Some(&self.p1.id)
        } else {
            self.p2.as_ref().map(|p| &p.id)
        }
    }

    /// The other participant, if `player_id` is seated and both seats are
    /// taken.
    pub fn opponent_of(&self, player_id: &PlayerId) -> Option<&PlayerId> {
        let p2 = self.p2.as_ref()?;
        if self.p1.id == *player_id {
            Some(&p2.id)
        } else if p2.id == *player_id {
            Some(&self.p1.id)
        } else {
            None
        }
    }

    /// Seats `player_id` as player 2 and starts the match.
    ///
    /// Returns `true` only for the join that filled the seat. Rejoining as
    /// either participant, or the creator joining before anyone else, is a
    /// read and returns `false` without changing anything.
    ///
    /// # Errors
    /// [`MatchError::Unjoinable`] if both seats belong to other players.
    pub fn join(&mut self, player_id: PlayerId) -> Result<bool, MatchError> {
        self.join_at(player_id, now_millis())
    }

    /// [`join`](Self::join) with an explicit clock reading.
    pub fn join_at(&mut self, player_id: PlayerId, now: u64) -> Result<bool, MatchError> {
        if self.is_participant(&player_id) {
            return Ok(false);
        }
        if self.p2.is_some() {
            return Err(MatchError::Unjoinable(self.id.clone()));
        }

        self.p2 = Some(Player {
            id: player_id,
            time_left: self.options.t0,
        });
        self.started = true;
        self.started_at = Some(now);
        Ok(true)
    }

    /// Drops a piece for `player_id` at `target`.
    ///
    /// Checks run in a fixed order: not started, game over, out of bounds,
    /// not your turn, then full. Any error leaves the match untouched.
    pub fn register_move(
        &mut self,
        player_id: &PlayerId,
        target: V::Target,
    ) -> Result<Outcome<V::Point>, MatchError> {
        self.register_move_at(player_id, target, now_millis())
    }

    /// [`register_move`](Self::register_move) with an explicit clock reading.
    pub fn register_move_at(
        &mut self,
        player_id: &PlayerId,
        target: V::Target,
        now: u64,
    ) -> Result<Outcome<V::Point>, MatchError> {
        if !self.started {
            return Err(MatchError::NotStarted);
        }
        if self.game_over {
            return Err(MatchError::GameOver);
        }
        if !V::target_in_bounds(&self.options.dims, &target) {
            return Err(MatchError::OutOfBounds);
        }
        if self.current_player() != Some(player_id) {
            return Err(MatchError::NotYourTurn);
        }

        let p1_moving = self.p1.id == *player_id;
        let slot = if p1_moving { Slot::Player1 } else { Slot::Player2 };
        let point = V::drop_piece(&mut self.board, &target, slot).ok_or_else(V::full_error)?;

        let last = self
            .moves
            .last()
            .map(|m| m.registered_at)
            .or(self.started_at)
            .unwrap_or(now);
        self.moves.push(Move {
            target,
            registered_at: now,
        });
        let mover = if p1_moving { Some(&mut self.p1) } else { self.p2.as_mut() };
        if let Some(mover) = mover {
            mover.time_left = mover
                .time_left
                .saturating_sub(now.saturating_sub(last))
                .saturating_add(self.options.td);
        }

        let lines = lines_through::<V>(&self.board, &self.options.dims, point, self.options.alignment);
        let outcome = if !lines.is_empty() {
            Outcome::Win { lines }
        } else if self.moves.len() == V::cell_count(&self.options.dims) {
            Outcome::Draw
        } else {
            Outcome::Continue
        };
        self.game_over = outcome.is_terminal();
        Ok(outcome)
    }

    /// Remaining clocks as `(player 1, player 2)`.
    pub fn clocks(&self) -> (u64, u64) {
        (
            self.p1.time_left,
            self.p2.as_ref().map_or(0, |p| p.time_left),
        )
    }
}

// =========================================================================
// Tests
// =========================================================================
