//! The `Variant` trait: what makes a 2-D board different from a 3-D one.
//!
//! Everything else (turn order, clocks, win detection, the registry) is
//! written once against this trait. A variant only describes geometry:
//! how big the board is, where a dropped piece lands, and which
//! directions a line can run in.

use std::fmt::Debug;
use std::hash::Hash;

use serde::{Serialize, de::DeserializeOwned};

use crate::{Limits, MatchError, Slot};

/// Board geometry for one dimensionality of the game.
pub trait Variant: Clone + Debug + Send + Sync + 'static {
    /// Board size as sent by the creator (`{w,h}` or `{r,c,h}`).
    type Dims: Copy + Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static;

    /// What a player aims at when moving: a column or a stick.
    type Target: Copy + Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static;

    /// A single cell of the board.
    type Point: Copy + Debug + PartialEq + Eq + Hash + Serialize + Send + Sync + 'static;

    /// A unit step between neighbouring cells.
    type Offset: Copy + Debug + 'static;

    /// The grid itself, serialized as nested arrays of [`Slot`]s.
    type Board: Clone + Debug + Serialize + Send + Sync + 'static;

    /// Short label used in logs.
    const NAME: &'static str;

    /// Limits a registry uses unless configured otherwise.
    const DEFAULT_LIMITS: Limits;

    /// Canonical line directions. Each is scanned together with its
    /// mirror, so no direction appears twice.
    const DIRECTIONS: &'static [Self::Offset];

    /// Named extents of the board, in wire order. Only used when
    /// validating options.
    fn extents(dims: &Self::Dims) -> Vec<(&'static str, usize)>;

    /// Total number of cells. Checked after every move.
    fn cell_count(dims: &Self::Dims) -> usize;

    fn new_board(dims: &Self::Dims) -> Self::Board;

    fn target_in_bounds(dims: &Self::Dims, target: &Self::Target) -> bool;

    /// Places `slot` at the lowest empty cell under `target`.
    ///
    /// Returns `None` without touching the board if there is no room left.
    fn drop_piece(
        board: &mut Self::Board,
        target: &Self::Target,
        slot: Slot,
    ) -> Option<Self::Point>;

    /// The error reported when [`drop_piece`](Self::drop_piece) finds no room.
    fn full_error() -> MatchError;

    fn slot_at(board: &Self::Board, point: &Self::Point) -> Slot;

    /// Moves `point` one step along `offset` (or against it when
    /// `forward` is false). `None` when the step leaves the board.
    fn step(
        dims: &Self::Dims,
        point: &Self::Point,
        offset: &Self::Offset,
        forward: bool,
    ) -> Option<Self::Point>;
}

/// Applies a signed unit step to a coordinate, staying within `0..len`.
pub(crate) fn shift(coord: usize, delta: isize, forward: bool, len: usize) -> Option<usize> {
    let delta = if forward { delta } else { -delta };
    coord.checked_add_signed(delta).filter(|c| *c < len)
}
