//! Board engine and match registry for ConnectX.
//!
//! The game rules are written once, generically, and instantiated for two
//! board shapes:
//!
//! - [`TwoD`]: the classic upright grid, pieces fall to the bottom row
//! - [`ThreeD`]: a cube of sticks, pieces stack from height 0
//!
//! # Key types
//!
//! - [`Variant`]: board geometry (size, gravity, line directions)
//! - [`Match`]: one game's state machine (seats, turns, clocks, outcome)
//! - [`MatchRegistry`]: owns every match of a variant and serializes
//!   access to each one
//! - [`MatchOptions`] / [`Limits`]: what a creator may ask for

mod board;
mod config;
mod engine;
mod error;
mod grid2d;
mod grid3d;
mod registry;
mod variant;

pub use board::{Line, Slot, lines_through};
pub use config::{Limits, MAX_CLOCK_MS, MatchOptions};
pub use engine::{Match, Move, Outcome, Player, now_millis};
pub use error::MatchError;
pub use grid2d::{Column, Dims2, Grid2, Point2, TwoD};
pub use grid3d::{Dims3, Grid3, Point3, Stick, ThreeD};
pub use registry::{Joined, MatchRegistry, MoveApplied};
pub use variant::Variant;
