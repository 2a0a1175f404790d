//! Match options and the limits a registry enforces on them.

use serde::{Deserialize, Serialize};

use crate::{MatchError, Variant};

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Inclusive bounds applied to every board dimension and to the
/// alignment length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub min: usize,
    pub max: usize,
}

impl Limits {
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: usize) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

// ---------------------------------------------------------------------------
// MatchOptions
// ---------------------------------------------------------------------------

/// Settings chosen by the creator of a match.
///
/// The wire shape is flat: the variant's dimensions sit next to the
/// shared fields, e.g. `{"w":7,"h":6,"a":4,"starts1":true,"t0":0,"td":0}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOptions<D> {
    #[serde(flatten)]
    pub dims: D,

    /// Pieces in a row needed to win.
    #[serde(rename = "a")]
    pub alignment: usize,

    /// Whether player 1 (the creator) moves first.
    #[serde(rename = "starts1", default)]
    pub starts_first: bool,

    /// Initial time budget per player, in milliseconds.
    #[serde(default)]
    pub t0: u64,

    /// Time added to a player's budget after each of their moves, in
    /// milliseconds.
    #[serde(default)]
    pub td: u64,
}

impl<D> MatchOptions<D> {
    pub fn new(dims: D, alignment: usize) -> Self {
        Self {
            dims,
            alignment,
            starts_first: false,
            t0: 0,
            td: 0,
        }
    }

    pub fn starts_first(mut self, starts_first: bool) -> Self {
        self.starts_first = starts_first;
        self
    }

    pub fn clock(mut self, t0: u64, td: u64) -> Self {
        self.t0 = t0;
        self.td = td;
        self
    }
}

/// Upper bound for `t0` and `td`: one day, in milliseconds.
pub const MAX_CLOCK_MS: u64 = 24 * 60 * 60 * 1000;

/// Checks `options` against `limits`.
///
/// Every dimension and the alignment must be positive and lie within the
/// limits, the alignment must fit along at least one dimension, and
/// neither clock setting may exceed [`MAX_CLOCK_MS`].
pub(crate) fn validate<V: Variant>(
    options: &MatchOptions<V::Dims>,
    limits: &Limits,
) -> Result<(), MatchError> {
    let extents = V::extents(&options.dims);

    for (name, value) in &extents {
        check_extent(name, *value, limits)?;
    }
    check_extent("a", options.alignment, limits)?;

    let longest = extents.iter().map(|(_, v)| *v).max().unwrap_or(0);
    if options.alignment > longest {
        return Err(MatchError::InvalidOptions(format!(
            "a={} does not fit on the board",
            options.alignment
        )));
    }

    for (name, value) in [("t0", options.t0), ("td", options.td)] {
        if value > MAX_CLOCK_MS {
            return Err(MatchError::InvalidOptions(format!(
                "{name}={value} exceeds {MAX_CLOCK_MS}"
            )));
        }
    }

    Ok(())
}

fn check_extent(name: &str, value: usize, limits: &Limits) -> Result<(), MatchError> {
    if value == 0 {
        return Err(MatchError::InvalidOptions(format!("{name} must be positive")));
    }
    if !limits.contains(value) {
        return Err(MatchError::InvalidOptions(format!(
            "{name}={value} is outside {}..={}",
            limits.min, limits.max
        )));
    }
    Ok(())
}
