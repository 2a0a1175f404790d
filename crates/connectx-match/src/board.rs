//! Cell contents and line detection shared by every variant.

use serde::{Serialize, Serializer};

use crate::Variant;

/// Contents of one cell. Serialized as `0`, `1` or `2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Slot {
    #[default]
    Empty,
    Player1,
    Player2,
}

impl Slot {
    pub fn code(self) -> u8 {
        match self {
            Self::Empty => 0,
            Self::Player1 => 1,
            Self::Player2 => 2,
        }
    }
}

impl Serialize for Slot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

/// Cells of one winning run. The placed piece comes first, then the run
/// in the forward direction, then the run in the mirrored direction.
pub type Line<P> = Vec<P>;

/// Collects every line of at least `alignment` same-owner cells passing
/// through `origin`.
///
/// Returns an empty list when `origin` is empty.
pub fn lines_through<V: Variant>(
    board: &V::Board,
    dims: &V::Dims,
    origin: V::Point,
    alignment: usize,
) -> Vec<Line<V::Point>> {
    let owner = V::slot_at(board, &origin);
    if owner == Slot::Empty {
        return Vec::new();
    }

    V::DIRECTIONS
        .iter()
        .filter_map(|offset| {
            let mut line = vec![origin];
            for forward in [true, false] {
                let mut cursor = origin;
                while let Some(next) = V::step(dims, &cursor, offset, forward) {
                    if V::slot_at(board, &next) != owner {
                        break;
                    }
                    line.push(next);
                    cursor = next;
                }
            }
            (line.len() >= alignment).then_some(line)
        })
        .collect()
}
