//! The cube board: `r` rows by `c` columns of sticks, each `h` tall.
//!
//! A move picks a stick by `(row, col)`; the piece settles on the lowest
//! empty height, starting from 0.

use serde::{Deserialize, Serialize};

use crate::variant::shift;
use crate::{Limits, MatchError, Slot, Variant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dims3 {
    pub r: usize,
    pub c: usize,
    pub h: usize,
}

/// Move target: the stick at `(row, col)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stick {
    pub row: usize,
    pub col: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point3 {
    pub row: usize,
    pub col: usize,
    pub h: usize,
}

impl Point3 {
    pub fn new(row: usize, col: usize, h: usize) -> Self {
        Self { row, col, h }
    }
}

/// Indexed `[row][col][height]`.
pub type Grid3 = Vec<Vec<Vec<Slot>>>;

/// Three-dimensional Connect-Four.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreeD;

impl Variant for ThreeD {
    type Dims = Dims3;
    type Target = Stick;
    type Point = Point3;
    type Offset = (isize, isize, isize);
    type Board = Grid3;

    const NAME: &'static str = "3d";
    const DEFAULT_LIMITS: Limits = Limits::new(3, 10);

    // 3 axes, 6 planar diagonals, 4 space diagonals.
    const DIRECTIONS: &'static [(isize, isize, isize)] = &[
        (1, 0, 0),
        (0, 1, 0),
        (0, 0, 1),
        (1, 1, 0),
        (1, -1, 0),
        (1, 0, 1),
        (1, 0, -1),
        (0, 1, 1),
        (0, 1, -1),
        (1, 1, 1),
        (1, 1, -1),
        (1, -1, 1),
        (-1, 1, 1),
    ];

    fn extents(dims: &Dims3) -> Vec<(&'static str, usize)> {
        vec![("r", dims.r), ("c", dims.c), ("h", dims.h)]
    }

    fn cell_count(dims: &Dims3) -> usize {
        dims.r * dims.c * dims.h
    }

    fn new_board(dims: &Dims3) -> Grid3 {
        vec![vec![vec![Slot::Empty; dims.h]; dims.c]; dims.r]
    }

    fn target_in_bounds(dims: &Dims3, target: &Stick) -> bool {
        target.row < dims.r && target.col < dims.c
    }

    fn drop_piece(board: &mut Grid3, target: &Stick, slot: Slot) -> Option<Point3> {
        let stick = &mut board[target.row][target.col];
        let h = stick.iter().position(|s| *s == Slot::Empty)?;
        stick[h] = slot;
        Some(Point3::new(target.row, target.col, h))
    }

    fn full_error() -> MatchError {
        MatchError::StickFull
    }

    fn slot_at(board: &Grid3, point: &Point3) -> Slot {
        board[point.row][point.col][point.h]
    }

    fn step(
        dims: &Dims3,
        point: &Point3,
        offset: &(isize, isize, isize),
        forward: bool,
    ) -> Option<Point3> {
        Some(Point3 {
            row: shift(point.row, offset.0, forward, dims.r)?,
            col: shift(point.col, offset.1, forward, dims.c)?,
            h: shift(point.h, offset.2, forward, dims.h)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::lines_through;

    const DIMS: Dims3 = Dims3 { r: 5, c: 5, h: 5 };

    #[test]
    fn test_cell_count_is_volume() {
        assert_eq!(ThreeD::cell_count(&DIMS), 125);
        assert_eq!(ThreeD::cell_count(&Dims3 { r: 3, c: 4, h: 5 }), 60);
    }

    #[test]
    fn test_drop_piece_stacks_from_height_zero() {
        let mut board = ThreeD::new_board(&DIMS);
        let stick = Stick { row: 1, col: 2 };

        assert_eq!(
            ThreeD::drop_piece(&mut board, &stick, Slot::Player1),
            Some(Point3::new(1, 2, 0))
        );
        assert_eq!(
            ThreeD::drop_piece(&mut board, &stick, Slot::Player2),
            Some(Point3::new(1, 2, 1))
        );
    }

    #[test]
    fn test_drop_piece_full_stick_returns_none() {
        let dims = Dims3 { r: 3, c: 3, h: 3 };
        let mut board = ThreeD::new_board(&dims);
        let stick = Stick { row: 0, col: 0 };
        for _ in 0..3 {
            ThreeD::drop_piece(&mut board, &stick, Slot::Player1);
        }

        assert!(ThreeD::drop_piece(&mut board, &stick, Slot::Player2).is_none());
    }

    #[test]
    fn test_target_in_bounds_checks_row_and_col() {
        assert!(ThreeD::target_in_bounds(&DIMS, &Stick { row: 4, col: 4 }));
        assert!(!ThreeD::target_in_bounds(&DIMS, &Stick { row: 5, col: 0 }));
        assert!(!ThreeD::target_in_bounds(&DIMS, &Stick { row: 0, col: 5 }));
    }

    #[test]
    fn test_directions_are_distinct_up_to_mirror() {
        let mut seen = HashSet::new();
        for &(a, b, c) in ThreeD::DIRECTIONS {
            assert!(seen.insert((a, b, c)));
            assert!(!seen.contains(&(-a, -b, -c)));
        }
        assert_eq!(seen.len(), 13);
    }

    #[test]
    fn test_lines_through_every_direction_detected() {
        let center = Point3::new(2, 2, 2);
        for offset in ThreeD::DIRECTIONS {
            let mut board = ThreeD::new_board(&DIMS);
            let ahead = ThreeD::step(&DIMS, &center, offset, true).unwrap();
            let behind = ThreeD::step(&DIMS, &center, offset, false).unwrap();
            for p in [center, ahead, behind] {
                board[p.row][p.col][p.h] = Slot::Player1;
            }

            let lines = lines_through::<ThreeD>(&board, &DIMS, center, 3);

            assert_eq!(lines, vec![vec![center, ahead, behind]], "offset {offset:?}");
        }
    }
}
