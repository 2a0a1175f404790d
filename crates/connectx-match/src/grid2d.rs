//! The classic upright board: `h` rows by `w` columns.
//!
//! Row `h - 1` is the bottom. Pieces dropped into a column settle on the
//! highest-numbered empty row.

use serde::{Deserialize, Serialize};

use crate::variant::shift;
use crate::{Limits, MatchError, Slot, Variant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dims2 {
    pub w: usize,
    pub h: usize,
}

/// Move target: a column index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub col: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point2 {
    pub row: usize,
    pub col: usize,
}

impl Point2 {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Indexed `[row][col]`.
pub type Grid2 = Vec<Vec<Slot>>;

/// Two-dimensional Connect-Four.
#[derive(Debug, Clone, Copy, Default)]
pub struct TwoD;

impl Variant for TwoD {
    type Dims = Dims2;
    type Target = Column;
    type Point = Point2;
    /// `(row delta, col delta)`
    type Offset = (isize, isize);
    type Board = Grid2;

    const NAME: &'static str = "2d";
    const DEFAULT_LIMITS: Limits = Limits::new(3, 15);
    const DIRECTIONS: &'static [(isize, isize)] = &[(0, 1), (1, 0), (1, 1), (1, -1)];

    fn extents(dims: &Dims2) -> Vec<(&'static str, usize)> {
        vec![("w", dims.w), ("h", dims.h)]
    }

    fn cell_count(dims: &Dims2) -> usize {
        dims.w * dims.h
    }

    fn new_board(dims: &Dims2) -> Grid2 {
        vec![vec![Slot::Empty; dims.w]; dims.h]
    }

    fn target_in_bounds(dims: &Dims2, target: &Column) -> bool {
        target.col < dims.w
    }

    fn drop_piece(board: &mut Grid2, target: &Column, slot: Slot) -> Option<Point2> {
        let row = (0..board.len())
            .rev()
            .find(|&row| board[row][target.col] == Slot::Empty)?;
        board[row][target.col] = slot;
        Some(Point2::new(row, target.col))
    }

    fn full_error() -> MatchError {
        MatchError::ColumnFull
    }

    fn slot_at(board: &Grid2, point: &Point2) -> Slot {
        board[point.row][point.col]
    }

    fn step(
        dims: &Dims2,
        point: &Point2,
        offset: &(isize, isize),
        forward: bool,
    ) -> Option<Point2> {
        Some(Point2 {
            row: shift(point.row, offset.0, forward, dims.h)?,
            col: shift(point.col, offset.1, forward, dims.w)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lines_through;

    const DIMS: Dims2 = Dims2 { w: 7, h: 6 };

    #[test]
    fn test_cell_count_matches_extents() {
        assert_eq!(TwoD::cell_count(&DIMS), 42);
        let product: usize = TwoD::extents(&DIMS).iter().map(|(_, v)| *v).product();
        assert_eq!(TwoD::cell_count(&DIMS), product);
    }

    #[test]
    fn test_drop_piece_fills_from_bottom_row() {
        let mut board = TwoD::new_board(&DIMS);

        let first = TwoD::drop_piece(&mut board, &Column { col: 3 }, Slot::Player1);
        let second = TwoD::drop_piece(&mut board, &Column { col: 3 }, Slot::Player2);

        assert_eq!(first, Some(Point2::new(5, 3)));
        assert_eq!(second, Some(Point2::new(4, 3)));
        assert_eq!(board[5][3], Slot::Player1);
        assert_eq!(board[4][3], Slot::Player2);
    }

    #[test]
    fn test_drop_piece_full_column_returns_none_unchanged() {
        let dims = Dims2 { w: 3, h: 3 };
        let mut board = TwoD::new_board(&dims);
        for _ in 0..3 {
            TwoD::drop_piece(&mut board, &Column { col: 0 }, Slot::Player1);
        }
        let before = board.clone();

        assert!(TwoD::drop_piece(&mut board, &Column { col: 0 }, Slot::Player2).is_none());
        assert_eq!(board, before);
    }

    #[test]
    fn test_target_in_bounds_rejects_column_past_width() {
        assert!(TwoD::target_in_bounds(&DIMS, &Column { col: 6 }));
        assert!(!TwoD::target_in_bounds(&DIMS, &Column { col: 7 }));
    }

    #[test]
    fn test_step_stops_at_edges() {
        let corner = Point2::new(0, 0);
        assert_eq!(TwoD::step(&DIMS, &corner, &(1, 1), true), Some(Point2::new(1, 1)));
        assert_eq!(TwoD::step(&DIMS, &corner, &(1, 1), false), None);
        assert_eq!(TwoD::step(&DIMS, &Point2::new(5, 6), &(0, 1), true), None);
    }

    #[test]
    fn test_lines_through_orders_placed_forward_then_mirror() {
        let mut board = TwoD::new_board(&DIMS);
        for col in 1..5 {
            board[5][col] = Slot::Player1;
        }

        let lines = lines_through::<TwoD>(&board, &DIMS, Point2::new(5, 2), 4);

        assert_eq!(
            lines,
            vec![vec![
                Point2::new(5, 2),
                Point2::new(5, 3),
                Point2::new(5, 4),
                Point2::new(5, 1),
            ]]
        );
    }

    #[test]
    fn test_lines_through_anti_diagonal_detected() {
        let mut board = TwoD::new_board(&DIMS);
        for k in 0..4 {
            board[2 + k][4 - k] = Slot::Player2;
        }

        let lines = lines_through::<TwoD>(&board, &DIMS, Point2::new(3, 3), 4);

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].len(), 4);
    }

    #[test]
    fn test_lines_through_broken_run_ignored() {
        let mut board = TwoD::new_board(&DIMS);
        board[5][0] = Slot::Player1;
        board[5][1] = Slot::Player1;
        board[5][2] = Slot::Player2;
        board[5][3] = Slot::Player1;

        assert!(lines_through::<TwoD>(&board, &DIMS, Point2::new(5, 1), 3).is_empty());
    }
}
