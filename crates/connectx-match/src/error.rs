//! Error types for the match layer.

use connectx_protocol::MatchId;

/// Everything that can go wrong creating, joining, or playing a match.
///
/// A failed operation never mutates the match it was aimed at.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatchError {
    /// The requested options are outside the registry's limits, or the
    /// alignment can never be reached on that board.
    #[error("invalid match options: {0}")]
    InvalidOptions(String),

    #[error("match {0} not found")]
    NotFound(MatchId),

    /// Both seats are taken by other players.
    #[error("match {0} cannot be joined")]
    Unjoinable(MatchId),

    #[error("match has not started")]
    NotStarted,

    #[error("match is over")]
    GameOver,

    #[error("move is out of bounds")]
    OutOfBounds,

    #[error("not your turn")]
    NotYourTurn,

    #[error("column is full")]
    ColumnFull,

    #[error("stick is full")]
    StickFull,
}
