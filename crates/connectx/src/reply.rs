//! Response bodies sent back to clients.
//!
//! Error responses always carry an [`ErrorBody`](connectx_protocol::ErrorBody);
//! everything else is one of the [`ReplyBody`] shapes below.

use connectx_match::{Line, Match, MatchOptions, Move, Variant};
use connectx_protocol::{MatchId, PlayerProfile};
use serde::Serialize;

/// Body of a successful response or notification.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged, bound(serialize = ""))]
pub enum ReplyBody<V: Variant> {
    /// Serialized as `null`. Sent to the mover of a non-terminal move.
    Empty,
    /// `{ "id" }` for a freshly created match.
    Created { id: MatchId },
    /// Full state, answered to a join.
    Snapshot(MatchView<V>),
    /// The joiner's profile, pushed to the creator on first join.
    Opponent(PlayerProfile),
    /// A move report, pushed to the opponent (and to the mover when the
    /// game ends).
    Move(MoveNotice<V>),
}

/// A seated player as clients see them: profile plus clock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerView {
    #[serde(flatten)]
    pub profile: PlayerProfile,
    pub time_left: u64,
}

/// Match snapshot with resolved player profiles.
#[derive(Debug, Clone, Serialize)]
#[serde(bound(serialize = ""))]
pub struct MatchView<V: Variant> {
    pub board: V::Board,
    pub p1: PlayerView,
    pub p2: Option<PlayerView>,
    pub options: MatchOptions<V::Dims>,
    pub moves: Vec<Move<V::Target>>,
    pub started: bool,
    pub game_over: bool,
    pub started_at: Option<u64>,
}

impl<V: Variant> MatchView<V> {
    /// Combines a snapshot with the profiles of its participants.
    /// `p2` is ignored while the second seat is empty.
    pub fn new(snapshot: &Match<V>, p1: PlayerProfile, p2: Option<PlayerProfile>) -> Self {
        let p2 = snapshot
            .player2()
            .zip(p2)
            .map(|(seat, profile)| PlayerView {
                profile,
                time_left: seat.time_left,
            });
        Self {
            board: snapshot.board().clone(),
            p1: PlayerView {
                profile: p1,
                time_left: snapshot.player1().time_left,
            },
            p2,
            options: *snapshot.options(),
            moves: snapshot.moves().to_vec(),
            started: snapshot.is_started(),
            game_over: snapshot.is_game_over(),
            started_at: snapshot.started_at(),
        }
    }
}

/// `{ col [, row], time_left_p1, time_left_p2 [, lines] }`
#[derive(Debug, Clone, Serialize)]
#[serde(bound(serialize = ""))]
pub struct MoveNotice<V: Variant> {
    #[serde(flatten)]
    pub target: V::Target,
    pub time_left_p1: u64,
    pub time_left_p2: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lines: Option<Vec<Line<V::Point>>>,
}
