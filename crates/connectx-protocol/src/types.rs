//! Core protocol types for ConnectX's wire format.
//!
//! Every type here travels on the wire. Field names and integer codes are
//! fixed by the browser client, so changes need a client release too.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ProtocolError;

/// `req_id` used for unsolicited messages (opponent notifications).
pub const NOTIFICATION_REQ_ID: &str = "-1";

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// Opaque identifier of a player, as established by the handshake.
///
/// Serialized as a plain string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

/// Identifier of a match, generated by the registry that owns it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchId(pub String);

impl MatchId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MatchId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Action codes
// ---------------------------------------------------------------------------

/// What a request asks the server to do. Sent as the integer `type`.
///
/// Codes 3 and 4 belong to the 2-D abandon/draw-offer actions, which
/// clients know about but the server doesn't implement; they're rejected
/// like any other unknown code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionCode {
    RegisterMove2D,
    JoinMatch2D,
    CreateMatch2D,
    RegisterMove3D,
    JoinMatch3D,
    CreateMatch3D,
}

impl ActionCode {
    pub fn code(self) -> i64 {
        match self {
            Self::RegisterMove2D => 0,
            Self::JoinMatch2D => 1,
            Self::CreateMatch2D => 2,
            Self::RegisterMove3D => 5,
            Self::JoinMatch3D => 6,
            Self::CreateMatch3D => 7,
        }
    }
}

impl TryFrom<i64> for ActionCode {
    type Error = ProtocolError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::RegisterMove2D),
            1 => Ok(Self::JoinMatch2D),
            2 => Ok(Self::CreateMatch2D),
            5 => Ok(Self::RegisterMove3D),
            6 => Ok(Self::JoinMatch3D),
            7 => Ok(Self::CreateMatch3D),
            other => Err(ProtocolError::InvalidMessage(format!(
                "unknown action type {other}"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Status codes
// ---------------------------------------------------------------------------

/// Outcome class of a response. Sent as the integer `status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Status {
    Ok,
    BadRequest,
    ServerError,
    Unjoinable,
    EnemyJoined,
    EnemySentMove,
    GameoverWon,
    GameoverLost,
    GameoverDraw,
}

impl From<Status> for u8 {
    fn from(status: Status) -> u8 {
        match status {
            Status::Ok => 0,
            Status::BadRequest => 1,
            Status::ServerError => 2,
            Status::Unjoinable => 3,
            Status::EnemyJoined => 4,
            Status::EnemySentMove => 5,
            Status::GameoverWon => 6,
            Status::GameoverLost => 7,
            Status::GameoverDraw => 8,
        }
    }
}

impl TryFrom<u8> for Status {
    type Error = ProtocolError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Ok(match code {
            0 => Self::Ok,
            1 => Self::BadRequest,
            2 => Self::ServerError,
            3 => Self::Unjoinable,
            4 => Self::EnemyJoined,
            5 => Self::EnemySentMove,
            6 => Self::GameoverWon,
            7 => Self::GameoverLost,
            8 => Self::GameoverDraw,
            other => {
                return Err(ProtocolError::InvalidMessage(format!(
                    "unknown status {other}"
                )));
            }
        })
    }
}

// ---------------------------------------------------------------------------
// Envelopes
// ---------------------------------------------------------------------------

/// The routing part of a request: action code and correlation id.
///
/// Decoded first so the dispatcher can answer with the right `req_id`
/// even when the body turns out to be malformed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestHeader {
    #[serde(rename = "type")]
    pub kind: i64,
    #[serde(default)]
    pub id: String,
}

impl RequestHeader {
    /// Resolves the raw `type` into a known action.
    pub fn action(&self) -> Result<ActionCode, ProtocolError> {
        ActionCode::try_from(self.kind)
    }
}

/// A full request envelope: `{ "type", "id", "body" }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request<B> {
    #[serde(rename = "type")]
    pub kind: i64,
    #[serde(default)]
    pub id: String,
    pub body: B,
}

impl<B> Request<B> {
    pub fn new(action: ActionCode, id: impl Into<String>, body: B) -> Self {
        Self {
            kind: action.code(),
            id: id.into(),
            body,
        }
    }
}

/// A response envelope: `{ "req_id", "status", "body" }`.
///
/// `req_id` echoes the request's `id`, or is [`NOTIFICATION_REQ_ID`] for
/// messages nobody asked for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response<B> {
    pub req_id: String,
    pub status: Status,
    pub body: B,
}

impl<B> Response<B> {
    pub fn new(req_id: impl Into<String>, status: Status, body: B) -> Self {
        Self {
            req_id: req_id.into(),
            status,
            body,
        }
    }

    /// An unsolicited message for the opponent's connection.
    pub fn notification(status: Status, body: B) -> Self {
        Self::new(NOTIFICATION_REQ_ID, status, body)
    }

    pub fn is_notification(&self) -> bool {
        self.req_id == NOTIFICATION_REQ_ID
    }
}

// ---------------------------------------------------------------------------
// Payloads shared by both board variants
// ---------------------------------------------------------------------------

/// Body of a join request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinMatch {
    pub match_id: MatchId,
}

/// Body of a move request. `target` is flattened, so a 2-D move reads
/// `{ "match_id", "col" }` and a 3-D move `{ "match_id", "row", "col" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest<T> {
    pub match_id: MatchId,
    #[serde(flatten)]
    pub target: T,
}

/// Public data about a player, as resolved by the profile service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub id: PlayerId,
    #[serde(default)]
    pub nick: String,
    #[serde(default)]
    pub img_url: String,
}

impl PlayerProfile {
    /// A profile carrying only the id.
    pub fn anonymous(id: PlayerId) -> Self {
        Self {
            id,
            nick: String::new(),
            img_url: String::new(),
        }
    }
}

/// Body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

// =========================================================================
// Tests
// =========================================================================
