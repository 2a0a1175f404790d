//! # ConnectX
//!
//! Multiplayer backend for Connect-Four on 2-D and 3-D boards.
//!
//! Players connect over WebSocket, create or join matches, and take turns
//! dropping pieces. The server is authoritative: it validates every move,
//! detects wins and draws, and pushes each move to the opponent.
//!
//! ## Layers
//!
//! ```text
//! connectx-transport   frames over WebSocket (or in-memory pairs)
//! connectx-protocol    request/response envelopes, JSON codec
//! connectx-session     authentication, profiles, session directory
//! connectx-match       board engine and match registries
//! connectx (this)      hub, handlers, server
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use connectx::prelude::*;
//!
//! # async fn start() -> Result<(), ServerError> {
//! let server = ConnectxServerBuilder::new()
//!     .bind("0.0.0.0:8080")
//!     .build(TokenAuthenticator, AnonymousProfiles)
//!     .await?;
//! server.run().await
//! # }
//! ```

mod error;
mod handlers;
mod hub;
pub mod reply;
mod server;

pub use error::ServerError;
pub use hub::Hub;
pub use server::{ConnectxServer, ConnectxServerBuilder};

/// Everything needed to run a server or drive a hub in tests.
pub mod prelude {
    pub use crate::reply::{MatchView, MoveNotice, PlayerView, ReplyBody};
    pub use crate::{ConnectxServer, ConnectxServerBuilder, Hub, ServerError};

    pub use connectx_match::{
        Column, Dims2, Dims3, Limits, Line, MAX_CLOCK_MS, Match, MatchError, MatchOptions,
        MatchRegistry, Outcome, Point2, Point3, Slot, Stick, ThreeD, TwoD, Variant,
    };
    pub use connectx_protocol::{
        ActionCode, Codec, ErrorBody, JoinMatch, JsonCodec, MatchId, MoveRequest, PlayerId,
        PlayerProfile, ProtocolError, Request, Response, Status, NOTIFICATION_REQ_ID,
    };
    pub use connectx_session::{
        AnonymousProfiles, Authenticator, Outbox, ProfileProvider, SessionDirectory,
        SessionError, TokenAuthenticator,
    };
    pub use connectx_transport::{
        Connection, ConnectionId, Frame, Handshake, PendingWebSocket, Transport,
        TransportError, WebSocketConnection, WebSocketTransport,
    };
}
