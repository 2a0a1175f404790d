//! Wire protocol for ConnectX.
//!
//! This crate defines the "language" that clients and the server speak:
//!
//! - **Types** ([`Request`], [`Response`], [`ActionCode`], [`Status`], etc.):
//!   the envelopes and shared payloads that travel on the wire.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]): how those messages are
//!   converted to/from bytes.
//! - **Errors** ([`ProtocolError`]): what can go wrong during
//!   encoding/decoding.
//!
//! The protocol layer knows nothing about boards or connections.
//!
//! ```text
//! Transport (frames) → Protocol (Request/Response) → Hub (handlers)
//! ```

mod codec;
mod error;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use types::{
    ActionCode, ErrorBody, JoinMatch, MatchId, MoveRequest, PlayerId,
    PlayerProfile, Request, RequestHeader, Response, Status,
    NOTIFICATION_REQ_ID,
};
