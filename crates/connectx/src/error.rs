//! Unified error type for the ConnectX server.

use connectx_match::MatchError;
use connectx_protocol::ProtocolError;
use connectx_session::SessionError;
use connectx_transport::TransportError;

/// Top-level error that wraps every crate-specific error.
///
/// `#[from]` on each variant lets `?` convert sub-crate errors directly.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Binding, accepting, or talking to a socket failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// Authentication or profile lookup failed.
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Match(#[from] MatchError),
}
