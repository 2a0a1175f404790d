//! Error types for the session layer.

use connectx_protocol::PlayerId;

/// Errors raised by identity collaborators.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The handshake credential was missing or rejected by the
    /// [`Authenticator`](crate::Authenticator).
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    /// The [`ProfileProvider`](crate::ProfileProvider) could not resolve
    /// a player's public data.
    #[error("profile unavailable for player {0}: {1}")]
    ProfileUnavailable(PlayerId, String),
}
