//! Authentication hook for validating player identity.
//!
//! ConnectX doesn't implement authentication itself. The HTTP layer in
//! front of it (or the upgrade request's cookie) carries an
//! already-issued credential, and an [`Authenticator`] turns it into a
//! [`PlayerId`]. The hub calls it once per connection, before the first
//! frame is read.

use std::future::Future;

use connectx_protocol::PlayerId;

use crate::SessionError;

/// Validates a client's credential and returns their identity.
///
/// # Example
///
/// ```rust
/// use connectx_session::{Authenticator, SessionError};
/// use connectx_protocol::PlayerId;
///
/// /// Only lets in players whose token starts with "user-".
/// struct PrefixAuthenticator;
///
/// impl Authenticator for PrefixAuthenticator {
///     async fn authenticate(
///         &self,
///         token: &str,
///     ) -> Result<PlayerId, SessionError> {
///         token
///             .strip_prefix("user-")
///             .map(PlayerId::from)
///             .ok_or_else(|| SessionError::AuthFailed("bad prefix".into()))
///     }
/// }
/// ```
pub trait Authenticator: Send + Sync + 'static {
    /// Validates the credential and returns the player's ID.
    ///
    /// # Errors
    /// Returns [`SessionError::AuthFailed`] if the credential is invalid.
    fn authenticate(
        &self,
        token: &str,
    ) -> impl Future<Output = Result<PlayerId, SessionError>> + Send;
}

/// Treats the credential itself as the player id.
///
/// This is what the deployment behind a session-issuing gateway uses:
/// the gateway already validated the cookie, so any non-empty token is a
/// player id.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenAuthenticator;

impl Authenticator for TokenAuthenticator {
    async fn authenticate(&self, token: &str) -> Result<PlayerId, SessionError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(SessionError::AuthFailed("missing token".into()));
        }
        Ok(PlayerId::from(token))
    }
}
