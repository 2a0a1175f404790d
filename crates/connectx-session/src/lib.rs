//! Player identity and session tracking for ConnectX.
//!
//! This crate owns everything that is about *who* is on the other end of
//! a connection:
//!
//! 1. **Authentication**: turning a handshake credential into a
//!    [`PlayerId`](connectx_protocol::PlayerId) ([`Authenticator`] trait)
//! 2. **Profiles**: nickname/avatar lookup ([`ProfileProvider`] trait)
//! 3. **Session tracking**: which connection a player is reachable on
//!    ([`SessionDirectory`])
//!
//! # How it fits in the stack
//!
//! ```text
//! Hub (above)            ← looks up the opponent's outbox here
//!     ↕
//! Session Layer (this crate)
//!     ↕
//! Protocol / Transport   ← PlayerId, ConnectionId
//! ```

mod auth;
mod directory;
mod error;
mod profile;

pub use auth::{Authenticator, TokenAuthenticator};
pub use directory::{Outbox, SessionDirectory};
pub use error::SessionError;
pub use profile::{AnonymousProfiles, ProfileProvider};
