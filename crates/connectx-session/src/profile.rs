//! Player profile lookup.
//!
//! Nicknames and avatars live in a user service outside this process.
//! The hub only needs one operation from it, so that's all the trait has.

use std::future::Future;

use connectx_protocol::{PlayerId, PlayerProfile};

use crate::SessionError;

/// Resolves a player's displayable profile.
pub trait ProfileProvider: Send + Sync + 'static {
    /// # Errors
    /// Returns [`SessionError::ProfileUnavailable`] if the lookup fails.
    fn get_profile(
        &self,
        player_id: &PlayerId,
    ) -> impl Future<Output = Result<PlayerProfile, SessionError>> + Send;
}

/// Profiles carrying only the player id.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnonymousProfiles;

impl ProfileProvider for AnonymousProfiles {
    async fn get_profile(
        &self,
        player_id: &PlayerId,
    ) -> Result<PlayerProfile, SessionError> {
        Ok(PlayerProfile::anonymous(player_id.clone()))
    }
}
