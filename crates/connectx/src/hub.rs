//! The hub: shared state plus the per-connection read loop.
//!
//! Each accepted connection gets its own Tokio task running
//! [`Hub::serve`]. The flow is:
//!   1. Authenticate the handshake credential → `PlayerId`
//!   2. Spawn a writer task draining the connection's outbox
//!   3. Register the outbox in the session directory
//!   4. Loop: receive frames → decode the header → route to a handler
//!   5. On close, release the session (only if it's still ours)

use std::fmt::Display;
use std::sync::Arc;

use connectx_match::{Limits, MatchRegistry, ThreeD, TwoD, Variant};
use connectx_protocol::{
    ActionCode, Codec, ErrorBody, PlayerId, RequestHeader, Response, Status,
};
use connectx_session::{Authenticator, Outbox, ProfileProvider, SessionDirectory};
use connectx_transport::{Connection, Frame};
use serde::Serialize;
use tokio::sync::Mutex;

use crate::ServerError;
use crate::handlers;

/// Everything shared between connection tasks.
///
/// Lock order: the session directory and match locks are never held at
/// the same time.
pub struct Hub<A, P, C> {
    pub(crate) sessions: Mutex<SessionDirectory>,
    pub(crate) matches_2d: MatchRegistry<TwoD>,
    pub(crate) matches_3d: MatchRegistry<ThreeD>,
    pub(crate) auth: A,
    pub(crate) profiles: P,
    pub(crate) codec: C,
}

impl<A, P, C> Hub<A, P, C>
where
    A: Authenticator,
    P: ProfileProvider,
    C: Codec,
{
    /// Creates a hub with each variant's default limits.
    pub fn new(auth: A, profiles: P, codec: C) -> Self {
        Self::with_limits(
            auth,
            profiles,
            codec,
            TwoD::DEFAULT_LIMITS,
            ThreeD::DEFAULT_LIMITS,
        )
    }

    pub fn with_limits(
        auth: A,
        profiles: P,
        codec: C,
        limits_2d: Limits,
        limits_3d: Limits,
    ) -> Self {
        Self {
            sessions: Mutex::new(SessionDirectory::new()),
            matches_2d: MatchRegistry::with_limits(limits_2d),
            matches_3d: MatchRegistry::with_limits(limits_3d),
            auth,
            profiles,
            codec,
        }
    }

    pub fn matches_2d(&self) -> &MatchRegistry<TwoD> {
        &self.matches_2d
    }

    pub fn matches_3d(&self) -> &MatchRegistry<ThreeD> {
        &self.matches_3d
    }

    /// Whether `player_id` currently has a registered connection.
    pub async fn is_online(&self, player_id: &PlayerId) -> bool {
        self.sessions.lock().await.lookup(player_id).is_some()
    }

    /// Runs one connection from authentication to close.
    ///
    /// Returns once the peer disconnects or a read fails.
    ///
    /// # Errors
    /// [`ServerError::Session`] if the credential is rejected; the
    /// connection is closed without reading anything.
    pub async fn serve<T>(self: Arc<Self>, conn: T) -> Result<(), ServerError>
    where
        T: Connection,
    {
        let conn_id = conn.id();
        let credential = conn.credential().unwrap_or_default().to_owned();

        let player_id = match self.auth.authenticate(&credential).await {
            Ok(id) => id,
            Err(e) => {
                tracing::debug!(%conn_id, error = %e, "authentication failed");
                let _ = conn.close().await;
                return Err(e.into());
            }
        };
        tracing::info!(%conn_id, %player_id, "player connected");

        let conn = Arc::new(conn);
        let (outbox, mut pending) = Outbox::channel(conn_id);
        let writer = {
            let conn = Arc::clone(&conn);
            tokio::spawn(async move {
                while let Some(frame) = pending.recv().await {
                    if let Err(e) = conn.send(&frame).await {
                        tracing::debug!(%conn_id, error = %e, "write failed");
                        break;
                    }
                }
            })
        };

        self.sessions
            .lock()
            .await
            .register(player_id.clone(), outbox.clone());

        loop {
            match conn.recv().await {
                Ok(Some(Frame::Binary(data))) => {
                    self.dispatch(&player_id, &outbox, &data).await;
                }
                Ok(Some(Frame::Text(_))) => {
                    self.reject(&outbox, "", Status::BadRequest, "invalid message type");
                }
                Ok(None) => {
                    tracing::info!(%conn_id, %player_id, "connection closed");
                    break;
                }
                Err(e) => {
                    tracing::debug!(%conn_id, %player_id, error = %e, "recv error");
                    break;
                }
            }
        }

        self.sessions.lock().await.release(&player_id, conn_id);

        // The writer exits once every outbox clone is gone, after flushing
        // whatever was already queued.
        drop(outbox);
        let _ = writer.await;
        let _ = conn.close().await;
        Ok(())
    }

    /// Routes one binary frame to exactly one handler.
    async fn dispatch(&self, player_id: &PlayerId, outbox: &Outbox, frame: &[u8]) {
        let header: RequestHeader = match self.codec.decode(frame) {
            Ok(header) => header,
            Err(e) => return self.reject(outbox, "", Status::BadRequest, e),
        };
        let action = match header.action() {
            Ok(action) => action,
            Err(e) => return self.reject(outbox, &header.id, Status::BadRequest, e),
        };
        tracing::debug!(%player_id, ?action, req_id = %header.id, "request");

        let req_id = header.id.as_str();
        match action {
            ActionCode::CreateMatch2D => {
                handlers::create_match(self, &self.matches_2d, player_id, outbox, req_id, frame).await
            }
            ActionCode::JoinMatch2D => {
                handlers::join_match(self, &self.matches_2d, player_id, outbox, req_id, frame).await
            }
            ActionCode::RegisterMove2D => {
                handlers::register_move(self, &self.matches_2d, player_id, outbox, req_id, frame)
                    .await
            }
            ActionCode::CreateMatch3D => {
                handlers::create_match(self, &self.matches_3d, player_id, outbox, req_id, frame).await
            }
            ActionCode::JoinMatch3D => {
                handlers::join_match(self, &self.matches_3d, player_id, outbox, req_id, frame).await
            }
            ActionCode::RegisterMove3D => {
                handlers::register_move(self, &self.matches_3d, player_id, outbox, req_id, frame)
                    .await
            }
        }
    }

    /// Encodes `response` and queues it on `outbox`.
    pub(crate) fn respond<B: Serialize>(&self, outbox: &Outbox, response: &Response<B>) -> bool {
        match self.codec.encode(response) {
            Ok(bytes) => outbox.deliver(bytes),
            Err(e) => {
                tracing::error!(error = %e, "failed to encode response");
                false
            }
        }
    }

    /// Answers a request with an error status and `{ "error": reason }`.
    pub(crate) fn reject(&self, outbox: &Outbox, req_id: &str, status: Status, reason: impl Display) {
        let error = reason.to_string();
        tracing::debug!(conn_id = %outbox.conn_id(), req_id, ?status, %error, "request rejected");
        self.respond(outbox, &Response::new(req_id, status, ErrorBody { error }));
    }

    /// Pushes a notification to `player_id` if they're connected.
    pub(crate) async fn notify<B: Serialize>(&self, player_id: &PlayerId, response: &Response<B>) {
        let target = self.sessions.lock().await.lookup(player_id);
        match target {
            Some(outbox) => {
                if !self.respond(&outbox, response) {
                    tracing::debug!(%player_id, "notification undeliverable");
                }
            }
            None => tracing::debug!(%player_id, "opponent offline, notification dropped"),
        }
    }
}
