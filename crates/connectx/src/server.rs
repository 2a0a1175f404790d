//! `ConnectxServer` builder and accept loop.
//!
//! This is the entry point for running a ConnectX server. It ties the
//! layers together: transport → hub → handlers → match registries.

use std::sync::Arc;
use std::time::Duration;

use connectx_match::{Limits, ThreeD, TwoD, Variant};
use connectx_protocol::JsonCodec;
use connectx_session::{Authenticator, ProfileProvider};
use connectx_transport::{
    DEFAULT_HANDSHAKE_TIMEOUT, Handshake, Transport, WebSocketTransport,
};

use crate::{Hub, ServerError};

/// Builder for configuring and starting a ConnectX server.
///
/// # Example
///
/// ```rust,no_run
/// use connectx::prelude::*;
///
/// # async fn start() -> Result<(), ServerError> {
/// let server = ConnectxServerBuilder::new()
///     .bind("0.0.0.0:8080")
///     .limits_2d(Limits::new(4, 12))
///     .build(TokenAuthenticator, AnonymousProfiles)
///     .await?;
/// server.run().await
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ConnectxServerBuilder {
    bind_addr: String,
    limits_2d: Limits,
    limits_3d: Limits,
    handshake_timeout: Duration,
}

impl ConnectxServerBuilder {
    pub fn new() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_string(),
            limits_2d: TwoD::DEFAULT_LIMITS,
            limits_3d: ThreeD::DEFAULT_LIMITS,
            handshake_timeout: DEFAULT_HANDSHAKE_TIMEOUT,
        }
    }

    pub fn bind(mut self, addr: &str) -> Self {
        self.bind_addr = addr.to_string();
        self
    }

    /// Bounds for 2-D board dimensions and alignment.
    pub fn limits_2d(mut self, limits: Limits) -> Self {
        self.limits_2d = limits;
        self
    }

    /// Bounds for 3-D board dimensions and alignment.
    pub fn limits_3d(mut self, limits: Limits) -> Self {
        self.limits_3d = limits;
        self
    }

    /// How long a new socket may take to send its upgrade request.
    pub fn handshake_timeout(mut self, timeout: Duration) -> Self {
        self.handshake_timeout = timeout;
        self
    }

    /// Binds the listener and assembles the hub.
    ///
    /// Uses `JsonCodec` over `WebSocketTransport`.
    pub async fn build<A, P>(
        self,
        auth: A,
        profiles: P,
    ) -> Result<ConnectxServer<A, P>, ServerError>
    where
        A: Authenticator,
        P: ProfileProvider,
    {
        let transport = WebSocketTransport::bind(&self.bind_addr)
            .await?
            .with_handshake_timeout(self.handshake_timeout);
        let hub = Arc::new(Hub::with_limits(
            auth,
            profiles,
            JsonCodec,
            self.limits_2d,
            self.limits_3d,
        ));
        Ok(ConnectxServer { transport, hub })
    }
}

impl Default for ConnectxServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A bound ConnectX server.
///
/// Call [`run()`](Self::run) to start accepting connections.
pub struct ConnectxServer<A, P> {
    transport: WebSocketTransport,
    hub: Arc<Hub<A, P, JsonCodec>>,
}

impl<A, P> ConnectxServer<A, P>
where
    A: Authenticator,
    P: ProfileProvider,
{
    pub fn builder() -> ConnectxServerBuilder {
        ConnectxServerBuilder::new()
    }

    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.transport.local_addr()
    }

    /// The shared state behind every connection.
    pub fn hub(&self) -> Arc<Hub<A, P, JsonCodec>> {
        Arc::clone(&self.hub)
    }

    /// Runs the accept loop until the process is terminated.
    ///
    /// Each accepted socket is upgraded and served on its own task, so a
    /// slow handshake never delays the next accept. A failed accept is
    /// logged and the loop keeps going.
    pub async fn run(mut self) -> Result<(), ServerError> {
        tracing::info!(addr = ?self.local_addr().ok(), "ConnectX server running");

        loop {
            match self.transport.accept().await {
                Ok(pending) => {
                    let hub = Arc::clone(&self.hub);
                    tokio::spawn(async move {
                        let peer = pending.peer_addr();
                        let conn = match pending.complete().await {
                            Ok(conn) => conn,
                            Err(e) => {
                                tracing::debug!(%peer, error = %e, "handshake failed");
                                return;
                            }
                        };
                        if let Err(e) = hub.serve(conn).await {
                            tracing::debug!(error = %e, "connection ended with error");
                        }
                    });
                }
                Err(e) => {
                    tracing::error!(error = %e, "accept failed");
                }
            }
        }
    }
}
