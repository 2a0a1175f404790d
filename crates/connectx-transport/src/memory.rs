//! In-process connection pair backed by tokio channels.
//!
//! [`MemoryConnection`] is the server half and implements [`Connection`];
//! [`MemoryPeer`] plays the client. Dropping or closing the peer ends the
//! server's receive loop exactly like a closed socket would.

use tokio::sync::{mpsc, Mutex};

use crate::{Connection, ConnectionId, Frame, TransportError};

/// Server half of an in-memory connection.
pub struct MemoryConnection {
    id: ConnectionId,
    credential: Option<String>,
    inbound: Mutex<mpsc::UnboundedReceiver<Frame>>,
    outbound: mpsc::UnboundedSender<Vec<u8>>,
}

/// Client half of an in-memory connection.
pub struct MemoryPeer {
    to_server: Option<mpsc::UnboundedSender<Frame>>,
    from_server: mpsc::UnboundedReceiver<Vec<u8>>,
}

impl MemoryConnection {
    /// Creates a connected pair. `credential` is what the server half
    /// reports as the handshake credential.
    pub fn pair(credential: Option<&str>) -> (MemoryConnection, MemoryPeer) {
        let (to_server, inbound) = mpsc::unbounded_channel();
        let (outbound, from_server) = mpsc::unbounded_channel();
        let conn = MemoryConnection {
            id: ConnectionId::next(),
            credential: credential.map(str::to_owned),
            inbound: Mutex::new(inbound),
            outbound,
        };
        let peer = MemoryPeer {
            to_server: Some(to_server),
            from_server,
        };
        (conn, peer)
    }
}

impl Connection for MemoryConnection {
    type Error = TransportError;

    async fn send(&self, data: &[u8]) -> Result<(), Self::Error> {
        self.outbound.send(data.to_vec()).map_err(|_| {
            TransportError::ConnectionClosed(format!("{} peer dropped", self.id))
        })
    }

    async fn recv(&self) -> Result<Option<Frame>, Self::Error> {
        Ok(self.inbound.lock().await.recv().await)
    }

    async fn close(&self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn id(&self) -> ConnectionId {
        self.id
    }

    fn credential(&self) -> Option<&str> {
        self.credential.as_deref()
    }
}

impl MemoryPeer {
    /// Sends a binary frame to the server half.
    pub fn send_binary(&self, data: impl Into<Vec<u8>>) -> Result<(), TransportError> {
        self.push(Frame::Binary(data.into()))
    }

    /// Sends a text frame to the server half.
    pub fn send_text(&self, text: impl Into<String>) -> Result<(), TransportError> {
        self.push(Frame::Text(text.into()))
    }

    /// Waits for the next frame the server sent. `None` once the server
    /// half is gone.
    pub async fn recv(&mut self) -> Option<Vec<u8>> {
        self.from_server.recv().await
    }

    /// Returns a frame if one is already queued.
    pub fn try_recv(&mut self) -> Option<Vec<u8>> {
        self.from_server.try_recv().ok()
    }

    /// Closes the client side; the server's next `recv` yields `Ok(None)`.
    pub fn close(&mut self) {
        self.to_server = None;
    }

    fn push(&self, frame: Frame) -> Result<(), TransportError> {
        let sender = self.to_server.as_ref().ok_or_else(|| {
            TransportError::ConnectionClosed("peer already closed".into())
        })?;
        sender.send(frame).map_err(|_| {
            TransportError::ConnectionClosed("server half dropped".into())
        })
    }
}
