//! The session directory: which connection each player is reachable on.
//!
//! Handlers use it for one thing: finding the opponent's outbound handle
//! so a notification can be pushed to them. A player has at most one
//! entry; a newer connection for the same player replaces the older one.
//!
//! # Concurrency note
//!
//! `SessionDirectory` is a plain `HashMap` and is NOT thread-safe by
//! itself. The hub wraps it in a `tokio::sync::Mutex` and never holds that
//! lock together with a match lock.

use std::collections::HashMap;

use connectx_protocol::PlayerId;
use connectx_transport::ConnectionId;
use tokio::sync::mpsc;

/// Cloneable outbound handle of one live connection.
///
/// Frames pushed here are written to the socket by that connection's
/// writer task, in the order they were pushed. Pushing never blocks.
#[derive(Debug, Clone)]
pub struct Outbox {
    conn_id: ConnectionId,
    tx: mpsc::UnboundedSender<Vec<u8>>,
}

impl Outbox {
    pub fn new(conn_id: ConnectionId, tx: mpsc::UnboundedSender<Vec<u8>>) -> Self {
        Self { conn_id, tx }
    }

    /// Creates an outbox together with the receiving end its writer task
    /// should drain.
    pub fn channel(conn_id: ConnectionId) -> (Self, mpsc::UnboundedReceiver<Vec<u8>>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(conn_id, tx), rx)
    }

    pub fn conn_id(&self) -> ConnectionId {
        self.conn_id
    }

    /// Queues a frame for delivery.
    ///
    /// Returns `false` if the writer task is gone (the connection closed).
    pub fn deliver(&self, frame: Vec<u8>) -> bool {
        self.tx.send(frame).is_ok()
    }

    /// Returns `true` once the writer task has dropped its receiver.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Maps each connected player to their current [`Outbox`].
#[derive(Debug, Default)]
pub struct SessionDirectory {
    sessions: HashMap<PlayerId, Outbox>,
}

impl SessionDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Associates `player_id` with `outbox`, last writer wins.
    ///
    /// Returns the handle that was replaced, if the player was already
    /// connected elsewhere.
    pub fn register(&mut self, player_id: PlayerId, outbox: Outbox) -> Option<Outbox> {
        let conn_id = outbox.conn_id();
        let replaced = self.sessions.insert(player_id.clone(), outbox);
        match &replaced {
            Some(old) => tracing::info!(
                %player_id,
                %conn_id,
                replaced = %old.conn_id(),
                "session replaced"
            ),
            None => tracing::info!(%player_id, %conn_id, "session registered"),
        }
        replaced
    }

    /// Removes the player's entry, whichever connection it points to.
    pub fn unregister(&mut self, player_id: &PlayerId) -> Option<Outbox> {
        let removed = self.sessions.remove(player_id);
        if removed.is_some() {
            tracing::info!(%player_id, "session unregistered");
        }
        removed
    }

    /// Removes the player's entry only if it still belongs to `conn_id`.
    ///
    /// A connection loop that ends after the player reconnected elsewhere
    /// must not evict the newer connection. Returns `true` if an entry was
    /// removed.
    pub fn release(&mut self, player_id: &PlayerId, conn_id: ConnectionId) -> bool {
        let owned = self
            .sessions
            .get(player_id)
            .is_some_and(|outbox| outbox.conn_id() == conn_id);
        if owned {
            self.sessions.remove(player_id);
            tracing::info!(%player_id, %conn_id, "session released");
        }
        owned
    }

    /// Returns a clone of the player's outbox. Absence is not an error.
    pub fn lookup(&self, player_id: &PlayerId) -> Option<Outbox> {
        self.sessions.get(player_id).cloned()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn pid(id: &str) -> PlayerId {
        PlayerId::from(id)
    }

    fn outbox(raw: u64) -> (Outbox, mpsc::UnboundedReceiver<Vec<u8>>) {
        Outbox::channel(ConnectionId::new(raw))
    }

    #[test]
    fn test_register_new_player_returns_none() {
        let mut dir = SessionDirectory::new();
        let (ob, _rx) = outbox(1);

        assert!(dir.register(pid("alice"), ob).is_none());
        assert_eq!(dir.len(), 1);
    }

    #[test]
    fn test_register_same_player_replaces_previous() {
        let mut dir = SessionDirectory::new();
        let (first, _rx1) = outbox(1);
        let (second, _rx2) = outbox(2);

        dir.register(pid("alice"), first);
        let replaced = dir.register(pid("alice"), second).expect("replaced");

        assert_eq!(replaced.conn_id(), ConnectionId::new(1));
        assert_eq!(
            dir.lookup(&pid("alice")).unwrap().conn_id(),
            ConnectionId::new(2)
        );
        assert_eq!(dir.len(), 1);
    }

    #[test]
    fn test_lookup_unknown_player_returns_none() {
        let dir = SessionDirectory::new();
        assert!(dir.lookup(&pid("ghost")).is_none());
    }

    #[test]
    fn test_unregister_removes_entry() {
        let mut dir = SessionDirectory::new();
        let (ob, _rx) = outbox(1);
        dir.register(pid("alice"), ob);

        assert!(dir.unregister(&pid("alice")).is_some());
        assert!(dir.is_empty());
        assert!(dir.unregister(&pid("alice")).is_none());
    }

    #[test]
    fn test_release_matching_connection_removes_entry() {
        let mut dir = SessionDirectory::new();
        let (ob, _rx) = outbox(7);
        dir.register(pid("alice"), ob);

        assert!(dir.release(&pid("alice"), ConnectionId::new(7)));
        assert!(dir.lookup(&pid("alice")).is_none());
    }

    #[test]
    fn test_release_stale_connection_keeps_newer_entry() {
        let mut dir = SessionDirectory::new();
        let (old, _rx1) = outbox(1);
        let (new, _rx2) = outbox(2);
        dir.register(pid("alice"), old);
        dir.register(pid("alice"), new);

        assert!(!dir.release(&pid("alice"), ConnectionId::new(1)));
        assert_eq!(
            dir.lookup(&pid("alice")).unwrap().conn_id(),
            ConnectionId::new(2)
        );
    }

    #[test]
    fn test_deliver_reaches_receiver_in_order() {
        let (ob, mut rx) = outbox(1);

        assert!(ob.deliver(b"one".to_vec()));
        assert!(ob.clone().deliver(b"two".to_vec()));

        assert_eq!(rx.try_recv().unwrap(), b"one");
        assert_eq!(rx.try_recv().unwrap(), b"two");
    }

    #[test]
    fn test_deliver_after_receiver_dropped_returns_false() {
        let (ob, rx) = outbox(1);
        drop(rx);

        assert!(ob.is_closed());
        assert!(!ob.deliver(b"lost".to_vec()));
    }
}
