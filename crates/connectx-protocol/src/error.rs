//! Error types for the protocol layer.

/// Errors that can occur in the protocol layer.
///
/// Each crate in ConnectX defines its own error enum; a `ProtocolError`
/// always means the bytes on the wire were the problem, never the game.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning a Rust type into bytes).
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed: malformed JSON, missing required fields,
    /// wrong data types, or truncated messages.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// The message decoded but violates protocol rules, e.g. an action
    /// code nobody handles.
    #[error("invalid message: {0}")]
    InvalidMessage(String),
}
