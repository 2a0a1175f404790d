//! Codec trait and implementations for serializing/deserializing messages.
//!
//! The dispatcher never calls `serde_json` directly; it goes through a
//! [`Codec`], so the envelope format can change without touching the
//! handlers.

use serde::{de::DeserializeOwned, Serialize};

use crate::ProtocolError;

/// A codec that can encode Rust types to bytes and decode bytes back.
///
/// Decoding is done in two passes over the same frame: once into a
/// [`RequestHeader`](crate::RequestHeader) to route it, then into a
/// [`Request<B>`](crate::Request) with the action-specific body. Any
/// implementation must therefore tolerate fields the target type doesn't
/// name.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns `ProtocolError::Encode` if serialization fails.
    fn encode<T: Serialize>(
        &self,
        value: &T,
    ) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes into a value.
    ///
    /// # Errors
    /// Returns `ProtocolError::Decode` if the bytes are malformed,
    /// incomplete, or don't match the expected type.
    fn decode<T: DeserializeOwned>(
        &self,
        data: &[u8],
    ) -> Result<T, ProtocolError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] that uses JSON (via `serde_json`).
///
/// This is the format existing browser clients speak. Behind the `json`
/// feature flag (enabled by default).
///
/// ## Example
///
/// ```rust
/// use connectx_protocol::{Codec, JsonCodec, RequestHeader};
///
/// let codec = JsonCodec;
/// let frame = br#"{"type":2,"id":"7","body":{"w":7,"h":6,"a":4}}"#;
///
/// let header: RequestHeader = codec.decode(frame).unwrap();
/// assert_eq!(header.id, "7");
/// ```
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(
        &self,
        value: &T,
    ) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(
        &self,
        data: &[u8],
    ) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}

#[cfg(all(test, feature = "json"))]
mod tests {
    use super::*;
    use crate::{ActionCode, JoinMatch, Request, RequestHeader, Status};

    #[test]
    fn test_json_codec_decodes_header_ignoring_body() {
        let frame = br#"{"type":1,"id":"abc","body":{"match_id":"m-1"}}"#;
        let header: RequestHeader = JsonCodec.decode(frame).unwrap();
        assert_eq!(header.kind, 1);
        assert_eq!(header.id, "abc");
        assert_eq!(header.action().unwrap(), ActionCode::JoinMatch2D);
    }

    #[test]
    fn test_json_codec_decodes_typed_body_from_same_frame() {
        let frame = br#"{"type":1,"id":"abc","body":{"match_id":"m-1"}}"#;
        let req: Request<JoinMatch> = JsonCodec.decode(frame).unwrap();
        assert_eq!(req.body.match_id.as_str(), "m-1");
    }

    #[test]
    fn test_json_codec_decode_garbage_is_decode_error() {
        let result: Result<RequestHeader, _> = JsonCodec.decode(b"not json");
        assert!(matches!(result, Err(ProtocolError::Decode(_))));
    }

    #[test]
    fn test_json_codec_encodes_status_as_integer() {
        let bytes = JsonCodec.encode(&Status::GameoverDraw).unwrap();
        assert_eq!(bytes, b"8");
    }
}
