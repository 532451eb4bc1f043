//! JSON codec using `serde_json`.

use serde_json::Value;

use super::into_request;
use crate::error::Result;
use crate::request::Request;

/// JSON codec for text payloads.
pub struct JsonCodec;

impl JsonCodec {
    /// Encode a value as a single-line JSON document.
    #[inline]
    pub fn encode<T: serde::Serialize>(value: &T) -> Result<String> {
        Ok(serde_json::to_string(value)?)
    }

    /// Decode JSON bytes to a value.
    #[inline]
    pub fn decode<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Decode a JSON object into a request.
    ///
    /// # Errors
    ///
    /// `ViewError::Json` on malformed JSON, `ViewError::Protocol` when the
    /// document is not an object.
    pub fn decode_request(bytes: &[u8]) -> Result<Request> {
        into_request(Self::decode::<Value>(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ViewError;
    use serde_json::json;

    #[test]
    fn test_decode_request_object() {
        let request = JsonCodec::decode_request(br#"{"method": " POST ", "data": {"a": 1}}"#).unwrap();
        assert_eq!(request.get("method"), Some(&json!(" POST ")));
        assert_eq!(request.get("data"), Some(&json!({"a": 1})));
    }

    #[test]
    fn test_decode_request_rejects_non_object() {
        for payload in [&b"[1, 2]"[..], &b"\"get\""[..], &b"42"[..], &b"null"[..]] {
            let err = JsonCodec::decode_request(payload).unwrap_err();
            assert!(matches!(err, ViewError::Protocol(_)), "payload {:?}", payload);
        }
    }

    #[test]
    fn test_decode_request_malformed() {
        let err = JsonCodec::decode_request(b"{method: get}").unwrap_err();
        assert!(matches!(err, ViewError::Json(_)));
    }

    #[test]
    fn test_encode_is_single_line() {
        let line = JsonCodec::encode(&json!({"data": ["a", "b"], "nested": {"x": 1}})).unwrap();
        assert!(!line.contains('\n'));
    }
}
