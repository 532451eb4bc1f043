//! MsgPack codec using `rmp-serde`.
//!
//! **Always use `to_vec_named`**: structs must go out as maps with field
//! names, since peers decode requests and responses as keyed maps.

use serde_json::Value;

use super::into_request;
use crate::error::Result;
use crate::request::Request;

/// MessagePack codec for binary payloads.
pub struct MsgPackCodec;

impl MsgPackCodec {
    /// Encode a value to MsgPack bytes (struct-as-map format).
    ///
    /// # Errors
    ///
    /// Returns error if the value cannot be serialized.
    #[inline]
    pub fn encode<T: serde::Serialize>(value: &T) -> Result<Vec<u8>> {
        Ok(rmp_serde::to_vec_named(value)?)
    }

    /// Decode MsgPack bytes to a value.
    ///
    /// # Errors
    ///
    /// Returns error if the bytes cannot be deserialized to type T.
    #[inline]
    pub fn decode<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T> {
        Ok(rmp_serde::from_slice(bytes)?)
    }

    /// Decode a MsgPack map into a request.
    pub fn decode_request(bytes: &[u8]) -> Result<Request> {
        into_request(Self::decode::<Value>(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ViewError;
    use serde::Serialize;
    use serde_json::json;

    #[derive(Serialize)]
    struct Inbound {
        method: String,
        url: String,
        args: Vec<i32>,
    }

    #[test]
    fn test_decode_request_from_struct() {
        let bytes = MsgPackCodec::encode(&Inbound {
            method: "get".to_string(),
            url: "/users/".to_string(),
            args: vec![1, 2],
        })
        .unwrap();

        let request = MsgPackCodec::decode_request(&bytes).unwrap();
        assert_eq!(request.get("method"), Some(&json!("get")));
        assert_eq!(request.get("url"), Some(&json!("/users/")));
        assert_eq!(request.get("args"), Some(&json!([1, 2])));
    }

    #[test]
    fn test_to_vec_named_produces_map_format() {
        let bytes = MsgPackCodec::encode(&Inbound {
            method: "post".to_string(),
            url: "/".to_string(),
            args: vec![],
        })
        .unwrap();

        // fixmap with 3 entries, not fixarray (0x93)
        assert_eq!(bytes[0], 0x83, "Expected fixmap, got {:02X}", bytes[0]);
    }

    #[test]
    fn test_decode_request_rejects_array() {
        let bytes = MsgPackCodec::encode(&vec!["get", "/users/"]).unwrap();
        let err = MsgPackCodec::decode_request(&bytes).unwrap_err();
        assert!(matches!(err, ViewError::Protocol(_)));
    }

    #[test]
    fn test_decode_error_on_invalid_data() {
        let result = MsgPackCodec::decode_request(b"\xc1");
        assert!(matches!(result, Err(ViewError::MsgPackDecode(_))));
    }

    #[test]
    fn test_non_string_method_survives_decoding() {
        let bytes = MsgPackCodec::encode(&json!({"method": 42})).unwrap();
        let request = MsgPackCodec::decode_request(&bytes).unwrap();
        assert_eq!(request.get("method"), Some(&json!(42)));
    }
}
