//! Codec module - decoding request payloads and encoding responses.
//!
//! - [`JsonCodec`] - JSON text frames (websocket text messages, stdin lines)
//! - [`MsgPackCodec`] - MessagePack using `rmp-serde` (`to_vec_named`)
//!
//! Both decode a payload into a [`Request`]; the payload must be a map.
//!
//! # Design
//!
//! Codecs are marker structs with static methods rather than trait objects,
//! so the wire format is picked at compile time.
//!
//! # Example
//!
//! ```
//! use verbview::codec::{JsonCodec, MsgPackCodec};
//!
//! let request = JsonCodec::decode_request(br#"{"method": "get", "id": 1}"#).unwrap();
//! assert_eq!(request.len(), 2);
//!
//! let bytes = MsgPackCodec::encode(&request).unwrap();
//! assert_eq!(MsgPackCodec::decode_request(&bytes).unwrap(), request);
//! ```

mod json;
mod msgpack;

pub use json::JsonCodec;
pub use msgpack::MsgPackCodec;

use serde_json::Value;

use crate::error::{Result, ViewError};
use crate::request::{json_type_name, Request};

/// Accept a decoded payload only if it is a map.
fn into_request(value: Value) -> Result<Request> {
    match value {
        Value::Object(fields) => Ok(Request::from_map(fields)),
        other => Err(ViewError::Protocol(format!(
            "request payload must be a map, found {}",
            json_type_name(&other)
        ))),
    }
}
