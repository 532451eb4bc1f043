//! Error types for verbview.

use thiserror::Error;

/// Failure to resolve a request to a handler.
///
/// All three kinds are raised before any handler runs. Errors produced by
/// a handler itself are part of the handler's return value and never show
/// up here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// The request has no `method` entry, or it is empty/falsy.
    #[error("Method name is not specified in the request")]
    MissingMethodName,

    /// The `method` entry is present but is not a string.
    #[error("Method name must be a string, found {found}")]
    InvalidMethodNameType {
        /// JSON type of the offending value (e.g. "number").
        found: &'static str,
    },

    /// No handler is registered under the normalized method name.
    #[error("Handler not found for method: {0:?}")]
    HandlerNotFound(String),
}

impl DispatchError {
    /// Conventional HTTP status for this failure.
    ///
    /// Only a hint for the routing layer; dispatch itself never emits a
    /// transport status.
    pub fn status_hint(&self) -> u16 {
        match self {
            DispatchError::MissingMethodName | DispatchError::InvalidMethodNameType { .. } => 400,
            DispatchError::HandlerNotFound(_) => 405,
        }
    }
}

/// Main error type for all verbview operations.
#[derive(Debug, Error)]
pub enum ViewError {
    /// Request could not be resolved to a handler.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    /// I/O error while reading requests or writing responses.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// MsgPack serialization error.
    #[error("MsgPack encode error: {0}")]
    MsgPackEncode(#[from] rmp_serde::encode::Error),

    /// MsgPack deserialization error.
    #[error("MsgPack decode error: {0}")]
    MsgPackDecode(#[from] rmp_serde::decode::Error),

    /// Payload has the wrong shape (not a map, wrong row width, unknown field).
    #[error("Protocol error: {0}")]
    Protocol(String),
}

/// Result type alias using ViewError.
pub type Result<T> = std::result::Result<T, ViewError>;
