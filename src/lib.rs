//! # verbview
//!
//! Class-based views with method-name dispatch.
//!
//! A view type bundles one handler per request method. Requests are keyed
//! maps (decoded from JSON or MsgPack); the `method` entry picks the
//! handler, case- and whitespace-insensitively.
//!
//! ## Architecture
//!
//! - **View types** ([`ViewDescriptor`]): built once with a builder, which
//!   also computes the advisory supported-methods list
//! - **Dispatch** ([`View::dispatch`]): per request, resolves `method` to a
//!   handler and invokes it, or fails with a [`DispatchError`]
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use verbview::{Args, JsonCodec, View, ViewDescriptor};
//! use serde_json::{json, Value};
//!
//! let descriptor = Arc::new(
//!     ViewDescriptor::<(), Value>::builder("echo")
//!         .handle("get", |_view, req, _args| json!({"echo": req}))
//!         .build(),
//! );
//! let view = View::new((), descriptor);
//!
//! let mut request = JsonCodec::decode_request(br#"{"method": "GET", "text": "hi"}"#).unwrap();
//! let response = view.dispatch(&mut request, &Args::new()).unwrap();
//! assert_eq!(response, json!({"echo": {"text": "hi"}}));
//! ```

pub mod auth;
pub mod codec;
pub mod error;
pub mod request;
pub mod stdio;
pub mod verb;
pub mod view;

pub use codec::{JsonCodec, MsgPackCodec};
pub use error::{DispatchError, Result, ViewError};
pub use request::{Args, Request};
pub use verb::Verb;
pub use view::{DispatchEngine, MethodRegistry, View, ViewBuilder, ViewDescriptor, ViewFunction};
