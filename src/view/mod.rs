//! View module - view types and method dispatch.
//!
//! Provides:
//! - [`ViewDescriptor`] / [`ViewBuilder`] - a view type and its handler table
//! - [`MethodRegistry`] - computes supported-method metadata at build time
//! - [`DispatchEngine`] / [`View`] - resolves a request's `method` to a handler
//! - [`ViewFunction`] - a view type exposed as a plain endpoint
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use verbview::view::{View, ViewDescriptor};
//! use verbview::{Args, Request};
//! use serde_json::{json, Value};
//!
//! let descriptor = Arc::new(
//!     ViewDescriptor::<(), Value>::builder("status")
//!         .handle("get", |_view, _req, _args| json!({"status": "ok"}))
//!         .handle("head", |_view, _req, _args| Value::Null)
//!         .build(),
//! );
//!
//! let view = View::new((), descriptor);
//! assert_eq!(view.supported_methods(), Some(&["GET".to_string(), "HEAD".to_string()][..]));
//!
//! let mut request = Request::new();
//! request.insert("method", json!("get"));
//! assert_eq!(view.dispatch(&mut request, &Args::new()), Ok(json!({"status": "ok"})));
//! ```

mod descriptor;
mod dispatch;
mod registry;

pub use descriptor::{BoxFuture, FnHandler, Handler, HandlerRef, ViewBuilder, ViewDescriptor};
pub use dispatch::{resolve_method_name, DispatchEngine, View, ViewFunction};
pub use registry::MethodRegistry;
