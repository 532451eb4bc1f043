//! Per-request dispatch to view handlers.
//!
//! Resolution is linear and has no retries:
//! 1. remove `method` from the request (missing or falsy fails)
//! 2. require a string
//! 3. trim and lowercase
//! 4. look the name up in the view's handler table
//! 5. call the handler and return its result verbatim
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use verbview::{Args, DispatchError, Request, View, ViewDescriptor};
//! use serde_json::{json, Value};
//!
//! struct Greeter {
//!     greeting: String,
//! }
//!
//! let descriptor = Arc::new(
//!     ViewDescriptor::<Greeter, Value>::builder("greeter")
//!         .handle("get", |view, req, _args| {
//!             json!(format!("{}, {}", view.greeting, req.get("name").and_then(Value::as_str).unwrap_or("anon")))
//!         })
//!         .build(),
//! );
//! let view = View::new(Greeter { greeting: "hello".into() }, descriptor);
//!
//! let mut request: Request = serde_json::from_value(json!({"method": " GET ", "name": "bob"})).unwrap();
//! assert_eq!(view.dispatch(&mut request, &Args::new()), Ok(json!("hello, bob")));
//! assert!(!request.contains_key("method"));
//!
//! let mut request: Request = serde_json::from_value(json!({"method": "post"})).unwrap();
//! assert_eq!(
//!     view.dispatch(&mut request, &Args::new()),
//!     Err(DispatchError::HandlerNotFound("post".to_string()))
//! );
//! ```

use std::fmt;
use std::sync::Arc;

use super::descriptor::ViewDescriptor;
use crate::error::DispatchError;
use crate::request::{is_truthy, json_type_name, Args, Request, METHOD_KEY};

/// Take the method name out of a request and normalize it.
///
/// The `method` entry is removed even when resolution fails.
pub fn resolve_method_name(request: &mut Request) -> Result<String, DispatchError> {
    let method = match request.remove(METHOD_KEY) {
        Some(value) if is_truthy(&value) => value,
        _ => return Err(DispatchError::MissingMethodName),
    };

    let name = method.as_str().ok_or(DispatchError::InvalidMethodNameType {
        found: json_type_name(&method),
    })?;

    Ok(name.trim().to_lowercase())
}

/// Resolves requests to handlers and invokes them.
///
/// Stateless; every call re-resolves from the view's handler table.
pub struct DispatchEngine;

impl DispatchEngine {
    /// Dispatch a request to the handler matching its `method`.
    ///
    /// # Arguments
    ///
    /// * `descriptor` - View type holding the handler table
    /// * `view` - View state passed to the handler
    /// * `request` - Request mapping; `method` is removed from it
    /// * `args` - Routing extras forwarded to the handler
    pub fn dispatch<V: 'static, R: 'static>(
        descriptor: &ViewDescriptor<V, R>,
        view: &V,
        request: &mut Request,
        args: &Args,
    ) -> Result<R, DispatchError> {
        let method = match resolve_method_name(request) {
            Ok(m) => m,
            Err(e) => {
                tracing::warn!("Dispatch failed for view {}: {}", descriptor.name(), e);
                return Err(e);
            }
        };

        let handler = match descriptor.handler(&method) {
            Some(h) => h,
            None => {
                let e = DispatchError::HandlerNotFound(method);
                tracing::warn!("Dispatch failed for view {}: {}", descriptor.name(), e);
                return Err(e);
            }
        };

        tracing::debug!("Dispatching {} to view {}", method, descriptor.name());
        Ok(handler.call(view, request, args))
    }
}

/// A view instance: state bound to its view type.
pub struct View<V, R> {
    state: V,
    descriptor: Arc<ViewDescriptor<V, R>>,
}

impl<V: 'static, R: 'static> View<V, R> {
    /// Bind view state to a view type.
    pub fn new(state: V, descriptor: Arc<ViewDescriptor<V, R>>) -> Self {
        Self { state, descriptor }
    }

    /// Get the view state.
    #[inline]
    pub fn state(&self) -> &V {
        &self.state
    }

    /// Get the view type.
    #[inline]
    pub fn descriptor(&self) -> &Arc<ViewDescriptor<V, R>> {
        &self.descriptor
    }

    /// Supported methods of the view type.
    pub fn supported_methods(&self) -> Option<&[String]> {
        self.descriptor.supported_methods()
    }

    /// Dispatch a request to this view.
    pub fn dispatch(&self, request: &mut Request, args: &Args) -> Result<R, DispatchError> {
        DispatchEngine::dispatch(&self.descriptor, &self.state, request, args)
    }

    /// Into the view state.
    pub fn into_state(self) -> V {
        self.state
    }
}

type ViewFn<R> = dyn Fn(&mut Request, &Args) -> Result<R, DispatchError> + Send + Sync;

/// A view type turned into a plain endpoint function.
///
/// Every call builds a fresh view state and dispatches to it.
pub struct ViewFunction<R> {
    name: String,
    supported_methods: Option<Vec<String>>,
    inner: Arc<ViewFn<R>>,
}

impl<R> ViewFunction<R> {
    /// Endpoint name given to [`ViewDescriptor::as_view`].
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Supported methods of the underlying view type.
    pub fn supported_methods(&self) -> Option<&[String]> {
        self.supported_methods.as_deref()
    }

    /// Handle a request.
    pub fn call(&self, request: &mut Request, args: &Args) -> Result<R, DispatchError> {
        (self.inner)(request, args)
    }
}

impl<R> Clone for ViewFunction<R> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            supported_methods: self.supported_methods.clone(),
            inner: self.inner.clone(),
        }
    }
}

impl<R> fmt::Debug for ViewFunction<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewFunction")
            .field("name", &self.name)
            .field("supported_methods", &self.supported_methods)
            .finish()
    }
}

impl<V: 'static, R: 'static> ViewDescriptor<V, R> {
    /// Turn this view type into an endpoint function for a routing layer.
    ///
    /// `factory` builds the view state for each request; capture any
    /// constructor arguments in it.
    pub fn as_view<F>(self: &Arc<Self>, name: &str, factory: F) -> ViewFunction<R>
    where
        F: Fn() -> V + Send + Sync + 'static,
    {
        let descriptor = Arc::clone(self);
        ViewFunction {
            name: name.to_string(),
            supported_methods: self.supported_methods().map(|m| m.to_vec()),
            inner: Arc::new(move |request: &mut Request, args: &Args| {
                let view = factory();
                DispatchEngine::dispatch(&descriptor, &view, request, args)
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn request(value: Value) -> Request {
        serde_json::from_value(value).unwrap()
    }

    fn echo_view() -> View<(), Value> {
        let descriptor = ViewDescriptor::<(), Value>::builder("echo")
            .handle("get", |_, req, _| json!({"verb": "get", "request": req}))
            .handle("post", |_, req, args| {
                json!({"verb": "post", "request": req, "args": args.positional})
            })
            .build();
        View::new((), Arc::new(descriptor))
    }

    #[test]
    fn test_resolve_normalizes() {
        let mut req = request(json!({"method": "  GeT \n"}));
        assert_eq!(resolve_method_name(&mut req), Ok("get".to_string()));
        assert!(req.is_empty());
    }

    #[test]
    fn test_resolve_missing() {
        let mut req = request(json!({}));
        assert_eq!(
            resolve_method_name(&mut req),
            Err(DispatchError::MissingMethodName)
        );
    }

    #[test]
    fn test_resolve_falsy_values_are_missing() {
        for falsy in [json!(null), json!(""), json!(0), json!(false), json!([]), json!({})] {
            let mut req = request(json!({ "method": falsy }));
            assert_eq!(
                resolve_method_name(&mut req),
                Err(DispatchError::MissingMethodName)
            );
            assert!(!req.contains_key("method"));
        }
    }

    #[test]
    fn test_resolve_non_string() {
        let cases = [
            (json!(42), "number"),
            (json!(true), "bool"),
            (json!(["get"]), "array"),
            (json!({"name": "get"}), "object"),
        ];
        for (value, found) in cases {
            let mut req = request(json!({ "method": value }));
            assert_eq!(
                resolve_method_name(&mut req),
                Err(DispatchError::InvalidMethodNameType { found })
            );
            assert!(!req.contains_key("method"));
        }
    }

    #[test]
    fn test_whitespace_only_name_has_no_handler() {
        let view = echo_view();
        let mut req = request(json!({"method": "   "}));
        assert_eq!(
            view.dispatch(&mut req, &Args::new()),
            Err(DispatchError::HandlerNotFound(String::new()))
        );
    }

    #[test]
    fn test_dispatch_strips_method_before_handler() {
        let view = echo_view();
        let mut req = request(json!({"method": "  GET  ", "id": 3}));

        let result = view.dispatch(&mut req, &Args::new()).unwrap();

        assert_eq!(result, json!({"verb": "get", "request": {"id": 3}}));
        assert_eq!(req, request(json!({"id": 3})));
    }

    #[test]
    fn test_dispatch_forwards_args() {
        let view = echo_view();
        let mut req = request(json!({"method": "Post"}));
        let args = Args::new().arg(json!(1)).arg(json!("x"));

        let result = view.dispatch(&mut req, &args).unwrap();
        assert_eq!(result["args"], json!([1, "x"]));
    }

    #[test]
    fn test_dispatch_unknown_method() {
        let view = echo_view();
        let mut req = request(json!({"method": "delete", "id": 4}));
        assert_eq!(
            view.dispatch(&mut req, &Args::new()),
            Err(DispatchError::HandlerNotFound("delete".to_string()))
        );
        assert_eq!(req, request(json!({"id": 4})));
    }

    #[test]
    fn test_engine_dispatch_with_borrowed_descriptor() {
        let descriptor = ViewDescriptor::<String, usize>::builder("length")
            .handle("get", |view, _, _| view.len())
            .build();
        let state = "four".to_string();

        let mut req = request(json!({"method": "GET"}));
        assert_eq!(
            DispatchEngine::dispatch(&descriptor, &state, &mut req, &Args::new()),
            Ok(4)
        );

        let mut req = request(json!({"method": true}));
        assert_eq!(
            DispatchEngine::dispatch(&descriptor, &state, &mut req, &Args::new()),
            Err(DispatchError::InvalidMethodNameType { found: "bool" })
        );
        assert!(req.is_empty());
    }

    #[test]
    fn test_dispatch_reaches_non_verb_alias() {
        let descriptor = ViewDescriptor::<(), Value>::builder("aliased")
            .handle("get", |_, _, _| json!("get"))
            .handle("list", |_, _, _| json!("list"))
            .build();
        let view = View::new((), Arc::new(descriptor));

        assert_eq!(view.supported_methods(), Some(&["GET".to_string()][..]));

        let mut req = request(json!({"method": "LIST"}));
        assert_eq!(view.dispatch(&mut req, &Args::new()), Ok(json!("list")));
    }

    #[test]
    fn test_dispatch_ignores_metadata() {
        let descriptor = ViewDescriptor::<(), Value>::builder("explicit")
            .handle("patch", |_, _, _| json!("patched"))
            .methods(["GET"])
            .build();
        let view = View::new((), Arc::new(descriptor));

        let mut req = request(json!({"method": "patch"}));
        assert_eq!(view.dispatch(&mut req, &Args::new()), Ok(json!("patched")));

        let mut req = request(json!({"method": "get"}));
        assert_eq!(
            view.dispatch(&mut req, &Args::new()),
            Err(DispatchError::HandlerNotFound("get".to_string()))
        );
    }

    #[test]
    fn test_handler_errors_pass_through() {
        let descriptor = ViewDescriptor::<(), Result<Value, String>>::builder("failing")
            .handle("get", |_, _, _| Err("database unavailable".to_string()))
            .build();
        let view = View::new((), Arc::new(descriptor));

        let mut req = request(json!({"method": "get"}));
        assert_eq!(
            view.dispatch(&mut req, &Args::new()),
            Ok(Err("database unavailable".to_string()))
        );
    }

    #[test]
    fn test_handler_sees_view_state() {
        struct Counter {
            hits: AtomicUsize,
        }

        let descriptor = ViewDescriptor::<Counter, usize>::builder("counter")
            .handle("post", |view, _, _| view.hits.fetch_add(1, Ordering::SeqCst) + 1)
            .build();
        let view = View::new(
            Counter {
                hits: AtomicUsize::new(0),
            },
            Arc::new(descriptor),
        );

        for expected in 1..=3 {
            let mut req = request(json!({"method": "post"}));
            assert_eq!(view.dispatch(&mut req, &Args::new()), Ok(expected));
        }
        assert_eq!(view.into_state().hits.into_inner(), 3);
    }

    #[test]
    fn test_as_view_builds_fresh_state_per_call() {
        let built = Arc::new(AtomicUsize::new(0));
        let counter = built.clone();

        let descriptor = Arc::new(
            ViewDescriptor::<usize, usize>::builder("numbered")
                .handle("get", |view, _, _| *view)
                .build(),
        );
        let endpoint = descriptor.as_view("numbered-endpoint", move || {
            counter.fetch_add(1, Ordering::SeqCst) + 1
        });

        assert_eq!(endpoint.name(), "numbered-endpoint");
        assert_eq!(endpoint.supported_methods(), Some(&["GET".to_string()][..]));

        let mut first = request(json!({"method": "get"}));
        let mut second = request(json!({"method": "get"}));
        assert_eq!(endpoint.call(&mut first, &Args::new()), Ok(1));
        assert_eq!(endpoint.clone().call(&mut second, &Args::new()), Ok(2));
        assert_eq!(built.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_as_view_reports_failures() {
        let descriptor = Arc::new(
            ViewDescriptor::<(), ()>::builder("empty")
                .handle("get", |_, _, _| ())
                .build(),
        );
        let endpoint = descriptor.as_view("empty", || ());

        let mut req = request(json!({"method": 7}));
        assert_eq!(
            endpoint.call(&mut req, &Args::new()),
            Err(DispatchError::InvalidMethodNameType { found: "number" })
        );
    }
}
