//! View types: handler tables plus supported-method metadata.
//!
//! A [`ViewDescriptor`] is built once per view type with [`ViewBuilder`] and
//! then shared read-only (usually behind an `Arc`).
//!
//! # Example
//!
//! ```
//! use verbview::ViewDescriptor;
//! use serde_json::{json, Value};
//!
//! struct Users;
//!
//! let users = ViewDescriptor::<Users, Value>::builder("users")
//!     .handle("get", |_view, _req, _args| json!(["admin"]))
//!     .handle("post", |_view, req, _args| json!({"created": req.get("username")}))
//!     .build();
//!
//! assert_eq!(users.supported_methods(), Some(&["GET".to_string(), "POST".to_string()][..]));
//! assert!(users.has_handler("get"));
//! ```

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::marker::PhantomData;
use std::pin::Pin;
use std::sync::Arc;

use super::registry::MethodRegistry;
use crate::request::{Args, Request};

/// Boxed future, for handlers that return async work.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Trait for view handlers.
///
/// `V` is the view state the handler runs against; `R` is whatever the
/// view author chooses to return. Dispatch never looks inside `R`.
pub trait Handler<V, R>: Send + Sync + 'static {
    /// Handle a request whose `method` entry has already been removed.
    fn call(&self, view: &V, request: &mut Request, args: &Args) -> R;
}

/// Wrapper turning a closure into a [`Handler`].
pub struct FnHandler<F, V, R>
where
    F: Fn(&V, &mut Request, &Args) -> R + Send + Sync + 'static,
{
    handler: F,
    _phantom: PhantomData<fn(&V) -> R>,
}

impl<F, V, R> FnHandler<F, V, R>
where
    F: Fn(&V, &mut Request, &Args) -> R + Send + Sync + 'static,
{
    /// Create a new closure handler.
    pub fn new(handler: F) -> Self {
        Self {
            handler,
            _phantom: PhantomData,
        }
    }
}

impl<F, V, R> Handler<V, R> for FnHandler<F, V, R>
where
    F: Fn(&V, &mut Request, &Args) -> R + Send + Sync + 'static,
    V: 'static,
    R: 'static,
{
    fn call(&self, view: &V, request: &mut Request, args: &Args) -> R {
        (self.handler)(view, request, args)
    }
}

/// Shared handler reference.
pub type HandlerRef<V, R> = Arc<dyn Handler<V, R>>;

/// One view type.
pub struct ViewDescriptor<V, R> {
    /// View type name.
    name: String,
    /// Handlers by member name, inherited ones included.
    handlers: HashMap<String, HandlerRef<V, R>>,
    /// Advisory supported-methods list.
    supported_methods: Option<Vec<String>>,
}

impl<V: 'static, R: 'static> ViewDescriptor<V, R> {
    /// Start building a view type.
    pub fn builder(name: &str) -> ViewBuilder<V, R> {
        ViewBuilder::new(name)
    }
}

impl<V, R> ViewDescriptor<V, R> {
    /// View type name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Supported methods, uppercase and sorted unless set explicitly.
    ///
    /// `None` when no member is a recognized verb and nothing was inherited
    /// or set explicitly.
    pub fn supported_methods(&self) -> Option<&[String]> {
        self.supported_methods.as_deref()
    }

    /// Get a handler by member name (exact match).
    pub fn handler(&self, name: &str) -> Option<&dyn Handler<V, R>> {
        self.handlers.get(name).map(|h| h.as_ref())
    }

    /// Check whether a member name has a handler.
    pub fn has_handler(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Member names that have handlers, sorted.
    pub fn handler_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }
}

impl<V, R> fmt::Debug for ViewDescriptor<V, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewDescriptor")
            .field("name", &self.name)
            .field("handlers", &self.handler_names())
            .field("supported_methods", &self.supported_methods)
            .finish()
    }
}

/// Builder for view types.
///
/// Declares handlers, optionally inherits from a parent view type, and
/// computes supported-method metadata once in [`build`](Self::build).
pub struct ViewBuilder<V, R> {
    name: String,
    /// Handlers declared directly on this view type, in declaration order.
    declared: Vec<(String, HandlerRef<V, R>)>,
    /// Handlers inherited from the parent.
    inherited: HashMap<String, HandlerRef<V, R>>,
    /// Parent's supported methods.
    inherited_methods: Option<Vec<String>>,
    /// Author-supplied methods list.
    explicit_methods: Option<Vec<String>>,
}

impl<V: 'static, R: 'static> ViewBuilder<V, R> {
    /// Create a new builder.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            declared: Vec::new(),
            inherited: HashMap::new(),
            inherited_methods: None,
            explicit_methods: None,
        }
    }

    /// Inherit handlers and supported methods from a parent view type.
    ///
    /// Handlers declared on this builder override inherited ones of the same
    /// name. Inherited handler names do not add to the supported methods;
    /// the parent's computed list does.
    pub fn extends(mut self, parent: &ViewDescriptor<V, R>) -> Self {
        self.inherited = parent.handlers.clone();
        self.inherited_methods = parent.supported_methods.clone();
        self
    }

    /// Declare a closure handler under a member name.
    ///
    /// The name is what requests dispatch to after normalization, so only
    /// lowercase names are reachable. Any name is allowed; only the eight
    /// recognized verbs show up in supported-method metadata.
    pub fn handle<F>(self, name: &str, handler: F) -> Self
    where
        F: Fn(&V, &mut Request, &Args) -> R + Send + Sync + 'static,
    {
        self.handler(name, FnHandler::new(handler))
    }

    /// Declare a [`Handler`] implementation under a member name.
    pub fn handler<H: Handler<V, R>>(mut self, name: &str, handler: H) -> Self {
        if name != name.trim().to_lowercase() {
            tracing::warn!(
                "Handler {} on view {} is unreachable: dispatch looks up trimmed lowercase names",
                name,
                self.name
            );
        }

        let handler: HandlerRef<V, R> = Arc::new(handler);
        match self.declared.iter_mut().find(|entry| entry.0 == name) {
            Some(entry) => entry.1 = handler,
            None => self.declared.push((name.to_string(), handler)),
        }
        self
    }

    /// Set the supported methods explicitly.
    ///
    /// The list is kept exactly as given, with no sorting, de-duplication or
    /// merging with declared handlers.
    pub fn methods<I, S>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.explicit_methods = Some(methods.into_iter().map(Into::into).collect());
        self
    }

    /// Build the view type.
    pub fn build(self) -> ViewDescriptor<V, R> {
        let supported_methods = MethodRegistry::compute(
            self.declared.iter().map(|(name, _)| name.as_str()),
            self.inherited_methods.as_deref(),
            self.explicit_methods.as_deref(),
        );

        tracing::debug!(
            "Built view {} with methods {:?}",
            self.name,
            supported_methods
        );

        let mut handlers = self.inherited;
        handlers.extend(self.declared);

        ViewDescriptor {
            name: self.name,
            handlers,
            supported_methods,
        }
    }
}
