//! Request mapping and routing extras passed to handlers.
//!
//! A [`Request`] is a mutable map of JSON fields. Dispatch removes the
//! `method` entry in place, so a caller holding the same `Request` sees the
//! removal after the call.
//!
//! # Example
//!
//! ```
//! use verbview::Request;
//! use serde_json::json;
//!
//! let mut request = Request::new();
//! request.insert("method", json!("get"));
//! request.insert("url", json!("/users/"));
//!
//! assert_eq!(request.len(), 2);
//! assert_eq!(request.get("url"), Some(&json!("/users/")));
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key holding the requested method name.
pub const METHOD_KEY: &str = "method";

/// Inbound request fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Request(Map<String, Value>);

impl Request {
    /// Create an empty request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing JSON map.
    pub fn from_map(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Get a field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Insert a field, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    /// Remove a field, returning it.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    /// Check if a field is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if there are no fields.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the underlying map.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Into the underlying map.
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    /// Deserialize the remaining fields into a typed value.
    pub fn parse<T: serde::de::DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_value(Value::Object(self.0.clone()))
    }
}

impl From<Map<String, Value>> for Request {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

impl FromIterator<(String, Value)> for Request {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Positional and keyword extras supplied by the routing layer.
///
/// Forwarded to the handler untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
    /// Positional arguments.
    pub positional: Vec<Value>,
    /// Keyword arguments.
    pub keyword: Map<String, Value>,
}

impl Args {
    /// Create empty extras.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a positional argument.
    pub fn arg(mut self, value: Value) -> Self {
        self.positional.push(value);
        self
    }

    /// Set a keyword argument.
    pub fn kwarg(mut self, key: impl Into<String>, value: Value) -> Self {
        self.keyword.insert(key.into(), value);
        self
    }

    /// Get a keyword argument.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.keyword.get(key)
    }
}

/// Truthiness of a JSON value.
///
/// `null`, `false`, zero, and empty strings/arrays/objects are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Short JSON type name, used in error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
