//! # Validation Context
//!
//! Auxiliary key-value data handed to a descriptor at validation time and
//! consulted by cross-field constraints (for example the confirm-password
//! field reading the live value of the new-password field).
//!
//! The context is an explicit parameter of every evaluation; descriptors
//! never capture it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::FormkitError;

/// Context key holding the user's current password.
pub const OLD_PASSWORD_KEY: &str = "oldPassword";

/// Context key holding the password being set.
pub const NEW_PASSWORD_KEY: &str = "newPassword";

/// Key-value data available to cross-field constraints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationContext(Map<String, Value>);

impl ValidationContext {
    /// An empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a context from a JSON value.
    ///
    /// `null` yields an empty context.
    ///
    /// # Errors
    ///
    /// Returns [`FormkitError::InvalidContext`] for anything other than an
    /// object or `null`.
    pub fn from_value(value: Value) -> Result<Self, FormkitError> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            Value::Null => Ok(Self::new()),
            other => Err(FormkitError::InvalidContext(json_type_name(&other).to_string())),
        }
    }

    /// Return a copy of this context with `key` set to `value`.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// String value under `key`, if present and a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for ValidationContext {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// JSON type name used in error text.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
