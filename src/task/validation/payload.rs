//! Raw JSON request bodies awaiting validation.

use serde_json::{Map, Value};
use thiserror::Error;

/// Errors raised while reading a request body.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PayloadError {
    /// The body is not valid JSON.
    #[error("request body is not valid JSON: {0}")]
    Malformed(String),

    /// The body is valid JSON but not an object.
    #[error("request body must be a JSON object")]
    NotAnObject,
}

/// Field map of a task request body, exactly as the client sent it.
///
/// Values stay untyped until a rule set has checked them, so a single pass
/// can report every offending field at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPayload {
    fields: Map<String, Value>,
}

impl TaskPayload {
    /// Creates an empty payload.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a request body.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError::Malformed`] for invalid JSON and
    /// [`PayloadError::NotAnObject`] for any non-object document.
    pub fn from_slice(body: &[u8]) -> Result<Self, PayloadError> {
        let value: Value =
            serde_json::from_slice(body).map_err(|err| PayloadError::Malformed(err.to_string()))?;
        Self::from_value(value)
    }

    /// Parses a request body, reading an empty or all-whitespace body as an
    /// empty object so missing fields surface as validation messages.
    ///
    /// # Errors
    ///
    /// Same as [`Self::from_slice`].
    pub fn from_body(body: &[u8]) -> Result<Self, PayloadError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::new());
        }
        Self::from_slice(body)
    }

    /// Wraps an already parsed JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError::NotAnObject`] when the value is not an object.
    pub fn from_value(value: Value) -> Result<Self, PayloadError> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            _ => Err(PayloadError::NotAnObject),
        }
    }

    /// Sets a field, replacing any previous value.
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Returns the raw value of a field; explicit JSON `null` reads as absent.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field).filter(|value| !value.is_null())
    }

    /// Returns the field when it holds a string.
    #[must_use]
    pub fn text(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(Value::as_str)
    }

    /// Returns the field coerced to a boolean.
    ///
    /// Accepts JSON booleans, the numbers `0` and `1`, and the strings `"0"`,
    /// `"1"`, `"true"` and `"false"`.
    #[must_use]
    pub fn flag(&self, field: &str) -> Option<bool> {
        match self.get(field)? {
            Value::Bool(flag) => Some(*flag),
            Value::Number(number) => match number.as_u64() {
                Some(0) => Some(false),
                Some(1) => Some(true),
                _ => None,
            },
            Value::String(text) => match text.trim() {
                "0" | "false" => Some(false),
                "1" | "true" => Some(true),
                _ => None,
            },
            _ => None,
        }
    }
}
