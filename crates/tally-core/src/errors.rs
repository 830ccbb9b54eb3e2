//! Validation error types for tally.
//!
//! Storage, configuration, and rendering errors are defined in their
//! respective crates. The binary maps all of them onto exit codes.

use thiserror::Error;

/// Reasons a decoded message cannot become a `NormalizedRecord`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The decoded line was valid JSON but not an object.
    #[error("Expected a JSON object, found {found}")]
    NotAnObject { found: &'static str },

    /// `sentiment` was present but could not be read as a finite float.
    #[error("Field 'sentiment' is not a number: {value}")]
    Sentiment { value: String },

    /// `message_length` was present but could not be read as an integer.
    #[error("Field 'message_length' is not an integer: {value}")]
    MessageLength { value: String },
}

/// Human-readable name of a JSON value's type, for error messages.
#[must_use]
pub const fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
