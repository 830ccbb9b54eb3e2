//! Record validation: decoded JSON → `NormalizedRecord`.
//!
//! Text fields are lenient (non-string scalars are kept as their JSON text).
//! The two numeric fields are strict: when present they must coerce, and a
//! failed coercion rejects the whole record so nothing partial reaches the
//! store.

use serde_json::Value;

use crate::errors::{ValidationError, json_kind};
use crate::record::{NormalizedRecord, RawMessage};

/// Normalize one decoded line.
///
/// Emits an `info` event with the record on success and a `warn` event
/// with the error on failure.
///
/// # Errors
///
/// Returns `ValidationError` if `raw` is not an object, or if `sentiment`
/// or `message_length` is present but not coercible.
pub fn normalize(raw: &Value) -> Result<NormalizedRecord, ValidationError> {
    let result = match raw {
        Value::Object(map) => normalize_map(map),
        other => Err(ValidationError::NotAnObject {
            found: json_kind(other),
        }),
    };

    match &result {
        Ok(record) => tracing::info!(?record, "processed message"),
        Err(error) => tracing::warn!(%error, "error processing message"),
    }
    result
}

fn normalize_map(map: &RawMessage) -> Result<NormalizedRecord, ValidationError> {
    Ok(NormalizedRecord {
        message: text_field(map, "message"),
        author: text_field(map, "author"),
        timestamp: text_field(map, "timestamp"),
        category: text_field(map, "category"),
        sentiment: map.get("sentiment").map_or(Ok(0.0), coerce_sentiment)?,
        keyword_mentioned: text_field(map, "keyword_mentioned"),
        message_length: map
            .get("message_length")
            .map_or(Ok(0), coerce_message_length)?,
    })
}

fn text_field(map: &RawMessage, field: &str) -> Option<String> {
    match map.get(field) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(v) => Some(v.to_string()),
    }
}

fn coerce_sentiment(value: &Value) -> Result<f64, ValidationError> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed
        .filter(|f| f.is_finite())
        .ok_or_else(|| ValidationError::Sentiment {
            value: value.to_string(),
        })
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn coerce_message_length(value: &Value) -> Result<i64, ValidationError> {
    let parsed = match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite())
                .map(f64::trunc)
                .filter(|f| *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| ValidationError::MessageLength {
        value: value.to_string(),
    })
}
