use axum::extract::rejection::JsonRejection;
use axum::response::Json;
use serde_json::{Map, Value};

use crate::error::ApiError;

/// Unwrap a JSON body, turning extractor rejections into our error envelope
pub fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(body)| body)
        .map_err(|e| ApiError::invalid_json(format!("Invalid request body: {}", e.body_text())))
}

/// Non-blank string field, if present
pub fn text(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Fail with a 400 naming every field whose check returned false
pub fn require(fields: &[(&'static str, bool)]) -> Result<(), ApiError> {
    let missing: Vec<&'static str> = fields
        .iter()
        .filter(|(_, present)| !present)
        .map(|(name, _)| *name)
        .collect();

    if missing.is_empty() {
        return Ok(());
    }

    Err(ApiError::missing_fields(
        format!("Missing required fields: {}", missing.join(", ")),
        missing,
    ))
}

/// Upstream object fields first, then ours on top
pub fn spread(upstream: Value, fields: Value) -> Value {
    let mut merged = match upstream {
        Value::Object(map) => map,
        Value::Null => Map::new(),
        other => {
            let mut map = Map::new();
            map.insert("response".to_string(), other);
            map
        }
    };

    if let Value::Object(ours) = fields {
        merged.extend(ours);
    }

    Value::Object(merged)
}

/// Whether an upstream value counts as present: `null`, `false`, zero and
/// `""` do not, any array or object does
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
