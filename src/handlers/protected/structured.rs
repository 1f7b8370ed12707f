use axum::{
    extract::{rejection::JsonRejection, Extension, State},
    response::Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::utils::{is_truthy, json_body, require, text};
use crate::error::ApiError;
use crate::middleware::SessionKey;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StructuredOutputRequest {
    pub website: Option<String>,
    /// Either a JSON Schema object or its string form; forwarded as received
    pub json_schema: Option<Value>,
}

/// POST /api/structured-output - extract data matching a schema from a page
///
/// Output: `{ "success": true, "data": <extracted json> }`
pub async fn post(
    State(state): State<AppState>,
    Extension(SessionKey(key)): Extension<SessionKey>,
    payload: Result<Json<StructuredOutputRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let request = json_body(payload)?;
    let website = text(&request.website);
    let json_schema = request.json_schema.filter(|schema| match schema {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        _ => true,
    });
    require(&[
        ("website", website.is_some()),
        ("json_schema", json_schema.is_some()),
    ])?;
    let (website, json_schema) = (website.unwrap_or_default(), json_schema.unwrap_or_default());

    let response = state
        .upstream
        .extract(&key, website, &json_schema)
        .await
        .map_err(|e| {
            tracing::error!("Extraction from {} failed: {}", website, e);
            ApiError::internal_server_error("Failed to extract structured data")
        })?;

    let data = locate_json(&response).ok_or_else(|| {
        tracing::warn!("Extraction from {} returned no json field", website);
        ApiError::internal_server_error("No \"json\" field found in extraction response")
    })?;

    Ok(Json(json!({ "success": true, "data": data })))
}

/// The service nests its `json` payload at varying depths
fn locate_json(response: &Value) -> Option<Value> {
    ["/json", "/data/json", "/response/data/json"]
        .iter()
        .filter_map(|pointer| response.pointer(pointer))
        .find(|value| is_truthy(value))
        .cloned()
}
