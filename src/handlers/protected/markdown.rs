use axum::{
    extract::{rejection::JsonRejection, Extension, State},
    response::Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::utils::{json_body, require, text};
use crate::error::ApiError;
use crate::middleware::SessionKey;
use crate::state::AppState;
use crate::upstream::ResourceType;

const FAILED: &str = "Failed to generate markdown";

#[derive(Debug, Deserialize)]
pub struct GenerateMarkdownRequest {
    pub link: Option<String>,
}

/// POST /api/generate-md - convert a web page to markdown
///
/// Output: `{ "success": true, "tokens": <n>, "markdown": "..." }`
pub async fn post(
    State(state): State<AppState>,
    Extension(SessionKey(key)): Extension<SessionKey>,
    payload: Result<Json<GenerateMarkdownRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let request = json_body(payload)?;
    let link = text(&request.link);
    require(&[("link", link.is_some())])?;
    let link = link.unwrap_or_default();

    let response = state
        .upstream
        .markdown_converter(&key, link, ResourceType::Web)
        .await
        .map_err(|e| {
            tracing::error!("Markdown conversion of {} failed: {}", link, e);
            ApiError::upstream(&e, FAILED)
        })?;

    if response.get("success").and_then(Value::as_bool) != Some(true) {
        tracing::warn!("Markdown conversion of {} reported no success", link);
        return Err(ApiError::internal_server_error(FAILED));
    }

    Ok(Json(json!({
        "success": true,
        "tokens": response.get("tokens").cloned().unwrap_or(Value::Null),
        "markdown": response.get("response").cloned().unwrap_or(Value::Null),
    })))
}
