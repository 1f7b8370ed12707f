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
use crate::youtube::is_valid_youtube_url;

#[derive(Debug, Deserialize)]
pub struct TranscriptRequest {
    pub url: Option<String>,
}

/// POST /api/youtube-transcript - fetch the transcript of a YouTube video
///
/// Output: `{ "success": true, "transcript": <service response> }`
pub async fn post(
    State(state): State<AppState>,
    Extension(SessionKey(key)): Extension<SessionKey>,
    payload: Result<Json<TranscriptRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let request = json_body(payload)?;
    let url = text(&request.url);
    require(&[("url", url.is_some())])?;
    let url = url.unwrap_or_default();

    if !is_valid_youtube_url(url) {
        return Err(ApiError::bad_request("Please enter a valid YouTube URL"));
    }

    let response = state
        .upstream
        .transcript(&key, url, ResourceType::Youtube)
        .await
        .map_err(|e| {
            tracing::error!("Transcript for {} failed: {}", url, e);
            ApiError::internal_server_error("Failed to fetch transcript")
        })?;

    Ok(Json(json!({ "success": true, "transcript": response })))
}
