use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::ApiKey;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SetApiKeyRequest {
    #[serde(rename = "apiKey")]
    pub api_key: Option<Value>,
}

/// POST /api/set-api-key - validate a pasted key and store it in the key cookie
///
/// Input: `{ "apiKey": "wtc-..." }`. A non-string or malformed key is a 400
/// and leaves any existing cookie untouched.
pub async fn set_api_key_post(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<SetApiKeyRequest>, JsonRejection>,
) -> Result<(CookieJar, Json<Value>), ApiError> {
    let Json(request) = payload.map_err(|e| {
        tracing::debug!("set-api-key body rejected: {}", e);
        ApiError::bad_request("Invalid request")
    })?;

    let raw = request
        .api_key
        .as_ref()
        .and_then(Value::as_str)
        .ok_or_else(|| ApiError::bad_request("Invalid API key"))?;

    let key = ApiKey::parse(raw, state.config.security.strict_key_length).map_err(|e| {
        tracing::info!("Rejected API key: {}", e);
        ApiError::from(e)
    })?;

    tracing::info!("API key cookie set");
    Ok((jar.add(key.to_cookie()), Json(json!({ "success": true }))))
}
