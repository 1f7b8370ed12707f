use axum::{
    extract::{rejection::JsonRejection, Extension, State},
    response::Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::utils::{json_body, require, spread, text};
use crate::error::ApiError;
use crate::middleware::SessionKey;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CollectionRequest {
    pub collection_id: Option<String>,
}

/// POST /api/collection - create a collection under a client-chosen id
pub async fn create(
    State(state): State<AppState>,
    Extension(SessionKey(key)): Extension<SessionKey>,
    payload: Result<Json<CollectionRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let request = json_body(payload)?;
    let collection_id = text(&request.collection_id);
    require(&[("collection_id", collection_id.is_some())])?;
    let collection_id = collection_id.unwrap_or_default();

    let response = state
        .upstream
        .create_collection(&key, collection_id)
        .await
        .map_err(|e| {
            tracing::error!("Error creating collection {}: {}", collection_id, e);
            ApiError::internal_server_error("Failed to create collection")
        })?;

    Ok(Json(spread(
        response,
        json!({ "success": true, "collection_id": collection_id }),
    )))
}

/// DELETE /api/collection - remove a collection, e.g. after a failed insert
pub async fn delete(
    State(state): State<AppState>,
    Extension(SessionKey(key)): Extension<SessionKey>,
    payload: Result<Json<CollectionRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let request = json_body(payload)?;
    let collection_id = text(&request.collection_id);
    require(&[("collection_id", collection_id.is_some())])?;
    let collection_id = collection_id.unwrap_or_default();

    let response = state
        .upstream
        .delete_collection(&key, collection_id)
        .await
        .map_err(|e| {
            tracing::error!("Error deleting collection {}: {}", collection_id, e);
            ApiError::internal_server_error("Failed to delete collection")
        })?;

    Ok(Json(spread(
        response,
        json!({ "success": true, "collection_id": collection_id }),
    )))
}
