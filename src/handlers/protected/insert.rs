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
use crate::upstream::ResourceType;

#[derive(Debug, Deserialize)]
pub struct InsertRequest {
    pub collection_id: Option<String>,
    pub resource: Option<String>,
    pub resource_type: Option<String>,
}

/// POST /api/insert - add a web page, video or document to a collection
pub async fn post(
    State(state): State<AppState>,
    Extension(SessionKey(key)): Extension<SessionKey>,
    payload: Result<Json<InsertRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let request = json_body(payload)?;
    let collection_id = text(&request.collection_id);
    let resource = text(&request.resource);
    let resource_type = text(&request.resource_type);
    require(&[
        ("collection_id", collection_id.is_some()),
        ("resource", resource.is_some()),
        ("resource_type", resource_type.is_some()),
    ])?;
    let (collection_id, resource) = (collection_id.unwrap_or_default(), resource.unwrap_or_default());

    let resource_type: ResourceType = resource_type
        .unwrap_or_default()
        .parse()
        .map_err(ApiError::bad_request)?;

    let response = state
        .upstream
        .insert_resource(&key, collection_id, resource, resource_type)
        .await
        .map_err(|e| {
            tracing::error!("Error inserting {} resource into {}: {}", resource_type, collection_id, e);
            ApiError::upstream(&e, "Failed to insert resource")
        })?;

    Ok(Json(spread(
        response,
        json!({
            "success": true,
            "collection_id": collection_id,
            "resource_type": resource_type,
        }),
    )))
}
