use axum::{
    extract::{rejection::JsonRejection, Extension, State},
    response::Json,
};
use serde::Deserialize;
use serde_json::{json, Map, Value};

use super::utils::{is_truthy, json_body, require, text};
use crate::error::ApiError;
use crate::middleware::SessionKey;
use crate::state::AppState;

const NO_RESPONSE: &str = "No response from the model";

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    pub collection_id: Option<String>,
    pub request_query: Option<String>,
}

/// POST /api/query - ask a question about the resources in a collection
pub async fn post(
    State(state): State<AppState>,
    Extension(SessionKey(key)): Extension<SessionKey>,
    payload: Result<Json<QueryRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let request = json_body(payload)?;
    let collection_id = text(&request.collection_id);
    let request_query = text(&request.request_query);
    require(&[
        ("collection_id", collection_id.is_some()),
        ("request_query", request_query.is_some()),
    ])?;
    let (collection_id, request_query) =
        (collection_id.unwrap_or_default(), request_query.unwrap_or_default());

    let response = state
        .upstream
        .query_collection(&key, collection_id, request_query)
        .await
        .map_err(|e| {
            tracing::error!("Error querying collection {}: {}", collection_id, e);
            ApiError::upstream(&e, "Failed to process query")
        })?;

    let (answer, metadata) = split_answer(response);

    Ok(Json(json!({
        "success": true,
        "collection_id": collection_id,
        "response": answer,
        "metadata": metadata,
    })))
}

/// Separate the model's answer (`response`, else `message`) from everything else
fn split_answer(response: Value) -> (Value, Value) {
    let mut fields = match response {
        Value::Object(map) => map,
        Value::String(answer) => return (Value::String(answer), Value::Object(Map::new())),
        _ => Map::new(),
    };

    let response = fields.remove("response").filter(is_truthy);
    let message = fields.remove("message").filter(is_truthy);
    let answer = response
        .or(message)
        .unwrap_or_else(|| Value::String(NO_RESPONSE.to_string()));

    (answer, Value::Object(fields))
}
