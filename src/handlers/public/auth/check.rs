use axum::response::Json;
use axum_extra::extract::cookie::CookieJar;
use serde_json::{json, Value};

use crate::auth::ApiKey;

/// GET /api/check-auth - whether the request carries a usable key cookie
pub async fn check_auth_get(jar: CookieJar) -> Json<Value> {
    let is_authenticated = ApiKey::from_jar(&jar).is_some();
    Json(json!({ "isAuthenticated": is_authenticated }))
}
