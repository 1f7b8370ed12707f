use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{protected, public};
use crate::middleware::api_key_middleware;
use crate::state::AppState;

/// Full router: public gate routes, cookie-gated proxy routes, global layers
pub fn app(state: AppState) -> Router {
    let cors = cors_layer(&state.config.security.cors_origins);

    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(auth_public_routes())
        // Protected: every route below needs the key cookie
        .merge(proxy_routes())
        .with_state(state)
        // Global middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

fn auth_public_routes() -> Router<AppState> {
    Router::new()
        .route("/api/check-auth", get(public::check_auth_get))
        .route("/api/set-api-key", post(public::set_api_key_post))
        .route("/api/bootstrap", post(public::bootstrap_post))
}

fn proxy_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/collection",
            post(protected::collection_post).delete(protected::collection_delete),
        )
        .route("/api/insert", post(protected::insert_post))
        .route("/api/query", post(protected::query_post))
        .route("/api/generate-md", post(protected::generate_md_post))
        .route("/api/structured-output", post(protected::structured_output_post))
        .route("/api/youtube-transcript", post(protected::youtube_transcript_post))
        // Unknown paths stay 404, not 401
        .route_layer(middleware::from_fn(api_key_middleware))
}

/// Cookies only travel cross-origin to explicitly listed origins.
/// A wildcard cannot be combined with credentials, so `*` is dropped.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins(origins);

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}

fn allowed_origins(origins: &[String]) -> Vec<HeaderValue> {
    origins
        .iter()
        .map(|origin| origin.trim())
        .filter_map(|origin| {
            if origin == "*" {
                tracing::warn!("Ignoring wildcard CORS origin; list origins explicitly to allow cookies");
                return None;
            }
            match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!("Ignoring invalid CORS origin {:?}", origin);
                    None
                }
            }
        })
        .collect()
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Wetrocloud Playground",
            "version": version,
            "description": "Playground proxy for the Wetrocloud extraction and RAG API",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "auth": "/api/check-auth, /api/set-api-key, /api/bootstrap (public)",
                "collection": "/api/collection (protected, POST create / DELETE remove)",
                "insert": "/api/insert (protected)",
                "query": "/api/query (protected)",
                "markdown": "/api/generate-md (protected)",
                "structured": "/api/structured-output (protected)",
                "transcript": "/api/youtube-transcript (protected)",
            }
        }
    }))
}

async fn health() -> Json<Value> {
    Json(json!({
        "success": true,
        "data": {
            "status": "ok",
            "timestamp": chrono::Utc::now(),
        }
    }))
}
