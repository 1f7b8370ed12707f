#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use wetro_playground::auth::ApiKey;
use wetro_playground::client::{ClientError, ClientResult};
use wetro_playground::config::AppConfig;
use wetro_playground::routes::app;
use wetro_playground::state::AppState;
use wetro_playground::upstream::{ResourceType, WetroApi};

/// 47 characters, so it passes the strict gate as well
pub const VALID_KEY: &str = "wtc-0123456789abcdefghijklmnopqrstuvwxyzABCDEFG";

/// One recorded upstream call
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub operation: &'static str,
    pub key: String,
    pub args: Vec<String>,
}

/// Upstream double that records every call and answers from a script.
/// Operations without a scripted answer return `{ "success": true }`.
#[derive(Default)]
pub struct MockWetro {
    calls: Mutex<Vec<Call>>,
    responses: Mutex<HashMap<&'static str, ClientResult<Value>>>,
}

impl MockWetro {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, operation: &'static str, response: ClientResult<Value>) {
        self.responses.lock().unwrap().insert(operation, response);
    }

    pub fn fail(&self, operation: &'static str, status: u16, message: &str) {
        self.respond(
            operation,
            Err(ClientError::Status {
                status,
                message: message.to_string(),
            }),
        );
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn operations(&self) -> Vec<&'static str> {
        self.calls().into_iter().map(|c| c.operation).collect()
    }

    fn record(&self, operation: &'static str, key: &ApiKey, args: Vec<String>) -> ClientResult<Value> {
        self.calls.lock().unwrap().push(Call {
            operation,
            key: key.as_str().to_string(),
            args,
        });
        self.responses
            .lock()
            .unwrap()
            .get(operation)
            .cloned()
            .unwrap_or_else(|| Ok(serde_json::json!({ "success": true })))
    }
}

#[async_trait]
impl WetroApi for MockWetro {
    async fn create_collection(&self, key: &ApiKey, collection_id: &str) -> ClientResult<Value> {
        self.record("create_collection", key, vec![collection_id.to_string()])
    }

    async fn delete_collection(&self, key: &ApiKey, collection_id: &str) -> ClientResult<Value> {
        self.record("delete_collection", key, vec![collection_id.to_string()])
    }

    async fn insert_resource(
        &self,
        key: &ApiKey,
        collection_id: &str,
        resource: &str,
        resource_type: ResourceType,
    ) -> ClientResult<Value> {
        self.record(
            "insert_resource",
            key,
            vec![collection_id.to_string(), resource.to_string(), resource_type.to_string()],
        )
    }

    async fn query_collection(&self, key: &ApiKey, collection_id: &str, request_query: &str) -> ClientResult<Value> {
        self.record(
            "query_collection",
            key,
            vec![collection_id.to_string(), request_query.to_string()],
        )
    }

    async fn markdown_converter(&self, key: &ApiKey, resource: &str, resource_type: ResourceType) -> ClientResult<Value> {
        self.record(
            "markdown_converter",
            key,
            vec![resource.to_string(), resource_type.to_string()],
        )
    }

    async fn extract(&self, key: &ApiKey, website: &str, json_schema: &Value) -> ClientResult<Value> {
        self.record("extract", key, vec![website.to_string(), json_schema.to_string()])
    }

    async fn transcript(&self, key: &ApiKey, resource: &str, resource_type: ResourceType) -> ClientResult<Value> {
        self.record("transcript", key, vec![resource.to_string(), resource_type.to_string()])
    }
}

/// Development preset pointed at `dashboard_url`, with fast retries
pub fn test_config(dashboard_url: &str) -> AppConfig {
    let mut config = AppConfig::development();
    config.dashboard.api_url = dashboard_url.trim_end_matches('/').to_string();
    config.dashboard.timeout_secs = 5;
    config.dashboard.retry_backoff_ms = 1;
    config
}

pub fn test_app(upstream: Arc<MockWetro>) -> Router {
    // Nothing listens on port 9; only the bootstrap route would reach it
    test_app_with(test_config("http://127.0.0.1:9"), upstream)
}

pub fn test_app_with(config: AppConfig, upstream: Arc<MockWetro>) -> Router {
    let state = AppState::with_upstream(config, upstream).expect("state");
    app(state)
}

pub struct TestResponse {
    pub status: StatusCode,
    pub set_cookie: Vec<String>,
    pub body: Value,
}

impl TestResponse {
    pub fn cookie(&self, name: &str) -> Option<String> {
        self.set_cookie
            .iter()
            .find(|c| c.starts_with(&format!("{}=", name)))
            .cloned()
    }
}

/// Drive one request through the router. `cookie` is sent verbatim as the Cookie header.
pub async fn send(app: &Router, method: Method, path: &str, cookie: Option<&str>, body: Option<&str>) -> Result<TestResponse> {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))?,
        None => builder.body(Body::empty())?,
    };

    let response = app.clone().oneshot(request).await.context("router call")?;
    let status = response.status();
    let set_cookie = response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok().map(str::to_string))
        .collect();
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into()))
    };

    Ok(TestResponse { status, set_cookie, body })
}

/// POST a JSON body with the valid key cookie
pub async fn post_authed(app: &Router, path: &str, body: &str) -> Result<TestResponse> {
    let cookie = format!("wetro-api-key={}", VALID_KEY);
    send(app, Method::POST, path, Some(&cookie), Some(body)).await
}

/// Serve the router on a free port, returning its base URL
pub async fn serve(app: Router) -> Result<String> {
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port)).await?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(format!("http://127.0.0.1:{}", port))
}
