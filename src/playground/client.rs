use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, COOKIE};
use reqwest::Method;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{PlaygroundError, PlaygroundResult};
use crate::auth::{ApiKey, API_KEY_COOKIE};
use crate::client::HttpClient;
use crate::upstream::ResourceType;
use crate::youtube::{is_valid_youtube_url, validate_url};

/// Longer than any server-side upstream timeout so the server reports first
const REQUEST_TIMEOUT: Duration = Duration::from_secs(90);

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QueryAnswer {
    pub collection_id: String,
    pub response: Value,
    #[serde(default)]
    pub metadata: Value,
}

#[derive(Deserialize)]
struct AuthStatus {
    #[serde(rename = "isAuthenticated")]
    is_authenticated: bool,
}

#[derive(Clone)]
pub struct PlaygroundClient {
    http: HttpClient,
    api_key: Option<ApiKey>,
}

impl PlaygroundClient {
    pub fn new(server_url: &str) -> PlaygroundResult<Self> {
        let http = HttpClient::new(server_url, Some(REQUEST_TIMEOUT))?;
        Ok(Self { http, api_key: None })
    }

    pub fn with_api_key(mut self, key: ApiKey) -> Self {
        self.api_key = Some(key);
        self
    }

    pub fn api_key(&self) -> Option<&ApiKey> {
        self.api_key.as_ref()
    }

    pub fn server_url(&self) -> &str {
        self.http.base_url()
    }

    /// Replay the key cookie the server set on `set-api-key`
    fn headers(&self) -> PlaygroundResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        if let Some(key) = &self.api_key {
            let cookie = format!("{}={}", API_KEY_COOKIE, key.as_str());
            let value = HeaderValue::from_str(&cookie)
                .map_err(|_| PlaygroundError::validation("API key is not valid"))?;
            headers.insert(COOKIE, value);
        }
        Ok(headers)
    }

    async fn call(&self, method: Method, path: &str, body: Option<Value>) -> PlaygroundResult<Value> {
        let value = self
            .http
            .request(method, path, body.as_ref(), self.headers()?)
            .await?;
        Ok(value)
    }

    pub async fn check_auth(&self) -> PlaygroundResult<bool> {
        let status: AuthStatus = self
            .http
            .request(Method::GET, "/api/check-auth", None, self.headers()?)
            .await?;
        Ok(status.is_authenticated)
    }

    /// Validate `raw` with the strict rule, hand it to the server, then use it
    /// for every later call
    pub async fn set_api_key(&mut self, raw: &str) -> PlaygroundResult<()> {
        let key = ApiKey::parse(raw.trim(), true).map_err(|e| {
            tracing::debug!("API key rejected locally: {}", e);
            PlaygroundError::validation("API key is not valid")
        })?;

        self.call(
            Method::POST,
            "/api/set-api-key",
            Some(json!({ "apiKey": key.as_str() })),
        )
        .await
        .map_err(|e| match e {
            PlaygroundError::Server { status: 400, .. } => PlaygroundError::validation("API key is not valid"),
            other => other,
        })?;

        self.api_key = Some(key);
        Ok(())
    }

    pub async fn generate_markdown(&self, link: &str) -> PlaygroundResult<String> {
        if link.trim().is_empty() {
            return Err(PlaygroundError::validation("Link is required"));
        }
        validate_url(link).map_err(PlaygroundError::validation)?;

        let body = self
            .call(Method::POST, "/api/generate-md", Some(json!({ "link": link.trim() })))
            .await?;

        match body.get("markdown").and_then(Value::as_str) {
            Some(markdown) if !markdown.is_empty() => Ok(markdown.to_string()),
            _ => Err(PlaygroundError::Unexpected),
        }
    }

    pub async fn extract_structured_data(&self, website: &str, json_schema: &Value) -> PlaygroundResult<Value> {
        if website.trim().is_empty() {
            return Err(PlaygroundError::validation("Website URL is required"));
        }
        validate_url(website).map_err(PlaygroundError::validation)?;
        if json_schema.is_null() || json_schema.as_str().is_some_and(|s| s.trim().is_empty()) {
            return Err(PlaygroundError::validation("JSON schema is required"));
        }

        let body = self
            .call(
                Method::POST,
                "/api/structured-output",
                Some(json!({ "website": website.trim(), "json_schema": json_schema })),
            )
            .await?;

        match body.get("data") {
            Some(data) if !data.is_null() => Ok(data.clone()),
            _ => Err(PlaygroundError::Unexpected),
        }
    }

    /// Transcript text as the JSON encoding of `transcript.response.data`,
    /// empty when the service returned none
    pub async fn fetch_youtube_transcript(&self, url: &str) -> PlaygroundResult<String> {
        if !is_valid_youtube_url(url) {
            return Err(PlaygroundError::validation("Please enter a valid YouTube URL"));
        }

        let body = self
            .call(Method::POST, "/api/youtube-transcript", Some(json!({ "url": url.trim() })))
            .await
            .map_err(|e| match e {
                PlaygroundError::AuthenticationRequired | PlaygroundError::Connectivity => e,
                _ => PlaygroundError::Server {
                    status: 500,
                    message: "Failed to fetch transcript".to_string(),
                },
            })?;

        match body.pointer("/transcript/response/data") {
            Some(data) if !data.is_null() => {
                serde_json::to_string(data).map_err(|_| PlaygroundError::Unexpected)
            }
            _ => Ok(String::new()),
        }
    }

    pub async fn create_collection(&self, collection_id: &str) -> PlaygroundResult<Value> {
        self.call(
            Method::POST,
            "/api/collection",
            Some(json!({ "collection_id": collection_id })),
        )
        .await
    }

    pub async fn delete_collection(&self, collection_id: &str) -> PlaygroundResult<Value> {
        self.call(
            Method::DELETE,
            "/api/collection",
            Some(json!({ "collection_id": collection_id })),
        )
        .await
    }

    pub async fn insert_resource(
        &self,
        collection_id: &str,
        resource: &str,
        resource_type: ResourceType,
    ) -> PlaygroundResult<Value> {
        self.call(
            Method::POST,
            "/api/insert",
            Some(json!({
                "collection_id": collection_id,
                "resource": resource,
                "resource_type": resource_type,
            })),
        )
        .await
    }

    pub async fn query_collection(&self, collection_id: &str, request_query: &str) -> PlaygroundResult<QueryAnswer> {
        if request_query.trim().is_empty() {
            return Err(PlaygroundError::validation("Please enter a question"));
        }

        let body = self
            .call(
                Method::POST,
                "/api/query",
                Some(json!({ "collection_id": collection_id, "request_query": request_query })),
            )
            .await?;

        serde_json::from_value(body).map_err(|e| {
            tracing::debug!("Unexpected query response: {}", e);
            PlaygroundError::Unexpected
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_header_carries_the_key() {
        let key = ApiKey::parse("wtc-abc", false).unwrap();
        let client = PlaygroundClient::new("http://localhost:3000").unwrap().with_api_key(key);
        let headers = client.headers().unwrap();
        assert_eq!(headers.get(COOKIE).unwrap(), "wetro-api-key=wtc-abc");
    }

    #[test]
    fn no_cookie_without_a_key() {
        let client = PlaygroundClient::new("http://localhost:3000/").unwrap();
        assert!(client.headers().unwrap().get(COOKIE).is_none());
        assert_eq!(client.server_url(), "http://localhost:3000");
    }

    #[tokio::test]
    async fn short_keys_are_rejected_before_any_request() {
        // Nothing listens on port 9; a request would surface as Connectivity
        let mut client = PlaygroundClient::new("http://127.0.0.1:9").unwrap();
        let err = client.set_api_key("wtc-too-short").await.unwrap_err();
        assert_eq!(err.to_string(), "API key is not valid");
        assert!(client.api_key().is_none());
    }

    #[tokio::test]
    async fn inputs_are_validated_locally() {
        let client = PlaygroundClient::new("http://127.0.0.1:9").unwrap();

        let err = client.generate_markdown("  ").await.unwrap_err();
        assert_eq!(err.to_string(), "Link is required");

        let err = client
            .extract_structured_data("https://example.com", &Value::Null)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "JSON schema is required");

        let err = client.fetch_youtube_transcript("https://example.com").await.unwrap_err();
        assert_eq!(err.to_string(), "Please enter a valid YouTube URL");
    }
}
