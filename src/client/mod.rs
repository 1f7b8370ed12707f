//! Thin JSON-over-HTTP wrapper shared by the dashboard and upstream clients.
//!
//! Every call is a single round trip: no retries happen here. Callers that
//! want retries wrap calls in a [`crate::dashboard::pipeline::StepPolicy`].

use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error, Clone)]
pub enum ClientError {
    /// The server answered with a non-2xx status
    #[error("{message}")]
    Status { status: u16, message: String },

    /// No response was received
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Invalid response body: {0}")]
    Decode(String),

    #[error("Client configuration error: {0}")]
    Configuration(String),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Transport failures and 5xx answers may succeed on a second attempt
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Network(_) | ClientError::Timeout => true,
            ClientError::Status { status, .. } => *status >= 500,
            ClientError::Decode(_) | ClientError::Configuration(_) => false,
        }
    }

    fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else {
            ClientError::Network(err.to_string())
        }
    }
}

/// `{ "data": ... }` envelope used by the dashboard backend
#[derive(Debug, Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

#[derive(Clone)]
pub struct HttpClient {
    http: Client,
    base_url: String,
    timeout: Option<Duration>,
}

impl HttpClient {
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> ClientResult<Self> {
        let http = Client::builder()
            .user_agent(concat!("wetro-playground/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ClientError::Configuration(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        })
    }

    /// Same connection pool, different per-request timeout
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        Self {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            timeout: Some(timeout),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Issue one request and decode the JSON body as `T`
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        headers: HeaderMap,
    ) -> ClientResult<T> {
        let url = self.url(path);
        let mut builder = self.http.request(method.clone(), &url).headers(headers);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        tracing::debug!("{} {}", method, url);

        let response = builder.send().await.map_err(ClientError::from_transport)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(ClientError::from_transport)?;

        if !status.is_success() {
            let message = error_message(&bytes)
                .unwrap_or_else(|| format!("Request failed with status code {}", status.as_u16()));
            tracing::debug!("{} {} failed with {}: {}", method, url, status, message);
            return Err(ClientError::Status {
                status: status.as_u16(),
                message,
            });
        }

        // Empty bodies decode as JSON null so `Value` callers still succeed
        let bytes: &[u8] = if bytes.is_empty() { b"null" } else { &bytes };
        serde_json::from_slice(bytes).map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// Like [`HttpClient::request`] but unwraps a `{ "data": ... }` envelope
    pub async fn request_data<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        headers: HeaderMap,
    ) -> ClientResult<T> {
        let envelope: DataEnvelope<T> = self.request(method, path, body, headers).await?;
        Ok(envelope.data)
    }
}

/// Pull a human-readable message out of an error body, if the server sent one
fn error_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    ["message", "error", "detail"]
        .iter()
        .find_map(|field| value.get(*field).and_then(Value::as_str))
        .map(str::to_string)
}
