// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::auth::ApiKeyError;
use crate::client::ClientError;

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),
    MissingFields {
        message: String,
        fields: Vec<&'static str>,
    },
    InvalidJson(String),

    // 401 Unauthorized
    Unauthorized(String),
    LoginRequired {
        message: String,
        redirect_url: String,
    },

    // 500 Internal Server Error
    InternalServerError(String),

    // 502 Bad Gateway (external service issues)
    BadGateway(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => 400,
            ApiError::MissingFields { .. } => 400,
            ApiError::InvalidJson(_) => 400,
            ApiError::Unauthorized(_) => 401,
            ApiError::LoginRequired { .. } => 401,
            ApiError::InternalServerError(_) => 500,
            ApiError::BadGateway(_) => 502,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::MissingFields { message, .. } => message,
            ApiError::InvalidJson(msg) => msg,
            ApiError::Unauthorized(msg) => msg,
            ApiError::LoginRequired { message, .. } => message,
            ApiError::InternalServerError(msg) => msg,
            ApiError::BadGateway(msg) => msg,
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        let mut response = json!({
            "success": false,
            "error": self.message(),
            "code": self.error_code()
        });

        match self {
            ApiError::MissingFields { fields, .. } => {
                response["fields"] = json!(fields);
            }
            ApiError::LoginRequired { redirect_url, .. } => {
                response["redirect"] = json!(redirect_url);
            }
            _ => {}
        }

        response
    }

    /// Get error code for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::MissingFields { .. } => "MISSING_FIELDS",
            ApiError::InvalidJson(_) => "INVALID_JSON",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::LoginRequired { .. } => "LOGIN_REQUIRED",
            ApiError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
            ApiError::BadGateway(_) => "BAD_GATEWAY",
        }
    }
}

// Static constructor methods
impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn missing_fields(message: impl Into<String>, fields: Vec<&'static str>) -> Self {
        ApiError::MissingFields {
            message: message.into(),
            fields,
        }
    }

    pub fn invalid_json(message: impl Into<String>) -> Self {
        ApiError::InvalidJson(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn login_required(redirect_url: impl Into<String>) -> Self {
        ApiError::LoginRequired {
            message: "Login required".to_string(),
            redirect_url: redirect_url.into(),
        }
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        ApiError::BadGateway(message.into())
    }

    /// Upstream failure surfaced as a 500, keeping the upstream message when
    /// one was received and `fallback` otherwise
    pub fn upstream(err: &ClientError, fallback: &str) -> Self {
        match err {
            ClientError::Status { message, .. } if !message.is_empty() => {
                ApiError::internal_server_error(message.clone())
            }
            _ => ApiError::internal_server_error(fallback),
        }
    }
}

impl From<ApiKeyError> for ApiError {
    fn from(_: ApiKeyError) -> Self {
        // The exact rule that failed stays server-side
        ApiError::bad_request("Invalid API key")
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_lists_them() {
        let err = ApiError::missing_fields("Missing required fields: resource", vec!["resource"]);
        assert_eq!(err.status_code(), 400);
        let body = err.to_json();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Missing required fields: resource");
        assert_eq!(body["fields"], json!(["resource"]));
    }

    #[test]
    fn login_required_carries_redirect() {
        let err = ApiError::login_required("https://console.example.com/auth?redirect=x");
        assert_eq!(err.status_code(), 401);
        assert_eq!(err.to_json()["redirect"], "https://console.example.com/auth?redirect=x");
    }

    #[test]
    fn upstream_keeps_server_message() {
        let err = ClientError::Status { status: 422, message: "Invalid link".into() };
        assert_eq!(ApiError::upstream(&err, "fallback").message(), "Invalid link");

        let err = ClientError::Network("connection refused".into());
        assert_eq!(ApiError::upstream(&err, "fallback").message(), "fallback");
    }
}
