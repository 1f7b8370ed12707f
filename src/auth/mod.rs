use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use std::fmt;
use thiserror::Error;

/// Cookie carrying the visitor's secret key
pub const API_KEY_COOKIE: &str = "wetro-api-key";

pub const API_KEY_PREFIX: &str = "wtc-";

/// Length of keys minted by the console, prefix included
pub const API_KEY_LENGTH: usize = 47;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiKeyError {
    #[error("API key is required")]
    Empty,

    #[error("API key must start with \"wtc-\"")]
    MissingPrefix,

    #[error("API key must be exactly {expected} characters long")]
    InvalidLength { expected: usize, actual: usize },
}

/// A secret key that passed format validation.
///
/// Only the format is checked here; whether the upstream service accepts
/// the key is discovered on first use.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Validate a raw key. `strict` also enforces [`API_KEY_LENGTH`].
    pub fn parse(raw: &str, strict: bool) -> Result<Self, ApiKeyError> {
        if raw.is_empty() {
            return Err(ApiKeyError::Empty);
        }
        if !raw.starts_with(API_KEY_PREFIX) {
            return Err(ApiKeyError::MissingPrefix);
        }
        if strict && raw.len() != API_KEY_LENGTH {
            return Err(ApiKeyError::InvalidLength {
                expected: API_KEY_LENGTH,
                actual: raw.len(),
            });
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Build the HTTP-only cookie that persists this key in the browser
    pub fn to_cookie(&self) -> Cookie<'static> {
        Cookie::build((API_KEY_COOKIE, self.0.clone()))
            .http_only(true)
            .secure(true)
            .same_site(SameSite::Strict)
            .path("/")
            .build()
    }

    /// Read the key cookie; anything not prefixed `wtc-` counts as absent
    pub fn from_jar(jar: &CookieJar) -> Option<Self> {
        jar.get(API_KEY_COOKIE)
            .and_then(|cookie| Self::parse(cookie.value(), false).ok())
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Keys never reach logs in full
        write!(f, "ApiKey({}…)", &self.0[..API_KEY_PREFIX.len()])
    }
}
