//! Client for the console/dashboard backend and the key bootstrap built on it.
//!
//! The dashboard wraps every payload in `{ "data": ... }` and authenticates
//! with a short-lived bearer token obtained from the visitor's session cookie.

pub mod api_key;
pub mod bootstrap;
pub mod organization;
pub mod pipeline;
pub mod token;

pub use api_key::ProvisionedKey;
pub use bootstrap::{Bootstrap, BootstrapOutcome, BootstrapSession};
pub use organization::ResolvedOrganization;
pub use token::AccessToken;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};

use crate::client::{ClientError, ClientResult, HttpClient};
use crate::config::DashboardConfig;

#[derive(Clone)]
pub struct DashboardClient {
    http: HttpClient,
}

impl DashboardClient {
    pub fn new(config: &DashboardConfig) -> ClientResult<Self> {
        Ok(Self {
            http: HttpClient::new(&config.api_url, Some(config.timeout()))?,
        })
    }

    fn bearer_headers(token: &AccessToken) -> ClientResult<HeaderMap> {
        let value = HeaderValue::from_str(&format!("Bearer {}", token.as_str()))
            .map_err(|_| ClientError::Decode("access token is not a valid header value".into()))?;
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, value);
        Ok(headers)
    }
}
