use reqwest::header::{HeaderMap, HeaderValue, COOKIE};
use reqwest::Method;
use serde::Deserialize;
use serde_json::json;
use std::fmt;

use super::DashboardClient;
use crate::client::{ClientError, ClientResult};

const REFRESH_TOKEN: &str = "/accounts/refresh/token/";

/// Short-lived bearer token. Lives only for one bootstrap run.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(..)")
    }
}

#[derive(Deserialize)]
struct RefreshedToken {
    access: String,
}

impl DashboardClient {
    /// Exchange the visitor's session cookie for an access token.
    ///
    /// A 401 here means the visitor has no console session; callers send
    /// them to the console login page.
    pub async fn get_access_token(&self, session_cookie: Option<&str>) -> ClientResult<AccessToken> {
        let mut headers = HeaderMap::new();
        if let Some(cookie) = session_cookie {
            let value = HeaderValue::from_str(cookie)
                .map_err(|_| ClientError::Decode("session cookie is not a valid header value".into()))?;
            headers.insert(COOKIE, value);
        }

        let token: RefreshedToken = self
            .http
            .request_data(Method::POST, REFRESH_TOKEN, Some(&json!({})), headers)
            .await?;

        if token.access.is_empty() {
            return Err(ClientError::Decode("dashboard returned an empty access token".into()));
        }

        Ok(AccessToken(token.access))
    }
}
