use axum::{extract::State, response::Json};
use axum_extra::extract::cookie::CookieJar;
use serde_json::{json, Value};

use crate::auth::{ApiKey, API_KEY_COOKIE};
use crate::dashboard::BootstrapOutcome;
use crate::error::ApiError;
use crate::state::AppState;

/// POST /api/bootstrap - provision a key through the dashboard and set the key cookie
///
/// The visitor's console session cookies are forwarded to the dashboard's
/// token refresh endpoint. Success body:
/// `{ "success": true, "isAuthenticated": true, "createdByUsername": "..." }`.
/// Without a console session the response is a 401 whose `redirect` field
/// points at the console login page.
pub async fn bootstrap_post(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<Value>), ApiError> {
    match state.bootstrap.run(session_cookies(&jar)).await {
        BootstrapOutcome::Provisioned(session) => {
            let key = ApiKey::parse(&session.secret_key, state.config.security.strict_key_length)
                .map_err(|e| {
                    tracing::error!("Dashboard returned a key the gate rejects: {}", e);
                    ApiError::bad_gateway("The dashboard returned an unusable API key")
                })?;

            Ok((
                jar.add(key.to_cookie()),
                Json(json!({
                    "success": true,
                    "isAuthenticated": true,
                    "createdByUsername": session.display_name,
                })),
            ))
        }
        BootstrapOutcome::LoginRequired { redirect_url } => Err(ApiError::login_required(redirect_url)),
        BootstrapOutcome::Failed { error, .. } => {
            Err(ApiError::upstream(&error, "Failed to set up your API key"))
        }
    }
}

/// Cookies to relay to the dashboard, minus our own key cookie
fn session_cookies(jar: &CookieJar) -> Option<String> {
    let cookies: Vec<String> = jar
        .iter()
        .filter(|cookie| cookie.name() != API_KEY_COOKIE)
        .map(|cookie| format!("{}={}", cookie.name(), cookie.value()))
        .collect();

    (!cookies.is_empty()).then(|| cookies.join("; "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, HeaderMap, HeaderValue};

    #[test]
    fn relayed_cookies_exclude_the_key_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("wetro-api-key=wtc-secret; refresh=abc"),
        );
        let relayed = session_cookies(&CookieJar::from_headers(&headers));
        assert_eq!(relayed.as_deref(), Some("refresh=abc"));
    }

    #[test]
    fn nothing_to_relay_without_cookies() {
        assert_eq!(session_cookies(&CookieJar::new()), None);
    }
}
