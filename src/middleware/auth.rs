use axum::{extract::Request, middleware::Next, response::Response};
use axum_extra::extract::cookie::CookieJar;

use crate::auth::ApiKey;
use crate::error::ApiError;

/// Key of the visitor making this request, read from the key cookie
#[derive(Clone, Debug)]
pub struct SessionKey(pub ApiKey);

/// Rejects requests without a `wtc-` key cookie before any body is read,
/// and hands the key to the handler as a request extension
pub async fn api_key_middleware(mut request: Request, next: Next) -> Result<Response, ApiError> {
    let jar = CookieJar::from_headers(request.headers());

    let key = ApiKey::from_jar(&jar).ok_or_else(|| {
        tracing::debug!("Rejected {} without a valid key cookie", request.uri().path());
        ApiError::unauthorized("Authentication required")
    })?;

    request.extensions_mut().insert(SessionKey(key));

    Ok(next.run(request).await)
}
