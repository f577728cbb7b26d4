//! API key authentication middleware

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::error::{Error, Result};

use super::handlers::{client_error, AppState};

/// Header checked before `Authorization`
pub const API_KEY_HEADER: &str = "x-api-key";

const AUTHORIZATION_HEADER: &str = "authorization";

const BEARER_PREFIX: &str = "Bearer ";

/// Reject requests that do not carry the shared secret
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if let Err(err) = authorize(request.headers(), &state.api_key) {
        warn!(
            path = %request.uri().path(),
            reason = %err,
            "Rejected unauthenticated request"
        );
        return client_error(&err).into_response();
    }

    next.run(request).await
}

/// Check the presented key against `expected`
///
/// The key is read from `x-api-key`, falling back to `Authorization`. A
/// leading `Bearer ` is stripped from whichever header supplied it.
pub fn authorize(headers: &HeaderMap, expected: &str) -> Result<()> {
    let presented = [API_KEY_HEADER, AUTHORIZATION_HEADER]
        .into_iter()
        .filter_map(|name| headers.get(name))
        .find(|value| !value.is_empty())
        .ok_or(Error::MissingApiKey)?;

    let presented = presented.to_str().map_err(|_| Error::InvalidApiKey)?;
    let key = presented.strip_prefix(BEARER_PREFIX).unwrap_or(presented);

    if key == expected {
        Ok(())
    } else {
        Err(Error::InvalidApiKey)
    }
}
