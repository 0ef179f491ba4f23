//! Placeholder identity check.
//!
//! Guards the identity-echo route: any non-empty `x-auth-token` header
//! value passes and becomes the request's [`UserContext`]. This is a
//! placeholder, not an authentication contract; the token is never
//! verified against anything.

use axum::body::Body;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use serde::Serialize;

use crate::http::error::ApiError;

/// Header expected to carry the caller's token.
pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";

/// Identity attached to requests that passed the token check.
#[derive(Debug, Clone, Serialize)]
pub struct UserContext {
    /// The token value the caller presented, verbatim.
    pub subject: String,
}

/// Middleware rejecting requests without a usable token.
pub async fn require_token(
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    // Owned so the header borrow ends before the extensions are touched.
    let token = request
        .headers()
        .get(AUTH_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_owned);

    match token {
        Some(subject) => {
            request.extensions_mut().insert(UserContext { subject });
            Ok(next.run(request).await)
        }
        None => Err(ApiError::auth("missing auth token")),
    }
}
