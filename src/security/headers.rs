//! Security response headers.
//!
//! # Responsibilities
//! - Stamp every response with a fixed hardening header set
//!
//! # Design Decisions
//! - Headers are overwritten, not merged: handlers never control them
//! - The set mirrors common HTTP hardening defaults (content sniffing off,
//!   frame embedding limited to same origin, referrer suppressed, legacy
//!   XSS auditor disabled, HSTS for deployments behind TLS)

use axum::body::Body;
use axum::http::{header, HeaderValue, Request};
use axum::middleware::Next;
use axum::response::Response;

/// Middleware applying the hardening header set to every response.
pub async fn security_headers(request: Request<Body>, next: Next) -> Response {
    let mut response = next.run(request).await;

    let headers = response.headers_mut();
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(
        header::X_FRAME_OPTIONS,
        HeaderValue::from_static("SAMEORIGIN"),
    );
    headers.insert(
        header::REFERRER_POLICY,
        HeaderValue::from_static("no-referrer"),
    );
    headers.insert(header::X_XSS_PROTECTION, HeaderValue::from_static("0"));
    headers.insert(
        header::STRICT_TRANSPORT_SECURITY,
        HeaderValue::from_static("max-age=15552000; includeSubDomains"),
    );

    response
}
