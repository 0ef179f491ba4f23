//! Sliding-window rate limiting keyed by caller address.
//!
//! # Responsibilities
//! - Track request timestamps per caller in a sliding window
//! - Reject callers that exceed the configured ceiling with `429`
//! - Resolve the caller key from forwarding headers before the socket
//!
//! # Design Decisions
//! - A timestamp log per key rather than a counter, so the window slides
//!   continuously instead of resetting on a fixed boundary
//! - Expired timestamps are pruned on access for the key being checked,
//!   keeping reads and writes on the hot path lock-free across keys

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{header, HeaderMap, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use dashmap::DashMap;

use crate::config::RateLimitConfig;
use crate::http::error::ErrorBody;
use crate::observability::metrics;

/// Per-caller sliding request windows.
pub struct RateLimiter {
    windows: DashMap<String, VecDeque<Instant>>,
    max_requests: usize,
    window: Duration,
}

impl RateLimiter {
    pub fn new(config: &RateLimitConfig) -> Self {
        Self {
            windows: DashMap::new(),
            max_requests: config.max_requests,
            window: Duration::from_secs(config.window_secs),
        }
    }

    /// Admit or reject one request for `key` at the current instant.
    pub fn check(&self, key: &str) -> bool {
        self.check_at(key, Instant::now())
    }

    /// Window length in seconds, used for the `retry-after` header.
    pub fn window_secs(&self) -> u64 {
        self.window.as_secs()
    }

    fn check_at(&self, key: &str, now: Instant) -> bool {
        let mut log = self.windows.entry(key.to_string()).or_default();

        while let Some(oldest) = log.front() {
            if now.duration_since(*oldest) >= self.window {
                log.pop_front();
            } else {
                break;
            }
        }

        if log.len() < self.max_requests {
            log.push_back(now);
            true
        } else {
            false
        }
    }
}

/// Caller key: first `x-forwarded-for` hop, then `x-real-ip`, then the
/// socket address.
pub fn client_key(addr: &SocketAddr, headers: &HeaderMap) -> String {
    if let Some(forwarded) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        if let Some(first_hop) = forwarded.split(',').next() {
            let first_hop = first_hop.trim();
            if !first_hop.is_empty() {
                return first_hop.to_string();
            }
        }
    }

    if let Some(real_ip) = headers.get("x-real-ip").and_then(|v| v.to_str().ok()) {
        let real_ip = real_ip.trim();
        if !real_ip.is_empty() {
            return real_ip.to_string();
        }
    }

    addr.ip().to_string()
}

/// Middleware enforcing the sliding-window ceiling per caller.
pub async fn rate_limit_middleware(
    State(limiter): State<Arc<RateLimiter>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let key = client_key(&addr, request.headers());

    if limiter.check(&key) {
        return next.run(request).await;
    }

    tracing::warn!(client = %key, "rate limit exceeded");
    metrics::record_rate_limited();

    (
        StatusCode::TOO_MANY_REQUESTS,
        [(header::RETRY_AFTER, limiter.window_secs().to_string())],
        Json(ErrorBody {
            error: "too many requests".to_string(),
        }),
    )
        .into_response()
}
