//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define service metrics (request counts, latency, rejections)
//! - Expose a Prometheus-compatible scrape endpoint
//!
//! # Metrics
//! - `http_requests_total` (counter): requests by method, route, status
//! - `http_request_duration_seconds` (histogram): latency distribution
//! - `http_requests_rate_limited_total` (counter): rejected by the limiter
//!
//! # Design Decisions
//! - Low-overhead metric updates (atomic operations)
//! - Routes are labelled by matched pattern, not raw path, to keep
//!   cardinality bounded
//! - Exporter failures degrade to a log line, never a crash

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    body::Body, extract::MatchedPath, http::Request, middleware::Next, response::Response,
};
use metrics::{counter, describe_counter, describe_histogram, histogram, Unit};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus exporter on `address` and register metric
/// descriptions. Must run inside the Tokio runtime.
pub fn init_metrics(address: &str) {
    let address: SocketAddr = match address.parse() {
        Ok(address) => address,
        Err(error) => {
            tracing::error!(address, %error, "invalid metrics address, exporter disabled");
            return;
        }
    };

    if let Err(error) = PrometheusBuilder::new()
        .with_http_listener(address)
        .install()
    {
        tracing::error!(%error, "failed to start metrics exporter");
        return;
    }

    describe_counter!(
        "http_requests_total",
        "Requests handled, by method, route and status"
    );
    describe_counter!(
        "http_requests_rate_limited_total",
        "Requests rejected by the rate limiter"
    );
    describe_histogram!(
        "http_request_duration_seconds",
        Unit::Seconds,
        "Request latency, by method and route"
    );

    tracing::info!(%address, "metrics exporter listening");
}

/// Middleware recording one counter increment and one latency sample per
/// request.
pub async fn track_requests(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let route = match request.extensions().get::<MatchedPath>() {
        Some(matched) => matched.as_str().to_owned(),
        None => request.uri().path().to_owned(),
    };
    let method = request.method().clone();

    let response = next.run(request).await;

    let latency = start.elapsed().as_secs_f64();
    let status = response.status().as_u16().to_string();

    counter!(
        "http_requests_total",
        "method" => method.to_string(),
        "route" => route.clone(),
        "status" => status
    )
    .increment(1);
    histogram!(
        "http_request_duration_seconds",
        "method" => method.to_string(),
        "route" => route
    )
    .record(latency);

    response
}

/// Count one rejection by the rate limiter.
pub fn record_rate_limited() {
    counter!("http_requests_rate_limited_total").increment(1);
}
