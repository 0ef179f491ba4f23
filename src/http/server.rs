//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, request ID, CORS, limits, rate limit)
//! - Serve static assets for paths no API route claims
//! - Bind the listener and drain connections on shutdown
//!
//! # Design Decisions
//! - Layers attach outside the routes, so rejected and unmatched requests
//!   still carry request ids, trace spans and hardening headers
//! - Optional middleware is governed by config flags, never probed

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::DefaultBodyLimit,
    handler::HandlerWithoutStateExt,
    http::{header, HeaderName, HeaderValue, Method, Request},
    middleware,
    routing::{get, put},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    services::ServeDir,
    trace::TraceLayer,
};

use crate::config::{AppConfig, CorsConfig};
use crate::http::request::{RequestIdExt, RequestIdLayer};
use crate::http::{items, system};
use crate::items::ItemStore;
use crate::observability::metrics;
use crate::security::auth;
use crate::security::headers::security_headers;
use crate::security::rate_limit::{rate_limit_middleware, RateLimiter};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<ItemStore>,
    pub started_at: Instant,
}

/// HTTP server for the items API.
pub struct HttpServer {
    router: Router,
    config: Arc<AppConfig>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        let config = Arc::new(config);
        let state = AppState {
            config: Arc::clone(&config),
            store: Arc::new(ItemStore::new()),
            started_at: Instant::now(),
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &AppConfig, state: AppState) -> Router {
        let mut router = Router::new()
            .route("/health", get(system::health))
            .route("/items", get(items::list_items).post(items::create_item))
            .route(
                "/items/{id}",
                put(items::update_item).delete(items::delete_item),
            )
            .route(
                "/me",
                get(system::me).layer(middleware::from_fn(auth::require_token)),
            )
            .route_layer(middleware::from_fn(metrics::track_requests))
            .with_state(state);

        // Unmatched paths fall through to static assets when the directory
        // exists, and to the JSON 404 either way. ServeDir answers non-GET
        // methods with an empty 405 unless it is told to use the fallback.
        router = if config.static_files.dir.is_dir() {
            let assets = ServeDir::new(&config.static_files.dir)
                .call_fallback_on_method_not_allowed(true)
                .not_found_service(system::not_found.into_service());
            router.fallback_service(assets)
        } else {
            router.fallback(system::not_found)
        };

        router = router
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(config.security.max_body_size));

        if config.rate_limit.enabled {
            let limiter = Arc::new(RateLimiter::new(&config.rate_limit));
            router = router.layer(middleware::from_fn_with_state(
                limiter,
                rate_limit_middleware,
            ));
        }

        router = router.layer(cors_layer(&config.cors));

        if config.security.headers_enabled {
            router = router.layer(middleware::from_fn(security_headers));
        }

        router
            .layer(
                TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                    tracing::info_span!(
                        "request",
                        method = %request.method(),
                        path = %request.uri().path(),
                        request_id = request.request_id().unwrap_or("unknown"),
                    )
                }),
            )
            .layer(RequestIdLayer)
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let address = listener.local_addr()?;
        tracing::info!(
            %address,
            environment = %self.config.server.environment,
            "HTTP server starting"
        );

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("draining in-flight requests");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// CORS policy from configuration. A lone wildcard admits any origin
/// without credentials; explicit origins are reflected with credentials.
fn cors_layer(config: &CorsConfig) -> CorsLayer {
    if config.allowed_origins.iter().any(|origin| origin == "*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(auth::AUTH_TOKEN_HEADER),
        ])
        .allow_credentials(true)
}
