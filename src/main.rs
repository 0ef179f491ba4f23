//! Items API service
//!
//! A minimal JSON CRUD service built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ─────────────▶ http/server.rs (middleware stack)
//!                        request id → trace → security headers → CORS
//!                        → rate limit → body limit → route match
//!                            │
//!                            ▼
//!                    http/items.rs · http/system.rs (handlers)
//!                            │
//!                            ▼
//!                    items/ (validation + in-memory store)
//!
//!     Cross-cutting: config · security · observability · lifecycle
//! ```

use std::time::Duration;

use tokio::net::TcpListener;

use items_api::config;
use items_api::lifecycle::signals;
use items_api::observability::{logging, metrics};
use items_api::{HttpServer, Shutdown};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env file is fine; the environment stands on its own.
    dotenvy::dotenv().ok();

    logging::init();

    tracing::info!("items-api v0.1.0 starting");

    let config = match config::load_from_env() {
        Ok(config) => config,
        Err(error) => {
            tracing::error!(%error, "configuration rejected");
            return Err(error.into());
        }
    };

    tracing::info!(
        port = config.server.port,
        environment = %config.server.environment,
        rate_limit = config.rate_limit.enabled,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(config.server.bind_address()).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    if let Some(address) = &config.observability.metrics_address {
        metrics::init_metrics(address);
    }

    let shutdown = Shutdown::new();
    // Broadcast events are not replayed, so every receiver must exist
    // before the signal task gets a chance to trigger.
    let mut fired = shutdown.subscribe();
    let server_shutdown = shutdown.subscribe();
    let signal_trigger = shutdown.clone();
    tokio::spawn(async move {
        signals::wait_for_signal().await;
        signal_trigger.trigger();
    });

    let grace = Duration::from_secs(config.server.shutdown_grace_secs);
    let server = HttpServer::new(config);
    let mut server_task = tokio::spawn(server.run(listener, server_shutdown));

    tokio::select! {
        result = &mut server_task => {
            // The server stopped without a signal, on its own error or
            // because the listener closed.
            result??;
        }
        _ = fired.recv() => {
            match tokio::time::timeout(grace, &mut server_task).await {
                Ok(result) => result??,
                Err(_) => {
                    tracing::error!(
                        grace_secs = grace.as_secs(),
                        "shutdown deadline exceeded, aborting"
                    );
                    std::process::exit(1);
                }
            }
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
