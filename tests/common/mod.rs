//! Shared utilities for integration testing.

use std::net::SocketAddr;

use tokio::net::TcpListener;

use items_api::config::AppConfig;
use items_api::{HttpServer, Shutdown};

/// Baseline configuration for the suite: test environment label, rate
/// limiting off, no static directory. Individual tests flip what they
/// exercise.
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.server.environment = "test".to_string();
    config.rate_limit.enabled = false;
    config.static_files.dir = "does-not-exist".into();
    config
}

/// Spawn the server on an ephemeral port. The listener is bound before
/// the task starts, so requests sent immediately after return are queued
/// rather than refused.
pub async fn spawn_app(config: AppConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    let receiver = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, receiver).await;
    });

    (address, shutdown)
}

/// Client without proxy interference, shared shape across tests.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .build()
        .expect("client builds")
}
