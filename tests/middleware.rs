//! Cross-cutting middleware behavior: request ids, hardening headers,
//! CORS, limits and shutdown.

mod common;

use std::time::Duration;

use axum::http::StatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use items_api::{HttpServer, Shutdown};

#[tokio::test]
async fn every_response_carries_a_request_id() {
    let (addr, shutdown) = common::spawn_app(common::test_config()).await;
    let client = common::client();

    let response = client
        .get(format!("http://{addr}/health"))
        .send()
        .await
        .unwrap();
    let id = response
        .headers()
        .get("x-request-id")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(uuid::Uuid::parse_str(id).is_ok());

    shutdown.trigger();
}

#[tokio::test]
async fn incoming_request_ids_are_echoed() {
    let (addr, shutdown) = common::spawn_app(common::test_config()).await;
    let client = common::client();

    let response = client
        .get(format!("http://{addr}/health"))
        .header("x-request-id", "caller-chosen-id")
        .send()
        .await
        .unwrap();
    assert_eq!(
        response.headers().get("x-request-id").unwrap(),
        "caller-chosen-id"
    );

    shutdown.trigger();
}

#[tokio::test]
async fn hardening_headers_are_attached_when_enabled() {
    let (addr, shutdown) = common::spawn_app(common::test_config()).await;
    let client = common::client();

    let response = client
        .get(format!("http://{addr}/health"))
        .send()
        .await
        .unwrap();
    let headers = response.headers();
    assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
    assert_eq!(headers.get("x-frame-options").unwrap(), "SAMEORIGIN");
    assert_eq!(headers.get("referrer-policy").unwrap(), "no-referrer");

    shutdown.trigger();
}

#[tokio::test]
async fn hardening_headers_can_be_turned_off() {
    let mut config = common::test_config();
    config.security.headers_enabled = false;
    let (addr, shutdown) = common::spawn_app(config).await;
    let client = common::client();

    let response = client
        .get(format!("http://{addr}/health"))
        .send()
        .await
        .unwrap();
    assert!(response.headers().get("x-content-type-options").is_none());

    shutdown.trigger();
}

#[tokio::test]
async fn wildcard_cors_allows_any_origin() {
    let (addr, shutdown) = common::spawn_app(common::test_config()).await;
    let client = common::client();

    let response = client
        .get(format!("http://{addr}/items"))
        .header("origin", "http://anywhere.test")
        .send()
        .await
        .unwrap();
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );

    shutdown.trigger();
}

#[tokio::test]
async fn explicit_cors_origins_are_reflected_with_credentials() {
    let mut config = common::test_config();
    config.cors.allowed_origins = vec!["http://allowed.test".to_string()];
    let (addr, shutdown) = common::spawn_app(config).await;
    let client = common::client();

    let allowed = client
        .get(format!("http://{addr}/items"))
        .header("origin", "http://allowed.test")
        .send()
        .await
        .unwrap();
    assert_eq!(
        allowed.headers().get("access-control-allow-origin").unwrap(),
        "http://allowed.test"
    );
    assert_eq!(
        allowed
            .headers()
            .get("access-control-allow-credentials")
            .unwrap(),
        "true"
    );

    let denied = client
        .get(format!("http://{addr}/items"))
        .header("origin", "http://other.test")
        .send()
        .await
        .unwrap();
    assert!(denied
        .headers()
        .get("access-control-allow-origin")
        .is_none());

    shutdown.trigger();
}

#[tokio::test]
async fn preflight_requests_are_answered() {
    let (addr, shutdown) = common::spawn_app(common::test_config()).await;
    let client = common::client();

    let response = client
        .request(reqwest::Method::OPTIONS, format!("http://{addr}/items"))
        .header("origin", "http://anywhere.test")
        .header("access-control-request-method", "POST")
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    assert!(response
        .headers()
        .get("access-control-allow-methods")
        .is_some());

    shutdown.trigger();
}

#[tokio::test]
async fn rate_limit_rejects_over_the_ceiling_with_retry_after() {
    let mut config = common::test_config();
    config.rate_limit.enabled = true;
    config.rate_limit.max_requests = 3;
    config.rate_limit.window_secs = 60;
    let (addr, shutdown) = common::spawn_app(config).await;
    let client = common::client();

    for _ in 0..3 {
        let ok = client
            .get(format!("http://{addr}/health"))
            .send()
            .await
            .unwrap();
        assert_eq!(ok.status(), StatusCode::OK);
    }

    let rejected = client
        .get(format!("http://{addr}/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(rejected.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(rejected.headers().get("retry-after").unwrap(), "60");
    assert!(rejected.headers().get("x-request-id").is_some());
    let body: Value = rejected.json().await.unwrap();
    assert_eq!(body["error"], "too many requests");

    // A different forwarded caller has an untouched budget.
    let other = client
        .get(format!("http://{addr}/health"))
        .header("x-forwarded-for", "203.0.113.9")
        .send()
        .await
        .unwrap();
    assert_eq!(other.status(), StatusCode::OK);

    shutdown.trigger();
}

#[tokio::test]
async fn rate_limit_recovers_once_the_window_slides() {
    let mut config = common::test_config();
    config.rate_limit.enabled = true;
    config.rate_limit.max_requests = 1;
    config.rate_limit.window_secs = 1;
    let (addr, shutdown) = common::spawn_app(config).await;
    let client = common::client();

    let first = client
        .get(format!("http://{addr}/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);

    let second = client
        .get(format!("http://{addr}/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);

    tokio::time::sleep(Duration::from_millis(1100)).await;

    let third = client
        .get(format!("http://{addr}/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(third.status(), StatusCode::OK);

    shutdown.trigger();
}

#[tokio::test]
async fn oversized_bodies_are_rejected() {
    let mut config = common::test_config();
    config.security.max_body_size = 256;
    let (addr, shutdown) = common::spawn_app(config).await;
    let client = common::client();

    let huge_name = "x".repeat(1024);
    let response = client
        .post(format!("http://{addr}/items"))
        .json(&json!({ "name": huge_name }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);

    shutdown.trigger();
}

#[tokio::test]
async fn static_assets_are_served_for_unmatched_paths() {
    let dir = std::env::temp_dir().join(format!("items-api-assets-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("hello.txt"), "from disk").unwrap();

    let mut config = common::test_config();
    config.static_files.dir = dir.clone();
    let (addr, shutdown) = common::spawn_app(config).await;
    let client = common::client();

    let served = client
        .get(format!("http://{addr}/hello.txt"))
        .send()
        .await
        .unwrap();
    assert_eq!(served.status(), StatusCode::OK);
    assert_eq!(served.text().await.unwrap(), "from disk");

    // A miss inside the directory still lands on the JSON 404.
    let missing = client
        .get(format!("http://{addr}/nope.txt"))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    let body: Value = missing.json().await.unwrap();
    assert_eq!(body["error"], "not found");

    shutdown.trigger();
    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn unmatched_non_get_requests_keep_the_json_404_with_static_files() {
    let dir = std::env::temp_dir().join(format!("items-api-fallback-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();

    let mut config = common::test_config();
    config.static_files.dir = dir.clone();
    let (addr, shutdown) = common::spawn_app(config).await;
    let client = common::client();

    // The file service only understands GET and HEAD; other methods must
    // land on the same JSON 404 as a miss, not an empty 405.
    let response = client
        .post(format!("http://{addr}/definitely/not/here"))
        .json(&json!({ "name": "ignored" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "not found");
    assert_eq!(body["path"], "/definitely/not/here");

    shutdown.trigger();
    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn shutdown_trigger_stops_the_server_promptly() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(common::test_config());
    let receiver = shutdown.subscribe();
    let task = tokio::spawn(async move { server.run(listener, receiver).await });

    let client = common::client();
    let alive = client
        .get(format!("http://{addr}/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(alive.status(), StatusCode::OK);

    shutdown.trigger();

    let result = tokio::time::timeout(Duration::from_secs(2), task)
        .await
        .expect("run returns within the drain window")
        .expect("server task not cancelled");
    assert!(result.is_ok());
}
