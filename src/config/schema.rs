//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! service. All types derive Serde traits so a resolved configuration can
//! be dumped for debugging, and every section carries defaults that stand
//! on their own when the environment provides nothing.

use std::net::SocketAddr;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration for the service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Listener settings (port, environment, shutdown grace).
    pub server: ServerConfig,

    /// Cross-origin request settings.
    pub cors: CorsConfig,

    /// Security hardening settings.
    pub security: SecurityConfig,

    /// Rate limiting settings.
    pub rate_limit: RateLimitConfig,

    /// Static asset settings.
    pub static_files: StaticFilesConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// TCP port to listen on.
    pub port: u16,

    /// Deployment environment label reported by the health endpoint.
    pub environment: String,

    /// Seconds to wait for in-flight requests during shutdown.
    pub shutdown_grace_secs: u64,
}

impl ServerConfig {
    /// Address the listener binds to.
    pub fn bind_address(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            environment: "development".to_string(),
            shutdown_grace_secs: 5,
        }
    }
}

/// Cross-origin request configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Origins allowed to call the API. A single `*` entry allows any
    /// origin without credentials.
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
        }
    }
}

/// Security hardening configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Attach hardening headers to every response.
    pub headers_enabled: bool,

    /// Maximum request body size in bytes.
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            headers_enabled: true,
            max_body_size: 1024 * 1024, // 1MB
        }
    }
}

/// Rate limiting configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Enable rate limiting.
    pub enabled: bool,

    /// Maximum requests per caller within one window.
    pub max_requests: usize,

    /// Window length in seconds.
    pub window_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_requests: 100,
            window_secs: 60,
        }
    }
}

/// Static asset configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StaticFilesConfig {
    /// Directory served for requests no API route matches. Skipped when
    /// the directory does not exist.
    pub dir: PathBuf,
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("public"),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Bind address for the Prometheus exporter. Unset disables the
    /// exporter entirely.
    pub metrics_address: Option<String>,
}
