//! Configuration loading from the process environment.
//!
//! Every setting starts from its schema default and is overridden by the
//! matching environment variable when one is set and non-empty. Values
//! that fail to parse abort startup rather than falling back silently.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use crate::config::schema::AppConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {reason}")]
    Var { name: &'static str, reason: String },

    #[error("validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|error| error.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from the process environment.
pub fn load_from_env() -> Result<AppConfig, ConfigError> {
    let mut config = AppConfig::default();

    if let Some(port) = parse_var::<u16>("PORT")? {
        config.server.port = port;
    }
    if let Some(environment) = read_var("APP_ENV") {
        config.server.environment = environment;
    }
    if let Some(grace) = parse_var::<u64>("SHUTDOWN_GRACE_SECS")? {
        config.server.shutdown_grace_secs = grace;
    }
    if let Some(origins) = read_var("CORS_ORIGINS") {
        config.cors.allowed_origins = origins
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();
    }
    if let Some(max_body) = parse_var::<usize>("MAX_BODY_BYTES")? {
        config.security.max_body_size = max_body;
    }
    if let Some(max_requests) = parse_var::<usize>("RATE_LIMIT_MAX")? {
        config.rate_limit.max_requests = max_requests;
    }
    if let Some(window) = parse_var::<u64>("RATE_LIMIT_WINDOW_SECS")? {
        config.rate_limit.window_secs = window;
    }
    if let Some(dir) = read_var("STATIC_DIR") {
        config.static_files.dir = PathBuf::from(dir);
    }
    if let Some(address) = read_var("METRICS_ADDR") {
        config.observability.metrics_address = Some(address);
    }

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Variable value, with unset and blank treated the same way.
fn read_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_var<T>(name: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match read_var(name) {
        Some(raw) => raw.parse::<T>().map(Some).map_err(|error| ConfigError::Var {
            name,
            reason: error.to_string(),
        }),
        None => Ok(None),
    }
}
