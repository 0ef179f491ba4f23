//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (window and body limits > 0)
//! - Catch origin lists that mix the wildcard with explicit entries
//! - Reject origins that cannot be sent back as CORS header values
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;
use std::net::SocketAddr;

use axum::http::HeaderValue;

use crate::config::schema::AppConfig;

/// One semantic violation, pointing at the offending field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Check semantic constraints across the whole configuration.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.environment.trim().is_empty() {
        errors.push(ValidationError::new(
            "server.environment",
            "must not be empty",
        ));
    }

    if config.security.max_body_size == 0 {
        errors.push(ValidationError::new(
            "security.max_body_size",
            "must be greater than zero",
        ));
    }

    if config.rate_limit.max_requests == 0 {
        errors.push(ValidationError::new(
            "rate_limit.max_requests",
            "must be greater than zero",
        ));
    }

    if config.rate_limit.window_secs == 0 {
        errors.push(ValidationError::new(
            "rate_limit.window_secs",
            "must be greater than zero",
        ));
    }

    let origins = &config.cors.allowed_origins;
    if origins.iter().any(|origin| origin == "*") && origins.len() > 1 {
        errors.push(ValidationError::new(
            "cors.allowed_origins",
            "wildcard cannot be combined with explicit origins",
        ));
    }
    if origins.iter().any(|origin| origin.trim().is_empty()) {
        errors.push(ValidationError::new(
            "cors.allowed_origins",
            "origin entries must not be empty",
        ));
    }
    for origin in origins.iter().filter(|origin| *origin != "*") {
        if HeaderValue::from_str(origin).is_err() {
            errors.push(ValidationError::new(
                "cors.allowed_origins",
                format!("not a valid header value: {origin:?}"),
            ));
        }
    }

    if let Some(address) = &config.observability.metrics_address {
        if address.parse::<SocketAddr>().is_err() {
            errors.push(ValidationError::new(
                "observability.metrics_address",
                format!("not a valid socket address: {address}"),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
