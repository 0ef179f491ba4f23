//! Request-path error taxonomy and the terminal JSON responder.
//!
//! Every failure a handler or middleware raises is an [`ApiError`]; the
//! `IntoResponse` impl is the single boundary where it becomes a
//! `{"error": message}` envelope and a structured log line. Server errors
//! keep their detail in the log and send a generic body to the caller.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Errors surfaced to HTTP clients.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Input failed validation (400).
    #[error("{0}")]
    Validation(String),

    /// Request lacks a usable identity token (401).
    #[error("{0}")]
    Auth(String),

    /// The addressed resource does not exist (404).
    #[error("{0}")]
    NotFound(String),

    /// Request body exceeded the configured limit (413).
    #[error("request body too large")]
    PayloadTooLarge,

    /// Unclassified failure (500 catch-all).
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Validation failure with the given aggregated message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Authentication failure.
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }

    /// Missing-resource failure.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Unclassified internal failure.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// The HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Auth(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Uniform error envelope.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Human-readable failure message.
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Internal detail stays in the log; the caller gets a generic body.
        let body = match &self {
            ApiError::Internal(detail) => {
                tracing::error!(status = status.as_u16(), error = %detail, "request failed");
                "internal server error".to_string()
            }
            other => {
                tracing::warn!(status = status.as_u16(), error = %other, "request rejected");
                other.to_string()
            }
        };

        (status, Json(ErrorBody { error: body })).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        // Body-limit overruns keep their 413; everything else is a 400.
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return ApiError::PayloadTooLarge;
        }
        ApiError::Validation(rejection.body_text())
    }
}

/// Result alias for handler bodies.
pub type ApiResult<T> = Result<T, ApiError>;
