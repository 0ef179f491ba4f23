//! Liveness, identity, and unmatched-route handlers.

use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::{Extension, Json};
use serde::Serialize;

use crate::http::error::{ApiError, ApiResult};
use crate::http::server::AppState;
use crate::security::auth::UserContext;

/// Liveness probe response.
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    /// Always true when the process can answer at all.
    pub ok: bool,
    /// Configured environment name.
    pub env: String,
    /// Seconds since the server state was created.
    pub uptime: f64,
}

/// Identity echo envelope.
#[derive(Debug, Serialize)]
pub struct UserEnvelope {
    /// The identity the token middleware attached.
    pub user: UserContext,
}

/// 404 envelope for unmatched paths.
#[derive(Debug, Serialize)]
pub struct NotFoundBody {
    /// Failure message.
    pub error: String,
    /// The path that did not match any route.
    pub path: String,
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        ok: true,
        env: state.config.server.environment.clone(),
        uptime: state.started_at.elapsed().as_secs_f64(),
    })
}

/// GET /me
///
/// Echoes whatever identity [`crate::security::auth::require_token`]
/// attached. The extension is always present when the middleware ran; its
/// absence means the router was miswired, which is an internal error.
pub async fn me(user: Option<Extension<UserContext>>) -> ApiResult<Json<UserEnvelope>> {
    let Extension(user) =
        user.ok_or_else(|| ApiError::internal("identity middleware not applied"))?;
    Ok(Json(UserEnvelope { user }))
}

/// Terminal handler for unmatched routes.
pub async fn not_found(uri: Uri) -> (StatusCode, Json<NotFoundBody>) {
    tracing::warn!(path = %uri.path(), "no route matched");
    (
        StatusCode::NOT_FOUND,
        Json(NotFoundBody {
            error: "not found".to_string(),
            path: uri.path().to_string(),
        }),
    )
}
