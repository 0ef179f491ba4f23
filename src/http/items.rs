//! Item CRUD handlers.
//!
//! Each handler is a pure request-to-response mapping over the store:
//! validate where a body is involved, call the store, shape the envelope.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use serde_json::Value;

use crate::http::error::{ApiError, ApiResult};
use crate::http::server::AppState;
use crate::items::validation;
use crate::items::Item;

/// Envelope for the full collection.
#[derive(Debug, Serialize)]
pub struct ItemList {
    /// Items in insertion order.
    pub data: Vec<Item>,
}

/// Envelope for a single item.
#[derive(Debug, Serialize)]
pub struct ItemEnvelope {
    /// The created or updated item.
    pub item: Item,
}

/// Envelope reporting a removal outcome.
#[derive(Debug, Serialize)]
pub struct RemovalOutcome {
    /// Whether anything was removed.
    pub removed: bool,
}

/// GET /items
pub async fn list_items(State(state): State<AppState>) -> Json<ItemList> {
    Json(ItemList {
        data: state.store.list(),
    })
}

/// POST /items
pub async fn create_item(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ItemEnvelope>)> {
    let Json(raw) = body?;
    let new = validation::validate(&raw).map_err(ApiError::validation)?;
    let item = state.store.append(new);

    tracing::debug!(id = %item.id, "item created");
    Ok((StatusCode::CREATED, Json(ItemEnvelope { item })))
}

/// PUT /items/{id}
pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<ItemEnvelope>> {
    let Json(raw) = body?;
    let new = validation::validate(&raw).map_err(ApiError::validation)?;
    let item = state
        .store
        .replace_by_id(&id, new)
        .ok_or_else(|| ApiError::not_found("item not found"))?;

    Ok(Json(ItemEnvelope { item }))
}

/// DELETE /items/{id}
pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<RemovalOutcome> {
    let removed = state.store.remove_by_id(&id);
    if removed {
        tracing::debug!(id = %id, "item removed");
    }
    Json(RemovalOutcome { removed })
}
