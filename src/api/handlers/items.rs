//! Handlers for item CRUD endpoints.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::json;
use std::future::Future;
use std::time::Duration;
use tokio::time::timeout;
use uuid::Uuid;
use validator::Validate;

use crate::api::dto::item::{
    CreateItemRequest, FilterItemsRequest, ItemResponse, UpdateItemRequest,
};
use crate::error::AppError;
use crate::state::AppState;

/// Runs a service call under the per-request deadline.
///
/// A deadline hit drops the in-flight future; an open sqlx transaction
/// resolves via rollback-on-drop rather than leaking. The timeout itself is
/// surfaced as a store error.
async fn with_deadline<T>(
    deadline: Duration,
    fut: impl Future<Output = Result<T, AppError>>,
) -> Result<T, AppError> {
    match timeout(deadline, fut).await {
        Ok(result) => result,
        Err(_) => Err(AppError::store(
            "Request deadline exceeded",
            json!({ "timeout_seconds": deadline.as_secs() }),
        )),
    }
}

/// Returns all items.
///
/// # Endpoint
///
/// `GET /api/items`
///
/// An empty store yields `[]`, not an error.
pub async fn list_items_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<ItemResponse>>, AppError> {
    let items = with_deadline(state.request_timeout, state.inventory.read_all()).await?;

    Ok(Json(items.into_iter().map(ItemResponse::from).collect()))
}

/// Returns a single item by id, served from the cache when possible.
///
/// # Endpoint
///
/// `GET /api/items/{id}`
///
/// # Errors
///
/// Returns 404 if no item matches the id.
pub async fn read_item_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ItemResponse>, AppError> {
    let item = with_deadline(state.request_timeout, state.inventory.read(id)).await?;

    Ok(Json(ItemResponse::from(item)))
}

/// Returns items matching the filter criteria in the body.
///
/// # Endpoint
///
/// `POST /api/items/filter`
///
/// # Errors
///
/// Returns 400 for the empty filter; `GET /api/items` is the explicit
/// unfiltered path.
pub async fn filter_items_handler(
    State(state): State<AppState>,
    Json(payload): Json<FilterItemsRequest>,
) -> Result<Json<Vec<ItemResponse>>, AppError> {
    let filter = payload.into_filter();

    let items = with_deadline(state.request_timeout, state.inventory.read_by(&filter)).await?;

    Ok(Json(items.into_iter().map(ItemResponse::from).collect()))
}

/// Creates a new item.
///
/// # Endpoint
///
/// `POST /api/items`
///
/// Responds 201 with the stored item, including the store-assigned id.
pub async fn create_item_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateItemRequest>,
) -> Result<(StatusCode, Json<ItemResponse>), AppError> {
    payload.validate()?;

    let item = with_deadline(
        state.request_timeout,
        state.inventory.create(payload.into_new_item()),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(ItemResponse::from(item))))
}

/// Overwrites all mutable fields of the item with the given id.
///
/// # Endpoint
///
/// `PUT /api/items/{id}`
///
/// # Errors
///
/// Returns 404 if the id does not exist; an update matching zero rows never
/// silently succeeds.
pub async fn update_item_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateItemRequest>,
) -> Result<Json<ItemResponse>, AppError> {
    payload.validate()?;

    let item = payload.into_item(id);
    let updated = with_deadline(state.request_timeout, state.inventory.update(&item)).await?;

    Ok(Json(ItemResponse::from(updated)))
}

/// Deletes the item with the given id.
///
/// # Endpoint
///
/// `DELETE /api/items/{id}`
///
/// # Errors
///
/// Returns 404 if the id does not exist, including a repeated delete.
pub async fn delete_item_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    with_deadline(state.request_timeout, state.inventory.delete(id)).await?;

    Ok(StatusCode::NO_CONTENT)
}
