//! API route configuration.
//!
//! All item endpoints require Bearer token authentication via
//! [`crate::api::middleware::auth`].

use crate::api::handlers::{
    create_item_handler, delete_item_handler, filter_items_handler, list_items_handler,
    read_item_handler, update_item_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All item routes, protected by Bearer token authentication.
///
/// # Endpoints
///
/// - `GET    /items`        - Read all items
/// - `POST   /items`        - Create an item
/// - `POST   /items/filter` - Filtered read
/// - `GET    /items/{id}`   - Read one item (cache-aside)
/// - `PUT    /items/{id}`   - Full update (cache refresh)
/// - `DELETE /items/{id}`   - Delete (cache invalidation)
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/items", get(list_items_handler).post(create_item_handler))
        .route("/items/filter", post(filter_items_handler))
        .route(
            "/items/{id}",
            get(read_item_handler)
                .put(update_item_handler)
                .delete(delete_item_handler),
        )
}
