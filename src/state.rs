//! Shared application state injected into handlers.

use std::sync::Arc;
use std::time::Duration;

use crate::application::services::InventoryService;

/// State shared by all request handlers.
///
/// Holds the inventory service (repository + cache), the JWT secret for the
/// auth middleware, and the per-request deadline applied around every
/// service call.
#[derive(Clone)]
pub struct AppState {
    pub inventory: Arc<InventoryService>,
    pub jwt_secret: Arc<str>,
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(
        inventory: Arc<InventoryService>,
        jwt_secret: impl Into<Arc<str>>,
        request_timeout: Duration,
    ) -> Self {
        Self {
            inventory,
            jwt_secret: jwt_secret.into(),
            request_timeout,
        }
    }
}
