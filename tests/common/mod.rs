#![allow(dead_code)]

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use inventory_service::application::services::InventoryService;
use inventory_service::infrastructure::cache::NullCache;
use inventory_service::infrastructure::persistence::PgItemRepository;
use inventory_service::state::AppState;

pub const TEST_JWT_SECRET: &str = "test-signing-secret";

/// Fixed expiry with microsecond precision, matching what timestamptz can
/// store, so round-trip equality assertions hold.
pub fn sample_expiry() -> DateTime<Utc> {
    "2026-09-01T12:00:00.123456Z".parse().unwrap()
}

pub async fn insert_test_item(pool: &PgPool, name: &str, unit: &str, amount: f64) -> Uuid {
    sqlx::query_scalar(
        "INSERT INTO inventory (name, unit, amount, expires_at) \
         VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(name)
    .bind(unit)
    .bind(amount)
    .bind(sample_expiry())
    .fetch_one(pool)
    .await
    .unwrap()
}

pub fn create_test_state(pool: PgPool) -> AppState {
    let repository = Arc::new(PgItemRepository::new(Arc::new(pool)));
    let inventory = Arc::new(InventoryService::new(
        repository,
        Arc::new(NullCache),
        Duration::from_secs(60),
    ));

    AppState::new(inventory, TEST_JWT_SECRET, Duration::from_secs(5))
}
