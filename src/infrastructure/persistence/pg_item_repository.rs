//! PostgreSQL implementation of the item repository.

use async_trait::async_trait;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{Item, ItemFilter, NewItem};
use crate::domain::repositories::ItemRepository;
use crate::error::AppError;
use crate::infrastructure::persistence::query_builder::{FilterArg, build_filter_query};

/// PostgreSQL repository for inventory items.
///
/// Mutating operations run inside an explicit transaction. sqlx rolls an
/// uncommitted transaction back when it is dropped, so every early-return
/// path (including a failed commit) resolves the transaction.
pub struct PgItemRepository {
    pool: Arc<PgPool>,
}

impl PgItemRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ItemRepository for PgItemRepository {
    async fn create(&self, new_item: NewItem) -> Result<Item, AppError> {
        let mut tx = self.pool.begin().await?;

        let id: Uuid = sqlx::query_scalar(
            "INSERT INTO inventory (name, unit, amount, expires_at) \
             VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(&new_item.name)
        .bind(&new_item.unit)
        .bind(new_item.amount)
        .bind(new_item.expires_at)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Item::from_new(id, new_item))
    }

    async fn read(&self, id: Uuid) -> Result<Item, AppError> {
        let item = sqlx::query_as::<_, Item>("SELECT * FROM inventory WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        item.ok_or_else(|| AppError::not_found("Item not found", json!({ "id": id })))
    }

    async fn read_all(&self) -> Result<Vec<Item>, AppError> {
        let items = sqlx::query_as::<_, Item>("SELECT * FROM inventory")
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(items)
    }

    async fn read_by(&self, filter: &ItemFilter) -> Result<Vec<Item>, AppError> {
        let filter_query = build_filter_query(filter);

        if filter_query.is_empty() {
            return Err(AppError::invalid_argument(
                "Filter must set at least one field",
                json!({}),
            ));
        }

        let mut query = sqlx::query_as::<_, Item>(&filter_query.sql);
        for arg in &filter_query.args {
            query = match arg {
                FilterArg::Text(v) => query.bind(v.clone()),
                FilterArg::Float(v) => query.bind(*v),
                FilterArg::Timestamp(v) => query.bind(*v),
            };
        }

        let items = query.fetch_all(self.pool.as_ref()).await?;

        Ok(items)
    }

    async fn update(&self, item: &Item) -> Result<Item, AppError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "UPDATE inventory SET name = $1, unit = $2, amount = $3, expires_at = $4 \
             WHERE id = $5",
        )
        .bind(&item.name)
        .bind(&item.unit)
        .bind(item.amount)
        .bind(item.expires_at)
        .bind(item.id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                "Item not found",
                json!({ "id": item.id }),
            ));
        }

        tx.commit().await?;

        // The caller-supplied item is the post-update state; returning it
        // lets the cache layer re-cache without a second round trip.
        Ok(item.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM inventory WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Item not found", json!({ "id": id })));
        }

        tx.commit().await?;

        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }
}
