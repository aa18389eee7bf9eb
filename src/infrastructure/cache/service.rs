//! Cache service trait and error types.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

use crate::domain::entities::Item;

/// Errors that can occur during cache operations.
///
/// Deliberately separate from [`crate::error::AppError`]: a cache failure
/// never blocks a store-confirmed mutation. Callers log these on the write
/// path and treat them as misses on the read path.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    Connection(String),
    #[error("Cache operation error: {0}")]
    Operation(String),
    #[error("Cache codec error: {0}")]
    Codec(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Trait for caching inventory items keyed by the item id's string form.
///
/// The cached blob is the item serialized as JSON; encode/decode must
/// round-trip every field including timestamp precision. The store remains
/// the single source of truth; cached copies are short-lived and may be
/// stale within their TTL.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemCache: Send + Sync {
    /// Retrieves a cached item.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(item))` on a hit, deserialized back into the exact shape
    ///   that was stored
    /// - `Ok(None)` on a miss
    ///
    /// # Errors
    ///
    /// Connection and decode failures are returned so the caller can see
    /// them; the caller decides to fall back to the repository.
    async fn get(&self, key: &str) -> CacheResult<Option<Item>>;

    /// Stores an item under `key` with an explicit expiration, overwriting
    /// any existing entry.
    ///
    /// # Errors
    ///
    /// Failures must not abort a write path that already succeeded against
    /// the store; callers log and continue.
    async fn set(&self, key: &str, item: &Item, ttl: Duration) -> CacheResult<()>;

    /// Removes the entry for `key`, reporting whether it existed.
    /// Deleting an absent key is not an error.
    async fn delete(&self, key: &str) -> CacheResult<bool>;

    /// Liveness probe independent of any key. Used for health reporting.
    async fn ping(&self) -> bool;
}
