//! No-op cache implementation for testing or disabled caching.

use super::service::{CacheResult, ItemCache};
use crate::domain::entities::Item;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// A cache implementation that does nothing.
///
/// Every read is a miss, every write succeeds without storing anything.
/// Used when Redis is unavailable or caching is explicitly disabled; the
/// service then behaves as a plain pass-through to the repository.
pub struct NullCache;

impl NullCache {
    /// Creates a new NullCache instance.
    pub fn new() -> Self {
        debug!("Using NullCache (caching disabled)");
        Self
    }
}

impl Default for NullCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ItemCache for NullCache {
    async fn get(&self, _key: &str) -> CacheResult<Option<Item>> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _item: &Item, _ttl: Duration) -> CacheResult<()> {
        Ok(())
    }

    async fn delete(&self, _key: &str) -> CacheResult<bool> {
        Ok(false)
    }

    async fn ping(&self) -> bool {
        true
    }
}
