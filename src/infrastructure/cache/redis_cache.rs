//! Redis-backed cache implementation.

use super::service::{CacheError, CacheResult, ItemCache};
use crate::domain::entities::Item;
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use std::time::Duration;
use tracing::{debug, info};

/// Redis cache for inventory items.
///
/// Uses `ConnectionManager` for connection reuse. Values are stored as JSON
/// blobs under `item:<uuid>` keys with a per-entry TTL.
pub struct RedisCache {
    client: ConnectionManager,
    key_prefix: String,
}

impl RedisCache {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Connection`] if the URL is invalid, the
    /// connection cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str) -> CacheResult<Self> {
        info!("Connecting to Redis");

        let client = Client::open(redis_url)
            .map_err(|e| CacheError::Connection(format!("Failed to create Redis client: {e}")))?;

        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| CacheError::Connection(format!("Failed to connect to Redis: {e}")))?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CacheError::Connection(format!("Redis PING failed: {e}")))?;

        info!("Connected to Redis");

        Ok(Self {
            client: manager,
            key_prefix: "item:".to_string(),
        })
    }

    /// Constructs the full Redis key with namespace prefix.
    fn build_key(&self, key: &str) -> String {
        format!("{}{}", self.key_prefix, key)
    }
}

#[async_trait]
impl ItemCache for RedisCache {
    async fn get(&self, key: &str) -> CacheResult<Option<Item>> {
        let full_key = self.build_key(key);
        let mut conn = self.client.clone();

        let blob: Option<Vec<u8>> = conn
            .get(&full_key)
            .await
            .map_err(|e| CacheError::Operation(format!("GET {key}: {e}")))?;

        match blob {
            Some(bytes) => {
                let item: Item = serde_json::from_slice(&bytes)
                    .map_err(|e| CacheError::Codec(format!("decode {key}: {e}")))?;
                debug!("Cache HIT: {key}");
                Ok(Some(item))
            }
            None => {
                debug!("Cache MISS: {key}");
                Ok(None)
            }
        }
    }

    async fn set(&self, key: &str, item: &Item, ttl: Duration) -> CacheResult<()> {
        let full_key = self.build_key(key);
        let mut conn = self.client.clone();

        let blob = serde_json::to_vec(item)
            .map_err(|e| CacheError::Codec(format!("encode {key}: {e}")))?;

        conn.set_ex::<_, _, ()>(&full_key, blob, ttl.as_secs())
            .await
            .map_err(|e| CacheError::Operation(format!("SET {key}: {e}")))?;

        debug!("Cache SET: {key} (TTL: {}s)", ttl.as_secs());
        Ok(())
    }

    async fn delete(&self, key: &str) -> CacheResult<bool> {
        let full_key = self.build_key(key);
        let mut conn = self.client.clone();

        let deleted: i64 = conn
            .del(&full_key)
            .await
            .map_err(|e| CacheError::Operation(format!("DEL {key}: {e}")))?;

        if deleted > 0 {
            debug!("Cache DEL: {key}");
        }

        Ok(deleted > 0)
    }

    async fn ping(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}
