//! Cache-aside orchestration over the item repository.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::entities::{Item, ItemFilter, NewItem};
use crate::domain::repositories::ItemRepository;
use crate::error::AppError;
use crate::infrastructure::cache::ItemCache;

/// Service composing the repository (authoritative) with the cache
/// (acceleration only).
///
/// Ordering policy:
/// - create: the item is cached only after the store has confirmed the id
/// - update: the cache entry is refreshed with the post-update item rather
///   than invalidated, so a stale copy is never left behind to be lazily
///   repopulated
/// - delete: the cache entry is removed after the store confirms deletion
///
/// No code path trusts a cached value to decide a business outcome; the
/// cache only shortcuts subsequent reads. Cache failures on the write path
/// are logged and swallowed.
pub struct InventoryService {
    repository: Arc<dyn ItemRepository>,
    cache: Arc<dyn ItemCache>,
    cache_ttl: Duration,
}

impl InventoryService {
    /// Creates a new service. `cache_ttl` bounds the staleness window of
    /// cached copies.
    pub fn new(
        repository: Arc<dyn ItemRepository>,
        cache: Arc<dyn ItemCache>,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            repository,
            cache,
            cache_ttl,
        }
    }

    /// Creates an item and caches it once the store has assigned the id.
    pub async fn create(&self, new_item: NewItem) -> Result<Item, AppError> {
        let item = self.repository.create(new_item).await?;
        self.refresh_cache(&item).await;
        Ok(item)
    }

    /// Reads an item, serving from the cache when possible.
    ///
    /// A cache error is treated as a miss: the read falls through to the
    /// repository and repopulates the cache best-effort.
    pub async fn read(&self, id: Uuid) -> Result<Item, AppError> {
        let key = id.to_string();

        match self.cache.get(&key).await {
            Ok(Some(item)) => {
                return Ok(item);
            }
            Ok(None) => {}
            Err(e) => warn!("Cache read failed for {key}: {e}"),
        }

        let item = self.repository.read(id).await?;
        self.refresh_cache(&item).await;

        Ok(item)
    }

    /// Returns all items. Unfiltered reads bypass the cache.
    pub async fn read_all(&self) -> Result<Vec<Item>, AppError> {
        self.repository.read_all().await
    }

    /// Returns items matching the filter. Filtered reads bypass the cache;
    /// the empty filter is rejected by the repository with
    /// [`AppError::InvalidArgument`].
    pub async fn read_by(&self, filter: &ItemFilter) -> Result<Vec<Item>, AppError> {
        self.repository.read_by(filter).await
    }

    /// Updates an item and refreshes its cache entry with the new state.
    pub async fn update(&self, item: &Item) -> Result<Item, AppError> {
        let updated = self.repository.update(item).await?;
        self.refresh_cache(&updated).await;
        Ok(updated)
    }

    /// Deletes an item, then removes its cache entry best-effort.
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repository.delete(id).await?;

        let key = id.to_string();
        match self.cache.delete(&key).await {
            Ok(existed) => {
                if !existed {
                    debug!("Cache entry for {key} was already absent");
                }
            }
            Err(e) => warn!("Cache invalidation failed for {key}: {e}"),
        }

        Ok(())
    }

    /// Store liveness, for health reporting.
    pub async fn ping_store(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }

    /// Cache liveness, for health reporting.
    pub async fn ping_cache(&self) -> bool {
        self.cache.ping().await
    }

    async fn refresh_cache(&self, item: &Item) {
        let key = item.cache_key();
        if let Err(e) = self.cache.set(&key, item, self.cache_ttl).await {
            warn!("Cache refresh failed for {key}: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockItemRepository;
    use crate::infrastructure::cache::{CacheError, MockItemCache};
    use chrono::Utc;
    use mockall::predicate::eq;
    use serde_json::json;

    const TTL: Duration = Duration::from_secs(3600);

    fn sample_item() -> Item {
        Item {
            id: Uuid::new_v4(),
            name: "rice".to_string(),
            unit: "kg".to_string(),
            amount: 2.0,
            expires_at: Utc::now(),
        }
    }

    fn sample_new_item() -> NewItem {
        NewItem {
            name: "rice".to_string(),
            unit: "kg".to_string(),
            amount: 2.0,
            expires_at: Utc::now(),
        }
    }

    fn service(repo: MockItemRepository, cache: MockItemCache) -> InventoryService {
        InventoryService::new(Arc::new(repo), Arc::new(cache), TTL)
    }

    #[tokio::test]
    async fn test_create_caches_after_store_confirms_id() {
        let item = sample_item();
        let key = item.id.to_string();

        let mut repo = MockItemRepository::new();
        let created = item.clone();
        repo.expect_create()
            .times(1)
            .returning(move |_| Ok(created.clone()));

        let mut cache = MockItemCache::new();
        let expected = item.clone();
        cache
            .expect_set()
            .withf(move |k, i, ttl| k == key && *i == expected && *ttl == TTL)
            .times(1)
            .returning(|_, _, _| Ok(()));

        let result = service(repo, cache).create(sample_new_item()).await;

        assert_eq!(result.unwrap(), item);
    }

    #[tokio::test]
    async fn test_create_succeeds_when_cache_set_fails() {
        let item = sample_item();

        let mut repo = MockItemRepository::new();
        let created = item.clone();
        repo.expect_create()
            .returning(move |_| Ok(created.clone()));

        let mut cache = MockItemCache::new();
        cache
            .expect_set()
            .returning(|_, _, _| Err(CacheError::Operation("broken pipe".to_string())));

        let result = service(repo, cache).create(sample_new_item()).await;

        assert_eq!(result.unwrap(), item);
    }

    #[tokio::test]
    async fn test_create_does_not_cache_on_store_failure() {
        let mut repo = MockItemRepository::new();
        repo.expect_create()
            .returning(|_| Err(AppError::store("Database error", json!({}))));

        let mut cache = MockItemCache::new();
        cache.expect_set().times(0);

        let result = service(repo, cache).create(sample_new_item()).await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_read_cache_hit_skips_store() {
        let item = sample_item();
        let id = item.id;

        let mut repo = MockItemRepository::new();
        repo.expect_read().times(0);

        let mut cache = MockItemCache::new();
        let cached = item.clone();
        cache
            .expect_get()
            .withf(move |k| k == id.to_string())
            .times(1)
            .returning(move |_| Ok(Some(cached.clone())));

        let result = service(repo, cache).read(id).await;

        assert_eq!(result.unwrap(), item);
    }

    #[tokio::test]
    async fn test_read_cache_miss_falls_back_and_populates() {
        let item = sample_item();
        let id = item.id;

        let mut repo = MockItemRepository::new();
        let stored = item.clone();
        repo.expect_read()
            .with(eq(id))
            .times(1)
            .returning(move |_| Ok(stored.clone()));

        let mut cache = MockItemCache::new();
        cache.expect_get().times(1).returning(|_| Ok(None));
        let expected = item.clone();
        cache
            .expect_set()
            .withf(move |k, i, ttl| k == id.to_string() && *i == expected && *ttl == TTL)
            .times(1)
            .returning(|_, _, _| Ok(()));

        let result = service(repo, cache).read(id).await;

        assert_eq!(result.unwrap(), item);
    }

    #[tokio::test]
    async fn test_read_cache_error_is_treated_as_miss() {
        let item = sample_item();
        let id = item.id;

        let mut repo = MockItemRepository::new();
        let stored = item.clone();
        repo.expect_read()
            .times(1)
            .returning(move |_| Ok(stored.clone()));

        let mut cache = MockItemCache::new();
        cache
            .expect_get()
            .returning(|_| Err(CacheError::Connection("refused".to_string())));
        cache.expect_set().returning(|_, _, _| Ok(()));

        let result = service(repo, cache).read(id).await;

        assert_eq!(result.unwrap(), item);
    }

    #[tokio::test]
    async fn test_read_not_found_propagates() {
        let id = Uuid::new_v4();

        let mut repo = MockItemRepository::new();
        repo.expect_read()
            .returning(|id| Err(AppError::not_found("Item not found", json!({ "id": id }))));

        let mut cache = MockItemCache::new();
        cache.expect_get().returning(|_| Ok(None));
        cache.expect_set().times(0);

        let result = service(repo, cache).read(id).await;

        assert!(result.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_update_refreshes_cache_with_post_update_item() {
        let item = sample_item();

        let mut repo = MockItemRepository::new();
        let updated = item.clone();
        repo.expect_update()
            .times(1)
            .returning(move |_| Ok(updated.clone()));

        let mut cache = MockItemCache::new();
        let expected = item.clone();
        cache
            .expect_set()
            .withf(move |k, i, ttl| {
                k == expected.id.to_string() && *i == expected && *ttl == TTL
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let result = service(repo, cache).update(&item).await;

        assert_eq!(result.unwrap(), item);
    }

    #[tokio::test]
    async fn test_delete_removes_cache_after_store_confirms() {
        let id = Uuid::new_v4();

        let mut repo = MockItemRepository::new();
        repo.expect_delete().with(eq(id)).times(1).returning(|_| Ok(()));

        let mut cache = MockItemCache::new();
        cache
            .expect_delete()
            .withf(move |k| k == id.to_string())
            .times(1)
            .returning(|_| Ok(true));

        let result = service(repo, cache).delete(id).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_delete_tolerates_absent_cache_key() {
        let id = Uuid::new_v4();

        let mut repo = MockItemRepository::new();
        repo.expect_delete().returning(|_| Ok(()));

        let mut cache = MockItemCache::new();
        cache.expect_delete().returning(|_| Ok(false));

        let result = service(repo, cache).delete(id).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_delete_not_found_skips_cache() {
        let id = Uuid::new_v4();

        let mut repo = MockItemRepository::new();
        repo.expect_delete()
            .returning(|id| Err(AppError::not_found("Item not found", json!({ "id": id }))));

        let mut cache = MockItemCache::new();
        cache.expect_delete().times(0);

        let result = service(repo, cache).delete(id).await;

        assert!(result.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_read_by_passes_filter_through() {
        let filter = ItemFilter {
            name: Some("rice".to_string()),
            ..Default::default()
        };

        let mut repo = MockItemRepository::new();
        let expected = filter.clone();
        repo.expect_read_by()
            .withf(move |f| *f == expected)
            .times(1)
            .returning(|_| Ok(vec![]));

        let cache = MockItemCache::new();

        let result = service(repo, cache).read_by(&filter).await;

        assert!(result.unwrap().is_empty());
    }
}
