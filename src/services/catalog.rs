use moka::future::{Cache, CacheBuilder};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::models::Place;
use crate::services::store::{PlaceStore, StoreError};

const ALL_PLACES_KEY: &str = "places:all";

/// Places catalog with an in-memory read cache
///
/// Reads of the full catalog are served from a short-lived moka cache.
/// Every write through the catalog drops the cached listing so the next read
/// sees it. A TTL of zero disables caching.
///
/// `generation` is bumped on every invalidation. A fill whose store read
/// started before the latest invalidation is returned but not cached.
pub struct Catalog {
    store: Arc<dyn PlaceStore>,
    cache: Option<Cache<String, Arc<Vec<Place>>>>,
    generation: AtomicU64,
}

impl Catalog {
    pub fn new(store: Arc<dyn PlaceStore>, ttl_secs: u64, max_entries: u64) -> Self {
        let cache = (ttl_secs > 0).then(|| {
            CacheBuilder::new(max_entries.max(1))
                .time_to_live(Duration::from_secs(ttl_secs))
                .build()
        });

        Self {
            store,
            cache,
            generation: AtomicU64::new(0),
        }
    }

    /// Catalog without a cache in front of the store
    pub fn uncached(store: Arc<dyn PlaceStore>) -> Self {
        Self {
            store,
            cache: None,
            generation: AtomicU64::new(0),
        }
    }

    pub fn store(&self) -> &Arc<dyn PlaceStore> {
        &self.store
    }

    /// Every place, in store order
    pub async fn all_places(&self) -> Result<Arc<Vec<Place>>, StoreError> {
        let Some(cache) = &self.cache else {
            return Ok(Arc::new(self.store.find_all().await?));
        };

        if let Some(places) = cache.get(ALL_PLACES_KEY).await {
            tracing::trace!("Catalog cache hit");
            return Ok(places);
        }

        let generation = self.generation.load(Ordering::Acquire);
        let places = Arc::new(self.store.find_all().await?);

        if self.generation.load(Ordering::Acquire) != generation {
            tracing::debug!("Catalog changed during read, not caching listing");
            return Ok(places);
        }

        cache
            .insert(ALL_PLACES_KEY.to_string(), Arc::clone(&places))
            .await;

        // An invalidation may have landed between the check and the insert
        if self.generation.load(Ordering::Acquire) != generation {
            cache.invalidate(ALL_PLACES_KEY).await;
        }

        tracing::debug!("Catalog cache filled with {} places", places.len());
        Ok(places)
    }

    pub async fn get(&self, id: &str) -> Result<Option<Place>, StoreError> {
        self.store.find_by_id(id).await
    }

    pub async fn create(&self, place: Place) -> Result<Place, StoreError> {
        let created = self.store.insert(place).await?;
        self.invalidate().await;
        Ok(created)
    }

    pub async fn update(&self, id: &str, place: Place) -> Result<Option<Place>, StoreError> {
        let updated = self.store.update_by_id(id, place).await?;
        if updated.is_some() {
            self.invalidate().await;
        }
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let deleted = self.store.delete_by_id(id).await?;
        if deleted {
            self.invalidate().await;
        }
        Ok(deleted)
    }

    /// Drop the cached listing
    pub async fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
        if let Some(cache) = &self.cache {
            cache.invalidate(ALL_PLACES_KEY).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::memory::MemoryStore;
    use async_trait::async_trait;
    use tokio::sync::Notify;

    /// Store whose next `find_all` pauses after reading until released
    struct GatedStore {
        inner: MemoryStore,
        paused: Notify,
        release: Notify,
        gate_armed: std::sync::atomic::AtomicBool,
    }

    #[async_trait]
    impl PlaceStore for GatedStore {
        async fn find_all(&self) -> Result<Vec<Place>, StoreError> {
            let places = self.inner.find_all().await?;
            if self.gate_armed.swap(false, Ordering::SeqCst) {
                self.paused.notify_one();
                self.release.notified().await;
            }
            Ok(places)
        }

        async fn find_by_id(&self, id: &str) -> Result<Option<Place>, StoreError> {
            self.inner.find_by_id(id).await
        }

        async fn insert(&self, place: Place) -> Result<Place, StoreError> {
            self.inner.insert(place).await
        }

        async fn update_by_id(&self, id: &str, place: Place) -> Result<Option<Place>, StoreError> {
            self.inner.update_by_id(id, place).await
        }

        async fn delete_by_id(&self, id: &str) -> Result<bool, StoreError> {
            self.inner.delete_by_id(id).await
        }
    }

    #[tokio::test]
    async fn test_write_during_fill_is_not_hidden() {
        let store = Arc::new(GatedStore {
            inner: MemoryStore::new(),
            paused: Notify::new(),
            release: Notify::new(),
            gate_armed: std::sync::atomic::AtomicBool::new(true),
        });
        let catalog = Arc::new(Catalog::new(store.clone(), 60, 16));

        let reader = {
            let catalog = Arc::clone(&catalog);
            tokio::spawn(async move { catalog.all_places().await })
        };

        // Reader holds a snapshot of the empty store
        store.paused.notified().await;
        catalog.create(Place::new("Golden Bay", "beach")).await.unwrap();
        store.release.notify_one();

        let stale = reader.await.unwrap().unwrap();
        assert!(stale.is_empty());

        let listing = catalog.all_places().await.unwrap();
        assert_eq!(listing.len(), 1);
        assert_eq!(listing[0].name, "Golden Bay");
    }

    #[tokio::test]
    async fn test_cached_listing_refreshed_after_write() {
        let store: Arc<dyn PlaceStore> = Arc::new(MemoryStore::new());
        let catalog = Catalog::new(Arc::clone(&store), 60, 16);

        assert!(catalog.all_places().await.unwrap().is_empty());

        // Writes behind the catalog's back stay invisible until invalidation
        store.insert(Place::new("Hidden", "beach")).await.unwrap();
        assert!(catalog.all_places().await.unwrap().is_empty());

        catalog.create(Place::new("Golden Bay", "beach")).await.unwrap();
        assert_eq!(catalog.all_places().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_zero_ttl_disables_cache() {
        let store: Arc<dyn PlaceStore> = Arc::new(MemoryStore::new());
        let catalog = Catalog::new(Arc::clone(&store), 0, 16);

        assert!(catalog.all_places().await.unwrap().is_empty());
        store.insert(Place::new("Mdina", "culture")).await.unwrap();
        assert_eq!(catalog.all_places().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_missing_place() {
        let catalog = Catalog::uncached(Arc::new(MemoryStore::new()));
        assert!(!catalog.delete("missing").await.unwrap());
    }
}
