use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::future::Cache;
use moka::Expiry;
use tracing::trace;

use crate::cache::{DataCache, DEFAULT_CAPACITY, DEFAULT_EXPIRY};

#[derive(Clone)]
struct CacheItem<V> {
    data: V,
    expires_in: Duration
}

struct PerEntryExpiry;

impl<V> Expiry<String, CacheItem<V>> for PerEntryExpiry {
    fn expire_after_create(&self, _key: &String, value: &CacheItem<V>, _created_at: Instant) -> Option<Duration> {
        Some(value.expires_in)
    }

    fn expire_after_update(&self, _key: &String, value: &CacheItem<V>, _updated_at: Instant, _duration_until_expiry: Option<Duration>) -> Option<Duration> {
        Some(value.expires_in)
    }
}

/// `DataCache` over a bounded moka cache. Every entry carries its own time to live.
pub struct ExpiringCache<V>
where
    V: Clone + Send + Sync + 'static
{
    inner: Cache<String, CacheItem<V>>,
    default_expiry: Duration
}

impl<V> ExpiringCache<V>
where
    V: Clone + Send + Sync + 'static
{
    pub fn new() -> Self {
        Self::with_settings(DEFAULT_CAPACITY, DEFAULT_EXPIRY)
    }

    pub fn with_settings(capacity: u64, default_expiry: Duration) -> Self {
        let inner = Cache::builder()
            .max_capacity(capacity)
            .expire_after(PerEntryExpiry)
            .build();

        Self { inner, default_expiry }
    }
}

impl<V> Default for ExpiringCache<V>
where
    V: Clone + Send + Sync + 'static
{
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<V> DataCache<V> for ExpiringCache<V>
where
    V: Clone + Send + Sync + 'static
{
    async fn get(&self, key: &str) -> Option<V> {
        let item = self.inner.get(key).await;
        trace!("Cache {} for [{key}]", if item.is_some() { "hit" } else { "miss" });

        item.map(|item| item.data)
    }

    async fn set(&self, key: String, value: V, expires_in: Option<Duration>) {
        let item = CacheItem {
            data: value,
            expires_in: expires_in.unwrap_or(self.default_expiry)
        };

        self.inner.insert(key, item).await;
    }

    async fn invalidate(&self, key: &str) {
        self.inner.invalidate(key).await;
    }

    fn clear(&self) {
        self.inner.invalidate_all();
    }
}
