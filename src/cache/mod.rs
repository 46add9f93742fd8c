mod expiring_cache;

use std::time::Duration;

use async_trait::async_trait;

pub use expiring_cache::ExpiringCache;

pub const DEFAULT_EXPIRY: Duration = Duration::from_secs(5 * 60);
pub const DEFAULT_CAPACITY: u64 = 1024;

/// Key/value cache with per-entry expiry, injected into services that read
/// from the remote store. An expired entry reads as absent.
#[async_trait]
pub trait DataCache<V>: Send + Sync + 'static
where
    V: Clone + Send + Sync + 'static
{
    async fn get(&self, key: &str) -> Option<V>;
    /// Stores `value` for `expires_in`, or the cache default when `None`.
    async fn set(&self, key: String, value: V, expires_in: Option<Duration>);
    async fn invalidate(&self, key: &str);
    fn clear(&self);
}
