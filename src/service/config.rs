use std::time::Duration;

use crate::cache::{DEFAULT_CAPACITY, DEFAULT_EXPIRY};

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// How long a scope's transaction list stays cached.
    pub transactions_ttl: Duration,
    pub cache_capacity: u64,
    pub default_expiry: Duration,
    /// Channel bound between the CSV reader and the importer.
    pub import_backpressure: usize
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            transactions_ttl: Duration::from_secs(2 * 60),
            cache_capacity: DEFAULT_CAPACITY,
            default_expiry: DEFAULT_EXPIRY,
            import_backpressure: 256
        }
    }
}
