pub mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::time::Instant;

use crate::core::GameInfo;
use crate::error::Result;

pub use memory::MemoryCache;

/// Build the internal cache key for a (package id, country) pair
pub fn cache_key(package_id: &str, country: &str) -> String {
    format!("{}_{}", package_id, country)
}

/// Trait for game-info cache implementations
#[async_trait]
pub trait InfoCache: Send + Sync {
    /// Get the cached entry for a key, regardless of age
    async fn get(&self, key: &str) -> Result<Option<CachedEntry>>;

    /// Store game info under a key, overwriting any existing entry
    async fn insert(&self, key: &str, info: &GameInfo) -> Result<()>;

    /// Increment cache hit counter
    async fn increment_hit(&self, key: &str) -> Result<()>;

    /// Get cache statistics
    async fn stats(&self) -> Result<CacheStats>;
}

/// Cached game info with bookkeeping metadata.
///
/// `fetched_at` drives the freshness check; `cached_at` and `hit_count`
/// only feed the stats surface.
#[derive(Debug, Clone)]
pub struct CachedEntry {
    pub info: GameInfo,
    pub fetched_at: Instant,
    pub cached_at: DateTime<Utc>,
    pub hit_count: u64,
}

/// Cache statistics
#[derive(Debug, Clone)]
pub struct CacheStats {
    pub total_entries: u64,
    pub total_hits: u64,
    pub avg_hit_count: f64,
    pub oldest_entry: Option<DateTime<Utc>>,
    pub newest_entry: Option<DateTime<Utc>>,
}
