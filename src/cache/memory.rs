use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use tokio::time::Instant;

use crate::cache::{CacheStats, CachedEntry, InfoCache};
use crate::core::GameInfo;
use crate::error::{GameInfoError, Result};

/// In-memory game-info cache.
///
/// Entries live for the process lifetime; they are superseded by
/// [`InfoCache::insert`] but never evicted. The map is shared across the
/// runtime's worker threads, so access goes through a mutex with lock
/// scopes that never cross an await.
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, CachedEntry>>,
}

impl MemoryCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, CachedEntry>>> {
        self.entries
            .lock()
            .map_err(|_| GameInfoError::Cache("cache mutex poisoned".to_string()))
    }
}

#[async_trait]
impl InfoCache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<CachedEntry>> {
        Ok(self.lock()?.get(key).cloned())
    }

    async fn insert(&self, key: &str, info: &GameInfo) -> Result<()> {
        let mut entries = self.lock()?;
        let hit_count = entries.get(key).map(|e| e.hit_count).unwrap_or(0);

        entries.insert(
            key.to_string(),
            CachedEntry {
                info: info.clone(),
                fetched_at: Instant::now(),
                cached_at: Utc::now(),
                hit_count,
            },
        );

        Ok(())
    }

    async fn increment_hit(&self, key: &str) -> Result<()> {
        if let Some(entry) = self.lock()?.get_mut(key) {
            entry.hit_count += 1;
        }
        Ok(())
    }

    async fn stats(&self) -> Result<CacheStats> {
        let entries = self.lock()?;

        let total_entries = entries.len() as u64;
        let total_hits: u64 = entries.values().map(|e| e.hit_count).sum();
        let avg_hit_count = if total_entries > 0 {
            total_hits as f64 / total_entries as f64
        } else {
            0.0
        };

        Ok(CacheStats {
            total_entries,
            total_hits,
            avg_hit_count,
            oldest_entry: entries.values().map(|e| e.cached_at).min(),
            newest_entry: entries.values().map(|e| e.cached_at).max(),
        })
    }
}
