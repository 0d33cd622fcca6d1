use serde::{Deserialize, Serialize};
use crate::core::GameInfo;

/// How the resolver produced its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolveSource {
    /// Served from the in-memory cache without a network call
    CacheHit,
    /// Fetched live from the store provider
    Fetched,
    /// Synthesized after all fetch attempts failed
    Fallback,
}

/// Resolver result with the payload and resolution metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveResponse {
    /// The normalized game metadata
    pub info: GameInfo,

    /// Where the payload came from
    pub source: ResolveSource,

    /// Whether the payload was served from cache
    pub from_cache: bool,

    /// Resolution latency in milliseconds
    pub latency_ms: f64,
}

impl ResolveResponse {
    /// Create a new resolve response
    pub fn new(info: GameInfo, source: ResolveSource, latency_ms: f64) -> Self {
        Self {
            info,
            from_cache: source == ResolveSource::CacheHit,
            source,
            latency_ms,
        }
    }

    /// Whether the payload is live data rather than a synthesized record
    pub fn is_live(&self) -> bool {
        self.source != ResolveSource::Fallback
    }

    /// Get display string for logging
    pub fn display(&self) -> String {
        format!(
            "{} - {} ({:?}, {:.2}ms)",
            self.info.title, self.info.price, self.source, self.latency_ms
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_response_creation() {
        let info = GameInfo::new("CS2", "icon", "url");
        let response = ResolveResponse::new(info, ResolveSource::Fetched, 12.3);

        assert_eq!(response.source, ResolveSource::Fetched);
        assert!(!response.from_cache);
        assert!(response.is_live());
    }

    #[test]
    fn test_cache_hit_sets_from_cache() {
        let info = GameInfo::new("CS2", "icon", "url");
        let response = ResolveResponse::new(info, ResolveSource::CacheHit, 0.1);

        assert!(response.from_cache);
        assert!(response.is_live());
    }

    #[test]
    fn test_fallback_is_not_live() {
        let info = GameInfo::new("CS2", "icon", "url");
        let response = ResolveResponse::new(info, ResolveSource::Fallback, 1.0);

        assert!(!response.is_live());
    }
}
