use std::sync::Arc;
use std::time::Instant;

use tokio::time::Duration;

use crate::cache::{cache_key, CacheStats, InfoCache, MemoryCache};
use crate::core::{extract_package_id, ResolveResponse, ResolveSource};
use crate::error::{GameInfoError, Result};
use crate::normalize::{fallback_info, normalize};
use crate::providers::StoreProvider;
use crate::retry::{RetryPolicy, BACKOFF_UNIT, MAX_ATTEMPTS, RATE_LIMIT_BACKOFF_UNIT};
use crate::throttle::{ThrottleGate, REQUEST_DELAY};

/// Cache entries younger than this are served without a network call
pub const FRESHNESS_WINDOW: Duration = Duration::from_secs(3600);

/// Resolver configuration
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Cache freshness window
    pub freshness_window: Duration,
    /// Minimum spacing between outbound store calls
    pub request_delay: Duration,
    /// Fetch attempts per lookup
    pub max_attempts: u32,
    /// Store country used when a request does not specify one
    pub default_country: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            freshness_window: FRESHNESS_WINDOW,
            request_delay: REQUEST_DELAY,
            max_attempts: MAX_ATTEMPTS,
            default_country: "tr".to_string(),
        }
    }
}

/// One game-info lookup request
#[derive(Debug, Clone)]
pub struct ResolveRequest {
    /// Store page URL containing the package id
    pub url: String,
    /// Store country code; falls back to the configured default
    pub country: Option<String>,
    /// Bypass the freshness check and always fetch live data
    pub force_refresh: bool,
}

impl ResolveRequest {
    /// Lookup with default country and no forced refresh
    pub fn for_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            country: None,
            force_refresh: false,
        }
    }
}

/// Main game-info resolver orchestrator.
///
/// Owns the cache and throttle state explicitly; one shared instance per
/// process gives the process-wide cache and spacing semantics. Each call
/// runs cache check → throttled, retried fetch → normalize-and-store,
/// degrading to a synthesized record when every attempt failed for
/// non-rate-limit reasons.
pub struct GameInfoResolver {
    provider: Arc<dyn StoreProvider>,
    cache: Arc<dyn InfoCache>,
    throttle: ThrottleGate,
    retry: RetryPolicy,
    config: ResolverConfig,
}

impl GameInfoResolver {
    /// Create a resolver with a fresh in-memory cache
    pub fn new(provider: Arc<dyn StoreProvider>, config: ResolverConfig) -> Self {
        Self::with_cache(provider, Arc::new(MemoryCache::new()), config)
    }

    /// Create a resolver over an injected cache implementation
    pub fn with_cache(
        provider: Arc<dyn StoreProvider>,
        cache: Arc<dyn InfoCache>,
        config: ResolverConfig,
    ) -> Self {
        Self {
            provider,
            cache,
            throttle: ThrottleGate::new(config.request_delay),
            retry: RetryPolicy::new(config.max_attempts, BACKOFF_UNIT, RATE_LIMIT_BACKOFF_UNIT),
            config,
        }
    }

    /// Resolve game metadata for a store URL.
    ///
    /// Errors: [`GameInfoError::InvalidStoreUrl`] before any network call,
    /// [`GameInfoError::RateLimited`] when the store kept rate-limiting
    /// across all attempts. Any other fetch failure degrades to a fallback
    /// payload rather than an error.
    pub async fn resolve(&self, request: &ResolveRequest) -> Result<ResolveResponse> {
        let start = Instant::now();

        let package_id = extract_package_id(&request.url)?.to_string();
        let country = request
            .country
            .as_deref()
            .unwrap_or(&self.config.default_country);
        let key = cache_key(&package_id, country);

        if request.force_refresh {
            tracing::debug!("Cache bypass forced for {}", key);
        } else if let Some(entry) = self.cache.get(&key).await? {
            if entry.fetched_at.elapsed() < self.config.freshness_window {
                tracing::debug!("Serving {} from cache", key);
                self.cache.increment_hit(&key).await?;

                // Cached payloads keep the caller's URL, not the one they
                // were originally fetched under
                let mut info = entry.info;
                info.store_url = request.url.clone();

                return Ok(ResolveResponse::new(
                    info,
                    ResolveSource::CacheHit,
                    latency_ms(start),
                ));
            }
        }

        tracing::info!("Fetching app {} for country {}", package_id, country);

        let fetched = self
            .retry
            .run(&self.throttle, || {
                self.provider.fetch_app(&package_id, country)
            })
            .await;

        match fetched {
            Ok(raw) => {
                let info = normalize(&raw, &request.url);
                self.cache.insert(&key, &info).await?;

                Ok(ResolveResponse::new(
                    info,
                    ResolveSource::Fetched,
                    latency_ms(start),
                ))
            }
            Err(err) if err.is_rate_limit() => {
                tracing::warn!("Store rate limit for {}: {}", package_id, err);
                Err(err)
            }
            Err(GameInfoError::FetchExhausted { attempts, last_error }) => {
                tracing::warn!(
                    "All {} attempts failed for {} ({}), returning fallback record",
                    attempts,
                    package_id,
                    last_error
                );

                Ok(ResolveResponse::new(
                    fallback_info(&package_id, &request.url),
                    ResolveSource::Fallback,
                    latency_ms(start),
                ))
            }
            Err(err) => Err(err),
        }
    }

    /// Get cache statistics
    pub async fn cache_stats(&self) -> Result<CacheStats> {
        self.cache.stats().await
    }
}

fn latency_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}
