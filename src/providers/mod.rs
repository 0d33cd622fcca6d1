pub mod scraper_api;

use async_trait::async_trait;

use crate::core::RawAppData;
use crate::error::Result;

pub use scraper_api::ScraperApiProvider;

/// Trait for store-metadata providers.
///
/// The store's page contract is deliberately opaque here: implementations
/// only promise raw app fields or an error whose message carries a `429`
/// marker when the target rate-limits the caller.
#[async_trait]
pub trait StoreProvider: Send + Sync {
    /// Fetch raw app metadata for a package id in a store country
    async fn fetch_app(&self, package_id: &str, country: &str) -> Result<RawAppData>;

    /// Get provider name
    fn name(&self) -> &str;

    /// Check if provider is available
    async fn is_available(&self) -> bool;
}
