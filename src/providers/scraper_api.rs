use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::core::RawAppData;
use crate::error::{GameInfoError, Result};
use crate::providers::StoreProvider;

/// HTTP client for a companion store-scraper service.
///
/// The service wraps the actual store scraping and exposes
/// `GET {base}/app?appId=<pkg>&country=<cc>` returning the raw app fields
/// as JSON. A 429 from the service is surfaced with the status in the
/// error message so the retry policy classifies it as rate limiting.
pub struct ScraperApiProvider {
    client: Client,
    base_url: String,
}

impl ScraperApiProvider {
    /// Create a provider against a scraper service base URL
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(GameInfoError::HttpRequest)?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn app_url(&self, package_id: &str, country: &str) -> String {
        format!(
            "{}/app?appId={}&country={}",
            self.base_url, package_id, country
        )
    }
}

#[async_trait]
impl StoreProvider for ScraperApiProvider {
    async fn fetch_app(&self, package_id: &str, country: &str) -> Result<RawAppData> {
        let url = self.app_url(package_id, country);

        let response = self.client.get(&url).send().await.map_err(|e| {
            GameInfoError::Provider {
                provider: "scraper".to_string(),
                message: format!("Request failed: {}", e),
            }
        })?;

        if !response.status().is_success() {
            // Status code stays in the message; "429" is the rate-limit marker
            return Err(GameInfoError::Provider {
                provider: "scraper".to_string(),
                message: format!("HTTP {}", response.status()),
            });
        }

        let data: RawAppData = response.json().await.map_err(|e| {
            GameInfoError::Provider {
                provider: "scraper".to_string(),
                message: format!("Invalid JSON: {}", e),
            }
        })?;

        Ok(data)
    }

    fn name(&self) -> &str {
        "scraper"
    }

    async fn is_available(&self) -> bool {
        let health_url = format!("{}/health", self.base_url);
        match self.client.get(&health_url).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_url_layout() {
        let provider = ScraperApiProvider::new("http://127.0.0.1:8060").unwrap();
        assert_eq!(
            provider.app_url("com.example.game", "tr"),
            "http://127.0.0.1:8060/app?appId=com.example.game&country=tr"
        );
    }

    #[tokio::test]
    #[ignore] // Requires a running scraper service
    async fn test_fetch_known_app() {
        let provider = ScraperApiProvider::new("http://127.0.0.1:8060").unwrap();
        let data = provider.fetch_app("com.supercell.clashofclans", "tr").await.unwrap();

        assert!(!data.title.is_empty());
        assert!(!data.developer.is_empty());
    }

    #[tokio::test]
    #[ignore] // Requires a running scraper service
    async fn test_availability_check() {
        let provider = ScraperApiProvider::new("http://127.0.0.1:8060").unwrap();
        assert!(provider.is_available().await);
    }
}
