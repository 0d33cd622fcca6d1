//! # GameInfo Engine
//!
//! Game metadata resolver for store page URLs with:
//! - Process-wide cache keyed by (package id, country) with a freshness window
//! - Global inter-request throttle toward the scraping target
//! - Bounded retries with rate-limit-aware escalating backoff
//! - Graceful degradation to a synthesized record when lookups keep failing
//! - Multiple interfaces: Rust library, HTTP API, CLI
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use gameinfo_engine::{GameInfoResolver, ResolveRequest, ResolverConfig};
//! use gameinfo_engine::providers::ScraperApiProvider;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let provider = Arc::new(ScraperApiProvider::new("http://127.0.0.1:8060")?);
//!     let resolver = GameInfoResolver::new(provider, ResolverConfig::default());
//!
//!     let response = resolver.resolve(&ResolveRequest::for_url(
//!         "https://play.google.com/store/apps/details?id=com.supercell.clashofclans",
//!     )).await?;
//!
//!     println!("{} - {}", response.info.title, response.info.price);
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod core;
pub mod error;
pub mod normalize;
pub mod providers;
pub mod resolver;
pub mod retry;
pub mod throttle;

// Re-export primary types
pub use cache::{InfoCache, MemoryCache};
pub use self::core::{GameInfo, RawAppData, ResolveResponse, ResolveSource};
pub use error::{GameInfoError, Result};
pub use resolver::{GameInfoResolver, ResolveRequest, ResolverConfig};
pub use retry::RetryPolicy;
pub use throttle::ThrottleGate;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
