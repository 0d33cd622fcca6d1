use clap::{Parser, Subcommand};
use gameinfo_engine::providers::ScraperApiProvider;
use gameinfo_engine::{GameInfoResolver, ResolveRequest, ResolverConfig};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "gameinfo-cli")]
#[command(about = "GameInfo Engine CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Scraper service base URL
    #[arg(short, long, default_value = "http://127.0.0.1:8060")]
    scraper_url: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve game metadata from a store page URL
    Resolve {
        /// Store page URL (must contain id=<package>)
        url: String,

        /// Store country code
        #[arg(short, long)]
        country: Option<String>,

        /// Bypass the cache and fetch live data
        #[arg(long)]
        force: bool,
    },

    /// Get cache statistics
    Stats,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let provider = Arc::new(ScraperApiProvider::new(&cli.scraper_url)?);
    let resolver = GameInfoResolver::new(provider, ResolverConfig::default());

    match cli.command {
        Commands::Resolve { url, country, force } => {
            println!("🔍 Resolving: {}", url);

            let request = ResolveRequest {
                url,
                country,
                force_refresh: force,
            };

            let response = resolver.resolve(&request).await?;
            let info = &response.info;

            println!("\n✅ {}", info.title);
            println!("   Developer: {}", info.developer);
            println!("   Rating: {:.1} ({} reviews)", info.rating, info.review_count);
            println!("   Price: {}", info.price);

            if let Some(original) = &info.original_price {
                println!("   Was: {} (-{}%)", original, info.discount_percent);
            }

            println!("   Icon: {}", info.image_url);
            println!("   Source: {:?}", response.source);
            println!("   Latency: {:.2}ms", response.latency_ms);
        }

        Commands::Stats => {
            let stats = resolver.cache_stats().await?;

            println!("📊 Cache Statistics:");
            println!("   Total entries: {}", stats.total_entries);
            println!("   Total hits: {}", stats.total_hits);
            println!("   Avg hits/entry: {:.2}", stats.avg_hit_count);

            if let Some(oldest) = stats.oldest_entry {
                println!("   Oldest entry: {}", oldest.format("%Y-%m-%d %H:%M:%S"));
            }

            if let Some(newest) = stats.newest_entry {
                println!("   Newest entry: {}", newest.format("%Y-%m-%d %H:%M:%S"));
            }
        }
    }

    Ok(())
}
