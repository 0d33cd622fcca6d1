use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gameinfo_engine::providers::ScraperApiProvider;
use gameinfo_engine::{GameInfo, GameInfoError, GameInfoResolver, ResolveRequest, ResolverConfig};

#[derive(Clone)]
struct AppState {
    resolver: Arc<GameInfoResolver>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FetchGameInfoRequest {
    url: String,
    #[serde(default)]
    currency: Option<String>,
    #[serde(default)]
    force_refresh: bool,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    message: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

#[derive(Debug, Serialize)]
struct StatsResponse {
    cache: CacheStatsDto,
}

#[derive(Debug, Serialize)]
struct CacheStatsDto {
    total_entries: u64,
    total_hits: u64,
    avg_hit_count: f64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gameinfo_server=debug,gameinfo_engine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let scraper_url =
        std::env::var("SCRAPER_URL").unwrap_or_else(|_| "http://127.0.0.1:8060".to_string());
    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(5000);

    let mut config = ResolverConfig::default();
    if let Ok(country) = std::env::var("DEFAULT_COUNTRY") {
        config.default_country = country;
    }

    tracing::info!("🚀 Starting GameInfo Engine Server");
    tracing::info!("🔗 Scraper service: {}", scraper_url);
    tracing::info!("🔌 Port: {}", port);

    let provider = Arc::new(ScraperApiProvider::new(&scraper_url)?);
    let resolver = GameInfoResolver::new(provider, config);

    let state = AppState {
        resolver: Arc::new(resolver),
    };

    // Build router
    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/api/fetch-game-info", post(fetch_game_info_handler))
        .route("/api/stats", get(stats_handler))
        .layer(CorsLayer::permissive())
        .with_state(state);

    // Start server
    let addr = format!("0.0.0.0:{}", port);
    tracing::info!("🎮 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: gameinfo_engine::VERSION.to_string(),
    })
}

async fn fetch_game_info_handler(
    State(state): State<AppState>,
    Json(req): Json<FetchGameInfoRequest>,
) -> Result<Json<GameInfo>, AppError> {
    tracing::debug!("Fetch request: {:?}", req);

    let request = ResolveRequest {
        url: req.url.clone(),
        country: req.currency,
        force_refresh: req.force_refresh,
    };

    let response = state.resolver.resolve(&request).await?;

    tracing::info!("✅ {} → {}", req.url, response.display());

    Ok(Json(response.info))
}

async fn stats_handler(State(state): State<AppState>) -> Result<Json<StatsResponse>, AppError> {
    let cache_stats = state.resolver.cache_stats().await?;

    Ok(Json(StatsResponse {
        cache: CacheStatsDto {
            total_entries: cache_stats.total_entries,
            total_hits: cache_stats.total_hits,
            avg_hit_count: cache_stats.avg_hit_count,
        },
    }))
}

// Error handling
struct AppError(GameInfoError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0 {
            GameInfoError::InvalidStoreUrl(url) => {
                (StatusCode::BAD_REQUEST, format!("Invalid store link: {}", url))
            }
            GameInfoError::RateLimited { .. } => (
                StatusCode::TOO_MANY_REQUESTS,
                "Too many requests to the store. Please try again in a few minutes.".to_string(),
            ),
            e => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        };

        tracing::error!("❌ Error: {} - {}", status, message);

        (status, Json(ErrorResponse { message })).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<GameInfoError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
