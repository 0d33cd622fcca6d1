use thiserror::Error;

/// Main error type for the resolver engine
#[derive(Error, Debug)]
pub enum GameInfoError {
    /// Store URL did not contain a package id
    #[error("Invalid store URL: {0}")]
    InvalidStoreUrl(String),

    /// Provider kept rate-limiting across every retry attempt
    #[error("Store rate limit hit after {attempts} attempts")]
    RateLimited { attempts: u32 },

    /// All retry attempts failed for non-rate-limit reasons
    #[error("All {attempts} fetch attempts failed: {last_error}")]
    FetchExhausted { attempts: u32, last_error: String },

    /// Provider errors
    #[error("Provider '{provider}' error: {message}")]
    Provider { provider: String, message: String },

    /// HTTP request errors
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Cache errors
    #[error("Cache error: {0}")]
    Cache(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl GameInfoError {
    /// Classify an error as a rate-limit signal (HTTP 429 semantics).
    ///
    /// Providers surface rate limiting either as a reqwest status or as a
    /// `429` marker embedded in the error message.
    pub fn is_rate_limit(&self) -> bool {
        match self {
            GameInfoError::RateLimited { .. } => true,
            GameInfoError::Provider { message, .. } => message.contains("429"),
            GameInfoError::HttpRequest(e) => {
                e.status().map_or(false, |s| s.as_u16() == 429)
            }
            GameInfoError::Other(message) => message.contains("429"),
            _ => false,
        }
    }
}

impl From<String> for GameInfoError {
    fn from(s: String) -> Self {
        GameInfoError::Other(s)
    }
}

impl From<&str> for GameInfoError {
    fn from(s: &str) -> Self {
        GameInfoError::Other(s.to_string())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, GameInfoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_classification() {
        let err = GameInfoError::Provider {
            provider: "scraper".to_string(),
            message: "HTTP 429 Too Many Requests".to_string(),
        };
        assert!(err.is_rate_limit());

        let err = GameInfoError::Provider {
            provider: "scraper".to_string(),
            message: "HTTP 503".to_string(),
        };
        assert!(!err.is_rate_limit());

        assert!(GameInfoError::RateLimited { attempts: 3 }.is_rate_limit());
        assert!(!GameInfoError::InvalidStoreUrl("x".to_string()).is_rate_limit());
    }
}
