use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

use crate::error::{GameInfoError, Result};
use crate::throttle::ThrottleGate;

/// Maximum fetch attempts per lookup
pub const MAX_ATTEMPTS: u32 = 3;

/// Linear backoff unit for ordinary failures (1s, 2s, ...)
pub const BACKOFF_UNIT: Duration = Duration::from_millis(1000);

/// Escalating backoff unit for rate-limit failures (5s, 10s, 15s, ...)
pub const RATE_LIMIT_BACKOFF_UNIT: Duration = Duration::from_millis(5000);

/// Bounded retry policy wrapping a single fetch operation.
///
/// Every attempt first passes the [`ThrottleGate`], so retries respect the
/// global spacing too. Failures classified as rate limiting back off on an
/// escalating schedule (and still wait after the final attempt, so a caller
/// that retries immediately keeps the spacing); ordinary failures back off
/// linearly and stop waiting once attempts are exhausted.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_attempts: u32,
    backoff_unit: Duration,
    rate_limit_backoff_unit: Duration,
}

impl RetryPolicy {
    /// Create a policy with explicit attempt cap and backoff units
    pub fn new(max_attempts: u32, backoff_unit: Duration, rate_limit_backoff_unit: Duration) -> Self {
        Self {
            max_attempts,
            backoff_unit,
            rate_limit_backoff_unit,
        }
    }

    /// Attempt cap of this policy
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Run `op` until it succeeds or attempts are exhausted.
    ///
    /// Terminal errors carry the classification of the last failure:
    /// [`GameInfoError::RateLimited`] when the provider was still rate
    /// limiting, [`GameInfoError::FetchExhausted`] otherwise.
    pub async fn run<T, F, Fut>(&self, throttle: &ThrottleGate, mut op: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut last_error: Option<GameInfoError> = None;

        for attempt in 0..self.max_attempts {
            throttle.acquire().await;

            match op().await {
                Ok(value) => return Ok(value),
                Err(err) => {
                    tracing::warn!(
                        "Fetch attempt {}/{} failed: {}",
                        attempt + 1,
                        self.max_attempts,
                        err
                    );

                    if err.is_rate_limit() {
                        let wait = self.rate_limit_backoff_unit * (attempt + 1);
                        tracing::info!("Rate limited, backing off for {:?}", wait);
                        sleep(wait).await;
                    } else if attempt + 1 < self.max_attempts {
                        sleep(self.backoff_unit * (attempt + 1)).await;
                    }

                    last_error = Some(err);
                }
            }
        }

        match last_error {
            Some(err) if err.is_rate_limit() => Err(GameInfoError::RateLimited {
                attempts: self.max_attempts,
            }),
            Some(err) => Err(GameInfoError::FetchExhausted {
                attempts: self.max_attempts,
                last_error: err.to_string(),
            }),
            None => Err(GameInfoError::Other(
                "retry policy configured with zero attempts".to_string(),
            )),
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(MAX_ATTEMPTS, BACKOFF_UNIT, RATE_LIMIT_BACKOFF_UNIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;
    use tokio::time::Instant;

    // Zero-delay gate isolates the backoff schedule from throttle spacing.
    fn open_gate() -> ThrottleGate {
        ThrottleGate::new(Duration::ZERO)
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_on_first_attempt() {
        let policy = RetryPolicy::default();
        let gate = open_gate();
        let calls = Arc::new(AtomicU32::new(0));

        let c = calls.clone();
        let result = policy
            .run(&gate, move || {
                let c = c.clone();
                async move {
                    c.fetch_add(1, Ordering::SeqCst);
                    Ok(42u32)
                }
            })
            .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_linear_backoff_then_success() {
        let policy = RetryPolicy::default();
        let gate = open_gate();
        let calls = Arc::new(AtomicU32::new(0));
        let start = Instant::now();

        let c = calls.clone();
        let result = policy
            .run(&gate, move || {
                let c = c.clone();
                async move {
                    let n = c.fetch_add(1, Ordering::SeqCst);
                    if n < 2 {
                        Err(GameInfoError::from("connection reset"))
                    } else {
                        Ok("ok")
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), "ok");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        // 1s after the first failure, 2s after the second
        assert_eq!(start.elapsed(), Duration::from_millis(3000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhaustion_carries_last_error() {
        let policy = RetryPolicy::default();
        let gate = open_gate();
        let calls = Arc::new(AtomicU32::new(0));
        let start = Instant::now();

        let c = calls.clone();
        let result: Result<()> = policy
            .run(&gate, move || {
                let c = c.clone();
                async move {
                    c.fetch_add(1, Ordering::SeqCst);
                    Err(GameInfoError::from("app not found"))
                }
            })
            .await;

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        // No backoff after the final ordinary failure
        assert_eq!(start.elapsed(), Duration::from_millis(3000));
        match result.unwrap_err() {
            GameInfoError::FetchExhausted { attempts, last_error } => {
                assert_eq!(attempts, 3);
                assert!(last_error.contains("app not found"));
            }
            other => panic!("expected FetchExhausted, got {other}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_rate_limit_escalating_backoff() {
        let policy = RetryPolicy::default();
        let gate = open_gate();
        let calls = Arc::new(AtomicU32::new(0));
        let start = Instant::now();

        let c = calls.clone();
        let result: Result<()> = policy
            .run(&gate, move || {
                let c = c.clone();
                async move {
                    c.fetch_add(1, Ordering::SeqCst);
                    Err(GameInfoError::Provider {
                        provider: "scraper".to_string(),
                        message: "HTTP 429 Too Many Requests".to_string(),
                    })
                }
            })
            .await;

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        // 5s, 10s, then 15s even after the final attempt
        assert_eq!(start.elapsed(), Duration::from_millis(30_000));
        assert!(matches!(
            result.unwrap_err(),
            GameInfoError::RateLimited { attempts: 3 }
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_rate_limit_retry_does_not_consume_ordinary_backoff() {
        let policy = RetryPolicy::default();
        let gate = open_gate();
        let calls = Arc::new(AtomicU32::new(0));
        let start = Instant::now();

        // 429 once, then success: only the 5s rate-limit wait applies.
        let c = calls.clone();
        let result = policy
            .run(&gate, move || {
                let c = c.clone();
                async move {
                    let n = c.fetch_add(1, Ordering::SeqCst);
                    if n == 0 {
                        Err(GameInfoError::from("got HTTP 429 from store"))
                    } else {
                        Ok(())
                    }
                }
            })
            .await;

        assert!(result.is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(start.elapsed(), Duration::from_millis(5000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_attempts_pass_through_throttle() {
        let policy = RetryPolicy::default();
        let gate = ThrottleGate::new(Duration::from_millis(2000));
        let start = Instant::now();

        let result: Result<()> = policy
            .run(&gate, || async { Err(GameInfoError::from("boom")) })
            .await;

        assert!(result.is_err());
        // attempt 0 at t=0, backoff 1s, throttle tops up to 2s;
        // attempt 1 at t=2s, backoff 2s satisfies the gate; attempt 2 at t=4s
        assert_eq!(start.elapsed(), Duration::from_millis(4000));
    }
}
