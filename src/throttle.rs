use std::sync::Mutex;
use std::time::Duration;
use tokio::time::{sleep, Instant};

/// Default minimum spacing between outbound calls to the scraping target
pub const REQUEST_DELAY: Duration = Duration::from_millis(2000);

/// Process-wide gate enforcing a minimum delay between outbound store calls.
///
/// The gate is intentionally loose under concurrency: each caller computes
/// its own wait from the shared last-request timestamp and callers may race
/// past the check, so spacing is approximate rather than strict. The lock is
/// never held across an await.
pub struct ThrottleGate {
    min_delay: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl ThrottleGate {
    /// Create a gate with the given minimum spacing
    pub fn new(min_delay: Duration) -> Self {
        Self {
            min_delay,
            last_request: Mutex::new(None),
        }
    }

    /// Suspend until the minimum delay since the previous request has
    /// elapsed, then record the new last-request timestamp.
    pub async fn acquire(&self) {
        let wait = {
            let last = self.last_request.lock().unwrap();
            match *last {
                Some(t) => self.min_delay.saturating_sub(t.elapsed()),
                None => Duration::ZERO,
            }
        };

        if !wait.is_zero() {
            tracing::debug!("Throttling outbound request for {:?}", wait);
            sleep(wait).await;
        }

        *self.last_request.lock().unwrap() = Some(Instant::now());
    }

    /// Minimum spacing this gate enforces
    pub fn min_delay(&self) -> Duration {
        self.min_delay
    }
}

impl Default for ThrottleGate {
    fn default() -> Self {
        Self::new(REQUEST_DELAY)
    }
}
