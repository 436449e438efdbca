//! Request Rate Limiter
//!
//! Minimum-interval rate limiter composed with providers whose backends
//! throttle aggressively (the Gemini free tier allows ~15 requests/minute).
//! Owned explicitly by the provider instance rather than living in process
//! globals, so its lifecycle and clock are testable.

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

/// Enforces a minimum interval between consecutive calls.
pub struct RateLimiter {
    min_interval: Duration,
    last_call: Mutex<Option<Instant>>,
}

impl RateLimiter {
    /// Create a limiter with the given minimum interval between calls.
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_call: Mutex::new(None),
        }
    }

    /// Wait until the next call is allowed, then claim the slot.
    ///
    /// The lock is held across the sleep so concurrent callers are serialized
    /// and each claims its own interval.
    pub async fn acquire(&self) {
        let mut last = self.last_call.lock().await;
        if let Some(prev) = *last {
            let elapsed = prev.elapsed();
            if elapsed < self.min_interval {
                let wait = self.min_interval - elapsed;
                debug!(wait_ms = wait.as_millis() as u64, "rate limit: waiting");
                tokio::time::sleep(wait).await;
            }
        }
        *last = Some(Instant::now());
    }
}
