/*!
 * Request pacing for translation backends.
 *
 * Leaf-level backend calls are paced by a fixed minimum inter-call delay to
 * respect backend quotas. The gate is injected into each language session so
 * the tree walker stays unaware of scheduling.
 */

use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Fixed-interval gate: consecutive `pause` calls are spaced at least
/// `interval` apart. An interval of zero disables pacing.
#[derive(Debug)]
pub struct PacingGate {
    interval: Duration,
    last_call: Mutex<Option<Instant>>,
}

impl PacingGate {
    /// Create a gate with the given minimum inter-call interval
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_call: Mutex::new(None),
        }
    }

    /// Create a gate from a millisecond delay value
    pub fn from_millis(delay_ms: u64) -> Self {
        Self::new(Duration::from_millis(delay_ms))
    }

    /// Wait until the interval since the previous call has elapsed
    pub async fn pause(&self) {
        if self.interval.is_zero() {
            return;
        }

        let mut last_call = self.last_call.lock().await;
        let now = Instant::now();

        if let Some(previous) = *last_call {
            let ready_at = previous + self.interval;
            if ready_at > now {
                tokio::time::sleep_until(ready_at).await;
            }
        }

        *last_call = Some(Instant::now());
    }
}
