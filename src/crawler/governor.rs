//! Global request rate governor
//!
//! Every outbound request, whether for a search-results page or an ad's
//! detail page, passes through one shared governor. The governor
//! enforces calls-per-window spacing (one grant per interval), not
//! bandwidth, and therefore caps the effective request rate no matter
//! how many callers share it.

use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Enforces a minimum interval between the start of any two grants
pub struct RateGovernor {
    interval: Duration,
    // Start time of the previous grant. The tokio mutex queues waiters
    // in FIFO order, which gives grant ordering for free.
    last_grant: Mutex<Option<Instant>>,
}

impl RateGovernor {
    /// Creates a governor with the given minimum spacing
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_grant: Mutex::new(None),
        }
    }

    /// Blocks until at least the configured interval has elapsed since
    /// the start of the previous grant, then grants
    ///
    /// Cannot fail; it can only delay the caller. The first call is
    /// granted immediately.
    pub async fn acquire(&self) {
        let mut last = self.last_grant.lock().await;

        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.interval {
                tokio::time::sleep(self.interval - elapsed).await;
            }
        }

        *last = Some(Instant::now());
    }
}
