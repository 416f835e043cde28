//! Clock backed by tokio's time driver.

use crate::core::Clock;
use chrono::Utc;
use tokio::time::Instant;

/// Epoch milliseconds measured as "wall clock at creation + monotonic time
/// since".
///
/// Readings never go backwards, and under `tokio::time::pause` they follow
/// the virtual clock, so tests can run long countdowns instantly.
#[derive(Clone, Copy, Debug)]
pub struct TokioClock {
    origin: Instant,
    origin_ms: i64,
}

impl TokioClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            origin_ms: Utc::now().timestamp_millis(),
        }
    }
}

impl Default for TokioClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for TokioClock {
    fn now_ms(&self) -> i64 {
        let since = i64::try_from(self.origin.elapsed().as_millis()).unwrap_or(i64::MAX);
        self.origin_ms.saturating_add(since)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn follows_virtual_time() {
        let clock = TokioClock::new();
        let before = clock.now_ms();

        tokio::time::advance(Duration::from_millis(1_500)).await;

        assert_eq!(clock.now_ms() - before, 1_500);
    }

    #[tokio::test(start_paused = true)]
    async fn stands_still_while_paused() {
        let clock = TokioClock::new();
        assert_eq!(clock.now_ms(), clock.now_ms());
    }
}
