use chrono::Utc;
use tokio::time::Instant;

/// Source of the current time, in milliseconds since the Unix epoch.
pub trait Clock {
    fn now_ms(&self) -> i64;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Wall-clock instant captured once, advanced by tokio's monotonic clock.
///
/// When tokio time is paused this follows virtual time, which makes tick
/// sequences exact under test.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    anchor_ms: i64,
    anchor: Instant,
}

impl MonotonicClock {
    #[must_use]
    pub fn new() -> Self {
        Self::starting_at(Utc::now().timestamp_millis())
    }

    /// Clock that reads `anchor_ms` right now.
    #[must_use]
    pub fn starting_at(anchor_ms: i64) -> Self {
        Self {
            anchor_ms,
            anchor: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> i64 {
        let elapsed =
            i64::try_from(self.anchor.elapsed().as_millis()).unwrap_or(i64::MAX);
        self.anchor_ms.saturating_add(elapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_monotonic_clock_follows_virtual_time() {
        let clock = MonotonicClock::starting_at(1_000);
        assert_eq!(clock.now_ms(), 1_000);

        tokio::time::advance(Duration::from_millis(1_500)).await;
        assert_eq!(clock.now_ms(), 2_500);
    }

    #[test]
    fn test_system_clock_is_near_chrono_now() {
        let before = Utc::now().timestamp_millis();
        let now = SystemClock.now_ms();
        let after = Utc::now().timestamp_millis();

        assert!(before <= now && now <= after);
    }
}
