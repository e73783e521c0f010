//! Outbound request governor
//!
//! Sliding-window admission control for calls to the inference service. One
//! governor instance is shared by every call site in the process; callers are
//! delayed until the window has room, never rejected.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

/// Length of the sliding window.
const WINDOW: Duration = Duration::from_secs(60);

/// Buffer added on top of the computed wait so the oldest entry has left the
/// window by the time the caller proceeds.
const ADMIT_SLACK: Duration = Duration::from_millis(500);

/// Time source, injectable so admission waits are testable without real sleeps.
#[async_trait]
pub trait Clock: Send + Sync + std::fmt::Debug {
    fn now(&self) -> Instant;
    async fn sleep(&self, duration: Duration);
}

#[derive(Debug, Default)]
pub struct TokioClock;

#[async_trait]
impl Clock for TokioClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Sliding-window governor over outbound inference calls.
#[derive(Debug)]
pub struct RequestGovernor {
    window: Mutex<VecDeque<Instant>>,
    max_per_minute: usize,
    clock: Arc<dyn Clock>,
}

impl RequestGovernor {
    pub fn new(max_per_minute: usize) -> Self {
        Self::with_clock(max_per_minute, Arc::new(TokioClock))
    }

    pub fn with_clock(max_per_minute: usize, clock: Arc<dyn Clock>) -> Self {
        Self {
            window: Mutex::new(VecDeque::new()),
            max_per_minute,
            clock,
        }
    }

    /// Block until another request may be issued, then record it as admitted.
    ///
    /// Returns the time actually waited (zero when the window had room). The
    /// lock is held across the wait: the read-evict-check-append cycle is
    /// atomic and concurrent callers are admitted strictly in arrival order.
    pub async fn admit(&self) -> Duration {
        let mut window = self.window.lock().await;

        let now = self.clock.now();
        Self::evict(&mut window, now);

        let mut waited = Duration::ZERO;
        if window.len() >= self.max_per_minute {
            if let Some(oldest) = window.front().copied() {
                let elapsed = now.duration_since(oldest);
                let wait = WINDOW.saturating_sub(elapsed) + ADMIT_SLACK;

                debug!(wait_secs = wait.as_secs_f64(), "rate window full, waiting");
                self.clock.sleep(wait).await;
                waited = wait;

                Self::evict(&mut window, self.clock.now());
            }
        }

        window.push_back(self.clock.now());
        waited
    }

    fn evict(window: &mut VecDeque<Instant>, now: Instant) {
        while window
            .front()
            .is_some_and(|t| now.duration_since(*t) >= WINDOW)
        {
            window.pop_front();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex as StdMutex;

    use super::*;

    /// Clock whose sleeps advance virtual time instantly.
    #[derive(Debug)]
    struct FakeClock {
        epoch: Instant,
        offset: StdMutex<Duration>,
    }

    impl FakeClock {
        fn new() -> Self {
            Self {
                epoch: Instant::now(),
                offset: StdMutex::new(Duration::ZERO),
            }
        }

        fn advance(&self, duration: Duration) {
            *self.offset.lock().unwrap() += duration;
        }

        fn elapsed(&self) -> Duration {
            *self.offset.lock().unwrap()
        }
    }

    #[async_trait]
    impl Clock for FakeClock {
        fn now(&self) -> Instant {
            self.epoch + *self.offset.lock().unwrap()
        }

        async fn sleep(&self, duration: Duration) {
            self.advance(duration);
        }
    }

    #[tokio::test]
    async fn test_admits_without_waiting_under_ceiling() {
        let clock = Arc::new(FakeClock::new());
        let governor = RequestGovernor::with_clock(10, clock.clone());

        for _ in 0..10 {
            assert_eq!(governor.admit().await, Duration::ZERO);
        }
        assert_eq!(clock.elapsed(), Duration::ZERO);
    }

    #[tokio::test]
    async fn test_eleventh_call_waits_out_the_window() {
        let clock = Arc::new(FakeClock::new());
        let governor = RequestGovernor::with_clock(10, clock.clone());

        // Fill the window at t=0, then issue the 11th call at t=5.
        for _ in 0..10 {
            governor.admit().await;
        }
        clock.advance(Duration::from_secs(5));

        let waited = governor.admit().await;

        // 60 - 5 + 0.5s slack.
        assert_eq!(waited, Duration::from_millis(55_500));
        // The call was not admitted before t=60.
        assert!(clock.elapsed() >= Duration::from_secs(60));
    }

    #[tokio::test]
    async fn test_expired_entries_free_the_window() {
        let clock = Arc::new(FakeClock::new());
        let governor = RequestGovernor::with_clock(2, clock.clone());

        governor.admit().await;
        governor.admit().await;
        clock.advance(Duration::from_secs(61));

        assert_eq!(governor.admit().await, Duration::ZERO);
    }

    #[tokio::test]
    async fn test_ceiling_of_one_spaces_every_call() {
        let clock = Arc::new(FakeClock::new());
        let governor = RequestGovernor::with_clock(1, clock.clone());

        assert_eq!(governor.admit().await, Duration::ZERO);
        let waited = governor.admit().await;
        assert_eq!(waited, Duration::from_millis(60_500));
    }

    #[tokio::test]
    async fn test_window_never_exceeds_ceiling() {
        let clock = Arc::new(FakeClock::new());
        let governor = RequestGovernor::with_clock(3, clock.clone());

        for _ in 0..7 {
            governor.admit().await;
            clock.advance(Duration::from_secs(1));
        }

        let window = governor.window.lock().await;
        assert!(window.len() <= 3);
    }
}
