//! Fixed-window request limiter
//!
//! One counter gates every invocation of the owning action. The window is
//! fixed, not sliding: a burst straddling a window boundary can admit up to
//! twice `max_requests` in just under two windows.

use parking_lot::Mutex;
use std::time::{Duration, Instant};

/// Counter state guarded by the limiter's lock
#[derive(Debug)]
struct WindowState {
    /// Requests admitted in the current window
    count: u32,
    /// When the current window started
    window_start: Instant,
}

/// Process-wide fixed-window rate limiter
#[derive(Debug)]
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    state: Mutex<WindowState>,
}

impl RateLimiter {
    /// Create a limiter admitting `max_requests` per `window_ms` milliseconds
    pub fn new(max_requests: u32, window_ms: u64) -> Self {
        Self::with_window(max_requests, Duration::from_millis(window_ms))
    }

    /// Create a limiter from a window [`Duration`]
    pub fn with_window(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            state: Mutex::new(WindowState {
                count: 0,
                window_start: Instant::now(),
            }),
        }
    }

    /// Try to admit one request
    ///
    /// Returns `true` and consumes a slot if the current window has room,
    /// `false` otherwise. Rejections do not consume a slot.
    pub fn check_limit(&self) -> bool {
        self.check_limit_at(Instant::now())
    }

    /// [`check_limit`](Self::check_limit) against an explicit clock reading
    pub fn check_limit_at(&self, now: Instant) -> bool {
        let mut state = self.state.lock();

        if now.saturating_duration_since(state.window_start) >= self.window {
            state.count = 0;
            state.window_start = now;
        }

        if state.count < self.max_requests {
            state.count += 1;
            true
        } else {
            false
        }
    }

    /// Slots left in the current window, as of the last reset
    pub fn remaining(&self) -> u32 {
        let state = self.state.lock();
        self.max_requests.saturating_sub(state.count)
    }

    /// Maximum requests admitted per window
    pub fn max_requests(&self) -> u32 {
        self.max_requests
    }

    /// Window length
    pub fn window(&self) -> Duration {
        self.window
    }

    #[cfg(test)]
    fn window_start(&self) -> Instant {
        self.state.lock().window_start
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_admits_up_to_max_then_rejects() {
        let limiter = RateLimiter::new(2, 1000);
        let start = limiter.window_start();

        assert!(limiter.check_limit_at(start));
        assert!(limiter.check_limit_at(start + Duration::from_millis(10)));
        assert!(!limiter.check_limit_at(start + Duration::from_millis(999)));
        assert_eq!(limiter.remaining(), 0);
    }

    #[test]
    fn test_window_rollover_resets_counter() {
        let limiter = RateLimiter::new(2, 1000);
        let start = limiter.window_start();

        assert!(limiter.check_limit_at(start));
        assert!(limiter.check_limit_at(start));
        assert!(!limiter.check_limit_at(start));

        let later = start + Duration::from_millis(1000);
        assert!(limiter.check_limit_at(later));
        assert_eq!(limiter.window_start(), later);
        assert_eq!(limiter.remaining(), 1);
    }

    #[test]
    fn test_rejection_does_not_consume() {
        let limiter = RateLimiter::new(1, 1000);
        let start = limiter.window_start();

        assert!(limiter.check_limit_at(start));
        for _ in 0..5 {
            assert!(!limiter.check_limit_at(start + Duration::from_millis(500)));
        }
        assert!(limiter.check_limit_at(start + Duration::from_millis(1000)));
        assert!(!limiter.check_limit_at(start + Duration::from_millis(1001)));
    }

    #[test]
    fn test_boundary_burst_admits_double() {
        let limiter = RateLimiter::new(3, 1000);
        let start = limiter.window_start();

        let late = start + Duration::from_millis(999);
        let early_next = start + Duration::from_millis(1000);

        let admitted = (0..3).filter(|_| limiter.check_limit_at(late)).count()
            + (0..3).filter(|_| limiter.check_limit_at(early_next)).count();
        assert_eq!(admitted, 6);
    }

    #[test]
    fn test_clock_behind_window_start_does_not_reset() {
        let limiter = RateLimiter::new(1, 1000);
        let start = limiter.window_start();

        assert!(limiter.check_limit_at(start + Duration::from_millis(5)));
        assert!(!limiter.check_limit_at(start));
    }

    #[test]
    fn test_concurrent_callers_never_over_admit() {
        let limiter = Arc::new(RateLimiter::new(50, 60_000));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let limiter = Arc::clone(&limiter);
                std::thread::spawn(move || (0..20).filter(|_| limiter.check_limit()).count())
            })
            .collect();

        let admitted: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(admitted, 50);
    }

    #[test]
    fn test_accessors() {
        let limiter = RateLimiter::new(5, 60_000);
        assert_eq!(limiter.max_requests(), 5);
        assert_eq!(limiter.window(), Duration::from_secs(60));
        assert_eq!(limiter.remaining(), 5);
    }
}
