//! Sliding-window rate limiter
//!
//! Every key keeps the timestamps of its admitted calls. On each attempt
//! the timestamps older than the window are evicted, then the remaining
//! count is compared against the ceiling. Evict, compare and record run
//! under one lock so concurrent callers can never be over-admitted.

use lnms_core::{ConnectionConfig, Error, Result};
use std::collections::{HashMap, VecDeque};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, warn};

/// Key used when the process serves a single logical client
pub const GLOBAL_KEY: &str = "global";

#[derive(Debug)]
pub struct RateLimiter {
    max_requests: u32,
    window_minutes: u32,
    window: Duration,
    windows: Mutex<HashMap<String, VecDeque<Instant>>>,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window_minutes: u32) -> Self {
        Self {
            max_requests,
            window_minutes,
            window: Duration::from_secs(u64::from(window_minutes) * 60),
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// `None` when rate limiting is disabled
    pub fn from_config(config: &ConnectionConfig) -> Option<Self> {
        config
            .rate_limit_enabled
            .then(|| Self::new(config.rate_limit_max_requests, config.rate_limit_window_minutes))
    }

    pub fn max_requests(&self) -> u32 {
        self.max_requests
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub async fn try_acquire(&self, key: &str) -> Result<()> {
        self.try_acquire_at(key, Instant::now()).await
    }

    /// Attempt one acquisition for `key` at `now`.
    ///
    /// The timestamp is recorded only when the call is admitted.
    pub async fn try_acquire_at(&self, key: &str, now: Instant) -> Result<()> {
        let mut windows = self.windows.lock().await;
        if !windows.contains_key(key) {
            self.prune_idle(&mut windows, now);
        }
        let stamps = windows.entry(key.to_string()).or_default();

        while let Some(oldest) = stamps.front() {
            if now.saturating_duration_since(*oldest) > self.window {
                stamps.pop_front();
            } else {
                break;
            }
        }

        let in_window = stamps.len();
        if in_window >= self.max_requests as usize {
            let retry_after = stamps
                .front()
                .map(|oldest| (*oldest + self.window).saturating_duration_since(now));
            if in_window == 0 {
                windows.remove(key);
            }
            warn!(
                key = %key,
                in_window,
                max_requests = self.max_requests,
                "Rate limit exceeded"
            );
            return Err(Error::RateLimited {
                max_requests: self.max_requests,
                window_minutes: self.window_minutes,
                retry_after,
            });
        }

        stamps.push_back(now);
        debug!(key = %key, in_window = stamps.len(), "Rate limit slot acquired");
        Ok(())
    }

    /// Drop keys whose newest call has left the window.
    fn prune_idle(&self, windows: &mut HashMap<String, VecDeque<Instant>>, now: Instant) {
        let before = windows.len();
        windows.retain(|_, stamps| {
            stamps
                .back()
                .map_or(false, |newest| now.saturating_duration_since(*newest) <= self.window)
        });
        if windows.len() < before {
            debug!(pruned = before - windows.len(), "Dropped idle rate-limit keys");
        }
    }

    /// Keys currently holding calls in memory
    pub async fn tracked_keys(&self) -> usize {
        self.windows.lock().await.len()
    }

    /// Calls currently counted against `key`, without evicting
    pub async fn in_window(&self, key: &str) -> usize {
        self.windows.lock().await.get(key).map_or(0, VecDeque::len)
    }

    /// Forget every recorded call
    pub async fn clear(&self) {
        self.windows.lock().await.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_ceiling_within_window() {
        let limiter = RateLimiter::new(3, 1);

        // First 3 pass
        assert!(limiter.try_acquire(GLOBAL_KEY).await.is_ok());
        assert!(limiter.try_acquire(GLOBAL_KEY).await.is_ok());
        assert!(limiter.try_acquire(GLOBAL_KEY).await.is_ok());

        let err = limiter.try_acquire(GLOBAL_KEY).await.unwrap_err();
        assert!(matches!(err, Error::RateLimited { max_requests: 3, window_minutes: 1, .. }));
        assert_eq!(limiter.in_window(GLOBAL_KEY).await, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_window_slides() {
        let limiter = RateLimiter::new(3, 1);
        for _ in 0..3 {
            limiter.try_acquire(GLOBAL_KEY).await.unwrap();
        }
        assert!(limiter.try_acquire(GLOBAL_KEY).await.is_err());

        tokio::time::advance(Duration::from_secs(61)).await;
        assert!(limiter.try_acquire(GLOBAL_KEY).await.is_ok());
        assert_eq!(limiter.in_window(GLOBAL_KEY).await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_partial_eviction() {
        let limiter = RateLimiter::new(2, 1);
        let start = Instant::now();

        limiter.try_acquire_at("k", start).await.unwrap();
        limiter.try_acquire_at("k", start + Duration::from_secs(40)).await.unwrap();
        assert!(limiter.try_acquire_at("k", start + Duration::from_secs(50)).await.is_err());

        // Only the first stamp has left the window
        let later = start + Duration::from_secs(61);
        assert!(limiter.try_acquire_at("k", later).await.is_ok());
        assert!(limiter.try_acquire_at("k", later).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_hint_points_at_oldest_stamp() {
        let limiter = RateLimiter::new(1, 1);
        let start = Instant::now();
        limiter.try_acquire_at(GLOBAL_KEY, start).await.unwrap();

        let err = limiter
            .try_acquire_at(GLOBAL_KEY, start + Duration::from_secs(15))
            .await
            .unwrap_err();
        assert!(err.to_string().ends_with("retry after 45s"));
        match err {
            Error::RateLimited { retry_after, .. } => {
                assert_eq!(retry_after, Some(Duration::from_secs(45)));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_denial_records_nothing() {
        let limiter = RateLimiter::new(1, 1);
        limiter.try_acquire(GLOBAL_KEY).await.unwrap();
        for _ in 0..5 {
            assert!(limiter.try_acquire(GLOBAL_KEY).await.is_err());
        }
        assert_eq!(limiter.in_window(GLOBAL_KEY).await, 1);
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let limiter = RateLimiter::new(1, 1);
        assert!(limiter.try_acquire("a").await.is_ok());
        assert!(limiter.try_acquire("b").await.is_ok());
        assert!(limiter.try_acquire("a").await.is_err());

        limiter.clear().await;
        assert!(limiter.try_acquire("a").await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_keys_are_dropped() {
        let limiter = RateLimiter::new(2, 1);
        for caller in ["alice", "bob", "carol"] {
            limiter.try_acquire(caller).await.unwrap();
        }
        assert_eq!(limiter.tracked_keys().await, 3);

        tokio::time::advance(Duration::from_secs(30)).await;
        limiter.try_acquire("alice").await.unwrap();

        // bob and carol are idle past the window; alice is still live
        tokio::time::advance(Duration::from_secs(45)).await;
        limiter.try_acquire("dave").await.unwrap();
        assert_eq!(limiter.tracked_keys().await, 2);
        assert_eq!(limiter.in_window("bob").await, 0);
        assert_eq!(limiter.in_window("alice").await, 2);
    }

    #[tokio::test]
    async fn test_zero_ceiling_keeps_no_state() {
        let limiter = RateLimiter::new(0, 1);
        assert!(limiter.try_acquire("anyone").await.is_err());
        assert_eq!(limiter.tracked_keys().await, 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_callers_never_over_admitted() {
        let limiter = Arc::new(RateLimiter::new(10, 1));

        let attempts = (0..50).map(|_| {
            let limiter = limiter.clone();
            tokio::spawn(async move { limiter.try_acquire(GLOBAL_KEY).await.is_ok() })
        });
        let outcomes = futures::future::join_all(attempts).await;

        let admitted = outcomes.into_iter().filter(|o| matches!(o, Ok(true))).count();
        assert_eq!(admitted, 10);
    }

    #[test]
    fn test_from_config() {
        let mut config = ConnectionConfig::new("https://nms.example.net", "secret");
        assert!(RateLimiter::from_config(&config).is_none());

        config.rate_limit_enabled = true;
        config.rate_limit_max_requests = 5;
        config.rate_limit_window_minutes = 2;
        let limiter = RateLimiter::from_config(&config).unwrap();
        assert_eq!(limiter.max_requests(), 5);
        assert_eq!(limiter.window(), Duration::from_secs(120));
    }
}
