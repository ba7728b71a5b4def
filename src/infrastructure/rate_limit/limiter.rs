//! Attempt rate limiter implementation
//!
//! Combines three throttles per key: a minimum spacing between attempts, a
//! sliding-window attempt cap, and an exponential backoff that grows with
//! consecutive failures.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, warn};

use super::clock::{Clock, MonotonicClock};
use crate::domain::rate_limit::{LimitReason, RateLimitConfig, RateLimitError};

/// Per-key throttle state
#[derive(Debug, Default)]
struct AttemptState {
    recent_attempts: VecDeque<u64>,
    last_attempt_ms: Option<u64>,
    backoff_until_ms: u64,
    consecutive_failures: u32,
}

impl AttemptState {
    /// Drop attempts older than the window `[now - window_ms, now]`
    fn prune(&mut self, now_ms: u64, window_ms: u64) {
        let window_start = now_ms.saturating_sub(window_ms);

        while self
            .recent_attempts
            .front()
            .is_some_and(|&t| t < window_start)
        {
            self.recent_attempts.pop_front();
        }
    }

    fn attempts_in_window(&self, now_ms: u64, window_ms: u64) -> usize {
        let window_start = now_ms.saturating_sub(window_ms);
        self.recent_attempts
            .iter()
            .filter(|&&t| t >= window_start)
            .count()
    }

    fn time_to_next_attempt(&self, now_ms: u64, min_wait_ms: u64) -> u64 {
        if now_ms < self.backoff_until_ms {
            return self.backoff_until_ms - now_ms;
        }

        self.last_attempt_ms
            .map(|last| min_wait_ms.saturating_sub(now_ms.saturating_sub(last)))
            .unwrap_or(0)
    }

    fn register_failure(&mut self, config: &RateLimitConfig, now_ms: u64) {
        self.consecutive_failures = self.consecutive_failures.saturating_add(1);

        if let Some(backoff_ms) = config.backoff_for(self.consecutive_failures) {
            self.backoff_until_ms = now_ms.saturating_add(backoff_ms);
        }
    }

    /// True when the state answers every query exactly like a fresh key
    fn is_idle(&self, config: &RateLimitConfig, now_ms: u64) -> bool {
        self.consecutive_failures == 0
            && self.time_to_next_attempt(now_ms, config.min_wait_ms) == 0
            && self.attempts_in_window(now_ms, config.window_ms) == 0
    }
}

#[derive(Debug, Default)]
struct LimiterInner {
    states: HashMap<String, AttemptState>,
    last_cleanup_ms: u64,
}

/// Per-key attempt rate limiter
///
/// A single mutex guards all keys, so each check-then-record sequence is
/// atomic. State is process-local and is not shared between instances.
#[derive(Debug)]
pub struct AttemptRateLimiter<C: Clock = MonotonicClock> {
    config: RateLimitConfig,
    clock: C,
    inner: Mutex<LimiterInner>,
}

impl AttemptRateLimiter<MonotonicClock> {
    /// Create a limiter on the process monotonic clock
    pub fn new(config: RateLimitConfig) -> Self {
        Self::with_clock(config, MonotonicClock::new())
    }
}

impl<C: Clock> AttemptRateLimiter<C> {
    /// Create a limiter on a custom clock
    pub fn with_clock(config: RateLimitConfig, clock: C) -> Self {
        Self {
            config,
            clock,
            inner: Mutex::new(LimiterInner::default()),
        }
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    /// Check and record an attempt for `key`
    pub fn attempt(&self, key: &str) -> Result<(), RateLimitError> {
        self.attempt_at(key, self.clock.now_ms())
    }

    /// Check and record an attempt at an explicit instant
    pub fn attempt_at(&self, key: &str, now_ms: u64) -> Result<(), RateLimitError> {
        let config = &self.config;
        let mut inner = self.lock();
        self.maybe_cleanup(&mut inner, now_ms);

        let state = inner.states.entry(key.to_string()).or_default();

        if now_ms < state.backoff_until_ms {
            let retry_after_ms = state.backoff_until_ms - now_ms;
            debug!(key = %key, retry_after_ms, "Attempt rejected during backoff");
            return Err(RateLimitError::rate_limited(
                retry_after_ms,
                LimitReason::Backoff,
            ));
        }

        if let Some(last) = state.last_attempt_ms {
            let elapsed = now_ms.saturating_sub(last);

            if elapsed < config.min_wait_ms {
                let retry_after_ms = config.min_wait_ms - elapsed;
                debug!(key = %key, retry_after_ms, "Attempt rejected, too soon after previous");
                return Err(RateLimitError::rate_limited(
                    retry_after_ms,
                    LimitReason::MinimumWait,
                ));
            }
        }

        state.prune(now_ms, config.window_ms);

        if state.recent_attempts.len() >= config.max_attempts as usize {
            state.register_failure(config, now_ms);
            warn!(
                key = %key,
                consecutive_failures = state.consecutive_failures,
                backoff_until_ms = state.backoff_until_ms,
                "Attempt window exceeded"
            );
            return Err(RateLimitError::rate_limited(
                config.max_backoff_ms,
                LimitReason::WindowExceeded,
            ));
        }

        state.recent_attempts.push_back(now_ms);
        state.last_attempt_ms = Some(now_ms);

        Ok(())
    }

    /// Forget everything about `key`
    pub fn reset(&self, key: &str) {
        let mut inner = self.lock();

        if inner.states.remove(key).is_some() {
            debug!(key = %key, "Rate limit state reset");
        }
    }

    /// Count a failure of the guarded operation against `key`
    pub fn record_failure(&self, key: &str) {
        self.record_failure_at(key, self.clock.now_ms());
    }

    pub fn record_failure_at(&self, key: &str, now_ms: u64) {
        let mut inner = self.lock();
        let state = inner.states.entry(key.to_string()).or_default();
        state.register_failure(&self.config, now_ms);

        debug!(
            key = %key,
            consecutive_failures = state.consecutive_failures,
            "Recorded failure"
        );
    }

    /// Impose a backoff of `duration_ms`, capped at the configured ceiling
    pub fn set_backoff(&self, key: &str, duration_ms: u64) {
        self.set_backoff_at(key, duration_ms, self.clock.now_ms());
    }

    pub fn set_backoff_at(&self, key: &str, duration_ms: u64, now_ms: u64) {
        let mut inner = self.lock();
        let state = inner.states.entry(key.to_string()).or_default();
        state.backoff_until_ms = now_ms.saturating_add(duration_ms.min(self.config.max_backoff_ms));
    }

    /// Attempts left in the current window, zero while throttled
    pub fn remaining_attempts(&self, key: &str) -> u32 {
        self.remaining_attempts_at(key, self.clock.now_ms())
    }

    pub fn remaining_attempts_at(&self, key: &str, now_ms: u64) -> u32 {
        let inner = self.lock();

        let Some(state) = inner.states.get(key) else {
            return self.config.max_attempts;
        };

        if state.time_to_next_attempt(now_ms, self.config.min_wait_ms) > 0 {
            return 0;
        }

        let used = state.attempts_in_window(now_ms, self.config.window_ms);
        let used = u32::try_from(used).unwrap_or(u32::MAX);
        self.config.max_attempts.saturating_sub(used)
    }

    /// Milliseconds until `key` may attempt again
    pub fn time_to_next_attempt(&self, key: &str) -> u64 {
        self.time_to_next_attempt_at(key, self.clock.now_ms())
    }

    pub fn time_to_next_attempt_at(&self, key: &str, now_ms: u64) -> u64 {
        self.lock()
            .states
            .get(key)
            .map(|state| state.time_to_next_attempt(now_ms, self.config.min_wait_ms))
            .unwrap_or(0)
    }

    pub fn is_rate_limited(&self, key: &str) -> bool {
        self.time_to_next_attempt(key) > 0
    }

    pub fn is_rate_limited_at(&self, key: &str, now_ms: u64) -> bool {
        self.time_to_next_attempt_at(key, now_ms) > 0
    }

    /// Number of keys currently held in memory
    pub fn tracked_keys(&self) -> usize {
        self.lock().states.len()
    }

    fn lock(&self) -> MutexGuard<'_, LimiterInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn maybe_cleanup(&self, inner: &mut LimiterInner, now_ms: u64) {
        if now_ms.saturating_sub(inner.last_cleanup_ms) < self.config.cleanup_interval_ms {
            return;
        }

        inner.last_cleanup_ms = now_ms;

        let before = inner.states.len();
        inner
            .states
            .retain(|_, state| !state.is_idle(&self.config, now_ms));

        let removed = before - inner.states.len();
        if removed > 0 {
            debug!(removed, remaining = inner.states.len(), "Swept idle rate limit keys");
        }
    }
}
