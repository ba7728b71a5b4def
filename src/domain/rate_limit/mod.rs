//! Attempt rate limiting domain
//!
//! Configuration and error types for throttling sensitive operations such as
//! login attempts. The limiter itself lives in the infrastructure layer.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default minimum spacing between attempts
pub const DEFAULT_MIN_WAIT_MS: u64 = 5_000;
/// Default ceiling for failure backoff
pub const DEFAULT_MAX_BACKOFF_MS: u64 = 300_000;
/// Default interval between idle-key sweeps
pub const DEFAULT_CLEANUP_INTERVAL_MS: u64 = 300_000;

/// Attempt rate limit configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Attempts allowed within the sliding window
    pub max_attempts: u32,
    /// Sliding window length
    pub window_ms: u64,
    /// Minimum spacing between consecutive attempts
    #[serde(default = "default_min_wait_ms")]
    pub min_wait_ms: u64,
    /// Upper bound for failure backoff
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,
    /// How often idle keys are swept from memory
    #[serde(default = "default_cleanup_interval_ms")]
    pub cleanup_interval_ms: u64,
}

fn default_min_wait_ms() -> u64 {
    DEFAULT_MIN_WAIT_MS
}

fn default_max_backoff_ms() -> u64 {
    DEFAULT_MAX_BACKOFF_MS
}

fn default_cleanup_interval_ms() -> u64 {
    DEFAULT_CLEANUP_INTERVAL_MS
}

impl RateLimitConfig {
    /// Create a new configuration with default wait and backoff bounds
    pub fn new(max_attempts: u32, window_ms: u64) -> Self {
        Self {
            max_attempts,
            window_ms,
            min_wait_ms: DEFAULT_MIN_WAIT_MS,
            max_backoff_ms: DEFAULT_MAX_BACKOFF_MS,
            cleanup_interval_ms: DEFAULT_CLEANUP_INTERVAL_MS,
        }
    }

    /// Settings used to guard login attempts
    pub fn login() -> Self {
        Self::new(1, 60_000).with_min_wait_ms(15_000)
    }

    /// Set the minimum spacing between attempts
    pub fn with_min_wait_ms(mut self, min_wait_ms: u64) -> Self {
        self.min_wait_ms = min_wait_ms;
        self
    }

    /// Set the backoff ceiling
    pub fn with_max_backoff_ms(mut self, max_backoff_ms: u64) -> Self {
        self.max_backoff_ms = max_backoff_ms;
        self
    }

    /// Set the idle sweep interval
    pub fn with_cleanup_interval_ms(mut self, cleanup_interval_ms: u64) -> Self {
        self.cleanup_interval_ms = cleanup_interval_ms;
        self
    }

    /// Backoff applied after `failures` consecutive failures
    ///
    /// The first failure carries no backoff; after that the penalty is
    /// `2^(failures - 1) * min_wait_ms`, capped at `max_backoff_ms`.
    pub fn backoff_for(&self, failures: u32) -> Option<u64> {
        if failures <= 1 {
            return None;
        }

        let factor = 1u64.checked_shl(failures - 1).unwrap_or(u64::MAX);
        Some(factor.saturating_mul(self.min_wait_ms).min(self.max_backoff_ms))
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self::login()
    }
}

/// Which throttle rejected an attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitReason {
    /// A failure backoff period is active
    Backoff,
    /// The previous attempt was too recent
    MinimumWait,
    /// Too many attempts within the sliding window
    WindowExceeded,
}

impl std::fmt::Display for LimitReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Backoff => write!(f, "backoff"),
            Self::MinimumWait => write!(f, "minimum_wait"),
            Self::WindowExceeded => write!(f, "window_exceeded"),
        }
    }
}

/// Rate limiting errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RateLimitError {
    #[error("{}", describe(.reason, .retry_after_ms))]
    RateLimited {
        retry_after_ms: u64,
        reason: LimitReason,
    },
}

impl RateLimitError {
    pub fn rate_limited(retry_after_ms: u64, reason: LimitReason) -> Self {
        Self::RateLimited {
            retry_after_ms,
            reason,
        }
    }

    /// Milliseconds the caller should wait before retrying
    pub fn retry_after_ms(&self) -> u64 {
        match self {
            Self::RateLimited { retry_after_ms, .. } => *retry_after_ms,
        }
    }

    /// Wait rounded up to whole seconds
    pub fn retry_after_secs(&self) -> u64 {
        self.retry_after_ms().div_ceil(1000)
    }

    pub fn reason(&self) -> LimitReason {
        match self {
            Self::RateLimited { reason, .. } => *reason,
        }
    }
}

fn describe(reason: &LimitReason, retry_after_ms: &u64) -> String {
    let seconds = retry_after_ms.div_ceil(1000);

    match reason {
        LimitReason::MinimumWait => {
            format!("Please wait {} seconds between attempts.", seconds)
        }
        LimitReason::Backoff | LimitReason::WindowExceeded => {
            format!("Too many attempts. Please wait {} seconds.", seconds)
        }
    }
}
