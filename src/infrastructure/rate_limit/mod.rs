//! In-process attempt rate limiting

mod clock;
mod limiter;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use limiter::AttemptRateLimiter;
