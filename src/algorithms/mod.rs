//! Rate limiting algorithms module
//!
//! Two policies keyed by client address: a fixed allotment that never refills
//! and a sliding window over request instants.

pub mod fixed_allotment;
pub mod sliding_window;

use crate::error::QuoteResult;

pub use fixed_allotment::FixedAllotment;
pub use sliding_window::SlidingWindow;

/// Which algorithm a limiter runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum RateLimitPolicy {
    #[default]
    FixedAllotment,
    SlidingWindow,
}

/// Trait for rate limiting algorithms
pub trait RateLimitAlgorithm: Send + Sync {
    /// Record a request for `key`, returning whether it is allowed.
    fn try_acquire(&self, key: &str) -> QuoteResult<bool>;

    /// Drop state that can no longer affect a decision. Returns removed keys.
    fn sweep(&self) -> QuoteResult<usize>;

    /// Number of addresses currently tracked.
    fn tracked_keys(&self) -> QuoteResult<usize>;
}
