//! Retry policy for idempotent reads.

use std::time::Duration;

/// Bounded retry with exponential backoff.
///
/// Applies to GET requests only; mutations are never replayed by the client
/// because the server does not deduplicate them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Additional attempts after the first (0 disables retry).
    pub retries: u32,
    pub initial_delay: Duration,
    pub backoff_factor: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: 1,
            initial_delay: Duration::from_secs(1),
            backoff_factor: 2,
        }
    }
}

impl RetryPolicy {
    /// No retries at all; every request is issued exactly once.
    pub fn none() -> Self {
        Self {
            retries: 0,
            initial_delay: Duration::ZERO,
            backoff_factor: 1,
        }
    }
}
