//! Retry policy: attempt cap and backoff schedule.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default cap on total delivery attempts (1 initial + 3 retries).
///
/// Exhaustion triggers once the count of failed attempts reaches the cap.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 4;

/// Default backoff time unit.
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(1);

/// Policy for the submission retry loop.
///
/// The cap is a policy field rather than a constant so callers can decide
/// whether "4" means total attempts or total retries; the default reads it
/// as total attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Total attempts allowed, including the initial one. Must be >= 1.
    pub max_attempts: u32,
    /// Backoff time unit: retry `k` waits `base_delay * 2^k`.
    pub base_delay: Duration,
}

impl RetryPolicy {
    /// Create a policy.
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    /// Backoff delay before retry number `retry` (first retry is 1).
    ///
    /// Grows as `base_delay * 2^retry`, so the default schedule is
    /// 2s, 4s, 8s. Saturates rather than overflowing for absurd counts.
    pub fn backoff_for(&self, retry: u32) -> Duration {
        self.base_delay
            .saturating_mul(2u32.saturating_pow(retry.min(31)))
    }

    /// Number of retries available after the initial attempt.
    pub fn max_retries(&self) -> u32 {
        self.max_attempts - 1
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: DEFAULT_BASE_DELAY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_schedule_doubles_from_two_units() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.backoff_for(1), Duration::from_secs(2));
        assert_eq!(policy.backoff_for(2), Duration::from_secs(4));
        assert_eq!(policy.backoff_for(3), Duration::from_secs(8));
    }

    #[test]
    fn default_allows_three_retries() {
        assert_eq!(RetryPolicy::default().max_retries(), 3);
    }

    #[test]
    fn attempt_cap_never_drops_below_one() {
        assert_eq!(RetryPolicy::new(0, Duration::ZERO).max_attempts, 1);
    }

    #[test]
    fn huge_retry_counts_saturate_instead_of_overflowing() {
        let policy = RetryPolicy::new(4, Duration::from_secs(u64::MAX / 2));
        let _ = policy.backoff_for(u32::MAX);
    }
}
