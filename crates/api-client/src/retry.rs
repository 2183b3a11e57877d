// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Exponential backoff schedule for transport retries

use std::time::Duration;

use crate::error::ApiError;

/// Upper bound on the doubling exponent, keeps the multiplication in range
const MAX_BACKOFF_EXPONENT: u32 = 20;

/// How many attempts a call gets and how long to wait between them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    initial_delay: Duration,
}

impl RetryPolicy {
    /// Create a policy; `max_attempts` of zero is treated as a single attempt
    pub fn new(max_attempts: u32, initial_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            initial_delay,
        }
    }

    /// Total number of attempts, including the first one
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Delay before the first retry
    pub fn initial_delay(&self) -> Duration {
        self.initial_delay
    }

    /// Delay after the failed attempt `attempt` (1-indexed): `initial * 2^(attempt - 1)`
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(MAX_BACKOFF_EXPONENT);
        self.initial_delay.saturating_mul(1 << exponent)
    }

    /// Whether another attempt is allowed after `attempt` failed
    pub fn should_retry(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }

    /// Whether `error` from attempt `attempt` warrants another attempt
    ///
    /// Only errors raised before a response arrived qualify; a classified
    /// response is final however much budget is left.
    pub fn should_retry_after(&self, attempt: u32, error: &ApiError) -> bool {
        error.is_retryable() && self.should_retry(attempt)
    }

    /// The full sequence of waits a call would go through if every attempt failed
    pub fn schedule(&self) -> impl Iterator<Item = Duration> + '_ {
        (1..self.max_attempts).map(|attempt| self.delay_for_attempt(attempt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delays_double() {
        let policy = RetryPolicy::new(4, Duration::from_millis(100));
        assert_eq!(policy.delay_for_attempt(1), Duration::from_millis(100));
        assert_eq!(policy.delay_for_attempt(2), Duration::from_millis(200));
        assert_eq!(policy.delay_for_attempt(3), Duration::from_millis(400));
    }

    #[test]
    fn schedule_has_one_wait_between_each_attempt() {
        let policy = RetryPolicy::new(4, Duration::from_millis(10));
        let waits: Vec<_> = policy.schedule().collect();
        assert_eq!(
            waits,
            vec![
                Duration::from_millis(10),
                Duration::from_millis(20),
                Duration::from_millis(40)
            ]
        );
    }

    #[test]
    fn zero_attempts_means_one() {
        let policy = RetryPolicy::new(0, Duration::from_millis(10));
        assert_eq!(policy.max_attempts(), 1);
        assert!(!policy.should_retry(1));
        assert_eq!(policy.schedule().count(), 0);
    }

    #[test]
    fn retry_budget() {
        let policy = RetryPolicy::new(3, Duration::from_millis(10));
        assert!(policy.should_retry(1));
        assert!(policy.should_retry(2));
        assert!(!policy.should_retry(3));
    }

    #[test]
    fn only_transport_failures_are_retried() {
        let policy = RetryPolicy::new(3, Duration::from_millis(10));
        assert!(policy.should_retry_after(1, &ApiError::network("connection reset")));
        assert!(policy.should_retry_after(2, &ApiError::timeout(5000)));
        assert!(!policy.should_retry_after(3, &ApiError::network("connection reset")));

        for error in [
            ApiError::server("bad gateway"),
            ApiError::rate_limit("slow down"),
            ApiError::validation("bad input"),
        ] {
            assert!(!policy.should_retry_after(1, &error), "{error}");
        }
    }

    #[test]
    fn huge_attempt_numbers_do_not_overflow() {
        let policy = RetryPolicy::new(u32::MAX, Duration::from_secs(u64::MAX / 2));
        assert_eq!(policy.delay_for_attempt(u32::MAX), Duration::MAX);
    }
}
