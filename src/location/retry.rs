//! Backoff policy for transient geocoder failures.

use std::time::Duration;

/// Linear backoff: the n-th consecutive failure waits
/// `initial_delay + increment * (n - 1)`.
///
/// `max_attempts: None` retries forever, which suits a one-shot batch run.
/// Callers that need bounded latency set a cap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub initial_delay: Duration,
    pub increment: Duration,
    pub max_attempts: Option<u32>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            initial_delay: Duration::ZERO,
            increment: Duration::from_secs(1),
            max_attempts: None,
        }
    }
}

impl RetryPolicy {
    /// Zero-delay, unbounded policy.
    pub fn immediate() -> Self {
        Self {
            initial_delay: Duration::ZERO,
            increment: Duration::ZERO,
            max_attempts: None,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    /// Delay to wait after `failures` consecutive failed attempts (1-based).
    pub fn delay_for(&self, failures: u32) -> Duration {
        let steps = failures.saturating_sub(1);
        self.initial_delay + self.increment.saturating_mul(steps)
    }

    /// Whether another attempt is allowed after `attempts` have been made.
    pub fn allows_another(&self, attempts: u32) -> bool {
        match self.max_attempts {
            Some(max) => attempts < max,
            None => true,
        }
    }
}
