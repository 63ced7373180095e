//! Retry combinator with exponential backoff
//!
//! Wraps a request thunk and re-runs it while it fails transiently. The
//! loop ends after `max_attempts` attempts or once `max_elapsed` has passed,
//! whichever comes first.

use crate::error::{Error, Result};
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tracing::warn;

/// Bounds and pacing for retrying a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, the first one included
    pub max_attempts: u32,
    /// Delay after the first failed attempt
    pub base_delay: Duration,
    /// Upper bound for a single delay
    pub max_delay: Duration,
    /// Time budget across all attempts
    pub max_elapsed: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(600),
            max_elapsed: Duration::from_secs(600),
        }
    }
}

impl RetryPolicy {
    /// Create a policy with the default bounds
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the attempt limit
    #[must_use]
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// Set base and maximum delay
    #[must_use]
    pub fn with_delays(mut self, base: Duration, max: Duration) -> Self {
        self.base_delay = base;
        self.max_delay = max;
        self
    }

    /// Set the elapsed-time budget
    #[must_use]
    pub fn with_max_elapsed(mut self, budget: Duration) -> Self {
        self.max_elapsed = budget;
        self
    }

    /// Delay after the given failed attempt (1-based): `base * 2^(attempt - 1)`
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(31);
        let factor = 2u32.saturating_pow(exponent);
        self.base_delay
            .checked_mul(factor)
            .unwrap_or(self.max_delay)
            .min(self.max_delay)
    }
}

/// Run `request` until it succeeds, fails permanently, or the policy gives up.
///
/// Permanent failures are returned untouched after a single attempt. When
/// the bounds are exceeded the last transient failure is wrapped in
/// [`Error::ExhaustedRetry`].
pub async fn with_retry<T, F, Fut>(policy: &RetryPolicy, mut request: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let started = Instant::now();
    let mut attempt = 0u32;

    loop {
        attempt += 1;

        let error = match request().await {
            Ok(value) => return Ok(value),
            Err(e) => e,
        };

        if !error.is_transient() {
            return Err(error);
        }

        let elapsed = started.elapsed();
        if attempt >= policy.max_attempts || elapsed >= policy.max_elapsed {
            warn!(
                attempt,
                elapsed_ms = elapsed.as_millis() as u64,
                "Giving up after {attempt} attempts: {error}"
            );
            return Err(Error::ExhaustedRetry {
                attempts: attempt,
                last_error: Box::new(error),
            });
        }

        let delay = policy
            .delay_for(attempt)
            .min(policy.max_elapsed.saturating_sub(elapsed));
        warn!(
            "Request failed ({error}), attempt {}/{}, retrying in {:?}",
            attempt, policy.max_attempts, delay
        );
        tokio::time::sleep(delay).await;
    }
}
