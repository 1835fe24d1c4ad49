//! Retry logic with exponential backoff for provider calls.
//!
//! Retries only transient gateway errors (connection failures, per-request
//! timeouts, 429/5xx). Authentication and provider-reported failures are
//! returned immediately. Every attempt resends the same request, including
//! its reference, so the provider can deduplicate.

use std::future::Future;
use std::time::Duration;

use crate::error::GatewayError;

/// Capped retry schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Delay before the first retry; doubles on each subsequent retry.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    /// Three retries at 200ms, 400ms, 800ms.
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(200),
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            base_delay: Duration::ZERO,
        }
    }

    fn delay_for(&self, retry: u32) -> Duration {
        self.base_delay.saturating_mul(2u32.saturating_pow(retry))
    }
}

/// Run `f` until it succeeds, fails permanently, or the policy is exhausted.
///
/// On failure returns the last error together with the number of attempts
/// made.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    policy: &RetryPolicy,
    f: F,
) -> Result<T, (GatewayError, u32)>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, GatewayError>>,
{
    let mut attempt: u32 = 0;
    loop {
        attempt += 1;
        match f().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_retryable() && attempt <= policy.max_retries => {
                let delay = policy.delay_for(attempt - 1);
                tracing::warn!(
                    attempt,
                    max_retries = policy.max_retries,
                    "provider call failed, retrying in {delay:?}: {e}"
                );
                tokio::time::sleep(delay).await;
            }
            Err(e) => return Err((e, attempt)),
        }
    }
}
