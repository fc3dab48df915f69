//! Retry with exponential backoff
//!
//! Used around HTTP calls whose client has no retry of its own. The AWS
//! adapters rely on the SDK's built-in retry instead.

use std::future::Future;
use std::time::Duration;

use keyrot_engine::{GatewayError, GatewayResult};
use serde::{Deserialize, Serialize};

/// Retry policy for transient gateway failures
///
/// # Example
///
/// ```rust
/// use keyrot_providers::retry::RetryPolicy;
///
/// let policy = RetryPolicy {
///     max_retries: 2,
///     base_delay_ms: 200,
///     ..RetryPolicy::default()
/// };
/// assert!(policy.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Retries after the first attempt. Must be at most 10.
    pub max_retries: u32,

    /// Delay before the first retry, in milliseconds (10..=10_000)
    pub base_delay_ms: u64,

    /// Cap for the exponential growth, in milliseconds
    pub max_delay_ms: u64,

    /// Growth factor between retries (1.0..=10.0)
    pub multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay_ms: 250,
            max_delay_ms: 5_000,
            multiplier: 2.0,
        }
    }
}

impl RetryPolicy {
    /// Policy that never retries
    #[must_use]
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Check the policy parameters
    pub fn validate(&self) -> Result<(), String> {
        if self.max_retries > 10 {
            return Err(format!("max_retries must be <= 10, got {}", self.max_retries));
        }
        if !(10..=10_000).contains(&self.base_delay_ms) {
            return Err(format!(
                "base_delay_ms must be between 10 and 10000, got {}",
                self.base_delay_ms
            ));
        }
        if self.max_delay_ms < self.base_delay_ms {
            return Err(format!(
                "max_delay_ms ({}) must be >= base_delay_ms ({})",
                self.max_delay_ms, self.base_delay_ms
            ));
        }
        if !(1.0..=10.0).contains(&self.multiplier) {
            return Err(format!(
                "multiplier must be between 1.0 and 10.0, got {}",
                self.multiplier
            ));
        }
        Ok(())
    }

    /// Delay before retry number `attempt` (0-based), capped at `max_delay_ms`
    #[must_use]
    pub fn delay(&self, attempt: u32) -> Duration {
        let delay_ms = self.base_delay_ms as f64 * self.multiplier.powi(attempt as i32);
        Duration::from_millis(delay_ms.min(self.max_delay_ms as f64) as u64)
    }
}

/// Run `operation` until it succeeds, fails with a non-retryable error, or
/// the policy is exhausted. The closure receives the 0-based attempt number.
pub async fn retry_with_policy<F, Fut, T>(
    policy: &RetryPolicy,
    operation_name: &str,
    mut operation: F,
) -> GatewayResult<T>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = GatewayResult<T>>,
{
    let mut attempt = 0;
    loop {
        match operation(attempt).await {
            Ok(value) => {
                if attempt > 0 {
                    tracing::info!(operation = operation_name, attempt, "succeeded after retry");
                }
                return Ok(value);
            }
            Err(err) if err.is_retryable() && attempt < policy.max_retries => {
                let delay = policy.delay(attempt);
                tracing::warn!(
                    operation = operation_name,
                    attempt = attempt + 1,
                    max_retries = policy.max_retries,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "retrying after transient failure"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(err) => return Err(give_up(operation_name, attempt, err)),
        }
    }
}

fn give_up(operation_name: &str, attempt: u32, err: GatewayError) -> GatewayError {
    if attempt > 0 {
        tracing::error!(
            operation = operation_name,
            attempts = attempt + 1,
            error = %err,
            "giving up"
        );
    }
    err
}
