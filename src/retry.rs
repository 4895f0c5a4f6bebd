//! # Retry Executor
//!
//! Retries a fallible asynchronous operation a bounded number of times with a
//! fixed delay between attempts.
//!
//! The executor is a standalone primitive: nothing in the orchestrator is
//! wrapped implicitly, callers decide what to retry.
//!
//! ## Usage
//!
//! ```rust
//! use apim_provisioner::retry::{run_with_retry, RetryPolicy};
//! use std::time::Duration;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let policy = RetryPolicy::new(3, Duration::from_millis(0));
//! let value: Result<u32, &str> = run_with_retry(
//!     |attempt| async move { if attempt < 2 { Err("busy") } else { Ok(attempt) } },
//!     &policy,
//! )
//! .await;
//! assert_eq!(value, Ok(2));
//! # }
//! ```

use crate::constants::{DEFAULT_RETRY_DELAY_MS, DEFAULT_RETRY_MAX_ATTEMPTS};
use std::future::Future;
use std::time::Duration;

/// Attempt budget and fixed inter-attempt delay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first one
    pub max_retries: u32,
    /// Delay between a failed attempt and the next one
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_RETRY_MAX_ATTEMPTS,
            delay: Duration::from_millis(DEFAULT_RETRY_DELAY_MS),
        }
    }
}

impl RetryPolicy {
    #[must_use]
    pub fn new(max_retries: u32, delay: Duration) -> Self {
        Self { max_retries, delay }
    }

    /// Run `operation` under this policy. See [`run_with_retry`].
    ///
    /// # Errors
    /// Returns the error of the last attempt when every attempt failed.
    pub async fn run<T, E, F, Fut>(&self, operation: F) -> Result<T, E>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        run_with_retry(operation, self).await
    }
}

/// Run `operation` until it succeeds or the attempt budget is spent.
///
/// `operation` receives the 1-indexed attempt number. A policy with
/// `max_retries == 0` still makes one attempt. The error of the final attempt
/// is returned exactly as the operation produced it.
///
/// # Errors
/// Returns the error of the last attempt when every attempt failed.
pub async fn run_with_retry<T, E, F, Fut>(mut operation: F, policy: &RetryPolicy) -> Result<T, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let max_attempts = policy.max_retries.max(1);
    let mut attempt = 1;

    loop {
        match operation(attempt).await {
            Ok(value) => return Ok(value),
            Err(e) if attempt >= max_attempts => return Err(e),
            Err(_) => {
                tokio::time::sleep(policy.delay).await;
                attempt += 1;
            }
        }
    }
}
