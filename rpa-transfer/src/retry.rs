//! Generic async retry with linear backoff.
//!
//! Any fallible async operation can be wrapped; the combinator carries no
//! knowledge of HTTP, streams, or any other collaborator. The error of the
//! final attempt is returned unchanged, so callers match on their own error
//! types rather than on a wrapper.

use std::future::Future;
use std::time::Duration;
use tracing::debug;

use crate::delay;

/// Retry policy: attempt count bound plus the linear backoff unit.
///
/// After the n-th failed attempt the executor suspends for
/// `(n - 1) * backoff_unit` before trying again; the first retry is
/// immediate.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    max_attempts: u32,
    backoff_unit: Duration,
}

impl RetryPolicy {
    /// Create a policy. `max_attempts` is clamped to at least one attempt.
    pub fn new(max_attempts: u32, backoff_unit: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff_unit,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn backoff_unit(&self) -> Duration {
        self.backoff_unit
    }

    /// Backoff to apply after `failed_attempts` consecutive failures.
    pub fn delay_after(&self, failed_attempts: u32) -> Duration {
        self.backoff_unit * failed_attempts.saturating_sub(1)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(1))
    }
}

/// Run `operation`, retrying failures under `policy`.
///
/// The first attempt runs immediately. A success at any attempt resolves
/// with that value and stops. Once `max_attempts` have all failed, the last
/// attempt's error propagates to the caller unchanged.
///
/// # Example
///
/// ```ignore
/// use rpa_transfer::retry::{retry, RetryPolicy};
///
/// let policy = RetryPolicy::new(3, Duration::from_secs(1));
/// let files = retry(policy, || drive.list_files(Default::default())).await?;
/// ```
pub async fn retry<T, E, F, Fut>(policy: RetryPolicy, mut operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut attempts = 0u32;

    loop {
        attempts += 1;
        match operation().await {
            Ok(value) => {
                if attempts > 1 {
                    debug!(attempts, "operation succeeded after retry");
                }
                return Ok(value);
            }
            Err(err) => {
                if attempts >= policy.max_attempts() {
                    debug!(attempts, "retry attempts exhausted");
                    return Err(err);
                }
                let backoff = policy.delay_after(attempts);
                debug!(
                    attempt = attempts,
                    backoff_ms = backoff.as_millis() as u64,
                    "operation failed, retrying"
                );
                delay::wait(backoff).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tokio::time::Instant;

    fn policy(max_attempts: u32, unit_ms: u64) -> RetryPolicy {
        RetryPolicy::new(max_attempts, Duration::from_millis(unit_ms))
    }

    #[tokio::test]
    async fn first_attempt_success_runs_once() {
        let calls = AtomicU32::new(0);
        let result: Result<u32, &str> = retry(policy(5, 1000), || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok(42) }
        })
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn recovers_after_transient_failures() {
        let calls = AtomicU32::new(0);
        let start = Instant::now();

        let result: Result<&str, &str> = retry(policy(3, 1000), || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 2 {
                    Err("flaky")
                } else {
                    Ok("done")
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), "done");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        // First retry is immediate, second waits one backoff unit.
        assert_eq!(start.elapsed(), Duration::from_millis(1000));
    }

    #[tokio::test(start_paused = true)]
    async fn exhaustion_returns_last_error_unwrapped() {
        let calls = AtomicU32::new(0);

        let result: Result<(), String> = retry(policy(4, 100), || {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            async move { Err(format!("failure {}", n)) }
        })
        .await;

        assert_eq!(calls.load(Ordering::SeqCst), 4);
        assert_eq!(result.unwrap_err(), "failure 4");
    }

    #[tokio::test(start_paused = true)]
    async fn backoff_grows_linearly() {
        let calls = AtomicU32::new(0);
        let start = Instant::now();

        let result: Result<(), &str> = retry(policy(4, 1000), || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err("always") }
        })
        .await;

        assert!(result.is_err());
        // Waits of 0, 1000 and 2000 ms between the four attempts.
        assert_eq!(start.elapsed(), Duration::from_millis(3000));
    }

    #[tokio::test]
    async fn single_attempt_policy_never_retries() {
        let calls = AtomicU32::new(0);

        let result: Result<(), &str> = retry(policy(1, 1000), || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err("fatal") }
        })
        .await;

        assert_eq!(result.unwrap_err(), "fatal");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn zero_attempts_clamps_to_one() {
        assert_eq!(RetryPolicy::new(0, Duration::ZERO).max_attempts(), 1);
    }

    #[test]
    fn delay_schedule() {
        let p = policy(5, 1000);
        assert_eq!(p.delay_after(1), Duration::ZERO);
        assert_eq!(p.delay_after(2), Duration::from_millis(1000));
        assert_eq!(p.delay_after(3), Duration::from_millis(2000));
    }
}
