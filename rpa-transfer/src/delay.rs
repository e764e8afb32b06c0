//! Timed suspension primitives.
//!
//! The retry executor backs off through [`wait`]; [`wait_interruptible`] is
//! the same suspension with an early-out on a cancellation token, so a
//! retry loop can later be torn down mid-backoff without waiting out the
//! full delay.

use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Suspend the current task for `duration`.
pub async fn wait(duration: Duration) {
    tokio::time::sleep(duration).await;
}

/// Suspend for `duration` unless `cancel` fires first.
///
/// Returns `true` if the full duration elapsed, `false` if the wait was
/// interrupted.
pub async fn wait_interruptible(duration: Duration, cancel: &CancellationToken) -> bool {
    tokio::select! {
        _ = tokio::time::sleep(duration) => true,
        _ = cancel.cancelled() => false,
    }
}
