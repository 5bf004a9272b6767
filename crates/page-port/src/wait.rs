//! Suspension points for the pipeline. Settle waits yield to the host's
//! render cycle for a fixed interval; `until` polls a predicate up to a
//! deadline so stages can stop waiting as soon as the page has caught up.

use std::future::Future;
use std::time::Duration;

use tokio::time::{sleep, Instant};

/// Fixed-duration settle after a UI interaction.
pub async fn settle(duration: Duration) {
    if !duration.is_zero() {
        sleep(duration).await;
    }
}

/// Poll `predicate` every `interval` until it holds or `timeout` elapses.
/// Returns whether the predicate held before the deadline.
pub async fn until<F, Fut>(timeout: Duration, interval: Duration, mut predicate: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    let deadline = Instant::now() + timeout;
    loop {
        if predicate().await {
            return true;
        }
        let now = Instant::now();
        if now >= deadline {
            return false;
        }
        sleep(interval.min(deadline.duration_since(now))).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test(start_paused = true)]
    async fn until_returns_once_predicate_holds() {
        let polls = AtomicU32::new(0);
        let held = until(
            Duration::from_millis(1000),
            Duration::from_millis(100),
            || {
                let n = polls.fetch_add(1, Ordering::SeqCst);
                async move { n >= 2 }
            },
        )
        .await;
        assert!(held);
        assert_eq!(polls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn until_gives_up_at_deadline() {
        let held = until(
            Duration::from_millis(300),
            Duration::from_millis(100),
            || async { false },
        )
        .await;
        assert!(!held);
    }
}
