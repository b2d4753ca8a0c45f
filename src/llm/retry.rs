use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use backon::{BackoffBuilder, ExponentialBuilder, Retryable};
use tokio::time::sleep;
use tracing::warn;

/// Bounded exponential backoff around a fallible async call.
///
/// The delay before retry `n` is `base_delay * 2^(n-1)`, clamped to
/// `max_delay`. There is no jitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
    max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(5), Duration::from_secs(60))
    }
}

impl RetryPolicy {
    /// `max_attempts` counts the first call; zero is treated as one.
    pub fn new(max_attempts: u32, base_delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay: base_delay.min(max_delay),
            max_delay,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    fn backoff(&self) -> ExponentialBuilder {
        ExponentialBuilder::default()
            .with_min_delay(self.base_delay)
            .with_max_delay(self.max_delay)
            .with_factor(2.0)
            .with_max_times(self.max_attempts as usize - 1)
    }

    /// Sleeps taken between attempts, in order.
    pub fn delays(&self) -> impl Iterator<Item = Duration> {
        self.backoff().build()
    }

    /// Run `operation` until it succeeds, fails with an error that
    /// `is_retryable` rejects, or runs out of attempts. The last error is
    /// returned as is.
    pub async fn run<T, E, F, Fut, P>(&self, operation: F, is_retryable: P) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        P: FnMut(&E) -> bool,
        E: Display,
    {
        let max_attempts = self.max_attempts;
        let mut attempt = 1u32;

        operation
            .retry(self.backoff())
            .sleep(sleep)
            .when(is_retryable)
            .notify(|err: &E, delay: Duration| {
                warn!(
                    attempt,
                    max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "Retrying LLM call after transient failure"
                );
                attempt += 1;
            })
            .await
    }
}
