//! Bounded retry with exponential backoff for external calls.

use std::future::Future;
use std::time::Duration;

/// Retry policy: up to `max_retries` extra attempts, sleeping `base_delay * 2^n` before retry `n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
        }
    }

    /// No retries; the first failure is final.
    pub fn none() -> Self {
        Self::new(0, Duration::ZERO)
    }

    /// Delay before the retry with zero-based index `retry` (1s, 2s, 4s, ... for the default base).
    pub fn delay_for(&self, retry: u32) -> Duration {
        self.base_delay.saturating_mul(2u32.saturating_pow(retry))
    }

    /// Runs `op` until it succeeds, fails with an error `should_retry` rejects, or retries run out.
    pub async fn run<T, E, F, Fut>(
        &self,
        mut op: F,
        should_retry: impl Fn(&E) -> bool,
    ) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        let mut retry = 0;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(e) if retry < self.max_retries && should_retry(&e) => {
                    let delay = self.delay_for(retry);
                    tracing::warn!(
                        attempt = retry + 1,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "External call failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    retry += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
