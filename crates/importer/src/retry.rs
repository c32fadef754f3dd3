use std::future::Future;
use std::time::Duration;

use reqwest::StatusCode;
use tracing::warn;

use crate::{ImporterError, Result};

pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;
pub const DEFAULT_BACKOFF: Duration = Duration::from_secs(60);

/// A response that may tell the caller to slow down.
pub trait RateLimitSignal {
    fn is_rate_limited(&self) -> bool;
}

impl RateLimitSignal for reqwest::Response {
    fn is_rate_limited(&self) -> bool {
        self.status() == StatusCode::TOO_MANY_REQUESTS
    }
}

/// Fixed-backoff retry applied to every upstream call.
///
/// Only rate-limited responses are retried. Transport errors and any other
/// status are handed back to the caller on the first attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    backoff: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, backoff: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn backoff(&self) -> Duration {
        self.backoff
    }

    pub async fn run<F, Fut, T>(&self, mut operation: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
        T: RateLimitSignal,
    {
        let mut attempt = 1;
        loop {
            let response = operation().await?;
            if !response.is_rate_limited() {
                return Ok(response);
            }

            if attempt >= self.max_attempts {
                return Err(ImporterError::RetryExhausted { attempts: attempt });
            }

            warn!(
                "Rate limited by upstream (attempt {}/{}), retrying in {:?}",
                attempt, self.max_attempts, self.backoff
            );
            tokio::time::sleep(self.backoff).await;
            attempt += 1;
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS, DEFAULT_BACKOFF)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct Status(bool);

    impl RateLimitSignal for Status {
        fn is_rate_limited(&self) -> bool {
            self.0
        }
    }

    fn instant() -> RetryPolicy {
        RetryPolicy::new(5, Duration::ZERO)
    }

    #[tokio::test]
    async fn succeeds_after_four_rate_limited_attempts() {
        let calls = AtomicU32::new(0);

        let result = instant()
            .run(|| {
                let call = calls.fetch_add(1, Ordering::SeqCst) + 1;
                async move { Ok(Status(call <= 4)) }
            })
            .await;

        assert!(matches!(result, Ok(Status(false))));
        assert_eq!(calls.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn five_rate_limited_attempts_exhaust_the_budget() {
        let calls = AtomicU32::new(0);

        let result = instant()
            .run(|| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Ok(Status(true)) }
            })
            .await;

        assert!(matches!(
            result,
            Err(ImporterError::RetryExhausted { attempts: 5 })
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn errors_are_not_retried() {
        let calls = AtomicU32::new(0);

        let result = instant()
            .run(|| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err::<Status, _>(ImporterError::TransformationError("boom".into())) }
            })
            .await;

        assert!(matches!(result, Err(ImporterError::TransformationError(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn zero_attempts_still_tries_once() {
        assert_eq!(RetryPolicy::new(0, Duration::ZERO).max_attempts(), 1);
        assert_eq!(RetryPolicy::default().backoff(), Duration::from_secs(60));
    }
}
