use crate::error::{ReportFinderError, Result};
use log::{error, warn};
use std::fmt;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(1000);

/// Decides whether a failed attempt may be retried.
pub type RetryClassifier = fn(&ReportFinderError) -> bool;

/// Bounded retry with exponential backoff.
///
/// Attempt `n` (0-indexed) that fails with a retryable error is followed by
/// a pause of `base_delay * 2^n`. The final attempt is never followed by a
/// pause; its error is returned as-is.
#[derive(Clone, Copy)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
    classifier: RetryClassifier,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS, DEFAULT_BASE_DELAY)
    }
}

impl fmt::Debug for RetryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryPolicy")
            .field("max_attempts", &self.max_attempts)
            .field("base_delay", &self.base_delay)
            .finish_non_exhaustive()
    }
}

impl RetryPolicy {
    /// `max_attempts` counts the first try; zero is treated as one.
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
            classifier: ReportFinderError::is_transient,
        }
    }

    pub fn with_classifier(mut self, classifier: RetryClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay
            .saturating_mul(2u32.saturating_pow(attempt))
    }

    pub fn is_retryable(&self, err: &ReportFinderError) -> bool {
        (self.classifier)(err)
    }

    /// Runs `operation` until it succeeds, fails with a non-retryable error,
    /// or runs out of attempts. The attempt index is passed to `operation`.
    ///
    /// Cancelling `cancel` aborts the in-flight attempt or the pending pause
    /// and returns [`ReportFinderError::Cancelled`]; no attempt starts after
    /// that.
    pub async fn run<T, F, Fut>(&self, cancel: &CancellationToken, mut operation: F) -> Result<T>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempt = 0;
        loop {
            if cancel.is_cancelled() {
                return Err(ReportFinderError::Cancelled);
            }

            let outcome = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(ReportFinderError::Cancelled),
                outcome = operation(attempt) => outcome,
            };

            let err = match outcome {
                Ok(value) => return Ok(value),
                Err(err) => err,
            };

            warn!(
                "Attempt {} of {} failed: {}",
                attempt + 1,
                self.max_attempts,
                err
            );

            if !self.is_retryable(&err) {
                return Err(err);
            }
            if attempt + 1 >= self.max_attempts {
                error!("Giving up after {} attempts: {}", self.max_attempts, err);
                return Err(err);
            }

            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(ReportFinderError::Cancelled),
                _ = sleep(self.delay_for(attempt)) => {}
            }
            attempt += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    fn unavailable(attempt: u32) -> ReportFinderError {
        ReportFinderError::Service {
            status: 503,
            message: format!("overloaded on attempt {}", attempt + 1),
        }
    }

    #[test]
    fn test_delay_schedule() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts(), 3);
        assert_eq!(policy.delay_for(0), Duration::from_secs(1));
        assert_eq!(policy.delay_for(1), Duration::from_secs(2));
        assert_eq!(policy.delay_for(2), Duration::from_secs(4));
    }

    #[test]
    fn test_zero_attempts_means_one() {
        assert_eq!(RetryPolicy::new(0, DEFAULT_BASE_DELAY).max_attempts(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retries_transient_then_succeeds() {
        let policy = RetryPolicy::default();
        let cancel = CancellationToken::new();
        let mut calls = 0;
        let start = Instant::now();

        let result = policy
            .run(&cancel, |attempt| {
                calls += 1;
                async move {
                    if attempt < 2 {
                        Err(unavailable(attempt))
                    } else {
                        Ok("done")
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), "done");
        assert_eq!(calls, 3);
        assert_eq!(start.elapsed(), Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fatal_error_is_not_retried() {
        let policy = RetryPolicy::default();
        let cancel = CancellationToken::new();
        let mut calls = 0;
        let start = Instant::now();

        let result: Result<()> = policy
            .run(&cancel, |_| {
                calls += 1;
                async {
                    Err(ReportFinderError::Service {
                        status: 400,
                        message: "Bad Request".to_string(),
                    })
                }
            })
            .await;

        assert_eq!(result.unwrap_err().status(), Some(400));
        assert_eq!(calls, 1);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhaustion_returns_last_error_without_trailing_pause() {
        let policy = RetryPolicy::default();
        let cancel = CancellationToken::new();
        let mut calls = 0;
        let start = Instant::now();

        let result: Result<()> = policy
            .run(&cancel, |attempt| {
                calls += 1;
                async move { Err(unavailable(attempt)) }
            })
            .await;

        let err = result.unwrap_err();
        assert!(err.to_string().contains("overloaded on attempt 3"));
        assert_eq!(calls, 3);
        assert_eq!(start.elapsed(), Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_during_backoff_stops_retrying() {
        let policy = RetryPolicy::default();
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        let mut calls = 0;

        let result: Result<()> = policy
            .run(&cancel, |attempt| {
                calls += 1;
                trigger.cancel();
                async move { Err(unavailable(attempt)) }
            })
            .await;

        assert!(matches!(result, Err(ReportFinderError::Cancelled)));
        assert_eq!(calls, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_classifier() {
        let policy = RetryPolicy::new(2, Duration::from_millis(10)).with_classifier(|_| true);
        let cancel = CancellationToken::new();
        let mut calls = 0;

        let result: Result<()> = policy
            .run(&cancel, |_| {
                calls += 1;
                async { Err(ReportFinderError::MissingCredential) }
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls, 2);
    }
}
