//! Transient-failure retry policy for backend API calls.
//!
//! [`RetryingBackendApi`] decorates any [`BackendApi`] so callers get one
//! definitive outcome per logical call: transient failures (transport,
//! timeout, 5xx) are retried with un-jittered exponential backoff up to a
//! fixed budget, everything else is returned on the first attempt.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::ports::{BackendApi, BackendApiError, BackendRequest, BackendResponse};
use crate::domain::{Sleeper, TokioSleeper};

/// Retry budget and backoff schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the initial attempt.
    pub max_retries: u32,
    /// Wait before the first retry; doubles for each later retry.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    /// Total calls allowed for one logical request, initial attempt included.
    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Wait before the zero-based `retry`: `base_delay * 2^retry`.
    ///
    /// # Examples
    /// ```
    /// use std::time::Duration;
    /// use webapi::domain::RetryPolicy;
    ///
    /// let policy = RetryPolicy::default();
    /// assert_eq!(policy.delay_before_retry(0), Duration::from_millis(500));
    /// assert_eq!(policy.delay_before_retry(2), Duration::from_millis(2000));
    /// ```
    #[must_use]
    pub fn delay_before_retry(&self, retry: u32) -> Duration {
        let factor = 2_u32.saturating_pow(retry);
        self.base_delay.saturating_mul(factor)
    }

    /// Sum of every backoff wait when all retries are used.
    #[must_use]
    pub fn worst_case_backoff(&self) -> Duration {
        (0..self.max_retries)
            .map(|retry| self.delay_before_retry(retry))
            .fold(Duration::ZERO, Duration::saturating_add)
    }
}

/// Backend port decorator applying a [`RetryPolicy`].
pub struct RetryingBackendApi {
    inner: Arc<dyn BackendApi>,
    policy: RetryPolicy,
    sleeper: Arc<dyn Sleeper>,
}

impl RetryingBackendApi {
    /// Wrap `inner`, waiting between attempts on the tokio timer.
    pub fn new(inner: Arc<dyn BackendApi>, policy: RetryPolicy) -> Self {
        Self::with_sleeper(inner, policy, Arc::new(TokioSleeper))
    }

    /// Wrap `inner` with an injected sleeper.
    pub fn with_sleeper(
        inner: Arc<dyn BackendApi>,
        policy: RetryPolicy,
        sleeper: Arc<dyn Sleeper>,
    ) -> Self {
        Self {
            inner,
            policy,
            sleeper,
        }
    }
}

#[async_trait]
impl BackendApi for RetryingBackendApi {
    async fn send(&self, request: &BackendRequest) -> Result<BackendResponse, BackendApiError> {
        let max_attempts = self.policy.max_attempts();

        for attempt in 1..=max_attempts {
            match self.inner.send(request).await {
                Ok(response) => {
                    debug!(attempt, path = %request.path, "backend call succeeded");
                    return Ok(response);
                }
                Err(error) if error.is_retryable() && attempt < max_attempts => {
                    let delay = self.policy.delay_before_retry(attempt - 1);
                    warn!(
                        %error,
                        attempt,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        path = %request.path,
                        "transient backend failure; retrying"
                    );
                    self.sleeper.sleep(delay).await;
                }
                Err(error) if error.is_retryable() => {
                    warn!(%error, attempt, path = %request.path, "backend retries exhausted");
                    return Err(error);
                }
                Err(error) => {
                    warn!(%error, attempt, path = %request.path, "backend call failed");
                    return Err(error);
                }
            }
        }

        Err(BackendApiError::invalid_request(
            "retry loop finished without an outcome",
        ))
    }
}
