//! Runtime abstractions shared by domain services.

use std::time::Duration;

use async_trait::async_trait;

/// Async sleeping abstraction so delays and backoff can be observed in tests.
#[async_trait]
pub trait Sleeper: Send + Sync {
    /// Suspend the current task for `duration` without blocking the worker.
    ///
    /// ```rust,no_run
    /// use async_trait::async_trait;
    /// use std::sync::Mutex;
    /// use std::time::Duration;
    /// use webapi::domain::Sleeper;
    ///
    /// #[derive(Default)]
    /// struct CountingSleeper {
    ///     calls: Mutex<u32>,
    /// }
    ///
    /// #[async_trait]
    /// impl Sleeper for CountingSleeper {
    ///     async fn sleep(&self, _duration: Duration) {
    ///         *self.calls.lock().expect("calls mutex") += 1;
    ///     }
    /// }
    /// # async fn demo() {
    /// let sleeper = CountingSleeper::default();
    /// sleeper.sleep(Duration::from_millis(25)).await;
    /// assert_eq!(*sleeper.calls.lock().expect("calls mutex"), 1);
    /// # }
    /// ```
    async fn sleep(&self, duration: Duration);
}

/// Tokio timer-backed sleeper.
///
/// Dropping the returned future cancels the wait, so a disconnected client
/// stops the delay promptly.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }
}
