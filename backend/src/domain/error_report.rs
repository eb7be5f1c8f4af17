//! Error report lookup.
//!
//! Reports are not stored anywhere yet: the service simulates an upstream
//! dependency with a fixed, cooperative delay and then acknowledges the
//! requested identifier.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use crate::domain::Error;
use crate::domain::ports::ErrorReportQuery;
use crate::domain::{Sleeper, TokioSleeper};

/// Caller-supplied report identifier.
///
/// Any `i32` is accepted as-is, negative values included; the router has
/// already rejected segments that are not integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReportId(i32);

impl ReportId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    /// Raw identifier value.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl From<i32> for ReportId {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for ReportId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Acknowledgement produced for one report request.
///
/// # Examples
/// ```
/// use webapi::domain::{ErrorReport, ReportId};
///
/// let report = ErrorReport::for_id(ReportId::new(42));
/// assert_eq!(report.message(), "Error report with ID: 42");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReport {
    id: ReportId,
    message: String,
}

impl ErrorReport {
    /// Build the acknowledgement for `id`.
    #[must_use]
    pub fn for_id(id: ReportId) -> Self {
        Self {
            id,
            message: format!("Error report with ID: {id}"),
        }
    }

    /// Identifier the report was requested for.
    #[must_use]
    pub fn id(&self) -> ReportId {
        self.id
    }

    /// Text returned to the caller.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Consume the report, yielding its text.
    #[must_use]
    pub fn into_message(self) -> String {
        self.message
    }
}

/// Report lookup that waits out a simulated upstream latency.
pub struct ErrorReportService {
    sleeper: Arc<dyn Sleeper>,
    delay: Duration,
}

impl ErrorReportService {
    /// Simulated upstream latency used when nothing else is configured.
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(1000);

    /// Build a service that waits on the tokio timer.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self::with_sleeper(Arc::new(TokioSleeper), delay)
    }

    /// Build a service with an injected sleeper.
    #[must_use]
    pub fn with_sleeper(sleeper: Arc<dyn Sleeper>, delay: Duration) -> Self {
        Self { sleeper, delay }
    }

    /// Configured simulated latency.
    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for ErrorReportService {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELAY)
    }
}

#[async_trait]
impl ErrorReportQuery for ErrorReportService {
    async fn fetch_report(&self, id: ReportId) -> Result<ErrorReport, Error> {
        self.sleeper.sleep(self.delay).await;
        info!(id = id.get(), "getting error report");
        Ok(ErrorReport::for_id(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::RecordingSleeper;
    use rstest::rstest;

    #[rstest]
    #[case::positive(7, "Error report with ID: 7")]
    #[case::zero(0, "Error report with ID: 0")]
    #[case::negative(-12, "Error report with ID: -12")]
    #[case::max(i32::MAX, "Error report with ID: 2147483647")]
    #[tokio::test]
    async fn acknowledges_any_identifier(#[case] raw: i32, #[case] expected: &str) {
        let sleeper = Arc::new(RecordingSleeper::default());
        let service = ErrorReportService::with_sleeper(sleeper.clone(), Duration::from_millis(5));

        let report = service
            .fetch_report(ReportId::new(raw))
            .await
            .expect("lookup never fails");

        assert_eq!(report.message(), expected);
        assert_eq!(report.id().get(), raw);
        assert_eq!(sleeper.recorded(), [Duration::from_millis(5)]);
    }

    #[tokio::test]
    async fn repeated_lookups_are_identical() {
        let service = ErrorReportService::with_sleeper(
            Arc::new(RecordingSleeper::default()),
            ErrorReportService::DEFAULT_DELAY,
        );
        let first = service.fetch_report(ReportId::new(3)).await.expect("first");
        let second = service.fetch_report(ReportId::new(3)).await.expect("second");
        assert_eq!(first, second);
    }

    #[tokio::test(start_paused = true)]
    async fn default_service_waits_before_answering() {
        let service = ErrorReportService::default();
        let started = tokio::time::Instant::now();

        let report = service.fetch_report(ReportId::new(1)).await.expect("report");

        assert!(started.elapsed() >= ErrorReportService::DEFAULT_DELAY);
        assert_eq!(report.into_message(), "Error report with ID: 1");
    }
}
