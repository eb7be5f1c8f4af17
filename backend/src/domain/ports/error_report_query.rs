//! Driving port for reading error reports.

use async_trait::async_trait;

use crate::domain::{Error, ErrorReport, ReportId};

/// Use-case port consumed by the HTTP report endpoint.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ErrorReportQuery: Send + Sync {
    /// Produce the report acknowledgement for `id`.
    async fn fetch_report(&self, id: ReportId) -> Result<ErrorReport, Error>;
}

/// Fixture implementation answering immediately, without simulated latency.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureErrorReportQuery;

#[async_trait]
impl ErrorReportQuery for FixtureErrorReportQuery {
    async fn fetch_report(&self, id: ReportId) -> Result<ErrorReport, Error> {
        Ok(ErrorReport::for_id(id))
    }
}
