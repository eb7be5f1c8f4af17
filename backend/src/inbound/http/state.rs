//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    BackendApi, ErrorReportQuery, FixtureBackendApi, FixtureErrorReportQuery,
};

/// Dependency bundle for HTTP handlers.
///
/// Both ports are shared read-only across workers; nothing here is mutated
/// after startup.
#[derive(Clone)]
pub struct HttpState {
    /// Report lookup behind `GET /api/v1/report/{id}`.
    pub error_reports: Arc<dyn ErrorReportQuery>,
    /// Retrying backend API client, built once at startup.
    pub backend: Arc<dyn BackendApi>,
}

impl HttpState {
    /// Construct state from its ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use webapi::domain::ports::{FixtureBackendApi, FixtureErrorReportQuery};
    /// use webapi::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(
    ///     Arc::new(FixtureErrorReportQuery),
    ///     Arc::new(FixtureBackendApi),
    /// );
    /// let _reports = state.error_reports.clone();
    /// ```
    pub fn new(error_reports: Arc<dyn ErrorReportQuery>, backend: Arc<dyn BackendApi>) -> Self {
        Self {
            error_reports,
            backend,
        }
    }

    /// State backed by fixture ports that answer immediately.
    pub fn fixture() -> Self {
        Self::new(Arc::new(FixtureErrorReportQuery), Arc::new(FixtureBackendApi))
    }
}
