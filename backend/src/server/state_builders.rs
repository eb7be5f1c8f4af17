//! Builders for the HTTP state.
//!
//! Every collaborator is constructed here, once, and handed to the handlers
//! through `web::Data`.

use std::sync::Arc;

use actix_web::web;

use webapi::domain::ErrorReportService;
use webapi::inbound::http::state::HttpState;
use webapi::outbound::backend_api::retrying_backend_api;

use super::ServerConfig;

/// Build the shared HTTP state: the report service and the retrying backend
/// API client.
///
/// # Errors
///
/// Returns [`std::io::Error`] when the backend HTTP client cannot be built.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let backend = retrying_backend_api(config.backend.clone()).map_err(|e| {
        std::io::Error::other(format!("backend api client construction failed: {e}"))
    })?;
    let error_reports = Arc::new(ErrorReportService::new(config.report_delay));
    Ok(web::Data::new(HttpState::new(error_reports, backend)))
}
