//! Domain ports for the hexagonal boundary.

mod backend_api;
mod error_report_query;

#[cfg(test)]
pub use backend_api::MockBackendApi;
pub use backend_api::{
    BackendApi, BackendApiError, BackendMethod, BackendRequest, BackendResponse,
    FixtureBackendApi,
};
#[cfg(test)]
pub use error_report_query::MockErrorReportQuery;
pub use error_report_query::{ErrorReportQuery, FixtureErrorReportQuery};
