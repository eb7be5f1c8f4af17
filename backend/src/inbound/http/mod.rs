//! HTTP inbound adapter exposing REST endpoints.
//!
//! Each endpoint group exposes a `configure` function. The server applies
//! every entry of [`ENDPOINT_GROUPS`] to its `App`, so adding a group means
//! adding one line here.

use actix_web::web;

pub mod error;
pub mod error_reports;
pub mod openapi;
pub mod state;

pub use error::ApiResult;

/// Registration callback for one group of endpoints.
pub type EndpointGroup = fn(&mut web::ServiceConfig);

/// Endpoint groups registered by the server, in registration order.
pub const ENDPOINT_GROUPS: &[EndpointGroup] = &[error_reports::configure, openapi::configure];

/// Apply every endpoint group to `cfg`.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use webapi::inbound::http::configure_endpoints;
///
/// let _app = App::new().configure(configure_endpoints);
/// ```
pub fn configure_endpoints(cfg: &mut web::ServiceConfig) {
    for register in ENDPOINT_GROUPS {
        register(cfg);
    }
}
