//! Error-report web API library.
//!
//! The crate follows a hexagonal layout: `domain` holds the core types,
//! services and ports; `inbound` adapts HTTP requests onto them; `outbound`
//! implements ports against external systems.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
pub mod telemetry;
#[cfg(test)]
pub(crate) mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
