//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] describes the report endpoint and the JSON error envelope. The
//! document is served at `/openapi/v1.json`, backs Swagger UI in debug
//! builds, and is exported via `cargo run --bin openapi-dump` for external
//! tooling.

use utoipa::OpenApi;

use crate::domain::{Error, ErrorCode};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "WebApi",
        description = "Error report acknowledgements backed by a retrying backend API client."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(crate::inbound::http::error_reports::get_error_report),
    components(schemas(Error, ErrorCode)),
    tags(
        (name = "reports", description = "Error report acknowledgements")
    )
)]
pub struct ApiDoc;
