//! Machine-readable API description.
//!
//! ```text
//! GET /openapi/v1.json
//! ```

use actix_web::{HttpResponse, web};
use utoipa::OpenApi;

use crate::doc::ApiDoc;

/// Route serving the OpenAPI document; Swagger UI reads from it too.
pub const OPENAPI_DOCUMENT_PATH: &str = "/openapi/v1.json";

/// Serve the OpenAPI document as JSON.
pub async fn openapi_document() -> HttpResponse {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

/// Register the document endpoint.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route(OPENAPI_DOCUMENT_PATH, web::get().to(openapi_document));
}
