//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;

use webapi::Trace;
use webapi::inbound::http::configure_endpoints;
use webapi::inbound::http::state::HttpState;
use webapi::middleware::{LogEnrichment, RequestLogging};
#[cfg(debug_assertions)]
use utoipa_swagger_ui::{Config, SwaggerUi};
#[cfg(debug_assertions)]
use webapi::inbound::http::openapi::OPENAPI_DOCUMENT_PATH;

fn build_app(
    http_state: web::Data<HttpState>,
    enrichment: LogEnrichment,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(http_state)
        .wrap(RequestLogging::new(enrichment))
        .wrap(Trace)
        .configure(configure_endpoints);

    // Reads the document from the route registered by `configure_endpoints`.
    #[cfg(debug_assertions)]
    let app = app.service(
        SwaggerUi::new("/docs/{_:.*}").config(Config::from(OPENAPI_DOCUMENT_PATH)),
    );

    app
}

/// Construct an Actix HTTP server from the provided configuration.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when building the backend client, binding
/// the socket or starting the server fails.
pub fn create_server(config: ServerConfig) -> std::io::Result<Server> {
    let http_state = build_http_state(&config)?;
    let ServerConfig {
        bind_addr,
        enrichment,
        report_delay: _,
        backend: _,
    } = config;

    info!(
        %bind_addr,
        environment = %enrichment.environment,
        "starting http server"
    );
    let server = HttpServer::new(move || build_app(http_state.clone(), enrichment.clone()))
        .bind(bind_addr)?
        .run();

    Ok(server)
}
