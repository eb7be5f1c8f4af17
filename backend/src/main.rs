//! Service entry-point: wires telemetry, the report endpoint, the backend
//! API client and OpenAPI docs.

mod server;

use ortho_config::OrthoConfig;
use tracing::{Instrument, info};

use server::{ServerConfig, create_server};
use webapi::middleware::LogEnrichment;
use webapi::settings::AppSettings;
use webapi::telemetry;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|e| std::io::Error::other(e.to_string()))?;

    // Held until the server stops so buffered file logs are flushed on exit.
    let _telemetry = telemetry::init(&settings.log_settings()).map_err(std::io::Error::other)?;
    let process_span = LogEnrichment::new(settings.environment()).process_span();

    async move {
        telemetry::log_configure_info();

        let config = ServerConfig::from_settings(&settings).map_err(std::io::Error::other)?;
        let server = create_server(config)?;
        let result = server.await;
        info!("server stopped");
        result
    }
    .instrument(process_span)
    .await
}
