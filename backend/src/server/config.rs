//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::time::Duration;

use webapi::domain::ErrorReportService;
use webapi::middleware::LogEnrichment;
use webapi::outbound::backend_api::BackendApiConfig;
use webapi::settings::{AppSettings, SettingsError};

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) enrichment: LogEnrichment,
    pub(crate) report_delay: Duration,
    pub(crate) backend: BackendApiConfig,
}

impl ServerConfig {
    /// Construct a configuration with the default report delay and
    /// `Production` log enrichment.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, backend: BackendApiConfig) -> Self {
        Self {
            bind_addr,
            enrichment: LogEnrichment::new("Production"),
            report_delay: ErrorReportService::DEFAULT_DELAY,
            backend,
        }
    }

    /// Resolve every server setting from the loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when the bind address or backend URL is invalid.
    pub fn from_settings(settings: &AppSettings) -> Result<Self, SettingsError> {
        Ok(Self::new(settings.bind_addr()?, settings.backend_api_config()?)
            .with_environment(settings.environment())
            .with_report_delay(settings.report_delay()))
    }

    /// Override the environment name reported in request logs.
    #[must_use]
    pub fn with_environment(mut self, environment: &str) -> Self {
        self.enrichment = LogEnrichment::new(environment);
        self
    }

    /// Override the simulated report latency.
    #[must_use]
    pub fn with_report_delay(mut self, delay: Duration) -> Self {
        self.report_delay = delay;
        self
    }

    /// Return the socket address the server will bind to.
    #[cfg_attr(
        not(any(test, doctest)),
        expect(dead_code, reason = "Exercised by unit tests for fixture access")
    )]
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
