//! Service configuration loaded via OrthoConfig.
//!
//! The environment name carries an OrthoConfig default so an empty
//! environment still merges into a settings object; the other fields are
//! optional and resolved to defaults by their accessors.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::domain::RetryPolicy;
use crate::outbound::backend_api::BackendApiConfig;
use crate::telemetry::LogSettings;

const DEFAULT_ENVIRONMENT: &str = "Production";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_BACKEND_BASE_URL: &str = "http://localhost:5000/";
const DEFAULT_BACKEND_TIMEOUT_MS: u64 = 30_000;
const DEFAULT_REPORT_DELAY_MS: u64 = 1_000;
const DEFAULT_LOG_DIR: &str = "LogFiles";

/// Configuration values read from `WEBAPI_*` environment variables and the
/// command line.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "WEBAPI")]
pub struct AppSettings {
    /// Deployment environment name, reported in log enrichment.
    #[ortho_config(default = DEFAULT_ENVIRONMENT.to_owned())]
    pub environment: String,
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// Base URL of the downstream backend API.
    pub backend_base_url: Option<String>,
    /// Per-attempt backend request timeout in milliseconds.
    pub backend_timeout_ms: Option<u64>,
    /// Simulated upstream latency of the report endpoint in milliseconds.
    pub report_delay_ms: Option<u64>,
    /// Directory for the rolling diagnostics log files.
    pub log_dir: Option<PathBuf>,
}

/// Invalid configuration values.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// `WEBAPI_BIND_ADDR` is not a socket address.
    #[error("invalid bind address {value:?}: {source}")]
    BindAddr {
        value: String,
        source: std::net::AddrParseError,
    },
    /// `WEBAPI_BACKEND_BASE_URL` is not an absolute URL.
    #[error("invalid backend base url {value:?}: {source}")]
    BackendBaseUrl {
        value: String,
        source: url::ParseError,
    },
}

impl AppSettings {
    /// Return the environment name (`Production` unless overridden).
    pub fn environment(&self) -> &str {
        self.environment.as_str()
    }

    /// Return the parsed bind address.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::BindAddr`] when the value is not a socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    /// Return the parsed backend base URL.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::BackendBaseUrl`] when the value is not a URL.
    pub fn backend_base_url(&self) -> Result<Url, SettingsError> {
        let value = self
            .backend_base_url
            .as_deref()
            .unwrap_or(DEFAULT_BACKEND_BASE_URL);
        Url::parse(value).map_err(|source| SettingsError::BackendBaseUrl {
            value: value.to_owned(),
            source,
        })
    }

    /// Return the per-attempt backend timeout.
    pub fn backend_timeout(&self) -> Duration {
        Duration::from_millis(
            self.backend_timeout_ms
                .unwrap_or(DEFAULT_BACKEND_TIMEOUT_MS),
        )
    }

    /// Return the simulated report latency.
    pub fn report_delay(&self) -> Duration {
        Duration::from_millis(self.report_delay_ms.unwrap_or(DEFAULT_REPORT_DELAY_MS))
    }

    /// Return the log file settings.
    pub fn log_settings(&self) -> LogSettings {
        LogSettings::new(
            self.log_dir
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR)),
        )
    }

    /// Return the backend client configuration with the default retry policy.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::BackendBaseUrl`] when the base URL is invalid.
    pub fn backend_api_config(&self) -> Result<BackendApiConfig, SettingsError> {
        Ok(BackendApiConfig {
            base_url: self.backend_base_url()?,
            timeout: self.backend_timeout(),
            retry: RetryPolicy::default(),
        })
    }
}
