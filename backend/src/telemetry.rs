//! Process-wide logging setup.
//!
//! [`init`] runs in `main` right after settings load: it installs a `tracing` subscriber writing
//! JSON lines to stdout and to a daily-rolling diagnostics file, and returns a
//! [`TelemetryGuard`] that flushes the file writer when dropped. Everything
//! else logs through the `tracing` macros.

use std::path::PathBuf;

use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{EnvFilter, fmt};

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "info,actix_web=info,actix_server=warn";

/// Where and how the diagnostics file is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    /// Directory holding the rolling files.
    pub log_dir: PathBuf,
    /// File name prefix; files are named `<prefix>.<date>.log`.
    pub file_prefix: String,
    /// Number of daily files kept before the oldest is deleted.
    pub retained_files: usize,
}

impl LogSettings {
    /// Prefix of the diagnostics files.
    pub const DEFAULT_FILE_PREFIX: &'static str = "diagnostics";
    /// One week of daily files.
    pub const DEFAULT_RETAINED_FILES: usize = 7;

    /// Settings writing `diagnostics.<date>.log` files under `log_dir`.
    pub fn new(log_dir: impl Into<PathBuf>) -> Self {
        Self {
            log_dir: log_dir.into(),
            file_prefix: Self::DEFAULT_FILE_PREFIX.to_owned(),
            retained_files: Self::DEFAULT_RETAINED_FILES,
        }
    }
}

/// Failures raised while installing the subscriber.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// The rolling file appender could not be created.
    #[error("failed to open log directory: {0}")]
    FileAppender(#[from] InitError),
    /// Another global subscriber is already installed.
    #[error("failed to install tracing subscriber: {0}")]
    Subscriber(#[from] TryInitError),
}

/// Keeps the non-blocking file writer alive; dropping it flushes pending
/// lines. Hold it until the server has stopped.
#[must_use = "dropping the guard stops file logging"]
pub struct TelemetryGuard {
    _file_writer: WorkerGuard,
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

fn file_appender(settings: &LogSettings) -> Result<RollingFileAppender, InitError> {
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(settings.file_prefix.as_str())
        .filename_suffix("log")
        .max_log_files(settings.retained_files)
        .build(&settings.log_dir)
}

/// Install the global subscriber.
///
/// # Errors
///
/// Returns [`TelemetryError`] when the log directory cannot be created or a
/// global subscriber is already installed.
pub fn init(settings: &LogSettings) -> Result<TelemetryGuard, TelemetryError> {
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender(settings)?);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer().json())
        .with(fmt::layer().json().with_ansi(false).with_writer(file_writer))
        .try_init()?;

    Ok(TelemetryGuard {
        _file_writer: guard,
    })
}

/// Log the startup banner: program name, executable path and version.
pub fn log_configure_info() {
    let path = std::env::current_exe()
        .map(|path| path.display().to_string())
        .unwrap_or_default();
    info!(
        program = env!("CARGO_PKG_NAME"),
        path = %path,
        version = env!("CARGO_PKG_VERSION"),
        "configure info"
    );
}
