//! Backend API outbound adapters.
//!
//! [`ReqwestBackendApi`] performs the HTTP calls; [`retrying_backend_api`]
//! composes it with the domain retry decorator so callers only ever see the
//! final outcome of a logical call.

mod http_client;

use std::sync::Arc;
use std::time::Duration;

use reqwest::Url;

use crate::domain::ports::BackendApi;
use crate::domain::{RetryPolicy, RetryingBackendApi};

pub use http_client::ReqwestBackendApi;

/// Connection settings for the backend API client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendApiConfig {
    /// Base URL request paths are resolved against.
    pub base_url: Url,
    /// Per-attempt request timeout.
    pub timeout: Duration,
    /// Retry policy applied to transient failures.
    pub retry: RetryPolicy,
}

/// Build the backend client registered with the application: a reqwest
/// adapter wrapped in [`RetryingBackendApi`].
///
/// # Errors
///
/// Returns an error when the reqwest client cannot be constructed.
pub fn retrying_backend_api(
    config: BackendApiConfig,
) -> Result<Arc<dyn BackendApi>, reqwest::Error> {
    let BackendApiConfig {
        base_url,
        timeout,
        retry,
    } = config;
    let inner = ReqwestBackendApi::new(base_url, timeout)?;
    Ok(Arc::new(RetryingBackendApi::new(Arc::new(inner), retry)))
}
