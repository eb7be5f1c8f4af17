//! Reqwest-backed backend API adapter.
//!
//! This adapter owns transport details only: URL resolution, request
//! serialisation, timeout and HTTP status mapping. Retries live in the
//! domain decorator that wraps it.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode, Url};
use tracing::debug;

use crate::domain::ports::{
    BackendApi, BackendApiError, BackendMethod, BackendRequest, BackendResponse,
};
use crate::domain::{TRACE_ID_HEADER, TraceId};

/// Backend API adapter issuing requests relative to one base URL.
pub struct ReqwestBackendApi {
    client: Client,
    base_url: Url,
}

impl ReqwestBackendApi {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: with_trailing_slash(base_url),
        })
    }
}

#[async_trait]
impl BackendApi for ReqwestBackendApi {
    async fn send(&self, request: &BackendRequest) -> Result<BackendResponse, BackendApiError> {
        let url = resolve_url(&self.base_url, &request.path)?;
        debug!(method = ?request.method, %url, "calling backend api");

        let mut builder = self
            .client
            .request(to_reqwest_method(request.method), url)
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(trace_id) = TraceId::current() {
            builder = builder.header(TRACE_ID_HEADER, trace_id.to_string());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        Ok(BackendResponse {
            status: status.as_u16(),
            body: body.to_vec(),
        })
    }
}

fn to_reqwest_method(method: BackendMethod) -> Method {
    match method {
        BackendMethod::Get => Method::GET,
        BackendMethod::Post => Method::POST,
    }
}

/// Treat the base path as a directory: `Url::join` replaces the last
/// segment of `http://backend/api`, so it must end in `/`.
fn with_trailing_slash(mut base: Url) -> Url {
    if !base.cannot_be_a_base() && !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base
}

/// Resolve `path` below a slash-terminated `base`, keeping its path prefix.
fn resolve_url(base: &Url, path: &str) -> Result<Url, BackendApiError> {
    base.join(path.trim_start_matches('/')).map_err(|error| {
        BackendApiError::invalid_request(format!("cannot resolve backend path {path:?}: {error}"))
    })
}

fn map_transport_error(error: reqwest::Error) -> BackendApiError {
    if error.is_timeout() {
        BackendApiError::timeout(error.to_string())
    } else {
        BackendApiError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> BackendApiError {
    let body_preview = body_preview(body);
    let message = if body_preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), body_preview)
    };

    match status {
        StatusCode::REQUEST_TIMEOUT => BackendApiError::timeout(message),
        _ if status.is_server_error() => BackendApiError::server_error(status.as_u16(), message),
        _ => BackendApiError::rejected(status.as_u16(), message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
