//! Driven port for calls to the downstream backend API.
//!
//! The domain owns the request/response shapes and the failure taxonomy so
//! the retry policy can classify failures without knowing about reqwest.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::domain::Error;

/// HTTP verbs the backend client issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendMethod {
    /// Read without a body.
    Get,
    /// Submit a JSON body.
    Post,
}

/// One call against the backend, relative to its configured base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendRequest {
    /// HTTP method.
    pub method: BackendMethod,
    /// Path relative to the backend base URL, e.g. `reports/7`.
    pub path: String,
    /// Optional JSON body.
    pub body: Option<Value>,
}

impl BackendRequest {
    /// Build a `GET` request for `path`.
    ///
    /// # Examples
    /// ```
    /// use webapi::domain::ports::{BackendMethod, BackendRequest};
    ///
    /// let request = BackendRequest::get("reports/7");
    /// assert_eq!(request.method, BackendMethod::Get);
    /// assert!(request.body.is_none());
    /// ```
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: BackendMethod::Get,
            path: path.into(),
            body: None,
        }
    }

    /// Build a `POST` request carrying a JSON body.
    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: BackendMethod::Post,
            path: path.into(),
            body: Some(body),
        }
    }
}

/// Successful backend response.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BackendResponse {
    /// HTTP status code (always 2xx for successful responses).
    pub status: u16,
    /// Raw response body.
    pub body: Vec<u8>,
}

impl BackendResponse {
    /// Decode the body as JSON.
    ///
    /// # Errors
    /// Returns [`BackendApiError::Decode`] when the body is not valid JSON for
    /// `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, BackendApiError> {
        serde_json::from_slice(&self.body).map_err(|error| {
            BackendApiError::decode(format!("invalid backend JSON payload: {error}"))
        })
    }
}

/// Failures surfaced by backend calls.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendApiError {
    /// The connection failed or was reset before a response arrived.
    #[error("backend transport failed: {message}")]
    Transport { message: String },
    /// The call exceeded the client timeout or the backend answered 408.
    #[error("backend timeout: {message}")]
    Timeout { message: String },
    /// The backend answered with a 5xx status.
    #[error("backend server error (status {status}): {message}")]
    ServerError { status: u16, message: String },
    /// The backend refused the request with a non-retryable status.
    #[error("backend rejected request (status {status}): {message}")]
    Rejected { status: u16, message: String },
    /// The response body could not be decoded.
    #[error("backend response decode failed: {message}")]
    Decode { message: String },
    /// The request could not be built, e.g. the path does not form a URL.
    #[error("backend request invalid: {message}")]
    InvalidRequest { message: String },
}

impl BackendApiError {
    /// Connection-level failure before any response arrived.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Client timeout or a 408 answer.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    /// 5xx answer from the backend.
    pub fn server_error(status: u16, message: impl Into<String>) -> Self {
        Self::ServerError {
            status,
            message: message.into(),
        }
    }

    /// Non-retryable, non-2xx answer from the backend.
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }

    /// Response body that could not be decoded.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Request that could not be built.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Return whether retrying this error is expected to help.
    ///
    /// # Examples
    /// ```
    /// use webapi::domain::ports::BackendApiError;
    ///
    /// assert!(BackendApiError::server_error(503, "busy").is_retryable());
    /// assert!(!BackendApiError::rejected(404, "missing").is_retryable());
    /// ```
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Transport { .. } | Self::Timeout { .. } | Self::ServerError { .. }
        )
    }

    /// HTTP status reported by the backend, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ServerError { status, .. } | Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<BackendApiError> for Error {
    fn from(value: BackendApiError) -> Self {
        let details = json!({
            "reason": value.to_string(),
            "backendStatus": value.status(),
        });
        if value.is_retryable() {
            Error::service_unavailable("backend api is unavailable").with_details(details)
        } else {
            Error::bad_gateway("backend api call failed").with_details(details)
        }
    }
}

/// Port for issuing calls to the backend API.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BackendApi: Send + Sync {
    /// Execute one logical call.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use webapi::domain::ports::{BackendApi, BackendRequest, FixtureBackendApi};
    ///
    /// let backend = FixtureBackendApi;
    /// let response = backend.send(&BackendRequest::get("reports/7")).await?;
    /// assert_eq!(response.status, 200);
    /// # Ok::<(), webapi::domain::ports::BackendApiError>(())
    /// ```
    async fn send(&self, request: &BackendRequest) -> Result<BackendResponse, BackendApiError>;
}

/// Fixture implementation answering every call with an empty `200`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureBackendApi;

#[async_trait]
impl BackendApi for FixtureBackendApi {
    async fn send(&self, _request: &BackendRequest) -> Result<BackendResponse, BackendApiError> {
        Ok(BackendResponse {
            status: 200,
            body: Vec::new(),
        })
    }
}
