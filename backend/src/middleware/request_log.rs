//! Structured request logging.
//!
//! Every request runs inside a `request` span carrying the enrichment
//! properties (application, environment, version) plus the trace id, method
//! and path. One `info` event is emitted when the response is ready, with the
//! status code, protocol and elapsed time in milliseconds.
//!
//! Wrap this middleware inside [`crate::Trace`] so the trace id is already in
//! the request extensions when the span is opened.

use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Instant;

use actix_web::Error;
use actix_web::HttpMessage;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::field::{Empty, display};
use tracing::{Instrument, Span, info, info_span, warn};

use crate::domain::TraceId;

/// Properties attached to the process span and every request span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEnrichment {
    /// Application name, always [`LogEnrichment::APPLICATION`].
    pub application: String,
    /// Deployment environment, e.g. `Production`.
    pub environment: String,
    /// Crate version of the running build.
    pub version: String,
}

impl LogEnrichment {
    /// Application name reported in request spans.
    pub const APPLICATION: &'static str = "WebApi";

    /// Enrichment for this build running in `environment`.
    pub fn new(environment: impl Into<String>) -> Self {
        Self {
            application: Self::APPLICATION.to_owned(),
            environment: environment.into(),
            version: env!("CARGO_PKG_VERSION").to_owned(),
        }
    }

    /// Root span for events emitted outside a request, such as startup and
    /// shutdown. Worker threads do not inherit it, so request spans repeat
    /// the same fields.
    pub fn process_span(&self) -> Span {
        info_span!(
            "webapi",
            application = %self.application,
            environment = %self.environment,
            version = %self.version,
        )
    }
}

/// Request logging middleware.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use webapi::Trace;
/// use webapi::middleware::{LogEnrichment, RequestLogging};
///
/// let _app = App::new()
///     .wrap(RequestLogging::new(LogEnrichment::new("Development")))
///     .wrap(Trace);
/// ```
#[derive(Clone)]
pub struct RequestLogging {
    enrichment: Arc<LogEnrichment>,
}

impl RequestLogging {
    /// Log requests with the given enrichment properties.
    pub fn new(enrichment: LogEnrichment) -> Self {
        Self {
            enrichment: Arc::new(enrichment),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequestLogging
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestLoggingMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestLoggingMiddleware {
            service,
            enrichment: Arc::clone(&self.enrichment),
        }))
    }
}

/// Service wrapper produced by [`RequestLogging`].
pub struct RequestLoggingMiddleware<S> {
    service: S,
    enrichment: Arc<LogEnrichment>,
}

impl<S, B> Service<ServiceRequest> for RequestLoggingMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let trace_id = req.extensions().get::<TraceId>().copied();
        let protocol = format!("{:?}", req.version());
        let span = info_span!(
            "request",
            application = %self.enrichment.application,
            environment = %self.enrichment.environment,
            version = %self.enrichment.version,
            trace_id = Empty,
            method = %req.method(),
            path = %req.path(),
        );
        if let Some(trace_id) = trace_id {
            span.record("trace_id", display(trace_id));
        }

        let started = Instant::now();
        let fut = span.in_scope(|| self.service.call(req));
        Box::pin(
            async move {
                let result = fut.await;
                let duration_ms = started.elapsed().as_secs_f64() * 1000.0;
                match &result {
                    Ok(res) => info!(
                        status = res.status().as_u16(),
                        protocol = %protocol,
                        duration_ms,
                        "request completed"
                    ),
                    Err(error) => warn!(
                        %error,
                        protocol = %protocol,
                        duration_ms,
                        "request failed before a response was produced"
                    ),
                }
                result
            }
            .instrument(span),
        )
    }
}
