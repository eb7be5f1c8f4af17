//! Domain primitives and services.
//!
//! Purpose: hold the HTTP-agnostic core of the service. Handlers and outbound
//! adapters depend on the types and ports declared here, never the reverse.
//!
//! Public surface:
//! - Error / ErrorCode: API error payload and stable error identifier.
//! - TraceId: request correlation identifier carried in task-local storage.
//! - ErrorReportService: report lookup with a simulated upstream delay.
//! - RetryingBackendApi / RetryPolicy: transient-failure retries for the
//!   backend API port.

pub mod backend_retry;
pub mod error;
pub mod error_report;
pub mod ports;
pub mod runtime;
pub mod trace_id;

pub use self::backend_retry::{RetryPolicy, RetryingBackendApi};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::error_report::{ErrorReport, ErrorReportService, ReportId};
pub use self::runtime::{Sleeper, TokioSleeper};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
