//! Request middleware.
//!
//! Purpose: request lifecycle concerns shared by every endpoint: trace
//! identifier propagation and structured request logging.

pub mod request_log;
pub mod trace;

pub use request_log::{LogEnrichment, RequestLogging};
pub use trace::Trace;
