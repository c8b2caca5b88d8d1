//! Observability for the content API
//!
//! - Structured logging via `tracing`
//! - Per-request transaction ids carried in log spans
//! - Request counts and latency by status class

pub mod logging;
pub mod metrics;
pub mod transaction;

pub use logging::{init_logging, LoggingError};
pub use metrics::{track_metrics, HttpMetrics, MetricsSnapshot, StatusClassSnapshot};
pub use transaction::{request_span, transaction_id, TransactionId, REQUEST_ID_HEADER};
