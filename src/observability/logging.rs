//! Structured logging setup
//!
//! Installs a `tracing` subscriber. `RUST_LOG` overrides the configured
//! level when set.

use thiserror::Error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid log filter {filter:?}: {detail}")]
    Filter { filter: String, detail: String },

    #[error("logger already installed: {0}")]
    AlreadyInstalled(String),
}

/// Install the global subscriber.
///
/// With `json` set, one JSON object is written per event.
pub fn init_logging(level: &str, json: bool) -> Result<(), LoggingError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level).map_err(|e| LoggingError::Filter {
            filter: level.to_string(),
            detail: e.to_string(),
        })?,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| fmt::layer().json().with_current_span(true)))
        .with((!json).then(|| fmt::layer().with_target(false)))
        .try_init()
        .map_err(|e| LoggingError::AlreadyInstalled(e.to_string()))
}
