//! # Content API Errors
//!
//! Error types for the content lookup path and their HTTP mapping.

use std::time::Duration;

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Content type of every `/content` response body
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";

/// Result type for request handling
pub type ContentResult<T> = Result<T, ContentError>;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Failures of the backing store
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Store could not be reached
    #[error("connection failed: {0}")]
    Connection(String),

    /// Query was rejected or failed during execution
    #[error("query failed: {0}")]
    Query(String),

    /// A returned row did not have the expected shape
    #[error("unexpected row: {0}")]
    Decode(String),

    /// Query did not complete in time
    #[error("query timed out after {0:?}")]
    Timeout(Duration),
}

impl From<neo4rs::Error> for StoreError {
    fn from(err: neo4rs::Error) -> Self {
        match err {
            neo4rs::Error::IOError { .. }
            | neo4rs::Error::ConnectionError
            | neo4rs::Error::UrlParseError(_)
            | neo4rs::Error::UnsupportedScheme(_)
            | neo4rs::Error::InvalidDnsName(_)
            | neo4rs::Error::AuthenticationError(_) => StoreError::Connection(err.to_string()),
            _ => StoreError::Query(err.to_string()),
        }
    }
}

/// Errors surfaced at the request boundary
#[derive(Debug, Clone, Error)]
pub enum ContentError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// `isAnnotatedBy` absent or empty
    #[error("Missing or empty query parameter isAnnotatedBy. Expecting valid absolute concept URI.")]
    MissingConcept,

    /// `isAnnotatedBy` given more than once
    #[error("Only one concept uri should be provided")]
    MultipleConcepts,

    /// `limit` present but not an integer
    #[error("Error limit is not a number: {0}.")]
    InvalidLimit(String),

    /// No content for the concept
    #[error("No content found for concept with uuid {0}.")]
    NotFound(String),

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Store unreachable or query failed
    #[error("Error getting content for concept with uuid {uuid}, err={source}")]
    Store { uuid: String, source: StoreError },

    /// Response body could not be encoded
    #[error("Error parsing content for concept with uuid {uuid}, err={detail}")]
    Serialization { uuid: String, detail: String },
}

impl ContentError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ContentError::MissingConcept => StatusCode::BAD_REQUEST,
            ContentError::MultipleConcepts => StatusCode::BAD_REQUEST,
            ContentError::InvalidLimit(_) => StatusCode::BAD_REQUEST,
            ContentError::NotFound(_) => StatusCode::NOT_FOUND,
            ContentError::Store { .. } => StatusCode::SERVICE_UNAVAILABLE,
            ContentError::Serialization { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// JSON error body `{"message": "..."}`
    pub fn body(&self) -> String {
        serde_json::json!({ "message": self.to_string() }).to_string()
    }
}

impl IntoResponse for ContentError {
    fn into_response(self) -> Response {
        (
            self.status_code(),
            [(header::CONTENT_TYPE, JSON_CONTENT_TYPE)],
            self.body(),
        )
            .into_response()
    }
}
