//! Content HTTP Routes
//!
//! `GET /content?isAnnotatedBy=<concept uri>[&limit=<n>][&fromDate=<date>][&toDate=<date>]`
//!
//! Other methods on `/content`, HEAD included, get an empty 405.

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};

use crate::content::errors::JSON_CONTENT_TYPE;
use crate::content::{ContentError, ContentLookup, ContentResult, LookupRequest};

// ==================
// Shared State
// ==================

/// Content state shared across handlers
pub struct ContentState {
    pub lookup: Arc<dyn ContentLookup>,
    pub cache_control: HeaderValue,
}

impl ContentState {
    /// `cache_control` is the full `Cache-Control` value for successful
    /// responses. A value that is not a valid header falls back to
    /// `no-cache`.
    pub fn new(lookup: Arc<dyn ContentLookup>, cache_control: &str) -> Self {
        let cache_control = HeaderValue::from_str(cache_control).unwrap_or_else(|_| {
            tracing::warn!(value = cache_control, "Invalid Cache-Control value, using no-cache");
            HeaderValue::from_static("no-cache")
        });

        Self {
            lookup,
            cache_control,
        }
    }
}

/// Create content routes
pub fn content_routes(state: Arc<ContentState>) -> Router {
    Router::new()
        .route(
            "/content",
            get(get_content_by_concept)
                .head(method_not_allowed)
                .fallback(method_not_allowed),
        )
        .with_state(state)
}

// ==================
// Handlers
// ==================

async fn get_content_by_concept(
    State(state): State<Arc<ContentState>>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> ContentResult<Response> {
    let params = match query {
        Ok(Query(params)) => params,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Unreadable query string, treating as empty");
            Vec::new()
        }
    };

    let request = LookupRequest::parse(&params)?;
    let uuid = request.concept_id.clone();

    let items = match state.lookup.lookup(&request).await {
        Ok(Some(items)) => items,
        Ok(None) => {
            tracing::info!(concept = %uuid, "No content found");
            return Err(ContentError::NotFound(uuid));
        }
        Err(source) => {
            tracing::error!(concept = %uuid, error = %source, "Content lookup failed");
            return Err(ContentError::Store { uuid, source });
        }
    };

    // Encode before committing to a status
    let body = serde_json::to_vec(&items).map_err(|e| ContentError::Serialization {
        uuid: uuid.clone(),
        detail: e.to_string(),
    })?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE)),
            (header::CACHE_CONTROL, state.cache_control.clone()),
        ],
        body,
    )
        .into_response())
}

async fn method_not_allowed() -> StatusCode {
    StatusCode::METHOD_NOT_ALLOWED
}
