//! Request transaction ids
//!
//! Every request carries a transaction id through its log span. A caller
//! supplied `X-Request-Id` is reused, otherwise one is generated. The id is
//! echoed on the response.

use axum::body::Body;
use axum::extract::Request;
use axum::http::{HeaderValue, Request as HttpRequest};
use axum::middleware::Next;
use axum::response::Response;
use tracing::Span;
use uuid::Uuid;

/// Header carrying the transaction id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Transaction id of the current request, stored in request extensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionId(pub String);

impl TransactionId {
    pub fn generate() -> Self {
        Self(format!("tid_{}", Uuid::new_v4().simple()))
    }

    fn from_request<B>(request: &HttpRequest<B>) -> Option<Self> {
        request
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(|v| Self(v.to_string()))
    }
}

/// Middleware attaching a [`TransactionId`] to the request and response
pub async fn transaction_id(mut request: Request, next: Next) -> Response {
    let tid = TransactionId::from_request(&request).unwrap_or_else(TransactionId::generate);
    let header = HeaderValue::from_str(&tid.0).ok();
    request.extensions_mut().insert(tid);

    let mut response = next.run(request).await;
    if let Some(value) = header {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

/// Span for one HTTP request, tagged with its transaction id
pub fn request_span(request: &HttpRequest<Body>) -> Span {
    let tid = request
        .extensions()
        .get::<TransactionId>()
        .map(|t| t.0.as_str())
        .unwrap_or("-");

    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        transaction_id = %tid,
    )
}
