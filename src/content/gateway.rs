//! # Content Lookup Gateway
//!
//! The seam between request handling and the backing store.

use async_trait::async_trait;

use super::errors::StoreResult;
use super::item::ContentItem;
use super::parser::LookupRequest;

/// Read access to content annotated by a concept.
///
/// `lookup` returns:
/// - `Ok(Some(items))` when the concept has content; `items` may be empty
///   if the implementation can tell a known concept from an unknown one
/// - `Ok(None)` when nothing matched or the concept is unknown
/// - `Err(_)` when the store could not be reached or the query failed
///
/// Limits are forwarded unchanged. Each implementation documents how it
/// treats zero and negative limits.
///
/// Dropping the returned future must abandon the in-flight query.
#[async_trait]
pub trait ContentLookup: Send + Sync {
    /// Content for the request's concept, filtered and limited
    async fn lookup(&self, request: &LookupRequest) -> StoreResult<Option<Vec<ContentItem>>>;

    /// Whether the store is reachable and can run a trivial query
    async fn check_connectivity(&self) -> StoreResult<()>;
}
