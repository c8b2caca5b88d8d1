//! # In-Memory Content Store
//!
//! A [`ContentLookup`] held entirely in process. Used for local runs without
//! a graph database and as the store behind the router tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;

use super::errors::{StoreError, StoreResult};
use super::gateway::ContentLookup;
use super::item::ContentItem;
use super::mapper;
use super::parser::LookupRequest;

#[derive(Debug, Clone)]
struct StoredContent {
    item: ContentItem,
    published_epoch: i64,
}

/// In-memory store keyed by bare concept uuid.
///
/// A concept counts as found once it is registered, even when filtering
/// leaves no items. A limit of zero or below returns no items.
pub struct InMemoryContentStore {
    /// Data store: concept uuid -> annotated content
    data: RwLock<HashMap<String, Vec<StoredContent>>>,

    /// Cleared to simulate an unreachable store
    reachable: AtomicBool,

    env: String,
}

impl InMemoryContentStore {
    pub fn new(env: impl Into<String>) -> Self {
        Self {
            data: RwLock::new(HashMap::new()),
            reachable: AtomicBool::new(true),
            env: env.into(),
        }
    }

    /// Register a concept with no content
    pub fn add_concept(&self, concept_uuid: &str) {
        self.write().entry(concept_uuid.to_string()).or_default();
    }

    /// Annotate a content uuid with a concept
    pub fn annotate(
        &self,
        concept_uuid: &str,
        content_uuid: &str,
        labels: &[&str],
        published_epoch: i64,
    ) {
        let item = ContentItem::new(
            mapper::id_url(content_uuid),
            mapper::api_url(content_uuid, &self.env),
            mapper::type_uris(labels),
        );

        self.write()
            .entry(concept_uuid.to_string())
            .or_default()
            .push(StoredContent {
                item,
                published_epoch,
            });
    }

    /// Toggle simulated connectivity
    pub fn set_reachable(&self, reachable: bool) {
        self.reachable.store(reachable, Ordering::SeqCst);
    }

    fn ensure_reachable(&self) -> StoreResult<()> {
        if self.reachable.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::Connection("in-memory store marked unreachable".to_string()))
        }
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, Vec<StoredContent>>> {
        self.data.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for InMemoryContentStore {
    fn default() -> Self {
        Self::new("local")
    }
}

fn within_bounds(published: i64, request: &LookupRequest) -> bool {
    (request.from_date_epoch == 0 || published >= request.from_date_epoch)
        && (request.to_date_epoch == 0 || published <= request.to_date_epoch)
}

#[async_trait]
impl ContentLookup for InMemoryContentStore {
    async fn lookup(&self, request: &LookupRequest) -> StoreResult<Option<Vec<ContentItem>>> {
        self.ensure_reachable()?;

        let data = self
            .data
            .read()
            .map_err(|_| StoreError::Query("in-memory store lock poisoned".to_string()))?;

        let Some(stored) = data.get(&request.concept_id) else {
            return Ok(None);
        };

        let mut matching: Vec<&StoredContent> = stored
            .iter()
            .filter(|c| within_bounds(c.published_epoch, request))
            .collect();

        // Newest first
        matching.sort_by(|a, b| b.published_epoch.cmp(&a.published_epoch));

        let limit = usize::try_from(request.limit).unwrap_or(0);
        Ok(Some(
            matching
                .into_iter()
                .take(limit)
                .map(|c| c.item.clone())
                .collect(),
        ))
    }

    async fn check_connectivity(&self) -> StoreResult<()> {
        self.ensure_reachable()
    }
}
