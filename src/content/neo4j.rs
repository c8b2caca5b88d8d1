//! # Neo4j Content Store
//!
//! [`ContentLookup`] over a Neo4j graph via the Bolt protocol.
//!
//! All request values are bound as typed query parameters. The limit goes to
//! Cypher `LIMIT` unchanged: Neo4j rejects a negative limit, which surfaces
//! as [`StoreError::Query`], and `LIMIT 0` returns no rows (not found).

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use neo4rs::{query, Graph, Query};
use serde::Deserialize;

use super::errors::{StoreError, StoreResult};
use super::gateway::ContentLookup;
use super::item::ContentItem;
use super::mapper;
use super::parser::LookupRequest;

/// Content annotated by a concept, newest first.
///
/// A zero date bound disables that side of the filter.
pub const CONTENT_BY_CONCEPT_QUERY: &str = "\
MATCH (:Thing {uuid: $conceptUUID})<-[]-(content:Content)
WHERE ($fromDate = 0 OR content.publishedDateEpoch >= $fromDate)
  AND ($toDate = 0 OR content.publishedDateEpoch <= $toDate)
RETURN DISTINCT content.uuid AS uuid, labels(content) AS types, content.publishedDateEpoch AS published
ORDER BY published DESC
LIMIT $limit";

const CONNECTIVITY_QUERY: &str = "RETURN 1 AS ok";

/// One result row of [`CONTENT_BY_CONCEPT_QUERY`]
#[derive(Debug, Deserialize)]
struct ContentRow {
    uuid: String,
    types: Vec<String>,
}

/// Bolt connection settings
#[derive(Debug, Clone)]
pub struct Neo4jSettings {
    pub uri: String,
    pub user: String,
    pub password: String,
}

/// Gateway backed by a pooled Neo4j connection
pub struct Neo4jContentStore {
    graph: Graph,
    env: String,
    query_timeout: Duration,
}

impl Neo4jContentStore {
    /// Connect the pool. The server is contacted lazily on first query.
    pub async fn connect(
        settings: &Neo4jSettings,
        env: impl Into<String>,
        query_timeout: Duration,
    ) -> StoreResult<Self> {
        let graph = Graph::new(&settings.uri, &settings.user, &settings.password)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        Ok(Self {
            graph,
            env: env.into(),
            query_timeout,
        })
    }

    fn to_item(&self, row: ContentRow) -> ContentItem {
        ContentItem::new(
            mapper::id_url(&row.uuid),
            mapper::api_url(&row.uuid, &self.env),
            mapper::type_uris(&row.types),
        )
    }

    async fn run_lookup(&self, request: &LookupRequest) -> StoreResult<Vec<ContentItem>> {
        let mut rows = self.graph.execute(lookup_query(request)).await?;

        let mut items = Vec::new();
        while let Some(row) = rows.next().await? {
            let row: ContentRow = row
                .to()
                .map_err(|e| StoreError::Decode(e.to_string()))?;
            items.push(self.to_item(row));
        }

        Ok(items)
    }

    async fn run_connectivity_check(&self) -> StoreResult<()> {
        let mut rows = self.graph.execute(query(CONNECTIVITY_QUERY)).await?;
        while rows.next().await?.is_some() {}
        Ok(())
    }
}

/// Bind a request to the lookup statement
pub fn lookup_query(request: &LookupRequest) -> Query {
    query(CONTENT_BY_CONCEPT_QUERY)
        .param("conceptUUID", request.concept_id.as_str())
        .param("fromDate", request.from_date_epoch)
        .param("toDate", request.to_date_epoch)
        .param("limit", request.limit)
}

/// Bound `fut` by `limit`
async fn with_timeout<T>(
    limit: Duration,
    fut: impl Future<Output = StoreResult<T>>,
) -> StoreResult<T> {
    tokio::time::timeout(limit, fut)
        .await
        .map_err(|_| StoreError::Timeout(limit))?
}

#[async_trait]
impl ContentLookup for Neo4jContentStore {
    async fn lookup(&self, request: &LookupRequest) -> StoreResult<Option<Vec<ContentItem>>> {
        let items = with_timeout(self.query_timeout, self.run_lookup(request)).await?;

        tracing::debug!(
            concept = %request.concept_id,
            count = items.len(),
            "Content lookup complete"
        );

        if items.is_empty() {
            Ok(None)
        } else {
            Ok(Some(items))
        }
    }

    async fn check_connectivity(&self) -> StoreResult<()> {
        with_timeout(self.query_timeout, self.run_connectivity_check()).await
    }
}
