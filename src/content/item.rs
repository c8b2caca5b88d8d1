//! # Content Items
//!
//! The summary record returned for each piece of content annotated by a
//! concept. Handlers pass these through verbatim.

use serde::{Deserialize, Serialize};

/// A single content summary as served in the `/content` response array
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    /// Canonical thing URI of the content
    pub id: String,

    /// Public API location of the content
    pub api_url: String,

    /// Ontology type URIs, most general first
    #[serde(default)]
    pub types: Vec<String>,
}

impl ContentItem {
    pub fn new(id: impl Into<String>, api_url: impl Into<String>, types: Vec<String>) -> Self {
        Self {
            id: id.into(),
            api_url: api_url.into(),
            types,
        }
    }
}
