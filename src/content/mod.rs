//! # Content By Concept
//!
//! Validation of `/content` queries, the lookup gateway contract and the
//! stores implementing it.

pub mod errors;
pub mod gateway;
pub mod item;
pub mod mapper;
pub mod memory;
pub mod neo4j;
pub mod parser;

pub use errors::{ContentError, ContentResult, StoreError, StoreResult};
pub use gateway::ContentLookup;
pub use item::ContentItem;
pub use memory::InMemoryContentStore;
pub use neo4j::{Neo4jContentStore, Neo4jSettings};
pub use parser::{LookupRequest, DEFAULT_LIMIT};
