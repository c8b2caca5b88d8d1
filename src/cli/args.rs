//! CLI argument definitions using clap
//!
//! Every option can also be set from the environment.

use clap::{Parser, ValueEnum};

/// Backing store for content lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreKind {
    /// Neo4j over Bolt
    Neo4j,
    /// Empty in-process store, for local runs
    Memory,
}

/// A public RESTful API for accessing Content via Concepts in neo4j
#[derive(Parser, Debug)]
#[command(name = "content-by-concept")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// neo4j endpoint URL
    #[arg(long, env = "NEO_URL", default_value = "bolt://localhost:7687")]
    pub neo_url: String,

    /// neo4j user
    #[arg(long, env = "NEO_USER", default_value = "neo4j")]
    pub neo_user: String,

    /// neo4j password
    #[arg(long, env = "NEO_PASSWORD", default_value = "", hide_env_values = true)]
    pub neo_password: String,

    /// Host to listen on
    #[arg(long, env = "APP_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "APP_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Environment this app is running in
    #[arg(long, env = "ENVIRONMENT", default_value = "local")]
    pub env: String,

    /// Duration GET requests should be cached for, e.g. 2h45m sets max-age to 9900
    #[arg(long, env = "CACHE_DURATION", default_value = "30s")]
    pub cache_duration: String,

    /// Upper bound on a single neo4j query
    #[arg(long, env = "QUERY_TIMEOUT", default_value = "10s")]
    pub query_timeout: String,

    /// Backing store
    #[arg(long, env = "STORE", value_enum, default_value_t = StoreKind::Neo4j)]
    pub store: StoreKind,

    /// Log level or filter directive, overridden by RUST_LOG
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Emit logs as JSON
    #[arg(long, env = "LOG_JSON")]
    pub log_json: bool,

    /// Log request metrics every minute
    #[arg(long, env = "LOG_METRICS")]
    pub log_metrics: bool,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
