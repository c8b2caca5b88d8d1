//! CLI command implementation
//!
//! Resolves options, connects the store and serves until the listener
//! fails.

use std::sync::Arc;

use crate::content::{ContentLookup, InMemoryContentStore, Neo4jContentStore, Neo4jSettings};
use crate::http_server::{parse_duration, HttpServer, HttpServerConfig};
use crate::observability::init_logging;

use super::args::{Cli, StoreKind};
use super::errors::{CliError, CliResult};

/// Parse arguments and run the service
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    init_logging(&cli.log_level, cli.log_json)?;
    serve(cli)
}

/// Server configuration from parsed arguments
pub fn server_config(cli: &Cli) -> CliResult<HttpServerConfig> {
    let cache_duration = parse_duration(&cli.cache_duration).map_err(|e| {
        CliError::config_error(format!("Failed to parse cache duration string, {}", e))
    })?;
    let query_timeout = parse_duration(&cli.query_timeout).map_err(|e| {
        CliError::config_error(format!("Failed to parse query timeout string, {}", e))
    })?;

    Ok(HttpServerConfig {
        host: cli.host.clone(),
        port: cli.port,
        env: cli.env.clone(),
        cache_duration,
        query_timeout,
        log_metrics: cli.log_metrics,
    })
}

/// Connect the configured store
async fn connect_store(cli: &Cli, config: &HttpServerConfig) -> CliResult<Arc<dyn ContentLookup>> {
    match cli.store {
        StoreKind::Neo4j => {
            let settings = Neo4jSettings {
                uri: cli.neo_url.clone(),
                user: cli.neo_user.clone(),
                password: cli.neo_password.clone(),
            };
            let store =
                Neo4jContentStore::connect(&settings, config.env.clone(), config.query_timeout)
                    .await?;
            Ok(Arc::new(store))
        }
        StoreKind::Memory => {
            tracing::warn!("Serving from an empty in-memory store");
            Ok(Arc::new(InMemoryContentStore::new(config.env.clone())))
        }
    }
}

/// Start the HTTP server and block until it stops
pub fn serve(cli: Cli) -> CliResult<()> {
    let config = server_config(&cli)?;

    tracing::info!(
        neo_url = %cli.neo_url,
        neo_user = %cli.neo_user,
        port = cli.port,
        env = %cli.env,
        store = ?cli.store,
        cache_duration = %cli.cache_duration,
        query_timeout = %cli.query_timeout,
        log_metrics = cli.log_metrics,
        "Application started"
    );

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::serve_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        let lookup = connect_store(&cli, &config).await?;
        HttpServer::new(config, lookup)
            .start()
            .await
            .map_err(|e| CliError::serve_failed(format!("Unable to start server: {}", e)))
    })
}
