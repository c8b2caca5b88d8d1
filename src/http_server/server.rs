//! # HTTP Server
//!
//! Combines the content and operational routers behind the request
//! logging and metrics middleware.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{middleware, Router};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::config::{ConfigError, HttpServerConfig};
use super::content_routes::{content_routes, ContentState};
use super::health_routes::{health_routes, HealthState};
use crate::content::ContentLookup;
use crate::observability::{request_span, track_metrics, transaction_id, HttpMetrics};

/// Interval between metrics log lines when `log_metrics` is set
const METRICS_LOG_INTERVAL: Duration = Duration::from_secs(60);

/// HTTP Server for the content API
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
    metrics: Arc<HttpMetrics>,
}

impl HttpServer {
    /// Create a server answering from `lookup`
    pub fn new(config: HttpServerConfig, lookup: Arc<dyn ContentLookup>) -> Self {
        let metrics = Arc::new(HttpMetrics::new());
        let router = Self::build_router(&config, lookup, metrics.clone());
        Self {
            config,
            router,
            metrics,
        }
    }

    /// Build the combined router with all endpoints
    fn build_router(
        config: &HttpServerConfig,
        lookup: Arc<dyn ContentLookup>,
        metrics: Arc<HttpMetrics>,
    ) -> Router {
        let content_state = Arc::new(ContentState::new(
            lookup.clone(),
            &config.cache_control_header(),
        ));
        let health_state = Arc::new(HealthState {
            lookup,
            metrics: metrics.clone(),
        });

        Router::new()
            // Healthchecks and standards first
            .merge(health_routes(health_state))
            // Then API specific ones
            .merge(content_routes(content_state))
            .layer(
                ServiceBuilder::new()
                    .layer(middleware::from_fn(transaction_id))
                    .layer(TraceLayer::new_for_http().make_span_with(request_span))
                    .layer(middleware::from_fn_with_state(metrics, track_metrics)),
            )
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Request counters shared with the router
    pub fn metrics(&self) -> Arc<HttpMetrics> {
        self.metrics.clone()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Start the HTTP server (async)
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|_| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                ConfigError::InvalidAddress(self.config.socket_addr()),
            )
        })?;

        tracing::info!(
            %addr,
            env = %self.config.env,
            cache_control = %self.config.cache_control_header(),
            "Content-by-concept API listening"
        );

        if self.config.log_metrics {
            tokio::spawn(self.metrics.clone().log_every(METRICS_LOG_INTERVAL));
        }

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, self.router).await?;

        Ok(())
    }
}
