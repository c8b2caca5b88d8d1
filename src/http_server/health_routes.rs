//! Operational HTTP Routes
//!
//! Health, good-to-go, ping, build-info and metrics endpoints. Each health
//! probe asks the store on demand; nothing is cached between requests.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::content::ContentLookup;
use crate::observability::HttpMetrics;

const SYSTEM_CODE: &str = "content-by-concept-api";
const HEALTH_CHECK_NAME: &str = "Content-by-Concept Healthchecks";
const HEALTH_CHECK_DESCRIPTION: &str = "Checks for accessing neo4j";

/// Store access shared by the probes
pub struct HealthState {
    pub lookup: Arc<dyn ContentLookup>,
    pub metrics: Arc<HttpMetrics>,
}

/// Health report in the standard `__health` layout
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub schema_version: u8,
    pub system_code: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub checks: Vec<CheckResult>,
    pub ok: bool,
}

/// Outcome of a single health check
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResult {
    pub id: &'static str,
    pub name: &'static str,
    pub ok: bool,
    pub severity: u8,
    pub business_impact: &'static str,
    pub technical_summary: &'static str,
    pub panic_guide: &'static str,
    pub check_output: String,
    pub last_updated: String,
}

/// Build information
#[derive(Debug, Serialize)]
pub struct BuildInfoResponse {
    pub name: &'static str,
    pub version: &'static str,
}

/// Create operational routes
pub fn health_routes(state: Arc<HealthState>) -> Router {
    Router::new()
        .route("/__health", get(health_handler))
        .route("/__gtg", get(gtg_handler))
        .route("/__ping", get(ping_handler))
        .route("/ping", get(ping_handler))
        .route("/__build-info", get(build_info_handler))
        .route("/build-info", get(build_info_handler))
        .route("/__metrics", get(metrics_handler))
        .with_state(state)
}

/// Run the store connectivity check
pub async fn neo4j_check(lookup: &dyn ContentLookup) -> CheckResult {
    let (ok, check_output) = match lookup.check_connectivity().await {
        Ok(()) => (true, "Connectivity to neo4j is ok".to_string()),
        Err(err) => {
            tracing::warn!(error = %err, "Health check failed");
            (false, format!("Error connecting to neo4j: {}", err))
        }
    };

    CheckResult {
        id: "neo4j-check",
        name: "Check connectivity to Neo4j",
        ok,
        severity: 1,
        business_impact: "Unable to respond to Public Content By Concept api requests",
        technical_summary:
            "Cannot connect to Neo4j. If this check fails, check that Neo4j instance is up and running.",
        panic_guide: "https://dewey.ft.com/content-by-concept-api.html",
        check_output,
        last_updated: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
    }
}

/// Health check handler, always 200 with per-check status
async fn health_handler(State(state): State<Arc<HealthState>>) -> impl IntoResponse {
    let checks = vec![neo4j_check(state.lookup.as_ref()).await];
    let ok = checks.iter().all(|c| c.ok);

    let response = HealthResponse {
        schema_version: 1,
        system_code: SYSTEM_CODE,
        name: HEALTH_CHECK_NAME,
        description: HEALTH_CHECK_DESCRIPTION,
        checks,
        ok,
    };

    (StatusCode::OK, Json(response))
}

/// Good-to-go handler, 503 when the store is unreachable
async fn gtg_handler(State(state): State<Arc<HealthState>>) -> impl IntoResponse {
    match state.lookup.check_connectivity().await {
        Ok(()) => (StatusCode::OK, "OK".to_string()),
        Err(err) => (StatusCode::SERVICE_UNAVAILABLE, err.to_string()),
    }
}

async fn ping_handler() -> &'static str {
    "pong"
}

async fn build_info_handler() -> impl IntoResponse {
    Json(BuildInfoResponse {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Request counters since process start
async fn metrics_handler(State(state): State<Arc<HealthState>>) -> impl IntoResponse {
    Json(state.metrics.snapshot())
}
