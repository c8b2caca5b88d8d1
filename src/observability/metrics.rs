//! HTTP request metrics
//!
//! - Counters only, reset on process start
//! - Requests and cumulative latency per status class
//! - Lock-free; readers may see a count without its latency yet

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::Response;
use serde::Serialize;

/// Status classes tracked, in order `1xx` to `5xx`
const STATUS_CLASSES: [&str; 5] = ["1xx", "2xx", "3xx", "4xx", "5xx"];

#[derive(Debug, Default)]
struct ClassCounters {
    requests: AtomicU64,
    latency_micros: AtomicU64,
}

/// Registry of per-request counters
#[derive(Debug, Default)]
pub struct HttpMetrics {
    classes: [ClassCounters; 5],
}

impl HttpMetrics {
    /// Create a registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one completed request
    pub fn record(&self, status: StatusCode, elapsed: Duration) {
        let Some(counters) = self.classes.get(usize::from(status.as_u16() / 100).wrapping_sub(1))
        else {
            return;
        };
        let micros = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX);
        counters.requests.fetch_add(1, Ordering::Relaxed);
        counters.latency_micros.fetch_add(micros, Ordering::Relaxed);
    }

    /// Requests recorded for a status class such as `"2xx"`
    pub fn requests(&self, class: &str) -> u64 {
        STATUS_CLASSES
            .iter()
            .position(|c| *c == class)
            .map_or(0, |i| self.classes[i].requests.load(Ordering::Relaxed))
    }

    /// Point-in-time copy of every counter
    pub fn snapshot(&self) -> MetricsSnapshot {
        let classes = STATUS_CLASSES
            .iter()
            .zip(self.classes.iter())
            .map(|(class, counters)| {
                let requests = counters.requests.load(Ordering::Relaxed);
                let latency_micros = counters.latency_micros.load(Ordering::Relaxed);
                StatusClassSnapshot {
                    class: class.to_string(),
                    requests,
                    total_latency_ms: latency_micros as f64 / 1000.0,
                    mean_latency_ms: if requests == 0 {
                        0.0
                    } else {
                        latency_micros as f64 / 1000.0 / requests as f64
                    },
                }
            })
            .collect::<Vec<_>>();

        MetricsSnapshot {
            requests: classes.iter().map(|c| c.requests).sum(),
            status_classes: classes,
        }
    }

    /// Log a snapshot every `interval` until the task is dropped
    pub async fn log_every(self: Arc<Self>, interval: Duration) {
        let mut ticker = tokio::time::interval(interval);
        // First tick completes immediately
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let snapshot = self.snapshot();
            for class in snapshot.status_classes.iter().filter(|c| c.requests > 0) {
                tracing::info!(
                    status = %class.class,
                    requests = class.requests,
                    mean_latency_ms = class.mean_latency_ms,
                    "HTTP request metrics"
                );
            }
        }
    }
}

/// Serialized view of [`HttpMetrics`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    pub requests: u64,
    pub status_classes: Vec<StatusClassSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusClassSnapshot {
    pub class: String,
    pub requests: u64,
    pub total_latency_ms: f64,
    pub mean_latency_ms: f64,
}

/// Middleware timing every request into the shared [`HttpMetrics`]
pub async fn track_metrics(
    State(metrics): State<Arc<HttpMetrics>>,
    request: Request,
    next: Next,
) -> Response {
    let started = Instant::now();
    let response = next.run(request).await;
    metrics.record(response.status(), started.elapsed());
    response
}
