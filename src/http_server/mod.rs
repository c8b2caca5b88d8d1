//! # Content-by-Concept HTTP Server Module
//!
//! Axum server exposing content lookups by annotating concept.
//!
//! # Endpoints
//!
//! - `/content` - Content annotated by a concept
//! - `/__health`, `/__gtg` - Store connectivity probes
//! - `/__ping`, `/ping`, `/__build-info`, `/build-info` - Standard stubs
//! - `/__metrics` - Request counts and latency by status class

pub mod config;
pub mod content_routes;
pub mod health_routes;
pub mod server;

pub use config::{cache_control_header, parse_duration, ConfigError, HttpServerConfig};
pub use server::HttpServer;
