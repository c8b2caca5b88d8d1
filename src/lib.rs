//! content-by-concept - A read-only HTTP API listing content annotated by a concept
//!
//! Requests are validated and translated into a single store lookup whose
//! result is served as JSON.

pub mod cli;
pub mod content;
pub mod http_server;
pub mod observability;
