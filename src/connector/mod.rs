//! # Connector Layer
//!
//! External integrations implementing application ports:
//! - Generation (Gemini over HTTP, plus an offline mock)
//! - Storage (DuckDB, plus an in-memory map)
//! - HTTP API (axum router, controllers, process wiring)

pub mod adapter;
pub mod api;

pub use adapter::*;
pub use api::*;
