//! HTTP server
//!
//! The transport adapter around the storage service: routing, request
//! decoding, status mapping, and graceful shutdown.

pub mod core;
pub mod routes;

pub use core::Server;
pub use routes::{AppState, build_router};
