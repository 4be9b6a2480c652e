//! Filevault - HTTP file storage service
//!
//! Stores, serves, and deletes files under a single configured root
//! directory, with path containment and no-overwrite guarantees.

pub mod config;
pub mod error;
pub mod server;
pub mod storage;

pub use server::Server;
