//! File storage
//!
//! Path resolution, the storage service, and the health probe. Nothing in
//! this module logs or knows about HTTP; failures travel out as typed
//! errors.

pub mod health;
pub mod memory;
pub mod operations;
pub mod resolution;

pub use memory::MemoryStore;
pub use operations::{DiskStore, FileStore};
pub use resolution::resolve;
