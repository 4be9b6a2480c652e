//! Error handling
//!
//! Defines error types shared across the filevault modules. The storage
//! core returns these as values and never logs; the HTTP layer owns status
//! mapping and logging.

pub mod types;

pub use types::*;
