//! Error types
//!
//! Defines domain-specific error types for each module of the filevault server.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Storage module errors
#[derive(Debug)]
pub enum StorageError {
    /// Logical path escapes the configured root. Produced before any
    /// filesystem access.
    InvalidPath(String),
    /// Create target already occupied by a file or directory.
    AlreadyExists { filename: String, dir: PathBuf },
    /// Read/remove target absent.
    NotFound(String),
    /// Any other filesystem failure, wrapping the cause.
    Io(io::Error),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::InvalidPath(p) => write!(f, "Invalid path: {}", p),
            StorageError::AlreadyExists { filename, dir } => {
                write!(f, "File {} already exists in {}", filename, dir.display())
            }
            StorageError::NotFound(p) => write!(f, "File not found: {}", p),
            StorageError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<io::Error> for StorageError {
    fn from(error: io::Error) -> Self {
        StorageError::Io(error)
    }
}

/// Health check errors
///
/// A missing root is a configuration problem; a failed cleanup means the
/// server mutated the root and could not undo it. The HTTP layer maps the
/// two to different status codes.
#[derive(Debug)]
pub enum HealthError {
    RootMissing(PathBuf),
    ProbeFailed { path: PathBuf, source: io::Error },
    CleanupFailed { path: PathBuf, source: io::Error },
}

impl fmt::Display for HealthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HealthError::RootMissing(p) => {
                write!(f, "Storage root missing or not a directory: {}", p.display())
            }
            HealthError::ProbeFailed { path, source } => {
                write!(f, "Health probe failed at {}: {}", path.display(), source)
            }
            HealthError::CleanupFailed { path, source } => {
                write!(f, "Health probe cleanup failed at {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for HealthError {}
