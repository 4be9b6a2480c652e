//! Storage operations
//!
//! The storage service proper: create, read, and remove files under the
//! configured root. Failures travel out as typed values; the HTTP layer
//! decides what to log and which status to answer with.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use crate::error::StorageError;
use crate::storage::resolution::resolve;

/// Capability interface for the file store.
///
/// One production implementation (`DiskStore`) plus an in-memory double
/// (`MemoryStore`) so the HTTP handlers can be exercised without a real
/// filesystem.
pub trait FileStore: Send + Sync {
    /// Store the reader's contents as a new file at the logical path.
    fn create_file(&self, path: &str, contents: &mut dyn Read) -> Result<(), StorageError>;

    /// Delete the file at the logical path.
    fn remove_file(&self, path: &str) -> Result<(), StorageError>;

    /// Return the whole file content at the logical path.
    fn read_file(&self, path: &str) -> Result<Vec<u8>, StorageError>;
}

/// Filesystem-backed store rooted at a single directory.
///
/// Concurrent callers are not coordinated here; the filesystem's own
/// semantics decide races. `create_file` narrows the check-then-create gap
/// with exclusive creation, so at most one of two racing creates wins.
pub struct DiskStore {
    root: PathBuf,
}

impl DiskStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl FileStore for DiskStore {
    /// Create a new file, creating missing parent directories first.
    ///
    /// Refuses to overwrite: any existing entry at the target fails with
    /// `AlreadyExists`. Directories created before that check are kept.
    /// The copy goes straight into the final path; a failure mid-copy
    /// leaves a truncated file behind. Both are documented policies.
    fn create_file(&self, path: &str, contents: &mut dyn Read) -> Result<(), StorageError> {
        let target = resolve(&self.root, path)?;
        let dir = target.parent().unwrap_or(&self.root).to_path_buf();
        fs::create_dir_all(&dir)?;

        if target.exists() {
            return Err(already_exists(&target, dir));
        }

        let mut file = match fs::File::create_new(&target) {
            Ok(file) => file,
            // A concurrent create won the race between the check above and
            // this call; report it the same way.
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                return Err(already_exists(&target, dir));
            }
            Err(e) => return Err(e.into()),
        };

        io::copy(contents, &mut file)?;
        Ok(())
    }

    /// Remove a file, then prune its parent directory if the removal left
    /// it empty.
    ///
    /// Only the immediate parent is considered; grandparent directories
    /// emptied as a side effect stay behind, and the root itself is never
    /// pruned. A listing or pruning failure after the file was deleted is
    /// still reported as an error, so the caller can observe failure
    /// despite the partial success.
    fn remove_file(&self, path: &str) -> Result<(), StorageError> {
        let target = resolve(&self.root, path)?;
        fs::remove_file(&target).map_err(|e| not_found_or_io(e, path))?;

        let Some(dir) = target.parent() else {
            return Ok(());
        };
        if dir == self.root {
            return Ok(());
        }

        let mut entries = fs::read_dir(dir)?;
        if entries.next().is_none() {
            fs::remove_dir(dir)?;
        }
        Ok(())
    }

    /// Read the whole file into memory. No range reads; file size is
    /// bounded by available memory by design.
    fn read_file(&self, path: &str) -> Result<Vec<u8>, StorageError> {
        let target = resolve(&self.root, path)?;
        fs::read(&target).map_err(|e| not_found_or_io(e, path))
    }
}

fn already_exists(target: &Path, dir: PathBuf) -> StorageError {
    let filename = target
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();
    StorageError::AlreadyExists { filename, dir }
}

fn not_found_or_io(error: io::Error, path: &str) -> StorageError {
    if error.kind() == io::ErrorKind::NotFound {
        StorageError::NotFound(path.to_string())
    } else {
        StorageError::Io(error)
    }
}
