//! Logical path resolution
//!
//! Joins caller-supplied paths onto the storage root and rejects anything
//! that would escape it.

use std::path::{Component, Path, PathBuf};

use crate::error::StorageError;

/// Resolve a logical path against the storage root.
///
/// The logical path is always treated as relative to the root, so a leading
/// `/` is ignored. `.` segments are dropped and `..` pops the previously
/// pushed segment; a `..` that would climb past the root fails with
/// `InvalidPath`. The check is purely lexical and touches no filesystem
/// state. An empty logical path resolves to the root itself.
pub fn resolve(root: &Path, logical: &str) -> Result<PathBuf, StorageError> {
    let mut resolved = root.to_path_buf();
    // Segments pushed so far; `..` may only pop these, never the root.
    let mut depth: usize = 0;

    for component in Path::new(logical).components() {
        match component {
            Component::Normal(segment) => {
                resolved.push(segment);
                depth += 1;
            }
            Component::ParentDir => {
                if depth == 0 {
                    return Err(StorageError::InvalidPath(logical.to_string()));
                }
                resolved.pop();
                depth -= 1;
            }
            Component::CurDir | Component::RootDir => {}
            Component::Prefix(_) => {
                return Err(StorageError::InvalidPath(logical.to_string()));
            }
        }
    }

    Ok(resolved)
}
