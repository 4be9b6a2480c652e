//! Storage health probe
//!
//! Verifies the service can actually create and delete entries under the
//! root, not merely that the root path exists.

use std::fs;
use std::path::Path;

use crate::error::HealthError;

const PROBE_DIR: &str = "test";
const PROBE_FILE: &str = "test.md";

/// Exercise create and delete under `root`.
///
/// Creates a throwaway directory with one file inside it, then removes the
/// directory recursively. On success nothing is left behind.
pub fn check(root: &Path) -> Result<(), HealthError> {
    if !root.is_dir() {
        return Err(HealthError::RootMissing(root.to_path_buf()));
    }

    let probe_dir = root.join(PROBE_DIR);
    fs::create_dir_all(&probe_dir).map_err(|e| HealthError::ProbeFailed {
        path: probe_dir.clone(),
        source: e,
    })?;

    let probe_file = probe_dir.join(PROBE_FILE);
    if let Err(e) = fs::File::create(&probe_file) {
        return Err(HealthError::ProbeFailed {
            path: probe_file,
            source: e,
        });
    }

    fs::remove_dir_all(&probe_dir).map_err(|e| HealthError::CleanupFailed {
        path: probe_dir,
        source: e,
    })
}
