//! In-memory store
//!
//! Test double for the HTTP layer: same contract as `DiskStore`, backed by
//! a mutex-guarded map instead of a filesystem. Paths are resolved against
//! a virtual root so containment and no-overwrite behave identically.

use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::StorageError;
use crate::storage::operations::FileStore;
use crate::storage::resolution::resolve;

const VIRTUAL_ROOT: &str = "/";

/// Map-backed `FileStore`. Keys are normalized resolved paths.
#[derive(Default)]
pub struct MemoryStore {
    files: Mutex<HashMap<PathBuf, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn resolve_key(path: &str) -> Result<PathBuf, StorageError> {
        resolve(Path::new(VIRTUAL_ROOT), path)
    }
}

impl FileStore for MemoryStore {
    fn create_file(&self, path: &str, contents: &mut dyn Read) -> Result<(), StorageError> {
        let key = Self::resolve_key(path)?;
        let mut data = Vec::new();
        contents.read_to_end(&mut data)?;

        let mut files = self.files.lock().unwrap();
        if files.contains_key(&key) {
            let filename = key
                .file_name()
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_default();
            let dir = key
                .parent()
                .unwrap_or(Path::new(VIRTUAL_ROOT))
                .to_path_buf();
            return Err(StorageError::AlreadyExists { filename, dir });
        }
        files.insert(key, data);
        Ok(())
    }

    fn remove_file(&self, path: &str) -> Result<(), StorageError> {
        let key = Self::resolve_key(path)?;
        let mut files = self.files.lock().unwrap();
        match files.remove(&key) {
            Some(_) => Ok(()),
            None => Err(StorageError::NotFound(path.to_string())),
        }
    }

    fn read_file(&self, path: &str) -> Result<Vec<u8>, StorageError> {
        let key = Self::resolve_key(path)?;
        let files = self.files.lock().unwrap();
        files
            .get(&key)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(path.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_read_remove_roundtrip() {
        let store = MemoryStore::new();
        store
            .create_file("docs/a.txt", &mut "hello".as_bytes())
            .unwrap();
        assert_eq!(store.read_file("docs/a.txt").unwrap(), b"hello");

        store.remove_file("docs/a.txt").unwrap();
        assert!(matches!(
            store.read_file("docs/a.txt"),
            Err(StorageError::NotFound(_))
        ));
    }

    #[test]
    fn refuses_overwrite() {
        let store = MemoryStore::new();
        store
            .create_file("docs/a.txt", &mut "hello".as_bytes())
            .unwrap();
        let result = store.create_file("docs/a.txt", &mut "world".as_bytes());
        assert!(matches!(result, Err(StorageError::AlreadyExists { .. })));
        assert_eq!(store.read_file("docs/a.txt").unwrap(), b"hello");
    }

    #[test]
    fn rejects_escaping_paths() {
        let store = MemoryStore::new();
        let result = store.create_file("../escape.txt", &mut "x".as_bytes());
        assert!(matches!(result, Err(StorageError::InvalidPath(_))));
    }

    #[test]
    fn equivalent_paths_share_one_entry() {
        let store = MemoryStore::new();
        store
            .create_file("docs/a.txt", &mut "hello".as_bytes())
            .unwrap();
        let result = store.create_file("./docs/../docs/a.txt", &mut "again".as_bytes());
        assert!(matches!(result, Err(StorageError::AlreadyExists { .. })));
    }
}
