//! DiskStore integration tests against a scratch root directory.

use std::fs;

use tempfile::TempDir;

use filevault::error::StorageError;
use filevault::storage::{DiskStore, FileStore};

fn store() -> (DiskStore, TempDir) {
    let root = TempDir::new().unwrap();
    (DiskStore::new(root.path().to_path_buf()), root)
}

#[test]
fn create_then_read_returns_exact_bytes() {
    let (store, _root) = store();
    store
        .create_file("docs/a.txt", &mut "hello".as_bytes())
        .unwrap();
    assert_eq!(store.read_file("docs/a.txt").unwrap(), b"hello");
}

#[test]
fn create_makes_missing_parent_directories() {
    let (store, root) = store();
    store
        .create_file("a/b/c/file.txt", &mut "nested".as_bytes())
        .unwrap();
    assert!(root.path().join("a/b/c/file.txt").is_file());
}

#[test]
fn create_refuses_overwrite_and_keeps_first_contents() {
    let (store, _root) = store();
    store
        .create_file("docs/a.txt", &mut "hello".as_bytes())
        .unwrap();

    let second = store.create_file("docs/a.txt", &mut "world".as_bytes());
    assert!(matches!(
        second,
        Err(StorageError::AlreadyExists { .. })
    ));
    assert_eq!(store.read_file("docs/a.txt").unwrap(), b"hello");
}

#[test]
fn create_conflicts_with_existing_directory_entry() {
    let (store, _root) = store();
    store
        .create_file("docs/a.txt", &mut "hello".as_bytes())
        .unwrap();

    // "docs" is now a directory; a file create at that path must not merge.
    let result = store.create_file("docs", &mut "clobber".as_bytes());
    assert!(matches!(result, Err(StorageError::AlreadyExists { .. })));
}

#[test]
fn already_exists_reports_filename_and_dir() {
    let (store, root) = store();
    store
        .create_file("docs/a.txt", &mut "hello".as_bytes())
        .unwrap();

    match store.create_file("docs/a.txt", &mut "world".as_bytes()) {
        Err(StorageError::AlreadyExists { filename, dir }) => {
            assert_eq!(filename, "a.txt");
            assert_eq!(dir, root.path().join("docs"));
        }
        other => panic!("expected AlreadyExists, got {:?}", other),
    }
}

#[test]
fn read_missing_file_is_not_found() {
    let (store, _root) = store();
    assert!(matches!(
        store.read_file("missing.txt"),
        Err(StorageError::NotFound(_))
    ));
}

#[test]
fn remove_missing_file_is_not_found() {
    let (store, _root) = store();
    assert!(matches!(
        store.remove_file("missing.txt"),
        Err(StorageError::NotFound(_))
    ));
}

#[test]
fn remove_prunes_emptied_parent() {
    let (store, root) = store();
    store
        .create_file("docs/a.txt", &mut "hello".as_bytes())
        .unwrap();

    store.remove_file("docs/a.txt").unwrap();
    assert!(!root.path().join("docs").exists());
}

#[test]
fn remove_keeps_parent_with_other_entries() {
    let (store, root) = store();
    store
        .create_file("docs/a.txt", &mut "one".as_bytes())
        .unwrap();
    store
        .create_file("docs/b.txt", &mut "two".as_bytes())
        .unwrap();

    store.remove_file("docs/a.txt").unwrap();
    assert!(root.path().join("docs").is_dir());
    assert!(root.path().join("docs/b.txt").is_file());
}

#[test]
fn remove_prunes_one_level_only() {
    let (store, root) = store();
    store
        .create_file("a/b/file.txt", &mut "deep".as_bytes())
        .unwrap();

    store.remove_file("a/b/file.txt").unwrap();
    // The immediate parent goes; the grandparent, now empty, stays behind.
    assert!(!root.path().join("a/b").exists());
    assert!(root.path().join("a").is_dir());
}

#[test]
fn remove_never_prunes_the_root() {
    let (store, root) = store();
    store
        .create_file("only.txt", &mut "top-level".as_bytes())
        .unwrap();

    store.remove_file("only.txt").unwrap();
    assert!(root.path().is_dir());
}

#[test]
fn traversal_fails_without_touching_the_filesystem() {
    let (store, root) = store();
    let result = store.create_file("../escape.txt", &mut "out".as_bytes());
    assert!(matches!(result, Err(StorageError::InvalidPath(_))));

    let escaped = root.path().parent().unwrap().join("escape.txt");
    assert!(!escaped.exists());
    assert_eq!(fs::read_dir(root.path()).unwrap().count(), 0);
}

#[test]
fn traversal_rejected_on_read_and_remove() {
    let (store, _root) = store();
    assert!(matches!(
        store.read_file("docs/../../etc/passwd"),
        Err(StorageError::InvalidPath(_))
    ));
    assert!(matches!(
        store.remove_file("../../etc/passwd"),
        Err(StorageError::InvalidPath(_))
    ));
}
