use std::path::PathBuf;

use tempfile::TempDir;

use crate::storage::SqliteStorage;

/// A database path inside a fresh temp dir; the dir must outlive the test.
pub fn temp_db_path() -> (TempDir, PathBuf) {
    let dir = tempfile::Builder::new()
        .prefix("donatrack_test")
        .tempdir()
        .unwrap();
    let path = dir.path().join("donatrack.sqlite");
    (dir, path)
}

pub fn temp_storage() -> (TempDir, SqliteStorage) {
    let (dir, path) = temp_db_path();
    let storage = SqliteStorage::new(&path);
    storage.init().unwrap();
    (dir, storage)
}
