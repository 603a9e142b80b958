use std::fs;

use genius_engine::{ensure_download_dir, AtomicFileWriter, PersistError};
use tempfile::TempDir;

#[test]
fn creates_missing_download_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("downloads").join("nested");
    assert!(!new_dir.exists());
    ensure_download_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn atomic_write_replaces_existing() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    let first = writer.write("output.md", "hello").unwrap();
    assert_eq!(first.file_name().unwrap(), "output.md");
    assert_eq!(fs::read_to_string(&first).unwrap(), "hello");

    let second = writer.write("output.md", "world").unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read_to_string(&second).unwrap(), "world");

    // Only the target remains; no temp files left behind.
    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 1);
}

#[test]
fn file_in_place_of_dir_is_rejected() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let writer = AtomicFileWriter::new(file_path.clone());
    let err = writer.write("output.md", "data").unwrap_err();
    assert!(matches!(err, PersistError::DownloadDir { .. }));
    assert!(!file_path.with_file_name("output.md").exists());
}
