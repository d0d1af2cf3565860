use std::fs;

use cardlist_engine::{ensure_output_dir, AtomicFileWriter, PersistError};
use tempfile::TempDir;

#[test]
fn missing_output_dir_is_rejected_unless_creation_requested() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("src").join("lib").join("data");

    let err = ensure_output_dir(&new_dir, false).unwrap_err();
    assert!(matches!(err, PersistError::OutputDir { .. }));
    assert!(!new_dir.exists());

    ensure_output_dir(&new_dir, true).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn atomic_write_replaces_existing_file() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("cards.csv");
    let writer = AtomicFileWriter::new(target.clone());

    assert_eq!(writer.write(b"a,b\n").unwrap(), 4);
    assert_eq!(fs::read_to_string(&target).unwrap(), "a,b\n");

    writer.write(b"c,d\n1,2\n").unwrap();
    assert_eq!(fs::read_to_string(&target).unwrap(), "c,d\n1,2\n");

    // Only the target remains; the temp file was renamed away.
    let entries: Vec<_> = fs::read_dir(temp.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
}

#[test]
fn write_fails_without_parent_dir_and_leaves_nothing() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("data").join("cards.csv");
    let writer = AtomicFileWriter::new(target.clone());

    let err = writer.write(b"x").unwrap_err();
    assert!(matches!(err, PersistError::OutputDir { .. }));
    assert!(!target.exists());
    assert!(!temp.path().join("data").exists());
}

#[test]
fn write_creates_parent_dirs_when_enabled() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("data").join("cards.csv");
    let writer = AtomicFileWriter::new(target.clone()).create_dirs(true);

    writer.write(b"Name\n").unwrap();
    assert_eq!(fs::read_to_string(&target).unwrap(), "Name\n");
}

#[test]
fn parent_that_is_a_file_is_rejected() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let writer = AtomicFileWriter::new(file_path.join("cards.csv")).create_dirs(true);
    let err = writer.write(b"data").unwrap_err();
    assert!(matches!(err, PersistError::OutputDir { .. }));
    assert_eq!(fs::read_to_string(&file_path).unwrap(), "x");
}
