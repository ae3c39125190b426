use super::{FileStorage, KeyValueStorage, MemoryStorage};
use crate::errors::{AppError, AppResult};
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn test_file_storage_operations() -> AppResult<()> {
    let temp_dir = tempdir()?;
    let storage = FileStorage::open(temp_dir.path())?;

    assert_eq!(storage.get_item("hairDiary")?, None);

    storage.set_item("hairDiary", "[]")?;
    assert_eq!(storage.get_item("hairDiary")?.as_deref(), Some("[]"));
    assert!(temp_dir.path().join("hairDiary.json").exists());

    storage.set_item("hairDiary", r#"{"version":1,"entries":[]}"#)?;
    assert_eq!(
        storage.get_item("hairDiary")?.as_deref(),
        Some(r#"{"version":1,"entries":[]}"#)
    );

    // Other keys get their own file.
    assert_eq!(storage.get_item("otherKey")?, None);
    Ok(())
}

#[test]
fn test_file_storage_creates_nested_directory() -> AppResult<()> {
    let temp_dir = tempdir()?;
    let nested = temp_dir.path().join("share").join("dye-diary");
    assert!(!nested.exists());

    let storage = FileStorage::open(&nested)?;
    assert!(nested.exists());
    assert_eq!(
        storage.path_for("hairDiary"),
        nested.join("hairDiary.json")
    );

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(&nested)?.permissions().mode();
        assert_eq!(mode & 0o777, 0o700);
    }
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_file_storage_writes_owner_only_files() -> AppResult<()> {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = tempdir()?;
    let storage = FileStorage::open(temp_dir.path())?;
    storage.set_item("hairDiary", "[]")?;

    let mode = std::fs::metadata(storage.path_for("hairDiary"))?
        .permissions()
        .mode();
    assert_eq!(mode & 0o777, 0o600);
    Ok(())
}

#[test]
fn test_file_storage_rejects_relative_dir() {
    let result = FileStorage::open(&PathBuf::from("relative/diary"));
    match result {
        Err(AppError::Config(msg)) => assert!(msg.contains("must be absolute")),
        other => panic!("Expected Config error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_memory_storage_clones_share_items() -> AppResult<()> {
    let storage = MemoryStorage::new();
    let handle = storage.clone();

    storage.set_item("hairDiary", "[]")?;
    assert_eq!(handle.get_item("hairDiary")?.as_deref(), Some("[]"));

    handle.set_item("hairDiary", r#"{"version":1,"entries":[]}"#)?;
    assert_eq!(
        storage.get_item("hairDiary")?.as_deref(),
        Some(r#"{"version":1,"entries":[]}"#)
    );
    Ok(())
}
