use super::KeyValueStorage;
use crate::constants::STORAGE_FILE_EXTENSION;
#[cfg(unix)]
use crate::constants::{DEFAULT_DIR_PERMISSIONS, DEFAULT_FILE_PERMISSIONS};
use crate::errors::{AppError, AppResult};
use std::fs;
#[cfg(unix)]
use std::fs::Permissions;
use std::io::{self, Write};
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Key-value storage backed by one file per key in a directory.
///
/// Writes go to a temporary file in the same directory which is then renamed
/// over the target, so a crash mid-write leaves the previous value intact.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Opens storage rooted at `dir`, creating the directory if necessary.
    ///
    /// # Errors
    ///
    /// Returns:
    /// - `AppError::Config` if `dir` is not an absolute path
    /// - `AppError::Io` if the directory cannot be created or secured
    pub fn open(dir: &Path) -> AppResult<Self> {
        ensure_data_directory_exists(dir)?;
        Ok(FileStorage {
            dir: dir.to_path_buf(),
        })
    }

    /// Path of the file holding `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}{}", key, STORAGE_FILE_EXTENSION))
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> io::Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> io::Result<()> {
        let mut temp = NamedTempFile::new_in(&self.dir)?;
        temp.write_all(value.as_bytes())?;
        temp.as_file().sync_all()?;

        #[cfg(unix)]
        temp.as_file()
            .set_permissions(Permissions::from_mode(DEFAULT_FILE_PERMISSIONS))?;

        let path = self.path_for(key);
        temp.persist(&path).map_err(|e| e.error)?;
        debug!(path = %path.display(), bytes = value.len(), "Stored item");
        Ok(())
    }
}

/// Ensures the data directory exists, creating it if necessary.
///
/// New directories get owner-only permissions on unix.
///
/// # Errors
///
/// Returns:
/// - `AppError::Config` if the provided path is not an absolute path
/// - `AppError::Io` if the directory creation fails due to permission issues,
///   invalid paths, or other filesystem errors
pub fn ensure_data_directory_exists(dir: &Path) -> AppResult<()> {
    if !dir.is_absolute() {
        return Err(AppError::Config(format!(
            "Data directory path must be absolute: {}",
            dir.display()
        )));
    }

    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| {
            AppError::Io(io::Error::new(
                e.kind(),
                format!("Failed to create data directory: {}", e),
            ))
        })?;

        #[cfg(unix)]
        {
            fs::set_permissions(dir, Permissions::from_mode(DEFAULT_DIR_PERMISSIONS)).map_err(
                |e| {
                    AppError::Io(io::Error::new(
                        e.kind(),
                        format!("Failed to set secure permissions on data directory: {}", e),
                    ))
                },
            )?;
            debug!("Set 0o700 permissions on data directory");
        }
    }
    Ok(())
}
