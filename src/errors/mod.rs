//! Error handling utilities for the dye-diary application.
//!
//! This module provides the central error type `AppError` which represents all
//! possible error conditions that might occur in the application, as well as the
//! convenience type alias `AppResult` for functions that can return these errors.
//!
//! Most failures inside the diary degrade to "nothing happened": an unknown id
//! is a no-op and a corrupt stored collection is read as an empty one. The
//! types below exist so that callers can see *why* that happened and decide
//! whether to surface it.

use std::io;
use thiserror::Error;

/// Errors raised while reading the persisted entry collection.
///
/// The diary controller never propagates these; it logs them and continues
/// with an empty collection. They are exposed so that tooling can tell a
/// missing diary apart from a damaged one.
///
/// # Examples
///
/// ```
/// use dye_diary::errors::LoadError;
///
/// let error = LoadError::UnsupportedVersion(7);
/// assert!(format!("{}", error).contains("version 7"));
/// ```
#[derive(Debug, Error)]
pub enum LoadError {
    /// The storage backend could not be read.
    #[error("Failed to read stored diary: {0}")]
    Io(#[from] io::Error),

    /// The stored blob is not valid JSON or does not match the entry layout.
    ///
    /// This also covers entries that break collection invariants checked
    /// during deserialization, such as an empty formula list.
    #[error("Stored diary is malformed: {0}")]
    Malformed(#[source] serde_json::Error),

    /// The stored envelope was written by a newer, unknown schema.
    #[error("Stored diary uses unsupported schema version {0}")]
    UnsupportedVersion(u32),

    /// Two stored entries share the same id.
    #[error("Stored diary contains duplicate entry id '{0}'")]
    DuplicateId(String),
}

/// Errors raised while writing the entry collection back to storage.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The storage backend rejected the write.
    #[error("Failed to write '{key}' to storage: {source}. Please check that the data directory is writable.")]
    Write {
        /// Storage key being written
        key: String,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The in-memory collection could not be serialized.
    #[error("Failed to serialize diary: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Errors raised while turning form input into an entry.
///
/// # Examples
///
/// ```
/// use dye_diary::errors::EntryError;
///
/// let error = EntryError::NoFormulas;
/// assert!(format!("{}", error).contains("at least one formula"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryError {
    /// An entry was submitted without any formula rows.
    #[error("An entry needs at least one formula")]
    NoFormulas,

    /// The name field was blank.
    #[error("An entry needs a name")]
    MissingName,

    /// A formula row was submitted without a shade.
    #[error("Every formula needs a shade")]
    MissingShade,

    /// The date field could not be parsed.
    #[error("Invalid date '{0}'. Use YYYY-MM-DD or YYYYMMDD")]
    InvalidDate(String),

    /// A formula row could not be split into its columns.
    #[error("Invalid formula '{0}'. Use SHADE:PARTS:GRAMS")]
    InvalidFormula(String),
}

/// Represents all possible errors that can occur in the dye-diary application.
///
/// This enum is the central error type used across the application, with variants
/// for different error categories. It uses `thiserror` for deriving the `Error` trait
/// implementation and formatted error messages.
///
/// # Examples
///
/// Creating a configuration error:
/// ```
/// use dye_diary::errors::AppError;
///
/// let error = AppError::Config("Data directory path is empty".to_string());
/// assert_eq!(format!("{}", error), "Configuration error: Data directory path is empty");
/// ```
///
/// Converting from an IO error:
/// ```
/// use dye_diary::errors::AppError;
/// use std::io::{self, ErrorKind};
///
/// let io_error = io::Error::new(ErrorKind::NotFound, "file not found");
/// let app_error: AppError = io_error.into();
///
/// match app_error {
///     AppError::Io(inner) => assert_eq!(inner.kind(), ErrorKind::NotFound),
///     _ => panic!("Expected Io variant"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Errors related to configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input/output errors from filesystem operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid form input.
    #[error("Entry error: {0}")]
    Entry(#[from] EntryError),

    /// Failure while persisting the collection.
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// Failure while reading the collection.
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    /// A command referred to an entry that does not exist.
    #[error("No entry with id '{0}'")]
    NotFound(String),
}

/// A type alias for `Result<T, AppError>` to simplify function signatures.
///
/// # Examples
///
/// ```
/// use dye_diary::errors::{AppResult, AppError};
///
/// fn might_fail() -> AppResult<String> {
///     if false {
///         return Err(AppError::NotFound("1700000000000".to_string()));
///     }
///     Ok("Operation succeeded".to_string())
/// }
/// ```
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_app_error_from_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");

        let app_error: AppError = io_error.into();

        match app_error {
            AppError::Io(inner) => {
                assert_eq!(inner.kind(), io::ErrorKind::NotFound);
            }
            _ => panic!("Expected AppError::Io variant"),
        }
    }

    #[test]
    fn test_app_error_display() {
        let config_error = AppError::Config("Invalid configuration".to_string());
        assert_eq!(
            format!("{}", config_error),
            "Configuration error: Invalid configuration"
        );

        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "permission denied");
        let app_io_error = AppError::Io(io_error);
        assert_eq!(format!("{}", app_io_error), "I/O error: permission denied");

        let entry_error = AppError::Entry(EntryError::InvalidDate("soon".to_string()));
        assert_eq!(
            format!("{}", entry_error),
            "Entry error: Invalid date 'soon'. Use YYYY-MM-DD or YYYYMMDD"
        );

        let not_found = AppError::NotFound("abc".to_string());
        assert_eq!(format!("{}", not_found), "No entry with id 'abc'");
    }

    #[test]
    fn test_store_error_keeps_source() {
        let error = StoreError::Write {
            key: "hairDiary".to_string(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
        };
        assert!(format!("{}", error).contains("hairDiary"));
        assert!(format!("{}", error).contains("read-only"));

        let source = error.source().expect("write error should chain its source");
        assert_eq!(source.to_string(), "read-only");
    }

    #[test]
    fn test_load_error_conversion_to_app_error() {
        let malformed = serde_json::from_str::<u32>("not json").unwrap_err();
        let app_error: AppError = LoadError::Malformed(malformed).into();

        match app_error {
            AppError::Load(LoadError::Malformed(_)) => {}
            other => panic!("Expected AppError::Load(Malformed), got {:?}", other),
        }
    }

    #[test]
    fn test_result_combinators() {
        let entry_result: Result<(), EntryError> = Err(EntryError::NoFormulas);
        let app_result: AppResult<()> = entry_result.map_err(AppError::from);

        match app_result {
            Err(AppError::Entry(EntryError::NoFormulas)) => {}
            _ => panic!("Expected AppError::Entry variant"),
        }
    }
}
