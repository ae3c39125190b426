//! Configuration management for the dye-diary application.
//!
//! This module handles loading and validating configuration settings from environment
//! variables, with sensible defaults.
//!
//! # Environment Variables
//!
//! - `DYE_DIARY_DIR`: Path to the data directory (defaults to ~/.local/share/dye-diary)
//! - `DYE_DIARY_LANDING`: Page the notebook opens on, `last` (default) or `first`
//! - `DYE_DIARY_LOG_FORMAT`: Log output format, `text` (default) or `json`
//! - `HOME`: Used for expanding the default data directory path

use crate::constants::{
    DEFAULT_DATA_SUBDIR, ENV_VAR_DIARY_DIR, ENV_VAR_DIARY_LANDING, ENV_VAR_DIARY_LOG_FORMAT,
    ENV_VAR_HOME, LOG_FORMAT_JSON, LOG_FORMAT_TEXT,
};
use crate::diary_core::LandingPolicy;
use crate::errors::{AppError, AppResult};
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Output format of the log lines written to stderr.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            LOG_FORMAT_TEXT => Ok(LogFormat::Text),
            LOG_FORMAT_JSON => Ok(LogFormat::Json),
            other => Err(AppError::Config(format!(
                "Unknown log format '{}', expected '{}' or '{}'",
                other, LOG_FORMAT_TEXT, LOG_FORMAT_JSON
            ))),
        }
    }
}

/// Configuration for the dye-diary application.
///
/// # Examples
///
/// Creating a configuration manually:
/// ```
/// use dye_diary::Config;
/// use dye_diary::config::LogFormat;
/// use dye_diary::diary_core::LandingPolicy;
/// use std::path::PathBuf;
///
/// let config = Config {
///     data_dir: PathBuf::from("/path/to/diary"),
///     landing: LandingPolicy::First,
///     log_format: LogFormat::Json,
/// };
/// assert!(config.validate().is_ok());
/// ```
///
/// Loading configuration from environment variables:
/// ```no_run
/// use dye_diary::Config;
/// use std::env;
///
/// env::set_var("DYE_DIARY_DIR", "/custom/diary/path");
///
/// let config = Config::load().expect("Failed to load configuration");
/// assert_eq!(config.data_dir.to_str(), Some("/custom/diary/path"));
/// ```
pub struct Config {
    /// Directory holding the persisted collection.
    ///
    /// Loaded from `DYE_DIARY_DIR`, falling back to ~/.local/share/dye-diary.
    pub data_dir: PathBuf,

    /// Which page the notebook opens on and jumps to after adding an entry.
    pub landing: LandingPolicy,

    pub log_format: LogFormat,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("data_dir", &"[REDACTED_PATH]")
            .field("landing", &self.landing)
            .field("log_format", &self.log_format)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_dir: PathBuf::from(""),
            landing: LandingPolicy::default(),
            log_format: LogFormat::default(),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables with sensible defaults.
    ///
    /// The data directory path is expanded with `shellexpand`, so `~` and
    /// `$VAR` references work.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if:
    /// - The data directory path expansion fails or yields an empty path
    /// - `DYE_DIARY_LANDING` or `DYE_DIARY_LOG_FORMAT` holds an unknown value
    pub fn load() -> AppResult<Self> {
        let data_dir_str = env::var(ENV_VAR_DIARY_DIR).unwrap_or_else(|_| {
            let home = env::var(ENV_VAR_HOME).unwrap_or_default();
            format!("{}/{}", home, DEFAULT_DATA_SUBDIR)
        });

        let expanded_path = shellexpand::full(&data_dir_str)
            .map_err(|e| AppError::Config(format!("Failed to expand path: {}", e)))?;
        let data_dir = PathBuf::from(expanded_path.into_owned());

        if data_dir.as_os_str().is_empty() {
            return Err(AppError::Config("Data directory path is empty".to_string()));
        }

        let landing = match env::var(ENV_VAR_DIARY_LANDING) {
            Ok(raw) => raw.parse::<LandingPolicy>().map_err(AppError::Config)?,
            Err(_) => LandingPolicy::default(),
        };

        let log_format = match env::var(ENV_VAR_DIARY_LOG_FORMAT) {
            Ok(raw) => raw.parse::<LogFormat>()?,
            Err(_) => LogFormat::default(),
        };

        Ok(Config {
            data_dir,
            landing,
            log_format,
        })
    }

    /// Validates that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` with one of the following messages:
    /// - "Data directory path is empty"
    /// - "Data directory must be an absolute path"
    pub fn validate(&self) -> AppResult<()> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(AppError::Config("Data directory path is empty".to_string()));
        }

        if !self.data_dir.is_absolute() {
            return Err(AppError::Config(
                "Data directory must be an absolute path".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage;
    use serial_test::serial;
    use tempfile::tempdir;

    const VARS: [&str; 4] = [
        ENV_VAR_DIARY_DIR,
        ENV_VAR_DIARY_LANDING,
        ENV_VAR_DIARY_LOG_FORMAT,
        ENV_VAR_HOME,
    ];

    /// Runs `f` with the diary variables set as given, restoring them afterwards.
    fn with_env<T>(vars: &[(&str, &str)], f: impl FnOnce() -> T) -> T {
        let saved: Vec<(&str, Option<String>)> =
            VARS.iter().map(|name| (*name, env::var(name).ok())).collect();
        for name in VARS.iter().filter(|name| **name != ENV_VAR_HOME) {
            env::remove_var(name);
        }
        for (name, value) in vars {
            env::set_var(name, value);
        }

        let result = f();

        for (name, value) in saved {
            match value {
                Some(value) => env::set_var(name, value),
                None => env::remove_var(name),
            }
        }
        result
    }

    #[test]
    fn test_debug_impl_redacts_path() {
        let config = Config {
            data_dir: PathBuf::from("/home/username/private/diary"),
            ..Config::default()
        };

        let debug_output = format!("{:?}", config);

        assert!(debug_output.contains("[REDACTED_PATH]"));
        assert!(!debug_output.contains("/home/username/private/diary"));
        assert!(debug_output.contains("Last"));
    }

    #[test]
    #[serial]
    fn test_load_defaults() {
        let config = with_env(&[(ENV_VAR_HOME, "/home/tester")], Config::load).unwrap();

        assert_eq!(
            config.data_dir,
            PathBuf::from("/home/tester/.local/share/dye-diary")
        );
        assert_eq!(config.landing, LandingPolicy::Last);
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    #[serial]
    fn test_load_with_custom_values() {
        let temp_dir = tempdir().unwrap();
        let dir_path = temp_dir.path().to_string_lossy().to_string();

        let config = with_env(
            &[
                (ENV_VAR_DIARY_DIR, dir_path.as_str()),
                (ENV_VAR_DIARY_LANDING, "first"),
                (ENV_VAR_DIARY_LOG_FORMAT, "JSON"),
            ],
            Config::load,
        )
        .unwrap();

        assert_eq!(config.data_dir, PathBuf::from(dir_path));
        assert_eq!(config.landing, LandingPolicy::First);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    #[serial]
    fn test_load_expands_home() {
        let config = with_env(
            &[
                (ENV_VAR_HOME, "/home/tester"),
                (ENV_VAR_DIARY_DIR, "$HOME/notes/hair"),
            ],
            Config::load,
        )
        .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/home/tester/notes/hair"));
    }

    #[test]
    #[serial]
    fn test_load_rejects_unknown_values() {
        let result = with_env(
            &[
                (ENV_VAR_DIARY_DIR, "/tmp/diary"),
                (ENV_VAR_DIARY_LANDING, "middle"),
            ],
            Config::load,
        );
        match result {
            Err(AppError::Config(msg)) => assert!(msg.contains("middle")),
            other => panic!("Expected Config error, got {:?}", other),
        }

        let result = with_env(
            &[
                (ENV_VAR_DIARY_DIR, "/tmp/diary"),
                (ENV_VAR_DIARY_LOG_FORMAT, "xml"),
            ],
            Config::load,
        );
        match result {
            Err(AppError::Config(msg)) => assert!(msg.contains("Unknown log format")),
            other => panic!("Expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_empty_data_dir() {
        match Config::default().validate() {
            Err(AppError::Config(message)) => {
                assert!(message.contains("Data directory path is empty"));
            }
            _ => panic!("Expected Config error about empty data directory"),
        }
    }

    #[test]
    fn test_validate_relative_data_dir() {
        let config = Config {
            data_dir: PathBuf::from("relative/path"),
            ..Config::default()
        };

        match config.validate() {
            Err(AppError::Config(message)) => {
                assert!(message.contains("must be an absolute path"));
            }
            _ => panic!("Expected Config error about relative path"),
        }
    }

    #[test]
    fn test_validated_dir_can_be_created() {
        let temp_dir = tempdir().unwrap();
        let config = Config {
            data_dir: temp_dir.path().join("diary"),
            ..Config::default()
        };
        config.validate().unwrap();

        assert!(!config.data_dir.exists());
        storage::ensure_data_directory_exists(&config.data_dir).unwrap();
        assert!(config.data_dir.exists());
    }
}
