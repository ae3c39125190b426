//! Constants used throughout the application.
//!
//! This module contains all constants used in the dye-diary application, organized
//! into logical groups. Having constants centralized makes them easier to find,
//! modify, and reference consistently.

// Application Metadata
/// The name of the application.
pub const APP_NAME: &str = "dye-diary";
/// The description of the application used in CLI help text.
pub const APP_DESCRIPTION: &str = "A notebook for hair dye formulas and how they turned out";

// CLI Arguments & Defaults
/// Log format identifier for plain text.
pub const LOG_FORMAT_TEXT: &str = "text";
/// Log format identifier for JSON.
pub const LOG_FORMAT_JSON: &str = "json";
/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";
/// Log level used when `--verbose` is passed.
pub const VERBOSE_LOG_LEVEL: &str = "debug";

// Configuration Keys & Environment Variables
/// Environment variable for specifying the diary data directory.
pub const ENV_VAR_DIARY_DIR: &str = "DYE_DIARY_DIR";
/// Environment variable selecting which page the notebook opens on.
pub const ENV_VAR_DIARY_LANDING: &str = "DYE_DIARY_LANDING";
/// Environment variable selecting the log output format.
pub const ENV_VAR_DIARY_LOG_FORMAT: &str = "DYE_DIARY_LOG_FORMAT";
/// Standard environment variable for the user's home directory.
pub const ENV_VAR_HOME: &str = "HOME";
/// Default sub-directory for diary data within the user's home directory.
pub const DEFAULT_DATA_SUBDIR: &str = ".local/share/dye-diary";

// Storage Layout
/// Storage key holding the whole entry collection.
pub const STORAGE_KEY: &str = "hairDiary";
/// File extension appended to storage keys on disk.
pub const STORAGE_FILE_EXTENSION: &str = ".json";
/// Current version of the persisted collection envelope.
pub const SCHEMA_VERSION: u32 = 1;
/// Default POSIX permissions for newly created directories (owner read/write/execute).
#[cfg(unix)]
pub const DEFAULT_DIR_PERMISSIONS: u32 = 0o700;
/// Default POSIX permissions for newly created files (owner read/write).
#[cfg(unix)]
pub const DEFAULT_FILE_PERMISSIONS: u32 = 0o600;

// Pagination
/// Entries shown on one notebook spread.
pub const ENTRIES_PER_PAGE: usize = 2;
/// Delay between starting a page turn and the page index changing.
pub const PAGE_FLIP_DELAY_MS: u64 = 300;
/// Delay between the page index changing and the notebook accepting input again.
pub const PAGE_SETTLE_DELAY_MS: u64 = 300;
/// Poll interval used by the interactive browser while a page is turning.
pub const BROWSE_TICK_MS: u64 = 50;

// Date/Time Logic
/// Date format string for ISO date format (YYYY-MM-DD).
pub const DATE_FORMAT_ISO: &str = "%Y-%m-%d";
/// Date format string for compact date format (YYYYMMDD).
pub const DATE_FORMAT_COMPACT: &str = "%Y%m%d";
/// Date format used when rendering an entry heading.
pub const ENTRY_HEADING_DATE_FORMAT: &str = "%B %-d, %Y";

// Logging Configuration
/// Service name used in tracing spans and structured logs.
pub const TRACING_SERVICE_NAME: &str = "dye-diary";
/// Name for the root tracing span covering an application invocation.
pub const TRACING_ROOT_SPAN_NAME: &str = "app_invocation";
