// DeliverySleuth - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "DeliverySleuth";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "DeliverySleuth";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Line format
// =============================================================================

/// chrono format for calendar dates (`2020-12-05`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// chrono format for times of day (`13:32`).
pub const TIME_FORMAT: &str = "%H:%M";

// =============================================================================
// Evaluation limits
// =============================================================================

/// Default number of invalid lines reported individually at debug level per
/// run. Lines beyond this are still counted, just not logged one by one.
pub const DEFAULT_MAX_LOGGED_INVALID_LINES: usize = 1_000;

/// Hard upper bound on `[evaluation] max_logged_invalid_lines`.
pub const ABSOLUTE_MAX_LOGGED_INVALID_LINES: usize = 1_000_000;

// =============================================================================
// Logging
// =============================================================================

/// Default log level. Kept at "warn" so the report on stdout is not
/// interleaved with chatter on an interactive terminal.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Accepted values for `[logging] level`.
pub const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

/// Maximum length of a log line included in debug output.
pub const DEBUG_MAX_LINE_PREVIEW: usize = 200;

// =============================================================================
// Output
// =============================================================================

/// Default report format.
pub const DEFAULT_OUTPUT_FORMAT: &str = "json";

/// Pretty-print JSON reports unless configured otherwise.
pub const DEFAULT_PRETTY_JSON: bool = true;

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";
