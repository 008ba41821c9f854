// DeliverySleuth - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation. Two tiers:
//   - `EvaluateError`: fatal, aborts an evaluation with no partial result.
//   - `LineError`: recoverable, folded into the invalid-line counter.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all DeliverySleuth operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum DeliverySleuthError {
    /// Evaluating a delivery log failed.
    Evaluate(EvaluateError),

    /// Writing the report failed.
    Export(ExportError),

    /// Configuration loading or validation failed.
    Config(ConfigError),

    /// I/O error with path context.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for DeliverySleuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Evaluate(e) => write!(f, "Evaluation error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for DeliverySleuthError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Evaluate(e) => Some(e),
            Self::Export(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Evaluation errors (fatal)
// ---------------------------------------------------------------------------

/// Errors that abort a whole evaluate-log-file call.
#[derive(Debug)]
pub enum EvaluateError {
    /// The delivery log could not be opened (missing or unreadable).
    FileNotFound { path: PathBuf, source: io::Error },

    /// The delivery log was opened but reading it failed part way through.
    Read {
        path: PathBuf,
        line_number: u64,
        source: io::Error,
    },
}

impl fmt::Display for EvaluateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileNotFound { path, source } => {
                write!(f, "Delivery log '{}' not found: {source}", path.display())
            }
            Self::Read {
                path,
                line_number,
                source,
            } => write!(
                f,
                "'{}' line {line_number}: read failed: {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for EvaluateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FileNotFound { source, .. } => Some(source),
            Self::Read { source, .. } => Some(source),
        }
    }
}

impl From<EvaluateError> for DeliverySleuthError {
    fn from(e: EvaluateError) -> Self {
        Self::Evaluate(e)
    }
}

// ---------------------------------------------------------------------------
// Line errors (recoverable)
// ---------------------------------------------------------------------------

/// Why a single log line was rejected.
///
/// Never returned to callers of evaluate-log-file; only counted and, at debug
/// level, logged. Variants are listed in the order they are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineError {
    /// The line is not valid UTF-8.
    InvalidEncoding,
    MissingDeliveryDate,
    MissingDeliveryTime,
    MissingExpectedDate,
    MissingWindowStart,
    MissingWindowEnd,
    /// Delivery date + time do not form a real date-time.
    InvalidDeliveryDateTime,
    InvalidWindowStart,
    InvalidWindowEnd,
    /// Window start is later than window end.
    InvertedWindow,
}

impl fmt::Display for LineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::InvalidEncoding => "line is not valid UTF-8",
            Self::MissingDeliveryDate => "missing delivery date",
            Self::MissingDeliveryTime => "missing delivery time",
            Self::MissingExpectedDate => "missing expected delivery date",
            Self::MissingWindowStart => "missing expected window start time",
            Self::MissingWindowEnd => "missing expected window end time",
            Self::InvalidDeliveryDateTime => "delivery date/time is not a valid date-time",
            Self::InvalidWindowStart => "window start is not a valid date-time",
            Self::InvalidWindowEnd => "window end is not a valid date-time",
            Self::InvertedWindow => "window start is later than window end",
        };
        f.write_str(reason)
    }
}

impl std::error::Error for LineError {}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to writing a report.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error writing the report.
    Io { path: PathBuf, source: io::Error },

    /// CSV serialisation error.
    Csv { path: PathBuf, source: csv::Error },

    /// JSON serialisation error.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Export I/O error '{}': {source}", path.display())
            }
            Self::Csv { path, source } => {
                write!(f, "CSV export error '{}': {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "JSON export error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

impl From<ExportError> for DeliverySleuthError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is not one of the accepted choices.
    UnknownValue {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::UnknownValue {
                field,
                value,
                expected,
            } => write!(
                f,
                "'{field}' = '{value}' is not recognised. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for DeliverySleuthError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for DeliverySleuth results.
pub type Result<T> = std::result::Result<T, DeliverySleuthError>;
