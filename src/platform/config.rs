// DeliverySleuth - platform/config.rs
//
// Config directory resolution and config.toml loading with startup
// validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::core::export::OutputFormat;
use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for DeliverySleuth configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/deliverysleuth/ or %APPDATA%\DeliverySleuth\config\)
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            tracing::debug!(config = %config_dir.display(), "Platform paths resolved");
            Self { config_dir }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            Self {
                config_dir: PathBuf::from("."),
            }
        }
    }

    /// Default location of config.toml.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[output]` section.
    pub output: OutputSection,
    /// `[evaluation]` section.
    pub evaluation: EvaluationSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[output]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct OutputSection {
    /// Report format: "json", "csv" or "text".
    pub format: Option<String>,
    /// Pretty-print JSON reports.
    pub pretty: Option<bool>,
}

/// `[evaluation]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct EvaluationSection {
    /// Invalid lines logged individually at debug level per run.
    pub max_logged_invalid_lines: Option<usize>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
    /// Log file path (empty = stderr only).
    pub file: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// Invalid values produce actionable warnings and fall back to defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Report format.
    pub output_format: OutputFormat,
    /// Pretty-print JSON reports.
    pub pretty_json: bool,
    /// Invalid lines logged individually per run.
    pub max_logged_invalid_lines: usize,
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
    /// Log file path.
    pub log_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_format: OutputFormat::default(),
            pretty_json: constants::DEFAULT_PRETTY_JSON,
            max_logged_invalid_lines: constants::DEFAULT_MAX_LOGGED_INVALID_LINES,
            log_level: None,
            log_file: None,
        }
    }
}

/// Load and validate the config file at `config_path`.
///
/// Returns `AppConfig` with validated values and a list of non-fatal warnings.
/// If the file does not exist, returns defaults with no warnings (first run).
/// If the file is unreadable or unparseable, returns defaults with a warning.
///
/// Called before logging is initialised (the config chooses the log level),
/// so problems are reported through the returned warnings, not tracing.
pub fn load_config(config_path: &Path) -> (AppConfig, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();

    if !config_path.exists() {
        return (AppConfig::default(), warnings);
    }

    let content = match std::fs::read_to_string(config_path) {
        Ok(c) => c,
        Err(e) => {
            let err = ConfigError::Io {
                path: config_path.to_path_buf(),
                source: e,
            };
            warnings.push(format!("{err}. Using defaults."));
            return (AppConfig::default(), warnings);
        }
    };

    let raw: RawConfig = match toml::from_str(&content) {
        Ok(r) => r,
        Err(e) => {
            let err = ConfigError::TomlParse {
                path: config_path.to_path_buf(),
                source: e,
            };
            warnings.push(format!("{err}. Using defaults."));
            return (AppConfig::default(), warnings);
        }
    };

    let (config, mut value_warnings) = validate(raw);
    warnings.append(&mut value_warnings);
    (config, warnings)
}

/// Validate each field of a parsed config, accumulating all problems.
pub fn validate(raw: RawConfig) -> (AppConfig, Vec<String>) {
    let mut config = AppConfig::default();
    let mut warnings = Vec::new();

    // -- Output: format --
    if let Some(ref format) = raw.output.format {
        match format.parse::<OutputFormat>() {
            Ok(f) => config.output_format = f,
            Err(_) => {
                let err = ConfigError::UnknownValue {
                    field: "[output] format".to_string(),
                    value: format.clone(),
                    expected: "json, csv, text".to_string(),
                };
                warnings.push(format!(
                    "{err}. Using default ({}).",
                    constants::DEFAULT_OUTPUT_FORMAT
                ));
            }
        }
    }

    // -- Output: pretty --
    if let Some(pretty) = raw.output.pretty {
        config.pretty_json = pretty;
    }

    // -- Evaluation: max_logged_invalid_lines --
    if let Some(max) = raw.evaluation.max_logged_invalid_lines {
        if max <= constants::ABSOLUTE_MAX_LOGGED_INVALID_LINES {
            config.max_logged_invalid_lines = max;
        } else {
            warnings.push(format!(
                "[evaluation] max_logged_invalid_lines = {max} is out of range (0-{}). Using default ({}).",
                constants::ABSOLUTE_MAX_LOGGED_INVALID_LINES,
                constants::DEFAULT_MAX_LOGGED_INVALID_LINES,
            ));
        }
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        let lower = level.to_lowercase();
        if constants::VALID_LOG_LEVELS.contains(&lower.as_str()) {
            config.log_level = Some(lower);
        } else {
            let err = ConfigError::UnknownValue {
                field: "[logging] level".to_string(),
                value: level.clone(),
                expected: constants::VALID_LOG_LEVELS.join(", "),
            };
            warnings.push(format!(
                "{err}. Using default ({}).",
                constants::DEFAULT_LOG_LEVEL
            ));
        }
    }

    // -- Logging: file --
    if let Some(ref file) = raw.logging.file {
        if !file.is_empty() {
            config.log_file = Some(PathBuf::from(file));
        }
    }

    (config, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_missing_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let (config, warnings) = load_config(&dir.path().join("config.toml"));
        assert_eq!(config, AppConfig::default());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_valid_config_is_applied() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
[output]
format = "csv"
pretty = false

[evaluation]
max_logged_invalid_lines = 10

[logging]
level = "DEBUG"
file = "/tmp/deliverysleuth.log"

[unknown_section]
ignored = true
"#,
        )
        .unwrap();

        let (config, warnings) = load_config(&path);
        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
        assert_eq!(config.output_format, OutputFormat::Csv);
        assert!(!config.pretty_json);
        assert_eq!(config.max_logged_invalid_lines, 10);
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(
            config.log_file,
            Some(PathBuf::from("/tmp/deliverysleuth.log"))
        );
    }

    #[test]
    fn test_invalid_values_fall_back_with_warnings() {
        let raw: RawConfig = toml::from_str(
            r#"
[output]
format = "xml"

[evaluation]
max_logged_invalid_lines = 99999999

[logging]
level = "loud"
file = ""
"#,
        )
        .unwrap();

        let (config, warnings) = validate(raw);
        assert_eq!(config, AppConfig::default());
        assert_eq!(warnings.len(), 3, "got: {warnings:?}");
        assert!(warnings.iter().any(|w| w.contains("[output] format")));
        assert!(warnings.iter().any(|w| w.contains("max_logged_invalid_lines")));
        assert!(warnings.iter().any(|w| w.contains("[logging] level")));
    }

    #[test]
    fn test_unparseable_config_warns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[output\nformat = ").unwrap();

        let (config, warnings) = load_config(&path);
        assert_eq!(config, AppConfig::default());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("Config parse error"));
    }
}
