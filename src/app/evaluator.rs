// DeliverySleuth - app/evaluator.rs
//
// evaluate-log-file: open a delivery log and run the core evaluation loop
// over it. The only fatal path is a file that cannot be opened or read;
// everything wrong inside a line is counted by the core, not raised.
//
// The file handle lives for the duration of one call and is closed by Drop
// on every exit path.

use crate::core::evaluate::{self, EvaluateConfig};
use crate::core::model::EvaluationResult;
use crate::util::error::EvaluateError;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Instant;

/// Evaluates delivery log files.
///
/// Holds only configuration; every call builds its own accumulator, so one
/// evaluator can be shared freely between callers.
#[derive(Debug, Clone, Default)]
pub struct LogEvaluator {
    config: EvaluateConfig,
}

impl LogEvaluator {
    pub fn new(config: EvaluateConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EvaluateConfig {
        &self.config
    }

    /// Evaluate the delivery log at `path`.
    pub fn evaluate_log_file(&self, path: &Path) -> Result<EvaluationResult, EvaluateError> {
        let started = Instant::now();

        let file = File::open(path).map_err(|source| {
            tracing::warn!(path = %path.display(), error = %source, "Cannot open delivery log");
            EvaluateError::FileNotFound {
                path: path.to_path_buf(),
                source,
            }
        })?;

        // A directory opens fine on some platforms; reject it up front so it
        // fails the same way as a missing file.
        if let Ok(meta) = file.metadata() {
            if meta.is_dir() {
                return Err(EvaluateError::FileNotFound {
                    path: path.to_path_buf(),
                    source: std::io::Error::new(
                        std::io::ErrorKind::InvalidInput,
                        "path is a directory",
                    ),
                });
            }
        }

        tracing::info!(path = %path.display(), "Evaluating delivery log");

        let result = evaluate::evaluate_lines(BufReader::new(file), &self.config).map_err(
            |failure| EvaluateError::Read {
                path: path.to_path_buf(),
                line_number: failure.line_number,
                source: failure.source,
            },
        )?;

        tracing::info!(
            path = %path.display(),
            dates = result.delivery_metrics.len(),
            valid = result.valid_lines_count(),
            invalid = result.invalid_lines_count,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Delivery log evaluated"
        );

        Ok(result)
    }
}

/// Evaluate the delivery log at `path` with default settings.
pub fn evaluate_log_file(path: &Path) -> Result<EvaluationResult, EvaluateError> {
    LogEvaluator::default().evaluate_log_file(path)
}
