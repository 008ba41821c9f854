// DeliverySleuth - core/evaluate.rs
//
// The aggregation loop: pull lines one at a time from a BufRead, classify
// each valid one under its expected date, count the rest as invalid.
// Core layer: accepts BufRead trait objects, never touches the filesystem.

use crate::core::classify::classify;
use crate::core::model::EvaluationResult;
use crate::core::parser::parse_line;
use crate::util::constants;
use crate::util::error::LineError;
use std::io::{self, BufRead};

/// Configuration for an evaluation run.
#[derive(Debug, Clone)]
pub struct EvaluateConfig {
    /// How many invalid lines are logged individually at debug level.
    pub max_logged_invalid_lines: usize,
}

impl Default for EvaluateConfig {
    fn default() -> Self {
        Self {
            max_logged_invalid_lines: constants::DEFAULT_MAX_LOGGED_INVALID_LINES,
        }
    }
}

/// A fatal read failure, tagged with the line being read when it happened.
#[derive(Debug)]
pub struct ReadFailure {
    pub line_number: u64,
    pub source: io::Error,
}

/// Strip a trailing `\n` or `\r\n`.
fn trim_line_ending(buf: &[u8]) -> &[u8] {
    let buf = buf.strip_suffix(b"\n").unwrap_or(buf);
    buf.strip_suffix(b"\r").unwrap_or(buf)
}

/// Truncate a line for debug output.
fn preview(line: &str) -> &str {
    match line.char_indices().nth(constants::DEBUG_MAX_LINE_PREVIEW) {
        Some((idx, _)) => &line[..idx],
        None => line,
    }
}

/// Evaluate every line of `reader` in order.
///
/// Blank lines are skipped entirely. Every other line either lands in
/// `delivery_metrics` or bumps `invalid_lines_count`, so
/// `invalid_lines_count + valid_lines_count()` equals the non-blank line
/// count. Only a failing read aborts the run.
pub fn evaluate_lines<R: BufRead>(
    mut reader: R,
    config: &EvaluateConfig,
) -> Result<EvaluationResult, ReadFailure> {
    let mut result = EvaluationResult::default();
    let mut buf = Vec::new();
    let mut line_number: u64 = 0;
    let mut logged_invalid: usize = 0;

    loop {
        buf.clear();
        line_number += 1;
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|source| ReadFailure {
                line_number,
                source,
            })?;
        if read == 0 {
            break;
        }

        let outcome = match std::str::from_utf8(trim_line_ending(&buf)) {
            Ok(line) if line.trim().is_empty() => continue,
            Ok(line) => parse_line(line).map_err(|reason| (reason, preview(line))),
            Err(_) => Err((LineError::InvalidEncoding, "")),
        };

        match outcome {
            Ok(delivery) => {
                let status = classify(&delivery);
                tracing::trace!(
                    line = line_number,
                    expected_date = %delivery.expected_date,
                    status = %status,
                    "Delivery classified"
                );
                result.record(&delivery.expected_date, status);
            }
            Err((reason, text)) => {
                result.record_invalid();
                if logged_invalid < config.max_logged_invalid_lines {
                    logged_invalid += 1;
                    tracing::debug!(
                        line = line_number,
                        reason = %reason,
                        text,
                        "Invalid delivery line"
                    );
                }
            }
        }
    }

    if result.invalid_lines_count as usize > logged_invalid {
        tracing::debug!(
            suppressed = result.invalid_lines_count as usize - logged_invalid,
            "Further invalid lines counted but not logged"
        );
    }

    tracing::debug!(
        dates = result.delivery_metrics.len(),
        valid = result.valid_lines_count(),
        invalid = result.invalid_lines_count,
        "Evaluation complete"
    );

    Ok(result)
}
