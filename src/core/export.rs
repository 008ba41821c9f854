// DeliverySleuth - core/export.rs
//
// JSON, CSV, and plain-text rendering of an evaluation result.
// Core layer: writes to any Write trait object; `path` is only carried for
// error context.

use crate::core::model::{DeliveryCount, EvaluationResult};
use crate::util::error::ExportError;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

/// Report formats understood by the CLI and `[output] format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
    Text,
}

impl OutputFormat {
    pub fn label(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "text",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "text" | "table" => Ok(OutputFormat::Text),
            other => Err(format!(
                "unknown output format '{other}' (expected json, csv or text)"
            )),
        }
    }
}

/// Render `result` in the requested format. Returns the number of date rows.
pub fn export<W: Write>(
    result: &EvaluationResult,
    format: OutputFormat,
    writer: W,
    path: &Path,
    pretty: bool,
) -> Result<usize, ExportError> {
    match format {
        OutputFormat::Json => export_json(result, writer, path, pretty),
        OutputFormat::Csv => export_csv(result, writer, path),
        OutputFormat::Text => export_text(result, writer, path),
    }
}

/// Export the result as a JSON object:
/// `{ "deliveryMetrics": { date: counts }, "invalidLinesCount": n }`.
pub fn export_json<W: Write>(
    result: &EvaluationResult,
    mut writer: W,
    path: &Path,
    pretty: bool,
) -> Result<usize, ExportError> {
    let json_err = |e| ExportError::Json {
        path: path.to_path_buf(),
        source: e,
    };
    if pretty {
        serde_json::to_writer_pretty(&mut writer, result).map_err(json_err)?;
    } else {
        serde_json::to_writer(&mut writer, result).map_err(json_err)?;
    }
    writeln!(writer).map_err(|e| ExportError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(result.delivery_metrics.len())
}

/// Export per-date counters as CSV, one row per expected date.
///
/// Writes: expected_date, early, early_on_time, late_on_time, late, total
pub fn export_csv<W: Write>(
    result: &EvaluationResult,
    writer: W,
    path: &Path,
) -> Result<usize, ExportError> {
    let csv_err = |e| ExportError::Csv {
        path: path.to_path_buf(),
        source: e,
    };
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record([
            "expected_date",
            "early",
            "early_on_time",
            "late_on_time",
            "late",
            "total",
        ])
        .map_err(csv_err)?;

    let mut count = 0;
    for (date, c) in &result.delivery_metrics {
        let record = [
            date.clone(),
            c.early.to_string(),
            c.early_on_time.to_string(),
            c.late_on_time.to_string(),
            c.late.to_string(),
            c.total.to_string(),
        ];
        csv_writer.write_record(&record).map_err(csv_err)?;
        count += 1;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(count)
}

/// Export a human-readable table with a totals row and the invalid count.
pub fn export_text<W: Write>(
    result: &EvaluationResult,
    mut writer: W,
    path: &Path,
) -> Result<usize, ExportError> {
    let io_err = |e| ExportError::Io {
        path: path.to_path_buf(),
        source: e,
    };

    fn row<W: Write>(w: &mut W, label: &str, c: &DeliveryCount) -> std::io::Result<()> {
        writeln!(
            w,
            "{label:<12} {:>8} {:>14} {:>13} {:>8} {:>8}",
            c.early, c.early_on_time, c.late_on_time, c.late, c.total
        )
    }

    writeln!(
        writer,
        "{:<12} {:>8} {:>14} {:>13} {:>8} {:>8}",
        "date", "early", "early_on_time", "late_on_time", "late", "total"
    )
    .map_err(io_err)?;

    for (date, c) in &result.delivery_metrics {
        row(&mut writer, date, c).map_err(io_err)?;
    }
    if result.delivery_metrics.len() > 1 {
        row(&mut writer, "all", &result.totals()).map_err(io_err)?;
    }

    writeln!(writer, "\ninvalid lines: {}", result.invalid_lines_count).map_err(io_err)?;

    Ok(result.delivery_metrics.len())
}
