// DeliverySleuth - tests/e2e_evaluation.rs
//
// End-to-end tests for evaluate-log-file.
//
// These tests exercise the real filesystem, real regex extraction, and real
// chrono parsing: from a delivery log on disk to per-date counters.

use deliverysleuth::app::evaluator::{evaluate_log_file, LogEvaluator};
use deliverysleuth::core::evaluate::EvaluateConfig;
use deliverysleuth::core::export::{export, OutputFormat};
use deliverysleuth::core::model::{DeliveryCount, EvaluationResult};
use deliverysleuth::util::error::EvaluateError;
use std::fs;
use std::path::{Path, PathBuf};

// =============================================================================
// Helpers
// =============================================================================

/// Absolute path to the on-disk fixture files.
fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn count(early: u64, early_on_time: u64, late_on_time: u64, late: u64) -> DeliveryCount {
    DeliveryCount {
        early_on_time,
        late_on_time,
        early,
        late,
        total: early + early_on_time + late_on_time + late,
    }
}

fn non_blank_lines(path: &Path) -> u64 {
    fs::read_to_string(path)
        .expect("read fixture")
        .lines()
        .filter(|l| !l.trim().is_empty())
        .count() as u64
}

// =============================================================================
// Evaluation E2E
// =============================================================================

/// Full sample: every status on several dates plus three kinds of bad line.
#[test]
fn e2e_evaluates_sample_log() {
    let result = evaluate_log_file(&fixture("deliveries_sample.log")).unwrap();

    assert_eq!(result.invalid_lines_count, 3);
    assert_eq!(result.delivery_metrics.len(), 3);
    assert_eq!(result.delivery_metrics["2020-12-05"], count(1, 2, 1, 1));
    assert_eq!(result.delivery_metrics["2020-12-06"], count(1, 1, 1, 1));
    assert_eq!(result.delivery_metrics["2020-12-07"], count(0, 1, 0, 1));
}

/// Every non-blank line is accounted for exactly once.
#[test]
fn e2e_every_line_is_counted_once() {
    for name in [
        "deliveries_sample.log",
        "missing_window_start.log",
        "inverted_window.log",
    ] {
        let path = fixture(name);
        let result = evaluate_log_file(&path).unwrap();
        assert_eq!(
            result.invalid_lines_count + result.valid_lines_count(),
            non_blank_lines(&path),
            "line accounting mismatch for {name}"
        );
        for (date, c) in &result.delivery_metrics {
            assert_eq!(
                c.total,
                c.early + c.early_on_time + c.late_on_time + c.late,
                "total out of sync for {date} in {name}"
            );
        }
    }
}

/// Six lines without a usable window start are all invalid and add no dates.
#[test]
fn e2e_missing_window_start_lines_are_invalid() {
    let result = evaluate_log_file(&fixture("missing_window_start.log")).unwrap();

    assert_eq!(result.invalid_lines_count, 6);
    assert_eq!(result.delivery_metrics.len(), 1);
    assert_eq!(result.delivery_metrics["2020-12-08"], count(0, 0, 1, 0));
}

/// One inverted window contributes exactly one invalid line.
#[test]
fn e2e_inverted_window_counts_once() {
    let result = evaluate_log_file(&fixture("inverted_window.log")).unwrap();

    assert_eq!(result.invalid_lines_count, 1);
    assert_eq!(result.delivery_metrics["2020-12-05"], count(0, 1, 1, 0));
    assert_eq!(result.delivery_metrics["2020-12-06"], count(1, 0, 0, 0));
}

/// Running twice over the same file gives the same answer.
#[test]
fn e2e_evaluation_is_repeatable() {
    let evaluator = LogEvaluator::new(EvaluateConfig::default());
    let path = fixture("deliveries_sample.log");
    let first = evaluator.evaluate_log_file(&path).unwrap();
    let second = evaluator.evaluate_log_file(&path).unwrap();
    assert_eq!(first, second);
}

/// A missing file aborts the call with FileNotFound.
#[test]
fn e2e_nonexistent_file_returns_error() {
    let result = evaluate_log_file(&PathBuf::from(
        "/nonexistent/deliverysleuth-e2e-test-path/deliveries.log",
    ));
    assert!(
        matches!(result, Err(EvaluateError::FileNotFound { .. })),
        "expected FileNotFound, got {result:?}"
    );
}

/// An empty file is valid and yields an empty result.
#[test]
fn e2e_empty_file_yields_empty_result() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.log");
    fs::write(&path, "").unwrap();

    let result = evaluate_log_file(&path).unwrap();
    assert_eq!(result, EvaluationResult::default());
}

// =============================================================================
// Export E2E
// =============================================================================

/// The JSON report uses the documented field names.
#[test]
fn e2e_json_report_shape() {
    let result = evaluate_log_file(&fixture("inverted_window.log")).unwrap();

    let mut buf = Vec::new();
    export(&result, OutputFormat::Json, &mut buf, Path::new("-"), true).unwrap();

    let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
    assert_eq!(value["invalidLinesCount"], 1);
    assert_eq!(value["deliveryMetrics"]["2020-12-05"]["early_on_time"], 1);
    assert_eq!(value["deliveryMetrics"]["2020-12-05"]["late_on_time"], 1);
    assert_eq!(value["deliveryMetrics"]["2020-12-05"]["total"], 2);
    assert_eq!(value["deliveryMetrics"]["2020-12-06"]["early"], 1);
}

/// The CSV report has one row per date, in date order.
#[test]
fn e2e_csv_report_rows() {
    let result = evaluate_log_file(&fixture("deliveries_sample.log")).unwrap();

    let mut buf = Vec::new();
    let rows = export(&result, OutputFormat::Csv, &mut buf, Path::new("-"), false).unwrap();
    assert_eq!(rows, 3);

    let output = String::from_utf8(buf).unwrap();
    let dates: Vec<&str> = output
        .lines()
        .skip(1)
        .filter_map(|l| l.split(',').next())
        .collect();
    assert_eq!(dates, vec!["2020-12-05", "2020-12-06", "2020-12-07"]);
}
