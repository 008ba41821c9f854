// DeliverySleuth - core/model.rs
//
// Core data model types. Pure data definitions with no I/O and no
// platform dependencies.
//
// These types are the shared vocabulary across all layers.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// Per-line types
// =============================================================================

/// The five substrings pulled out of one delivery log line, borrowed from it.
///
/// Produced by `parser::extract_fields`; no validation beyond the regex shape
/// has happened yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawFields<'a> {
    /// Actual delivery date, `YYYY-MM-DD`.
    pub delivery_date: &'a str,
    /// Actual delivery time, `HH:MM`.
    pub delivery_time: &'a str,
    /// Expected delivery date, `YYYY-MM-DD`.
    pub expected_date: &'a str,
    /// Expected window start time, `HH:MM`.
    pub window_start: &'a str,
    /// Expected window end time, `HH:MM`.
    pub window_end: &'a str,
}

/// A fully validated delivery record.
///
/// Invariant: `window_start <= window_end`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDelivery {
    /// When the delivery actually happened.
    pub delivered_at: NaiveDateTime,

    /// Expected delivery date as `YYYY-MM-DD`; the aggregation key.
    pub expected_date: String,

    /// Start of the expected window on `expected_date`.
    pub window_start: NaiveDateTime,

    /// End of the expected window on `expected_date`.
    pub window_end: NaiveDateTime,
}

// =============================================================================
// Delivery status
// =============================================================================

/// Timeliness of a delivery relative to its expected window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    /// Before the window opened.
    Early,
    /// Inside the window, before its midpoint.
    EarlyOnTime,
    /// Inside the window, at or after its midpoint.
    LateOnTime,
    /// At or after the window closed.
    Late,
}

impl DeliveryStatus {
    /// Returns all variants in chronological order.
    pub fn all() -> &'static [DeliveryStatus] {
        &[
            DeliveryStatus::Early,
            DeliveryStatus::EarlyOnTime,
            DeliveryStatus::LateOnTime,
            DeliveryStatus::Late,
        ]
    }

    /// Machine label, matching the serialised counter names.
    pub fn label(&self) -> &'static str {
        match self {
            DeliveryStatus::Early => "early",
            DeliveryStatus::EarlyOnTime => "early_on_time",
            DeliveryStatus::LateOnTime => "late_on_time",
            DeliveryStatus::Late => "late",
        }
    }
}

impl std::fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Aggregates
// =============================================================================

/// Per-date delivery counters.
///
/// `total` always equals the sum of the four status counters; keep it that
/// way by only mutating through `record`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryCount {
    pub early_on_time: u64,
    pub late_on_time: u64,
    pub early: u64,
    pub late: u64,
    pub total: u64,
}

impl DeliveryCount {
    /// Count one delivery with the given status.
    pub fn record(&mut self, status: DeliveryStatus) {
        match status {
            DeliveryStatus::Early => self.early += 1,
            DeliveryStatus::EarlyOnTime => self.early_on_time += 1,
            DeliveryStatus::LateOnTime => self.late_on_time += 1,
            DeliveryStatus::Late => self.late += 1,
        }
        self.total += 1;
    }

    /// Counter value for one status.
    pub fn get(&self, status: DeliveryStatus) -> u64 {
        match status {
            DeliveryStatus::Early => self.early,
            DeliveryStatus::EarlyOnTime => self.early_on_time,
            DeliveryStatus::LateOnTime => self.late_on_time,
            DeliveryStatus::Late => self.late,
        }
    }

    /// Fold another date's counters into this one (used for report totals).
    pub fn merge(&mut self, other: &DeliveryCount) {
        self.early += other.early;
        self.early_on_time += other.early_on_time;
        self.late_on_time += other.late_on_time;
        self.late += other.late;
        self.total += other.total;
    }
}

/// Outcome of one evaluate-log-file run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResult {
    /// Counters keyed by expected delivery date (`YYYY-MM-DD`). A date only
    /// appears once at least one valid line carried it.
    pub delivery_metrics: BTreeMap<String, DeliveryCount>,

    /// Number of non-blank lines that failed extraction or validation.
    pub invalid_lines_count: u64,
}

impl EvaluationResult {
    /// Record a classified delivery under its expected date.
    pub fn record(&mut self, expected_date: &str, status: DeliveryStatus) {
        match self.delivery_metrics.get_mut(expected_date) {
            Some(count) => count.record(status),
            None => {
                let mut count = DeliveryCount::default();
                count.record(status);
                self.delivery_metrics.insert(expected_date.to_owned(), count);
            }
        }
    }

    /// Record one invalid line.
    pub fn record_invalid(&mut self) {
        self.invalid_lines_count += 1;
    }

    /// Counters summed over every date.
    pub fn totals(&self) -> DeliveryCount {
        let mut totals = DeliveryCount::default();
        for count in self.delivery_metrics.values() {
            totals.merge(count);
        }
        totals
    }

    /// Number of lines that classified successfully.
    pub fn valid_lines_count(&self) -> u64 {
        self.delivery_metrics.values().map(|c| c.total).sum()
    }
}
