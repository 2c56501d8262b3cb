//! Parsed audit-engine reports and the CSV report table

use crate::models::source::{AuditSpec, TargetSource};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Sentinel cell emitted when a requested metric is absent from a report
pub const MISSING_METRIC_SENTINEL: &str = "-1";

/// Structured report returned by the audit engine for one page load
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditReport {
    pub categories: Categories,
    #[serde(default)]
    pub audits: HashMap<String, AuditResult>,
    #[serde(rename = "requestedUrl", default, skip_serializing_if = "Option::is_none")]
    pub requested_url: Option<String>,
    #[serde(rename = "fetchTime", default, skip_serializing_if = "Option::is_none")]
    pub fetch_time: Option<String>,
}

/// Category scores computed by the engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Categories {
    pub performance: CategoryScore,
}

/// A single category score in the 0.0-1.0 range
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryScore {
    pub score: f64,
}

/// One audit entry from the raw report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditResult {
    #[serde(rename = "numericValue", default, skip_serializing_if = "Option::is_none")]
    pub numeric_value: Option<f64>,
    #[serde(rename = "displayValue", default, skip_serializing_if = "Option::is_none")]
    pub display_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl AuditReport {
    /// The overall performance score, read verbatim with no rounding
    pub fn performance_score(&self) -> f64 {
        self.categories.performance.score
    }

    /// Numeric value of one audit, if the engine reported it
    pub fn audit_numeric(&self, audit_id: &str) -> Option<f64> {
        self.audits.get(audit_id).and_then(|a| a.numeric_value)
    }
}

/// A typed metric cell: either a value formatted to two decimals, or missing
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricCell {
    Value(f64),
    Missing,
}

impl MetricCell {
    /// Classify a raw numeric value.
    ///
    /// Zero and NaN count as missing, matching the truthiness check the
    /// report format was defined against.
    pub fn from_numeric(value: Option<f64>) -> Self {
        match value {
            Some(v) if v != 0.0 && v.is_finite() => MetricCell::Value(v),
            _ => MetricCell::Missing,
        }
    }

    /// Render for the CSV report: two decimal places, or the `-1` sentinel
    pub fn render(&self) -> String {
        match self {
            MetricCell::Value(v) => format!("{:.2}", v),
            MetricCell::Missing => MISSING_METRIC_SENTINEL.to_string(),
        }
    }
}

/// The report accumulator: a header row followed by one row per source.
///
/// Rows are appended exactly once per source, in source-list order, and are
/// never reordered or deduplicated.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportTable {
    rows: Vec<Vec<String>>,
}

impl ReportTable {
    /// Create a table holding only the header row for the given audit columns
    pub fn new(audits: &[AuditSpec]) -> Self {
        let mut header = vec!["Name".to_string(), "Tag".to_string(), "Score".to_string()];
        header.extend(audits.iter().map(|a| a.heading.clone()));
        Self { rows: vec![header] }
    }

    /// Append the row for one resolved source
    pub fn push_source_row(&mut self, source: &TargetSource, report: &AuditReport, audits: &[AuditSpec]) {
        let mut row = vec![
            source.name.clone(),
            source.tag.clone(),
            format_score(report.performance_score()),
        ];
        row.extend(
            audits
                .iter()
                .map(|spec| MetricCell::from_numeric(report.audit_numeric(&spec.id)).render()),
        );
        self.rows.push(row);
    }

    /// All rows, header first
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of data rows (header excluded)
    pub fn data_row_count(&self) -> usize {
        self.rows.len() - 1
    }

    /// Serialize as CSV: comma cell separator, CRLF row separator
    pub fn to_csv(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.join(","))
            .collect::<Vec<_>>()
            .join("\r\n")
    }
}

/// Render the category score verbatim, without rounding
fn format_score(score: f64) -> String {
    score.to_string()
}
