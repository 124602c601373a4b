//! Data-quality issues collected during validation.
//!
//! Issues are findings, not control flow: the checkers collect them over a
//! full scan and never abort on a bad row. Structural failures (unreadable
//! files, missing columns) live in the per-crate error enums instead.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Severity of a collected issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Summary statistics only, never affects status
    Info,
    /// Suspicious but not disqualifying; fails the run only in strict mode
    Warning,
    /// Data integrity violated; always fails the run
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        f.write_str(s)
    }
}

/// Kind of data-quality finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// Missing, blank, or mistyped required field (includes duplicate ids)
    SchemaViolation,
    /// Value outside its valid domain
    RangeViolation,
    /// Stored derived value disagrees with recomputation
    DerivedFieldMismatch,
    /// Summary value disagrees with the recomputed aggregate
    AggregateMismatch,
    /// Summary key absent from the main table
    OrphanReference,
    /// Main-table key absent from the summary
    MissingAggregation,
    /// Summary statistics (row counts scanned, etc.)
    Stats,
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            IssueKind::SchemaViolation => "schema_violation",
            IssueKind::RangeViolation => "range_violation",
            IssueKind::DerivedFieldMismatch => "derived_field_mismatch",
            IssueKind::AggregateMismatch => "aggregate_mismatch",
            IssueKind::OrphanReference => "orphan_reference",
            IssueKind::MissingAggregation => "missing_aggregation",
            IssueKind::Stats => "stats",
        };
        f.write_str(s)
    }
}

/// A single data-quality finding with its location.
///
/// `row` is the zero-based data row index within the named file (the header
/// does not count); `row_key` is the value of the row's identifying column
/// when one exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub severity: Severity,
    pub kind: IssueKind,
    /// File the issue was found in
    pub file: String,
    /// Zero-based data row index, if attributable to a single row
    pub row: Option<usize>,
    /// The offending row's identifying key (station id or country code)
    pub row_key: Option<String>,
    /// Column the issue concerns
    pub column: String,
    pub message: String,
}

impl Issue {
    /// Creates a new issue with explicit severity.
    pub fn new(
        severity: Severity,
        kind: IssueKind,
        file: impl Into<String>,
        row: Option<usize>,
        column: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            kind,
            file: file.into(),
            row,
            row_key: None,
            column: column.into(),
            message: message.into(),
        }
    }

    /// Creates an error-severity issue.
    pub fn error(
        kind: IssueKind,
        file: impl Into<String>,
        row: Option<usize>,
        column: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(Severity::Error, kind, file, row, column, message)
    }

    /// Creates a warning-severity issue.
    pub fn warning(
        kind: IssueKind,
        file: impl Into<String>,
        row: Option<usize>,
        column: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(Severity::Warning, kind, file, row, column, message)
    }

    /// Creates an info-severity statistics issue.
    pub fn info(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, IssueKind::Stats, file, None, "", message)
    }

    /// Attaches the row's identifying key.
    pub fn with_row_key(mut self, key: impl Into<String>) -> Self {
        self.row_key = Some(key.into());
        self
    }

    /// Reproducible report ordering: file, then row index, then column.
    ///
    /// Rows attributable to no single row (`None`) sort before row 0 so
    /// table-level findings lead the per-row ones for each file.
    pub fn location_cmp(&self, other: &Self) -> Ordering {
        self.file
            .cmp(&other.file)
            .then(self.row.cmp(&other.row))
            .then(self.column.cmp(&other.column))
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: ", self.severity, self.kind)?;
        write!(f, "{}", self.file)?;
        if let Some(row) = self.row {
            write!(f, ", row {row}")?;
        }
        if let Some(key) = &self.row_key {
            write!(f, " (key {key})")?;
        }
        if !self.column.is_empty() {
            write!(f, ", column {}", self.column)?;
        }
        write!(f, ": {}", self.message)
    }
}
