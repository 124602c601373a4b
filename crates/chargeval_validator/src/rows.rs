//! Row constraint checking.
//!
//! Validates individual station rows against the declared schema:
//!
//! - required fields present, `UNKNOWN` sentinel permitted only where the
//!   schema says so
//! - type coercibility (declared int/float/bool columns must parse)
//! - range constraints (WGS84 bounds, positivity of ports and power)
//! - derived-field consistency (`power_class`, `is_fast_dc`) recomputed
//!   fresh from `power_kw` and compared to the stored values
//! - `id` uniqueness across the whole table
//!
//! Malformed rows become issues, never program failures, and a discrepancy
//! in a derived field is reported, never silently corrected; repair is a
//! separate concern.

use chargeval_core::{
    ColumnType, Issue, IssueKind, PowerClass, STATION_COLUMNS, is_blank, is_fast_dc, parse_bool,
};
use chargeval_table::Table;
use regex::Regex;
use std::collections::HashMap;

/// Valid WGS84 latitude range.
const LATITUDE_RANGE: (f64, f64) = (-90.0, 90.0);

/// Valid WGS84 longitude range.
const LONGITUDE_RANGE: (f64, f64) = (-180.0, 180.0);

/// Validates station rows against the declared schema.
pub struct RowChecker {
    /// Compiled `^[A-Z]{2}$` pattern for country codes
    country_code: Regex,
}

impl RowChecker {
    /// Creates a new row checker.
    pub fn new() -> Self {
        Self {
            // The pattern is a literal, so compilation cannot fail.
            country_code: Regex::new(r"^[A-Z]{2}$").unwrap(),
        }
    }

    /// Checks every row of the station table and returns the collected
    /// issues. An empty list indicates a fully conforming table.
    pub fn check(&self, table: &Table) -> Vec<Issue> {
        let mut issues = Vec::new();

        for (row_idx, _) in table.iter_rows() {
            issues.extend(self.check_row(table, row_idx));
        }

        issues.extend(self.check_id_uniqueness(table));
        issues
    }

    /// Checks one row: presence, coercibility, ranges, derived fields.
    fn check_row(&self, table: &Table, row: usize) -> Vec<Issue> {
        let mut issues = Vec::new();
        let row_key = self.row_key(table, row);

        for column in STATION_COLUMNS {
            let cell = table.cell(row, column.name);

            if is_blank(cell) {
                issues.push(self.issue(
                    table,
                    row,
                    &row_key,
                    IssueKind::SchemaViolation,
                    column.name,
                    format!("required field '{}' is blank", column.name),
                ));
                continue;
            }

            if cell.trim() == chargeval_core::UNKNOWN_SENTINEL {
                if column.sentinel_ok {
                    continue;
                }
                issues.push(self.issue(
                    table,
                    row,
                    &row_key,
                    IssueKind::SchemaViolation,
                    column.name,
                    format!("sentinel 'UNKNOWN' not permitted for '{}'", column.name),
                ));
                continue;
            }

            match column.ty {
                ColumnType::Int | ColumnType::Float | ColumnType::Bool => {
                    if let Some(issue) = self.check_typed_cell(table, row, &row_key, column, cell) {
                        issues.push(issue);
                    }
                }
                ColumnType::String => {}
            }
        }

        if let Some(issue) = self.check_country_code(table, row, &row_key) {
            issues.push(issue);
        }
        issues.extend(self.check_derived_fields(table, row, &row_key));
        issues
    }

    /// Coercibility plus range constraints for a typed cell.
    fn check_typed_cell(
        &self,
        table: &Table,
        row: usize,
        row_key: &Option<String>,
        column: &chargeval_core::Column,
        cell: &str,
    ) -> Option<Issue> {
        match column.ty {
            ColumnType::Int => {
                let Ok(value) = cell.trim().parse::<i64>() else {
                    return Some(self.issue(
                        table,
                        row,
                        row_key,
                        IssueKind::SchemaViolation,
                        column.name,
                        format!("'{cell}' is not an integer"),
                    ));
                };
                if column.name == "ports" && value < 1 {
                    return Some(self.issue(
                        table,
                        row,
                        row_key,
                        IssueKind::RangeViolation,
                        column.name,
                        format!("port count {value} must be at least 1"),
                    ));
                }
                None
            }
            ColumnType::Float => {
                let Ok(value) = cell.trim().parse::<f64>() else {
                    return Some(self.issue(
                        table,
                        row,
                        row_key,
                        IssueKind::SchemaViolation,
                        column.name,
                        format!("'{cell}' is not a number"),
                    ));
                };
                self.check_float_range(table, row, row_key, column.name, value)
            }
            ColumnType::Bool => {
                if parse_bool(cell).is_none() {
                    return Some(self.issue(
                        table,
                        row,
                        row_key,
                        IssueKind::SchemaViolation,
                        column.name,
                        format!("'{cell}' is not a boolean"),
                    ));
                }
                None
            }
            ColumnType::String => None,
        }
    }

    fn check_float_range(
        &self,
        table: &Table,
        row: usize,
        row_key: &Option<String>,
        column: &str,
        value: f64,
    ) -> Option<Issue> {
        let out_of_range = |lo: f64, hi: f64| {
            self.issue(
                table,
                row,
                row_key,
                IssueKind::RangeViolation,
                column,
                format!("value {value} out of range [{lo}, {hi}]"),
            )
        };

        match column {
            "latitude" => {
                let (lo, hi) = LATITUDE_RANGE;
                (value < lo || value > hi).then(|| out_of_range(lo, hi))
            }
            "longitude" => {
                let (lo, hi) = LONGITUDE_RANGE;
                (value < lo || value > hi).then(|| out_of_range(lo, hi))
            }
            "power_kw" => (value <= 0.0).then(|| {
                self.issue(
                    table,
                    row,
                    row_key,
                    IssueKind::RangeViolation,
                    column,
                    format!("max power {value} must be strictly positive"),
                )
            }),
            _ => None,
        }
    }

    fn check_country_code(
        &self,
        table: &Table,
        row: usize,
        row_key: &Option<String>,
    ) -> Option<Issue> {
        let cell = table.cell(row, "country_code");
        if is_blank(cell) || cell.trim() == chargeval_core::UNKNOWN_SENTINEL {
            // Already flagged by the presence/sentinel pass.
            return None;
        }
        if self.country_code.is_match(cell.trim()) {
            return None;
        }
        Some(self.issue(
            table,
            row,
            row_key,
            IssueKind::SchemaViolation,
            "country_code",
            format!("'{cell}' does not match ^[A-Z]{{2}}$"),
        ))
    }

    /// Recomputes `power_class` and `is_fast_dc` from `power_kw` and
    /// compares against the stored values.
    ///
    /// The `power_class` bin-membership check runs regardless of whether
    /// `power_kw` parses; the comparisons need a usable positive power
    /// value (an unusable one was already flagged on its own column).
    fn check_derived_fields(
        &self,
        table: &Table,
        row: usize,
        row_key: &Option<String>,
    ) -> Vec<Issue> {
        let mut issues = Vec::new();

        let power_kw = table
            .cell(row, "power_kw")
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|p| *p > 0.0);

        let class_cell = table.cell(row, "power_class");
        if !is_blank(class_cell) && class_cell.trim() != chargeval_core::UNKNOWN_SENTINEL {
            match class_cell.parse::<PowerClass>() {
                Ok(stored) => {
                    if let Some(kw) = power_kw {
                        let expected = PowerClass::from_kw(kw);
                        if stored != expected {
                            issues.push(self.issue(
                                table,
                                row,
                                row_key,
                                IssueKind::DerivedFieldMismatch,
                                "power_class",
                                format!("stored '{stored}' but {kw} kW implies '{expected}'"),
                            ));
                        }
                    }
                }
                Err(()) => {
                    issues.push(self.issue(
                        table,
                        row,
                        row_key,
                        IssueKind::SchemaViolation,
                        "power_class",
                        format!("'{class_cell}' is not one of: slow, fast, hpc"),
                    ));
                }
            }
        }

        let fast_cell = table.cell(row, "is_fast_dc");
        if let (Some(stored), Some(kw)) = (parse_bool(fast_cell), power_kw) {
            let expected = is_fast_dc(kw);
            if stored != expected {
                issues.push(self.issue(
                    table,
                    row,
                    row_key,
                    IssueKind::DerivedFieldMismatch,
                    "is_fast_dc",
                    format!("stored {stored} but {kw} kW implies {expected}"),
                ));
            }
        }

        issues
    }

    /// Flags duplicate ids, each duplicate referencing the first occurrence.
    fn check_id_uniqueness(&self, table: &Table) -> Vec<Issue> {
        let mut issues = Vec::new();
        let mut first_seen: HashMap<String, usize> = HashMap::new();

        for (row, _) in table.iter_rows() {
            let id = table.cell(row, "id").trim();
            if id.is_empty() {
                continue;
            }
            match first_seen.get(id) {
                Some(&first) => {
                    issues.push(
                        Issue::error(
                            IssueKind::SchemaViolation,
                            table.name.clone(),
                            Some(row),
                            "id",
                            format!("duplicate id '{id}' (first occurrence at row {first})"),
                        )
                        .with_row_key(id),
                    );
                }
                None => {
                    first_seen.insert(id.to_string(), row);
                }
            }
        }

        issues
    }

    fn row_key(&self, table: &Table, row: usize) -> Option<String> {
        let id = table.cell(row, "id").trim();
        (!id.is_empty()).then(|| id.to_string())
    }

    fn issue(
        &self,
        table: &Table,
        row: usize,
        row_key: &Option<String>,
        kind: IssueKind,
        column: &str,
        message: String,
    ) -> Issue {
        let mut issue = Issue::error(kind, table.name.clone(), Some(row), column, message);
        if let Some(key) = row_key {
            issue = issue.with_row_key(key.clone());
        }
        issue
    }
}

impl Default for RowChecker {
    fn default() -> Self {
        Self::new()
    }
}
