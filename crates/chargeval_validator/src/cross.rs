//! Referential and cross-file checking.
//!
//! Verifies that the companion summary tables agree with aggregates
//! recomputed from the raw station table by full scan:
//!
//! - per-country row count and max power vs `country_summary.csv`
//! - total rows, distinct countries, and global max power vs
//!   `world_summary.csv`
//! - orphan references (summary codes absent from the raw table) and
//!   missing aggregations (raw codes absent from the summary)
//!
//! Orphans and missing aggregations default to warnings since summaries may
//! intentionally omit below-threshold entries; the severity is configurable
//! through [`ValidationOptions`](chargeval_core::ValidationOptions).

use chargeval_core::{COUNTRY_COUNT_COLUMNS, Issue, IssueKind, Severity, is_blank};
use chargeval_table::Table;
use std::collections::BTreeMap;

/// Recomputed per-country aggregates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CountryAggregate {
    pub count: u64,
    pub max_power_kw: Option<f64>,
}

/// Recomputes per-country aggregates from the raw station table.
///
/// Unparseable power cells are skipped here; the row checker already flags
/// them on their own column. The map is ordered so iteration is
/// deterministic.
pub fn country_aggregates(stations: &Table) -> BTreeMap<String, CountryAggregate> {
    let mut aggregates: BTreeMap<String, CountryAggregate> = BTreeMap::new();

    for (row, _) in stations.iter_rows() {
        let code = stations.cell(row, "country_code").trim();
        if code.is_empty() {
            continue;
        }
        let entry = aggregates
            .entry(code.to_string())
            .or_insert(CountryAggregate {
                count: 0,
                max_power_kw: None,
            });
        entry.count += 1;
        if let Ok(power) = stations.cell(row, "power_kw").trim().parse::<f64>() {
            entry.max_power_kw = Some(match entry.max_power_kw {
                Some(current) if current >= power => current,
                _ => power,
            });
        }
    }

    aggregates
}

/// Validates summary tables against the raw station table.
pub struct CrossChecker {
    /// Severity for orphan-reference / missing-aggregation findings
    reference_severity: Severity,
}

impl CrossChecker {
    /// Creates a cross checker with the given reference-finding severity.
    pub fn new(reference_severity: Severity) -> Self {
        Self { reference_severity }
    }

    /// Checks both summary tables. Either may be absent, in which case its
    /// checks are skipped.
    pub fn check(
        &self,
        stations: &Table,
        country_summary: Option<&Table>,
        world_summary: Option<&Table>,
    ) -> Vec<Issue> {
        let aggregates = country_aggregates(stations);
        let mut issues = Vec::new();

        if let Some(summary) = country_summary {
            issues.extend(self.check_country_summary(summary, &aggregates));
        }
        if let Some(summary) = world_summary {
            issues.extend(self.check_world_summary(summary, stations, &aggregates));
        }

        issues
    }

    fn check_country_summary(
        &self,
        summary: &Table,
        aggregates: &BTreeMap<String, CountryAggregate>,
    ) -> Vec<Issue> {
        let mut issues = Vec::new();

        let count_column = COUNTRY_COUNT_COLUMNS
            .iter()
            .find(|c| summary.column_index(c).is_some());
        if count_column.is_none() {
            issues.push(Issue::warning(
                IssueKind::SchemaViolation,
                summary.name.clone(),
                None,
                "count",
                "expected a count column named 'stations' or 'count'",
            ));
        }
        let has_max = summary.column_index("max_power_kw").is_some();

        let mut summarized: Vec<String> = Vec::new();
        for (row, _) in summary.iter_rows() {
            let code = summary.cell(row, "country_code").trim().to_string();
            if code.is_empty() {
                issues.push(Issue::error(
                    IssueKind::SchemaViolation,
                    summary.name.clone(),
                    Some(row),
                    "country_code",
                    "required field 'country_code' is blank",
                ));
                continue;
            }

            let Some(aggregate) = aggregates.get(&code) else {
                issues.push(
                    Issue::new(
                        self.reference_severity,
                        IssueKind::OrphanReference,
                        summary.name.clone(),
                        Some(row),
                        "country_code",
                        format!("country '{code}' does not appear in the main table"),
                    )
                    .with_row_key(code.as_str()),
                );
                continue;
            };
            summarized.push(code.clone());

            if let Some(&column) = count_column {
                issues.extend(self.check_count_cell(summary, row, &code, column, aggregate.count));
            }
            if has_max {
                issues.extend(self.check_max_cell(
                    summary,
                    row,
                    &code,
                    "max_power_kw",
                    aggregate.max_power_kw,
                ));
            }
        }

        // Raw countries the summary never mentions.
        for code in aggregates.keys() {
            if !summarized.iter().any(|c| c == code) {
                issues.push(
                    Issue::new(
                        self.reference_severity,
                        IssueKind::MissingAggregation,
                        summary.name.clone(),
                        None,
                        "country_code",
                        format!("country '{code}' from the main table has no summary row"),
                    )
                    .with_row_key(code.clone()),
                );
            }
        }

        issues
    }

    fn check_count_cell(
        &self,
        summary: &Table,
        row: usize,
        code: &str,
        column: &str,
        expected: u64,
    ) -> Option<Issue> {
        let cell = summary.cell(row, column);
        let Ok(stored) = cell.trim().parse::<u64>() else {
            return Some(
                Issue::error(
                    IssueKind::SchemaViolation,
                    summary.name.clone(),
                    Some(row),
                    column,
                    format!("'{cell}' is not a non-negative integer"),
                )
                .with_row_key(code),
            );
        };
        (stored != expected).then(|| {
            Issue::error(
                IssueKind::AggregateMismatch,
                summary.name.clone(),
                Some(row),
                column,
                format!("stored count {stored} but main table has {expected} rows for '{code}'"),
            )
            .with_row_key(code)
        })
    }

    fn check_max_cell(
        &self,
        summary: &Table,
        row: usize,
        code: &str,
        column: &str,
        expected: Option<f64>,
    ) -> Option<Issue> {
        let cell = summary.cell(row, column);
        if is_blank(cell) && expected.is_none() {
            return None;
        }
        let Ok(stored) = cell.trim().parse::<f64>() else {
            return Some(
                Issue::error(
                    IssueKind::SchemaViolation,
                    summary.name.clone(),
                    Some(row),
                    column,
                    format!("'{cell}' is not a number"),
                )
                .with_row_key(code),
            );
        };
        // Exact comparison, same semantics as the source field. Rounding
        // here could hide which row is actually the max.
        (expected != Some(stored)).then(|| {
            Issue::error(
                IssueKind::AggregateMismatch,
                summary.name.clone(),
                Some(row),
                column,
                match expected {
                    Some(max) => {
                        format!("stored max power {stored} but recomputed max is {max} for '{code}'")
                    }
                    None => format!("stored max power {stored} but no power values exist for '{code}'"),
                },
            )
            .with_row_key(code)
        })
    }

    fn check_world_summary(
        &self,
        summary: &Table,
        stations: &Table,
        aggregates: &BTreeMap<String, CountryAggregate>,
    ) -> Vec<Issue> {
        let mut issues = Vec::new();

        if summary.len() != 1 {
            issues.push(Issue::error(
                IssueKind::SchemaViolation,
                summary.name.clone(),
                None,
                "",
                format!("expected exactly one roll-up row, found {}", summary.len()),
            ));
            return issues;
        }

        let total_count = stations.len() as u64;
        let total_countries = aggregates.len() as u64;
        let max_power = aggregates
            .values()
            .filter_map(|a| a.max_power_kw)
            .fold(None::<f64>, |acc, p| match acc {
                Some(current) if current >= p => Some(current),
                _ => Some(p),
            });

        issues.extend(self.check_world_count(summary, "total_count", total_count));
        issues.extend(self.check_world_count(summary, "total_countries", total_countries));
        issues.extend(self.check_max_cell(summary, 0, "world", "max_power_kw", max_power));

        issues
    }

    fn check_world_count(&self, summary: &Table, column: &str, expected: u64) -> Option<Issue> {
        if summary.column_index(column).is_none() {
            return Some(Issue::warning(
                IssueKind::SchemaViolation,
                summary.name.clone(),
                None,
                column,
                format!("expected a column named '{column}'"),
            ));
        }
        let cell = summary.cell(0, column);
        let Ok(stored) = cell.trim().parse::<u64>() else {
            return Some(Issue::error(
                IssueKind::SchemaViolation,
                summary.name.clone(),
                Some(0),
                column,
                format!("'{cell}' is not a non-negative integer"),
            ));
        };
        (stored != expected).then(|| {
            Issue::error(
                IssueKind::AggregateMismatch,
                summary.name.clone(),
                Some(0),
                column,
                format!("stored {stored} but recomputed {column} is {expected}"),
            )
        })
    }
}
