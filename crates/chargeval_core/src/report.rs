//! Validation report and the strict-mode policy.
//!
//! The report is a pure function of the collected issues and an explicit
//! [`ValidationOptions`] value. Strict mode only moves the pass/fail
//! threshold; it never changes which issues were detected or how severe
//! they are, so the same checker output serves both a lenient informational
//! run and a release-gating run.

use crate::{Issue, Severity};
use serde::{Deserialize, Serialize};

/// Options threaded into validation and report construction.
///
/// Carried explicitly rather than as ambient state so lenient and strict
/// checks can run side by side (e.g. in tests) without interference.
#[derive(Debug, Clone, Copy)]
pub struct ValidationOptions {
    /// Whether warnings escalate the overall status to fail
    pub strict: bool,

    /// Severity for orphan-reference / missing-aggregation findings.
    ///
    /// Summaries may intentionally omit below-threshold entries, so these
    /// default to warnings, but publishers who require complete summaries
    /// can promote them to errors.
    pub reference_severity: Severity,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            strict: false,
            reference_severity: Severity::Warning,
        }
    }
}

impl ValidationOptions {
    /// Creates options with default settings (lenient, warnings for
    /// reference findings).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets strict mode.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Sets the severity of orphan-reference / missing-aggregation
    /// findings.
    pub fn with_reference_severity(mut self, severity: Severity) -> Self {
        self.reference_severity = severity;
        self
    }
}

/// Overall outcome of a validation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Pass,
    Fail,
}

/// Aggregated validation outcome: every collected issue plus the verdict.
///
/// Issues are sorted by (file, row index, column name) so that two runs on
/// identical input produce identical reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    /// All collected issues, in deterministic order
    pub issues: Vec<Issue>,

    /// Whether this report was computed under strict mode
    pub strict: bool,

    /// Number of main-table rows scanned
    pub rows_scanned: usize,
}

impl ValidationReport {
    /// Builds a report from collected issues, sorting them into the
    /// deterministic order.
    pub fn from_issues(mut issues: Vec<Issue>, options: &ValidationOptions) -> Self {
        issues.sort_by(|a, b| a.location_cmp(b));
        Self {
            issues,
            strict: options.strict,
            rows_scanned: 0,
        }
    }

    /// Records the number of main-table rows scanned.
    pub fn with_rows_scanned(mut self, rows: usize) -> Self {
        self.rows_scanned = rows;
        self
    }

    /// Overall status: fail on any error, and in strict mode also on any
    /// warning.
    pub fn status(&self) -> ReportStatus {
        if self.error_count() > 0 {
            return ReportStatus::Fail;
        }
        if self.strict && self.warning_count() > 0 {
            return ReportStatus::Fail;
        }
        ReportStatus::Pass
    }

    /// Convenience predicate for `status() == Pass`.
    pub fn passed(&self) -> bool {
        self.status() == ReportStatus::Pass
    }

    /// Number of error-severity issues.
    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    /// Number of warning-severity issues.
    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    /// Number of info-severity issues.
    pub fn info_count(&self) -> usize {
        self.count(Severity::Info)
    }

    fn count(&self, severity: Severity) -> usize {
        self.issues.iter().filter(|i| i.severity == severity).count()
    }

    /// Issues of a given severity, in report order.
    pub fn issues_with_severity(&self, severity: Severity) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(move |i| i.severity == severity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::IssueKind;
    use pretty_assertions::assert_eq;

    fn warning() -> Issue {
        Issue::warning(
            IssueKind::OrphanReference,
            "country_summary.csv",
            Some(1),
            "country_code",
            "code XX absent from main table",
        )
    }

    fn error() -> Issue {
        Issue::error(
            IssueKind::RangeViolation,
            "charging_stations.csv",
            Some(0),
            "latitude",
            "value 95 out of range [-90, 90]",
        )
    }

    #[test]
    fn test_error_always_fails() {
        for strict in [false, true] {
            let options = ValidationOptions::new().with_strict(strict);
            let report = ValidationReport::from_issues(vec![error()], &options);
            assert_eq!(report.status(), ReportStatus::Fail);
        }
    }

    #[test]
    fn test_warnings_only_passes_unless_strict() {
        let lenient = ValidationReport::from_issues(vec![warning()], &ValidationOptions::new());
        assert_eq!(lenient.status(), ReportStatus::Pass);

        let strict = ValidationReport::from_issues(
            vec![warning()],
            &ValidationOptions::new().with_strict(true),
        );
        assert_eq!(strict.status(), ReportStatus::Fail);
    }

    #[test]
    fn test_info_never_fails() {
        let report = ValidationReport::from_issues(
            vec![Issue::info("charging_stations.csv", "3 rows scanned")],
            &ValidationOptions::new().with_strict(true),
        );
        assert_eq!(report.status(), ReportStatus::Pass);
    }

    #[test]
    fn test_issue_ordering_is_deterministic() {
        let issues = vec![
            Issue::error(IssueKind::RangeViolation, "b.csv", Some(0), "lat", "x"),
            Issue::error(IssueKind::RangeViolation, "a.csv", Some(9), "lon", "x"),
            Issue::error(IssueKind::RangeViolation, "a.csv", Some(2), "lat", "x"),
            Issue::error(IssueKind::RangeViolation, "a.csv", Some(2), "id", "x"),
        ];
        let options = ValidationOptions::new();

        let first = ValidationReport::from_issues(issues.clone(), &options);
        let second = ValidationReport::from_issues(issues, &options);
        assert_eq!(first.issues, second.issues);

        let locations: Vec<(&str, Option<usize>, &str)> = first
            .issues
            .iter()
            .map(|i| (i.file.as_str(), i.row, i.column.as_str()))
            .collect();
        assert_eq!(
            locations,
            vec![
                ("a.csv", Some(2), "id"),
                ("a.csv", Some(2), "lat"),
                ("a.csv", Some(9), "lon"),
                ("b.csv", Some(0), "lat"),
            ]
        );
    }

    #[test]
    fn test_counts() {
        let report = ValidationReport::from_issues(
            vec![error(), warning(), Issue::info("a.csv", "stats")],
            &ValidationOptions::new(),
        );
        assert_eq!(report.error_count(), 1);
        assert_eq!(report.warning_count(), 1);
        assert_eq!(report.info_count(), 1);
    }
}
