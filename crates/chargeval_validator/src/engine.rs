//! Validation engine.
//!
//! Loads the dataset tables, runs the row and cross-file checkers, and
//! merges their findings into a deterministic [`ValidationReport`].

use crate::{CrossChecker, Result, RowChecker, ValidatorError};
use chargeval_core::{
    COUNTRY_SUMMARY_FILE, Issue, STATION_COLUMNS, STATION_FILE_CANDIDATES, ValidationOptions,
    ValidationReport, WORLD_SUMMARY_FILE,
};
use chargeval_table::{Table, read_table, resolve_table};
use std::path::Path;
use tracing::{debug, info};

/// Validates a dataset snapshot: the main station table plus its optional
/// companion summaries.
///
/// Options are threaded through explicitly so two validators with different
/// policies can run side by side.
pub struct DatasetValidator {
    options: ValidationOptions,
}

impl DatasetValidator {
    /// Creates a validator with the given options.
    pub fn new(options: ValidationOptions) -> Self {
        Self { options }
    }

    /// The options this validator was built with.
    pub fn options(&self) -> &ValidationOptions {
        &self.options
    }

    /// Validates the dataset in `data_dir`.
    ///
    /// The main table is resolved from the candidate file names; summary
    /// files are picked up when present. Unreadable files and tables with
    /// missing required columns abort with a [`ValidatorError`]; everything
    /// value-level lands in the report.
    pub fn validate_dir(&self, data_dir: &Path) -> Result<ValidationReport> {
        let stations_path = resolve_table(data_dir, STATION_FILE_CANDIDATES)?;
        let stations = read_table(&stations_path)?;
        info!(
            table = %stations.name,
            rows = stations.len(),
            "loaded main station table"
        );

        let country_summary = self.read_optional(data_dir, COUNTRY_SUMMARY_FILE)?;
        let world_summary = self.read_optional(data_dir, WORLD_SUMMARY_FILE)?;

        self.validate_tables(
            &stations,
            country_summary.as_ref(),
            world_summary.as_ref(),
        )
    }

    /// Validates already-loaded tables. Exposed for callers that manage
    /// their own I/O (and for tests).
    pub fn validate_tables(
        &self,
        stations: &Table,
        country_summary: Option<&Table>,
        world_summary: Option<&Table>,
    ) -> Result<ValidationReport> {
        self.require_station_columns(stations)?;

        let mut issues = Vec::new();

        issues.extend(RowChecker::new().check(stations));
        debug!(issues = issues.len(), "row checks complete");

        let cross = CrossChecker::new(self.options.reference_severity);
        issues.extend(cross.check(stations, country_summary, world_summary));
        debug!(issues = issues.len(), "cross-file checks complete");

        issues.push(Issue::info(
            stations.name.clone(),
            format!("{} rows scanned", stations.len()),
        ));

        let report =
            ValidationReport::from_issues(issues, &self.options).with_rows_scanned(stations.len());
        info!(
            errors = report.error_count(),
            warnings = report.warning_count(),
            passed = report.passed(),
            "validation complete"
        );
        Ok(report)
    }

    /// A main table without the declared columns has an unparseable shape;
    /// that aborts the run rather than producing issues.
    fn require_station_columns(&self, stations: &Table) -> Result<()> {
        let required: Vec<&str> = STATION_COLUMNS.iter().map(|c| c.name).collect();
        let missing = stations.missing_columns(&required);
        if missing.is_empty() {
            return Ok(());
        }
        Err(ValidatorError::MissingColumns {
            table: stations.name.clone(),
            columns: missing,
        })
    }

    fn read_optional(&self, data_dir: &Path, name: &str) -> Result<Option<Table>> {
        let path = data_dir.join(name);
        if !path.exists() {
            debug!(file = name, "optional summary file not present");
            return Ok(None);
        }
        Ok(Some(read_table(&path)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chargeval_core::{IssueKind, ReportStatus, Severity};
    use pretty_assertions::assert_eq;
    use std::fs;

    const STATION_HEADER: &str =
        "id,name,city,country_code,state_province,latitude,longitude,ports,power_kw,power_class,is_fast_dc";

    fn station_table(rows: &[&str]) -> Table {
        Table::new(
            "charging_stations.csv",
            STATION_HEADER.split(',').collect::<Vec<_>>(),
            rows.iter()
                .map(|r| r.split(',').map(str::to_string).collect())
                .collect(),
        )
    }

    fn validator() -> DatasetValidator {
        DatasetValidator::new(ValidationOptions::new())
    }

    #[test]
    fn test_clean_dataset_passes() {
        let stations = station_table(&[
            "1,Alpha,Berlin,DE,BE,52.5,13.4,4,150,hpc,true",
            "2,Beta,Paris,FR,IDF,48.8,2.3,2,22,slow,false",
        ]);
        let report = validator().validate_tables(&stations, None, None).unwrap();
        assert_eq!(report.status(), ReportStatus::Pass);
        assert_eq!(report.error_count(), 0);
        assert_eq!(report.rows_scanned, 2);
        assert_eq!(report.info_count(), 1);
    }

    #[test]
    fn test_missing_columns_is_fatal() {
        let stations = Table::new(
            "charging_stations.csv",
            vec!["id", "name"],
            vec![vec!["1".into(), "Alpha".into()]],
        );
        let err = validator()
            .validate_tables(&stations, None, None)
            .unwrap_err();
        assert!(matches!(err, ValidatorError::MissingColumns { .. }));
        assert!(err.to_string().contains("latitude"));
    }

    #[test]
    fn test_report_is_sorted_and_reproducible() {
        let stations = station_table(&[
            "1,Alpha,Berlin,DE,BE,95,13.4,4,150,hpc,true",
            "2,Beta,Paris,FR,IDF,48.8,200,2,22,slow,false",
            "2,Gamma,Lyon,FR,ARA,45.7,4.8,1,50,fast,true",
        ]);

        let first = validator().validate_tables(&stations, None, None).unwrap();
        let second = validator().validate_tables(&stations, None, None).unwrap();
        assert_eq!(first.issues, second.issues);

        let rows: Vec<Option<usize>> = first.issues.iter().map(|i| i.row).collect();
        let mut sorted = rows.clone();
        sorted.sort();
        assert_eq!(rows, sorted);
    }

    #[test]
    fn test_strict_mode_changes_status_not_issues() {
        let stations = station_table(&["1,Alpha,Berlin,DE,BE,52.5,13.4,4,150,hpc,true"]);
        let summary = Table::new(
            "country_summary.csv",
            vec!["country_code", "count", "max_power_kw"],
            vec![
                vec!["DE".into(), "1".into(), "150".into()],
                vec!["ZZ".into(), "2".into(), "11".into()],
            ],
        );

        let lenient = validator()
            .validate_tables(&stations, Some(&summary), None)
            .unwrap();
        let strict = DatasetValidator::new(ValidationOptions::new().with_strict(true))
            .validate_tables(&stations, Some(&summary), None)
            .unwrap();

        assert_eq!(lenient.issues, strict.issues);
        assert_eq!(lenient.status(), ReportStatus::Pass);
        assert_eq!(strict.status(), ReportStatus::Fail);
        assert_eq!(strict.warning_count(), 1);
    }

    #[test]
    fn test_reference_severity_threaded_through() {
        let stations = station_table(&["1,Alpha,Berlin,DE,BE,52.5,13.4,4,150,hpc,true"]);
        let summary = Table::new(
            "country_summary.csv",
            vec!["country_code", "count", "max_power_kw"],
            vec![vec!["ZZ".into(), "2".into(), "11".into()]],
        );

        let report = DatasetValidator::new(
            ValidationOptions::new().with_reference_severity(Severity::Error),
        )
        .validate_tables(&stations, Some(&summary), None)
        .unwrap();

        // Orphan ZZ and missing DE, both promoted to errors.
        assert_eq!(report.error_count(), 2);
        assert_eq!(report.status(), ReportStatus::Fail);
    }

    #[test]
    fn test_validate_dir_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("charging_stations.csv"),
            format!(
                "{STATION_HEADER}\n\
                 1,Alpha,Berlin,DE,BE,52.5,13.4,4,150,hpc,true\n\
                 2,Beta,Paris,FR,IDF,48.8,2.3,2,22,slow,false\n"
            ),
        )
        .unwrap();
        fs::write(
            dir.path().join("country_summary.csv"),
            "country_code,count,max_power_kw\nDE,1,150\nFR,1,22\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("world_summary.csv"),
            "total_count,total_countries,max_power_kw\n2,2,150\n",
        )
        .unwrap();

        let report = validator().validate_dir(dir.path()).unwrap();
        assert_eq!(report.status(), ReportStatus::Pass);
        assert_eq!(report.error_count(), 0);
        assert_eq!(report.warning_count(), 0);
    }

    #[test]
    fn test_validate_dir_missing_main_table() {
        let dir = tempfile::tempdir().unwrap();
        let err = validator().validate_dir(dir.path()).unwrap_err();
        assert!(matches!(err, ValidatorError::Table(_)));
    }

    #[test]
    fn test_bad_aggregate_detected_through_engine() {
        let stations = station_table(&[
            "1,Alpha,Portland,US,OR,45.5,-122.6,2,10,slow,false",
            "2,Beta,Austin,US,TX,30.2,-97.7,4,60,fast,true",
            "3,Gamma,Denver,US,CO,39.7,-104.9,2,30,slow,false",
        ]);
        let summary = Table::new(
            "country_summary.csv",
            vec!["country_code", "count", "max_power_kw"],
            vec![vec!["US".into(), "3".into(), "50".into()]],
        );

        let report = validator()
            .validate_tables(&stations, Some(&summary), None)
            .unwrap();
        assert_eq!(report.error_count(), 1);
        let mismatch = report
            .issues
            .iter()
            .find(|i| i.kind == IssueKind::AggregateMismatch)
            .unwrap();
        assert_eq!(mismatch.column, "max_power_kw");
    }
}
