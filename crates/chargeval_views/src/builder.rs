//! Deterministic aggregation of the validated station table.
//!
//! All aggregates are exact full-scan reductions; nothing is sampled or
//! approximated. The float max carries the source field's comparison
//! semantics end to end, so no rounding can change which row wins.

use crate::{Result, ViewError};
use chargeval_core::{ValidationReport, is_fast_dc, parse_bool};
use chargeval_table::Table;
use chargeval_validator::country_aggregates;

/// Columns of the compact ML-ready subset view, in output order.
pub const ML_VIEW_COLUMNS: &[&str] = &[
    "id",
    "country_code",
    "latitude",
    "longitude",
    "ports",
    "power_kw",
    "is_fast_dc",
];

/// One row of the per-country summary view.
#[derive(Debug, Clone, PartialEq)]
pub struct CountrySummaryRow {
    pub country_code: String,
    pub stations: u64,
    pub max_power_kw: Option<f64>,
}

/// The single global roll-up row.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldSummary {
    pub total_count: u64,
    pub total_countries: u64,
    pub max_power_kw: Option<f64>,
    pub ports_sum: f64,
    pub fast_dc_share: Option<f64>,
}

/// All derived views for one dataset snapshot.
#[derive(Debug, Clone)]
pub struct DatasetViews {
    /// Per-country rows, sorted by country code ascending
    pub countries: Vec<CountrySummaryRow>,
    pub world: WorldSummary,
    /// Raw cells of the ML subset, one row per station
    pub ml_rows: Vec<Vec<String>>,
}

/// Builds all derived views from a validated station table.
///
/// The report gates the build: any error-severity finding means the input
/// cannot be trusted as a view precursor, and the build fails without
/// producing anything. A report failing under strict mode on warnings
/// alone is refused as well, so a strict run never publishes outputs it
/// would report as failed.
pub fn build_views(stations: &Table, report: &ValidationReport) -> Result<DatasetViews> {
    let errors = report.error_count();
    if errors > 0 {
        return Err(ViewError::PrecursorInvalid { errors });
    }
    if !report.passed() {
        return Err(ViewError::StrictWarnings {
            warnings: report.warning_count(),
        });
    }

    let aggregates = country_aggregates(stations);

    // BTreeMap iteration is already ascending by code.
    let countries = aggregates
        .iter()
        .map(|(code, aggregate)| CountrySummaryRow {
            country_code: code.clone(),
            stations: aggregate.count,
            max_power_kw: aggregate.max_power_kw,
        })
        .collect();

    let world = world_summary(stations, aggregates.len() as u64);
    let ml_rows = ml_subset(stations);

    Ok(DatasetViews {
        countries,
        world,
        ml_rows,
    })
}

fn world_summary(stations: &Table, total_countries: u64) -> WorldSummary {
    let mut max_power_kw: Option<f64> = None;
    let mut ports_sum = 0.0;
    let mut fast_dc_count: u64 = 0;

    for (row, _) in stations.iter_rows() {
        if let Ok(power) = stations.cell(row, "power_kw").trim().parse::<f64>() {
            max_power_kw = Some(match max_power_kw {
                Some(current) if current >= power => current,
                _ => power,
            });
            if is_fast_dc(power) {
                // Recomputed from power, not trusted from the stored flag;
                // the two are known consistent once validation passed.
                fast_dc_count += 1;
            }
        }
        if let Ok(ports) = stations.cell(row, "ports").trim().parse::<f64>() {
            ports_sum += ports;
        }
    }

    let total_count = stations.len() as u64;
    let fast_dc_share = (total_count > 0).then(|| fast_dc_count as f64 / total_count as f64);

    WorldSummary {
        total_count,
        total_countries,
        max_power_kw,
        ports_sum,
        fast_dc_share,
    }
}

fn ml_subset(stations: &Table) -> Vec<Vec<String>> {
    stations
        .iter_rows()
        .map(|(row, _)| {
            ML_VIEW_COLUMNS
                .iter()
                .map(|col| normalize_ml_cell(col, stations.cell(row, col)))
                .collect()
        })
        .collect()
}

/// The ML view normalizes boolean spellings; everything else passes through
/// unchanged.
fn normalize_ml_cell(column: &str, cell: &str) -> String {
    if column == "is_fast_dc" {
        if let Some(b) = parse_bool(cell) {
            return b.to_string();
        }
    }
    cell.trim().to_string()
}
