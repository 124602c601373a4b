//! Declared schema of the station table and its companion files.
//!
//! The dataset schema is fixed: one main station table plus two optional
//! summary tables. Columns are declared with a type and a blankness policy
//! so the row checker can validate presence, coercibility, and ranges
//! without hard-coding column knowledge inline.

use serde::{Deserialize, Serialize};

/// Sentinel accepted in place of a real value for selected string columns.
pub const UNKNOWN_SENTINEL: &str = "UNKNOWN";

/// Candidate file names for the main station table, checked in order.
pub const STATION_FILE_CANDIDATES: &[&str] = &[
    "charging_stations_world.csv",
    "charging_station.csv",
    "charging_stations.csv",
];

/// File name of the per-country summary table.
pub const COUNTRY_SUMMARY_FILE: &str = "country_summary.csv";

/// File name of the global roll-up table.
pub const WORLD_SUMMARY_FILE: &str = "world_summary.csv";

/// Declared type of a column, used for coercibility checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Integer-valued column
    Int,
    /// Floating point column
    Float,
    /// Boolean column (`true/false`, `1/0`, `yes/no`, case-insensitive)
    Bool,
    /// Free-form string column
    String,
}

/// A single declared column of the station table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Column {
    /// Column name as it appears in the CSV header
    pub name: &'static str,

    /// Declared type
    pub ty: ColumnType,

    /// Whether the `UNKNOWN` sentinel is accepted in place of a value
    pub sentinel_ok: bool,
}

impl Column {
    const fn new(name: &'static str, ty: ColumnType, sentinel_ok: bool) -> Self {
        Self {
            name,
            ty,
            sentinel_ok,
        }
    }
}

/// Declared columns of the main station table, in file order.
///
/// Every column is required; blankness is an issue everywhere, with the
/// `UNKNOWN` sentinel permitted only where `sentinel_ok` says so.
pub const STATION_COLUMNS: &[Column] = &[
    Column::new("id", ColumnType::Int, false),
    Column::new("name", ColumnType::String, true),
    Column::new("city", ColumnType::String, true),
    Column::new("country_code", ColumnType::String, false),
    Column::new("state_province", ColumnType::String, true),
    Column::new("latitude", ColumnType::Float, false),
    Column::new("longitude", ColumnType::Float, false),
    Column::new("ports", ColumnType::Int, false),
    Column::new("power_kw", ColumnType::Float, false),
    Column::new("power_class", ColumnType::String, false),
    Column::new("is_fast_dc", ColumnType::Bool, false),
];

/// Looks up a declared station column by name.
pub fn station_column(name: &str) -> Option<&'static Column> {
    STATION_COLUMNS.iter().find(|c| c.name == name)
}

/// Accepted header spellings for the count column of the country summary.
///
/// Historical snapshots used `stations`; newer ones use `count`.
pub const COUNTRY_COUNT_COLUMNS: &[&str] = &["stations", "count"];

/// Parses a boolean cell, accepting the spellings the dataset has used.
///
/// Returns `None` when the cell is not a recognizable boolean.
pub fn parse_bool(cell: &str) -> Option<bool> {
    match cell.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

/// Returns true when a cell is blank (empty or whitespace only).
pub fn is_blank(cell: &str) -> bool {
    cell.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_station_columns_complete() {
        let names: Vec<&str> = STATION_COLUMNS.iter().map(|c| c.name).collect();
        assert_eq!(
            names,
            vec![
                "id",
                "name",
                "city",
                "country_code",
                "state_province",
                "latitude",
                "longitude",
                "ports",
                "power_kw",
                "power_class",
                "is_fast_dc",
            ]
        );
    }

    #[test]
    fn test_sentinel_policy() {
        assert!(station_column("city").unwrap().sentinel_ok);
        assert!(station_column("state_province").unwrap().sentinel_ok);
        assert!(!station_column("country_code").unwrap().sentinel_ok);
        assert!(!station_column("id").unwrap().sentinel_ok);
    }

    #[test]
    fn test_parse_bool_spellings() {
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool("FALSE"), Some(false));
        assert_eq!(parse_bool("1"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool(" Yes "), Some(true));
        assert_eq!(parse_bool("no"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
        assert_eq!(parse_bool(""), None);
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank("   "));
        assert!(!is_blank("UNKNOWN"));
    }
}
