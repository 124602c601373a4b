//! # Chargeval Views
//!
//! Derived-view builder for the charging-station dataset. Consumes a
//! validated station table and deterministically computes the aggregate
//! view tables:
//!
//! - `country_summary.csv`: one row per country code, sorted ascending
//! - `world_summary.csv`: a single global roll-up row
//! - `charging_station_ml.csv`: a compact ML-ready column subset
//!
//! Views are only built over input the validation report passes: any
//! error-severity finding fails the build with
//! [`ViewError::PrecursorInvalid`], and a strict-mode report failing on
//! warnings alone fails it with [`ViewError::StrictWarnings`], in both
//! cases before anything is written. Output files are replaced atomically
//! and completely; views never merge with stale content.
//!
//! ## Example
//!
//! ```rust,no_run
//! use chargeval_core::ValidationOptions;
//! use chargeval_views::build_dir;
//! use std::path::Path;
//!
//! let (report, written) = build_dir(
//!     Path::new("data"),
//!     Path::new("generated"),
//!     &ValidationOptions::new(),
//! )?;
//! println!("wrote {} files, {} warnings", written.len(), report.warning_count());
//! # Ok::<(), chargeval_views::ViewError>(())
//! ```

mod builder;
mod error;
mod writer;

pub use builder::*;
pub use error::*;
pub use writer::*;

use chargeval_core::{
    COUNTRY_SUMMARY_FILE, STATION_FILE_CANDIDATES, ValidationOptions, ValidationReport,
    WORLD_SUMMARY_FILE,
};
use chargeval_table::{read_table, resolve_table};
use chargeval_validator::DatasetValidator;
use std::path::{Path, PathBuf};

/// Validates the dataset in `data_dir`, then builds and writes the derived
/// views into `out_dir`.
///
/// Returns the validation report alongside the written paths so callers can
/// print the report and feed the paths to the checksum writer. Fails with
/// [`ViewError::PrecursorInvalid`] before writing anything when the report
/// contains errors.
pub fn build_dir(
    data_dir: &Path,
    out_dir: &Path,
    options: &ValidationOptions,
) -> Result<(ValidationReport, Vec<PathBuf>)> {
    let stations_path = resolve_table(data_dir, STATION_FILE_CANDIDATES)?;
    let stations = read_table(&stations_path)?;

    let country_path = data_dir.join(COUNTRY_SUMMARY_FILE);
    let country_summary = country_path.exists().then(|| read_table(&country_path)).transpose()?;
    let world_path = data_dir.join(WORLD_SUMMARY_FILE);
    let world_summary = world_path.exists().then(|| read_table(&world_path)).transpose()?;

    let validator = DatasetValidator::new(*options);
    let report = validator.validate_tables(
        &stations,
        country_summary.as_ref(),
        world_summary.as_ref(),
    )?;

    let views = build_views(&stations, &report)?;
    let written = write_views(&views, out_dir)?;
    Ok((report, written))
}
