//! Atomic writing of the derived view tables.
//!
//! Each table is a total overwrite of any prior file at its path, written
//! through the temporary-then-rename discipline in `chargeval_table`.

use crate::{DatasetViews, ML_VIEW_COLUMNS, Result};
use chargeval_core::{COUNTRY_SUMMARY_FILE, WORLD_SUMMARY_FILE};
use chargeval_table::write_table_atomic;
use std::path::{Path, PathBuf};
use tracing::info;

/// File name of the compact ML-ready view.
pub const ML_VIEW_FILE: &str = "charging_station_ml.csv";

/// Formats an optional float cell; absent aggregates write as empty.
fn float_cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Writes all views into `out_dir`, returning the written paths in write
/// order.
pub fn write_views(views: &DatasetViews, out_dir: &Path) -> Result<Vec<PathBuf>> {
    let country_path = out_dir.join(COUNTRY_SUMMARY_FILE);
    write_table_atomic(
        &country_path,
        &["country_code", "stations", "max_power_kw"],
        views.countries.iter().map(|row| {
            vec![
                row.country_code.clone(),
                row.stations.to_string(),
                float_cell(row.max_power_kw),
            ]
        }),
    )?;

    let world_path = out_dir.join(WORLD_SUMMARY_FILE);
    write_table_atomic(
        &world_path,
        &[
            "total_count",
            "total_countries",
            "max_power_kw",
            "ports_sum",
            "fast_dc_share",
        ],
        std::iter::once(vec![
            views.world.total_count.to_string(),
            views.world.total_countries.to_string(),
            float_cell(views.world.max_power_kw),
            views.world.ports_sum.to_string(),
            float_cell(views.world.fast_dc_share),
        ]),
    )?;

    let ml_path = out_dir.join(ML_VIEW_FILE);
    write_table_atomic(&ml_path, ML_VIEW_COLUMNS, views.ml_rows.iter().cloned())?;

    let written = vec![country_path, world_path, ml_path];
    info!(files = written.len(), out_dir = %out_dir.display(), "views written");
    Ok(written)
}
