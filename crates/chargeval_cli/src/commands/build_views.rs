use anyhow::{Context, Result};
use chargeval_validator::DatasetValidator;
use chargeval_views::{ViewError, build_dir};
use std::path::Path;
use tracing::info;

use crate::output;

pub fn execute(
    data_dir: &Path,
    out_dir: &Path,
    strict: bool,
    references: &str,
    format: &str,
) -> Result<()> {
    info!("Building views: {} -> {}", data_dir.display(), out_dir.display());

    let options = super::options_from_flags(strict, references)?;

    match build_dir(data_dir, out_dir, &options) {
        Ok((report, written)) => {
            output::print_report(&report, format);
            output::print_success("Wrote:");
            for path in &written {
                println!("  - {}", path.display());
            }
            if !report.passed() {
                std::process::exit(crate::EXIT_FAIL);
            }
            Ok(())
        }
        Err(
            err @ (ViewError::PrecursorInvalid { .. } | ViewError::StrictWarnings { .. }),
        ) => {
            // Re-run validation so the user sees every collected issue,
            // not just the refusal.
            let report = DatasetValidator::new(options)
                .validate_dir(data_dir)
                .with_context(|| {
                    format!("failed to validate dataset in {}", data_dir.display())
                })?;
            output::print_report(&report, format);
            output::print_error(&format!("{err}; no files written"));
            std::process::exit(crate::EXIT_FAIL);
        }
        Err(err) => Err(err).context("view build failed"),
    }
}
