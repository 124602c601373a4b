use anyhow::{Context, Result};
use chargeval_validator::DatasetValidator;
use std::path::Path;
use tracing::info;

use crate::output;

pub fn execute(data_dir: &Path, strict: bool, references: &str, format: &str) -> Result<()> {
    info!("Validating dataset in: {}", data_dir.display());
    info!("Strict mode: {}", strict);

    let options = super::options_from_flags(strict, references)?;
    let validator = DatasetValidator::new(options);

    let report = validator
        .validate_dir(data_dir)
        .with_context(|| format!("failed to validate dataset in {}", data_dir.display()))?;

    output::print_report(&report, format);

    if !report.passed() {
        std::process::exit(crate::EXIT_FAIL);
    }

    Ok(())
}
