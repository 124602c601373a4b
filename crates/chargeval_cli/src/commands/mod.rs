pub mod build_views;
pub mod checksums;
pub mod validate;

use anyhow::{bail, Result};
use chargeval_core::{Severity, ValidationOptions};

/// Builds validation options from CLI flags.
pub fn options_from_flags(strict: bool, references: &str) -> Result<ValidationOptions> {
    let reference_severity = match references {
        "warning" => Severity::Warning,
        "error" => Severity::Error,
        other => bail!("invalid --references value '{other}', expected 'warning' or 'error'"),
    };
    Ok(ValidationOptions::new()
        .with_strict(strict)
        .with_reference_severity(reference_severity))
}
