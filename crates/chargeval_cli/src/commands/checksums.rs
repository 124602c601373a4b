use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::checksum;
use crate::output;

pub fn execute(root: &Path, out: &Path, files: &[PathBuf]) -> Result<()> {
    info!("Writing checksum manifest: {}", out.display());

    let entries = checksum::write_manifest(root, out, files)?;
    output::print_success(&format!(
        "Wrote {} ({} entries)",
        out.display(),
        entries
    ));
    Ok(())
}
