//! SHA-256 checksum manifest writer.
//!
//! Manifest lines are `<hex digest>  <path relative to root>`, sorted and
//! de-duplicated so the manifest is stable across invocations. The manifest
//! file itself is replaced atomically.

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

const CHUNK_SIZE: usize = 1024 * 1024;

/// Streams a file through SHA-256 and returns the lowercase hex digest.
pub fn sha256_file(path: &Path) -> Result<String> {
    let mut file =
        File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let mut hasher = Sha256::new();
    let mut chunk = vec![0u8; CHUNK_SIZE];

    loop {
        let read = file
            .read(&mut chunk)
            .with_context(|| format!("failed to read {}", path.display()))?;
        if read == 0 {
            break;
        }
        hasher.update(&chunk[..read]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

/// Writes a checksum manifest for `files` into `out`, returning the number
/// of entries written.
pub fn write_manifest(root: &Path, out: &Path, files: &[PathBuf]) -> Result<usize> {
    let root = root
        .canonicalize()
        .with_context(|| format!("root directory not accessible: {}", root.display()))?;

    // Unique entries in stable path order.
    let mut unique: BTreeSet<PathBuf> = BTreeSet::new();
    for file in files {
        let resolved = file
            .canonicalize()
            .with_context(|| format!("file not accessible: {}", file.display()))?;
        unique.insert(resolved);
    }

    let mut lines = Vec::with_capacity(unique.len());
    for path in &unique {
        let rel = path.strip_prefix(&root).unwrap_or(path);
        let rel = rel.to_string_lossy().replace('\\', "/");
        lines.push(format!("{}  {}", sha256_file(path)?, rel));
    }

    let dir = out.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("failed to create temporary file in {}", dir.display()))?;
    let mut content = lines.join("\n");
    content.push('\n');
    tmp.write_all(content.as_bytes())
        .context("failed to write manifest")?;
    tmp.persist(out)
        .with_context(|| format!("failed to replace {}", out.display()))?;

    Ok(lines.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    #[test]
    fn test_sha256_known_digest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hello.txt");
        fs::write(&path, b"hello\n").unwrap();
        // sha256 of "hello\n"
        assert_eq!(
            sha256_file(&path).unwrap(),
            "5891b5b522d5df086d0ff0b110fbd9d21bb4fc7163af34d08286a2e846f6be03"
        );
    }

    #[test]
    fn test_manifest_sorted_and_unique() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.csv");
        let b = dir.path().join("b.csv");
        fs::write(&a, "1").unwrap();
        fs::write(&b, "2").unwrap();
        let out = dir.path().join("checksums.sha256");

        let count = write_manifest(
            dir.path(),
            &out,
            &[b.clone(), a.clone(), a.clone()],
        )
        .unwrap();
        assert_eq!(count, 2);

        let content = fs::read_to_string(&out).unwrap();
        let entries: Vec<&str> = content.lines().collect();
        assert_eq!(entries.len(), 2);
        assert!(entries[0].ends_with("  a.csv"));
        assert!(entries[1].ends_with("  b.csv"));
        assert!(content.ends_with('\n'));
    }

    #[test]
    fn test_manifest_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("checksums.sha256");
        let missing = dir.path().join("nope.csv");
        assert!(write_manifest(dir.path(), &out, &[missing]).is_err());
    }
}
