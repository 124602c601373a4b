//! CSV table loading and atomic writing.
//!
//! Tables are kept as raw string cells: validation decides what coerces and
//! what does not, so the reader must not lose malformed values by parsing
//! eagerly. Only structural problems (unreadable file, unparseable CSV, no
//! candidate file present) surface as errors here; everything value-level is
//! the checkers' business.
//!
//! Output tables go through a write-to-temporary-then-rename discipline so
//! a crashed run never leaves a half-written view behind.

use std::fs::File;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::debug;

/// Errors for table I/O and file resolution.
#[derive(Debug, Error)]
pub enum TableError {
    /// File I/O error
    #[error("file I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV parsing failed
    #[error("failed to parse {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// None of the candidate file names exist in the data directory
    #[error("no table found in {dir}; expected one of: {}", candidates.join(", "))]
    NoCandidate {
        dir: PathBuf,
        candidates: Vec<String>,
    },

    /// Atomic replacement of the output file failed
    #[error("failed to replace {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for table operations.
pub type Result<T> = std::result::Result<T, TableError>;

/// An in-memory CSV table with raw string cells.
#[derive(Debug, Clone)]
pub struct Table {
    /// File name the table was read from (not the full path)
    pub name: String,
    /// Header row
    pub headers: Vec<String>,
    /// Data rows, one `Vec<String>` per CSV record
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Creates a table from parts; handy in tests.
    pub fn new(
        name: impl Into<String>,
        headers: Vec<impl Into<String>>,
        rows: Vec<Vec<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            headers: headers.into_iter().map(Into::into).collect(),
            rows,
        }
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of a header column, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Header names missing from this table, in `required` order.
    pub fn missing_columns(&self, required: &[&str]) -> Vec<String> {
        required
            .iter()
            .filter(|c| self.column_index(c).is_none())
            .map(|c| c.to_string())
            .collect()
    }

    /// Cell at (row, column name). Short rows yield an empty cell rather
    /// than a panic; ragged input is a data problem, not a crash.
    pub fn cell(&self, row: usize, column: &str) -> &str {
        self.column_index(column)
            .and_then(|idx| self.rows.get(row).and_then(|r| r.get(idx)))
            .map_or("", |s| s.as_str())
    }

    /// Iterates (row index, raw record) pairs.
    pub fn iter_rows(&self) -> impl Iterator<Item = (usize, &Vec<String>)> {
        self.rows.iter().enumerate()
    }
}

/// Returns the first existing candidate file in `dir`.
pub fn pick_existing(dir: &Path, candidates: &[&str]) -> Option<PathBuf> {
    candidates
        .iter()
        .map(|name| dir.join(name))
        .find(|p| p.exists())
}

/// Resolves a table file from candidates, erroring when none exists.
pub fn resolve_table(dir: &Path, candidates: &[&str]) -> Result<PathBuf> {
    pick_existing(dir, candidates).ok_or_else(|| TableError::NoCandidate {
        dir: dir.to_path_buf(),
        candidates: candidates.iter().map(|c| c.to_string()).collect(),
    })
}

/// Reads a CSV file into a [`Table`].
///
/// The reader is flexible about record width; short or long rows are handed
/// to the checkers as-is.
pub fn read_table(path: &Path) -> Result<Table> {
    let file = File::open(path).map_err(|source| TableError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|source| TableError::Csv {
            path: path.to_path_buf(),
            source,
        })?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| TableError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    debug!(table = %name, rows = rows.len(), "read table");

    Ok(Table {
        name,
        headers,
        rows,
    })
}

/// Writes a CSV table atomically: the data goes to a temporary file in the
/// destination directory, then replaces `path` in one rename. Any existing
/// file at `path` is overwritten completely.
pub fn write_table_atomic(
    path: &Path,
    headers: &[&str],
    rows: impl IntoIterator<Item = Vec<String>>,
) -> Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir).map_err(|source| TableError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    // Same directory as the destination so the final rename cannot cross
    // filesystems.
    let tmp = NamedTempFile::new_in(dir).map_err(|source| TableError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut writer = csv::Writer::from_writer(tmp);
    writer
        .write_record(headers)
        .map_err(|source| TableError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
    for row in rows {
        writer.write_record(&row).map_err(|source| TableError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
    }

    let tmp = writer.into_inner().map_err(|e| TableError::Io {
        path: path.to_path_buf(),
        source: e.into_error(),
    })?;

    tmp.persist(path).map_err(|e| TableError::Persist {
        path: path.to_path_buf(),
        source: e.error,
    })?;

    debug!(path = %path.display(), "wrote table");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn write_fixture(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_read_table_basic() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(
            dir.path(),
            "stations.csv",
            "id,name,power_kw\n1,Alpha,22\n2,Beta,150\n",
        );

        let table = read_table(&path).unwrap();
        assert_eq!(table.name, "stations.csv");
        assert_eq!(table.headers, vec!["id", "name", "power_kw"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.cell(1, "power_kw"), "150");
    }

    #[test]
    fn test_short_rows_read_as_empty_cells() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(dir.path(), "ragged.csv", "id,name,city\n1,Alpha\n");

        let table = read_table(&path).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.cell(0, "name"), "Alpha");
        assert_eq!(table.cell(0, "city"), "");
    }

    #[test]
    fn test_missing_columns() {
        let table = Table::new("t.csv", vec!["id", "name"], vec![]);
        assert_eq!(
            table.missing_columns(&["id", "latitude", "longitude"]),
            vec!["latitude".to_string(), "longitude".to_string()]
        );
    }

    #[test]
    fn test_resolve_table_picks_first_candidate() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(dir.path(), "charging_stations.csv", "id\n1\n");
        write_fixture(dir.path(), "charging_station.csv", "id\n2\n");

        let resolved = resolve_table(
            dir.path(),
            &["charging_station.csv", "charging_stations.csv"],
        )
        .unwrap();
        assert_eq!(resolved.file_name().unwrap(), "charging_station.csv");
    }

    #[test]
    fn test_resolve_table_no_candidate() {
        let dir = tempfile::tempdir().unwrap();
        let err = resolve_table(dir.path(), &["a.csv", "b.csv"]).unwrap_err();
        assert!(matches!(err, TableError::NoCandidate { .. }));
        assert!(err.to_string().contains("a.csv, b.csv"));
    }

    #[test]
    fn test_write_table_atomic_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        fs::write(&path, "stale,content\nx,y\n").unwrap();

        write_table_atomic(
            &path,
            &["country_code", "stations"],
            vec![vec!["DE".to_string(), "2".to_string()]],
        )
        .unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, "country_code,stations\nDE,2\n");

        // No temporary files left behind.
        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name() != "out.csv")
            .collect();
        assert!(leftovers.is_empty(), "leftover files: {leftovers:?}");
    }
}
