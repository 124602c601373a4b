//! Structural errors for validation runs.
//!
//! These abort the run immediately and are distinct from data-quality
//! issues, which are collected into the report instead.

use thiserror::Error;

/// Fatal, unrecoverable errors during a validation run.
#[derive(Debug, Error)]
pub enum ValidatorError {
    /// Table could not be located or read
    #[error(transparent)]
    Table(#[from] chargeval_table::TableError),

    /// A table is missing required columns (unparseable table shape)
    #[error("{table}: missing required columns: {}", columns.join(", "))]
    MissingColumns { table: String, columns: Vec<String> },
}

/// Result type alias for validator operations.
pub type Result<T> = std::result::Result<T, ValidatorError>;
