//! Errors for view building.

use thiserror::Error;

/// Errors that can occur while building or writing derived views.
#[derive(Debug, Error)]
pub enum ViewError {
    /// The input table carries error-severity findings; views must not be
    /// derived from invalid data
    #[error("refusing to build views: validation found {errors} error(s)")]
    PrecursorInvalid { errors: usize },

    /// The report failed under strict mode on warnings alone; a failing
    /// run must not publish views either
    #[error("refusing to build views under strict mode: {warnings} warning(s)")]
    StrictWarnings { warnings: usize },

    /// Validation itself failed structurally
    #[error(transparent)]
    Validator(#[from] chargeval_validator::ValidatorError),

    /// Table I/O failed
    #[error(transparent)]
    Table(#[from] chargeval_table::TableError),
}

/// Result type alias for view operations.
pub type Result<T> = std::result::Result<T, ViewError>;
