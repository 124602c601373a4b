//! # Chargeval Validator
//!
//! Validation engine for the charging-station dataset. This crate provides
//! the checking logic that turns raw tables into a structured
//! [`ValidationReport`](chargeval_core::ValidationReport):
//!
//! - Row constraint checking (presence, coercibility, ranges, derived-field
//!   consistency, id uniqueness)
//! - Referential & cross-file checking (summary aggregates recomputed from
//!   the raw table, orphan/missing-aggregation detection)
//! - The engine that loads the tables, runs both checkers, and merges their
//!   issues into a deterministic report
//!
//! Per-row problems are collected, never thrown: one bad row never aborts
//! validation of the rest of the table. Only structural failures (missing
//! file, unreadable CSV, missing required columns) surface as
//! [`ValidatorError`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use chargeval_core::ValidationOptions;
//! use chargeval_validator::DatasetValidator;
//! use std::path::Path;
//!
//! let validator = DatasetValidator::new(ValidationOptions::new().with_strict(true));
//! let report = validator.validate_dir(Path::new("data"))?;
//!
//! for issue in &report.issues {
//!     println!("{issue}");
//! }
//! println!("passed: {}", report.passed());
//! # Ok::<(), chargeval_validator::ValidatorError>(())
//! ```

mod cross;
mod engine;
mod error;
mod rows;

pub use cross::*;
pub use engine::*;
pub use error::*;
pub use rows::*;
