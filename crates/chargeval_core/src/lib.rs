//! # Chargeval Core
//!
//! Core types for the charging-station dataset validator.
//!
//! This crate provides the building blocks shared by the checker, the view
//! builder, and the CLI:
//!
//! - **Schema**: the declared column set of the station table and its
//!   companion summary files
//! - **Derived fields**: the pure power-class binning and fast-DC threshold
//!   functions, shared so that whatever writes a derived field and whatever
//!   validates it cannot drift apart
//! - **Issues & report**: structured data-quality findings with severity,
//!   kind, and location, merged into a reproducible [`ValidationReport`]
//! - **Options**: explicit [`ValidationOptions`] threaded into report
//!   construction (strict mode is never ambient state)
//!
//! ## Example
//!
//! ```rust
//! use chargeval_core::{Issue, IssueKind, Severity, ValidationOptions, ValidationReport};
//!
//! let issue = Issue::error(
//!     IssueKind::RangeViolation,
//!     "charging_stations.csv",
//!     Some(3),
//!     "latitude",
//!     "value 95 out of range [-90, 90]",
//! );
//!
//! let report = ValidationReport::from_issues(vec![issue], &ValidationOptions::default());
//! assert!(!report.passed());
//! ```

pub mod issue;
pub mod power;
pub mod report;
pub mod schema;

pub use issue::*;
pub use power::*;
pub use report::*;
pub use schema::*;
