//! # gtview-core - Core Domain Types
//!
//! Foundation crate for gtview. Provides the comparison backend's domain
//! types, error handling, logging setup and the identifier helpers shared
//! by the gateway and the application layer.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, chrono, thiserror, tracing).
//!
//! ## Public API
//!
//! ### Domain Types (`types`)
//! - [`Run`], [`IndentationRun`] - Summary rows of completed comparison runs
//! - [`FileDetailRow`] - One (file, page) row of a run's detail listing
//! - [`ThreeWayViewPayload`], [`ComparisonRow`] - Page-level viewer data
//! - [`MatchField`] - The six compared fields of a comparison row
//!
//! ### Identifiers (`identifiers`)
//! - [`content_file_identifier()`], [`indentation_file_identifier()`]
//! - [`strip_last_segment()`] - File stem for indentation three-way requests
//! - [`format_run_datetime()`] - Human readable run timestamp
//!
//! ### Summaries (`summary`)
//! - [`DetailSummary`] - Totals over a detail listing
//! - [`MatchGrade`] - Success/warning/danger band of a percentage
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum with `fatal` vs `recoverable` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use gtview_core::prelude::*;
//! ```

pub mod error;
pub mod identifiers;
pub mod logging;
pub mod summary;
pub mod types;

/// Prelude for common imports used throughout all gtview crates
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

// Re-export commonly used types at crate root for convenience
pub use error::{Error, Result, ResultExt};
pub use identifiers::{
    content_file_identifier, format_run_datetime, indentation_file_identifier,
    strip_last_segment, FileTarget, RUN_ID_FORMAT,
};
pub use summary::{DetailSummary, MatchGrade};
pub use types::{
    format_value, ComparisonRow, ComparisonSubmitted, DetailKind, FileDetailRow, FileDiffRow,
    FileResult, FolderKind, IndentationRun, MatchField, Pagination, Run, SavePayload,
    ThreeWayViewPayload, CONTENT_DISPLAY_LIMIT,
};
