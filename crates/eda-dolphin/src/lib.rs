//! Missing-Value Analysis for Exploratory Data Analysis
//!
//! A small helper library that computes per-column missing-value statistics
//! over a Polars [`DataFrame`](polars::prelude::DataFrame) and renders them
//! as human-readable reports.
//!
//! # Overview
//!
//! - **Report tables**: missing count, non-missing count and missing
//!   percentage per column, with its declared type
//! - **Filtering and sorting**: only-missing or all columns, declared-type
//!   filters, a minimum percentage, and a stable sort on any statistic
//! - **Text reports**: a summary digest and a quick "worst columns" report
//! - **Fail-open variants**: helpers that log errors and degrade to an
//!   empty table or a diagnostic line instead of failing
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use eda_dolphin::{MissingReportConfig, MissingValueAnalyzer, SortKey, reporting};
//! use polars::prelude::*;
//!
//! let df = df![
//!     "A" => [Some(1), Some(2), None, Some(4), Some(5)],
//!     "C" => [None, None, Some(3.0), Some(4.0), None],
//! ]?;
//!
//! // Strict: returns an error for invalid options
//! let config = MissingReportConfig::builder()
//!     .sort_key(SortKey::Count)
//!     .threshold(10.0)
//!     .build()?;
//! let table = MissingValueAnalyzer::compute(&df, &config)?;
//! println!("{table}");
//! println!("{}", reporting::summarize(&table, &df));
//!
//! // Fail-open: logs the error and returns an empty table
//! let table = MissingValueAnalyzer::compute_or_empty(&df, &config);
//!
//! // Quick report of the worst columns
//! reporting::print_quick_report(&df, 10);
//! ```

pub mod analyzer;
pub mod config;
pub mod error;
pub mod logging;
pub mod reporting;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use analyzer::{AnalysisMode, MissingAnalysis, MissingValueAnalyzer, OrEmptyReport};
pub use config::{
    ColumnFilter, ConfigValidationError, MissingReportConfig, MissingReportConfigBuilder,
    SortDirection, SortKey,
};
pub use error::{EdaError, Result as EdaResult, ResultExt};
pub use logging::init_logging;
pub use reporting::{print_missing_summary, print_quick_report, quick_report, summarize};
pub use types::{DeclaredType, MissingValueRow, ReportField, ReportTable};
pub use utils::{MISSING_VALUE_TOKENS, build_dataset, declared_type, read_csv};
