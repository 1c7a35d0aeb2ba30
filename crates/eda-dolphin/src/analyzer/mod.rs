//! Missing-value analysis.
//!
//! [`MissingValueAnalyzer::compute`] is the strict entry point and returns
//! an error for malformed input or options. [`MissingValueAnalyzer::compute_or_empty`]
//! and the [`OrEmptyReport`] adapter turn failures into an empty table.

mod missing;
mod modes;

pub use missing::{MissingValueAnalyzer, OrEmptyReport};
pub use modes::{AnalysisMode, MissingAnalysis};
