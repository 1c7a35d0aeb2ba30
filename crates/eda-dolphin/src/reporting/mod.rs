//! Text reports over missing-value tables.
//!
//! Every function here is fail-open: errors are logged and replaced by a
//! one-line diagnostic instead of being returned. Use [`try_summarize`] and
//! [`try_quick_report`] to get the error instead.
//!
//! # Example
//!
//! ```rust,ignore
//! use eda_dolphin::{MissingValueAnalyzer, reporting};
//!
//! let table = MissingValueAnalyzer::compute(&df, &Default::default())?;
//! println!("{}", reporting::summarize(&table, &df));
//! reporting::print_quick_report(&df, 10);
//! ```

mod summary;

pub use summary::{
    DEFAULT_TOP_N, NO_MISSING_MESSAGE, RULE_WIDTH, SUMMARY_TOP_N, print_missing_summary,
    print_quick_report, quick_report, summarize, try_quick_report, try_summarize,
};
