//! Preset analysis modes combining a report table with its text digest.

use super::MissingValueAnalyzer;
use crate::config::{ColumnFilter, MissingReportConfig};
use crate::error::{EdaError, Result};
use crate::reporting::{DEFAULT_TOP_N, RULE_WIDTH, quick_report, summarize};
use crate::types::ReportTable;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::info;

/// How much analysis [`MissingValueAnalyzer::analyze`] performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    /// Short text report of the worst columns, no table
    Quick,
    /// Report table with the caller's options plus a summary
    #[default]
    Detailed,
    /// Every column and every field, plus a summary
    Comprehensive,
}

impl AnalysisMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Quick => "quick",
            Self::Detailed => "detailed",
            Self::Comprehensive => "comprehensive",
        }
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalysisMode {
    type Err = EdaError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quick" => Ok(Self::Quick),
            "detailed" => Ok(Self::Detailed),
            "comprehensive" => Ok(Self::Comprehensive),
            _ => Err(EdaError::unknown_key("analysis mode", s)),
        }
    }
}

/// Outcome of [`MissingValueAnalyzer::analyze`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingAnalysis {
    pub mode: AnalysisMode,
    /// `None` in quick mode.
    pub table: Option<ReportTable>,
    /// Human-readable digest.
    pub text: String,
}

impl MissingValueAnalyzer {
    /// Run one of the preset analyses.
    ///
    /// `Comprehensive` overrides the column filter and both presentation
    /// toggles; `Quick` ignores `config` entirely.
    pub fn analyze(
        df: &DataFrame,
        mode: AnalysisMode,
        mut config: MissingReportConfig,
    ) -> Result<MissingAnalysis> {
        info!("Running {} missing-value analysis on {:?}", mode, df.shape());

        // the digest is returned as text rather than printed
        config.show_summary = false;

        match mode {
            AnalysisMode::Quick => Ok(MissingAnalysis {
                mode,
                table: None,
                text: quick_report(df, DEFAULT_TOP_N),
            }),
            AnalysisMode::Detailed => {
                let table = Self::compute(df, &config)?;
                let text = summarize(&table, df);
                Ok(MissingAnalysis {
                    mode,
                    table: Some(table),
                    text,
                })
            }
            AnalysisMode::Comprehensive => {
                config.column_filter = ColumnFilter::All;
                config.show_total_column = true;
                config.show_dtype_column = true;

                let table = Self::compute(df, &config)?;
                let rule = "=".repeat(RULE_WIDTH);
                let text = format!(
                    "{}\n\n{}\nCOMPREHENSIVE MISSING VALUES ANALYSIS\n{}",
                    summarize(&table, df),
                    rule,
                    rule
                );
                Ok(MissingAnalysis {
                    mode,
                    table: Some(table),
                    text,
                })
            }
        }
    }
}
