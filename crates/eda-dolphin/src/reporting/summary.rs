use crate::analyzer::MissingValueAnalyzer;
use crate::config::{ColumnFilter, MissingReportConfig, SortDirection, SortKey};
use crate::error::{EdaError, Result};
use crate::types::ReportTable;
use crate::utils::{format_count, percentage};
use polars::prelude::*;
use tracing::error;

/// Width of the `=` rules framing the summary.
pub const RULE_WIDTH: usize = 60;

/// Default number of columns listed by [`quick_report`].
pub const DEFAULT_TOP_N: usize = 10;

/// Number of columns listed in the summary's "highest missing" section.
pub const SUMMARY_TOP_N: usize = 5;

/// Printed by [`quick_report`] when nothing is missing.
pub const NO_MISSING_MESSAGE: &str = "No missing values found in the dataset!";

// ============================================================================
// Summary
// ============================================================================

/// Build the summary digest, failing if `report` does not describe `df`.
///
/// Totals come from the report rows, so a filtered report summarizes only
/// the columns it contains.
pub fn try_summarize(report: &ReportTable, df: &DataFrame) -> Result<String> {
    let rows = df.height();
    let columns = df.width();

    for row in report {
        if df.get_column_index(&row.column).is_none() {
            return Err(EdaError::ColumnNotFound(row.column.clone()));
        }
        if row.total_count != rows {
            return Err(EdaError::InvalidInput(format!(
                "report row '{}' counts {} values but the dataset has {} rows",
                row.column, row.total_count, rows
            )));
        }
    }

    let total_cells = rows * columns;
    let total_missing = report.total_missing();
    let rule = "=".repeat(RULE_WIDTH);

    let mut lines = vec![
        rule.clone(),
        "MISSING VALUES SUMMARY".to_string(),
        rule.clone(),
        format!("Total dataset rows: {}", format_count(rows)),
        format!("Total dataset columns: {}", format_count(columns)),
        format!("Total cells: {}", format_count(total_cells)),
        format!("Total missing values: {}", format_count(total_missing)),
        format!(
            "Overall missing percentage: {:.2}%",
            percentage(total_missing, total_cells)
        ),
        format!(
            "Columns with missing values: {} out of {}",
            format_count(report.columns_with_missing()),
            format_count(columns)
        ),
    ];

    let top: Vec<_> = report
        .top_by_percentage(SUMMARY_TOP_N)
        .into_iter()
        .filter(|row| row.missing_count > 0)
        .collect();
    if !top.is_empty() {
        lines.push(String::new());
        lines.push("Columns with highest missing percentages:".to_string());
        for row in top {
            lines.push(format!("  - {}: {:.2}%", row.column, row.missing_percentage));
        }
    }

    lines.push(rule);
    Ok(lines.join("\n"))
}

/// Build the summary digest. Failures are logged and replaced by a
/// single diagnostic line.
pub fn summarize(report: &ReportTable, df: &DataFrame) -> String {
    try_summarize(report, df).unwrap_or_else(|e| {
        error!("Failed to build missing values summary: {}", e);
        format!("Error: could not summarize missing values: {}", e)
    })
}

/// Print [`summarize`] to stdout.
pub fn print_missing_summary(report: &ReportTable, df: &DataFrame) {
    println!("{}", summarize(report, df));
}

// ============================================================================
// Quick Report
// ============================================================================

/// Build the quick report, propagating failures.
pub fn try_quick_report(df: &DataFrame, top_n: usize) -> Result<String> {
    let config = MissingReportConfig {
        column_filter: ColumnFilter::OnlyMissing,
        sort_key: SortKey::Percentage,
        sort_direction: SortDirection::Descending,
        show_total_column: false,
        show_dtype_column: true,
        ..Default::default()
    };
    let table = MissingValueAnalyzer::compute(df, &config)?;

    let Some(worst) = table.rows().first() else {
        return Ok(NO_MISSING_MESSAGE.to_string());
    };

    let mut lines = vec![
        format!("Missing Values Report (Top {} columns):", top_n),
        "-".repeat(50),
    ];
    for row in table.iter().take(top_n) {
        lines.push(format!(
            "{} ({}): {} missing ({:.2}%)",
            row.column, row.data_type, row.missing_count, row.missing_percentage
        ));
    }
    lines.push(String::new());
    lines.push(format!(
        "Total missing values: {}",
        format_count(table.total_missing())
    ));
    lines.push(format!(
        "Worst column: {} ({:.2}% missing)",
        worst.column, worst.missing_percentage
    ));

    Ok(lines.join("\n"))
}

/// Short report of the `top_n` columns with the most missing values.
/// Failures are logged and replaced by a single diagnostic line.
pub fn quick_report(df: &DataFrame, top_n: usize) -> String {
    try_quick_report(df, top_n).unwrap_or_else(|e| {
        error!("Failed to build quick missing values report: {}", e);
        format!("An error occurred while generating the quick report: {}", e)
    })
}

/// Print [`quick_report`] to stdout.
pub fn print_quick_report(df: &DataFrame, top_n: usize) {
    println!("{}", quick_report(df, top_n));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DeclaredType, MissingValueRow, ReportField};
    use pretty_assertions::assert_eq;

    fn sample_df() -> DataFrame {
        df![
            "A" => [Some(1i64), Some(2), None, Some(4), Some(5)],
            "B" => [1i64, 2, 3, 4, 5],
            "C" => [None, None, Some(3.0), Some(4.0), None],
            "D" => [Some("x"), Some("y"), None, Some("z"), Some("w")],
        ]
        .unwrap()
    }

    #[test]
    fn test_summary_text() {
        let df = sample_df();
        let table = MissingValueAnalyzer::compute(&df, &Default::default()).unwrap();
        let rule = "=".repeat(RULE_WIDTH);

        let expected = [
            rule.as_str(),
            "MISSING VALUES SUMMARY",
            rule.as_str(),
            "Total dataset rows: 5",
            "Total dataset columns: 4",
            "Total cells: 20",
            "Total missing values: 5",
            "Overall missing percentage: 25.00%",
            "Columns with missing values: 3 out of 4",
            "",
            "Columns with highest missing percentages:",
            "  - C: 60.00%",
            "  - A: 20.00%",
            "  - D: 20.00%",
            rule.as_str(),
        ]
        .join("\n");

        assert_eq!(summarize(&table, &df), expected);
    }

    #[test]
    fn test_summary_of_empty_dataset() {
        let df = DataFrame::empty();
        let text = summarize(&ReportTable::empty(), &df);

        assert!(text.contains("Total cells: 0"));
        assert!(text.contains("Overall missing percentage: 0.00%"));
        assert!(!text.contains("highest missing"));
    }

    #[test]
    fn test_summary_rejects_foreign_report() {
        let report = ReportTable::new(
            vec![MissingValueRow {
                column: "Z".to_string(),
                data_type: DeclaredType::Other,
                total_count: 5,
                non_missing_count: 5,
                missing_count: 0,
                missing_percentage: 0.0,
            }],
            ReportField::projection(true, true),
        );

        assert!(matches!(
            try_summarize(&report, &sample_df()),
            Err(EdaError::ColumnNotFound(_))
        ));
        let text = summarize(&report, &sample_df());
        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with("Error:"));
    }

    #[test]
    fn test_summary_rejects_mismatched_height() {
        let df = sample_df();
        let table = MissingValueAnalyzer::compute(&df, &Default::default()).unwrap();
        let shorter = df.head(Some(3));

        assert!(matches!(
            try_summarize(&table, &shorter),
            Err(EdaError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_quick_report_text() {
        let expected = [
            "Missing Values Report (Top 2 columns):",
            "-".repeat(50).as_str(),
            "C (float): 3 missing (60.00%)",
            "A (integer): 1 missing (20.00%)",
            "",
            "Total missing values: 5",
            "Worst column: C (60.00% missing)",
        ]
        .join("\n");

        assert_eq!(quick_report(&sample_df(), 2), expected);
    }

    #[test]
    fn test_quick_report_without_missing_values() {
        let df = df![
            "a" => [1, 2, 3],
            "b" => ["x", "y", "z"],
        ]
        .unwrap();

        assert_eq!(quick_report(&df, DEFAULT_TOP_N), NO_MISSING_MESSAGE);
    }
}
