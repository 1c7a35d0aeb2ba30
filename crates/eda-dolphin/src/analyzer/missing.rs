//! Per-column missing-value statistics.

use crate::config::{ColumnFilter, MissingReportConfig, SortDirection, SortKey};
use crate::error::{Result, ResultExt};
use crate::reporting::print_missing_summary;
use crate::types::{DeclaredType, MissingValueRow, ReportField, ReportTable};
use crate::utils::{missing_count, missing_percentage};
use polars::prelude::*;
use std::cmp::Ordering;
use tracing::{debug, error};

/// Computes missing-value report tables from a dataset.
pub struct MissingValueAnalyzer;

impl MissingValueAnalyzer {
    /// Compute the missing-value report for `df`.
    ///
    /// Rows are filtered in this order: column filter, included types,
    /// excluded types, threshold. They are then stably sorted, so columns
    /// that tie on the sort key keep their dataset order.
    ///
    /// Nulls count as missing, and so does NaN in float columns. A zero-row
    /// dataset reports 0% missing for every column.
    pub fn compute(df: &DataFrame, config: &MissingReportConfig) -> Result<ReportTable> {
        config.validate()?;

        let rows = Self::column_statistics(df)?;
        debug!(
            "Computed missing-value statistics for {} columns over {} rows",
            rows.len(),
            df.height()
        );

        let mut rows = Self::apply_filters(rows, config);
        Self::sort_rows(&mut rows, config.sort_key, config.sort_direction);

        let table = ReportTable::new(
            rows,
            ReportField::projection(config.show_dtype_column, config.show_total_column),
        );

        if config.show_summary {
            print_missing_summary(&table, df);
        }

        Ok(table)
    }

    /// Like [`Self::compute`], but logs any failure and returns an empty table.
    pub fn compute_or_empty(df: &DataFrame, config: &MissingReportConfig) -> ReportTable {
        Self::compute(df, config).or_empty_report()
    }

    /// One unfiltered row per dataset column, in dataset order.
    pub fn column_statistics(df: &DataFrame) -> Result<Vec<MissingValueRow>> {
        let total = df.height();
        df.get_columns()
            .iter()
            .map(|col| -> Result<MissingValueRow> {
                let missing = missing_count(col)
                    .context(format!("Failed to count missing values in '{}'", col.name()))?;
                Ok(MissingValueRow {
                    column: col.name().to_string(),
                    data_type: DeclaredType::from(col.dtype()),
                    total_count: total,
                    non_missing_count: total - missing,
                    missing_count: missing,
                    missing_percentage: missing_percentage(missing, total),
                })
            })
            .collect()
    }

    fn apply_filters(
        rows: Vec<MissingValueRow>,
        config: &MissingReportConfig,
    ) -> Vec<MissingValueRow> {
        rows.into_iter()
            .filter(|row| match config.column_filter {
                ColumnFilter::All => true,
                ColumnFilter::OnlyMissing => row.missing_count > 0,
            })
            .filter(|row| {
                config.include_dtypes.is_empty() || config.include_dtypes.contains(&row.data_type)
            })
            .filter(|row| !config.exclude_dtypes.contains(&row.data_type))
            .filter(|row| {
                config
                    .threshold
                    .is_none_or(|threshold| row.missing_percentage >= threshold)
            })
            .collect()
    }

    fn sort_rows(rows: &mut [MissingValueRow], key: SortKey, direction: SortDirection) {
        rows.sort_by(|a, b| {
            let ordering = Self::compare(a, b, key);
            match direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
    }

    fn compare(a: &MissingValueRow, b: &MissingValueRow, key: SortKey) -> Ordering {
        match key {
            SortKey::Column => a.column.cmp(&b.column),
            SortKey::Count => a.missing_count.cmp(&b.missing_count),
            SortKey::Percentage => a.missing_percentage.total_cmp(&b.missing_percentage),
            SortKey::Dtype => a.data_type.as_str().cmp(b.data_type.as_str()),
        }
    }
}

/// Fail-open adapter: turns a failed report into an empty one.
pub trait OrEmptyReport {
    fn or_empty_report(self) -> ReportTable;
}

impl OrEmptyReport for Result<ReportTable> {
    fn or_empty_report(self) -> ReportTable {
        self.unwrap_or_else(|e| {
            error!("Missing-value report failed, returning an empty table: {}", e);
            ReportTable::empty()
        })
    }
}
