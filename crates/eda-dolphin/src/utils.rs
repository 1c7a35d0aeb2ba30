//! Shared helpers for dtype classification, percentages and dataset checks.

use crate::error::{EdaError, Result, ResultExt};
use crate::types::DeclaredType;
use polars::io::csv::read::{CsvReadOptions, NullValues};
use polars::prelude::*;
use std::collections::HashSet;
use std::fs::File;
use std::path::Path;

/// Cell tokens read as missing when loading CSV files.
pub const MISSING_VALUE_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

// =============================================================================
// Data Type Utilities
// =============================================================================

/// Check if a DataType is a signed or unsigned integer.
#[inline]
pub fn is_integer_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
    )
}

/// Check if a DataType is floating point.
#[inline]
pub fn is_float_dtype(dtype: &DataType) -> bool {
    matches!(dtype, DataType::Float32 | DataType::Float64)
}

/// Check if a DataType holds text.
#[inline]
pub fn is_text_dtype(dtype: &DataType) -> bool {
    matches!(dtype, DataType::String | DataType::Categorical(_, _))
}

/// Map a Polars dtype onto the closed set of declared types.
pub fn declared_type(dtype: &DataType) -> DeclaredType {
    if is_integer_dtype(dtype) {
        DeclaredType::Integer
    } else if is_float_dtype(dtype) {
        DeclaredType::Float
    } else if is_text_dtype(dtype) {
        DeclaredType::Text
    } else if matches!(dtype, DataType::Boolean) {
        DeclaredType::Boolean
    } else {
        DeclaredType::Other
    }
}

// =============================================================================
// Percentage Utilities
// =============================================================================

/// Round to 2 decimal places.
#[inline]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `100 * part / whole`, or 0 when `whole` is 0.
pub fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        (part as f64 / whole as f64) * 100.0
    }
}

/// Missing percentage of a column, rounded to 2 decimal places.
pub fn missing_percentage(missing: usize, total: usize) -> f64 {
    round2(percentage(missing, total))
}

/// Format a count with `,` thousands separators.
pub fn format_count(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

// =============================================================================
// Dataset Utilities
// =============================================================================

/// Build a dataset from raw series.
///
/// Fails with [`EdaError::InvalidInput`] when the series have different
/// lengths or share a name.
pub fn build_dataset(series: Vec<Series>) -> Result<DataFrame> {
    if let Some(first) = series.first() {
        let height = first.len();
        if let Some(ragged) = series.iter().find(|s| s.len() != height) {
            return Err(EdaError::InvalidInput(format!(
                "column '{}' has {} values, expected {}",
                ragged.name(),
                ragged.len(),
                height
            )));
        }
    }

    let mut seen = HashSet::with_capacity(series.len());
    for s in &series {
        if !seen.insert(s.name().as_str()) {
            return Err(EdaError::InvalidInput(format!(
                "duplicate column name '{}'",
                s.name()
            )));
        }
    }

    let columns = series.into_iter().map(Column::from).collect();
    Ok(DataFrame::new(columns)?)
}

/// Number of missing cells in a column: nulls, plus NaN for float columns.
pub fn missing_count(col: &Column) -> PolarsResult<usize> {
    let nulls = col.null_count();
    if !is_float_dtype(col.dtype()) {
        return Ok(nulls);
    }

    let nans = col.as_materialized_series().is_nan()?.sum().unwrap_or(0);
    Ok(nulls + nans as usize)
}

/// Load a CSV file with a header row.
///
/// Cells matching [`MISSING_VALUE_TOKENS`] are read as nulls.
pub fn read_csv(path: &Path) -> Result<DataFrame> {
    let file = File::open(path)?;
    let null_values = NullValues::AllColumns(
        MISSING_VALUE_TOKENS
            .iter()
            .map(|token| (*token).into())
            .collect(),
    );

    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(100))
        .map_parse_options(|opts| opts.with_null_values(Some(null_values.clone())))
        .into_reader_with_file_handle(file)
        .finish()
        .context(format!("Failed to parse CSV file '{}'", path.display()))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declared_type() {
        assert_eq!(declared_type(&DataType::Int64), DeclaredType::Integer);
        assert_eq!(declared_type(&DataType::UInt32), DeclaredType::Integer);
        assert_eq!(declared_type(&DataType::Float32), DeclaredType::Float);
        assert_eq!(declared_type(&DataType::String), DeclaredType::Text);
        assert_eq!(declared_type(&DataType::Boolean), DeclaredType::Boolean);
        assert_eq!(declared_type(&DataType::Date), DeclaredType::Other);
        assert_eq!(
            declared_type(&DataType::Datetime(TimeUnit::Milliseconds, None)),
            DeclaredType::Other
        );
    }

    #[test]
    fn test_percentage_guards_zero() {
        assert_eq!(percentage(0, 0), 0.0);
        assert_eq!(percentage(3, 0), 0.0);
        assert_eq!(percentage(3, 5), 60.0);
    }

    #[test]
    fn test_missing_percentage_rounds() {
        assert_eq!(missing_percentage(1, 3), 33.33);
        assert_eq!(missing_percentage(2, 3), 66.67);
        assert_eq!(missing_percentage(1, 5), 20.0);
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(1234567), "1,234,567");
    }

    #[test]
    fn test_build_dataset() {
        let df = build_dataset(vec![
            Series::new("a".into(), &[Some(1i64), None]),
            Series::new("b".into(), &["x", "y"]),
        ])
        .unwrap();
        assert_eq!(df.shape(), (2, 2));
    }

    #[test]
    fn test_build_dataset_rejects_ragged_columns() {
        let result = build_dataset(vec![
            Series::new("a".into(), &[1i64, 2, 3]),
            Series::new("b".into(), &[1i64, 2]),
        ]);
        assert!(matches!(result, Err(EdaError::InvalidInput(_))));
    }

    #[test]
    fn test_build_dataset_rejects_duplicate_names() {
        let result = build_dataset(vec![
            Series::new("a".into(), &[1i64]),
            Series::new("a".into(), &[2i64]),
        ]);
        assert!(matches!(result, Err(EdaError::InvalidInput(_))));
    }

    #[test]
    fn test_build_dataset_empty() {
        let df = build_dataset(Vec::new()).unwrap();
        assert_eq!(df.shape(), (0, 0));
    }

    #[test]
    fn test_missing_count_includes_nan_for_floats() {
        let df = df![
            "f" => [Some(1.0), Some(f64::NAN), None, Some(2.0)],
            "i" => [Some(1i64), None, Some(3), Some(4)],
        ]
        .unwrap();

        assert_eq!(missing_count(df.column("f").unwrap()).unwrap(), 2);
        assert_eq!(missing_count(df.column("i").unwrap()).unwrap(), 1);
    }

    #[test]
    fn test_read_csv_missing_file_is_io_error() {
        let result = read_csv(Path::new("definitely/not/here.csv"));
        assert!(matches!(result, Err(EdaError::Io(_))));
    }
}
