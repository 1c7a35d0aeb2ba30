//! Core data types for missing-value reports.

use crate::error::EdaError;
use polars::prelude::*;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Declared Types
// =============================================================================

/// Nominal type of a dataset column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclaredType {
    Integer,
    Float,
    Text,
    Boolean,
    Other,
}

impl DeclaredType {
    pub const ALL: [DeclaredType; 5] = [
        DeclaredType::Integer,
        DeclaredType::Float,
        DeclaredType::Text,
        DeclaredType::Boolean,
        DeclaredType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Text => "text",
            Self::Boolean => "boolean",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeclaredType {
    type Err = EdaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "integer" | "int" | "int8" | "int16" | "int32" | "int64" | "uint8" | "uint16"
            | "uint32" | "uint64" => Ok(Self::Integer),
            "float" | "float32" | "float64" | "double" => Ok(Self::Float),
            "text" | "str" | "string" | "object" | "categorical" => Ok(Self::Text),
            "boolean" | "bool" => Ok(Self::Boolean),
            "other" => Ok(Self::Other),
            _ => Err(EdaError::unknown_key("declared type", s)),
        }
    }
}

impl From<&DataType> for DeclaredType {
    fn from(dtype: &DataType) -> Self {
        crate::utils::declared_type(dtype)
    }
}

// =============================================================================
// Report Rows
// =============================================================================

/// Missing-value statistics for one dataset column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingValueRow {
    pub column: String,
    pub data_type: DeclaredType,
    pub total_count: usize,
    pub non_missing_count: usize,
    pub missing_count: usize,
    /// 0-100, rounded to 2 decimal places
    pub missing_percentage: f64,
}

/// A field of [`MissingValueRow`] that can appear in a report projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportField {
    Column,
    DataType,
    TotalValues,
    NonMissingCount,
    MissingCount,
    MissingPercentage,
}

impl ReportField {
    /// Header used in rendered tables and report DataFrames.
    pub fn header(&self) -> &'static str {
        match self {
            Self::Column => "Column",
            Self::DataType => "Data_Type",
            Self::TotalValues => "Total_Values",
            Self::NonMissingCount => "Non_Missing_Count",
            Self::MissingCount => "Missing_Count",
            Self::MissingPercentage => "Missing_Percentage",
        }
    }

    /// Fields shown for the given presentation toggles, in output order.
    pub fn projection(show_dtype: bool, show_total: bool) -> Vec<ReportField> {
        let mut fields = vec![Self::Column];
        if show_dtype {
            fields.push(Self::DataType);
        }
        if show_total {
            fields.extend([Self::TotalValues, Self::NonMissingCount]);
        }
        fields.extend([Self::MissingCount, Self::MissingPercentage]);
        fields
    }

    fn serialize_value<M: SerializeMap>(
        &self,
        map: &mut M,
        row: &MissingValueRow,
    ) -> Result<(), M::Error> {
        let key = self.header();
        match self {
            Self::Column => map.serialize_entry(key, &row.column),
            Self::DataType => map.serialize_entry(key, &row.data_type),
            Self::TotalValues => map.serialize_entry(key, &row.total_count),
            Self::NonMissingCount => map.serialize_entry(key, &row.non_missing_count),
            Self::MissingCount => map.serialize_entry(key, &row.missing_count),
            Self::MissingPercentage => map.serialize_entry(key, &row.missing_percentage),
        }
    }
}

// =============================================================================
// Report Table
// =============================================================================

/// Ordered missing-value rows plus the fields selected for presentation.
///
/// The projection only affects rendering, serialization and
/// [`ReportTable::to_dataframe`]; every row always carries all statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportTable {
    rows: Vec<MissingValueRow>,
    fields: Vec<ReportField>,
}

impl Default for ReportTable {
    fn default() -> Self {
        Self::empty()
    }
}

impl ReportTable {
    pub fn new(rows: Vec<MissingValueRow>, fields: Vec<ReportField>) -> Self {
        Self { rows, fields }
    }

    /// A table with no rows and the full default projection.
    pub fn empty() -> Self {
        Self::new(Vec::new(), ReportField::projection(true, true))
    }

    pub fn rows(&self) -> &[MissingValueRow] {
        &self.rows
    }

    pub fn fields(&self) -> &[ReportField] {
        &self.fields
    }

    pub fn has_field(&self, field: ReportField) -> bool {
        self.fields.contains(&field)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MissingValueRow> {
        self.rows.iter()
    }

    /// Look up the row for a dataset column.
    pub fn get(&self, column: &str) -> Option<&MissingValueRow> {
        self.rows.iter().find(|row| row.column == column)
    }

    /// Sum of missing counts over the rows in this table.
    pub fn total_missing(&self) -> usize {
        self.rows.iter().map(|row| row.missing_count).sum()
    }

    /// Rows with at least one missing value.
    pub fn columns_with_missing(&self) -> usize {
        self.rows.iter().filter(|row| row.missing_count > 0).count()
    }

    /// The `n` rows with the highest missing percentage. Ties keep table order.
    pub fn top_by_percentage(&self, n: usize) -> Vec<&MissingValueRow> {
        let mut rows: Vec<&MissingValueRow> = self.rows.iter().collect();
        rows.sort_by(|a, b| b.missing_percentage.total_cmp(&a.missing_percentage));
        rows.truncate(n);
        rows
    }

    pub fn into_rows(self) -> Vec<MissingValueRow> {
        self.rows
    }

    /// Convert the projected table into a Polars DataFrame.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let columns = self
            .fields
            .iter()
            .map(|field| Column::from(self.field_series(*field)))
            .collect();
        DataFrame::new(columns)
    }

    fn field_series(&self, field: ReportField) -> Series {
        let name: PlSmallStr = field.header().into();
        match field {
            ReportField::Column => {
                let values: Vec<&str> = self.rows.iter().map(|r| r.column.as_str()).collect();
                Series::new(name, values)
            }
            ReportField::DataType => {
                let values: Vec<&str> = self.rows.iter().map(|r| r.data_type.as_str()).collect();
                Series::new(name, values)
            }
            ReportField::TotalValues => {
                let values: Vec<u64> = self.rows.iter().map(|r| r.total_count as u64).collect();
                Series::new(name, values)
            }
            ReportField::NonMissingCount => {
                let values: Vec<u64> = self
                    .rows
                    .iter()
                    .map(|r| r.non_missing_count as u64)
                    .collect();
                Series::new(name, values)
            }
            ReportField::MissingCount => {
                let values: Vec<u64> = self.rows.iter().map(|r| r.missing_count as u64).collect();
                Series::new(name, values)
            }
            ReportField::MissingPercentage => {
                let values: Vec<f64> = self.rows.iter().map(|r| r.missing_percentage).collect();
                Series::new(name, values)
            }
        }
    }
}

impl<'a> IntoIterator for &'a ReportTable {
    type Item = &'a MissingValueRow;
    type IntoIter = std::slice::Iter<'a, MissingValueRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Serialized as a list of objects keyed by the projected field headers.
impl Serialize for ReportTable {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        struct ProjectedRow<'a> {
            row: &'a MissingValueRow,
            fields: &'a [ReportField],
        }

        impl Serialize for ProjectedRow<'_> {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                let mut map = serializer.serialize_map(Some(self.fields.len()))?;
                for field in self.fields {
                    field.serialize_value(&mut map, self.row)?;
                }
                map.end()
            }
        }

        let mut seq = serializer.serialize_seq(Some(self.rows.len()))?;
        for row in &self.rows {
            seq.serialize_element(&ProjectedRow {
                row,
                fields: &self.fields,
            })?;
        }
        seq.end()
    }
}

/// Renders the projected report DataFrame with the Polars table formatter.
impl fmt::Display for ReportTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let df = self.to_dataframe().map_err(|_| fmt::Error)?;
        write!(f, "{}", df)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(column: &str, data_type: DeclaredType, missing: usize, total: usize) -> MissingValueRow {
        MissingValueRow {
            column: column.to_string(),
            data_type,
            total_count: total,
            non_missing_count: total - missing,
            missing_count: missing,
            missing_percentage: crate::utils::missing_percentage(missing, total),
        }
    }

    fn sample_table() -> ReportTable {
        ReportTable::new(
            vec![
                row("A", DeclaredType::Integer, 1, 5),
                row("C", DeclaredType::Float, 3, 5),
                row("D", DeclaredType::Text, 1, 5),
            ],
            ReportField::projection(true, true),
        )
    }

    #[test]
    fn test_declared_type_parsing() {
        assert_eq!("INT64".parse::<DeclaredType>().unwrap(), DeclaredType::Integer);
        assert_eq!("double".parse::<DeclaredType>().unwrap(), DeclaredType::Float);
        assert_eq!("object".parse::<DeclaredType>().unwrap(), DeclaredType::Text);
        assert_eq!("bool".parse::<DeclaredType>().unwrap(), DeclaredType::Boolean);
        assert!("complex".parse::<DeclaredType>().is_err());
    }

    #[test]
    fn test_declared_type_display_round_trips() {
        for dtype in DeclaredType::ALL {
            assert_eq!(dtype.to_string().parse::<DeclaredType>().unwrap(), dtype);
        }
    }

    #[test]
    fn test_projection() {
        assert_eq!(
            ReportField::projection(false, false),
            vec![
                ReportField::Column,
                ReportField::MissingCount,
                ReportField::MissingPercentage
            ]
        );
        assert_eq!(ReportField::projection(true, true).len(), 6);
    }

    #[test]
    fn test_top_by_percentage_is_stable() {
        let table = sample_table();
        let top: Vec<&str> = table
            .top_by_percentage(5)
            .iter()
            .map(|r| r.column.as_str())
            .collect();
        assert_eq!(top, vec!["C", "A", "D"]);
        assert_eq!(table.top_by_percentage(1).len(), 1);
    }

    #[test]
    fn test_totals() {
        let table = sample_table();
        assert_eq!(table.total_missing(), 5);
        assert_eq!(table.columns_with_missing(), 3);
        assert_eq!(table.get("C").unwrap().missing_count, 3);
        assert!(table.get("B").is_none());
    }

    #[test]
    fn test_to_dataframe_uses_projection() {
        let table = ReportTable::new(
            sample_table().into_rows(),
            ReportField::projection(false, false),
        );
        let df = table.to_dataframe().unwrap();

        assert_eq!(df.shape(), (3, 3));
        let names: Vec<&str> = df.get_column_names().iter().map(|n| n.as_str()).collect();
        assert_eq!(names, vec!["Column", "Missing_Count", "Missing_Percentage"]);
    }

    #[test]
    fn test_serialize_projected_fields() {
        let table = ReportTable::new(
            vec![row("C", DeclaredType::Float, 3, 5)],
            ReportField::projection(true, false),
        );
        let json = serde_json::to_value(&table).unwrap();

        assert_eq!(
            json,
            serde_json::json!([{
                "Column": "C",
                "Data_Type": "float",
                "Missing_Count": 3,
                "Missing_Percentage": 60.0
            }])
        );
    }

    #[test]
    fn test_display_renders_report_dataframe() {
        let rendered = sample_table().to_string();

        assert!(rendered.contains("shape: (3, 6)"));
        assert!(rendered.contains("Missing_Count"));
        assert!(rendered.contains("60.0"));
    }
}
