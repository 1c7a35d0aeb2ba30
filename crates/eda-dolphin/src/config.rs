//! Configuration types for missing-value reports.
//!
//! Every recognized option lives on [`MissingReportConfig`] with its default.
//! Use [`MissingReportConfig::builder()`] for a validated configuration.

use crate::error::EdaError;
use crate::types::DeclaredType;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Which dataset columns produce a report row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ColumnFilter {
    /// One row per dataset column
    All,
    /// Only columns with at least one missing value
    #[default]
    OnlyMissing,
}

impl FromStr for ColumnFilter {
    type Err = EdaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "null" | "missing" | "only-missing" | "only_missing" => Ok(Self::OnlyMissing),
            _ => Err(EdaError::unknown_key("column filter", s)),
        }
    }
}

/// Field the report rows are ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Column name
    Column,
    /// Missing value count
    Count,
    /// Missing value percentage
    #[default]
    Percentage,
    /// Declared type name
    Dtype,
}

impl SortKey {
    /// Parse a sort key, falling back to [`SortKey::Percentage`] for
    /// anything unrecognized.
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or_else(|_| {
            warn!("Unknown sort key '{}', sorting by missing percentage", s);
            Self::Percentage
        })
    }
}

impl FromStr for SortKey {
    type Err = EdaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "column" | "name" => Ok(Self::Column),
            "count" | "missing_count" => Ok(Self::Count),
            "percentage" | "percent" | "missing_percentage" => Ok(Self::Percentage),
            "dtype" | "type" | "data_type" => Ok(Self::Dtype),
            _ => Err(EdaError::unknown_key("sort key", s)),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Column => "column",
            Self::Count => "count",
            Self::Percentage => "percentage",
            Self::Dtype => "dtype",
        };
        f.write_str(name)
    }
}

fn deserialize_sort_key<'de, D>(deserializer: D) -> Result<SortKey, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(SortKey::parse_lenient(&raw))
}

/// Direction of the report ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

/// Options for [`crate::MissingValueAnalyzer::compute`].
///
/// # Example
///
/// ```rust,ignore
/// use eda_dolphin::config::{ColumnFilter, MissingReportConfig, SortKey};
///
/// let config = MissingReportConfig::builder()
///     .column_filter(ColumnFilter::All)
///     .sort_key(SortKey::Count)
///     .threshold(25.0)
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MissingReportConfig {
    /// Which columns produce rows.
    /// Default: OnlyMissing
    pub column_filter: ColumnFilter,

    /// Field the rows are sorted by. Unknown keys fall back to percentage.
    /// Default: Percentage
    #[serde(deserialize_with = "deserialize_sort_key")]
    pub sort_key: SortKey,

    /// Default: Descending
    pub sort_direction: SortDirection,

    /// Keep only these declared types. Empty keeps everything.
    pub include_dtypes: Vec<DeclaredType>,

    /// Drop these declared types.
    pub exclude_dtypes: Vec<DeclaredType>,

    /// Minimum missing percentage (inclusive, 0-100) a row needs to be kept.
    /// Default: None
    pub threshold: Option<f64>,

    /// Show `Total_Values` and `Non_Missing_Count` in the projection.
    /// Default: true
    pub show_total_column: bool,

    /// Show `Data_Type` in the projection.
    /// Default: true
    pub show_dtype_column: bool,

    /// Print the summary digest to stdout after computing.
    /// Default: false
    pub show_summary: bool,
}

impl Default for MissingReportConfig {
    fn default() -> Self {
        Self {
            column_filter: ColumnFilter::default(),
            sort_key: SortKey::default(),
            sort_direction: SortDirection::default(),
            include_dtypes: Vec::new(),
            exclude_dtypes: Vec::new(),
            threshold: None,
            show_total_column: true,
            show_dtype_column: true,
            show_summary: false,
        }
    }
}

impl MissingReportConfig {
    /// Create a new configuration builder.
    pub fn builder() -> MissingReportConfigBuilder {
        MissingReportConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if let Some(threshold) = self.threshold
            && !(threshold.is_finite() && (0.0..=100.0).contains(&threshold))
        {
            return Err(ConfigValidationError::InvalidThreshold(threshold));
        }

        if let Some(dtype) = self
            .include_dtypes
            .iter()
            .find(|dtype| self.exclude_dtypes.contains(*dtype))
        {
            return Err(ConfigValidationError::ConflictingDtypes(*dtype));
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid threshold: {0} (must be between 0 and 100)")]
    InvalidThreshold(f64),

    #[error("Declared type '{0}' is both included and excluded")]
    ConflictingDtypes(DeclaredType),
}

/// Builder for [`MissingReportConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct MissingReportConfigBuilder {
    column_filter: Option<ColumnFilter>,
    sort_key: Option<SortKey>,
    sort_direction: Option<SortDirection>,
    include_dtypes: Vec<DeclaredType>,
    exclude_dtypes: Vec<DeclaredType>,
    threshold: Option<f64>,
    show_total_column: Option<bool>,
    show_dtype_column: Option<bool>,
    show_summary: Option<bool>,
}

impl MissingReportConfigBuilder {
    pub fn column_filter(mut self, filter: ColumnFilter) -> Self {
        self.column_filter = Some(filter);
        self
    }

    pub fn sort_key(mut self, key: SortKey) -> Self {
        self.sort_key = Some(key);
        self
    }

    /// Set the sort key from free text. Unknown keys fall back to percentage.
    pub fn sort_by(mut self, key: &str) -> Self {
        self.sort_key = Some(SortKey::parse_lenient(key));
        self
    }

    pub fn sort_direction(mut self, direction: SortDirection) -> Self {
        self.sort_direction = Some(direction);
        self
    }

    pub fn ascending(self, ascending: bool) -> Self {
        self.sort_direction(if ascending {
            SortDirection::Ascending
        } else {
            SortDirection::Descending
        })
    }

    /// Keep only columns of the given declared types.
    pub fn include_dtypes(mut self, dtypes: impl IntoIterator<Item = DeclaredType>) -> Self {
        self.include_dtypes.extend(dtypes);
        self
    }

    /// Drop columns of the given declared types.
    pub fn exclude_dtypes(mut self, dtypes: impl IntoIterator<Item = DeclaredType>) -> Self {
        self.exclude_dtypes.extend(dtypes);
        self
    }

    /// Set the minimum missing percentage (0-100, inclusive).
    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }

    pub fn show_total_column(mut self, show: bool) -> Self {
        self.show_total_column = Some(show);
        self
    }

    pub fn show_dtype_column(mut self, show: bool) -> Self {
        self.show_dtype_column = Some(show);
        self
    }

    pub fn show_summary(mut self, show: bool) -> Self {
        self.show_summary = Some(show);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `MissingReportConfig` or an error if validation fails.
    pub fn build(self) -> Result<MissingReportConfig, ConfigValidationError> {
        let config = MissingReportConfig {
            column_filter: self.column_filter.unwrap_or_default(),
            sort_key: self.sort_key.unwrap_or_default(),
            sort_direction: self.sort_direction.unwrap_or_default(),
            include_dtypes: self.include_dtypes,
            exclude_dtypes: self.exclude_dtypes,
            threshold: self.threshold,
            show_total_column: self.show_total_column.unwrap_or(true),
            show_dtype_column: self.show_dtype_column.unwrap_or(true),
            show_summary: self.show_summary.unwrap_or(false),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MissingReportConfig::default();
        assert_eq!(config.column_filter, ColumnFilter::OnlyMissing);
        assert_eq!(config.sort_key, SortKey::Percentage);
        assert_eq!(config.sort_direction, SortDirection::Descending);
        assert!(config.include_dtypes.is_empty());
        assert!(config.threshold.is_none());
        assert!(config.show_total_column);
        assert!(config.show_dtype_column);
        assert!(!config.show_summary);
    }

    #[test]
    fn test_builder_defaults_match_default() {
        let config = MissingReportConfig::builder().build().unwrap();
        assert_eq!(config, MissingReportConfig::default());
    }

    #[test]
    fn test_builder_custom_values() {
        let config = MissingReportConfig::builder()
            .column_filter(ColumnFilter::All)
            .sort_key(SortKey::Column)
            .ascending(true)
            .include_dtypes([DeclaredType::Integer, DeclaredType::Float])
            .threshold(10.0)
            .show_total_column(false)
            .build()
            .unwrap();

        assert_eq!(config.column_filter, ColumnFilter::All);
        assert_eq!(config.sort_key, SortKey::Column);
        assert_eq!(config.sort_direction, SortDirection::Ascending);
        assert_eq!(config.include_dtypes.len(), 2);
        assert_eq!(config.threshold, Some(10.0));
        assert!(!config.show_total_column);
    }

    #[test]
    fn test_sort_key_lenient_fallback() {
        assert_eq!(SortKey::parse_lenient("COUNT"), SortKey::Count);
        assert_eq!(SortKey::parse_lenient("dtype"), SortKey::Dtype);
        assert_eq!(SortKey::parse_lenient("colour"), SortKey::Percentage);
        assert!("colour".parse::<SortKey>().is_err());
    }

    #[test]
    fn test_column_filter_parsing() {
        assert_eq!("all".parse::<ColumnFilter>().unwrap(), ColumnFilter::All);
        assert_eq!(
            "null".parse::<ColumnFilter>().unwrap(),
            ColumnFilter::OnlyMissing
        );
        assert_eq!(
            "Only-Missing".parse::<ColumnFilter>().unwrap(),
            ColumnFilter::OnlyMissing
        );
        assert!(matches!(
            "some".parse::<ColumnFilter>(),
            Err(EdaError::UnknownKey { .. })
        ));
    }

    #[test]
    fn test_validation_invalid_threshold() {
        let result = MissingReportConfig::builder().threshold(150.0).build();
        assert!(matches!(
            result,
            Err(ConfigValidationError::InvalidThreshold(_))
        ));

        let result = MissingReportConfig::builder().threshold(f64::NAN).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_validation_conflicting_dtypes() {
        let result = MissingReportConfig::builder()
            .include_dtypes([DeclaredType::Text])
            .exclude_dtypes([DeclaredType::Text])
            .build();

        assert!(matches!(
            result,
            Err(ConfigValidationError::ConflictingDtypes(DeclaredType::Text))
        ));
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{
            "column_filter": "all",
            "sort_key": "no-such-key",
            "sort_direction": "ascending",
            "exclude_dtypes": ["text"],
            "threshold": 5.5
        }"#;

        let config: MissingReportConfig =
            serde_json::from_str(json).expect("Should deserialize from JSON");

        assert_eq!(config.column_filter, ColumnFilter::All);
        assert_eq!(config.sort_key, SortKey::Percentage);
        assert_eq!(config.sort_direction, SortDirection::Ascending);
        assert_eq!(config.exclude_dtypes, vec![DeclaredType::Text]);
        assert_eq!(config.threshold, Some(5.5));
        assert!(config.show_dtype_column);
    }
}
