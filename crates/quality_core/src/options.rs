//! Report configuration.
//!
//! Options are plain serde records. Every field has a default, so a config
//! file only needs to name what it overrides.

use serde::{Deserialize, Serialize};

/// Default name of the quality issues column.
pub const DEFAULT_QUALITY_ISSUES_COLUMN: &str = "quality_issues";

/// Default name of the quality status column.
pub const DEFAULT_QUALITY_STATUS_COLUMN: &str = "quality_status";

/// Names of the two columns appended by a quality report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityColumnsOptions {
    /// Name of the column holding the quality issues text
    pub issues: String,
    /// Name of the column holding the quality status label
    pub status: String,
}

impl QualityColumnsOptions {
    /// Creates column options with custom names.
    pub fn new(issues: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            issues: issues.into(),
            status: status.into(),
        }
    }
}

impl Default for QualityColumnsOptions {
    fn default() -> Self {
        Self::new(DEFAULT_QUALITY_ISSUES_COLUMN, DEFAULT_QUALITY_STATUS_COLUMN)
    }
}

/// Labels used in the quality status column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityStatusOptions {
    /// Label for rows without issues
    pub valid: String,
    /// Label for rows with at least one issue
    pub invalid: String,
    /// Sentinel issues text for rows without issues
    pub none: String,
}

impl QualityStatusOptions {
    /// Creates status options with custom labels.
    pub fn new(
        valid: impl Into<String>,
        invalid: impl Into<String>,
        none: impl Into<String>,
    ) -> Self {
        Self {
            valid: valid.into(),
            invalid: invalid.into(),
            none: none.into(),
        }
    }
}

impl Default for QualityStatusOptions {
    fn default() -> Self {
        Self::new("Valid", "Invalid", "None")
    }
}

/// Full report configuration, as read from a config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportOptions {
    /// Annotate the table instead of returning violations as errors
    pub quality_report: bool,
    /// Collect every violation instead of stopping at the first one
    pub lazy: bool,
    /// Output column names
    pub columns: QualityColumnsOptions,
    /// Status labels
    pub status: QualityStatusOptions,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            quality_report: true,
            lazy: true,
            columns: QualityColumnsOptions::default(),
            status: QualityStatusOptions::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let options = ReportOptions::default();
        assert!(options.quality_report);
        assert!(options.lazy);
        assert_eq!(options.columns.issues, "quality_issues");
        assert_eq!(options.columns.status, "quality_status");
        assert_eq!(options.status.valid, "Valid");
        assert_eq!(options.status.invalid, "Invalid");
        assert_eq!(options.status.none, "None");
    }

    #[test]
    fn test_partial_deserialization() {
        let options: ReportOptions =
            serde_json::from_str(r#"{"lazy": false, "columns": {"status": "ok?"}}"#).unwrap();

        assert!(options.quality_report);
        assert!(!options.lazy);
        assert_eq!(options.columns.issues, "quality_issues");
        assert_eq!(options.columns.status, "ok?");
        assert_eq!(options.status, QualityStatusOptions::default());
    }
}
