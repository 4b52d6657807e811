//! Failure case parsing.
//!
//! A [`FailureCaseParser`] turns normalized failure records into the two
//! report columns: one issues string and one status label per row.

use crate::{ReportError, Result};
use quality_core::{FailureRecord, QualityStatusOptions, Reference};
use std::collections::HashMap;

/// Separator between failure descriptions of the same row.
pub const ISSUE_SEPARATOR: &str = " | ";

/// Strategy for turning failure records into report columns.
///
/// Implementations are injected into the report validator; the
/// [`DefaultFailureCaseParser`] is used otherwise.
pub trait FailureCaseParser: Send + Sync {
    /// Builds the issues and status columns for `number_of_rows` rows.
    fn parse_failure_cases(
        &self,
        failures: &[FailureRecord],
        number_of_rows: usize,
    ) -> Result<(Vec<String>, Vec<String>)> {
        let issues = self.create_quality_issues_series(failures, number_of_rows)?;
        let status = self.create_quality_status_series(&issues);
        Ok((issues, status))
    }

    /// Builds one issues string per row.
    fn create_quality_issues_series(
        &self,
        failures: &[FailureRecord],
        number_of_rows: usize,
    ) -> Result<Vec<String>>;

    /// Derives one status label per issues string.
    fn create_quality_status_series(&self, issues: &[String]) -> Vec<String>;

    /// Formats a single failure description.
    fn create_failure_case(&self, column: &str, check: &str) -> String;
}

/// Default failure case parser.
///
/// Groups failures by row in record order, joins each group with
/// [`ISSUE_SEPARATOR`] and fills rows without failures with the `none`
/// sentinel.
///
/// # Example
///
/// ```rust
/// use quality_core::FailureRecord;
/// use quality_report::{DefaultFailureCaseParser, FailureCaseParser};
///
/// let parser = DefaultFailureCaseParser::new();
/// let failures = vec![FailureRecord::row(1, "column1", "less_than_or_equal_to(10)", "11")];
///
/// let (issues, status) = parser.parse_failure_cases(&failures, 2).unwrap();
/// assert_eq!(issues, vec!["None", "Column <column1>: less_than_or_equal_to(10)"]);
/// assert_eq!(status, vec!["Valid", "Invalid"]);
/// ```
#[derive(Debug, Clone)]
pub struct DefaultFailureCaseParser {
    valid: String,
    invalid: String,
    none: String,
}

impl DefaultFailureCaseParser {
    /// Creates a parser with the default status labels.
    pub fn new() -> Self {
        Self::with_status(QualityStatusOptions::default())
    }

    /// Creates a parser with custom status labels.
    pub fn with_status(status: QualityStatusOptions) -> Self {
        Self {
            valid: status.valid,
            invalid: status.invalid,
            none: status.none,
        }
    }

    /// Joins the failure descriptions of one row.
    pub fn create_quality_issues(&self, failures: &[&FailureRecord]) -> String {
        failures
            .iter()
            .map(|f| self.create_failure_case(&f.column, &f.check))
            .collect::<Vec<_>>()
            .join(ISSUE_SEPARATOR)
    }

    /// Returns `number_of_rows` copies of the `none` sentinel.
    pub fn fill_series_with_none(&self, number_of_rows: usize) -> Vec<String> {
        vec![self.none.clone(); number_of_rows]
    }
}

impl Default for DefaultFailureCaseParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FailureCaseParser for DefaultFailureCaseParser {
    fn create_quality_issues_series(
        &self,
        failures: &[FailureRecord],
        number_of_rows: usize,
    ) -> Result<Vec<String>> {
        if failures.is_empty() {
            return Ok(self.fill_series_with_none(number_of_rows));
        }

        let mut by_row: HashMap<usize, Vec<&FailureRecord>> = HashMap::new();
        for failure in failures {
            match failure.reference {
                Reference::Row(row) if row < number_of_rows => {
                    by_row.entry(row).or_default().push(failure);
                }
                Reference::Row(row) => {
                    return Err(ReportError::ReferenceOutOfRange {
                        row,
                        rows: number_of_rows,
                    });
                }
                Reference::Column => {
                    for row in 0..number_of_rows {
                        by_row.entry(row).or_default().push(failure);
                    }
                }
            }
        }

        Ok((0..number_of_rows)
            .map(|row| match by_row.get(&row) {
                Some(group) => self.create_quality_issues(group),
                None => self.none.clone(),
            })
            .collect())
    }

    fn create_quality_status_series(&self, issues: &[String]) -> Vec<String> {
        issues
            .iter()
            .map(|issue| {
                if *issue == self.none {
                    self.valid.clone()
                } else {
                    self.invalid.clone()
                }
            })
            .collect()
    }

    fn create_failure_case(&self, column: &str, check: &str) -> String {
        format!("Column <{}>: {}", column, check)
    }
}
