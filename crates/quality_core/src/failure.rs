//! Failure records.
//!
//! Two shapes live here. [`FailureCase`] is what the validation engine
//! reports. [`FailureRecord`] is the normalized shape the report layer
//! turns into per-row annotations.

use crate::DataValue;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where in the schema a failure was detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchemaContext {
    /// Table-level failure, such as a missing column
    DataFrameSchema,
    /// Failure of a column's dtype, nullability or checks
    Column,
}

impl fmt::Display for SchemaContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaContext::DataFrameSchema => write!(f, "DataFrameSchema"),
            SchemaContext::Column => write!(f, "Column"),
        }
    }
}

/// One failure case as reported by the validation engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureCase {
    /// Schema level of the failure
    pub schema_context: SchemaContext,
    /// Offending column, absent for table-level failures
    pub column: Option<String>,
    /// Name of the failed check
    pub check: String,
    /// Position of the check within its column
    pub check_number: Option<usize>,
    /// The offending value
    pub failure_case: DataValue,
    /// Offending row, absent for column-level failures
    pub index: Option<usize>,
}

/// The rows a failure record applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reference {
    /// A single row
    Row(usize),
    /// The whole column, so every row
    Column,
}

impl From<Option<usize>> for Reference {
    fn from(index: Option<usize>) -> Self {
        index.map_or(Reference::Column, Reference::Row)
    }
}

/// A normalized failure record.
#[derive(Debug, Clone, PartialEq)]
pub struct FailureRecord {
    /// Rows affected by the failure
    pub reference: Reference,
    /// Offending column name
    pub column: String,
    /// Description of the violated check
    pub check: String,
    /// Text of the offending value
    pub issue: String,
}

impl FailureRecord {
    /// Creates a record for a single row.
    pub fn row(
        row: usize,
        column: impl Into<String>,
        check: impl Into<String>,
        issue: impl Into<String>,
    ) -> Self {
        Self {
            reference: Reference::Row(row),
            column: column.into(),
            check: check.into(),
            issue: issue.into(),
        }
    }

    /// Creates a record for a whole column.
    pub fn column(
        column: impl Into<String>,
        check: impl Into<String>,
        issue: impl Into<String>,
    ) -> Self {
        Self {
            reference: Reference::Column,
            column: column.into(),
            check: check.into(),
            issue: issue.into(),
        }
    }

    /// Returns a copy of this record pinned to `row`.
    pub fn at_row(&self, row: usize) -> Self {
        Self {
            reference: Reference::Row(row),
            ..self.clone()
        }
    }
}
