//! Error types for validation operations.
//!
//! A failed validation is reported through one of two signals:
//! [`SchemaError`] for the first violation under strict validation, and
//! [`SchemaErrors`] for the full set of violations under lazy validation.
//! Both carry the raw [`FailureCase`]s.

use quality_core::{FailureCase, SchemaContext};
use std::fmt;
use thiserror::Error;

/// A single failed check and every failure case it produced.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaError {
    /// Schema level of the failed check
    pub schema_context: SchemaContext,
    /// Column the check belongs to, absent for table-level checks
    pub column: Option<String>,
    /// Name of the failed check
    pub check: String,
    /// Failure cases produced by the check
    pub failure_cases: Vec<FailureCase>,
}

impl SchemaError {
    fn subject(&self) -> String {
        match (&self.schema_context, &self.column) {
            (SchemaContext::Column, Some(column)) => format!("column '{}'", column),
            _ => "table".to_string(),
        }
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values: Vec<String> = self
            .failure_cases
            .iter()
            .map(|case| case.failure_case.to_string())
            .collect();
        write!(
            f,
            "{} failed check '{}' with {} failure case(s): [{}]",
            self.subject(),
            self.check,
            self.failure_cases.len(),
            values.join(", ")
        )
    }
}

impl std::error::Error for SchemaError {}

/// Every failed check of a lazy validation.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaErrors {
    /// Failed checks in evaluation order
    pub schema_errors: Vec<SchemaError>,
    /// All failure cases, in evaluation order
    pub failure_cases: Vec<FailureCase>,
}

impl SchemaErrors {
    /// Collects failed checks, flattening their failure cases.
    pub fn new(schema_errors: Vec<SchemaError>) -> Self {
        let failure_cases = schema_errors
            .iter()
            .flat_map(|e| e.failure_cases.iter().cloned())
            .collect();
        Self {
            schema_errors,
            failure_cases,
        }
    }
}

impl fmt::Display for SchemaErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} check(s) failed with {} failure case(s)",
            self.schema_errors.len(),
            self.failure_cases.len()
        )?;
        for error in &self.schema_errors {
            write!(f, "\n  - {}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for SchemaErrors {}

/// Errors returned by the validation engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// First violation found under strict validation
    #[error(transparent)]
    StrictViolation(SchemaError),

    /// All violations found under lazy validation
    #[error(transparent)]
    BatchedViolations(SchemaErrors),

    /// The schema could not be resolved into a constraint set
    #[error("Unrecognized schema input: {0}")]
    UnrecognizedSchemaInput(String),
}

impl EngineError {
    /// Returns the failure cases carried by a violation.
    pub fn failure_cases(&self) -> Option<&[FailureCase]> {
        match self {
            EngineError::StrictViolation(e) => Some(&e.failure_cases),
            EngineError::BatchedViolations(e) => Some(&e.failure_cases),
            EngineError::UnrecognizedSchemaInput(_) => None,
        }
    }
}

impl From<quality_core::CoreError> for EngineError {
    fn from(error: quality_core::CoreError) -> Self {
        EngineError::UnrecognizedSchemaInput(error.to_string())
    }
}
