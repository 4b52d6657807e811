//! Report orchestration.
//!
//! The [`DataFrameValidator`] runs the validation engine, turns its failure
//! cases into [`FailureRecord`]s and assigns the quality report columns onto
//! the input table.

use crate::{DefaultFailureCaseParser, FailureCaseParser, Result};
use quality_core::{
    DataValue, FailureCase, FailureRecord, IntoSchema, QualityColumnsOptions, Reference,
    ReportOptions, Table,
};
use quality_engine::{EngineError, SchemaValidator};
use tracing::{debug, warn};

/// A failure case renamed into report terms, before column backfill.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedFailure {
    /// Rows affected by the failure
    pub reference: Reference,
    /// Offending column, if the engine reported one
    pub column: Option<String>,
    /// Description of the violated check
    pub check: String,
    /// Text of the offending value
    pub issue: String,
}

impl NormalizedFailure {
    /// Converts into a failure record, taking the column from the issue text
    /// when it is missing.
    pub fn into_record(self) -> FailureRecord {
        let column = self.column.unwrap_or_else(|| self.issue.clone());
        FailureRecord {
            reference: self.reference,
            column,
            check: self.check,
            issue: self.issue,
        }
    }
}

/// Validates tables and annotates every row with its quality issues.
///
/// # Example
///
/// ```rust
/// use quality_core::{Check, ColumnSchema, DataFrameSchema, DataValue, Table};
/// use quality_report::DataFrameValidator;
///
/// let schema = DataFrameSchema::new()
///     .column(ColumnSchema::new("column1").check(Check::Le(10.into())));
/// let table = Table::new()
///     .with_column("column1", vec![DataValue::Int(9), DataValue::Int(11)])
///     .unwrap();
///
/// let report = DataFrameValidator::new().validate(&schema, table).unwrap();
/// let status = report.column("quality_status").unwrap();
/// assert_eq!(status.values, vec![DataValue::from("Valid"), DataValue::from("Invalid")]);
/// ```
pub struct DataFrameValidator {
    quality_report: bool,
    lazy: bool,
    columns: QualityColumnsOptions,
    parser: Box<dyn FailureCaseParser>,
    engine: SchemaValidator,
}

impl DataFrameValidator {
    /// Creates a validator with the quality report on and lazy validation.
    pub fn new() -> Self {
        Self {
            quality_report: true,
            lazy: true,
            columns: QualityColumnsOptions::default(),
            parser: Box::new(DefaultFailureCaseParser::new()),
            engine: SchemaValidator::new(),
        }
    }

    /// Creates a validator from report options.
    pub fn from_options(options: &ReportOptions) -> Self {
        Self::new()
            .with_quality_report(options.quality_report)
            .with_lazy(options.lazy)
            .with_columns(options.columns.clone())
            .with_parser(DefaultFailureCaseParser::with_status(options.status.clone()))
    }

    /// Turns the quality report on or off.
    ///
    /// When off, violations are returned as errors.
    pub fn with_quality_report(mut self, quality_report: bool) -> Self {
        self.quality_report = quality_report;
        self
    }

    /// Selects lazy (all violations) or strict (first violation) validation.
    pub fn with_lazy(mut self, lazy: bool) -> Self {
        self.lazy = lazy;
        self
    }

    /// Sets the names of the report columns.
    pub fn with_columns(mut self, columns: QualityColumnsOptions) -> Self {
        self.columns = columns;
        self
    }

    /// Replaces the failure case parser.
    pub fn with_parser(mut self, parser: impl FailureCaseParser + 'static) -> Self {
        self.parser = Box::new(parser);
        self
    }

    /// Names of the report columns.
    pub fn columns(&self) -> &QualityColumnsOptions {
        &self.columns
    }

    /// Whether the quality report is assigned.
    pub fn quality_report(&self) -> bool {
        self.quality_report
    }

    /// Whether validation is lazy.
    pub fn lazy(&self) -> bool {
        self.lazy
    }

    /// Validates `table` against `schema`.
    ///
    /// With the quality report on, violations never surface as errors: the
    /// table comes back with an issues column and a status column. With the
    /// report off, violations are returned unchanged and a valid table is
    /// returned as validated. Other engine errors always propagate.
    pub fn validate<S: IntoSchema>(&self, schema: S, table: Table) -> Result<Table> {
        let schema = SchemaValidator::resolve(schema)?;

        let (table, violation) = match self.engine.validate(&schema, &table, self.lazy) {
            Ok(validated) => (validated, None),
            Err(
                error @ (EngineError::StrictViolation(_) | EngineError::BatchedViolations(_)),
            ) => (table, Some(error)),
            Err(error) => return Err(error.into()),
        };

        if !self.quality_report {
            return match violation {
                Some(error) => Err(error.into()),
                None => Ok(table),
            };
        }

        if !self.lazy {
            warn!(
                "The table may have significantly more errors, but based on the lazy setting, only the first error will be marked"
            );
        }

        self.assign_quality_report(table, violation.as_ref())
    }

    /// Assigns the report columns for the failures carried by `violation`.
    pub fn assign_quality_report(
        &self,
        table: Table,
        violation: Option<&EngineError>,
    ) -> Result<Table> {
        let number_of_rows = table.num_rows();

        let records = match violation {
            Some(error) => transform_failure_cases(normalize_failure_cases(error), number_of_rows),
            None => Vec::new(),
        };

        debug!(
            rows = number_of_rows,
            records = records.len(),
            "Assigning quality report"
        );

        let (issues, status) = self.parser.parse_failure_cases(&records, number_of_rows)?;

        Ok(table
            .assign(&self.columns.issues, into_values(issues))?
            .assign(&self.columns.status, into_values(status))?)
    }
}

impl Default for DataFrameValidator {
    fn default() -> Self {
        Self::new()
    }
}

fn into_values(strings: Vec<String>) -> Vec<DataValue> {
    strings.into_iter().map(DataValue::String).collect()
}

/// Renames engine failure cases into report terms.
///
/// A strict violation does not label its cases, so each case takes its
/// column from its own value and its check from the violation.
pub fn normalize_failure_cases(error: &EngineError) -> Vec<NormalizedFailure> {
    match error {
        EngineError::StrictViolation(error) => error
            .failure_cases
            .iter()
            .map(|case| {
                let issue = case.failure_case.to_string();
                NormalizedFailure {
                    reference: case.index.into(),
                    column: Some(issue.clone()),
                    check: error.check.clone(),
                    issue,
                }
            })
            .collect(),
        EngineError::BatchedViolations(errors) => {
            errors.failure_cases.iter().map(normalize_case).collect()
        }
        EngineError::UnrecognizedSchemaInput(_) => Vec::new(),
    }
}

fn normalize_case(case: &FailureCase) -> NormalizedFailure {
    NormalizedFailure {
        reference: case.index.into(),
        column: case.column.clone(),
        check: case.check.clone(),
        issue: case.failure_case.to_string(),
    }
}

/// Backfills missing columns and broadcasts column-scoped failures.
///
/// Broadcast records come first, followed by row-scoped records in their
/// original order.
pub fn transform_failure_cases(failures: Vec<NormalizedFailure>, rows: usize) -> Vec<FailureRecord> {
    let (column_scoped, row_scoped): (Vec<_>, Vec<_>) = failures
        .into_iter()
        .map(NormalizedFailure::into_record)
        .partition(|record| record.reference == Reference::Column);

    let mut records = broadcast_column_failures(&column_scoped, rows);
    records.extend(row_scoped);
    records
}

/// Copies every column-scoped record once per row, record by record.
pub fn broadcast_column_failures(failures: &[FailureRecord], rows: usize) -> Vec<FailureRecord> {
    failures
        .iter()
        .flat_map(|record| (0..rows).map(move |row| record.at_row(row)))
        .collect()
}
