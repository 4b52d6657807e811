//! Main validation engine.
//!
//! This module provides the [`SchemaValidator`] that runs the structure
//! checks and the column checks of a schema against a table, and reports
//! violations through the strict or lazy failure signal.

use crate::{CheckEvaluator, EngineError, SchemaError, SchemaErrors, StructureValidator};
use quality_core::{DataFrameSchema, IntoSchema, Table};
use tracing::{debug, info};

/// Validation engine for tables.
///
/// # Example
///
/// ```rust
/// use quality_core::{Check, ColumnSchema, DataFrameSchema, DataValue, Table};
/// use quality_engine::{EngineError, SchemaValidator};
///
/// let schema = DataFrameSchema::new()
///     .column(ColumnSchema::new("column1").check(Check::Le(10.into())));
/// let table = Table::new()
///     .with_column("column1", vec![DataValue::Int(9), DataValue::Int(11)])
///     .unwrap();
///
/// let validator = SchemaValidator::new();
/// match validator.validate(&schema, &table, true) {
///     Err(EngineError::BatchedViolations(errors)) => {
///         assert_eq!(errors.failure_cases.len(), 1);
///     }
///     other => panic!("unexpected outcome: {:?}", other),
/// }
/// ```
pub struct SchemaValidator {
    structure_validator: StructureValidator,
}

impl SchemaValidator {
    /// Creates a new schema validator.
    pub fn new() -> Self {
        Self {
            structure_validator: StructureValidator::new(),
        }
    }

    /// Resolves any accepted schema form into its constraint set.
    pub fn resolve<S: IntoSchema>(schema: S) -> Result<DataFrameSchema, EngineError> {
        Ok(schema.into_schema()?)
    }

    /// Validates a table against a schema.
    ///
    /// On success, returns the validated table. With `lazy`, every failing
    /// check is collected into [`EngineError::BatchedViolations`]; without
    /// it, the first failing check is returned as
    /// [`EngineError::StrictViolation`].
    pub fn validate(
        &self,
        schema: &DataFrameSchema,
        table: &Table,
        lazy: bool,
    ) -> Result<Table, EngineError> {
        schema.validate_definition()?;

        let errors = self.collect_errors(schema, table, lazy);

        info!(
            rows = table.num_rows(),
            columns = schema.columns.len(),
            failed_checks = errors.len(),
            "Validated table"
        );

        if errors.is_empty() {
            return Ok(table.clone());
        }

        if lazy {
            Err(EngineError::BatchedViolations(SchemaErrors::new(errors)))
        } else {
            let mut errors = errors;
            Err(EngineError::StrictViolation(errors.swap_remove(0)))
        }
    }

    /// Runs every check in evaluation order.
    ///
    /// Without `lazy`, stops after the first failing check.
    fn collect_errors(&self, schema: &DataFrameSchema, table: &Table, lazy: bool) -> Vec<SchemaError> {
        let mut errors = Vec::new();

        // 1. Table structure
        for error in self.structure_validator.validate_columns(schema, table) {
            if record(error, &mut errors, lazy) {
                return errors;
            }
        }

        // 2. Per-column dtype, nullability, uniqueness and checks
        let mut evaluator = CheckEvaluator::new();
        for spec in &schema.columns {
            let Some(column) = table.column(&spec.name) else {
                continue;
            };

            let structural = [
                self.structure_validator.validate_dtype(spec, column),
                self.structure_validator.validate_nullable(spec, column),
                self.structure_validator.validate_unique(spec, column),
            ];
            for error in structural.into_iter().flatten() {
                if record(error, &mut errors, lazy) {
                    return errors;
                }
            }

            for (check_number, check) in spec.checks.iter().enumerate() {
                if let Some(error) = evaluator.evaluate(column, check, check_number) {
                    if record(error, &mut errors, lazy) {
                        return errors;
                    }
                }
            }
        }

        errors
    }
}

/// Records a failed check; returns true when validation should stop.
fn record(error: SchemaError, errors: &mut Vec<SchemaError>, lazy: bool) -> bool {
    debug!(
        column = error.column.as_deref().unwrap_or("<table>"),
        check = %error.check,
        failure_cases = error.failure_cases.len(),
        "Check failed"
    );
    errors.push(error);
    !lazy
}

impl Default for SchemaValidator {
    fn default() -> Self {
        Self::new()
    }
}
