//! Structure validation logic.
//!
//! This module validates the shape of a table against a schema: column
//! presence, unexpected columns, dtypes, nullability and uniqueness.

use crate::SchemaError;
use quality_core::{
    Column, ColumnSchema, DataFrameSchema, DataType, DataValue, FailureCase, SchemaContext, Table,
};
use std::collections::HashMap;

/// Validates the structure of a table against a schema.
pub struct StructureValidator;

impl StructureValidator {
    /// Creates a new structure validator.
    pub fn new() -> Self {
        Self
    }

    /// Reports required schema columns missing from the table, then table
    /// columns a strict schema does not name.
    ///
    /// Each offending column is its own error.
    pub fn validate_columns(&self, schema: &DataFrameSchema, table: &Table) -> Vec<SchemaError> {
        let missing = schema
            .columns
            .iter()
            .filter(|c| c.required && !table.has_column(&c.name))
            .map(|c| table_error("column_in_dataframe", &c.name));

        let unexpected: Vec<SchemaError> = if schema.strict {
            table
                .column_names()
                .into_iter()
                .filter(|name| schema.get_column(name).is_none())
                .map(|name| table_error("column_in_schema", name))
                .collect()
        } else {
            Vec::new()
        };

        missing.chain(unexpected).collect()
    }

    /// Validates the dtype of a present column.
    ///
    /// A mismatch is one column-scoped failure carrying the actual dtype.
    pub fn validate_dtype(&self, spec: &ColumnSchema, column: &Column) -> Option<SchemaError> {
        let expected = spec.dtype?;
        let non_null: Vec<&DataValue> = column.values.iter().filter(|v| !v.is_null()).collect();

        if non_null.iter().all(|v| expected.matches(v)) {
            return None;
        }

        let check = dtype_check(expected);
        Some(SchemaError {
            schema_context: SchemaContext::Column,
            column: Some(column.name.clone()),
            check: check.clone(),
            failure_cases: vec![FailureCase {
                schema_context: SchemaContext::Column,
                column: Some(column.name.clone()),
                check,
                check_number: None,
                failure_case: DataValue::String(actual_dtype(&non_null).to_string()),
                index: None,
            }],
        })
    }

    /// Reports every null value of a non-nullable column.
    pub fn validate_nullable(&self, spec: &ColumnSchema, column: &Column) -> Option<SchemaError> {
        if spec.nullable {
            return None;
        }

        let rows: Vec<usize> = column
            .values
            .iter()
            .enumerate()
            .filter(|(_, v)| v.is_null())
            .map(|(idx, _)| idx)
            .collect();

        row_error(column, "not_nullable", &rows)
    }

    /// Reports every row whose value occurs more than once.
    pub fn validate_unique(&self, spec: &ColumnSchema, column: &Column) -> Option<SchemaError> {
        if !spec.unique {
            return None;
        }

        let mut counts: HashMap<UniqueKey<'_>, usize> = HashMap::new();
        for value in column.values.iter().filter(|v| !v.is_null()) {
            *counts.entry(unique_key(value)).or_default() += 1;
        }

        let rows: Vec<usize> = column
            .values
            .iter()
            .enumerate()
            .filter(|(_, v)| !v.is_null() && counts.get(&unique_key(v)).is_some_and(|&n| n > 1))
            .map(|(idx, _)| idx)
            .collect();

        row_error(column, "field_uniqueness", &rows)
    }
}

impl Default for StructureValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// Hashable identity of a non-null value.
///
/// Integral floats collapse onto the integer key, so `1` and `1.0` collide
/// the same way they compare equal.
#[derive(Debug, PartialEq, Eq, Hash)]
enum UniqueKey<'a> {
    Null,
    Bool(bool),
    Int(i64),
    Float(u64),
    Str(&'a str),
}

fn unique_key(value: &DataValue) -> UniqueKey<'_> {
    match value {
        DataValue::Null => UniqueKey::Null,
        DataValue::Bool(b) => UniqueKey::Bool(*b),
        DataValue::Int(i) => UniqueKey::Int(*i),
        DataValue::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
            UniqueKey::Int(*f as i64)
        }
        DataValue::Float(f) => UniqueKey::Float(f.to_bits()),
        DataValue::String(s) => UniqueKey::Str(s),
    }
}

fn dtype_check(dtype: DataType) -> String {
    format!("dtype('{}')", dtype)
}

fn actual_dtype(values: &[&DataValue]) -> &'static str {
    match values.first() {
        Some(first) if values.iter().all(|v| v.type_name() == first.type_name()) => {
            first.type_name()
        }
        _ => "object",
    }
}

fn table_error(check: &str, column: &str) -> SchemaError {
    SchemaError {
        schema_context: SchemaContext::DataFrameSchema,
        column: None,
        check: check.to_string(),
        failure_cases: vec![FailureCase {
            schema_context: SchemaContext::DataFrameSchema,
            column: None,
            check: check.to_string(),
            check_number: None,
            failure_case: DataValue::String(column.to_string()),
            index: None,
        }],
    }
}

fn row_error(column: &Column, check: &str, rows: &[usize]) -> Option<SchemaError> {
    if rows.is_empty() {
        return None;
    }

    let failure_cases = rows
        .iter()
        .map(|&row| FailureCase {
            schema_context: SchemaContext::Column,
            column: Some(column.name.clone()),
            check: check.to_string(),
            check_number: None,
            failure_case: column.values[row].clone(),
            index: Some(row),
        })
        .collect();

    Some(SchemaError {
        schema_context: SchemaContext::Column,
        column: Some(column.name.clone()),
        check: check.to_string(),
        failure_cases,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn table() -> Table {
        Table::new()
            .with_column("column1", vec![9.into(), 4.into(), 0.into()])
            .unwrap()
            .with_column("column3", vec!["a".into(), "b".into(), "a".into()])
            .unwrap()
    }

    #[test]
    fn test_missing_column() {
        let schema = DataFrameSchema::new()
            .column(ColumnSchema::new("column1"))
            .column(ColumnSchema::new("column2"))
            .column(ColumnSchema::new("optional").required(false));

        let errors = StructureValidator::new().validate_columns(&schema, &table());

        assert_eq!(errors.len(), 1);
        let case = &errors[0].failure_cases[0];
        assert_eq!(case.schema_context, SchemaContext::DataFrameSchema);
        assert_eq!(case.check, "column_in_dataframe");
        assert_eq!(case.column, None);
        assert_eq!(case.failure_case, DataValue::from("column2"));
        assert_eq!(case.index, None);
    }

    #[test]
    fn test_strict_schema_rejects_unexpected_columns() {
        let schema = DataFrameSchema::new()
            .column(ColumnSchema::new("column1"))
            .strict(true);

        let errors = StructureValidator::new().validate_columns(&schema, &table());

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].check, "column_in_schema");
        assert_eq!(
            errors[0].failure_cases[0].failure_case,
            DataValue::from("column3")
        );
    }

    #[test]
    fn test_dtype_mismatch_is_column_scoped() {
        let spec = ColumnSchema::new("column3").dtype(DataType::Int64);
        let t = table();
        let column = t.column("column3").unwrap();

        let error = StructureValidator::new()
            .validate_dtype(&spec, column)
            .unwrap();

        assert_eq!(error.check, "dtype('int64')");
        assert_eq!(error.failure_cases.len(), 1);
        assert_eq!(error.failure_cases[0].index, None);
        assert_eq!(error.failure_cases[0].failure_case, DataValue::from("str"));
    }

    #[test]
    fn test_float_dtype_accepts_ints() {
        let spec = ColumnSchema::new("column1").dtype(DataType::Float64);
        let t = table();

        assert!(
            StructureValidator::new()
                .validate_dtype(&spec, t.column("column1").unwrap())
                .is_none()
        );
    }

    #[test]
    fn test_mixed_dtype_is_object() {
        let column = Column::new("x", vec![1.into(), "a".into()]);
        let spec = ColumnSchema::new("x").dtype(DataType::Str);

        let error = StructureValidator::new()
            .validate_dtype(&spec, &column)
            .unwrap();
        assert_eq!(error.failure_cases[0].failure_case, DataValue::from("object"));
    }

    #[test]
    fn test_nullable() {
        let column = Column::new("x", vec![DataValue::Null, 1.into(), DataValue::Null]);
        let validator = StructureValidator::new();

        let error = validator
            .validate_nullable(&ColumnSchema::new("x"), &column)
            .unwrap();
        let rows: Vec<Option<usize>> = error.failure_cases.iter().map(|c| c.index).collect();
        assert_eq!(rows, vec![Some(0), Some(2)]);

        assert!(
            validator
                .validate_nullable(&ColumnSchema::new("x").nullable(true), &column)
                .is_none()
        );
    }

    #[test]
    fn test_unique() {
        let t = table();
        let spec = ColumnSchema::new("column3").unique(true);

        let error = StructureValidator::new()
            .validate_unique(&spec, t.column("column3").unwrap())
            .unwrap();

        assert_eq!(error.check, "field_uniqueness");
        let rows: Vec<Option<usize>> = error.failure_cases.iter().map(|c| c.index).collect();
        assert_eq!(rows, vec![Some(0), Some(2)]);
    }

    #[test]
    fn test_unique_treats_int_and_float_as_equal() {
        let column = Column::new("c", vec![1.into(), 1.0.into(), 2.5.into(), (-0.0).into(), 0.into()]);
        let spec = ColumnSchema::new("c").dtype(DataType::Float64).unique(true);

        let error = StructureValidator::new()
            .validate_unique(&spec, &column)
            .unwrap();

        let rows: Vec<Option<usize>> = error.failure_cases.iter().map(|c| c.index).collect();
        assert_eq!(rows, vec![Some(0), Some(1), Some(3), Some(4)]);
    }

    #[test]
    fn test_unique_keeps_strings_apart_from_numbers() {
        let column = Column::new("c", vec![1.into(), "1".into(), true.into()]);
        let spec = ColumnSchema::new("c").unique(true);

        assert!(
            StructureValidator::new()
                .validate_unique(&spec, &column)
                .is_none()
        );
    }
}
