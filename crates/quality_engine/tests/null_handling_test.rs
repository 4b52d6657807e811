//! Tests to verify correct handling of null values across all checks.
//!
//! Null values are handled consistently:
//! - Nullability is reported once per null row by the structure validator
//! - Value checks skip nulls (nullability is the structure's responsibility)
//! - Uniqueness ignores nulls, so repeated nulls are not duplicates
//! - Dtype checks only look at non-null values

use pretty_assertions::assert_eq;
use quality_core::{Check, ColumnSchema, DataFrameSchema, DataType, DataValue, Table};
use quality_engine::{EngineError, SchemaValidator};

fn table(values: Vec<DataValue>) -> Table {
    Table::new().with_column("value", values).unwrap()
}

fn failed_checks(schema: &DataFrameSchema, table: &Table) -> Vec<(String, Option<usize>)> {
    match SchemaValidator::new().validate(schema, table, true) {
        Ok(_) => Vec::new(),
        Err(EngineError::BatchedViolations(errors)) => errors
            .failure_cases
            .into_iter()
            .map(|case| (case.check, case.index))
            .collect(),
        Err(other) => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_null_in_non_nullable_column_fails() {
    let schema = DataFrameSchema::new().column(ColumnSchema::new("value"));
    let table = table(vec![1.into(), DataValue::Null, 3.into()]);

    assert_eq!(
        failed_checks(&schema, &table),
        vec![("not_nullable".to_string(), Some(1))]
    );
}

#[test]
fn test_null_in_nullable_column_passes() {
    let schema = DataFrameSchema::new().column(ColumnSchema::new("value").nullable(true));
    let table = table(vec![1.into(), DataValue::Null]);

    assert!(failed_checks(&schema, &table).is_empty());
}

#[test]
fn test_value_checks_skip_nulls() {
    let schema = DataFrameSchema::new().column(
        ColumnSchema::new("value")
            .nullable(true)
            .check(Check::Le(10.into()))
            .check(Check::StrStartswith("x".into()))
            .check(Check::Isin(vec![1.into()])),
    );
    let table = table(vec![DataValue::Null, DataValue::Null]);

    assert!(failed_checks(&schema, &table).is_empty());
}

#[test]
fn test_non_nullable_null_reported_once() {
    // The null row fails nullability but not the value check.
    let schema = DataFrameSchema::new()
        .column(ColumnSchema::new("value").check(Check::Gt(0.into())));
    let table = table(vec![DataValue::Null, 5.into(), (-1).into()]);

    assert_eq!(
        failed_checks(&schema, &table),
        vec![
            ("not_nullable".to_string(), Some(0)),
            ("greater_than(0)".to_string(), Some(2)),
        ]
    );
}

#[test]
fn test_uniqueness_ignores_nulls() {
    let schema = DataFrameSchema::new().column(
        ColumnSchema::new("value")
            .nullable(true)
            .unique(true),
    );
    let table = table(vec![DataValue::Null, "a".into(), DataValue::Null, "b".into()]);

    assert!(failed_checks(&schema, &table).is_empty());
}

#[test]
fn test_dtype_ignores_nulls() {
    let schema = DataFrameSchema::new().column(
        ColumnSchema::new("value")
            .dtype(DataType::Int64)
            .nullable(true),
    );
    let table = table(vec![DataValue::Null, 1.into(), DataValue::Null]);

    assert!(failed_checks(&schema, &table).is_empty());
}

#[test]
fn test_all_null_column_with_dtype() {
    let schema = DataFrameSchema::new().column(ColumnSchema::new("value").dtype(DataType::Str));
    let table = table(vec![DataValue::Null; 2]);

    assert_eq!(
        failed_checks(&schema, &table),
        vec![
            ("not_nullable".to_string(), Some(0)),
            ("not_nullable".to_string(), Some(1)),
        ]
    );
}
