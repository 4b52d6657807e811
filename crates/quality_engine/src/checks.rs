//! Check evaluation.
//!
//! This module evaluates the checks of a column schema against the column's
//! values:
//! - Comparisons: eq, ne, gt, ge, lt, le, in_range
//! - Membership: isin, notin
//! - String checks: starts/ends with, contains, regex match, length
//! - Custom checks, element-wise or over the whole column

use crate::SchemaError;
use quality_core::{
    Check, Column, CustomPredicate, DataValue, FailureCase, LengthBounds, SchemaContext,
};
use regex::Regex;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Evaluates column checks.
pub struct CheckEvaluator {
    /// Cache of compiled regex patterns
    regex_cache: HashMap<String, Regex>,
}

impl CheckEvaluator {
    /// Creates a new check evaluator.
    pub fn new() -> Self {
        Self {
            regex_cache: HashMap::new(),
        }
    }

    /// Evaluates one check against a column.
    ///
    /// Returns `None` when the check passes. Null values are skipped;
    /// nullability is the structure validator's concern.
    pub fn evaluate(
        &mut self,
        column: &Column,
        check: &Check,
        check_number: usize,
    ) -> Option<SchemaError> {
        let failure_cases = match check {
            Check::Custom(custom) => match custom.predicate() {
                CustomPredicate::Column(predicate) => {
                    if predicate(column.values.as_slice()) {
                        Vec::new()
                    } else {
                        vec![FailureCase {
                            schema_context: SchemaContext::Column,
                            column: Some(column.name.clone()),
                            check: check.name(),
                            check_number: Some(check_number),
                            failure_case: DataValue::Bool(false),
                            index: None,
                        }]
                    }
                }
                CustomPredicate::Element(_) => self.failing_rows(column, check, check_number),
            },
            _ => self.failing_rows(column, check, check_number),
        };

        if failure_cases.is_empty() {
            return None;
        }

        Some(SchemaError {
            schema_context: SchemaContext::Column,
            column: Some(column.name.clone()),
            check: check.name(),
            failure_cases,
        })
    }

    fn failing_rows(&mut self, column: &Column, check: &Check, check_number: usize) -> Vec<FailureCase> {
        let mut failures = Vec::new();
        for (row_idx, value) in column.values.iter().enumerate() {
            if value.is_null() || self.passes(check, value) {
                continue;
            }
            failures.push(FailureCase {
                schema_context: SchemaContext::Column,
                column: Some(column.name.clone()),
                check: check.name(),
                check_number: Some(check_number),
                failure_case: value.clone(),
                index: Some(row_idx),
            });
        }
        failures
    }

    /// Returns true if a single non-null value satisfies the check.
    pub fn passes(&mut self, check: &Check, value: &DataValue) -> bool {
        match check {
            Check::Eq(expected) => value.compare(expected) == Some(Ordering::Equal),
            Check::Ne(expected) => value.compare(expected) != Some(Ordering::Equal),
            Check::Gt(bound) => value.compare(bound) == Some(Ordering::Greater),
            Check::Ge(bound) => matches!(
                value.compare(bound),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            Check::Lt(bound) => value.compare(bound) == Some(Ordering::Less),
            Check::Le(bound) => matches!(
                value.compare(bound),
                Some(Ordering::Less | Ordering::Equal)
            ),
            Check::InRange(bounds) => {
                matches!(
                    value.compare(&bounds.min),
                    Some(Ordering::Greater | Ordering::Equal)
                ) && matches!(
                    value.compare(&bounds.max),
                    Some(Ordering::Less | Ordering::Equal)
                )
            }
            Check::Isin(allowed) => is_member(value, allowed),
            Check::Notin(forbidden) => !is_member(value, forbidden),
            Check::StrStartswith(prefix) => value.as_string().is_some_and(|s| s.starts_with(prefix.as_str())),
            Check::StrEndswith(suffix) => value.as_string().is_some_and(|s| s.ends_with(suffix.as_str())),
            Check::StrContains(needle) => value.as_string().is_some_and(|s| s.contains(needle.as_str())),
            Check::StrMatches(pattern) => {
                let Some(s) = value.as_string() else {
                    return false;
                };
                // Anchored at the start of the string, unanchored at the end.
                self.get_or_compile_regex(pattern)
                    .and_then(|regex| regex.find(s))
                    .is_some_and(|m| m.start() == 0)
            }
            Check::StrLength(bounds) => value
                .as_string()
                .is_some_and(|s| within_length(s.chars().count(), bounds)),
            Check::Custom(custom) => match custom.predicate() {
                CustomPredicate::Element(predicate) => predicate(value),
                CustomPredicate::Column(predicate) => predicate(std::slice::from_ref(value)),
            },
        }
    }

    /// Gets a compiled regex from cache or compiles and caches it.
    fn get_or_compile_regex(&mut self, pattern: &str) -> Option<&Regex> {
        if !self.regex_cache.contains_key(pattern) {
            let regex = Regex::new(pattern).ok()?;
            self.regex_cache.insert(pattern.to_string(), regex);
        }
        self.regex_cache.get(pattern)
    }
}

impl Default for CheckEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

fn is_member(value: &DataValue, values: &[DataValue]) -> bool {
    values
        .iter()
        .any(|candidate| value.compare(candidate) == Some(Ordering::Equal))
}

fn within_length(len: usize, bounds: &LengthBounds) -> bool {
    bounds.min.is_none_or(|min| len >= min) && bounds.max.is_none_or(|max| len <= max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use quality_core::{Bounds, CustomCheck};

    fn column(name: &str, values: Vec<DataValue>) -> Column {
        Column::new(name, values)
    }

    #[test]
    fn test_le_reports_failing_rows() {
        let column1 = column("column1", vec![11.into(), 4.into(), 10.into(), 12.into()]);
        let mut evaluator = CheckEvaluator::new();

        let error = evaluator
            .evaluate(&column1, &Check::Le(10.into()), 0)
            .unwrap();

        assert_eq!(error.check, "less_than_or_equal_to(10)");
        assert_eq!(error.column.as_deref(), Some("column1"));
        let rows: Vec<Option<usize>> = error.failure_cases.iter().map(|c| c.index).collect();
        assert_eq!(rows, vec![Some(0), Some(3)]);
        assert_eq!(error.failure_cases[0].failure_case, DataValue::Int(11));
        assert_eq!(error.failure_cases[0].check_number, Some(0));
    }

    #[test]
    fn test_passing_check_returns_none() {
        let column3 = column("column3", vec!["value_1".into(), "value_2".into()]);
        let mut evaluator = CheckEvaluator::new();

        assert!(
            evaluator
                .evaluate(&column3, &Check::StrStartswith("value_".into()), 0)
                .is_none()
        );
    }

    #[test]
    fn test_nulls_are_skipped() {
        let col = column("x", vec![DataValue::Null, 20.into()]);
        let mut evaluator = CheckEvaluator::new();

        let error = evaluator.evaluate(&col, &Check::Lt(5.into()), 1).unwrap();
        assert_eq!(error.failure_cases.len(), 1);
        assert_eq!(error.failure_cases[0].index, Some(1));
    }

    #[test]
    fn test_comparisons() {
        let mut evaluator = CheckEvaluator::new();
        let v = DataValue::Float(-1.3);

        assert!(evaluator.passes(&Check::Lt((-1.2).into()), &v));
        assert!(!evaluator.passes(&Check::Gt(0.into()), &v));
        assert!(evaluator.passes(&Check::Ne(0.into()), &v));
        assert!(evaluator.passes(&Check::Eq((-1.3).into()), &v));
        assert!(evaluator.passes(
            &Check::InRange(Bounds {
                min: (-2).into(),
                max: 0.into()
            }),
            &v
        ));
        // Incomparable types fail ordering checks.
        assert!(!evaluator.passes(&Check::Le(10.into()), &DataValue::from("5")));
    }

    #[test]
    fn test_membership() {
        let mut evaluator = CheckEvaluator::new();
        let allowed: Vec<DataValue> = vec!["a".into(), "b".into()];

        assert!(evaluator.passes(&Check::Isin(allowed.clone()), &"a".into()));
        assert!(!evaluator.passes(&Check::Isin(allowed.clone()), &"c".into()));
        assert!(evaluator.passes(&Check::Notin(allowed), &"c".into()));
        assert!(evaluator.passes(&Check::Isin(vec![1.into()]), &DataValue::Float(1.0)));
    }

    #[test]
    fn test_string_checks() {
        let mut evaluator = CheckEvaluator::new();
        let v: DataValue = "value_1".into();

        assert!(evaluator.passes(&Check::StrStartswith("value_".into()), &v));
        assert!(!evaluator.passes(&Check::StrStartswith("value_".into()), &"value1".into()));
        assert!(evaluator.passes(&Check::StrEndswith("_1".into()), &v));
        assert!(evaluator.passes(&Check::StrContains("ue_".into()), &v));
        assert!(evaluator.passes(&Check::StrMatches(r"value_\d".into()), &v));
        assert!(!evaluator.passes(&Check::StrMatches(r"\d".into()), &v));
        assert!(evaluator.passes(
            &Check::StrLength(LengthBounds {
                min: Some(7),
                max: Some(7)
            }),
            &v
        ));
        assert!(!evaluator.passes(&Check::StrStartswith("1".into()), &DataValue::Int(1)));
    }

    #[test]
    fn test_regex_cache() {
        let mut evaluator = CheckEvaluator::new();
        let check = Check::StrMatches("^[a-z]+$".into());

        assert!(evaluator.passes(&check, &"abc".into()));
        assert!(!evaluator.passes(&check, &"ABC".into()));
        assert_eq!(evaluator.regex_cache.len(), 1);
    }

    #[test]
    fn test_custom_column_check_is_column_scoped() {
        let col = column("column3", vec!["a_b".into(), "a_b_c".into()]);
        let check = Check::Custom(CustomCheck::column("two_parts", |values| {
            values
                .iter()
                .all(|v| v.as_string().is_some_and(|s| s.split('_').count() == 2))
        }));
        let mut evaluator = CheckEvaluator::new();

        let error = evaluator.evaluate(&col, &check, 1).unwrap();
        assert_eq!(error.failure_cases.len(), 1);
        assert_eq!(error.failure_cases[0].index, None);
        assert_eq!(error.failure_cases[0].failure_case, DataValue::Bool(false));
        assert_eq!(error.check, "two_parts");
    }

    #[test]
    fn test_custom_element_check_is_row_scoped() {
        let col = column("n", vec![2.into(), 3.into(), 4.into()]);
        let check = Check::Custom(CustomCheck::element("is_even", |v| {
            v.as_int().is_some_and(|i| i % 2 == 0)
        }));
        let mut evaluator = CheckEvaluator::new();

        let error = evaluator.evaluate(&col, &check, 0).unwrap();
        assert_eq!(error.failure_cases.len(), 1);
        assert_eq!(error.failure_cases[0].index, Some(1));
    }
}
