//! Schema definitions.
//!
//! A [`DataFrameSchema`] is the canonical constraint set the engine
//! evaluates: named columns, each with a dtype, nullability, uniqueness and
//! an ordered list of [`Check`]s. A [`ModelDefinition`] is the declarative
//! field-style form of the same information; it resolves into a
//! `DataFrameSchema` through [`IntoSchema`].

use crate::{CoreError, DataValue, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

fn default_true() -> bool {
    true
}

/// Column data types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    /// 64-bit integers
    Int64,
    /// 64-bit floats (integers are accepted)
    Float64,
    /// Strings
    Str,
    /// Booleans
    Bool,
}

impl DataType {
    /// Returns true if a non-null value is of this type.
    pub fn matches(&self, value: &DataValue) -> bool {
        match self {
            DataType::Int64 => matches!(value, DataValue::Int(_)),
            DataType::Float64 => matches!(value, DataValue::Float(_) | DataValue::Int(_)),
            DataType::Str => matches!(value, DataValue::String(_)),
            DataType::Bool => matches!(value, DataValue::Bool(_)),
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DataType::Int64 => "int64",
            DataType::Float64 => "float64",
            DataType::Str => "str",
            DataType::Bool => "bool",
        };
        write!(f, "{}", name)
    }
}

/// Inclusive value bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Lower bound (inclusive)
    pub min: DataValue,
    /// Upper bound (inclusive)
    pub max: DataValue,
}

/// Inclusive string length bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LengthBounds {
    /// Minimum length
    #[serde(default)]
    pub min: Option<usize>,
    /// Maximum length
    #[serde(default)]
    pub max: Option<usize>,
}

type ElementFn = dyn Fn(&DataValue) -> bool + Send + Sync;
type ColumnFn = dyn Fn(&[DataValue]) -> bool + Send + Sync;

/// The predicate behind a [`CustomCheck`].
#[derive(Clone)]
pub enum CustomPredicate {
    /// Evaluated per non-null value; failures are row-scoped
    Element(Arc<ElementFn>),
    /// Evaluated once over all values; a failure is column-scoped
    Column(Arc<ColumnFn>),
}

/// A named check implemented in code.
///
/// # Example
///
/// ```rust
/// use quality_core::{CustomCheck, DataValue};
///
/// let check = CustomCheck::element("is_even", |v| v.as_int().is_some_and(|i| i % 2 == 0));
/// assert_eq!(check.name(), "is_even");
/// ```
#[derive(Clone)]
pub struct CustomCheck {
    name: String,
    predicate: CustomPredicate,
}

impl CustomCheck {
    /// Creates a check evaluated per value.
    pub fn element(
        name: impl Into<String>,
        predicate: impl Fn(&DataValue) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            predicate: CustomPredicate::Element(Arc::new(predicate)),
        }
    }

    /// Creates a check evaluated once over the whole column.
    pub fn column(
        name: impl Into<String>,
        predicate: impl Fn(&[DataValue]) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            predicate: CustomPredicate::Column(Arc::new(predicate)),
        }
    }

    /// Returns the check name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the predicate.
    pub fn predicate(&self) -> &CustomPredicate {
        &self.predicate
    }
}

impl fmt::Debug for CustomCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.predicate {
            CustomPredicate::Element(_) => "element",
            CustomPredicate::Column(_) => "column",
        };
        f.debug_struct("CustomCheck")
            .field("name", &self.name)
            .field("kind", &kind)
            .finish()
    }
}

impl PartialEq for CustomCheck {
    fn eq(&self, other: &Self) -> bool {
        let same_predicate = match (&self.predicate, &other.predicate) {
            (CustomPredicate::Element(a), CustomPredicate::Element(b)) => Arc::ptr_eq(a, b),
            (CustomPredicate::Column(a), CustomPredicate::Column(b)) => Arc::ptr_eq(a, b),
            _ => false,
        };
        self.name == other.name && same_predicate
    }
}

/// A constraint applied to a column's values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Check {
    /// Value equals the given value
    Eq(DataValue),
    /// Value differs from the given value
    Ne(DataValue),
    /// Value is greater than the given value
    Gt(DataValue),
    /// Value is greater than or equal to the given value
    Ge(DataValue),
    /// Value is less than the given value
    Lt(DataValue),
    /// Value is less than or equal to the given value
    Le(DataValue),
    /// Value lies within inclusive bounds
    InRange(Bounds),
    /// Value is one of the given values
    Isin(Vec<DataValue>),
    /// Value is none of the given values
    Notin(Vec<DataValue>),
    /// String starts with a prefix
    StrStartswith(String),
    /// String ends with a suffix
    StrEndswith(String),
    /// String contains a substring
    StrContains(String),
    /// String matches a regex from its start
    StrMatches(String),
    /// String length lies within inclusive bounds
    StrLength(LengthBounds),
    /// Check implemented in code
    #[serde(skip)]
    Custom(CustomCheck),
}

fn literal_list(values: &[DataValue]) -> String {
    values
        .iter()
        .map(DataValue::literal)
        .collect::<Vec<_>>()
        .join(", ")
}

impl Check {
    /// Returns the name reported when the check fails.
    pub fn name(&self) -> String {
        match self {
            Check::Eq(v) => format!("equal_to({})", v.literal()),
            Check::Ne(v) => format!("not_equal_to({})", v.literal()),
            Check::Gt(v) => format!("greater_than({})", v.literal()),
            Check::Ge(v) => format!("greater_than_or_equal_to({})", v.literal()),
            Check::Lt(v) => format!("less_than({})", v.literal()),
            Check::Le(v) => format!("less_than_or_equal_to({})", v.literal()),
            Check::InRange(b) => format!("in_range({}, {})", b.min.literal(), b.max.literal()),
            Check::Isin(values) => format!("isin([{}])", literal_list(values)),
            Check::Notin(values) => format!("notin([{}])", literal_list(values)),
            Check::StrStartswith(s) => format!("str_startswith('{}')", s),
            Check::StrEndswith(s) => format!("str_endswith('{}')", s),
            Check::StrContains(s) => format!("str_contains('{}')", s),
            Check::StrMatches(s) => format!("str_matches('{}')", s),
            Check::StrLength(b) => format!(
                "str_length({}, {})",
                b.min.unwrap_or(0),
                b.max.map_or_else(|| "inf".to_string(), |m| m.to_string())
            ),
            Check::Custom(c) => c.name().to_string(),
        }
    }

    fn validate_definition(&self, column: &str) -> Result<()> {
        match self {
            Check::InRange(b) => match b.min.compare(&b.max) {
                Some(std::cmp::Ordering::Greater) => Err(CoreError::unrecognized(format!(
                    "in_range bounds of column '{}' are inverted",
                    column
                ))),
                Some(_) => Ok(()),
                None => Err(CoreError::unrecognized(format!(
                    "in_range bounds of column '{}' are not comparable",
                    column
                ))),
            },
            Check::StrLength(LengthBounds {
                min: Some(min),
                max: Some(max),
            }) if min > max => Err(CoreError::unrecognized(format!(
                "str_length bounds of column '{}' are inverted",
                column
            ))),
            Check::StrMatches(pattern) => Regex::new(pattern)
                .map(|_| ())
                .map_err(|e| CoreError::InvalidRegex {
                    column: column.to_string(),
                    error: e.to_string(),
                }),
            _ => Ok(()),
        }
    }
}

/// Schema of a single column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnSchema {
    /// Column name
    pub name: String,

    /// Expected dtype, unchecked when absent
    #[serde(default)]
    pub dtype: Option<DataType>,

    /// Whether null values are allowed
    #[serde(default)]
    pub nullable: bool,

    /// Whether the column must be present
    #[serde(default = "default_true")]
    pub required: bool,

    /// Whether values must be unique
    #[serde(default)]
    pub unique: bool,

    /// Checks, evaluated in order
    #[serde(default)]
    pub checks: Vec<Check>,
}

/// The canonical constraint set for a table.
///
/// # Example
///
/// ```rust
/// use quality_core::{Check, ColumnSchema, DataFrameSchema, DataType};
///
/// let schema = DataFrameSchema::new()
///     .column(ColumnSchema::new("column1").dtype(DataType::Int64).check(Check::Le(10.into())))
///     .column(ColumnSchema::new("column3").check(Check::StrStartswith("value_".into())));
///
/// assert_eq!(schema.columns.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DataFrameSchema {
    /// Optional schema name
    #[serde(default)]
    pub name: Option<String>,

    /// Column schemas in order
    pub columns: Vec<ColumnSchema>,

    /// Reject table columns the schema does not name
    #[serde(default)]
    pub strict: bool,
}

impl DataFrameSchema {
    /// Gets a column schema by name.
    pub fn get_column(&self, name: &str) -> Option<&ColumnSchema> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Returns the column names in order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Checks that the schema itself is well-formed.
    ///
    /// Rejects empty or duplicate column names, inverted or incomparable
    /// bounds, and invalid regex patterns.
    pub fn validate_definition(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for column in &self.columns {
            if column.name.is_empty() {
                return Err(CoreError::unrecognized("column with empty name"));
            }
            if !seen.insert(column.name.as_str()) {
                return Err(CoreError::DuplicateColumn(column.name.clone()));
            }
            for check in &column.checks {
                check.validate_definition(&column.name)?;
            }
        }
        Ok(())
    }
}

/// A field of a [`ModelDefinition`].
///
/// Each check keyword becomes one [`Check`]; custom checks run last.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldDefinition {
    pub name: String,
    #[serde(default)]
    pub dtype: Option<DataType>,
    #[serde(default)]
    pub nullable: bool,
    #[serde(default = "default_true")]
    pub required: bool,
    #[serde(default)]
    pub unique: bool,
    #[serde(default)]
    pub eq: Option<DataValue>,
    #[serde(default)]
    pub ne: Option<DataValue>,
    #[serde(default)]
    pub gt: Option<DataValue>,
    #[serde(default)]
    pub ge: Option<DataValue>,
    #[serde(default)]
    pub lt: Option<DataValue>,
    #[serde(default)]
    pub le: Option<DataValue>,
    #[serde(default)]
    pub in_range: Option<Bounds>,
    #[serde(default)]
    pub isin: Option<Vec<DataValue>>,
    #[serde(default)]
    pub notin: Option<Vec<DataValue>>,
    #[serde(default)]
    pub str_startswith: Option<String>,
    #[serde(default)]
    pub str_endswith: Option<String>,
    #[serde(default)]
    pub str_contains: Option<String>,
    #[serde(default)]
    pub str_matches: Option<String>,
    #[serde(default)]
    pub str_length: Option<LengthBounds>,
    #[serde(skip)]
    pub custom_checks: Vec<CustomCheck>,
}

impl FieldDefinition {
    /// Creates a required, non-nullable field without checks.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dtype: None,
            nullable: false,
            required: true,
            unique: false,
            eq: None,
            ne: None,
            gt: None,
            ge: None,
            lt: None,
            le: None,
            in_range: None,
            isin: None,
            notin: None,
            str_startswith: None,
            str_endswith: None,
            str_contains: None,
            str_matches: None,
            str_length: None,
            custom_checks: Vec::new(),
        }
    }

    /// Adds a custom check.
    pub fn custom(mut self, check: CustomCheck) -> Self {
        self.custom_checks.push(check);
        self
    }

    fn checks(&self) -> Vec<Check> {
        let mut checks = Vec::new();
        let keywords: [(&Option<DataValue>, fn(DataValue) -> Check); 6] = [
            (&self.eq, Check::Eq),
            (&self.ne, Check::Ne),
            (&self.gt, Check::Gt),
            (&self.ge, Check::Ge),
            (&self.lt, Check::Lt),
            (&self.le, Check::Le),
        ];
        for (value, make) in keywords {
            if let Some(v) = value {
                checks.push(make(v.clone()));
            }
        }
        if let Some(bounds) = &self.in_range {
            checks.push(Check::InRange(bounds.clone()));
        }
        if let Some(values) = &self.isin {
            checks.push(Check::Isin(values.clone()));
        }
        if let Some(values) = &self.notin {
            checks.push(Check::Notin(values.clone()));
        }
        let strings: [(&Option<String>, fn(String) -> Check); 4] = [
            (&self.str_startswith, Check::StrStartswith),
            (&self.str_endswith, Check::StrEndswith),
            (&self.str_contains, Check::StrContains),
            (&self.str_matches, Check::StrMatches),
        ];
        for (value, make) in strings {
            if let Some(s) = value {
                checks.push(make(s.clone()));
            }
        }
        if let Some(bounds) = self.str_length {
            checks.push(Check::StrLength(bounds));
        }
        checks.extend(self.custom_checks.iter().cloned().map(Check::Custom));
        checks
    }
}

/// Declarative, field-style schema form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelDefinition {
    /// Optional schema name
    #[serde(default)]
    pub name: Option<String>,

    /// Field definitions in order
    pub fields: Vec<FieldDefinition>,

    /// Reject table columns the model does not name
    #[serde(default)]
    pub strict: bool,
}

impl ModelDefinition {
    /// Creates an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field.
    pub fn field(mut self, field: FieldDefinition) -> Self {
        self.fields.push(field);
        self
    }

    /// Converts the model into its canonical constraint set.
    pub fn to_schema(&self) -> Result<DataFrameSchema> {
        let schema = DataFrameSchema {
            name: self.name.clone(),
            columns: self
                .fields
                .iter()
                .map(|field| ColumnSchema {
                    name: field.name.clone(),
                    dtype: field.dtype,
                    nullable: field.nullable,
                    required: field.required,
                    unique: field.unique,
                    checks: field.checks(),
                })
                .collect(),
            strict: self.strict,
        };
        schema.validate_definition()?;
        Ok(schema)
    }
}

/// Conversion of any accepted schema form into a checked constraint set.
pub trait IntoSchema {
    /// Resolves `self` into a validated [`DataFrameSchema`].
    fn into_schema(self) -> Result<DataFrameSchema>;
}

impl IntoSchema for DataFrameSchema {
    fn into_schema(self) -> Result<DataFrameSchema> {
        self.validate_definition()?;
        Ok(self)
    }
}

impl IntoSchema for &DataFrameSchema {
    fn into_schema(self) -> Result<DataFrameSchema> {
        self.clone().into_schema()
    }
}

impl IntoSchema for ModelDefinition {
    fn into_schema(self) -> Result<DataFrameSchema> {
        self.to_schema()
    }
}

impl IntoSchema for &ModelDefinition {
    fn into_schema(self) -> Result<DataFrameSchema> {
        self.to_schema()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_check_names() {
        assert_eq!(Check::Le(10.into()).name(), "less_than_or_equal_to(10)");
        assert_eq!(Check::Lt((-1.2).into()).name(), "less_than(-1.2)");
        assert_eq!(Check::Le(10.0.into()).name(), "less_than_or_equal_to(10.0)");
        assert_eq!(Check::Lt((-1.0).into()).name(), "less_than(-1.0)");
        assert_eq!(
            Check::StrStartswith("value_".into()).name(),
            "str_startswith('value_')"
        );
        assert_eq!(
            Check::Isin(vec!["a".into(), "b".into()]).name(),
            "isin(['a', 'b'])"
        );
        assert_eq!(
            Check::InRange(Bounds {
                min: 0.into(),
                max: 5.into()
            })
            .name(),
            "in_range(0, 5)"
        );
        assert_eq!(
            Check::StrLength(LengthBounds {
                min: Some(2),
                max: None
            })
            .name(),
            "str_length(2, inf)"
        );
        assert_eq!(
            Check::Custom(CustomCheck::column("two_parts", |_| true)).name(),
            "two_parts"
        );
    }

    #[test]
    fn test_check_deserialization() {
        let checks: Vec<Check> = serde_json::from_str(
            r#"[{"le": 10}, {"str_startswith": "value_"}, {"in_range": {"min": 0, "max": 1.5}}]"#,
        )
        .unwrap();

        assert_eq!(
            checks,
            vec![
                Check::Le(DataValue::Int(10)),
                Check::StrStartswith("value_".to_string()),
                Check::InRange(Bounds {
                    min: DataValue::Int(0),
                    max: DataValue::Float(1.5),
                }),
            ]
        );
    }

    #[test]
    fn test_column_schema_defaults() {
        let column: ColumnSchema = serde_json::from_str(r#"{"name": "id"}"#).unwrap();
        assert!(!column.nullable);
        assert!(column.required);
        assert!(!column.unique);
        assert!(column.dtype.is_none());
        assert!(column.checks.is_empty());
    }

    #[test]
    fn test_duplicate_columns_rejected() {
        let schema = DataFrameSchema::new()
            .column(ColumnSchema::new("a"))
            .column(ColumnSchema::new("a"));

        assert_eq!(
            schema.validate_definition(),
            Err(CoreError::DuplicateColumn("a".to_string()))
        );
    }

    #[test]
    fn test_invalid_regex_rejected() {
        let schema =
            DataFrameSchema::new().column(ColumnSchema::new("a").check(Check::StrMatches("(".into())));

        assert!(matches!(
            schema.into_schema(),
            Err(CoreError::InvalidRegex { .. })
        ));
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let schema = DataFrameSchema::new().column(ColumnSchema::new("a").check(Check::InRange(
            Bounds {
                min: 5.into(),
                max: 1.into(),
            },
        )));

        assert!(matches!(
            schema.validate_definition(),
            Err(CoreError::UnrecognizedSchema(_))
        ));
    }

    #[test]
    fn test_model_to_schema() {
        let mut column1 = FieldDefinition::new("column1");
        column1.dtype = Some(DataType::Int64);
        column1.le = Some(10.into());

        let mut column3 = FieldDefinition::new("column3");
        column3.dtype = Some(DataType::Str);
        column3.str_startswith = Some("value_".to_string());
        let custom = CustomCheck::column("column3", |_| true);
        let column3 = column3.custom(custom.clone());

        let schema = ModelDefinition::new()
            .field(column1)
            .field(column3)
            .to_schema()
            .unwrap();

        let expected = DataFrameSchema::new()
            .column(
                ColumnSchema::new("column1")
                    .dtype(DataType::Int64)
                    .check(Check::Le(10.into())),
            )
            .column(
                ColumnSchema::new("column3")
                    .dtype(DataType::Str)
                    .check(Check::StrStartswith("value_".into()))
                    .check(Check::Custom(custom)),
            );

        assert_eq!(schema, expected);
    }

    #[test]
    fn test_model_keyword_order() {
        let field: FieldDefinition = serde_json::from_str(
            r#"{"name": "x", "str_length": {"min": 1}, "ge": 0, "isin": [1, 2], "le": 9}"#,
        )
        .unwrap();

        let names: Vec<String> = field.checks().iter().map(Check::name).collect();
        assert_eq!(
            names,
            vec![
                "greater_than_or_equal_to(0)",
                "less_than_or_equal_to(9)",
                "isin([1, 2])",
                "str_length(1, inf)",
            ]
        );
    }

    #[test]
    fn test_model_rejects_unknown_keyword() {
        let result = serde_json::from_str::<FieldDefinition>(r#"{"name": "x", "between": 3}"#);
        assert!(result.is_err());
    }
}
