//! Column-oriented in-memory tables.
//!
//! A [`Table`] is an ordered list of named columns that all hold the same
//! number of values. Row `i` is the `i`-th value of every column.

use crate::{CoreError, DataValue, Result};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A named column of values.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Column name
    pub name: String,
    /// Column values, one per row
    pub values: Vec<DataValue>,
}

impl Column {
    /// Creates a new column.
    pub fn new(name: impl Into<String>, values: Vec<DataValue>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Returns the number of values in the column.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the column holds no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A table of equally long named columns.
///
/// # Example
///
/// ```rust
/// use quality_core::{DataValue, Table};
///
/// let table = Table::new()
///     .with_column("id", vec![DataValue::Int(1), DataValue::Int(2)])
///     .unwrap();
/// assert_eq!(table.num_rows(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    /// Creates a new table without columns.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table from columns, checking names and lengths.
    pub fn from_columns(columns: Vec<Column>) -> Result<Self> {
        columns
            .into_iter()
            .try_fold(Table::new(), |table, column| {
                table.with_column(column.name, column.values)
            })
    }

    /// Adds a column, consuming the table.
    ///
    /// Fails if a column with the same name exists or the length differs
    /// from the table's row count.
    pub fn with_column(mut self, name: impl Into<String>, values: Vec<DataValue>) -> Result<Self> {
        let name = name.into();
        if self.has_column(&name) {
            return Err(CoreError::DuplicateColumn(name));
        }
        self.check_length(&name, values.len())?;
        self.columns.push(Column::new(name, values));
        Ok(self)
    }

    /// Assigns a column, replacing an existing one in place or appending it.
    pub fn assign(mut self, name: impl Into<String>, values: Vec<DataValue>) -> Result<Self> {
        let name = name.into();
        match self.columns.iter().position(|c| c.name == name) {
            Some(pos) => {
                // Replacing the only column may change the row count.
                if self.columns.len() > 1 {
                    self.check_length(&name, values.len())?;
                }
                self.columns[pos].values = values;
            }
            None => {
                self.check_length(&name, values.len())?;
                self.columns.push(Column::new(name, values));
            }
        }
        Ok(self)
    }

    fn check_length(&self, name: &str, actual: usize) -> Result<()> {
        if !self.columns.is_empty() && actual != self.num_rows() {
            return Err(CoreError::LengthMismatch {
                column: name.to_string(),
                expected: self.num_rows(),
                actual,
            });
        }
        Ok(())
    }

    /// Returns the number of rows.
    pub fn num_rows(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    /// Returns the number of columns.
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.num_rows() == 0
    }

    /// Returns true if a column with this name exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    /// Gets a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Returns an iterator over the columns in order.
    pub fn columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter()
    }

    /// Returns the column names in order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Gets the values of row `index`, in column order.
    pub fn row(&self, index: usize) -> Option<Vec<&DataValue>> {
        if index >= self.num_rows() {
            return None;
        }
        Some(self.columns.iter().map(|c| &c.values[index]).collect())
    }
}

impl Serialize for Table {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for column in &self.columns {
            map.serialize_entry(&column.name, &column.values)?;
        }
        map.end()
    }
}

struct TableVisitor;

impl<'de> Visitor<'de> for TableVisitor {
    type Value = Table;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of column names to equally long value lists")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Table, A::Error> {
        let mut table = Table::new();
        while let Some((name, values)) = access.next_entry::<String, Vec<DataValue>>()? {
            table = table
                .with_column(name, values)
                .map_err(serde::de::Error::custom)?;
        }
        Ok(table)
    }
}

// Column order follows the document order.
impl<'de> Deserialize<'de> for Table {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(TableVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ints(values: &[i64]) -> Vec<DataValue> {
        values.iter().copied().map(DataValue::Int).collect()
    }

    #[test]
    fn test_table_operations() {
        let table = Table::new();
        assert_eq!(table.num_rows(), 0);
        assert!(table.is_empty());

        let table = table
            .with_column("a", ints(&[1, 2, 3]))
            .unwrap()
            .with_column("b", vec!["x".into(), "y".into(), "z".into()])
            .unwrap();

        assert_eq!(table.num_rows(), 3);
        assert_eq!(table.num_columns(), 2);
        assert_eq!(table.column_names(), vec!["a", "b"]);
        assert_eq!(
            table.row(1),
            Some(vec![&DataValue::Int(2), &DataValue::from("y")])
        );
        assert_eq!(table.row(3), None);
    }

    #[test]
    fn test_length_mismatch() {
        let err = Table::new()
            .with_column("a", ints(&[1, 2]))
            .unwrap()
            .with_column("b", ints(&[1]))
            .unwrap_err();

        assert_eq!(
            err,
            CoreError::LengthMismatch {
                column: "b".to_string(),
                expected: 2,
                actual: 1,
            }
        );
    }

    #[test]
    fn test_duplicate_column() {
        let err = Table::from_columns(vec![
            Column::new("a", ints(&[1])),
            Column::new("a", ints(&[2])),
        ])
        .unwrap_err();
        assert_eq!(err, CoreError::DuplicateColumn("a".to_string()));
    }

    #[test]
    fn test_assign_replaces_in_place_and_appends() {
        let table = Table::new()
            .with_column("a", ints(&[1, 2]))
            .unwrap()
            .with_column("b", ints(&[3, 4]))
            .unwrap();

        let table = table.assign("a", ints(&[9, 9])).unwrap();
        let table = table.assign("c", ints(&[5, 6])).unwrap();

        assert_eq!(table.column_names(), vec!["a", "b", "c"]);
        assert_eq!(table.column("a").unwrap().values, ints(&[9, 9]));
        assert!(table.assign("d", ints(&[1])).is_err());
    }

    #[test]
    fn test_serde_preserves_column_order() {
        let json = r#"{"zeta":[1,2],"alpha":["a","b"]}"#;
        let table: Table = serde_json::from_str(json).unwrap();

        assert_eq!(table.column_names(), vec!["zeta", "alpha"]);
        assert_eq!(serde_json::to_string(&table).unwrap(), json);
    }

    #[test]
    fn test_deserialize_rejects_ragged_columns() {
        let result = serde_json::from_str::<Table>(r#"{"a":[1,2],"b":[1]}"#);
        assert!(result.is_err());
    }
}
