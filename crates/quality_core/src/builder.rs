//! Builder pattern for creating schemas.
//!
//! This module provides a fluent API for constructing [`DataFrameSchema`]s
//! and their [`ColumnSchema`]s in code.

use crate::{Check, ColumnSchema, DataFrameSchema, DataType};

impl DataFrameSchema {
    /// Creates an empty, non-strict schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the schema name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Adds a column.
    pub fn column(mut self, column: ColumnSchema) -> Self {
        self.columns.push(column);
        self
    }

    /// Adds multiple columns.
    pub fn columns(mut self, columns: Vec<ColumnSchema>) -> Self {
        self.columns.extend(columns);
        self
    }

    /// Sets whether columns outside the schema are rejected.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

impl ColumnSchema {
    /// Creates a required, non-nullable column without checks.
    ///
    /// # Example
    ///
    /// ```rust
    /// use quality_core::{Check, ColumnSchema, DataType};
    ///
    /// let column = ColumnSchema::new("column2")
    ///     .dtype(DataType::Float64)
    ///     .check(Check::Lt((-1.2).into()));
    /// assert!(!column.nullable);
    /// ```
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dtype: None,
            nullable: false,
            required: true,
            unique: false,
            checks: Vec::new(),
        }
    }

    /// Sets the expected dtype.
    pub fn dtype(mut self, dtype: DataType) -> Self {
        self.dtype = Some(dtype);
        self
    }

    /// Sets whether null values are allowed.
    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Sets whether the column must be present.
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Sets whether values must be unique.
    pub fn unique(mut self, unique: bool) -> Self {
        self.unique = unique;
        self
    }

    /// Adds a check.
    pub fn check(mut self, check: Check) -> Self {
        self.checks.push(check);
        self
    }

    /// Adds multiple checks.
    pub fn checks(mut self, checks: Vec<Check>) -> Self {
        self.checks.extend(checks);
        self
    }
}
