//! Error types for tables and schemas.
//!
//! This module defines the errors raised while building tables and while
//! resolving schema definitions into their canonical constraint-set form.

use thiserror::Error;

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Main error type for core operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// A column does not have the table's row count
    #[error("Column '{column}' has {actual} values, expected {expected}")]
    LengthMismatch {
        /// Column name
        column: String,
        /// Row count of the table
        expected: usize,
        /// Number of values supplied
        actual: usize,
    },

    /// The same column name appears twice
    #[error("Duplicate column: {0}")]
    DuplicateColumn(String),

    /// A schema definition cannot be resolved into a constraint set
    #[error("Unrecognized schema: {0}")]
    UnrecognizedSchema(String),

    /// A regex check carries an invalid pattern
    #[error("Invalid regex pattern for column '{column}': {error}")]
    InvalidRegex {
        /// Column name
        column: String,
        /// Regex compilation error
        error: String,
    },
}

impl CoreError {
    /// Creates a new unrecognized schema error.
    pub fn unrecognized(message: impl Into<String>) -> Self {
        Self::UnrecognizedSchema(message.into())
    }
}
