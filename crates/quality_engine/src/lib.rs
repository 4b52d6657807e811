//! # Quality Engine
//!
//! Validation engine for tables. This crate checks a [`Table`] against a
//! [`DataFrameSchema`] and reports every violation as a [`FailureCase`]:
//!
//! - Structure checks (column presence, unexpected columns)
//! - Column checks (dtype, nullability, uniqueness)
//! - Value checks (comparisons, membership, string checks, custom checks)
//!
//! Violations are returned through two signals: [`EngineError::StrictViolation`]
//! stops at the first failing check, [`EngineError::BatchedViolations`]
//! carries all of them.
//!
//! ## Example
//!
//! ```rust
//! use quality_core::{ColumnSchema, DataFrameSchema, DataValue, Table};
//! use quality_engine::SchemaValidator;
//!
//! let schema = DataFrameSchema::new().column(ColumnSchema::new("id"));
//! let table = Table::new().with_column("id", vec![DataValue::Int(1)]).unwrap();
//!
//! let validated = SchemaValidator::new().validate(&schema, &table, true);
//! assert!(validated.is_ok());
//! ```
//!
//! [`Table`]: quality_core::Table
//! [`DataFrameSchema`]: quality_core::DataFrameSchema
//! [`FailureCase`]: quality_core::FailureCase

mod checks;
mod engine;
mod error;
mod structure;

pub use checks::*;
pub use engine::*;
pub use error::*;
pub use structure::*;
