//! # Quality Report Core
//!
//! Core data structures for row quality reports.
//!
//! This crate provides the building blocks shared by the validation engine
//! and the report layer: in-memory tables, schemas, failure records and the
//! report options.
//!
//! ## Key Concepts
//!
//! - **Table**: ordered named columns of equal length
//! - **DataFrameSchema**: the canonical constraint set evaluated against a table
//! - **ModelDefinition**: a declarative, field-style schema form
//! - **FailureCase / FailureRecord**: one constraint violation, raw and normalized
//! - **Options**: output column names and status labels
//!
//! ## Example
//!
//! ```rust
//! use quality_core::{Check, ColumnSchema, DataFrameSchema, DataType, DataValue, Table};
//!
//! let schema = DataFrameSchema::new()
//!     .column(ColumnSchema::new("column1").dtype(DataType::Int64).check(Check::Le(10.into())));
//!
//! let table = Table::new()
//!     .with_column("column1", vec![DataValue::Int(9), DataValue::Int(4)])
//!     .unwrap();
//!
//! assert_eq!(schema.column_names(), vec!["column1"]);
//! assert_eq!(table.num_rows(), 2);
//! ```

pub mod builder;
pub mod error;
pub mod failure;
pub mod options;
pub mod schema;
pub mod table;
pub mod value;

pub use error::*;
pub use failure::*;
pub use options::*;
pub use schema::*;
pub use table::*;
pub use value::*;
