//! # Quality Report
//!
//! Row-level quality reports for tables. Instead of failing on the first
//! schema violation, the [`DataFrameValidator`] annotates every row with:
//!
//! - an issues column, listing each violated check as
//!   `Column <column>: check`, joined by `" | "`
//! - a status column, `Valid` or `Invalid`
//!
//! Failures that concern a whole column, such as a missing column or a wrong
//! dtype, are attributed to every row.
//!
//! ## Example
//!
//! ```rust
//! use quality_core::{Check, ColumnSchema, DataFrameSchema, DataValue, Table};
//! use quality_report::DataFrameValidator;
//!
//! let schema = DataFrameSchema::new()
//!     .column(ColumnSchema::new("column3").check(Check::StrStartswith("value_".into())));
//! let table = Table::new()
//!     .with_column("column3", vec!["value_1".into(), "value1".into()])
//!     .unwrap();
//!
//! let report = DataFrameValidator::new().validate(&schema, table).unwrap();
//! let issues = report.column("quality_issues").unwrap();
//! assert_eq!(
//!     issues.values,
//!     vec![
//!         DataValue::from("None"),
//!         DataValue::from("Column <column3>: str_startswith('value_')"),
//!     ]
//! );
//! ```

mod error;
mod parser;
mod validator;

pub use error::*;
pub use parser::*;
pub use validator::*;
