//! Error types for report generation.

use quality_core::CoreError;
use quality_engine::EngineError;
use thiserror::Error;

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Errors that can occur while building a quality report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Error raised by the validation engine, passed through unchanged
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// A failure record points past the end of the table
    #[error("Failure record references row {row}, but the table has {rows} row(s)")]
    ReferenceOutOfRange { row: usize, rows: usize },

    /// The report columns could not be assigned onto the table
    #[error("Failed to assign report columns: {0}")]
    Table(#[from] CoreError),
}

impl ReportError {
    /// Returns the engine error, if this is one.
    pub fn as_engine_error(&self) -> Option<&EngineError> {
        match self {
            ReportError::Engine(e) => Some(e),
            _ => None,
        }
    }
}
