//! Parser for quality report inputs (YAML/TOML/JSON formats).
//!
//! This module reads the three inputs of a quality report from text or files:
//! schemas (either as a column list or as a field model), tables in
//! column-oriented form, and report options.
//!
//! # Example
//!
//! ```rust
//! use quality_parser::{parse_schema_yaml, SchemaDocument};
//!
//! let yaml = r#"
//! name: measurements
//! columns:
//!   - name: column1
//!     dtype: int64
//!     checks:
//!       - le: 10
//!   - name: column3
//!     dtype: str
//!     checks:
//!       - str_startswith: value_
//! "#;
//!
//! let document = parse_schema_yaml(yaml).expect("Failed to parse schema");
//! assert!(matches!(document, SchemaDocument::Schema(_)));
//! ```

use quality_core::{CoreError, DataFrameSchema, IntoSchema, ModelDefinition, ReportOptions, Table};
use serde::de::DeserializeOwned;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during parsing.
#[derive(Debug, Error)]
pub enum ParserError {
    /// YAML parsing or deserialization failed
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml_ng::Error),

    /// TOML parsing or deserialization failed
    #[error("Failed to parse TOML: {0}")]
    TomlError(String),

    /// JSON parsing or deserialization failed
    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// File I/O error
    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Unsupported file format
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Invalid file extension
    #[error("Invalid or missing file extension")]
    InvalidExtension,
}

/// Result type alias for parser operations.
pub type Result<T> = std::result::Result<T, ParserError>;

/// Supported file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// YAML format (.yml, .yaml)
    Yaml,
    /// TOML format (.toml)
    Toml,
    /// JSON format (.json)
    Json,
}

/// A parsed schema document.
///
/// Documents with a `columns` list are constraint sets; documents with a
/// `fields` list are field models.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(untagged)]
pub enum SchemaDocument {
    /// Column-list form
    Schema(DataFrameSchema),
    /// Field-model form
    Model(ModelDefinition),
}

impl SchemaDocument {
    /// Returns the schema name, if any.
    pub fn name(&self) -> Option<&str> {
        match self {
            SchemaDocument::Schema(schema) => schema.name.as_deref(),
            SchemaDocument::Model(model) => model.name.as_deref(),
        }
    }
}

impl IntoSchema for SchemaDocument {
    fn into_schema(self) -> std::result::Result<DataFrameSchema, CoreError> {
        match self {
            SchemaDocument::Schema(schema) => schema.into_schema(),
            SchemaDocument::Model(model) => model.into_schema(),
        }
    }
}

impl IntoSchema for &SchemaDocument {
    fn into_schema(self) -> std::result::Result<DataFrameSchema, CoreError> {
        match self {
            SchemaDocument::Schema(schema) => schema.into_schema(),
            SchemaDocument::Model(model) => model.into_schema(),
        }
    }
}

fn from_yaml<T: DeserializeOwned>(content: &str) -> Result<T> {
    Ok(serde_yaml_ng::from_str(content)?)
}

fn from_toml<T: DeserializeOwned>(content: &str) -> Result<T> {
    toml::from_str(content).map_err(|e| ParserError::TomlError(e.to_string()))
}

fn from_json<T: DeserializeOwned>(content: &str) -> Result<T> {
    Ok(serde_json::from_str(content)?)
}

fn from_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;

    match format {
        FileFormat::Yaml => from_yaml(&content),
        FileFormat::Toml => from_toml(&content),
        FileFormat::Json => from_json(&content),
    }
}

/// Parse a schema from a YAML string.
///
/// # Example
///
/// ```rust
/// use quality_parser::{parse_schema_yaml, SchemaDocument};
///
/// let yaml = r#"
/// fields:
///   - name: column1
///     dtype: int64
///     le: 10
/// "#;
///
/// let document = parse_schema_yaml(yaml).unwrap();
/// assert!(matches!(document, SchemaDocument::Model(_)));
/// ```
pub fn parse_schema_yaml(content: &str) -> Result<SchemaDocument> {
    from_yaml(content)
}

/// Parse a schema from a TOML string.
///
/// # Example
///
/// ```rust
/// use quality_parser::parse_schema_toml;
///
/// let toml = r#"
/// [[columns]]
/// name = "column1"
/// checks = [{ le = 10 }]
/// "#;
///
/// let document = parse_schema_toml(toml).unwrap();
/// assert_eq!(document.name(), None);
/// ```
pub fn parse_schema_toml(content: &str) -> Result<SchemaDocument> {
    from_toml(content)
}

/// Parse a schema from a file with automatic format detection.
///
/// # Example
///
/// ```no_run
/// use quality_parser::parse_schema_file;
/// use std::path::Path;
///
/// let document = parse_schema_file(Path::new("schemas/measurements.yml")).unwrap();
/// println!("Loaded schema: {:?}", document.name());
/// ```
pub fn parse_schema_file(path: &Path) -> Result<SchemaDocument> {
    from_file(path)
}

/// Parse a table from a column-oriented JSON object.
///
/// # Example
///
/// ```rust
/// use quality_parser::parse_table_json;
///
/// let table = parse_table_json(r#"{"column1": [9, 4], "column3": ["value_1", null]}"#).unwrap();
/// assert_eq!(table.num_rows(), 2);
/// assert_eq!(table.column_names(), vec!["column1", "column3"]);
/// ```
pub fn parse_table_json(content: &str) -> Result<Table> {
    from_json(content)
}

/// Parse a table from a file with automatic format detection.
///
/// JSON and YAML are accepted; TOML cannot express null values.
pub fn parse_table_file(path: &Path) -> Result<Table> {
    match detect_format(path)? {
        FileFormat::Toml => Err(ParserError::UnsupportedFormat(
            "toml tables are not supported".to_string(),
        )),
        _ => from_file(path),
    }
}

/// Parse report options from a YAML string.
pub fn parse_options_yaml(content: &str) -> Result<ReportOptions> {
    from_yaml(content)
}

/// Parse report options from a TOML string.
///
/// # Example
///
/// ```rust
/// use quality_parser::parse_options_toml;
///
/// let toml = r#"
/// lazy = false
///
/// [columns]
/// issues = "issues"
/// "#;
///
/// let options = parse_options_toml(toml).unwrap();
/// assert!(!options.lazy);
/// assert!(options.quality_report);
/// assert_eq!(options.columns.issues, "issues");
/// assert_eq!(options.columns.status, "quality_status");
/// ```
pub fn parse_options_toml(content: &str) -> Result<ReportOptions> {
    from_toml(content)
}

/// Parse report options from a file with automatic format detection.
pub fn parse_options_file(path: &Path) -> Result<ReportOptions> {
    from_file(path)
}

/// Detect the file format from a path based on its extension.
///
/// # Supported Extensions
///
/// * `.yaml`, `.yml` → `FileFormat::Yaml`
/// * `.toml` → `FileFormat::Toml`
/// * `.json` → `FileFormat::Json`
///
/// # Errors
///
/// Returns `ParserError::InvalidExtension` if the file has no extension.
/// Returns `ParserError::UnsupportedFormat` if the extension is not recognized.
pub fn detect_format(path: &Path) -> Result<FileFormat> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or(ParserError::InvalidExtension)?;

    match extension.to_lowercase().as_str() {
        "yaml" | "yml" => Ok(FileFormat::Yaml),
        "toml" => Ok(FileFormat::Toml),
        "json" => Ok(FileFormat::Json),
        other => Err(ParserError::UnsupportedFormat(other.to_string())),
    }
}
