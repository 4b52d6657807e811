use anyhow::{Context, Result};
use quality_core::IntoSchema;
use quality_parser::{parse_schema_file, SchemaDocument};
use std::path::Path;
use tracing::info;

use crate::output;

pub fn execute(schema_path: &str, format: &str) -> Result<()> {
    info!("Checking schema: {}", schema_path);

    // Parse the schema file
    let path = Path::new(schema_path);
    let document = parse_schema_file(path)
        .with_context(|| format!("Failed to parse schema file: {}", schema_path))?;

    let form = match &document {
        SchemaDocument::Schema(_) => "column list",
        SchemaDocument::Model(_) => "field model",
    };

    // Resolving checks names, bounds and patterns
    let schema = document
        .into_schema()
        .with_context(|| format!("Invalid schema: {}", schema_path))?;

    output::print_schema_summary(&schema, form, format)
}
