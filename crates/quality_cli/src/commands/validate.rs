use anyhow::{Context, Result};
use quality_core::ReportOptions;
use quality_engine::EngineError;
use quality_parser::{parse_options_file, parse_schema_file, parse_table_file};
use quality_report::{DataFrameValidator, ReportError};
use std::path::Path;
use tracing::info;

use crate::output;

/// Command-line flags that take precedence over the options file.
pub struct Overrides {
    pub no_report: bool,
    pub strict: bool,
    pub issues_column: Option<String>,
    pub status_column: Option<String>,
}

impl Overrides {
    fn apply(self, options: &mut ReportOptions) {
        if self.no_report {
            options.quality_report = false;
        }
        if self.strict {
            options.lazy = false;
        }
        if let Some(issues) = self.issues_column {
            options.columns.issues = issues;
        }
        if let Some(status) = self.status_column {
            options.columns.status = status;
        }
    }
}

pub fn execute(
    schema_path: &str,
    data_path: &str,
    config_path: Option<&str>,
    overrides: Overrides,
    format: &str,
) -> Result<()> {
    info!("Validating data: {}", data_path);
    info!("Schema: {}", schema_path);

    let document = parse_schema_file(Path::new(schema_path))
        .with_context(|| format!("Failed to parse schema file: {}", schema_path))?;

    let table = parse_table_file(Path::new(data_path))
        .with_context(|| format!("Failed to parse data file: {}", data_path))?;

    let mut options = match config_path {
        Some(path) => parse_options_file(Path::new(path))
            .with_context(|| format!("Failed to parse options file: {}", path))?,
        None => ReportOptions::default(),
    };
    overrides.apply(&mut options);

    info!(
        "Quality report: {}, lazy: {}",
        options.quality_report, options.lazy
    );
    info!(
        "Loaded {} row(s) with {} column(s)",
        table.num_rows(),
        table.num_columns()
    );

    let validator = DataFrameValidator::from_options(&options);

    match validator.validate(document, table) {
        Ok(validated) if options.quality_report => {
            output::print_quality_report(&validated, &options, format)
        }
        Ok(validated) => output::print_validated_table(&validated, format),
        Err(ReportError::Engine(
            error @ (EngineError::StrictViolation(_) | EngineError::BatchedViolations(_)),
        )) => {
            output::print_violation(&error, format)?;
            std::process::exit(1);
        }
        Err(error) => Err(error).context("Validation failed"),
    }
}
