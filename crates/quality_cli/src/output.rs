use anyhow::Result;
use colored::*;
use quality_core::{DataFrameSchema, ReportOptions, Table};
use quality_engine::EngineError;
use serde_json::json;

pub fn print_quality_report(table: &Table, options: &ReportOptions, format: &str) -> Result<()> {
    match format {
        "json" => print_json_table(table),
        _ => {
            print_text_report(table, options);
            Ok(())
        }
    }
}

pub fn print_validated_table(table: &Table, format: &str) -> Result<()> {
    match format {
        "json" => print_json_table(table),
        _ => {
            println!(
                "\n{} {}",
                "✓".green().bold(),
                "Validation PASSED".green().bold()
            );
            print_table(table, None);
            Ok(())
        }
    }
}

pub fn print_violation(error: &EngineError, format: &str) -> Result<()> {
    match format {
        "json" => {
            let kind = match error {
                EngineError::StrictViolation(_) => "strict_violation",
                EngineError::BatchedViolations(_) => "batched_violations",
                EngineError::UnrecognizedSchemaInput(_) => "unrecognized_schema_input",
            };
            let output = json!({
                "passed": false,
                "error": kind,
                "message": error.to_string(),
                "failure_cases": error.failure_cases().unwrap_or_default(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        _ => {
            eprintln!(
                "\n{} {}",
                "✗".red().bold(),
                "Validation FAILED".red().bold()
            );
            print_error(&error.to_string());
        }
    }
    Ok(())
}

fn print_json_table(table: &Table) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(table)?);
    Ok(())
}

fn print_text_report(table: &Table, options: &ReportOptions) {
    let status_column = options.columns.status.as_str();
    let valid_label = options.status.valid.as_str();

    println!("\n{}", "═".repeat(60));
    println!("{}", "  QUALITY REPORT".bold());
    println!("{}", "═".repeat(60));

    print_table(table, Some((status_column, valid_label)));

    let (valid, invalid) = table
        .column(status_column)
        .map(|column| {
            column
                .values
                .iter()
                .fold((0, 0), |(valid, invalid), value| match value.as_string() {
                    Some(label) if label == valid_label => (valid + 1, invalid),
                    _ => (valid, invalid + 1),
                })
        })
        .unwrap_or((0, 0));

    println!("\n{}", "Summary:".bold());
    println!("  Total rows:     {}", table.num_rows());
    println!("  Valid rows:     {}", valid.to_string().green());
    println!("  Invalid rows:   {}", invalid.to_string().red());
    println!("{}", "═".repeat(60));
}

/// Prints the table as aligned columns, coloring the status column when given.
fn print_table(table: &Table, status: Option<(&str, &str)>) {
    let names = table.column_names();
    let cells: Vec<Vec<String>> = table
        .columns()
        .map(|column| column.values.iter().map(|v| v.to_string()).collect())
        .collect();

    let widths: Vec<usize> = names
        .iter()
        .zip(&cells)
        .map(|(name, values)| {
            values
                .iter()
                .map(|v| v.chars().count())
                .chain(std::iter::once(name.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let header: Vec<String> = names
        .iter()
        .zip(&widths)
        .map(|(name, width)| format!("{:<width$}", name, width = *width).bold().to_string())
        .collect();
    println!("\n  {}", header.join("  "));

    for row in 0..table.num_rows() {
        let line: Vec<String> = names
            .iter()
            .zip(&cells)
            .zip(&widths)
            .map(|((name, values), width)| {
                let cell = format!("{:<width$}", values[row], width = *width);
                match status {
                    Some((column, valid)) if *name == column => {
                        if values[row] == valid {
                            cell.green().to_string()
                        } else {
                            cell.red().to_string()
                        }
                    }
                    _ => cell,
                }
            })
            .collect();
        println!("  {}", line.join("  "));
    }
}

pub fn print_schema_summary(schema: &DataFrameSchema, form: &str, format: &str) -> Result<()> {
    match format {
        "json" => {
            let columns: Vec<_> = schema
                .columns
                .iter()
                .map(|column| {
                    json!({
                        "name": column.name,
                        "dtype": column.dtype.map(|d| d.to_string()),
                        "nullable": column.nullable,
                        "required": column.required,
                        "unique": column.unique,
                        "checks": column.checks.iter().map(|c| c.name()).collect::<Vec<_>>(),
                    })
                })
                .collect();
            let output = json!({
                "name": schema.name,
                "form": form,
                "strict": schema.strict,
                "columns": columns,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        _ => {
            print_success("Schema is valid");

            println!("\nSchema Summary:");
            println!("  Name:     {}", schema.name.as_deref().unwrap_or("N/A"));
            println!("  Form:     {}", form);
            println!("  Strict:   {}", schema.strict);
            println!("  Columns:  {}", schema.columns.len());

            println!("\nColumns:");
            for column in &schema.columns {
                let mut traits = vec![column
                    .dtype
                    .map_or_else(|| "any".to_string(), |d| d.to_string())];
                if column.nullable {
                    traits.push("nullable".to_string());
                }
                if !column.required {
                    traits.push("optional".to_string());
                }
                if column.unique {
                    traits.push("unique".to_string());
                }
                let checks: Vec<String> = column.checks.iter().map(|c| c.name()).collect();
                println!(
                    "  - {} ({}): {}",
                    column.name.bold(),
                    traits.join(", "),
                    if checks.is_empty() {
                        "no checks".to_string()
                    } else {
                        checks.join(", ")
                    }
                );
            }
        }
    }
    Ok(())
}

pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message.green());
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message.red());
}
