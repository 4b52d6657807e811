mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "qreport")]
#[command(version, about = "Row-level data quality reports", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a data file against a schema and annotate every row
    Validate {
        /// Path to the schema file (YAML, TOML or JSON)
        schema: String,

        /// Path to the data file (column-oriented JSON or YAML)
        data: String,

        /// Path to a report options file (YAML, TOML or JSON)
        #[arg(short, long)]
        config: Option<String>,

        /// Fail on violations instead of annotating rows
        #[arg(long)]
        no_report: bool,

        /// Stop at the first violation instead of collecting all of them
        #[arg(short, long)]
        strict: bool,

        /// Name of the issues column
        #[arg(long)]
        issues_column: Option<String>,

        /// Name of the status column
        #[arg(long)]
        status_column: Option<String>,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Check a schema file without validating data
    Check {
        /// Path to the schema file (YAML, TOML or JSON)
        schema: String,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if std::env::var("NO_COLOR").is_ok() {
        colored::control::set_override(false);
    }

    // Initialize tracing
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    // Execute command
    match cli.command {
        Commands::Validate {
            schema,
            data,
            config,
            no_report,
            strict,
            issues_column,
            status_column,
            format,
        } => commands::validate::execute(
            &schema,
            &data,
            config.as_deref(),
            commands::validate::Overrides {
                no_report,
                strict,
                issues_column,
                status_column,
            },
            &format,
        ),

        Commands::Check { schema, format } => commands::check::execute(&schema, &format),
    }
}
