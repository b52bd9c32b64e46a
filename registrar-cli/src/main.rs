//! regreport - university database reporting CLI.
//!
//! One subcommand per reporter:
//! - `metadata`: table/column metadata from the catalog
//! - `salary`: instructor salary statistics by department (CSV + chart)
//! - `enrollment`: enrollment by year and department (CSV + chart)
//!
//! Connection settings come from `DATABASE_URL` / `PG*` environment
//! variables, a `./.env` file, or `./registrar.toml`.

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use registrar_reports::{EnrollmentArgs, MetadataArgs, SalaryArgs};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "regreport",
    author,
    version,
    about = "Reports over a university registrar database",
    long_about = "Exports CSV reports and PNG charts from a university database: table \
                  metadata, instructor salary statistics, and enrollment trends by \
                  department. Each invocation runs exactly one reporter."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Export table/column metadata to table_info.csv
    Metadata(MetadataArgs),
    /// Export instructor salary statistics (CSV + chart)
    Salary(SalaryArgs),
    /// Export enrollment by year and department (CSV + chart)
    Enrollment(EnrollmentArgs),
}

fn init_tracing() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_tracing().ok();
    let cli = Cli::parse();

    match cli.command {
        Commands::Metadata(args) => registrar_reports::run_metadata(args).await?,
        Commands::Salary(args) => registrar_reports::run_salary(args).await?,
        Commands::Enrollment(args) => registrar_reports::run_enrollment(args).await?,
    }
    Ok(())
}
