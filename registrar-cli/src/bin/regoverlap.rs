//! regoverlap - section time-overlap detector.
//!
//! No flags beyond help/version: connects, scans every same-term section
//! pair, and writes `overlapping_sections.csv` to the working directory.

use anyhow::{anyhow, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "regoverlap",
    author,
    version,
    about = "Finds same-term sections with overlapping meeting times",
    long_about = "Compares every pair of course sections within each (semester, year) term \
                  and writes the conflicting pairs, with the shared day and the overlap \
                  window, to overlapping_sections.csv in the working directory."
)]
struct Cli {}

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
    let _cli = Cli::parse();
    registrar_reports::run_overlap().await
}
