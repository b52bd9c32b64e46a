//! Instructor salary report: per-department statistics as
//! `dept_salary_stats.csv` plus the composite chart `dept_salary_stats.png`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use registrar_core::CsvSink;
use registrar_db::{DbConfig, Session};
use tracing::info;

use crate::chart;

#[derive(Args, Debug)]
pub struct SalaryArgs {
    /// Output directory for the report.
    #[arg(long = "out", value_name = "DIR", default_value = ".")]
    pub out_dir: PathBuf,
}

pub async fn run_salary(args: SalaryArgs) -> Result<()> {
    let config = DbConfig::load()?;
    let session = Session::connect(&config).await?;
    let result = export_salary(&session, &args.out_dir).await;
    session.close().await;
    result
}

async fn export_salary(session: &Session, out_dir: &Path) -> Result<()> {
    let stats = session.fetch_salary_stats().await?;

    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("creating output directory {}", out_dir.display()))?;
    let mut sink = CsvSink::create(
        out_dir.join("dept_salary_stats.csv"),
        &[
            "dept_name",
            "instructors",
            "median_salary",
            "average_salary",
            "stddev_salary",
        ],
    )?;
    for stat in &stats {
        sink.write_row([
            stat.dept_name.clone(),
            stat.instructors.to_string(),
            format!("{:.2}", stat.median),
            format!("{:.2}", stat.average),
            format!("{:.2}", stat.stddev),
        ])?;
    }
    let csv_path = sink.finish()?;

    let png_path = out_dir.join("dept_salary_stats.png");
    chart::salary_chart(&png_path, &stats)?;

    info!(
        departments = stats.len(),
        csv = %csv_path.display(),
        chart = %png_path.display(),
        "salary statistics exported"
    );
    Ok(())
}
