//! Schema metadata report: every public table's columns, types, and key
//! constraints, as `table_info.csv`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use registrar_core::CsvSink;
use registrar_db::{DbConfig, Session};
use tracing::info;

#[derive(Args, Debug)]
pub struct MetadataArgs {
    /// Output directory for the report.
    #[arg(long = "out", value_name = "DIR", default_value = ".")]
    pub out_dir: PathBuf,
}

pub async fn run_metadata(args: MetadataArgs) -> Result<()> {
    let config = DbConfig::load()?;
    let session = Session::connect(&config).await?;
    let result = export_metadata(&session, &args.out_dir).await;
    session.close().await;
    result
}

async fn export_metadata(session: &Session, out_dir: &Path) -> Result<()> {
    let columns = session.fetch_table_columns().await?;

    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("creating output directory {}", out_dir.display()))?;
    let mut sink = CsvSink::create(
        out_dir.join("table_info.csv"),
        &["table_name", "column_name", "data_type", "constraints"],
    )?;
    for column in &columns {
        sink.write_row([
            column.table_name.as_str(),
            column.column_name.as_str(),
            column.data_type.as_str(),
            column.constraints.as_deref().unwrap_or(""),
        ])?;
    }
    let path = sink.finish()?;

    info!(columns = columns.len(), path = %path.display(), "table metadata exported");
    Ok(())
}
