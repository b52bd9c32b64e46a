//! Section time-overlap report: every conflicting same-term pair, written to
//! `overlapping_sections.csv` in the working directory.

use anyhow::Result;
use registrar_core::{find_overlaps, format_hhmm, CsvSink};
use registrar_db::{DbConfig, Session};
use tracing::info;

const OUTPUT: &str = "overlapping_sections.csv";

const HEADER: [&str; 11] = [
    "day",
    "course_id_1",
    "sec_id_1",
    "year_1",
    "semester_1",
    "course_id_2",
    "sec_id_2",
    "year_2",
    "semester_2",
    "overlap_time_start",
    "overlap_time_end",
];

pub async fn run_overlap() -> Result<()> {
    let config = DbConfig::load()?;
    let session = Session::connect(&config).await?;
    let result = export_overlaps(&session).await;
    session.close().await;
    result
}

async fn export_overlaps(session: &Session) -> Result<()> {
    let sections = session.fetch_sections().await?;
    let pairs = find_overlaps(&sections);

    let mut sink = CsvSink::create(OUTPUT, &HEADER)?;
    for pair in &pairs {
        // pairs are same-term, so both year/semester columns carry the
        // partition key
        sink.write_row([
            pair.day.to_string(),
            pair.course_id_1.clone(),
            pair.sec_id_1.clone(),
            pair.year.to_string(),
            pair.semester.to_string(),
            pair.course_id_2.clone(),
            pair.sec_id_2.clone(),
            pair.year.to_string(),
            pair.semester.to_string(),
            format_hhmm(pair.window.start),
            format_hhmm(pair.window.end),
        ])?;
    }
    let path = sink.finish()?;

    info!(
        sections = sections.len(),
        pairs = pairs.len(),
        path = %path.display(),
        "overlapping sections exported"
    );
    Ok(())
}
