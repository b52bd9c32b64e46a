//! CSV export with atomic publication.
//!
//! Rows are staged in a temporary file beside the destination and renamed
//! into place by [`CsvSink::finish`], so a crash mid-report never leaves a
//! truncated file behind. Dropping a sink without finishing discards the
//! staged data.

use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{ReportError, Result};

/// Buffered CSV writer bound to a destination path.
pub struct CsvSink {
    writer: csv::Writer<NamedTempFile>,
    dest: PathBuf,
    rows: usize,
}

impl CsvSink {
    /// Open a sink for `dest` and write the header row.
    ///
    /// The staging file lives in the destination's directory so the final
    /// rename stays on one filesystem.
    pub fn create<S: AsRef<str>>(dest: impl Into<PathBuf>, header: &[S]) -> Result<Self> {
        let dest = dest.into();
        let dir = dest
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let staged =
            NamedTempFile::new_in(dir).map_err(|e| ReportError::export(&dest, e.to_string()))?;
        let mut writer = csv::Writer::from_writer(staged);
        writer
            .write_record(header.iter().map(|s| s.as_ref()))
            .map_err(|e| ReportError::export(&dest, e.to_string()))?;
        Ok(Self {
            writer,
            dest,
            rows: 0,
        })
    }

    /// Append one data row.
    pub fn write_row<I, T>(&mut self, row: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        self.writer
            .write_record(row)
            .map_err(|e| ReportError::export(&self.dest, e.to_string()))?;
        self.rows += 1;
        Ok(())
    }

    /// Data rows written so far, not counting the header.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Flush and publish the file at its destination path.
    ///
    /// An empty report still publishes: the result is a header-only file.
    pub fn finish(self) -> Result<PathBuf> {
        let CsvSink { writer, dest, rows } = self;
        let staged = writer
            .into_inner()
            .map_err(|e| ReportError::export(&dest, e.to_string()))?;
        staged
            .persist(&dest)
            .map_err(|e| ReportError::export(&dest, e.to_string()))?;
        debug!(rows, path = %dest.display(), "csv published");
        Ok(dest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_empty_report_publishes_header_only() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("report.csv");
        let sink = CsvSink::create(&dest, &["course_id", "sec_id"]).unwrap();
        assert_eq!(sink.rows(), 0);
        sink.finish().unwrap();
        let content = std::fs::read_to_string(&dest).unwrap();
        assert_eq!(content, "course_id,sec_id\n");
    }

    #[test]
    fn test_rows_written_in_order() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("report.csv");
        let mut sink = CsvSink::create(&dest, &["id", "name"]).unwrap();
        sink.write_row(["10101", "Srinivasan"]).unwrap();
        sink.write_row(["12121", "Wu"]).unwrap();
        assert_eq!(sink.rows(), 2);
        sink.finish().unwrap();
        let content = std::fs::read_to_string(&dest).unwrap();
        assert_eq!(content, "id,name\n10101,Srinivasan\n12121,Wu\n");
    }

    #[test]
    fn test_fields_containing_delimiters_are_quoted() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("report.csv");
        let mut sink = CsvSink::create(&dest, &["dept_name", "building"]).unwrap();
        sink.write_row(["History, Ancient", "Painter"]).unwrap();
        sink.finish().unwrap();
        let content = std::fs::read_to_string(&dest).unwrap();
        assert_eq!(content, "dept_name,building\n\"History, Ancient\",Painter\n");
    }

    #[test]
    fn test_dropped_sink_leaves_no_files() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("report.csv");
        {
            let mut sink = CsvSink::create(&dest, &["id"]).unwrap();
            sink.write_row(["1"]).unwrap();
        }
        assert!(!dest.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_repeated_export_is_byte_identical() {
        let dir = tempdir().unwrap();
        let write = |name: &str| {
            let dest = dir.path().join(name);
            let mut sink = CsvSink::create(&dest, &["day", "course_id"]).unwrap();
            sink.write_row(["Monday", "CS-101"]).unwrap();
            sink.write_row(["Tuesday", "BIO-301"]).unwrap();
            sink.finish().unwrap();
            std::fs::read(&dest).unwrap()
        };
        assert_eq!(write("first.csv"), write("second.csv"));
    }

    #[test]
    fn test_finish_replaces_existing_file() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("report.csv");
        std::fs::write(&dest, "stale contents").unwrap();
        let mut sink = CsvSink::create(&dest, &["id"]).unwrap();
        sink.write_row(["fresh"]).unwrap();
        sink.finish().unwrap();
        let content = std::fs::read_to_string(&dest).unwrap();
        assert_eq!(content, "id\nfresh\n");
    }

    #[test]
    fn test_relative_destination_stages_in_same_directory() {
        // a bare filename has no parent component; staging falls back to "."
        let dir = tempdir().unwrap();
        let old = std::env::current_dir().unwrap();
        std::env::set_current_dir(dir.path()).unwrap();
        let result = CsvSink::create("bare.csv", &["id"]).and_then(CsvSink::finish);
        std::env::set_current_dir(old).unwrap();
        let published = result.unwrap();
        assert_eq!(published, PathBuf::from("bare.csv"));
        assert!(dir.path().join("bare.csv").exists());
    }
}
