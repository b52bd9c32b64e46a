pub mod error;
pub mod export;
pub mod overlap;
pub mod section;

pub use error::{ReportError, Result};
pub use export::CsvSink;
pub use overlap::{find_overlaps, section_conflict, slot_overlap, OverlapPair, OverlapWindow};
pub use section::{format_hhmm, MeetingSlot, Section, Semester, Weekday};
