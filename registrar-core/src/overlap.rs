//! Pairwise detection of conflicting section meeting times.
//!
//! The detector is pure: it takes typed [`Section`] values and produces
//! [`OverlapPair`]s, so the whole algorithm is testable without a database.

use std::collections::BTreeMap;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::section::{MeetingSlot, Section, Semester, Weekday};

/// Half-open intersection of two conflicting time ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlapWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

/// One reported conflict between two sections of the same term.
///
/// Identifiers are stored in natural order: `(course_id_1, sec_id_1)`
/// sorts before `(course_id_2, sec_id_2)`, so the unordered pair has a
/// single canonical representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlapPair {
    pub day: Weekday,
    pub course_id_1: String,
    pub sec_id_1: String,
    pub course_id_2: String,
    pub sec_id_2: String,
    pub semester: Semester,
    pub year: i32,
    pub window: OverlapWindow,
}

/// Intersection of two meeting slots.
///
/// `None` unless the slots share a weekday and their `[start, end)` ranges
/// intersect. Equal slots intersect; back-to-back slots (one ending exactly
/// when the other starts) do not.
pub fn slot_overlap(a: &MeetingSlot, b: &MeetingSlot) -> Option<OverlapWindow> {
    if a.day != b.day {
        return None;
    }
    if a.start < b.end && b.start < a.end {
        Some(OverlapWindow {
            start: a.start.max(b.start),
            end: a.end.min(b.end),
        })
    } else {
        None
    }
}

/// First conflicting (weekday, window) between two sections, if any.
///
/// Sections in different terms never conflict. Slot pairs are scanned in
/// declaration order and the first hit wins, so a section pair yields one
/// conflict no matter how many of its slots collide.
pub fn section_conflict(a: &Section, b: &Section) -> Option<(Weekday, OverlapWindow)> {
    if a.term() != b.term() {
        return None;
    }
    for slot_a in &a.meetings {
        for slot_b in &b.meetings {
            if let Some(window) = slot_overlap(slot_a, slot_b) {
                return Some((slot_a.day, window));
            }
        }
    }
    None
}

/// All conflicting unordered section pairs across `sections`.
///
/// Sections are partitioned by (year, semester) and compared pairwise within
/// each partition. The result is deterministic for a given dataset
/// regardless of input order: partitions come out chronologically, and pairs
/// within a partition follow the two section identifiers' natural ordering.
pub fn find_overlaps(sections: &[Section]) -> Vec<OverlapPair> {
    let mut partitions: BTreeMap<(i32, Semester), Vec<&Section>> = BTreeMap::new();
    for section in sections {
        partitions.entry(section.term()).or_default().push(section);
    }

    let mut pairs = Vec::new();
    for ((year, semester), mut members) in partitions {
        members.sort_by(|a, b| a.id_key().cmp(&b.id_key()));
        for i in 0..members.len() {
            for j in (i + 1)..members.len() {
                if let Some((day, window)) = section_conflict(members[i], members[j]) {
                    pairs.push(OverlapPair {
                        day,
                        course_id_1: members[i].course_id.clone(),
                        sec_id_1: members[i].sec_id.clone(),
                        course_id_2: members[j].course_id.clone(),
                        sec_id_2: members[j].sec_id.clone(),
                        semester,
                        year,
                        window,
                    });
                }
            }
        }
    }

    debug!(
        sections = sections.len(),
        pairs = pairs.len(),
        "overlap scan complete"
    );
    pairs
}
