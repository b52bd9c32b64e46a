use std::fmt;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::{ReportError, Result};

/// Day of the week a section meets.
///
/// The university schema stores single-letter day codes (`M`, `T`, `W`,
/// `R`, `F`, `S`, `U`); full and three-letter English names parse too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub fn parse(value: &str) -> Result<Self> {
        let v = value.trim();
        let day = match v {
            "M" => Weekday::Monday,
            "T" => Weekday::Tuesday,
            "W" => Weekday::Wednesday,
            "R" => Weekday::Thursday,
            "F" => Weekday::Friday,
            "S" => Weekday::Saturday,
            "U" => Weekday::Sunday,
            other => match other.to_ascii_lowercase().as_str() {
                "mon" | "monday" => Weekday::Monday,
                "tue" | "tuesday" => Weekday::Tuesday,
                "wed" | "wednesday" => Weekday::Wednesday,
                "thu" | "thursday" => Weekday::Thursday,
                "fri" | "friday" => Weekday::Friday,
                "sat" | "saturday" => Weekday::Saturday,
                "sun" | "sunday" => Weekday::Sunday,
                _ => {
                    return Err(ReportError::data(
                        "day of week",
                        format!("unrecognized value '{v}'"),
                    ))
                }
            },
        };
        Ok(day)
    }

    /// Single-letter code as stored in the schema.
    pub fn code(&self) -> &'static str {
        match self {
            Weekday::Monday => "M",
            Weekday::Tuesday => "T",
            Weekday::Wednesday => "W",
            Weekday::Thursday => "R",
            Weekday::Friday => "F",
            Weekday::Saturday => "S",
            Weekday::Sunday => "U",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        };
        f.write_str(name)
    }
}

/// Academic term within a year, ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Semester {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Semester {
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "spring" => Ok(Semester::Spring),
            "summer" => Ok(Semester::Summer),
            "fall" => Ok(Semester::Fall),
            "winter" => Ok(Semester::Winter),
            other => Err(ReportError::data(
                "semester",
                format!("unrecognized value '{other}'"),
            )),
        }
    }
}

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Semester::Spring => "Spring",
            Semester::Summer => "Summer",
            Semester::Fall => "Fall",
            Semester::Winter => "Winter",
        };
        f.write_str(name)
    }
}

/// One weekly meeting: a weekday plus a half-open wall-clock range.
///
/// Room data is informational only and never participates in overlap tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingSlot {
    pub day: Weekday,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub building: Option<String>,
    pub room: Option<String>,
}

impl MeetingSlot {
    /// Build a slot, rejecting empty or inverted ranges.
    pub fn new(day: Weekday, start: NaiveTime, end: NaiveTime) -> Result<Self> {
        if start >= end {
            return Err(ReportError::data(
                "meeting slot",
                format!(
                    "start {} is not before end {}",
                    format_hhmm(start),
                    format_hhmm(end)
                ),
            ));
        }
        Ok(Self {
            day,
            start,
            end,
            building: None,
            room: None,
        })
    }

    pub fn with_room(mut self, building: Option<String>, room: Option<String>) -> Self {
        self.building = building;
        self.room = room;
        self
    }
}

/// A scheduled offering of a course, keyed by
/// (course id, section id, semester, year).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub course_id: String,
    pub sec_id: String,
    pub semester: Semester,
    pub year: i32,
    pub meetings: Vec<MeetingSlot>,
}

impl Section {
    pub fn new(
        course_id: impl Into<String>,
        sec_id: impl Into<String>,
        semester: Semester,
        year: i32,
    ) -> Self {
        Self {
            course_id: course_id.into(),
            sec_id: sec_id.into(),
            semester,
            year,
            meetings: Vec::new(),
        }
    }

    pub fn with_meetings(mut self, meetings: Vec<MeetingSlot>) -> Self {
        self.meetings = meetings;
        self
    }

    /// Scheduling period this section belongs to.
    pub fn term(&self) -> (i32, Semester) {
        (self.year, self.semester)
    }

    /// Identifier pair used for natural ordering within a term.
    pub fn id_key(&self) -> (&str, &str) {
        (&self.course_id, &self.sec_id)
    }
}

/// Wall-clock time as `HH:MM`, the format used in every report.
pub fn format_hhmm(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_weekday_parses_schema_codes() {
        assert_eq!(Weekday::parse("M").unwrap(), Weekday::Monday);
        assert_eq!(Weekday::parse("R").unwrap(), Weekday::Thursday);
        assert_eq!(Weekday::parse("U").unwrap(), Weekday::Sunday);
    }

    #[test]
    fn test_weekday_parses_names() {
        assert_eq!(Weekday::parse("Monday").unwrap(), Weekday::Monday);
        assert_eq!(Weekday::parse("wed").unwrap(), Weekday::Wednesday);
        assert_eq!(Weekday::parse(" friday ").unwrap(), Weekday::Friday);
    }

    #[test]
    fn test_weekday_rejects_garbage() {
        assert!(Weekday::parse("Funday").is_err());
        assert!(Weekday::parse("").is_err());
    }

    #[test]
    fn test_weekday_code_round_trip() {
        for day in [
            Weekday::Monday,
            Weekday::Tuesday,
            Weekday::Wednesday,
            Weekday::Thursday,
            Weekday::Friday,
            Weekday::Saturday,
            Weekday::Sunday,
        ] {
            assert_eq!(Weekday::parse(day.code()).unwrap(), day);
        }
    }

    #[test]
    fn test_semester_parse_is_case_insensitive() {
        assert_eq!(Semester::parse("fall").unwrap(), Semester::Fall);
        assert_eq!(Semester::parse("SPRING").unwrap(), Semester::Spring);
        assert!(Semester::parse("autumn").is_err());
    }

    #[test]
    fn test_semester_chronological_order() {
        assert!(Semester::Spring < Semester::Summer);
        assert!(Semester::Summer < Semester::Fall);
        assert!(Semester::Fall < Semester::Winter);
    }

    #[test]
    fn test_meeting_slot_rejects_inverted_range() {
        assert!(MeetingSlot::new(Weekday::Monday, t(10, 0), t(9, 0)).is_err());
        assert!(MeetingSlot::new(Weekday::Monday, t(10, 0), t(10, 0)).is_err());
        assert!(MeetingSlot::new(Weekday::Monday, t(9, 0), t(10, 0)).is_ok());
    }

    #[test]
    fn test_format_hhmm_zero_pads() {
        assert_eq!(format_hhmm(t(9, 5)), "09:05");
        assert_eq!(format_hhmm(t(14, 30)), "14:30");
    }

    #[test]
    fn test_section_term_and_id_key() {
        let section = Section::new("CS-101", "1", Semester::Fall, 2024);
        assert_eq!(section.term(), (2024, Semester::Fall));
        assert_eq!(section.id_key(), ("CS-101", "1"));
        assert!(section.meetings.is_empty());
    }
}
