//! Section schedules: the `section` × `time_slot` join, folded into typed
//! [`Section`] values.

use chrono::NaiveTime;
use registrar_core::{MeetingSlot, ReportError, Result, Section, Semester, Weekday};

use crate::{query_err, Session};

// A time_slot_id can name several weekly meetings (one row per day), and a
// section may reference no slot at all; the left join keeps those sections.
// NUMERIC schema columns are cast in SQL so rows decode as plain integers.
const SECTION_SCHEDULE: &str = r#"
select s.course_id, s.sec_id, s.semester, s.year::int as year,
       s.building, s.room_number,
       t.day, t.start_hr::int as start_hr, t.start_min::int as start_min,
       t.end_hr::int as end_hr, t.end_min::int as end_min
from section as s
left join time_slot as t on s.time_slot_id = t.time_slot_id
order by s.year, s.semester, s.course_id, s.sec_id, t.day, t.start_hr, t.start_min
"#;

#[derive(Debug, sqlx::FromRow)]
struct ScheduleRow {
    course_id: String,
    sec_id: String,
    semester: String,
    year: i32,
    building: Option<String>,
    room_number: Option<String>,
    day: Option<String>,
    start_hr: Option<i32>,
    start_min: Option<i32>,
    end_hr: Option<i32>,
    end_min: Option<i32>,
}

impl Session {
    /// Every section together with its weekly meeting slots.
    ///
    /// A section whose `time_slot_id` matches nothing comes back with zero
    /// meetings rather than disappearing from the result.
    pub async fn fetch_sections(&self) -> Result<Vec<Section>> {
        let rows: Vec<ScheduleRow> = sqlx::query_as(SECTION_SCHEDULE)
            .fetch_all(self.pool())
            .await
            .map_err(query_err("section_schedule"))?;
        group_sections(rows)
    }
}

/// Fold the ordered join rows into one `Section` per
/// (course id, section id, semester, year).
fn group_sections(rows: Vec<ScheduleRow>) -> Result<Vec<Section>> {
    let mut sections: Vec<Section> = Vec::new();
    for row in rows {
        let semester = Semester::parse(&row.semester)?;
        let starts_new = match sections.last() {
            Some(last) => {
                last.id_key() != (row.course_id.as_str(), row.sec_id.as_str())
                    || last.term() != (row.year, semester)
            }
            None => true,
        };
        if starts_new {
            sections.push(Section::new(
                row.course_id.clone(),
                row.sec_id.clone(),
                semester,
                row.year,
            ));
        }
        if let (Some(section), Some(slot)) = (sections.last_mut(), meeting_from_row(&row)?) {
            section.meetings.push(slot);
        }
    }
    Ok(sections)
}

/// The row's meeting slot, or `None` when the left join matched nothing.
fn meeting_from_row(row: &ScheduleRow) -> Result<Option<MeetingSlot>> {
    let Some(day) = row.day.as_deref() else {
        return Ok(None);
    };
    let day = Weekday::parse(day)?;
    let (start, end) = match (row.start_hr, row.start_min, row.end_hr, row.end_min) {
        (Some(sh), Some(sm), Some(eh), Some(em)) => {
            let start = clock_time(sh, sm).ok_or_else(|| bad_time(row, sh, sm))?;
            let end = clock_time(eh, em).ok_or_else(|| bad_time(row, eh, em))?;
            (start, end)
        }
        _ => {
            return Err(ReportError::data(
                format!("time slot for {}-{}", row.course_id, row.sec_id),
                "incomplete start/end time",
            ))
        }
    };
    let slot =
        MeetingSlot::new(day, start, end)?.with_room(row.building.clone(), row.room_number.clone());
    Ok(Some(slot))
}

fn clock_time(hr: i32, min: i32) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(u32::try_from(hr).ok()?, u32::try_from(min).ok()?, 0)
}

fn bad_time(row: &ScheduleRow, hr: i32, min: i32) -> ReportError {
    ReportError::data(
        format!("time slot for {}-{}", row.course_id, row.sec_id),
        format!("{hr}:{min} is not a clock time"),
    )
}
