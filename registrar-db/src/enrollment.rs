//! Enrollment aggregates over the course/takes/student join.

use registrar_core::{Result, Semester};

use crate::{query_err, Session};

const ENROLLMENT_BY_TERM: &str = r#"
select t.year::int as year, t.semester, c.dept_name,
       count(distinct c.course_id) as courses_offered,
       count(distinct s.id) as students_enrolled
from course as c
join takes as t on t.course_id = c.course_id
join student as s on s.id = t.id
group by t.year, t.semester, c.dept_name
order by t.year, t.semester, c.dept_name
"#;

const DEPT_ENROLLMENT: &str = r#"
select c.dept_name, t.year::int as year, t.semester,
       count(distinct s.id) as students_enrolled
from course as c
join takes as t on t.course_id = c.course_id
join student as s on s.id = t.id
where c.dept_name = any($1)
group by c.dept_name, t.year, t.semester
order by c.dept_name, t.year, t.semester
"#;

const DEPARTMENTS: &str = "select dept_name from department order by dept_name";

const ENROLLMENT_YEARS: &str = "select distinct year::int as year from takes order by year";

#[derive(Debug, sqlx::FromRow)]
struct EnrollmentRaw {
    year: i32,
    semester: String,
    dept_name: String,
    courses_offered: i64,
    students_enrolled: i64,
}

#[derive(Debug, sqlx::FromRow)]
struct DeptEnrollmentRaw {
    dept_name: String,
    year: i32,
    semester: String,
    students_enrolled: i64,
}

/// Offered-course and enrolled-student counts for one
/// (year, semester, department).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentRow {
    pub year: i32,
    pub semester: Semester,
    pub dept_name: String,
    pub courses_offered: i64,
    pub students_enrolled: i64,
}

/// Enrolled-student count for one department in one term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeptEnrollmentRow {
    pub dept_name: String,
    pub year: i32,
    pub semester: Semester,
    pub students_enrolled: i64,
}

impl Session {
    /// Courses offered and students enrolled, per term and department.
    pub async fn fetch_enrollment(&self) -> Result<Vec<EnrollmentRow>> {
        let raw: Vec<EnrollmentRaw> = sqlx::query_as(ENROLLMENT_BY_TERM)
            .fetch_all(self.pool())
            .await
            .map_err(query_err("enrollment_by_term"))?;
        let mut rows = raw
            .into_iter()
            .map(typed_enrollment)
            .collect::<Result<Vec<_>>>()?;
        // SQL sorts semesters alphabetically; re-sort chronologically
        rows.sort_by(|a, b| {
            (a.year, a.semester, &a.dept_name).cmp(&(b.year, b.semester, &b.dept_name))
        });
        Ok(rows)
    }

    /// Per-term student counts for the named departments.
    pub async fn fetch_department_enrollment(
        &self,
        depts: &[String],
    ) -> Result<Vec<DeptEnrollmentRow>> {
        let raw: Vec<DeptEnrollmentRaw> = sqlx::query_as(DEPT_ENROLLMENT)
            .bind(depts)
            .fetch_all(self.pool())
            .await
            .map_err(query_err("department_enrollment"))?;
        let mut rows = raw
            .into_iter()
            .map(typed_dept_enrollment)
            .collect::<Result<Vec<_>>>()?;
        rows.sort_by(|a, b| {
            (&a.dept_name, a.year, a.semester).cmp(&(&b.dept_name, b.year, b.semester))
        });
        Ok(rows)
    }

    /// Every department name, alphabetical.
    pub async fn fetch_departments(&self) -> Result<Vec<String>> {
        sqlx::query_scalar::<_, String>(DEPARTMENTS)
            .fetch_all(self.pool())
            .await
            .map_err(query_err("departments"))
    }

    /// Distinct years with enrollment activity, ascending.
    pub async fn fetch_enrollment_years(&self) -> Result<Vec<i32>> {
        sqlx::query_scalar::<_, i32>(ENROLLMENT_YEARS)
            .fetch_all(self.pool())
            .await
            .map_err(query_err("enrollment_years"))
    }
}

fn typed_enrollment(raw: EnrollmentRaw) -> Result<EnrollmentRow> {
    Ok(EnrollmentRow {
        year: raw.year,
        semester: Semester::parse(&raw.semester)?,
        dept_name: raw.dept_name,
        courses_offered: raw.courses_offered,
        students_enrolled: raw.students_enrolled,
    })
}

fn typed_dept_enrollment(raw: DeptEnrollmentRaw) -> Result<DeptEnrollmentRow> {
    Ok(DeptEnrollmentRow {
        dept_name: raw.dept_name,
        year: raw.year,
        semester: Semester::parse(&raw.semester)?,
        students_enrolled: raw.students_enrolled,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_semester_text_is_parsed_at_the_boundary() {
        let row = typed_enrollment(EnrollmentRaw {
            year: 2018,
            semester: "Spring".to_string(),
            dept_name: "Comp. Sci.".to_string(),
            courses_offered: 4,
            students_enrolled: 120,
        })
        .unwrap();
        assert_eq!(row.semester, Semester::Spring);
        assert_eq!(row.students_enrolled, 120);
    }

    #[test]
    fn test_unknown_semester_is_a_data_error() {
        let err = typed_dept_enrollment(DeptEnrollmentRaw {
            dept_name: "Physics".to_string(),
            year: 2018,
            semester: "Autumn".to_string(),
            students_enrolled: 7,
        })
        .unwrap_err();
        assert!(err.to_string().contains("semester"));
    }
}
