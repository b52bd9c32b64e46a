//! Instructor salary statistics by department.

use registrar_core::Result;

use crate::{query_err, Session};

// salary is NUMERIC in the schema; the float8 casts keep decoding on f64.
// percentile_cont over a float8 ordering returns float8 directly.
const SALARY_STATS: &str = r#"
select dept_name,
       count(distinct id) as instructors,
       percentile_cont(0.5) within group (order by salary::float8) as median_salary,
       avg(salary)::float8 as average_salary,
       stddev_pop(salary)::float8 as stddev_salary
from instructor
group by dept_name
order by dept_name
"#;

#[derive(Debug, sqlx::FromRow)]
struct SalaryRaw {
    dept_name: String,
    instructors: i64,
    median_salary: Option<f64>,
    average_salary: Option<f64>,
    stddev_salary: Option<f64>,
}

/// Salary statistics for one department's instructors.
#[derive(Debug, Clone, PartialEq)]
pub struct SalaryStats {
    pub dept_name: String,
    pub instructors: i64,
    pub median: f64,
    pub average: f64,
    pub stddev: f64,
}

impl Session {
    /// Instructor count, median, average, and population stddev of salaries
    /// per department, alphabetical by department.
    pub async fn fetch_salary_stats(&self) -> Result<Vec<SalaryStats>> {
        let raw: Vec<SalaryRaw> = sqlx::query_as(SALARY_STATS)
            .fetch_all(self.pool())
            .await
            .map_err(query_err("salary_stats"))?;
        Ok(raw.into_iter().map(typed_stats).collect())
    }
}

// Aggregates come back NULL when no instructor in the group has a salary;
// those render as zero in reports.
fn typed_stats(raw: SalaryRaw) -> SalaryStats {
    SalaryStats {
        dept_name: raw.dept_name,
        instructors: raw.instructors,
        median: raw.median_salary.unwrap_or(0.0),
        average: raw.average_salary.unwrap_or(0.0),
        stddev: raw.stddev_salary.unwrap_or(0.0),
    }
}
