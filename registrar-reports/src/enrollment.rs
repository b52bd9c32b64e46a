//! Enrollment reports.
//!
//! Always writes the overall per-term aggregate (`enrollment_by_year.csv`).
//! On top of that it builds a per-department series over a Spring/Fall axis
//! spanning every enrollment year, with missing terms zero-filled, and
//! writes it as CSV plus a multi-line chart; the file names carry the
//! department selection (`enrollment_all.*` or `enrollment_<slugs>.*`).

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use registrar_core::{CsvSink, Semester};
use registrar_db::{DbConfig, DeptEnrollmentRow, Session};
use tracing::info;

use crate::chart;

#[derive(Args, Debug)]
pub struct EnrollmentArgs {
    /// Departments to report on (repeat the flag or comma-separate).
    /// Default: every department.
    #[arg(long = "dept", value_name = "NAME", value_delimiter = ',')]
    pub depts: Vec<String>,

    /// Output directory for the reports.
    #[arg(long = "out", value_name = "DIR", default_value = ".")]
    pub out_dir: PathBuf,
}

pub async fn run_enrollment(args: EnrollmentArgs) -> Result<()> {
    let config = DbConfig::load()?;
    let session = Session::connect(&config).await?;
    let result = export_enrollment(&session, &args).await;
    session.close().await;
    result
}

async fn export_enrollment(session: &Session, args: &EnrollmentArgs) -> Result<()> {
    let overall = session.fetch_enrollment().await?;
    let departments = session.fetch_departments().await?;
    let selected = select_departments(&args.depts, &departments)?;
    let years = session.fetch_enrollment_years().await?;
    let detail = session.fetch_department_enrollment(&selected).await?;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating output directory {}", args.out_dir.display()))?;

    let mut sink = CsvSink::create(
        args.out_dir.join("enrollment_by_year.csv"),
        &[
            "year",
            "semester",
            "dept_name",
            "courses_offered",
            "students_enrolled",
        ],
    )?;
    for row in &overall {
        sink.write_row([
            row.year.to_string(),
            row.semester.to_string(),
            row.dept_name.clone(),
            row.courses_offered.to_string(),
            row.students_enrolled.to_string(),
        ])?;
    }
    let overall_path = sink.finish()?;

    let axis = term_axis(&years);
    let labels: Vec<String> = axis
        .iter()
        .map(|(year, semester)| format!("{year} {semester}"))
        .collect();
    let series = zero_filled_series(&selected, &axis, &detail);

    let suffix = selection_suffix(&args.depts, &selected);
    let mut sink = CsvSink::create(
        args.out_dir.join(format!("enrollment_{suffix}.csv")),
        &["dept_name", "year", "semester", "students_enrolled"],
    )?;
    for (dept, points) in &series {
        for (&(year, semester), students) in axis.iter().zip(points) {
            sink.write_row([
                dept.clone(),
                year.to_string(),
                semester.to_string(),
                students.to_string(),
            ])?;
        }
    }
    let detail_path = sink.finish()?;

    let png_path = args.out_dir.join(format!("enrollment_{suffix}.png"));
    chart::enrollment_chart(&png_path, &labels, &series)?;

    info!(
        departments = selected.len(),
        terms = axis.len(),
        overall = %overall_path.display(),
        detail = %detail_path.display(),
        chart = %png_path.display(),
        "enrollment exported"
    );
    Ok(())
}

/// Resolve the requested names against what the database has.
///
/// An empty request selects every department. Unknown names fail the run and
/// list the valid ones.
fn select_departments(requested: &[String], known: &[String]) -> Result<Vec<String>> {
    if requested.is_empty() {
        return Ok(known.to_vec());
    }
    let mut selected: Vec<String> = Vec::new();
    for name in requested {
        let name = name.trim();
        match known.iter().find(|k| k.as_str() == name) {
            Some(found) => {
                if !selected.iter().any(|s| s == found) {
                    selected.push(found.clone());
                }
            }
            None => bail!(
                "unknown department '{name}'; valid departments: {}",
                known.join(", ")
            ),
        }
    }
    Ok(selected)
}

/// Spring and Fall of every year from the earliest enrollment year to the
/// latest, in chronological order. Gap years are included so the axis stays
/// evenly spaced.
fn term_axis(years: &[i32]) -> Vec<(i32, Semester)> {
    let (Some(&first), Some(&last)) = (years.iter().min(), years.iter().max()) else {
        return Vec::new();
    };
    (first..=last)
        .flat_map(|year| [(year, Semester::Spring), (year, Semester::Fall)])
        .collect()
}

/// One series per department over `axis`, zero where the department had no
/// enrollment that term.
fn zero_filled_series(
    depts: &[String],
    axis: &[(i32, Semester)],
    rows: &[DeptEnrollmentRow],
) -> Vec<(String, Vec<i64>)> {
    let mut lookup: HashMap<(&str, i32, Semester), i64> = HashMap::new();
    for row in rows {
        lookup.insert(
            (row.dept_name.as_str(), row.year, row.semester),
            row.students_enrolled,
        );
    }
    depts
        .iter()
        .map(|dept| {
            let points = axis
                .iter()
                .map(|&(year, semester)| {
                    lookup
                        .get(&(dept.as_str(), year, semester))
                        .copied()
                        .unwrap_or(0)
                })
                .collect();
            (dept.clone(), points)
        })
        .collect()
}

fn selection_suffix(requested: &[String], selected: &[String]) -> String {
    if requested.is_empty() {
        "all".to_string()
    } else {
        selected
            .iter()
            .map(|name| slugify(name))
            .collect::<Vec<_>>()
            .join("-")
    }
}

/// Lowercase alphanumerics with runs of anything else collapsed to one
/// underscore: "Comp. Sci." becomes "comp_sci".
fn slugify(name: &str) -> String {
    let mut slug = String::new();
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('_') && !slug.is_empty() {
            slug.push('_');
        }
    }
    slug.trim_end_matches('_').to_string()
}
