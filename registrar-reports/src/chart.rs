//! PNG chart rendering.
//!
//! Like the CSV sink, charts stage into a temp file beside the destination
//! and rename into place once fully drawn.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use plotters::coord::ranged1d::SegmentValue;
use plotters::prelude::*;
use registrar_db::SalaryStats;
use tracing::debug;

const CHART_SIZE: (u32, u32) = (1000, 500);

// Backend error types differ per drawing call; fold them through Display.
fn draw_err<E: std::fmt::Display>(e: E) -> anyhow::Error {
    anyhow!("chart rendering failed: {e}")
}

fn publish<F>(dest: &Path, draw: F) -> Result<()>
where
    F: FnOnce(&Path) -> Result<()>,
{
    let dir = dest
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    // the bitmap backend picks the image format from the file extension
    let staged = tempfile::Builder::new()
        .suffix(".png")
        .tempfile_in(dir)
        .with_context(|| format!("staging chart for {}", dest.display()))?;
    draw(staged.path())?;
    staged
        .persist(dest)
        .with_context(|| format!("publishing {}", dest.display()))?;
    debug!(path = %dest.display(), "chart published");
    Ok(())
}

/// Median bars, an average line, and a ±stddev whisker per department.
pub fn salary_chart(dest: &Path, stats: &[SalaryStats]) -> Result<()> {
    publish(dest, |staged| {
        let root = BitMapBackend::new(staged, CHART_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;

        let y_top = stats
            .iter()
            .map(|s| s.median.max(s.average + s.stddev))
            .fold(1.0_f64, f64::max)
            * 1.1;
        let y_bottom = stats
            .iter()
            .map(|s| s.average - s.stddev)
            .fold(0.0_f64, f64::min);
        let columns = stats.len().max(1) as i32;

        let mut chart = ChartBuilder::on(&root)
            .caption(
                "Instructor Salary Statistics by Department",
                ("sans-serif", 24),
            )
            .margin(10)
            .x_label_area_size(50)
            .y_label_area_size(80)
            .build_cartesian_2d((0..columns).into_segmented(), y_bottom..y_top)
            .map_err(draw_err)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc("Department")
            .y_desc("Salary")
            .x_label_formatter(&|seg: &SegmentValue<i32>| segment_label(seg, stats))
            .draw()
            .map_err(draw_err)?;

        chart
            .draw_series(
                Histogram::vertical(&chart)
                    .style(YELLOW.mix(0.7).filled())
                    .margin(10)
                    .data(stats.iter().enumerate().map(|(i, s)| (i as i32, s.median))),
            )
            .map_err(draw_err)?
            .label("Median Salary")
            .legend(|(x, y)| {
                Rectangle::new([(x, y - 4), (x + 12, y + 4)], YELLOW.mix(0.7).filled())
            });

        chart
            .draw_series(LineSeries::new(
                stats
                    .iter()
                    .enumerate()
                    .map(|(i, s)| (SegmentValue::CenterOf(i as i32), s.average)),
                BLUE.stroke_width(2),
            ))
            .map_err(draw_err)?
            .label("Average Salary")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 12, y)], BLUE.stroke_width(2)));

        chart
            .draw_series(stats.iter().enumerate().map(|(i, s)| {
                PathElement::new(
                    vec![
                        (SegmentValue::CenterOf(i as i32), s.average - s.stddev),
                        (SegmentValue::CenterOf(i as i32), s.average + s.stddev),
                    ],
                    GREEN.stroke_width(2),
                )
            }))
            .map_err(draw_err)?
            .label("Std Deviation")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 12, y)], GREEN.stroke_width(2)));

        chart
            .configure_series_labels()
            .border_style(BLACK)
            .background_style(WHITE.mix(0.8))
            .draw()
            .map_err(draw_err)?;

        root.present().map_err(draw_err)?;
        Ok(())
    })
}

fn segment_label(seg: &SegmentValue<i32>, stats: &[SalaryStats]) -> String {
    let idx = match seg {
        SegmentValue::Exact(i) | SegmentValue::CenterOf(i) => *i,
        SegmentValue::Last => return String::new(),
    };
    stats
        .get(idx as usize)
        .map(|s| s.dept_name.clone())
        .unwrap_or_default()
}

/// One line per department over the (year, semester) axis, with point
/// markers and a legend.
pub fn enrollment_chart(
    dest: &Path,
    labels: &[String],
    series: &[(String, Vec<i64>)],
) -> Result<()> {
    publish(dest, |staged| {
        let root = BitMapBackend::new(staged, CHART_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;

        let x_top = (labels.len().max(2) - 1) as i64;
        let peak = series
            .iter()
            .flat_map(|(_, points)| points.iter().copied())
            .max()
            .unwrap_or(0)
            .max(1);
        let y_top = peak + peak / 10 + 1;

        let mut chart = ChartBuilder::on(&root)
            .caption("Department Student Enrollment by Year", ("sans-serif", 24))
            .margin(10)
            .x_label_area_size(50)
            .y_label_area_size(60)
            .build_cartesian_2d(0..x_top, 0..y_top)
            .map_err(draw_err)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc("Year and Semester")
            .y_desc("Students Enrolled")
            .x_labels(labels.len().clamp(2, 12))
            .x_label_formatter(&|x: &i64| labels.get(*x as usize).cloned().unwrap_or_default())
            .draw()
            .map_err(draw_err)?;

        for (idx, (name, points)) in series.iter().enumerate() {
            let color = Palette99::pick(idx).mix(0.9);
            chart
                .draw_series(
                    LineSeries::new(
                        points.iter().enumerate().map(|(i, v)| (i as i64, *v)),
                        color.stroke_width(2),
                    )
                    .point_size(3),
                )
                .map_err(draw_err)?
                .label(name)
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 12, y)], color.stroke_width(2))
                });
        }

        chart
            .configure_series_labels()
            .border_style(BLACK)
            .background_style(WHITE.mix(0.8))
            .draw()
            .map_err(draw_err)?;

        root.present().map_err(draw_err)?;
        Ok(())
    })
}
