#![deny(unsafe_code)]

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Days;
use plotters::prelude::{
    BLUE, BitMapBackend, ChartBuilder, Color, IntoDrawingArea, LineSeries, Rectangle, WHITE,
};
use tracing::info;

use habitlens_model::{CategoryCounts, DailyCounts, NumericSample};

use crate::context::ReportContext;

/// One chart request: the aggregate to draw and how to draw it.
#[derive(Debug, Clone)]
pub enum ChartSeries<'a> {
    /// Ranked categorical bars, most frequent first.
    Bar(&'a CategoryCounts),
    /// Chronological per-day trend.
    Line(&'a DailyCounts),
    /// Binned distribution of raw numeric values.
    Histogram(&'a NumericSample),
    /// Degenerate bar chart with one labeled bar (a table's row total).
    SingleCount { label: &'a str, count: u64 },
}

impl ChartSeries<'_> {
    fn is_empty(&self) -> bool {
        match self {
            ChartSeries::Bar(counts) => counts.is_empty(),
            ChartSeries::Line(daily) => daily.is_empty(),
            ChartSeries::Histogram(sample) => sample.is_empty(),
            ChartSeries::SingleCount { .. } => false,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ChartLabels<'a> {
    pub title: &'a str,
    pub x: &'a str,
    pub y: &'a str,
}

/// Renders one chart into `{output_dir}/{file_name}`.
///
/// The single defensive guard of the pipeline lives here: an empty series
/// writes nothing and returns `Ok(None)`, so callers invoke this
/// unconditionally for columns that may not exist. Existing artifacts are
/// overwritten silently.
pub fn render_chart(
    ctx: &ReportContext,
    series: &ChartSeries<'_>,
    labels: &ChartLabels<'_>,
    file_name: &str,
) -> Result<Option<PathBuf>> {
    if series.is_empty() {
        return Ok(None);
    }
    let path = ctx.artifact_path(file_name);
    match series {
        ChartSeries::Bar(counts) => draw_bar(&path, counts, labels)?,
        ChartSeries::Line(daily) => draw_line(&path, daily, labels)?,
        ChartSeries::Histogram(sample) => {
            draw_histogram(&path, sample, ctx.histogram_bins(), labels)?;
        }
        ChartSeries::SingleCount { label, count } => {
            draw_single_count(&path, label, *count, labels)?;
        }
    }
    info!(artifact = %path.display(), "chart written");
    Ok(Some(path))
}

/// Headroom above the tallest bar so it never touches the frame.
fn y_max(max_count: u64) -> f64 {
    (max_count as f64 * 1.1).max(1.0)
}

/// Axis labels for opaque keys (24-char ObjectId hex) get unreadable fast.
fn short_label(key: &str) -> String {
    const MAX: usize = 12;
    if key.chars().count() <= MAX {
        key.to_string()
    } else {
        let prefix: String = key.chars().take(MAX - 1).collect();
        format!("{prefix}…")
    }
}

fn draw_bar(path: &Path, counts: &CategoryCounts, labels: &ChartLabels<'_>) -> Result<()> {
    let root = BitMapBackend::new(path, (800, 400)).into_drawing_area();
    root.fill(&WHITE)?;
    let entries = &counts.entries;
    let max_count = entries.iter().map(|(_, count)| *count).max().unwrap_or(0);
    let mut chart = ChartBuilder::on(&root)
        .caption(labels.title, ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(60)
        .y_label_area_size(50)
        .build_cartesian_2d(0i32..entries.len() as i32, 0f64..y_max(max_count))?;
    chart
        .configure_mesh()
        .x_desc(labels.x)
        .y_desc(labels.y)
        .x_labels(entries.len())
        .x_label_formatter(&|index| {
            entries
                .get(*index as usize)
                .map(|(key, _)| short_label(key))
                .unwrap_or_default()
        })
        .draw()?;
    chart.draw_series(entries.iter().enumerate().map(|(index, (_, count))| {
        Rectangle::new(
            [(index as i32, 0.0), (index as i32 + 1, *count as f64)],
            BLUE.filled(),
        )
    }))?;
    root.present()
        .with_context(|| format!("write chart {}", path.display()))?;
    Ok(())
}

fn draw_line(path: &Path, daily: &DailyCounts, labels: &ChartLabels<'_>) -> Result<()> {
    let root = BitMapBackend::new(path, (800, 400)).into_drawing_area();
    root.fill(&WHITE)?;
    let entries = &daily.entries;
    let first = entries[0].0;
    let last = entries[entries.len() - 1].0;
    // A one-day series still needs a non-degenerate x range.
    let x_end = if last > first {
        last
    } else {
        last.checked_add_days(Days::new(1)).unwrap_or(last)
    };
    let max_count = entries.iter().map(|(_, count)| *count).max().unwrap_or(0);
    let mut chart = ChartBuilder::on(&root)
        .caption(labels.title, ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(60)
        .y_label_area_size(50)
        .build_cartesian_2d(first..x_end, 0f64..y_max(max_count))?;
    chart
        .configure_mesh()
        .x_desc(labels.x)
        .y_desc(labels.y)
        .draw()?;
    chart.draw_series(LineSeries::new(
        entries.iter().map(|(day, count)| (*day, *count as f64)),
        &BLUE,
    ))?;
    root.present()
        .with_context(|| format!("write chart {}", path.display()))?;
    Ok(())
}

fn draw_histogram(
    path: &Path,
    sample: &NumericSample,
    bins: usize,
    labels: &ChartLabels<'_>,
) -> Result<()> {
    let root = BitMapBackend::new(path, (600, 400)).into_drawing_area();
    root.fill(&WHITE)?;
    let values = &sample.values;
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    // A constant column still gets a drawable single bucket.
    let (low, high) = if max > min {
        (min, max)
    } else {
        (min - 0.5, min + 0.5)
    };
    let width = (high - low) / bins as f64;
    let mut buckets = vec![0u64; bins];
    for value in values {
        let index = (((value - low) / width) as usize).min(bins - 1);
        buckets[index] += 1;
    }
    let max_count = buckets.iter().copied().max().unwrap_or(0);
    let mut chart = ChartBuilder::on(&root)
        .caption(labels.title, ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(50)
        .build_cartesian_2d(low..high, 0f64..y_max(max_count))?;
    chart
        .configure_mesh()
        .x_desc(labels.x)
        .y_desc(labels.y)
        .draw()?;
    chart.draw_series(buckets.iter().enumerate().map(|(index, count)| {
        let left = low + index as f64 * width;
        Rectangle::new([(left, 0.0), (left + width, *count as f64)], BLUE.filled())
    }))?;
    root.present()
        .with_context(|| format!("write chart {}", path.display()))?;
    Ok(())
}

fn draw_single_count(
    path: &Path,
    label: &str,
    count: u64,
    labels: &ChartLabels<'_>,
) -> Result<()> {
    let root = BitMapBackend::new(path, (400, 400)).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(labels.title, ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0i32..1i32, 0f64..y_max(count))?;
    let label = label.to_string();
    chart
        .configure_mesh()
        .x_labels(1)
        .x_label_formatter(&move |_| label.clone())
        .draw()?;
    chart.draw_series(std::iter::once(Rectangle::new(
        [(0, 0.0), (1, count as f64)],
        BLUE.filled(),
    )))?;
    root.present()
        .with_context(|| format!("write chart {}", path.display()))?;
    Ok(())
}
