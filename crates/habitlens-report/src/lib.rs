//! Artifact generation for HabitLens: PNG charts via `plotters` and
//! BOM-prefixed UTF-8 CSV exports via `csv`.
//!
//! All writes go through an explicit [`ReportContext`] holding the output
//! directory; the renderer's empty-series guard is the pipeline's single
//! "skip if nothing to chart" point.

pub mod chart;
pub mod context;
pub mod export;

pub use chart::{ChartLabels, ChartSeries, render_chart};
pub use context::ReportContext;
pub use export::export_table;
