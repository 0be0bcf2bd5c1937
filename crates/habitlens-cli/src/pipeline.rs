//! Collection processing pipeline with explicit stages.
//!
//! For each known collection, in fixed order:
//! 1. **Load**: decode the BSON stream into a column-union table. A missing
//!    source file is a warning-level skip; a malformed stream aborts the run
//!    before any artifact of that collection is written.
//! 2. **Export**: write the full table as a BOM-prefixed UTF-8 CSV.
//! 3. **Analyze**: run the collection's fixed chart sequence. Every render
//!    call goes through the renderer's empty-series guard, so absent or
//!    all-null columns simply produce fewer charts.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use habitlens_analyze::{
    count_per_day, count_values, find_categorical_column, find_temporal_column, numeric_columns,
    numeric_values,
};
use habitlens_ingest::{IngestError, load_collection};
use habitlens_model::Table;
use habitlens_report::{ChartLabels, ChartSeries, ReportContext, export_table, render_chart};

use crate::types::{CollectionSummary, RunResult};

/// The known collections, in processing order.
pub const COLLECTIONS: [&str; 4] = ["users", "challenges", "forumposts", "userchallenges"];

#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub top_n: usize,
    pub histogram_bins: usize,
    pub skip_charts: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            top_n: 10,
            histogram_bins: ReportContext::DEFAULT_HISTOGRAM_BINS,
            skip_charts: false,
        }
    }
}

/// Runs the whole pipeline over `input_dir`, writing artifacts to
/// `output_dir` (created idempotently before any write).
pub fn run_pipeline(
    input_dir: &Path,
    output_dir: &Path,
    options: &PipelineOptions,
) -> Result<RunResult> {
    let ctx = ReportContext::create(output_dir, options.histogram_bins)?;
    let mut collections = Vec::with_capacity(COLLECTIONS.len());
    for collection in COLLECTIONS {
        let span = info_span!("collection", name = collection);
        let _guard = span.enter();
        let table = match load_collection(input_dir, collection) {
            Ok(table) => table,
            Err(IngestError::SourceNotFound { path }) => {
                warn!(path = %path.display(), "collection source missing, skipping");
                collections.push(CollectionSummary::skipped(collection));
                continue;
            }
            // Malformed data is fatal: no analysis may run on a corrupt
            // collection.
            Err(error) => {
                return Err(error).with_context(|| format!("load collection '{collection}'"));
            }
        };
        info!(
            documents = table.row_count(),
            columns = ?table.columns(),
            "collection loaded"
        );
        let export = export_table(&ctx, &table)
            .with_context(|| format!("export collection '{collection}'"))?;
        let charts = if options.skip_charts {
            0
        } else {
            analyze_collection(&ctx, &table, options.top_n)
                .with_context(|| format!("analyze collection '{collection}'"))?
        };
        collections.push(CollectionSummary {
            collection: collection.to_string(),
            skipped: false,
            rows: table.row_count(),
            columns: table.columns().len(),
            export: Some(export),
            charts,
        });
    }
    info!("analysis complete");
    Ok(RunResult {
        output_dir: output_dir.to_path_buf(),
        collections,
    })
}

fn analyze_collection(ctx: &ReportContext, table: &Table, top_n: usize) -> Result<usize> {
    match table.name() {
        "users" => analyze_users(ctx, table),
        "challenges" => analyze_challenges(ctx, table, top_n),
        "forumposts" => analyze_forumposts(ctx, table, top_n),
        "userchallenges" => analyze_userchallenges(ctx, table, top_n),
        other => {
            warn!(collection = other, "no analysis sequence defined");
            Ok(0)
        }
    }
}

/// Counts how many of the render calls actually produced an artifact.
struct ChartTally(usize);

impl ChartTally {
    fn record(&mut self, artifact: Option<std::path::PathBuf>) {
        if artifact.is_some() {
            self.0 += 1;
        }
    }
}

fn render_total(
    ctx: &ReportContext,
    table: &Table,
    title: &str,
    bar_label: &str,
    file_name: &str,
) -> Result<Option<std::path::PathBuf>> {
    render_chart(
        ctx,
        &ChartSeries::SingleCount {
            label: bar_label,
            count: table.row_count() as u64,
        },
        &ChartLabels {
            title,
            x: "",
            y: "",
        },
        file_name,
    )
}

fn render_daily_trend(
    ctx: &ReportContext,
    table: &Table,
    title: &str,
    y_label: &str,
    file_name: &str,
) -> Result<Option<std::path::PathBuf>> {
    let Some(column) = find_temporal_column(table) else {
        return Ok(None);
    };
    let daily = count_per_day(table, column);
    render_chart(
        ctx,
        &ChartSeries::Line(&daily),
        &ChartLabels {
            title,
            x: "Date",
            y: y_label,
        },
        file_name,
    )
}

fn render_numeric_histograms(ctx: &ReportContext, table: &Table, tally: &mut ChartTally) -> Result<()> {
    let collection = table.name();
    for column in numeric_columns(table) {
        let sample = numeric_values(table, &column);
        let title = format!("{collection} - {column} distribution");
        let artifact = render_chart(
            ctx,
            &ChartSeries::Histogram(&sample),
            &ChartLabels {
                title: &title,
                x: &column,
                y: "count",
            },
            &format!("{collection}_{column}_hist.png"),
        )?;
        tally.record(artifact);
    }
    Ok(())
}

fn render_top_counts(
    ctx: &ReportContext,
    table: &Table,
    column: &str,
    top_n: usize,
    labels: &ChartLabels<'_>,
    file_name: &str,
) -> Result<Option<std::path::PathBuf>> {
    // The aggregate is always the full distribution; the top-N window is
    // cut here, at the call site.
    let counts = count_values(table, column).top(top_n);
    render_chart(ctx, &ChartSeries::Bar(&counts), labels, file_name)
}

fn analyze_users(ctx: &ReportContext, table: &Table) -> Result<usize> {
    let mut tally = ChartTally(0);
    tally.record(render_total(ctx, table, "Total Users", "Users", "users_total.png")?);
    tally.record(render_daily_trend(
        ctx,
        table,
        "New Users per Day",
        "New Users",
        "users_new_per_day.png",
    )?);
    render_numeric_histograms(ctx, table, &mut tally)?;
    Ok(tally.0)
}

fn analyze_challenges(ctx: &ReportContext, table: &Table, top_n: usize) -> Result<usize> {
    let mut tally = ChartTally(0);
    tally.record(render_total(
        ctx,
        table,
        "Total Challenges",
        "Challenges",
        "challenges_total.png",
    )?);
    if let Some(column) = find_categorical_column(table) {
        let title = format!("Challenges by {column}");
        tally.record(render_top_counts(
            ctx,
            table,
            column,
            top_n,
            &ChartLabels {
                title: &title,
                x: column,
                y: "Challenges",
            },
            &format!("challenges_by_{column}.png"),
        )?);
    }
    render_numeric_histograms(ctx, table, &mut tally)?;
    Ok(tally.0)
}

fn analyze_forumposts(ctx: &ReportContext, table: &Table, top_n: usize) -> Result<usize> {
    let mut tally = ChartTally(0);
    tally.record(render_total(
        ctx,
        table,
        "Total Forum Posts",
        "Posts",
        "forumposts_total.png",
    )?);
    let users_title = format!("Top {top_n} Users by Forum Posts");
    tally.record(render_top_counts(
        ctx,
        table,
        "user",
        top_n,
        &ChartLabels {
            title: &users_title,
            x: "User",
            y: "Posts",
        },
        "forumposts_users_top10.png",
    )?);
    tally.record(render_daily_trend(
        ctx,
        table,
        "Forum Posts per Day",
        "Posts",
        "forumposts_per_day.png",
    )?);
    Ok(tally.0)
}

fn analyze_userchallenges(ctx: &ReportContext, table: &Table, top_n: usize) -> Result<usize> {
    let mut tally = ChartTally(0);
    let users_title = format!("Top {top_n} Users by Joined Challenges");
    tally.record(render_top_counts(
        ctx,
        table,
        "user",
        top_n,
        &ChartLabels {
            title: &users_title,
            x: "User",
            y: "Joined Challenges",
        },
        "userchallenges_users_top10.png",
    )?);
    let challenges_title = format!("Top {top_n} Challenges by User Count");
    tally.record(render_top_counts(
        ctx,
        table,
        "challenge",
        top_n,
        &ChartLabels {
            title: &challenges_title,
            x: "Challenge",
            y: "Users",
        },
        "userchallenges_challenges_top10.png",
    )?);
    // Status keeps the full distribution: no top-N cut.
    let status = count_values(table, "status");
    tally.record(render_chart(
        ctx,
        &ChartSeries::Bar(&status),
        &ChartLabels {
            title: "Challenge Status Distribution",
            x: "Status",
            y: "Count",
        },
        "userchallenges_status.png",
    )?);
    Ok(tally.0)
}
