use std::path::PathBuf;

/// Outcome of one full pipeline run.
#[derive(Debug)]
pub struct RunResult {
    pub output_dir: PathBuf,
    pub collections: Vec<CollectionSummary>,
}

impl RunResult {
    pub fn skipped_count(&self) -> usize {
        self.collections
            .iter()
            .filter(|summary| summary.skipped)
            .count()
    }
}

/// Per-collection outcome for the run summary table.
#[derive(Debug)]
pub struct CollectionSummary {
    pub collection: String,
    /// True when the source file was absent and the collection was skipped.
    pub skipped: bool,
    pub rows: usize,
    pub columns: usize,
    pub export: Option<PathBuf>,
    pub charts: usize,
}

impl CollectionSummary {
    pub fn skipped(collection: &str) -> Self {
        Self {
            collection: collection.to_string(),
            skipped: true,
            rows: 0,
            columns: 0,
            export: None,
            charts: 0,
        }
    }
}
