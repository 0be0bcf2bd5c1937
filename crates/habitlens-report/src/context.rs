#![deny(unsafe_code)]

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Where and how artifacts are written.
///
/// Threaded explicitly through the renderer and export writer so neither
/// depends on ambient global state. Creating the context creates the output
/// directory, idempotently, before any artifact is written.
#[derive(Debug, Clone)]
pub struct ReportContext {
    output_dir: PathBuf,
    histogram_bins: usize,
}

impl ReportContext {
    pub const DEFAULT_HISTOGRAM_BINS: usize = 10;

    pub fn create(output_dir: impl Into<PathBuf>, histogram_bins: usize) -> Result<Self> {
        let output_dir = output_dir.into();
        std::fs::create_dir_all(&output_dir)
            .with_context(|| format!("create output directory {}", output_dir.display()))?;
        Ok(Self {
            output_dir,
            histogram_bins: histogram_bins.max(1),
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn histogram_bins(&self) -> usize {
        self.histogram_bins
    }

    /// Deterministic artifact location; repeated runs overwrite silently.
    pub fn artifact_path(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(file_name)
    }
}
