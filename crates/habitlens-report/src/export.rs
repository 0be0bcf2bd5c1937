#![deny(unsafe_code)]

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use habitlens_model::Table;

use crate::context::ReportContext;

/// UTF-8 byte order mark. Spreadsheet tools key their encoding detection on
/// it, which keeps non-Latin text intact after a round trip.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Writes the full table to `{output_dir}/{collection}.csv`.
///
/// Every observed column is exported, identifier columns included; `Null`
/// cells become empty fields. An existing artifact of the same name is
/// overwritten.
pub fn export_table(ctx: &ReportContext, table: &Table) -> Result<PathBuf> {
    let path = ctx.artifact_path(&format!("{}.csv", table.name()));
    let mut file =
        File::create(&path).with_context(|| format!("create export {}", path.display()))?;
    file.write_all(UTF8_BOM)
        .with_context(|| format!("write export {}", path.display()))?;
    let mut writer = csv::Writer::from_writer(file);
    writer
        .write_record(table.columns())
        .with_context(|| format!("write export header {}", path.display()))?;
    for row_index in 0..table.row_count() {
        let cells: Vec<String> = table
            .row(row_index)
            .into_iter()
            .map(std::string::ToString::to_string)
            .collect();
        writer
            .write_record(&cells)
            .with_context(|| format!("write export row {row_index} of {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("flush export {}", path.display()))?;
    info!(
        artifact = %path.display(),
        rows = table.row_count(),
        "table exported"
    );
    Ok(path)
}
