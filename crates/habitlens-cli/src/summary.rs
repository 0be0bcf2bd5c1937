use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table};

use habitlens_cli::types::RunResult;

pub fn print_summary(result: &RunResult) {
    println!("Output: {}", result.output_dir.display());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Collection"),
        header_cell("Status"),
        header_cell("Rows"),
        header_cell("Columns"),
        header_cell("CSV"),
        header_cell("Charts"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Right);
    for summary in &result.collections {
        if summary.skipped {
            table.add_row(vec![
                Cell::new(&summary.collection),
                Cell::new("skipped"),
                Cell::new("-"),
                Cell::new("-"),
                Cell::new("-"),
                Cell::new("-"),
            ]);
        } else {
            let csv = summary
                .export
                .as_deref()
                .and_then(|path| path.file_name())
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            table.add_row(vec![
                Cell::new(&summary.collection),
                Cell::new("analyzed"),
                Cell::new(summary.rows),
                Cell::new(summary.columns),
                Cell::new(csv),
                Cell::new(summary.charts),
            ]);
        }
    }
    println!("{table}");
    if result.skipped_count() > 0 {
        println!("{} collection(s) skipped (source file missing)", result.skipped_count());
    }
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
