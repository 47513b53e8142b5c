use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use poi_model::{GeometryKind, NormalizationReport};

use crate::types::{InspectOutcome, NormalizeOutcome};

pub fn print_normalize_summary(outcome: &NormalizeOutcome) {
    println!("Input: {}", outcome.input.display());
    match &outcome.output {
        Some(path) => println!("Output: {}", path.display()),
        None => println!("Output: (dry run)"),
    }
    println!("{}", report_table(&outcome.report, outcome.null_geometries));
    println!("{}", kind_table(&outcome.report));
    if let Some(mismatch) = &outcome.report.crs_mismatch {
        eprintln!("Warning: {}", mismatch.message());
    }
}

pub fn print_inspect_summary(outcome: &InspectOutcome) {
    println!("Input: {}", outcome.input.display());
    println!(
        "Records: {}  CRS: {}  Index: {}",
        outcome.records,
        outcome
            .crs
            .as_ref()
            .map_or_else(|| "unset".to_string(), ToString::to_string),
        if outcome.index_levels.is_empty() {
            "-".to_string()
        } else {
            outcome.index_levels.join(", ")
        }
    );
    if outcome.null_geometries > 0 {
        println!("Features without geometry: {}", outcome.null_geometries);
    }

    let mut kinds = Table::new();
    kinds.set_header(vec![header_cell("Geometry"), header_cell("Records")]);
    apply_table_style(&mut kinds);
    align_column(&mut kinds, 1, CellAlignment::Right);
    for kind in GeometryKind::ALL {
        let count = outcome.kind_counts.get(&kind).copied().unwrap_or(0);
        kinds.add_row(vec![kind_cell(kind), count_cell(count, Color::White)]);
    }
    println!("{kinds}");

    let mut columns = Table::new();
    columns.set_header(vec![
        header_cell("Column"),
        header_cell("Missing"),
        header_cell(&format!("Drop (> {:.0}%)", outcome.threshold * 100.0)),
    ]);
    apply_table_style(&mut columns);
    align_column(&mut columns, 1, CellAlignment::Right);
    align_column(&mut columns, 2, CellAlignment::Center);
    for profile in &outcome.columns {
        columns.add_row(vec![
            Cell::new(&profile.name),
            Cell::new(format!("{:.1}%", profile.missing_ratio * 100.0)),
            if profile.would_drop {
                Cell::new("yes").fg(Color::Yellow).add_attribute(Attribute::Bold)
            } else {
                dim_cell("-")
            },
        ]);
    }
    println!("{columns}");
}

/// Stage-by-stage counts of a normalization run.
pub fn report_table(report: &NormalizationReport, null_geometries: usize) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Stage"), header_cell("Records")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Input"), Cell::new(report.input_records)]);
    table.add_row(vec![
        Cell::new("Excluded (other geometry)"),
        count_cell(report.excluded_other, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("  of which null geometry"),
        count_cell(null_geometries, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Polygons suppressed by points"),
        count_cell(report.suppressed_polygons, Color::Blue),
    ]);
    table.add_row(vec![
        Cell::new("Added by multipolygon parts"),
        count_cell(report.exploded_records, Color::Blue),
    ]);
    table.add_row(vec![
        Cell::new("Dropped (no centroid)"),
        count_cell(report.empty_geometries, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Duplicate geometries"),
        count_cell(report.duplicate_geometries, Color::Blue),
    ]);
    table.add_row(vec![
        Cell::new("Output")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(report.output_records).add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        Cell::new("Sparse columns"),
        Cell::new(report.dropped_columns_message()),
    ]);
    table
}

fn kind_table(report: &NormalizationReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Geometry"), header_cell("Records in")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for kind in GeometryKind::ALL {
        table.add_row(vec![
            kind_cell(kind),
            count_cell(report.kind_count(kind), Color::White),
        ]);
    }
    table
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn kind_cell(kind: GeometryKind) -> Cell {
    match kind {
        GeometryKind::Other => Cell::new(kind).fg(Color::DarkGrey),
        _ => Cell::new(kind).fg(Color::Blue).add_attribute(Attribute::Bold),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
