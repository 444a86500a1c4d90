//! Tables printed by the CLI.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use wizard_core::ImportSummary;
use wizard_map::{Record, column_label};
use wizard_model::{ColumnMapping, ExpectedColumn, Severity, ValidationIssue};

/// Import totals as a two-column table.
pub fn summary_table(summary: &ImportSummary) -> Table {
    let mapping = &summary.mapping;
    let mut table = Table::new();
    apply_summary_table_style(&mut table);
    table.set_header(vec![header_cell("Import"), header_cell("")]);
    table.add_row(vec![Cell::new("File"), Cell::new(&summary.file_name)]);
    table.add_row(vec![Cell::new("Rows"), Cell::new(summary.total_rows)]);
    table.add_row(vec![Cell::new("Header row"), Cell::new(summary.header_row)]);
    table.add_row(vec![Cell::new("Data rows"), Cell::new(summary.data_rows)]);
    table.add_row(vec![
        Cell::new("Mapped fields"),
        Cell::new(format!("{}/{}", mapping.mapped, mapping.total)),
    ]);
    let required = Cell::new(format!("{}/{}", mapping.required_mapped, mapping.required));
    table.add_row(vec![
        Cell::new("Required mapped"),
        if mapping.all_required_mapped() {
            required.fg(Color::Green)
        } else {
            required.fg(Color::Red).add_attribute(Attribute::Bold)
        },
    ]);
    table.add_row(vec![
        Cell::new("Transformations"),
        Cell::new(mapping.active_transformations),
    ]);
    table.add_row(vec![
        Cell::new("Merged columns"),
        Cell::new(mapping.additional_sources),
    ]);
    table.add_row(vec![
        Cell::new("Errors"),
        count_cell(summary.errors, Color::Red),
    ]);
    table.add_row(vec![
        Cell::new("Warnings"),
        count_cell(summary.warnings, Color::Yellow),
    ]);
    align_column(&mut table, 1, CellAlignment::Right);
    table
}

/// One row per expected column with its sources and transformation.
pub fn mapping_table(
    columns: &[ExpectedColumn],
    mappings: &[ColumnMapping],
    header: &[String],
) -> Table {
    let mut table = Table::new();
    apply_table_style(&mut table);
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Label"),
        header_cell("Type"),
        header_cell("Required"),
        header_cell("Source"),
        header_cell("Merged with"),
        header_cell("Transformation"),
    ]);
    for mapping in mappings {
        let column = columns.iter().find(|c| c.field == mapping.target_field);
        let source = match mapping.source_index {
            Some(index) => Cell::new(format!("{index}: {}", column_label(header, index))),
            None if mapping.required => Cell::new("unmapped")
                .fg(Color::Red)
                .add_attribute(Attribute::Bold),
            None => dim_cell("unmapped"),
        };
        let merged = if mapping.additional_sources.is_empty() {
            dim_cell("-")
        } else {
            Cell::new(
                mapping
                    .additional_sources
                    .iter()
                    .map(|source| format!("{}: {}", source.source_index, source.label))
                    .collect::<Vec<_>>()
                    .join(", "),
            )
        };
        let transformation = if mapping.transformation.is_active() {
            Cell::new(mapping.transformation.kind)
        } else {
            dim_cell("none")
        };
        table.add_row(vec![
            Cell::new(&mapping.target_field)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(column.map_or("", |c| c.label.as_str())),
            Cell::new(column.map_or(String::new(), |c| c.data_type.to_string())),
            if mapping.required {
                Cell::new("yes")
            } else {
                dim_cell("no")
            },
            source,
            merged,
            transformation,
        ]);
    }
    align_column(&mut table, 3, CellAlignment::Center);
    table
}

/// Issues ordered errors first, then by row. At most `limit` are listed.
pub fn issue_table(issues: &[ValidationIssue], limit: usize) -> Table {
    let mut ordered: Vec<&ValidationIssue> = issues.iter().collect();
    ordered.sort_by_key(|issue| (severity_rank(issue.severity), issue.row));

    let mut table = Table::new();
    apply_issue_table_style(&mut table);
    table.set_header(vec![
        header_cell("Row"),
        header_cell("Field"),
        header_cell("Severity"),
        header_cell("Message"),
    ]);
    for issue in ordered.iter().take(limit) {
        let row = if issue.is_row_specific() {
            Cell::new(issue.row)
        } else {
            dim_cell("-")
        };
        table.add_row(vec![
            row,
            Cell::new(&issue.column),
            severity_cell(issue.severity),
            Cell::new(&issue.message),
        ]);
    }
    if ordered.len() > limit {
        table.add_row(vec![
            dim_cell("…"),
            dim_cell(""),
            dim_cell(""),
            dim_cell(format!("{} more", ordered.len() - limit)),
        ]);
    }
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Center);
    table
}

/// Raw rows with their absolute indices, for choosing a header row.
pub fn preview_table(rows: &[Vec<String>], limit: usize) -> Table {
    let width = rows.iter().take(limit).map(Vec::len).max().unwrap_or(0);
    let mut table = Table::new();
    apply_table_style(&mut table);
    let mut header = vec![header_cell("#")];
    header.extend((0..width).map(|index| header_cell(&index.to_string())));
    table.set_header(header);
    for (index, row) in rows.iter().take(limit).enumerate() {
        let mut cells = vec![dim_cell(index)];
        cells.extend((0..width).map(|column| {
            Cell::new(row.get(column).map_or("", String::as_str))
        }));
        table.add_row(cells);
    }
    align_column(&mut table, 0, CellAlignment::Right);
    table
}

/// Cleaned records, one column per mapped field.
pub fn records_table(records: &[Record]) -> Table {
    let mut table = Table::new();
    apply_table_style(&mut table);
    let Some(first) = records.first() else {
        return table;
    };
    let fields: Vec<&String> = first.keys().collect();
    table.set_header(fields.iter().map(|field| header_cell(field)).collect::<Vec<_>>());
    for record in records {
        table.add_row(
            fields
                .iter()
                .map(|field| Cell::new(record.get(*field).map_or("", String::as_str)))
                .collect::<Vec<_>>(),
        );
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(80);
}

fn apply_issue_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn severity_cell(severity: Severity) -> Cell {
    match severity {
        Severity::Error => Cell::new("ERROR").fg(Color::Red),
        Severity::Warning => Cell::new("WARN").fg(Color::Yellow),
    }
}

fn severity_rank(severity: Severity) -> u8 {
    match severity {
        Severity::Error => 0,
        Severity::Warning => 1,
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
