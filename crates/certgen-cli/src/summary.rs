use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use certgen_model::{RowOutcome, RowStatus, RunReport};

pub fn print_summary(report: &RunReport) {
    println!("Mode: {}", report.mode);
    println!(
        "Rows: {} loaded, {} selected",
        report.rows_loaded, report.rows_selected
    );
    if let Some(archive) = &report.archive {
        println!(
            "Archive: {} ({} entries, {} bytes)",
            archive.path.display(),
            archive.entries,
            archive.bytes
        );
    }
    if let Some(path) = &report.merged_document {
        println!("Merged document: {}", path.display());
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Pass"),
        header_cell("Delivered"),
        header_cell("Skipped"),
        header_cell("Failed"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..=3 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for pass in report.passes() {
        table.add_row(vec![
            Cell::new(pass.label())
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            count_cell(report.delivered(pass), Color::Green),
            count_cell(report.skipped(pass), Color::Yellow),
            count_cell(report.failed(pass), Color::Red),
        ]);
    }
    println!("{table}");
    print_problem_rows(report);
}

fn print_problem_rows(report: &RunReport) {
    let problems: Vec<&RowOutcome> = report
        .outcomes
        .iter()
        .filter(|outcome| !matches!(outcome.status, RowStatus::Delivered))
        .collect();
    if problems.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Pass"),
        header_cell("Row"),
        header_cell("Name"),
        header_cell("Certificate"),
        header_cell("Status"),
        header_cell("Reason"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for outcome in problems {
        table.add_row(vec![
            Cell::new(outcome.pass.label()),
            Cell::new(outcome.row_number),
            text_cell(&outcome.name),
            text_cell(&outcome.certificate_number),
            status_cell(&outcome.status),
            text_cell(outcome.status.reason().unwrap_or("")),
        ]);
    }
    println!();
    println!("Rows needing attention:");
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
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

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn status_cell(status: &RowStatus) -> Cell {
    match status {
        RowStatus::Delivered => Cell::new("delivered").fg(Color::Green),
        RowStatus::Skipped { .. } => Cell::new("skipped").fg(Color::Yellow),
        RowStatus::Failed { .. } => Cell::new("failed")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn text_cell(value: &str) -> Cell {
    if value.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(value)
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
