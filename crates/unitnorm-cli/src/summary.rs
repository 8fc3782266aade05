use std::path::PathBuf;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use unitnorm_model::{PairReport, RunReport};

pub fn print_summary(run: &RunReport) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Pair"),
        header_cell("Labels"),
        header_cell("Currency"),
        header_cell("Exception"),
        header_cell("Reordered"),
        header_cell("Ignored"),
        header_cell("Unresolved"),
        header_cell("Written"),
    ]);
    apply_summary_table_style(&mut table);
    for index in [1, 2, 4, 5, 6] {
        align_column(&mut table, index, CellAlignment::Right);
    }
    align_column(&mut table, 7, CellAlignment::Center);

    let mut total_labels = 0usize;
    let mut total_ignored = 0usize;
    for pair in &run.pairs {
        total_labels += pair.label_count;
        total_ignored += pair.ignored;
        table.add_row(vec![
            pair_cell(pair),
            Cell::new(pair.label_count),
            count_cell(pair.currency_replacements, Color::Green),
            exception_cell(pair),
            count_cell(pair.unit_reorders, Color::Green),
            count_cell(pair.ignored, Color::DarkGrey),
            count_cell(pair.unresolved_count(), Color::Yellow),
            output_cell(pair.output_path.as_ref(), pair.persistence_blocked),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total_labels).add_attribute(Attribute::Bold),
        count_cell(run.total_currency_replacements(), Color::Green).add_attribute(Attribute::Bold),
        dim_cell("-"),
        count_cell(run.total_unit_reorders(), Color::Green).add_attribute(Attribute::Bold),
        count_cell(total_ignored, Color::DarkGrey).add_attribute(Attribute::Bold),
        count_cell(run.total_unresolved(), Color::Yellow).add_attribute(Attribute::Bold),
        dim_cell("-"),
    ]);
    println!("{table}");
    print_unresolved_table(run);
    if !run.failures.is_empty() {
        eprintln!("Errors:");
        for failure in &run.failures {
            eprintln!("- {}: {}", failure.key, failure.message);
        }
    }
}

fn print_unresolved_table(run: &RunReport) {
    let rows: Vec<_> = run
        .pairs
        .iter()
        .flat_map(|pair| pair.unresolved.iter().map(move |label| (pair, label)))
        .collect();
    if rows.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Pair"),
        header_cell("Label"),
        header_cell("Tokens"),
        header_cell("Detected"),
        header_cell("Candidates"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for (pair, label) in rows {
        table.add_row(vec![
            pair_cell(pair),
            Cell::new(&label.label),
            Cell::new(label.token_count),
            list_cell(&label.tokens),
            list_cell(&label.candidates),
        ]);
    }
    println!();
    println!("Unresolved labels:");
    println!("{table}");
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
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
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

fn pair_cell(pair: &PairReport) -> Cell {
    Cell::new(pair.key.to_string())
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn exception_cell(pair: &PairReport) -> Cell {
    if pair.exception_changes == 0 {
        dim_cell(&pair.exception_rule)
    } else {
        Cell::new(format!(
            "{} ({})",
            pair.exception_rule, pair.exception_changes
        ))
    }
}

fn output_cell(path: Option<&PathBuf>, blocked: bool) -> Cell {
    match (path, blocked) {
        (Some(_), _) => Cell::new("✓")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        (None, true) => Cell::new("blocked")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        (None, false) => dim_cell("-"),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn list_cell(values: &[String]) -> Cell {
    if values.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(values.join(" | "))
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
