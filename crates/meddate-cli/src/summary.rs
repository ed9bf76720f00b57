use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use meddate_model::{DateMention, EventKind};

use crate::commands::DocumentDates;

pub fn print_summary(results: &[DocumentDates]) {
    println!("{}", summary_table(results));
    let total: usize = results.iter().map(|result| result.dates.len()).sum();
    println!(
        "{total} medication(s) with dates across {} document(s)",
        results.len()
    );
}

pub fn summary_table(results: &[DocumentDates]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Document"),
        header_cell("Medication"),
        header_cell("Kind"),
        header_cell("Span"),
        header_cell("Start"),
        header_cell("Stop"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    for result in results {
        if result.dates.is_empty() {
            table.add_row(vec![
                Cell::new(&result.document),
                dim_cell("-"),
                dim_cell("-"),
                dim_cell("-"),
                dim_cell("-"),
                dim_cell("-"),
            ]);
            continue;
        }
        for record in &result.dates {
            table.add_row(vec![
                Cell::new(&result.document),
                Cell::new(&record.text).add_attribute(Attribute::Bold),
                Cell::new(kind_label(record.kind)),
                Cell::new(record.span),
                date_cell(record.start_date.as_ref(), Color::Green),
                date_cell(record.stop_date.as_ref(), Color::Red),
            ]);
        }
    }
    table
}

fn kind_label(kind: EventKind) -> &'static str {
    match kind {
        EventKind::MedicationEvent => "event",
        EventKind::MedicationMention => "mention",
    }
}

fn date_cell(mention: Option<&DateMention>, color: Color) -> Cell {
    match mention {
        Some(mention) => Cell::new(mention.date).fg(color),
        None => dim_cell("-"),
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
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

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
