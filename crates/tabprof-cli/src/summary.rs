//! Terminal tables for time-difference and gap results.

use chrono::TimeDelta;
use comfy_table::{Attribute, Cell, CellAlignment, Color, Table};

use tabprof_model::{NullKind, format_datetime, format_timedelta};
use tabprof_report::apply_table_style;
use tabprof_times::{CategoryGaps, Gaps, TimeDiffs};

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

fn delta_cell(delta: Option<TimeDelta>) -> Cell {
    match delta {
        Some(delta) => Cell::new(format_timedelta(&delta)),
        None => dim_cell(NullKind::NaT),
    }
}

fn styled(headers: [&str; 2]) -> Table {
    let mut table = Table::new();
    table.set_header(headers.map(header_cell).to_vec());
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table
}

/// Every sorted timestamp with its distance to the previous one.
pub fn diffs_table(diffs: &TimeDiffs) -> Table {
    let mut table = styled(["Timestamp", "Difference"]);
    for entry in diffs.iter() {
        let at = match entry.at {
            Some(at) => Cell::new(format_datetime(&at)),
            None => dim_cell(NullKind::NaT),
        };
        table.add_row(vec![at, delta_cell(entry.diff)]);
    }
    table
}

/// Gaps, largest first, each at the timestamp that ends it.
pub fn gaps_table(gaps: &Gaps) -> Table {
    let mut table = styled(["Gap End", "Gap"]);
    for gap in gaps.iter() {
        table.add_row(vec![
            Cell::new(format_datetime(&gap.at)),
            delta_cell(Some(gap.duration)),
        ]);
    }
    table
}

/// Cumulative gap per category, largest first.
pub fn category_gaps_table(gaps: &CategoryGaps) -> Table {
    let mut table = styled(["Category", "Cumulative Gap"]);
    for entry in gaps.iter() {
        let category = if entry.category.is_null() {
            dim_cell(&entry.category)
        } else {
            Cell::new(&entry.category)
        };
        table.add_row(vec![category, delta_cell(Some(entry.cumulative_gap))]);
    }
    table
}
