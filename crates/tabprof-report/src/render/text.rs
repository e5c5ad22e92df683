use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{CellAlignment, ContentArrangement, Table};

use crate::layout::ReportTable;

/// Rounded condensed borders, wrapped to 120 columns.
pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn build(report: &ReportTable) -> Table {
    let mut table = Table::new();
    apply_table_style(&mut table);
    table.set_header(report.headers.clone());
    for row in report.aligned_rows() {
        table.add_row(row);
    }
    if let Some(column) = report
        .numeric_column
        .and_then(|index| table.column_mut(index))
    {
        column.set_cell_alignment(CellAlignment::Right);
    }
    table
}

/// Renders `tables` separated by blank lines, ending with a newline.
pub fn render_text(tables: &[ReportTable]) -> String {
    let rendered: Vec<String> = tables
        .iter()
        .map(|table| build(table).to_string())
        .collect();
    let mut output = rendered.join("\n\n").trim().to_string();
    output.push('\n');
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ReportTable {
        let mut table = ReportTable::new(["Statistic", "Value"]).with_numeric_column(1);
        table.push_row(["count", "200"]);
        table.push_row(["mean", "0.3"]);
        table
    }

    #[test]
    fn test_render_contains_cells() {
        let text = render_text(&[sample()]);
        assert!(text.contains("Statistic"));
        assert!(text.contains("count"));
        assert!(text.contains("200  "));
        assert!(text.contains("  0.3"));
        assert!(text.starts_with('╭'));
        assert!(text.ends_with("╯\n"));
    }

    #[test]
    fn test_tables_separated_by_blank_line() {
        let text = render_text(&[sample(), sample()]);
        assert_eq!(text.matches("╯\n\n╭").count(), 1);
        assert!(!text.ends_with("\n\n"));
    }
}
