use std::io;

use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

use crate::error::{ReportError, Result};
use crate::layout::ReportTable;

/// Inline style applied to every header and data cell.
pub const CELL_STYLE: &str = "font-family: monospace, monospace; text-align: left;";

/// U+2007, as wide as a digit in monospace and proportional fonts alike.
pub const FIGURE_SPACE: char = '\u{2007}';

fn start<W: io::Write>(writer: &mut Writer<W>, name: &str) -> io::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))
}

fn end<W: io::Write>(writer: &mut Writer<W>, name: &str) -> io::Result<()> {
    writer.write_event(Event::End(BytesEnd::new(name)))
}

fn write_cell<W: io::Write>(writer: &mut Writer<W>, name: &str, text: &str) -> io::Result<()> {
    let mut cell = BytesStart::new(name);
    cell.push_attribute(("style", CELL_STYLE));
    writer.write_event(Event::Start(cell))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    end(writer, name)
}

fn write_row<W: io::Write>(writer: &mut Writer<W>, tag: &str, cells: &[String]) -> io::Result<()> {
    start(writer, "tr")?;
    for cell in cells {
        write_cell(writer, tag, cell)?;
    }
    end(writer, "tr")
}

fn write_table<W: io::Write>(writer: &mut Writer<W>, table: &ReportTable) -> io::Result<()> {
    start(writer, "table")?;
    start(writer, "thead")?;
    write_row(writer, "th", &table.headers)?;
    end(writer, "thead")?;
    start(writer, "tbody")?;
    for mut row in table.aligned_rows() {
        if let Some(cell) = table.numeric_column.and_then(|index| row.get_mut(index)) {
            *cell = cell.replace(' ', &FIGURE_SPACE.to_string());
        }
        write_row(writer, "td", &row)?;
    }
    end(writer, "tbody")?;
    end(writer, "table")
}

fn table_html(table: &ReportTable) -> Result<String> {
    let mut writer = Writer::new(Vec::new());
    write_table(&mut writer, table).map_err(|source| ReportError::Html { source })?;
    String::from_utf8(writer.into_inner()).map_err(|err| ReportError::Html {
        source: io::Error::new(io::ErrorKind::InvalidData, err),
    })
}

/// Renders `tables` as HTML `<table>` elements joined with `<br>`.
///
/// # Errors
///
/// Returns [`ReportError::Html`] if the markup cannot be written.
pub fn render_html(tables: &[ReportTable]) -> Result<String> {
    let rendered = tables.iter().map(table_html).collect::<Result<Vec<_>>>()?;
    Ok(rendered.join("<br>"))
}
