//! Text and HTML rendering of report tables.

mod html;
mod text;

pub use html::{CELL_STYLE, FIGURE_SPACE, render_html};
pub use text::{apply_table_style, render_text};
