//! Column and table profiles rendered as text, HTML or JSON.

pub mod column_profile;
pub mod error;
pub mod layout;
pub mod options;
pub mod render;
pub mod report;
pub mod table_profile;

pub use column_profile::ColumnProfile;
pub use error::{ReportError, Result};
pub use layout::{ReportTable, decimal_align, format_megabytes};
pub use options::{ProfileOptions, TableFormat};
pub use render::{CELL_STYLE, FIGURE_SPACE, apply_table_style, render_html, render_text};
pub use report::Report;
pub use table_profile::{AxisUsage, INDEX_LABEL, TableProfile};
