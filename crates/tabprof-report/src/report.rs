//! The shared rendering surface of profiles.

use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::error::{ReportError, Result};
use crate::layout::ReportTable;
use crate::options::TableFormat;
use crate::render::{render_html, render_text};

/// A profile that can be laid out as tables and rendered.
pub trait Report: Serialize {
    /// The profile's tables in display order.
    fn tables(&self) -> Vec<ReportTable>;

    fn to_text(&self) -> String {
        render_text(&self.tables())
    }

    /// # Errors
    ///
    /// Returns [`ReportError::Html`] if the markup cannot be written.
    fn to_html(&self) -> Result<String> {
        render_html(&self.tables())
    }

    /// # Errors
    ///
    /// Returns [`ReportError::Json`] if serialization fails.
    fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// # Errors
    ///
    /// Propagates the error of the selected renderer.
    fn render(&self, format: TableFormat) -> Result<String> {
        match format {
            TableFormat::Text => Ok(self.to_text()),
            TableFormat::Html => self.to_html(),
            TableFormat::Json => self.to_json(),
        }
    }

    /// Writes the text rendering to `path`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Save`] if the file cannot be written.
    fn save(&self, path: &Path) -> Result<()> {
        self.save_as(path, TableFormat::Text)
    }

    /// Writes the rendering in `format` to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Save`] if the file cannot be written.
    fn save_as(&self, path: &Path, format: TableFormat) -> Result<()> {
        let output = self.render(format)?;
        fs::write(path, output).map_err(|source| ReportError::Save {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), %format, "saved profile");
        Ok(())
    }
}
