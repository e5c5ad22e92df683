//! Two-dimensional labeled tables.

use crate::column::Column;
use crate::error::{ProfileError, Result};
use crate::labels::RowLabels;
use crate::value::ValueKey;

/// Columns of equal length sharing one row-label axis.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    labels: RowLabels,
    columns: Vec<Column>,
}

impl Table {
    /// Builds a table with positional labels.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::InvalidInput`] if the columns differ in length.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let height = columns.first().map_or(0, Column::len);
        if let Some(column) = columns.iter().find(|c| c.len() != height) {
            return Err(ProfileError::invalid(format!(
                "column '{}' has {} rows, expected {height}",
                column.display_name(),
                column.len()
            )));
        }
        Self {
            labels: RowLabels::Positional(height),
            columns,
        }
        .with_labels(RowLabels::Positional(height))
    }

    /// Replaces the row labels of the table and of every column.
    pub fn with_labels(self, labels: RowLabels) -> Result<Self> {
        if labels.len() != self.height() {
            return Err(ProfileError::invalid(format!(
                "table has {} rows but {} row labels",
                self.height(),
                labels.len()
            )));
        }
        let columns = self
            .columns
            .into_iter()
            .map(|column| column.with_labels(labels.clone()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { labels, columns })
    }

    pub fn height(&self) -> usize {
        self.labels.len()
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// `(rows, columns)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.height(), self.width())
    }

    pub fn labels(&self) -> &RowLabels {
        &self.labels
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name() == name)
    }

    /// Equality keys of one row across all columns.
    pub fn row_key(&self, row: usize) -> Vec<ValueKey> {
        self.columns
            .iter()
            .filter_map(|column| column.values().get(row))
            .map(crate::value::Value::key)
            .collect()
    }
}
