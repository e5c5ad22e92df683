//! Whole-table profile.

use std::collections::HashSet;

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};
use tracing::debug;

use tabprof_model::{Column, SemanticType, Table, Value, format_float};
use tabprof_stats::{Statistic, compute_distribution_stats};

use crate::error::Result;
use crate::layout::{ReportTable, format_megabytes};
use crate::report::Report;

const BYTES_PER_MEGABYTE: f64 = 1_000_000.0;

/// Label of the row-label axis in the per-axis listing.
pub const INDEX_LABEL: &str = "Index";

/// Type and estimated memory of one axis of a table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisUsage {
    pub name: String,
    pub dtype: SemanticType,
    pub memory_mb: f64,
}

/// Shape, duplicates, memory and missing-value summary of a table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// `(rows, columns)`.
    pub shape: (usize, usize),
    /// The row labels first, then every column.
    pub axes: Vec<AxisUsage>,
    /// Rows equal to an earlier row.
    pub num_duplicates: usize,
    #[serde(skip)]
    pub nulls_per_row: Column,
    /// Statistics of `nulls_per_row` without `count`, led by the column count.
    #[serde(serialize_with = "serialize_pairs")]
    pub null_stats: Vec<(String, Value)>,
}

fn serialize_pairs<S: Serializer>(
    pairs: &[(String, Value)],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(pairs.len()))?;
    for (key, value) in pairs {
        map.serialize_entry(key, value)?;
    }
    map.end()
}

fn count_duplicates(table: &Table) -> usize {
    if table.width() == 0 {
        return 0;
    }
    let mut seen = HashSet::with_capacity(table.height());
    (0..table.height())
        .filter(|&row| !seen.insert(table.row_key(row)))
        .count()
}

fn nulls_per_row(table: &Table) -> Result<Column> {
    let counts = (0..table.height()).map(|row| {
        table
            .columns()
            .iter()
            .filter(|column| column.values()[row].is_null())
            .count() as i64
    });
    let column = Column::new("nulls per row", SemanticType::Integer, counts)?;
    Ok(column.with_labels(table.labels().clone())?)
}

impl TableProfile {
    /// Profiles `table`; a non-empty `name` is shown as the first row.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ReportError::Profile`] if the per-row null counts
    /// cannot be summarized.
    pub fn new(table: &Table, name: Option<&str>) -> Result<Self> {
        debug!(
            rows = table.height(),
            columns = table.width(),
            "profiling table"
        );
        let mut axes = vec![AxisUsage {
            name: INDEX_LABEL.to_string(),
            dtype: table.labels().dtype(),
            memory_mb: table.labels().memory_bytes() as f64 / BYTES_PER_MEGABYTE,
        }];
        axes.extend(table.columns().iter().map(|column| AxisUsage {
            name: column.display_name().to_string(),
            dtype: column.dtype(),
            memory_mb: column.memory_bytes() as f64 / BYTES_PER_MEGABYTE,
        }));

        let nulls_per_row = nulls_per_row(table)?;
        let stats = compute_distribution_stats(&nulls_per_row)?;
        let width = i64::try_from(table.width()).unwrap_or(i64::MAX);
        let mut null_stats = vec![("Number of Columns".to_string(), Value::Int(width))];
        null_stats.extend(
            stats
                .iter()
                .filter(|(statistic, _)| *statistic != Statistic::Count)
                .map(|(statistic, value)| (statistic.as_str().to_string(), value.clone())),
        );

        Ok(Self {
            name: name.filter(|name| !name.is_empty()).map(str::to_string),
            shape: table.shape(),
            axes,
            num_duplicates: count_duplicates(table),
            nulls_per_row,
            null_stats,
        })
    }

    /// Total estimated memory in MB.
    pub fn memory_usage(&self) -> f64 {
        self.axes.iter().map(|axis| axis.memory_mb).sum()
    }

    fn info_table(&self) -> ReportTable {
        let mut table = ReportTable::new(["DataFrame-Level Info", ""]);
        if let Some(name) = &self.name {
            table.push_row(["DF Name".to_string(), name.clone()]);
        }
        table.push_row([
            "DF Shape".to_string(),
            format!("({}, {})", self.shape.0, self.shape.1),
        ]);
        table.push_row([
            "Duplicated Rows".to_string(),
            self.num_duplicates.to_string(),
        ]);
        table.push_row([
            "Memory Usage (MB)".to_string(),
            format_megabytes(self.memory_usage()),
        ]);
        table
    }

    fn axes_table(&self) -> ReportTable {
        let mut table = ReportTable::new(["Series Name", "Data Type", "Memory Usage (MB)"])
            .with_numeric_column(2);
        for axis in &self.axes {
            table.push_row([
                axis.name.clone(),
                axis.dtype.to_string(),
                format_float(axis.memory_mb),
            ]);
        }
        table
    }

    fn null_table(&self) -> ReportTable {
        let mut table = ReportTable::new(["Summary of Nulls Per Row", ""]).with_numeric_column(1);
        for (label, value) in &self.null_stats {
            table.push_row([label.clone(), value.to_string()]);
        }
        table
    }
}

impl Report for TableProfile {
    fn tables(&self) -> Vec<ReportTable> {
        vec![self.info_table(), self.axes_table(), self.null_table()]
    }
}
