//! CSV loading through the polars reader.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use polars::prelude::{CsvReadOptions, DataFrame, SerReader};
use tracing::{debug, info};

use tabprof_model::Table;

use crate::convert::table_from_dataframe;
use crate::error::{IngestError, Result};

/// How CSV files are read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvOptions {
    /// Column whose values become the row labels.
    pub index_column: Option<String>,
    /// Parse date and datetime strings into temporal columns.
    pub try_parse_dates: bool,
    /// Rows sampled for schema inference; `None` reads the whole file.
    pub infer_schema_length: Option<usize>,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            index_column: None,
            try_parse_dates: true,
            infer_schema_length: Some(100),
        }
    }
}

impl CsvOptions {
    #[must_use]
    pub fn with_index_column(mut self, column: impl Into<String>) -> Self {
        self.index_column = Some(column.into());
        self
    }

    #[must_use]
    pub fn with_try_parse_dates(mut self, enabled: bool) -> Self {
        self.try_parse_dates = enabled;
        self
    }

    #[must_use]
    pub fn with_infer_schema_length(mut self, rows: Option<usize>) -> Self {
        self.infer_schema_length = rows;
        self
    }
}

fn check_file(path: &Path) -> Result<()> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_file() => Ok(()),
        Ok(_) => Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        }),
        Err(err) if err.kind() == ErrorKind::NotFound => Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        }),
        Err(source) => Err(IngestError::FileRead {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Reads a CSV file into a polars data frame.
///
/// # Errors
///
/// - [`IngestError::FileNotFound`] / [`IngestError::FileRead`] for unreadable paths
/// - [`IngestError::CsvParse`] if polars rejects the file
/// - [`IngestError::EmptyCsv`] if the file has no columns
pub fn read_csv(path: &Path, options: &CsvOptions) -> Result<DataFrame> {
    check_file(path)?;
    let try_parse_dates = options.try_parse_dates;
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(options.infer_schema_length)
        .map_parse_options(|parse| parse.with_try_parse_dates(try_parse_dates))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    if df.width() == 0 {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }
    debug!(path = %path.display(), rows = df.height(), columns = df.width(), "read CSV");
    Ok(df)
}

/// Reads a CSV file into a profiling table.
///
/// # Errors
///
/// Any error of [`read_csv`] or [`table_from_dataframe`].
pub fn read_csv_table(path: &Path, options: &CsvOptions) -> Result<Table> {
    let df = read_csv(path, options)?;
    let table = table_from_dataframe(&df, options.index_column.as_deref())?;
    info!(
        path = %path.display(),
        rows = table.height(),
        columns = table.width(),
        "loaded table"
    );
    Ok(table)
}
