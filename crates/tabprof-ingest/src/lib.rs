//! Loading polars data frames and CSV files as profiling tables.

pub mod convert;
pub mod csv;
pub mod error;

pub use convert::{column_from_series, semantic_type, table_from_dataframe};
pub use csv::{CsvOptions, read_csv, read_csv_table};
pub use error::{IngestError, Result};
