//! Data model for dtype-aware tabular profiling.
//!
//! - [`Column`]: typed values with parallel [`RowLabels`]
//! - [`Table`]: equal-length columns sharing one label axis
//! - [`Value`]: a single cell, including the four [`NullKind`] markers
//! - [`SemanticType`]: the classification that drives statistic selection

pub mod column;
pub mod complex;
pub mod dtype;
pub mod error;
pub mod format;
pub mod group;
pub mod interval;
pub mod labels;
pub mod period;
pub mod table;
pub mod value;

pub use column::{Column, UNNAMED_COLUMN};
pub use complex::Complex;
pub use dtype::SemanticType;
pub use error::{ProfileError, Result};
pub use format::{
    abbreviate_string, format_datetime, format_float, format_numeric, format_percent,
    format_timedelta,
};
pub use group::{ValueGroup, group_values};
pub use interval::{Interval, IntervalClosed};
pub use labels::RowLabels;
pub use period::{Period, PeriodFreq};
pub use table::Table;
pub use value::{NullKind, Value, ValueKey};
