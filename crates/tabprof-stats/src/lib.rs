//! Statistics for profiled columns.
//!
//! - [`classify`]: semantic type plus distribution-support flag
//! - [`compute_distribution_stats`]: type-dependent summary statistics in canonical order
//! - [`frequency_table`]: value counts for any column

pub mod classify;
pub mod distribution;
pub mod frequency;
pub mod numeric;
pub mod statistic;

pub use classify::{Classification, classify};
pub use distribution::compute_distribution_stats;
pub use frequency::{FrequencyRow, FrequencyTable, VALUE_LABEL_LIMIT, frequency_table};
pub use statistic::{Statistic, Statistics, statistic_plan};
