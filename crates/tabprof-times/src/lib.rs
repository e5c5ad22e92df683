//! Time-series diagnostics.
//!
//! - [`time_diffs`] / [`time_diffs_by_label`]: successive differences of sorted timestamps
//! - [`find_gaps`] / [`find_gaps_by_label`]: differences above a threshold, largest first
//! - [`category_gaps`]: per-category absence over a time-indexed column

pub mod categories;
pub mod diffs;

pub use categories::{CategoryGap, CategoryGaps, DEFAULT_MAX_CATEGORIES, category_gaps};
pub use diffs::{
    Gap, Gaps, Labeled, TimeDiff, TimeDiffs, TimestampSource, find_gaps, find_gaps_by_label,
    time_diffs, time_diffs_by_label,
};
