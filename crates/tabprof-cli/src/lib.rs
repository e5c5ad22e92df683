//! CLI library components for the tabular profiler.

pub mod duration;
pub mod logging;
