//! Statistic names, the per-type dispatch table and the result container.

use std::fmt;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use tabprof_model::{SemanticType, Value};

/// A distribution statistic.
///
/// Variant order is the canonical output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Statistic {
    Count,
    Min,
    P1,
    P5,
    P25,
    P50,
    P75,
    P95,
    P99,
    Max,
    Mean,
    StandardDeviation,
    Median,
    MedianAbsoluteDeviation,
    Skew,
}

use Statistic::{
    Count, Max, Mean, Median, MedianAbsoluteDeviation, Min, P1, P5, P25, P50, P75, P95, P99, Skew,
    StandardDeviation,
};

impl Statistic {
    /// Every statistic in canonical order.
    pub const CANONICAL: [Statistic; 15] = [
        Count,
        Min,
        P1,
        P5,
        P25,
        P50,
        P75,
        P95,
        P99,
        Max,
        Mean,
        StandardDeviation,
        Median,
        MedianAbsoluteDeviation,
        Skew,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Count => "count",
            Min => "min",
            P1 => "1%",
            P5 => "5%",
            P25 => "25%",
            P50 => "50%",
            P75 => "75%",
            P95 => "95%",
            P99 => "99%",
            Max => "max",
            Mean => "mean",
            StandardDeviation => "standard deviation",
            Median => "median",
            MedianAbsoluteDeviation => "median absolute deviation",
            Skew => "skew",
        }
    }

    /// Quantile level for the percentile statistics.
    pub fn quantile(self) -> Option<f64> {
        match self {
            P1 => Some(0.01),
            P5 => Some(0.05),
            P25 => Some(0.25),
            P50 => Some(0.5),
            P75 => Some(0.75),
            P95 => Some(0.95),
            P99 => Some(0.99),
            _ => None,
        }
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Statistic {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

const INTERVAL: &[Statistic] = &[Count, Min, Max];
const PERIOD: &[Statistic] = &[Count, Min, P1, P5, P25, P50, P75, P95, P99, Max, Median];
const BOOLEAN: &[Statistic] = &[Count, Min, Max, Mean];
const COMPLEX: &[Statistic] = &[Count, Min, Max, Mean, Median];
const DATETIME: &[Statistic] = &[
    Count,
    Min,
    P1,
    P5,
    P25,
    P50,
    P75,
    P95,
    P99,
    Max,
    Mean,
    StandardDeviation,
    Median,
];
const TIMEDELTA: &[Statistic] = &[
    Count,
    Min,
    P1,
    P5,
    P25,
    P50,
    P75,
    P95,
    P99,
    Max,
    Mean,
    StandardDeviation,
    Median,
    MedianAbsoluteDeviation,
];
const NUMERIC: &[Statistic] = &Statistic::CANONICAL;

/// The statistics computed for `dtype`, in canonical order.
///
/// `None` for types without distribution statistics.
pub fn statistic_plan(dtype: SemanticType) -> Option<&'static [Statistic]> {
    match dtype {
        SemanticType::Interval => Some(INTERVAL),
        SemanticType::Period(_) => Some(PERIOD),
        SemanticType::Boolean => Some(BOOLEAN),
        SemanticType::Complex => Some(COMPLEX),
        SemanticType::Datetime => Some(DATETIME),
        SemanticType::Timedelta => Some(TIMEDELTA),
        SemanticType::Integer | SemanticType::Float => Some(NUMERIC),
        SemanticType::Categorical | SemanticType::Object => None,
    }
}

/// Computed statistics of one column, in canonical order.
#[derive(Debug, Clone, PartialEq)]
pub struct Statistics {
    dtype: SemanticType,
    entries: Vec<(Statistic, Value)>,
}

impl Statistics {
    pub(crate) fn new(dtype: SemanticType, entries: Vec<(Statistic, Value)>) -> Self {
        Self { dtype, entries }
    }

    /// Type of the column the statistics describe.
    pub fn dtype(&self) -> SemanticType {
        self.dtype
    }

    pub fn get(&self, statistic: Statistic) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(name, _)| *name == statistic)
            .map(|(_, value)| value)
    }

    pub fn keys(&self) -> impl Iterator<Item = Statistic> + '_ {
        self.entries.iter().map(|(name, _)| *name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Statistic, &Value)> {
        self.entries.iter().map(|(name, value)| (*name, value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for Statistics {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name.as_str(), value)?;
        }
        map.end()
    }
}
