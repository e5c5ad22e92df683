//! Semantic column types.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::period::PeriodFreq;
use crate::value::NullKind;

/// The semantic type of a column; decides which statistics apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SemanticType {
    Integer,
    Float,
    Boolean,
    Complex,
    Datetime,
    Timedelta,
    Period(PeriodFreq),
    Interval,
    Categorical,
    Object,
}

impl SemanticType {
    /// Whether distribution statistics can be computed for this type.
    pub fn supports_distribution(self) -> bool {
        !matches!(self, Self::Categorical | Self::Object)
    }

    /// True for types whose values are point-in-time timestamps.
    pub fn is_timestamp(self) -> bool {
        matches!(self, Self::Datetime)
    }

    /// The missing-value marker columns of this type carry.
    ///
    /// Object columns may hold any null kind; `None` is only the default.
    pub fn null_kind(self) -> NullKind {
        match self {
            Self::Datetime | Self::Timedelta | Self::Period(_) => NullKind::NaT,
            Self::Object => NullKind::None,
            Self::Integer
            | Self::Float
            | Self::Boolean
            | Self::Complex
            | Self::Interval
            | Self::Categorical => NullKind::NaN,
        }
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer => f.write_str("int64"),
            Self::Float => f.write_str("float64"),
            Self::Boolean => f.write_str("bool"),
            Self::Complex => f.write_str("complex128"),
            Self::Datetime => f.write_str("datetime64[ns]"),
            Self::Timedelta => f.write_str("timedelta64[ns]"),
            Self::Period(freq) => write!(f, "period[{}]", freq.code()),
            Self::Interval => f.write_str("interval"),
            Self::Categorical => f.write_str("category"),
            Self::Object => f.write_str("object"),
        }
    }
}

impl Serialize for SemanticType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
