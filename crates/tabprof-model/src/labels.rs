//! Row labels (the index axis).

use chrono::NaiveDateTime;

use crate::dtype::SemanticType;
use crate::value::Value;

/// Fixed overhead reported for a positional label axis.
const POSITIONAL_LABEL_BYTES: usize = 132;

/// Per-row labels of a column or table.
#[derive(Debug, Clone, PartialEq)]
pub enum RowLabels {
    /// `0..n`.
    Positional(usize),
    /// Timestamp labels; enables the time-based operations.
    Timestamps(Vec<NaiveDateTime>),
    /// Arbitrary labels.
    Values(Vec<Value>),
}

impl Default for RowLabels {
    fn default() -> Self {
        Self::Positional(0)
    }
}

impl RowLabels {
    pub fn len(&self) -> usize {
        match self {
            Self::Positional(n) => *n,
            Self::Timestamps(stamps) => stamps.len(),
            Self::Values(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The labels as timestamps, when the axis is time-indexed.
    pub fn as_timestamps(&self) -> Option<&[NaiveDateTime]> {
        match self {
            Self::Timestamps(stamps) => Some(stamps),
            _ => None,
        }
    }

    /// Semantic type of the label axis.
    pub fn dtype(&self) -> SemanticType {
        match self {
            Self::Positional(_) => SemanticType::Integer,
            Self::Timestamps(_) => SemanticType::Datetime,
            Self::Values(_) => SemanticType::Object,
        }
    }

    /// Label at `position`.
    pub fn get(&self, position: usize) -> Option<Value> {
        match self {
            Self::Positional(n) if position < *n => {
                Some(Value::Int(i64::try_from(position).unwrap_or(i64::MAX)))
            }
            Self::Positional(_) => None,
            Self::Timestamps(stamps) => stamps.get(position).copied().map(Value::Datetime),
            Self::Values(values) => values.get(position).cloned(),
        }
    }

    /// Labels at the given positions, in that order.
    ///
    /// Positional labels become explicit values so the original positions survive.
    pub fn select(&self, positions: &[usize]) -> Self {
        match self {
            Self::Timestamps(stamps) => {
                let picked = positions.iter().filter_map(|&i| stamps.get(i).copied());
                Self::Timestamps(picked.collect())
            }
            _ => Self::Values(positions.iter().filter_map(|&i| self.get(i)).collect()),
        }
    }

    /// Estimated bytes held by the label axis.
    pub fn memory_bytes(&self) -> usize {
        match self {
            Self::Positional(_) => POSITIONAL_LABEL_BYTES,
            Self::Timestamps(stamps) => stamps.len() * 8,
            Self::Values(values) => crate::column::object_bytes(values),
        }
    }
}
