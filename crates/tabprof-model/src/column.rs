//! Labeled, typed columns.

use std::collections::HashSet;

use chrono::NaiveDateTime;

use crate::dtype::SemanticType;
use crate::error::{ProfileError, Result};
use crate::labels::RowLabels;
use crate::value::Value;

/// Display name used for unnamed columns.
pub const UNNAMED_COLUMN: &str = "Series";

/// An ordered sequence of values of one semantic type with parallel row labels.
///
/// Every value conforms to `dtype` and `values.len() == labels.len()`; both
/// are checked on construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    dtype: SemanticType,
    values: Vec<Value>,
    labels: RowLabels,
}

impl Column {
    /// Builds a column with positional labels.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::InvalidInput`] if a value does not fit `dtype`.
    pub fn new<I, T>(name: impl Into<String>, dtype: SemanticType, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        let values = values
            .into_iter()
            .map(|value| value.into().conform(dtype))
            .collect::<Result<Vec<_>>>()?;
        let labels = RowLabels::Positional(values.len());
        Ok(Self {
            name: name.into(),
            dtype,
            values,
            labels,
        })
    }

    /// Replaces the row labels.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::InvalidInput`] on a length mismatch.
    pub fn with_labels(mut self, labels: RowLabels) -> Result<Self> {
        if labels.len() != self.values.len() {
            return Err(ProfileError::invalid(format!(
                "column '{}' has {} values but {} row labels",
                self.display_name(),
                self.values.len(),
                labels.len()
            )));
        }
        self.labels = labels;
        Ok(self)
    }

    /// Shorthand for timestamp row labels.
    pub fn with_timestamps(self, stamps: Vec<NaiveDateTime>) -> Result<Self> {
        self.with_labels(RowLabels::Timestamps(stamps))
    }

    #[must_use]
    pub fn rename(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// The column name; empty for unnamed columns.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The name, or `"Series"` when unnamed.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            UNNAMED_COLUMN
        } else {
            &self.name
        }
    }

    pub fn dtype(&self) -> SemanticType {
        self.dtype
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn labels(&self) -> &RowLabels {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Non-missing values in row order.
    pub fn non_null(&self) -> impl Iterator<Item = &Value> {
        self.values.iter().filter(|value| !value.is_null())
    }

    /// Number of non-missing values.
    pub fn count(&self) -> usize {
        self.non_null().count()
    }

    pub fn null_count(&self) -> usize {
        self.len() - self.count()
    }

    /// Rows at `positions`, with their labels.
    pub fn select(&self, positions: &[usize]) -> Self {
        Self {
            name: self.name.clone(),
            dtype: self.dtype,
            values: positions
                .iter()
                .filter_map(|&i| self.values.get(i).cloned())
                .collect(),
            labels: self.labels.select(positions),
        }
    }

    /// Estimated bytes held by the values.
    pub fn memory_bytes(&self) -> usize {
        match self.dtype {
            SemanticType::Boolean => self.len(),
            SemanticType::Complex | SemanticType::Interval => self.len() * 16,
            SemanticType::Integer
            | SemanticType::Float
            | SemanticType::Datetime
            | SemanticType::Timedelta
            | SemanticType::Period(_) => self.len() * 8,
            SemanticType::Categorical => {
                let mut seen = HashSet::new();
                let categories: Vec<Value> = self
                    .non_null()
                    .filter(|value| seen.insert(value.key()))
                    .cloned()
                    .collect();
                let code_width = if categories.len() < 128 { 1 } else { 2 };
                self.len() * code_width + object_bytes(&categories)
            }
            SemanticType::Object => object_bytes(&self.values),
        }
    }
}

/// Estimated footprint of boxed values: one pointer plus the boxed object each.
pub(crate) fn object_bytes(values: &[Value]) -> usize {
    values
        .iter()
        .map(|value| {
            let boxed = match value {
                Value::Str(s) => 49 + s.len(),
                Value::Null(_) => 16,
                Value::Float(_) => 24,
                Value::Int(_) | Value::Bool(_) => 28,
                Value::Complex(_) => 32,
                _ => 48 + value.heap_bytes(),
            };
            8 + boxed
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::NullKind;
    use chrono::NaiveDate;

    #[test]
    fn test_new_conforms_values() {
        let column = Column::new("x", SemanticType::Float, [Some(1.0), None]).unwrap();
        assert_eq!(
            column.values(),
            &[Value::Float(1.0), Value::Null(NullKind::NaN)]
        );
        assert_eq!(column.count(), 1);
        assert_eq!(column.null_count(), 1);
        assert_eq!(column.labels(), &RowLabels::Positional(2));
    }

    #[test]
    fn test_new_rejects_wrong_type() {
        let err = Column::new("x", SemanticType::Boolean, [1_i64]).unwrap_err();
        assert!(matches!(err, ProfileError::InvalidInput { .. }));
    }

    #[test]
    fn test_with_labels_checks_length() {
        let column = Column::new("x", SemanticType::Integer, [1_i64, 2]).unwrap();
        let stamp = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert!(column.clone().with_timestamps(vec![stamp]).is_err());
        assert!(column.with_timestamps(vec![stamp, stamp]).is_ok());
    }

    #[test]
    fn test_display_name_fallback() {
        let column = Column::new("", SemanticType::Integer, [1_i64]).unwrap();
        assert_eq!(column.display_name(), "Series");
        assert_eq!(column.rename("ids").display_name(), "ids");
    }

    #[test]
    fn test_select() {
        let column = Column::new("x", SemanticType::Integer, [10_i64, 20, 30]).unwrap();
        let picked = column.select(&[2, 0]);
        assert_eq!(picked.values(), &[Value::Int(30), Value::Int(10)]);
        assert_eq!(
            picked.labels(),
            &RowLabels::Values(vec![Value::Int(2), Value::Int(0)])
        );
    }

    #[test]
    fn test_memory_bytes() {
        let ints = Column::new("x", SemanticType::Integer, [1_i64, 2, 3]).unwrap();
        assert_eq!(ints.memory_bytes(), 24);
        let text = Column::new("s", SemanticType::Object, ["ab"]).unwrap();
        assert_eq!(text.memory_bytes(), 8 + 49 + 2);
    }
}
