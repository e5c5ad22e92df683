//! Category Gap Aggregator.

use chrono::{NaiveDateTime, TimeDelta};
use tracing::{debug, warn};

use tabprof_model::{Column, ProfileError, Result, Value, group_values};

use crate::diffs::{check_threshold, find_gaps};

/// Default cap on distinct categories.
pub const DEFAULT_MAX_CATEGORIES: usize = 50;

/// Total time a category was absent from the observed range.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryGap {
    pub category: Value,
    pub cumulative_gap: TimeDelta,
}

/// Per-category cumulative gaps, largest first.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CategoryGaps {
    entries: Vec<CategoryGap>,
}

impl CategoryGaps {
    pub fn entries(&self) -> &[CategoryGap] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryGap> {
        self.entries.iter()
    }

    /// Gap of the category equal to `category`.
    pub fn get(&self, category: &Value) -> Option<TimeDelta> {
        let key = category.key();
        self.entries
            .iter()
            .find(|entry| entry.category.key() == key)
            .map(|entry| entry.cumulative_gap)
    }
}

fn span(stamps: &[NaiveDateTime]) -> TimeDelta {
    match (stamps.iter().min(), stamps.iter().max()) {
        (Some(first), Some(last)) => *last - *first,
        _ => TimeDelta::zero(),
    }
}

/// Cumulative gap per distinct value of a time-indexed column.
///
/// For a category seen from `first_c` to `last_c` in a column spanning
/// `first..last`, the gap is the time outside `first_c..last_c` plus, for
/// every internal difference above `threshold`, the part above it. Each
/// missing-value kind counts as its own category.
///
/// Returns `Ok(None)` and logs a warning when the column has more than
/// `max_categories` distinct values.
///
/// # Errors
///
/// Returns [`ProfileError::InvalidInput`] if the row labels are not timestamps
/// or `threshold` is negative.
pub fn category_gaps(
    column: &Column,
    threshold: TimeDelta,
    max_categories: usize,
) -> Result<Option<CategoryGaps>> {
    let Some(stamps) = column.labels().as_timestamps() else {
        return Err(ProfileError::invalid(format!(
            "column '{}' should have timestamp row labels, found {}",
            column.display_name(),
            column.labels().dtype()
        )));
    };
    check_threshold(threshold)?;

    let groups = group_values(column.values(), false);
    if groups.len() > max_categories {
        warn!(
            column = column.display_name(),
            categories = groups.len(),
            max_categories,
            "too many categories to compute gaps; raise max_categories to compute them"
        );
        return Ok(None);
    }
    debug!(
        column = column.display_name(),
        categories = groups.len(),
        "computing category gaps"
    );

    let range = span(stamps);
    let mut entries = groups
        .iter()
        .map(|group| {
            let own: Vec<NaiveDateTime> = group.positions.iter().map(|&i| stamps[i]).collect();
            let internal = find_gaps(own.as_slice(), threshold)?;
            Ok(CategoryGap {
                category: group.value.clone(),
                cumulative_gap: range - span(&own) + internal.excess_over(threshold),
            })
        })
        .collect::<Result<Vec<_>>>()?;
    entries.sort_by(|a, b| b.cumulative_gap.cmp(&a.cumulative_gap));
    Ok(Some(CategoryGaps { entries }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tabprof_model::{NullKind, SemanticType};

    fn hour(h: i64) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(1999, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            + TimeDelta::hours(h)
    }

    fn labeled(values: Vec<Value>, hours: &[i64]) -> Column {
        Column::new("category", SemanticType::Object, values)
            .unwrap()
            .with_timestamps(hours.iter().copied().map(hour).collect())
            .unwrap()
    }

    #[test]
    fn test_null_kinds_are_separate_categories() {
        let hours: Vec<i64> = (0..13).map(|i| i * 2).collect();
        let mut values: Vec<Value> = Vec::new();
        for kind in [NullKind::None, NullKind::Na, NullKind::NaN, NullKind::NaT] {
            values.extend([Value::Null(kind), Value::Null(kind)]);
        }
        values.extend(std::iter::repeat_n(Value::from("Quahog"), 5));
        let column = labeled(values, &hours);
        let gaps = category_gaps(&column, TimeDelta::hours(1), DEFAULT_MAX_CATEGORIES)
            .unwrap()
            .unwrap();
        let summary: Vec<(String, i64)> = gaps
            .iter()
            .map(|g| (g.category.to_string(), g.cumulative_gap.num_hours()))
            .collect();
        let expected = vec![
            ("None".to_string(), 23),
            ("<NA>".to_string(), 23),
            ("nan".to_string(), 23),
            ("NaT".to_string(), 23),
            ("Quahog".to_string(), 20),
        ];
        assert_eq!(summary, expected);
    }

    #[test]
    fn test_late_starting_category() {
        let days = 365;
        let delay = 180;
        let mut hours = Vec::new();
        let mut values = Vec::new();
        for day in 0..days {
            hours.push(day * 24);
            values.push(Value::from("Springfield"));
            if day >= delay {
                hours.push(day * 24);
                values.push(Value::from("Quahog"));
            }
        }
        hours.push(days * 24);
        values.push(Value::from("Springfield"));
        hours.push(days * 24);
        values.push(Value::from("Quahog"));
        let column = labeled(values, &hours);
        let gaps = category_gaps(&column, TimeDelta::days(1), DEFAULT_MAX_CATEGORIES)
            .unwrap()
            .unwrap();
        let quahog = Value::from("Quahog");
        let springfield = Value::from("Springfield");
        assert_eq!(gaps.get(&quahog), Some(TimeDelta::days(delay)));
        assert_eq!(gaps.get(&springfield), Some(TimeDelta::zero()));
        assert_eq!(gaps.entries()[0].category, quahog);
    }

    #[test]
    fn test_single_timestamp_has_no_gap() {
        let column = labeled(vec![Value::from("a"), Value::from("b")], &[0, 0]);
        let gaps = category_gaps(&column, TimeDelta::hours(1), 50)
            .unwrap()
            .unwrap();
        assert!(gaps.iter().all(|g| g.cumulative_gap == TimeDelta::zero()));
    }

    #[test]
    fn test_too_many_categories_returns_none() {
        let values: Vec<Value> = ["a", "b", "c", "d", "e", "f"]
            .into_iter()
            .map(Value::from)
            .collect();
        let column = labeled(values, &[0, 1, 2, 3, 4, 5]);
        let result = category_gaps(&column, TimeDelta::hours(1), 5).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_requires_timestamp_labels() {
        let column = Column::new("category", SemanticType::Object, ["a"]).unwrap();
        let err = category_gaps(&column, TimeDelta::hours(1), 50).unwrap_err();
        assert!(err.to_string().contains("timestamp row labels"));
    }

    #[test]
    fn test_negative_threshold() {
        let column = labeled(vec![Value::from("a")], &[0]);
        assert!(category_gaps(&column, TimeDelta::hours(-2), 50).is_err());
    }
}
