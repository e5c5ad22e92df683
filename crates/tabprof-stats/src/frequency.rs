//! Frequency Table Engine.

use serde::Serialize;

use tabprof_model::{Column, ValueGroup, abbreviate_string, format_percent, group_values};

/// Value labels are cut to this many characters.
pub const VALUE_LABEL_LIMIT: usize = 60;

/// One distinct value with its count and share of the non-missing total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrequencyRow {
    pub value: String,
    pub count: usize,
    #[serde(rename = "% of total")]
    pub percent: String,
}

/// Value counts sorted by descending count.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct FrequencyTable {
    rows: Vec<FrequencyRow>,
}

impl FrequencyTable {
    pub fn rows(&self) -> &[FrequencyRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sum of all counts, i.e. the non-missing length of the column.
    pub fn total(&self) -> usize {
        self.rows.iter().map(|row| row.count).sum()
    }

    /// The first `most` and last `least` rows, or every row when that covers
    /// the whole table.
    pub fn abbreviated(&self, most: usize, least: usize) -> Vec<&FrequencyRow> {
        if self.rows.len() <= most.saturating_add(least) {
            return self.rows.iter().collect();
        }
        let head = self.rows[..most].iter();
        let tail = self.rows[self.rows.len() - least..].iter();
        head.chain(tail).collect()
    }
}

/// Counts each distinct non-missing value of `column`.
///
/// Ties keep the order in which values were first seen.
pub fn frequency_table(column: &Column) -> FrequencyTable {
    let groups = group_values(column.values(), true);
    let total: usize = groups.iter().map(ValueGroup::count).sum();
    let mut rows: Vec<FrequencyRow> = groups
        .iter()
        .map(|group| FrequencyRow {
            value: abbreviate_string(&group.value.to_string(), VALUE_LABEL_LIMIT),
            count: group.count(),
            percent: format_percent(group.count() as f64 / total as f64),
        })
        .collect();
    rows.sort_by(|a, b| b.count.cmp(&a.count));
    FrequencyTable { rows }
}
