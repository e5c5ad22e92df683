//! Single-column profile.

use serde::Serialize;
use tracing::debug;

use tabprof_model::{Column, SemanticType, UNNAMED_COLUMN, group_values};
use tabprof_stats::{
    FrequencyTable, Statistics, classify, compute_distribution_stats, frequency_table,
};

use crate::error::Result;
use crate::layout::ReportTable;
use crate::options::ProfileOptions;
use crate::report::Report;

/// Counts, value frequencies and distribution statistics of one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnProfile {
    pub name: String,
    pub dtype: SemanticType,
    /// Non-missing values.
    pub count: usize,
    /// Distinct non-missing values.
    pub num_unique: usize,
    pub num_nulls: usize,
    pub frequency: FrequencyTable,
    /// `None` for categorical and generic-object columns.
    pub stats: Option<Statistics>,
    #[serde(skip)]
    options: ProfileOptions,
}

impl ColumnProfile {
    /// Profiles `column`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ReportError::Profile`] if the statistics cannot be
    /// computed, e.g. for timestamps outside the nanosecond range.
    pub fn new(column: &Column, options: ProfileOptions) -> Result<Self> {
        let classification = classify(column);
        debug!(
            column = column.display_name(),
            dtype = %classification.semantic_type,
            distribution = classification.distribution_supported,
            "profiling column"
        );
        let stats = if classification.distribution_supported {
            Some(compute_distribution_stats(column)?)
        } else {
            None
        };
        Ok(Self {
            name: column.name().to_string(),
            dtype: column.dtype(),
            count: column.count(),
            num_unique: group_values(column.values(), true).len(),
            num_nulls: column.null_count(),
            frequency: frequency_table(column),
            stats,
            options,
        })
    }

    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            UNNAMED_COLUMN
        } else {
            &self.name
        }
    }

    fn info_table(&self) -> ReportTable {
        let mut table = ReportTable::new([format!("{} Info", self.display_name()), String::new()]);
        table.push_row(["Data Type".to_string(), self.dtype.to_string()]);
        table.push_row(["Count".to_string(), self.count.to_string()]);
        table.push_row(["Unique Values".to_string(), self.num_unique.to_string()]);
        table.push_row(["Null Values".to_string(), self.num_nulls.to_string()]);
        table
    }

    fn frequency_table(&self) -> ReportTable {
        let mut table = ReportTable::new(["Value", "Count", "% of total"]);
        for row in self
            .frequency
            .abbreviated(self.options.freq_most, self.options.freq_least)
        {
            table.push_row([
                row.value.clone(),
                row.count.to_string(),
                row.percent.clone(),
            ]);
        }
        table
    }

    fn stats_table(stats: &Statistics) -> ReportTable {
        let mut table = ReportTable::new(["Statistic", "Value"]).with_numeric_column(1);
        for (statistic, value) in stats.iter() {
            table.push_row([statistic.as_str().to_string(), value.to_string()]);
        }
        table
    }
}

impl Report for ColumnProfile {
    fn tables(&self) -> Vec<ReportTable> {
        let mut tables = vec![self.info_table(), self.frequency_table()];
        if let Some(stats) = &self.stats {
            tables.push(Self::stats_table(stats));
        }
        tables
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabprof_model::{Complex, NullKind, Value};

    fn injuries() -> Column {
        let mut values = vec![0_i64; 160];
        values.extend([1; 29]);
        values.extend([2; 7]);
        values.extend([3; 3]);
        values.push(8);
        Column::new("injuries", SemanticType::Integer, values).unwrap()
    }

    #[test]
    fn test_counts() {
        let column = Column::new(
            "species",
            SemanticType::Object,
            [Some("oak"), None, Some("elm"), Some("oak")],
        )
        .unwrap();
        let profile = ColumnProfile::new(&column, ProfileOptions::default()).unwrap();
        assert_eq!(profile.count, 3);
        assert_eq!(profile.num_unique, 2);
        assert_eq!(profile.num_nulls, 1);
        assert!(profile.stats.is_none());
        assert_eq!(profile.tables().len(), 2);
    }

    #[test]
    fn test_numeric_profile_tables() {
        let profile = ColumnProfile::new(&injuries(), ProfileOptions::default()).unwrap();
        let tables = profile.tables();
        assert_eq!(tables.len(), 3);
        assert_eq!(tables[0].headers, vec!["injuries Info", ""]);
        assert_eq!(tables[0].rows[0], vec!["Data Type", "int64"]);
        assert_eq!(tables[1].rows[0], vec!["0", "160", "80.00%"]);
        let stats = &tables[2];
        assert_eq!(stats.rows.len(), 15);
        assert_eq!(stats.rows[0], vec!["count", "200"]);
        assert_eq!(stats.rows[10], vec!["mean", "0.3"]);
    }

    #[test]
    fn test_unnamed_column_header() {
        let column = injuries().rename("");
        let profile = ColumnProfile::new(&column, ProfileOptions::default()).unwrap();
        assert_eq!(profile.tables()[0].headers[0], "Series Info");
    }

    #[test]
    fn test_frequency_is_abbreviated() {
        let column = Column::new("x", SemanticType::Integer, 0..30_i64).unwrap();
        let options = ProfileOptions::default()
            .with_freq_most(2)
            .with_freq_least(1);
        let profile = ColumnProfile::new(&column, options).unwrap();
        let tables = profile.tables();
        let shown: Vec<&str> = tables[1]
            .rows
            .iter()
            .map(|row| row[0].as_str())
            .collect();
        assert_eq!(shown, vec!["0", "1", "29"]);
        assert_eq!(profile.frequency.len(), 30);
    }

    #[test]
    fn test_complex_values_keep_both_parts() {
        let column = Column::new(
            "z",
            SemanticType::Complex,
            [Complex::new(1.0, 1.0), Complex::new(3.0, -1.0)],
        )
        .unwrap();
        let profile = ColumnProfile::new(&column, ProfileOptions::default()).unwrap();
        let stats = &profile.tables()[2];
        assert_eq!(stats.rows[1], vec!["min", "(1+1j)"]);
        assert_eq!(stats.rows[3], vec!["mean", "(2+0j)"]);
    }

    #[test]
    fn test_all_null_column() {
        let values = [Value::Null(NullKind::NaT)];
        let column = Column::new("t", SemanticType::Datetime, values).unwrap();
        let profile = ColumnProfile::new(&column, ProfileOptions::default()).unwrap();
        assert_eq!(profile.count, 0);
        assert!(profile.frequency.is_empty());
        let stats = profile.stats.as_ref().unwrap();
        assert_eq!(stats.len(), 13);
        assert!(profile.to_text().contains("NaT"));
    }
}
