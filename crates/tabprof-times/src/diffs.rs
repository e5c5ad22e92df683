//! Time-Ordering & Gap Engine.
//!
//! Timestamps are sorted ascending (missing timestamps last) and differenced
//! against their predecessor. Gaps are the differences strictly above a
//! threshold, largest first.

use chrono::{NaiveDateTime, TimeDelta};

use tabprof_model::{Column, ProfileError, Result, RowLabels, Table, Value};

/// Anything that can yield a sequence of (possibly missing) timestamps.
pub trait TimestampSource {
    /// The timestamps in storage order.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::InvalidInput`] when the source is not timestamp-typed.
    fn timestamps(&self) -> Result<Vec<Option<NaiveDateTime>>>;
}

impl TimestampSource for Column {
    fn timestamps(&self) -> Result<Vec<Option<NaiveDateTime>>> {
        if !self.dtype().is_timestamp() {
            return Err(ProfileError::invalid(format!(
                "column '{}' should be of datetime dtype, found {}",
                self.display_name(),
                self.dtype()
            )));
        }
        Ok(self.values().iter().map(Value::as_datetime).collect())
    }
}

impl TimestampSource for RowLabels {
    fn timestamps(&self) -> Result<Vec<Option<NaiveDateTime>>> {
        self.as_timestamps()
            .map(|stamps| stamps.iter().copied().map(Some).collect())
            .ok_or_else(|| {
                ProfileError::invalid(format!(
                    "row labels should be timestamps, found {}",
                    self.dtype()
                ))
            })
    }
}

impl TimestampSource for [NaiveDateTime] {
    fn timestamps(&self) -> Result<Vec<Option<NaiveDateTime>>> {
        Ok(self.iter().copied().map(Some).collect())
    }
}

/// Containers with a row-label axis.
pub trait Labeled {
    fn row_labels(&self) -> &RowLabels;
}

impl Labeled for Column {
    fn row_labels(&self) -> &RowLabels {
        self.labels()
    }
}

impl Labeled for Table {
    fn row_labels(&self) -> &RowLabels {
        self.labels()
    }
}

/// A sorted timestamp and its distance to the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeDiff {
    pub at: Option<NaiveDateTime>,
    /// `None` for the first entry and next to missing timestamps.
    pub diff: Option<TimeDelta>,
}

/// Successive differences, ascending by timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TimeDiffs {
    entries: Vec<TimeDiff>,
}

impl TimeDiffs {
    pub fn entries(&self) -> &[TimeDiff] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TimeDiff> {
        self.entries.iter()
    }
}

/// A difference above the threshold, ending at `at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gap {
    pub at: NaiveDateTime,
    pub duration: TimeDelta,
}

/// Gaps sorted by descending duration; equal gaps stay in time order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Gaps {
    entries: Vec<Gap>,
}

impl Gaps {
    pub fn entries(&self) -> &[Gap] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Gap> {
        self.entries.iter()
    }

    /// Sum of each gap's excess over `threshold`.
    pub fn excess_over(&self, threshold: TimeDelta) -> TimeDelta {
        self.entries
            .iter()
            .fold(TimeDelta::zero(), |total, gap| {
                total + (gap.duration - threshold)
            })
    }
}

fn diffs_of(mut stamps: Vec<Option<NaiveDateTime>>) -> TimeDiffs {
    stamps.sort_by_key(|stamp| (stamp.is_none(), *stamp));
    let entries = stamps
        .iter()
        .enumerate()
        .map(|(i, &at)| {
            let previous = i.checked_sub(1).and_then(|p| stamps[p]);
            let diff = match (previous, at) {
                (Some(previous), Some(current)) => Some(current - previous),
                _ => None,
            };
            TimeDiff { at, diff }
        })
        .collect();
    TimeDiffs { entries }
}

/// Differences between successive sorted values.
///
/// # Errors
///
/// Returns [`ProfileError::InvalidInput`] if `values` is not timestamp-typed.
pub fn time_diffs<S: TimestampSource + ?Sized>(values: &S) -> Result<TimeDiffs> {
    Ok(diffs_of(values.timestamps()?))
}

/// Differences between successive sorted row labels.
///
/// # Errors
///
/// Returns [`ProfileError::InvalidInput`] if the row labels are not timestamps.
pub fn time_diffs_by_label<L: Labeled + ?Sized>(container: &L) -> Result<TimeDiffs> {
    time_diffs(container.row_labels())
}

pub(crate) fn check_threshold(threshold: TimeDelta) -> Result<()> {
    if threshold < TimeDelta::zero() {
        return Err(ProfileError::invalid(format!(
            "gap threshold must not be negative, got {threshold}"
        )));
    }
    Ok(())
}

fn gaps_of(diffs: &TimeDiffs, threshold: TimeDelta) -> Gaps {
    let mut entries: Vec<Gap> = diffs
        .iter()
        .filter_map(|entry| match (entry.at, entry.diff) {
            (Some(at), Some(duration)) if duration > threshold => Some(Gap { at, duration }),
            _ => None,
        })
        .collect();
    entries.sort_by(|a, b| b.duration.cmp(&a.duration));
    Gaps { entries }
}

/// Differences between sorted values that exceed `threshold`.
///
/// # Errors
///
/// Returns [`ProfileError::InvalidInput`] for non-timestamp input or a
/// negative threshold.
pub fn find_gaps<S: TimestampSource + ?Sized>(values: &S, threshold: TimeDelta) -> Result<Gaps> {
    check_threshold(threshold)?;
    Ok(gaps_of(&time_diffs(values)?, threshold))
}

/// Differences between sorted row labels that exceed `threshold`.
///
/// # Errors
///
/// Returns [`ProfileError::InvalidInput`] for non-timestamp labels or a
/// negative threshold.
pub fn find_gaps_by_label<L: Labeled + ?Sized>(
    container: &L,
    threshold: TimeDelta,
) -> Result<Gaps> {
    check_threshold(threshold)?;
    Ok(gaps_of(&time_diffs_by_label(container)?, threshold))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tabprof_model::{SemanticType, format_timedelta};

    fn hour(h: i64) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(1999, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            + TimeDelta::hours(h)
    }

    /// 24 hourly stamps with 03:00, 08:00, 09:00 and 10:00 removed, shuffled.
    fn shuffled_hours() -> Vec<NaiveDateTime> {
        let mut hours: Vec<i64> = (0..24).filter(|h| ![3, 8, 9, 10].contains(h)).collect();
        hours.reverse();
        hours.swap(0, 7);
        hours.into_iter().map(hour).collect()
    }

    #[test]
    fn test_time_diffs_sorts_and_differences() {
        let stamps = [hour(5), hour(0), hour(1), hour(2)];
        let diffs = time_diffs(&stamps[..]).unwrap();
        let at: Vec<_> = diffs.iter().map(|d| d.at).collect();
        assert_eq!(at, [hour(0), hour(1), hour(2), hour(5)].map(Some));
        let durations: Vec<_> = diffs.iter().map(|d| d.diff).collect();
        let delta = |h| Some(TimeDelta::hours(h));
        assert_eq!(durations, vec![None, delta(1), delta(1), delta(3)]);
    }

    #[test]
    fn test_time_diffs_column_with_missing() {
        let column = Column::new(
            "when",
            SemanticType::Datetime,
            [Some(hour(2)), None, Some(hour(0))],
        )
        .unwrap();
        let diffs = time_diffs(&column).unwrap();
        assert_eq!(diffs.len(), 3);
        assert_eq!(diffs.entries()[1].diff, Some(TimeDelta::hours(2)));
        let last = diffs.entries()[2];
        assert!(last.at.is_none());
        assert!(last.diff.is_none());
    }

    #[test]
    fn test_time_diffs_rejects_non_datetime() {
        let column = Column::new("x", SemanticType::Integer, [1_i64, 2]).unwrap();
        let err = time_diffs(&column).unwrap_err();
        assert!(err.to_string().contains("should be of datetime dtype"));
    }

    #[test]
    fn test_single_element() {
        let diffs = time_diffs(&[hour(0)][..]).unwrap();
        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs.entries()[0].at, Some(hour(0)));
        assert!(diffs.entries()[0].diff.is_none());
        let gaps = find_gaps(&[hour(0)][..], TimeDelta::zero()).unwrap();
        assert!(gaps.is_empty());
    }

    #[test]
    fn test_find_gaps_by_label() {
        let stamps = shuffled_hours();
        let column = Column::new("v", SemanticType::Integer, 0..stamps.len() as i64)
            .unwrap()
            .with_timestamps(stamps)
            .unwrap();
        let gaps = find_gaps_by_label(&column, TimeDelta::hours(1)).unwrap();
        let found: Vec<_> = gaps.iter().map(|g| (g.at, g.duration)).collect();
        let expected = vec![
            (hour(11), TimeDelta::hours(4)),
            (hour(4), TimeDelta::hours(2)),
        ];
        assert_eq!(found, expected);
    }

    #[test]
    fn test_find_gaps_by_label_on_table() {
        let stamps: Vec<_> = (0..24)
            .filter(|h| !(8..=10).contains(h))
            .map(hour)
            .collect();
        let column = Column::new("v", SemanticType::Integer, 0..21_i64).unwrap();
        let table = Table::new(vec![column])
            .unwrap()
            .with_labels(RowLabels::Timestamps(stamps))
            .unwrap();
        let gaps = find_gaps_by_label(&table, TimeDelta::hours(1)).unwrap();
        assert_eq!(gaps.len(), 1);
        let gap = gaps.entries()[0];
        assert_eq!(gap.at, hour(11));
        assert_eq!(gap.duration, TimeDelta::hours(4));
        assert_eq!(format_timedelta(&gap.duration), "0 days 04:00:00");
    }

    #[test]
    fn test_equal_gaps_keep_time_order() {
        let stamps = [hour(10), hour(0), hour(4), hour(6)];
        let gaps = find_gaps(&stamps[..], TimeDelta::hours(1)).unwrap();
        let at: Vec<_> = gaps.iter().map(|g| g.at).collect();
        assert_eq!(at, vec![hour(4), hour(10), hour(6)]);
    }

    #[test]
    fn test_labels_must_be_timestamps() {
        let column = Column::new("v", SemanticType::Integer, [1_i64]).unwrap();
        let err = time_diffs_by_label(&column).unwrap_err();
        assert!(err.to_string().contains("row labels should be timestamps"));
    }

    #[test]
    fn test_negative_threshold() {
        let err = find_gaps(&[hour(0)][..], TimeDelta::hours(-1)).unwrap_err();
        assert!(matches!(err, ProfileError::InvalidInput { .. }));
    }

    #[test]
    fn test_excess_over() {
        let stamps = [hour(0), hour(3), hour(5)];
        let gaps = find_gaps(&stamps[..], TimeDelta::hours(1)).unwrap();
        assert_eq!(gaps.excess_over(TimeDelta::hours(1)), TimeDelta::hours(3));
    }
}
