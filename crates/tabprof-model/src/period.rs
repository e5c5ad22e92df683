//! Fixed-frequency calendar periods.
//!
//! A period is stored as an ordinal count of whole periods since the
//! 1970 epoch, which keeps ordering and arithmetic integer-exact.

use std::fmt;

use chrono::{Datelike, NaiveDate, TimeDelta};
use serde::Serialize;

/// Period frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum PeriodFreq {
    Year,
    Quarter,
    Month,
    Day,
}

impl PeriodFreq {
    /// Single-letter frequency code.
    pub fn code(self) -> &'static str {
        match self {
            Self::Year => "Y",
            Self::Quarter => "Q",
            Self::Month => "M",
            Self::Day => "D",
        }
    }
}

/// A calendar period such as `1999Q1` or `2000-03`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Period {
    freq: PeriodFreq,
    ordinal: i64,
}

fn epoch() -> NaiveDate {
    NaiveDate::default()
}

impl Period {
    pub fn new(freq: PeriodFreq, ordinal: i64) -> Self {
        Self { freq, ordinal }
    }

    /// The period of the given frequency containing `date`.
    pub fn from_date(date: NaiveDate, freq: PeriodFreq) -> Self {
        let years = i64::from(date.year()) - 1970;
        let month0 = i64::from(date.month0());
        let ordinal = match freq {
            PeriodFreq::Year => years,
            PeriodFreq::Quarter => years * 4 + month0 / 3,
            PeriodFreq::Month => years * 12 + month0,
            PeriodFreq::Day => (date - epoch()).num_days(),
        };
        Self { freq, ordinal }
    }

    pub fn freq(&self) -> PeriodFreq {
        self.freq
    }

    pub fn ordinal(&self) -> i64 {
        self.ordinal
    }

    /// First calendar day of the period, if representable.
    pub fn start_date(&self) -> Option<NaiveDate> {
        let year_month = |months_per_step: i64, steps_per_year: i64| {
            let year = 1970 + self.ordinal.div_euclid(steps_per_year);
            let month = self.ordinal.rem_euclid(steps_per_year) * months_per_step + 1;
            NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, u32::try_from(month).ok()?, 1)
        };
        match self.freq {
            PeriodFreq::Year => year_month(12, 1),
            PeriodFreq::Quarter => year_month(3, 4),
            PeriodFreq::Month => year_month(1, 12),
            PeriodFreq::Day => epoch().checked_add_signed(TimeDelta::try_days(self.ordinal)?),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(start) = self.start_date() else {
            return write!(f, "Period({}, {})", self.ordinal, self.freq.code());
        };
        match self.freq {
            PeriodFreq::Year => write!(f, "{}", start.year()),
            PeriodFreq::Quarter => write!(f, "{}Q{}", start.year(), start.month0() / 3 + 1),
            PeriodFreq::Month => write!(f, "{}", start.format("%Y-%m")),
            PeriodFreq::Day => write!(f, "{}", start.format("%Y-%m-%d")),
        }
    }
}
