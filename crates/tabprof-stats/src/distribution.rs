//! Distribution Statistics Engine.
//!
//! Each supported type gets a summary over its non-missing values; the
//! dispatch table in [`statistic_plan`] decides which statistics are read
//! from it. A statistic that is undefined for the sample (mean of nothing,
//! deviation of a single value) comes out as the column's missing marker.

use chrono::{NaiveDateTime, TimeDelta};
use tracing::debug;

use tabprof_model::{
    Column, Complex, Interval, Period, PeriodFreq, ProfileError, Result, SemanticType, Value,
};

use crate::numeric::{
    mean, median_abs_deviation, quantile_sorted, quantile_sorted_i64, sample_std, skew,
};
use crate::statistic::{Statistic, Statistics, statistic_plan};

/// Computes the distribution statistics for `column`.
///
/// Keys and their order depend only on the column's type; missing values are
/// excluded from every statistic.
///
/// # Errors
///
/// - [`ProfileError::UnsupportedType`] for categorical and generic-object columns
/// - [`ProfileError::InvalidInput`] if a timestamp or duration lies outside the
///   nanosecond range
pub fn compute_distribution_stats(column: &Column) -> Result<Statistics> {
    let dtype = column.dtype();
    let Some(plan) = statistic_plan(dtype) else {
        return Err(ProfileError::UnsupportedType { dtype });
    };
    debug!(
        column = column.display_name(),
        %dtype,
        statistics = plan.len(),
        "computing distribution statistics"
    );
    let summary = summarize(column)?;
    let count = Value::Int(i64::try_from(column.count()).unwrap_or(i64::MAX));
    let missing = Value::Null(dtype.null_kind());
    let entries = plan
        .iter()
        .map(|&statistic| {
            let value = match statistic {
                Statistic::Count => Some(count.clone()),
                other => summary.statistic(other),
            };
            (statistic, value.unwrap_or_else(|| missing.clone()))
        })
        .collect();
    Ok(Statistics::new(dtype, entries))
}

/// Per-type view of a column's non-missing values.
trait Summary {
    fn statistic(&self, statistic: Statistic) -> Option<Value>;
}

fn summarize(column: &Column) -> Result<Box<dyn Summary>> {
    let summary: Box<dyn Summary> = match column.dtype() {
        SemanticType::Integer | SemanticType::Float | SemanticType::Boolean => {
            Box::new(RealSummary::new(column))
        }
        SemanticType::Datetime | SemanticType::Timedelta => Box::new(TemporalSummary::new(column)?),
        SemanticType::Period(freq) => Box::new(PeriodSummary::new(column, freq)),
        SemanticType::Complex => Box::new(ComplexSummary::new(column)),
        SemanticType::Interval => Box::new(IntervalSummary::new(column)),
        dtype @ (SemanticType::Categorical | SemanticType::Object) => {
            return Err(ProfileError::UnsupportedType { dtype });
        }
    };
    Ok(summary)
}

/// Integers, floats and booleans, as sorted `f64`.
struct RealSummary {
    dtype: SemanticType,
    sorted: Vec<f64>,
    int_bounds: Option<(i64, i64)>,
}

impl RealSummary {
    fn new(column: &Column) -> Self {
        let mut sorted = Vec::with_capacity(column.len());
        let mut int_bounds: Option<(i64, i64)> = None;
        for value in column.non_null() {
            match value {
                Value::Int(v) => {
                    sorted.push(*v as f64);
                    int_bounds = Some(match int_bounds {
                        Some((lo, hi)) => (lo.min(*v), hi.max(*v)),
                        None => (*v, *v),
                    });
                }
                Value::Float(v) => sorted.push(*v),
                Value::Bool(v) => sorted.push(if *v { 1.0 } else { 0.0 }),
                _ => {}
            }
        }
        sorted.sort_by(f64::total_cmp);
        Self {
            dtype: column.dtype(),
            sorted,
            int_bounds,
        }
    }

    fn bound(&self, value: Option<&f64>, int_bound: Option<i64>) -> Option<Value> {
        match self.dtype {
            SemanticType::Integer => int_bound.map(Value::Int),
            SemanticType::Boolean => value.map(|v| Value::Bool(*v != 0.0)),
            _ => value.map(|v| Value::float(*v)),
        }
    }
}

impl Summary for RealSummary {
    fn statistic(&self, statistic: Statistic) -> Option<Value> {
        let value = match statistic {
            Statistic::Min => {
                return self.bound(self.sorted.first(), self.int_bounds.map(|(lo, _)| lo));
            }
            Statistic::Max => {
                return self.bound(self.sorted.last(), self.int_bounds.map(|(_, hi)| hi));
            }
            Statistic::Mean => mean(&self.sorted),
            Statistic::StandardDeviation => sample_std(&self.sorted),
            Statistic::Median => quantile_sorted(&self.sorted, 0.5),
            Statistic::MedianAbsoluteDeviation => median_abs_deviation(&self.sorted),
            Statistic::Skew => skew(&self.sorted),
            other => quantile_sorted(&self.sorted, other.quantile()?),
        };
        value.map(Value::float)
    }
}

/// Datetimes and timedeltas, as sorted nanosecond counts.
struct TemporalSummary {
    dtype: SemanticType,
    nanos: Vec<i64>,
}

fn nanos_of(value: &Value) -> Option<Result<i64>> {
    let span = match value {
        Value::Datetime(dt) => *dt - NaiveDateTime::default(),
        Value::Timedelta(td) => *td,
        _ => return None,
    };
    let Some(nanos) = span.num_nanoseconds() else {
        let message = format!("{value} is outside the nanosecond range");
        return Some(Err(ProfileError::invalid(message)));
    };
    Some(Ok(nanos))
}

impl TemporalSummary {
    fn new(column: &Column) -> Result<Self> {
        let mut nanos = column
            .non_null()
            .filter_map(nanos_of)
            .collect::<Result<Vec<_>>>()?;
        nanos.sort_unstable();
        Ok(Self {
            dtype: column.dtype(),
            nanos,
        })
    }

    fn point(&self, nanos: i64) -> Option<Value> {
        let span = TimeDelta::nanoseconds(nanos);
        match self.dtype {
            SemanticType::Datetime => NaiveDateTime::default()
                .checked_add_signed(span)
                .map(Value::Datetime),
            _ => Some(Value::Timedelta(span)),
        }
    }

    fn mean(&self) -> Option<i64> {
        let n = i128::try_from(self.nanos.len()).ok().filter(|n| *n > 0)?;
        let sum: i128 = self.nanos.iter().copied().map(i128::from).sum();
        let (quotient, remainder) = (sum.div_euclid(n), sum.rem_euclid(n));
        let rounded = if 2 * remainder >= n {
            quotient + 1
        } else {
            quotient
        };
        i64::try_from(rounded).ok()
    }

    fn std(&self) -> Option<Value> {
        let origin = *self.nanos.first()?;
        let offsets: Vec<f64> = self
            .nanos
            .iter()
            .map(|v| (i128::from(*v) - i128::from(origin)) as f64)
            .collect();
        let std = sample_std(&offsets)?;
        Some(Value::Timedelta(TimeDelta::nanoseconds(std.round() as i64)))
    }

    fn median_abs_deviation(&self) -> Option<Value> {
        let median = i128::from(quantile_sorted_i64(&self.nanos, 0.5)?);
        let mut deviations: Vec<i64> = self
            .nanos
            .iter()
            .map(|v| i64::try_from((i128::from(*v) - median).abs()).unwrap_or(i64::MAX))
            .collect();
        deviations.sort_unstable();
        let mad = quantile_sorted_i64(&deviations, 0.5)?;
        Some(Value::Timedelta(TimeDelta::nanoseconds(mad)))
    }
}

impl Summary for TemporalSummary {
    fn statistic(&self, statistic: Statistic) -> Option<Value> {
        match statistic {
            Statistic::Min => self.point(*self.nanos.first()?),
            Statistic::Max => self.point(*self.nanos.last()?),
            Statistic::Mean => self.point(self.mean()?),
            Statistic::StandardDeviation => self.std(),
            Statistic::Median => self.point(quantile_sorted_i64(&self.nanos, 0.5)?),
            Statistic::MedianAbsoluteDeviation => self.median_abs_deviation(),
            other => self.point(quantile_sorted_i64(&self.nanos, other.quantile()?)?),
        }
    }
}

/// Periods, as sorted ordinals; interpolated positions round to whole periods.
struct PeriodSummary {
    freq: PeriodFreq,
    ordinals: Vec<i64>,
}

impl PeriodSummary {
    fn new(column: &Column, freq: PeriodFreq) -> Self {
        let mut ordinals: Vec<i64> = column
            .non_null()
            .filter_map(|value| match value {
                Value::Period(p) => Some(p.ordinal()),
                _ => None,
            })
            .collect();
        ordinals.sort_unstable();
        Self { freq, ordinals }
    }

    fn period(&self, ordinal: i64) -> Value {
        Value::Period(Period::new(self.freq, ordinal))
    }
}

impl Summary for PeriodSummary {
    fn statistic(&self, statistic: Statistic) -> Option<Value> {
        let ordinal = match statistic {
            Statistic::Min => *self.ordinals.first()?,
            Statistic::Max => *self.ordinals.last()?,
            Statistic::Median => quantile_sorted_i64(&self.ordinals, 0.5)?,
            other => quantile_sorted_i64(&self.ordinals, other.quantile()?)?,
        };
        Some(self.period(ordinal))
    }
}

/// Complex values in lexical (real, then imaginary) order.
struct ComplexSummary {
    sorted: Vec<Complex>,
}

impl ComplexSummary {
    fn new(column: &Column) -> Self {
        let mut sorted: Vec<Complex> = column
            .non_null()
            .filter_map(|value| match value {
                Value::Complex(c) => Some(*c),
                _ => None,
            })
            .collect();
        sorted.sort_by(Complex::lexical_cmp);
        Self { sorted }
    }

    /// Middle element, or the average of the two middle elements.
    fn median(&self) -> Option<Complex> {
        let n = self.sorted.len();
        if n == 0 {
            return None;
        }
        let upper = self.sorted[n / 2];
        if n % 2 == 1 {
            Some(upper)
        } else {
            Some((self.sorted[n / 2 - 1] + upper) / 2.0)
        }
    }
}

impl Summary for ComplexSummary {
    fn statistic(&self, statistic: Statistic) -> Option<Value> {
        let value = match statistic {
            Statistic::Min => *self.sorted.first()?,
            Statistic::Max => *self.sorted.last()?,
            Statistic::Mean => {
                let n = self.sorted.len();
                if n == 0 {
                    return None;
                }
                let sum = self
                    .sorted
                    .iter()
                    .fold(Complex::default(), |acc, c| acc + *c);
                sum / n as f64
            }
            Statistic::Median => self.median()?,
            _ => return None,
        };
        Some(Value::Complex(value))
    }
}

/// Intervals ordered by their bounds.
struct IntervalSummary {
    sorted: Vec<Interval>,
}

impl IntervalSummary {
    fn new(column: &Column) -> Self {
        let mut sorted: Vec<Interval> = column
            .non_null()
            .filter_map(|value| match value {
                Value::Interval(i) => Some(*i),
                _ => None,
            })
            .collect();
        sorted.sort_by(Interval::bound_cmp);
        Self { sorted }
    }
}

impl Summary for IntervalSummary {
    fn statistic(&self, statistic: Statistic) -> Option<Value> {
        match statistic {
            Statistic::Min => self.sorted.first().copied().map(Value::Interval),
            Statistic::Max => self.sorted.last().copied().map(Value::Interval),
            _ => None,
        }
    }
}
