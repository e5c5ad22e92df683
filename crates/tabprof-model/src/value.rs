//! Cell values and missing-value markers.

use std::fmt;

use chrono::{NaiveDateTime, TimeDelta};
use serde::{Serialize, Serializer};

use crate::complex::Complex;
use crate::dtype::SemanticType;
use crate::error::{ProfileError, Result};
use crate::format::{format_datetime, format_float, format_timedelta};
use crate::interval::{Interval, IntervalClosed};
use crate::period::Period;

/// The flavour of a missing value.
///
/// Generic-object columns keep these apart: a `None` and a `NaN` in the same
/// column are different categories when grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NullKind {
    /// Absent datum.
    None,
    /// Not-a-number.
    NaN,
    /// Nullable-extension "not available".
    Na,
    /// Not-a-time.
    NaT,
}

impl fmt::Display for NullKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::None => "None",
            Self::NaN => "nan",
            Self::Na => "<NA>",
            Self::NaT => "NaT",
        })
    }
}

/// A single cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null(NullKind),
    Int(i64),
    Float(f64),
    Bool(bool),
    Complex(Complex),
    Datetime(NaiveDateTime),
    Timedelta(TimeDelta),
    Period(Period),
    Interval(Interval),
    Str(String),
}

impl Value {
    /// Float constructor that maps NaN to a missing value.
    pub fn float(v: f64) -> Self {
        if v.is_nan() {
            Self::Null(NullKind::NaN)
        } else {
            Self::Float(v)
        }
    }

    pub fn is_null(&self) -> bool {
        match self {
            Self::Null(_) => true,
            Self::Float(v) => v.is_nan(),
            Self::Complex(c) => c.is_nan(),
            _ => false,
        }
    }

    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            Self::Datetime(v) => Some(*v),
            _ => None,
        }
    }

    /// Coerces the value into a cell of `dtype`.
    ///
    /// Typed columns carry a single null kind, so any missing value becomes
    /// `dtype.null_kind()`; object columns keep the kind they were given.
    pub fn conform(self, dtype: SemanticType) -> Result<Self> {
        if self.is_null() {
            return Ok(match (dtype, self) {
                (SemanticType::Object, Self::Null(kind)) => Self::Null(kind),
                (SemanticType::Object, _) => Self::Null(NullKind::NaN),
                _ => Self::Null(dtype.null_kind()),
            });
        }
        let conformed = match (dtype, self) {
            (SemanticType::Object, value) => value,
            (SemanticType::Integer, value @ Self::Int(_))
            | (SemanticType::Float, value @ Self::Float(_))
            | (SemanticType::Boolean, value @ Self::Bool(_))
            | (SemanticType::Complex, value @ Self::Complex(_))
            | (SemanticType::Datetime, value @ Self::Datetime(_))
            | (SemanticType::Timedelta, value @ Self::Timedelta(_))
            | (SemanticType::Interval, value @ Self::Interval(_))
            | (SemanticType::Categorical, value @ Self::Str(_)) => value,
            (SemanticType::Float, Self::Int(v)) => Self::Float(v as f64),
            (SemanticType::Complex, Self::Float(v)) => Self::Complex(Complex::new(v, 0.0)),
            (SemanticType::Complex, Self::Int(v)) => Self::Complex(Complex::new(v as f64, 0.0)),
            (SemanticType::Period(freq), Self::Period(p)) if p.freq() == freq => Self::Period(p),
            (dtype, value) => {
                return Err(ProfileError::invalid(format!(
                    "value {value} does not belong in a column of dtype {dtype}"
                )));
            }
        };
        Ok(conformed)
    }

    /// Hashable grouping key; equal keys mean equal values.
    pub fn key(&self) -> ValueKey {
        match self {
            Self::Null(kind) => ValueKey::Null(*kind),
            value if value.is_null() => ValueKey::Null(NullKind::NaN),
            Self::Int(v) => ValueKey::Int(*v),
            Self::Float(v) => float_key(*v),
            Self::Bool(v) => ValueKey::Bool(*v),
            Self::Complex(c) => ValueKey::Complex(canonical_bits(c.re), canonical_bits(c.im)),
            Self::Datetime(v) => ValueKey::Datetime(*v),
            Self::Timedelta(v) => ValueKey::Timedelta(*v),
            Self::Period(p) => ValueKey::Period(*p),
            Self::Interval(i) => ValueKey::Interval(
                canonical_bits(i.left()),
                canonical_bits(i.right()),
                i.closed(),
            ),
            Self::Str(s) => ValueKey::Str(s.clone()),
        }
    }

    /// Bytes held outside the value itself.
    pub fn heap_bytes(&self) -> usize {
        match self {
            Self::Str(s) => s.len(),
            _ => 0,
        }
    }
}

fn canonical_bits(v: f64) -> u64 {
    // folds -0.0 into 0.0
    (v + 0.0).to_bits()
}

fn float_key(v: f64) -> ValueKey {
    if v.fract() == 0.0 && v.abs() < 9.0e15 {
        ValueKey::Int(v as i64)
    } else {
        ValueKey::Float(canonical_bits(v))
    }
}

/// Equality key used for grouping values.
///
/// Integral floats share keys with the equal integer, mirroring numeric
/// equality in mixed object columns.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueKey {
    Null(NullKind),
    Int(i64),
    Float(u64),
    Bool(bool),
    Complex(u64, u64),
    Datetime(NaiveDateTime),
    Timedelta(TimeDelta),
    Period(Period),
    Interval(u64, u64, IntervalClosed),
    Str(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null(kind) => write!(f, "{kind}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => f.write_str(&format_float(*v)),
            Self::Bool(v) => f.write_str(if *v { "True" } else { "False" }),
            Self::Complex(c) => write!(f, "{c}"),
            Self::Datetime(v) => f.write_str(&format_datetime(v)),
            Self::Timedelta(v) => f.write_str(&format_timedelta(v)),
            Self::Period(p) => write!(f, "{p}"),
            Self::Interval(i) => write!(f, "{i}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Null(_) => serializer.serialize_none(),
            Self::Int(v) => serializer.serialize_i64(*v),
            Self::Float(v) if v.is_finite() => serializer.serialize_f64(*v),
            Self::Bool(v) => serializer.serialize_bool(*v),
            other => serializer.collect_str(other),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<Complex> for Value {
    fn from(v: Complex) -> Self {
        Self::Complex(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Self::Datetime(v)
    }
}

impl From<TimeDelta> for Value {
    fn from(v: TimeDelta) -> Self {
        Self::Timedelta(v)
    }
}

impl From<Period> for Value {
    fn from(v: Period) -> Self {
        Self::Period(v)
    }
}

impl From<Interval> for Value {
    fn from(v: Interval) -> Self {
        Self::Interval(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<NullKind> for Value {
    fn from(kind: NullKind) -> Self {
        Self::Null(kind)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null(NullKind::None), Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::period::PeriodFreq;

    #[test]
    fn test_nan_float_is_null() {
        assert_eq!(Value::float(f64::NAN), Value::Null(NullKind::NaN));
        assert!(Value::Float(f64::NAN).is_null());
        assert_eq!(Value::Float(f64::NAN).key(), ValueKey::Null(NullKind::NaN));
    }

    #[test]
    fn test_conform_typed_null() {
        let value = Value::Null(NullKind::None);
        assert_eq!(
            value.clone().conform(SemanticType::Datetime).unwrap(),
            Value::Null(NullKind::NaT)
        );
        assert_eq!(
            value.conform(SemanticType::Object).unwrap(),
            Value::Null(NullKind::None)
        );
    }

    #[test]
    fn test_conform_rejects_mismatch() {
        let err = Value::from("x").conform(SemanticType::Integer).unwrap_err();
        assert!(matches!(err, ProfileError::InvalidInput { .. }));
        let period = Value::Period(Period::new(PeriodFreq::Month, 1));
        assert!(
            period
                .conform(SemanticType::Period(PeriodFreq::Year))
                .is_err()
        );
    }

    #[test]
    fn test_conform_widens_int_to_float() {
        assert_eq!(
            Value::Int(3).conform(SemanticType::Float).unwrap(),
            Value::Float(3.0)
        );
    }

    #[test]
    fn test_keys_merge_equal_numbers() {
        assert_eq!(Value::Int(1).key(), Value::Float(1.0).key());
        assert_eq!(Value::Float(0.0).key(), Value::Float(-0.0).key());
        assert_ne!(Value::Float(0.5).key(), Value::Float(1.5).key());
        assert_ne!(
            Value::Null(NullKind::None).key(),
            Value::Null(NullKind::NaN).key()
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Bool(true).to_string(), "True");
        assert_eq!(Value::Float(2.0).to_string(), "2.0");
        assert_eq!(Value::Null(NullKind::Na).to_string(), "<NA>");
        assert_eq!(Value::from(None::<i64>).to_string(), "None");
    }
}
