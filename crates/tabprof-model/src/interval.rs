use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

use crate::error::{ProfileError, Result};
use crate::format::format_numeric;

/// Which ends of an interval are closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IntervalClosed {
    Left,
    #[default]
    Right,
    Both,
    Neither,
}

/// A bounded numeric interval such as `(0, 2]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    left: f64,
    right: f64,
    closed: IntervalClosed,
}

impl Interval {
    /// Creates an interval; bounds must be ordered and not NaN.
    pub fn new(left: f64, right: f64, closed: IntervalClosed) -> Result<Self> {
        if left.is_nan() || right.is_nan() {
            return Err(ProfileError::invalid("interval bounds must not be NaN"));
        }
        if left > right {
            return Err(ProfileError::invalid(format!(
                "interval left bound {left} exceeds right bound {right}"
            )));
        }
        Ok(Self {
            left,
            right,
            closed,
        })
    }

    pub fn left(&self) -> f64 {
        self.left
    }

    pub fn right(&self) -> f64 {
        self.right
    }

    pub fn closed(&self) -> IntervalClosed {
        self.closed
    }

    /// Orders by left bound, then right bound.
    pub fn bound_cmp(&self, other: &Self) -> Ordering {
        self.left
            .total_cmp(&other.left)
            .then_with(|| self.right.total_cmp(&other.right))
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (open, close) = match self.closed {
            IntervalClosed::Left => ('[', ')'),
            IntervalClosed::Right => ('(', ']'),
            IntervalClosed::Both => ('[', ']'),
            IntervalClosed::Neither => ('(', ')'),
        };
        write!(
            f,
            "{open}{}, {}{close}",
            format_numeric(self.left),
            format_numeric(self.right)
        )
    }
}
