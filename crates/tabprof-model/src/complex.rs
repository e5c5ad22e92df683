use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div};

use crate::format::format_numeric;

/// A complex number with `f64` components.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Complex {
    pub fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    pub fn is_nan(self) -> bool {
        self.re.is_nan() || self.im.is_nan()
    }

    /// Total order on the real part, then the imaginary part.
    pub fn lexical_cmp(&self, other: &Self) -> Ordering {
        self.re
            .total_cmp(&other.re)
            .then_with(|| self.im.total_cmp(&other.im))
    }
}

impl Add for Complex {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.re + rhs.re, self.im + rhs.im)
    }
}

impl Div<f64> for Complex {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        Self::new(self.re / rhs, self.im / rhs)
    }
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.im.is_sign_negative() && !self.im.is_nan() {
            '-'
        } else {
            '+'
        };
        write!(
            f,
            "({}{}{}j)",
            format_numeric(self.re),
            sign,
            format_numeric(self.im.abs())
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Complex::new(1.0, 1.0).to_string(), "(1+1j)");
        assert_eq!(Complex::new(1.5, -2.0).to_string(), "(1.5-2j)");
    }

    #[test]
    fn test_lexical_cmp() {
        let a = Complex::new(1.0, 5.0);
        let b = Complex::new(2.0, 0.0);
        let c = Complex::new(1.0, 6.0);
        assert_eq!(a.lexical_cmp(&b), Ordering::Less);
        assert_eq!(a.lexical_cmp(&c), Ordering::Less);
        assert_eq!(b.lexical_cmp(&c), Ordering::Greater);
    }

    #[test]
    fn test_mean_arithmetic() {
        let sum = Complex::new(1.0, 2.0) + Complex::new(3.0, 4.0);
        assert_eq!(sum / 2.0, Complex::new(2.0, 3.0));
    }
}
