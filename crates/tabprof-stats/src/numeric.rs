//! Order statistics and moments over plain slices.
//!
//! Every function returns `None` when the sample is too small for the
//! statistic to be defined.

/// R-7 quantile (linear interpolation between closest ranks) of sorted data.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    let n = sorted.len();
    if n == 0 || !(0.0..=1.0).contains(&q) {
        return None;
    }
    let h = (n - 1) as f64 * q;
    let j = h.floor() as usize;
    let g = h - h.floor();
    if j + 1 >= n {
        Some(sorted[n - 1])
    } else if g == 0.0 {
        Some(sorted[j])
    } else {
        Some((1.0 - g) * sorted[j] + g * sorted[j + 1])
    }
}

/// R-7 quantile of sorted integers, rounded to the nearest integer.
///
/// Interpolates on the gap between neighbours so large magnitudes such as
/// nanosecond timestamps keep their precision.
pub fn quantile_sorted_i64(sorted: &[i64], q: f64) -> Option<i64> {
    let n = sorted.len();
    if n == 0 || !(0.0..=1.0).contains(&q) {
        return None;
    }
    let h = (n - 1) as f64 * q;
    let j = h.floor() as usize;
    let g = h - h.floor();
    if j + 1 >= n {
        return Some(sorted[n - 1]);
    }
    let span = i128::from(sorted[j + 1]) - i128::from(sorted[j]);
    let offset = (g * span as f64).round() as i128;
    i64::try_from(i128::from(sorted[j]) + offset).ok()
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (`ddof = 1`).
pub fn sample_std(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 2 {
        return None;
    }
    let avg = mean(values)?;
    let squares: f64 = values.iter().map(|v| (v - avg).powi(2)).sum();
    Some((squares / (n - 1) as f64).sqrt())
}

/// Unscaled median absolute deviation of sorted data.
pub fn median_abs_deviation(sorted: &[f64]) -> Option<f64> {
    let median = quantile_sorted(sorted, 0.5)?;
    let mut deviations: Vec<f64> = sorted.iter().map(|v| (v - median).abs()).collect();
    deviations.sort_by(f64::total_cmp);
    quantile_sorted(&deviations, 0.5)
}

/// Moment sums this close to zero are rounding noise.
const ROUNDING_NOISE: f64 = 1e-14;

/// Bias-adjusted Fisher-Pearson skewness (G1).
///
/// Needs at least three values; a sample without spread has skew zero.
pub fn skew(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 3 {
        return None;
    }
    let avg = mean(values)?;
    let (mut m2, mut m3) = (0.0, 0.0);
    for v in values {
        let d = v - avg;
        let d2 = d * d;
        m2 += d2;
        m3 += d2 * d;
    }
    if m2.abs() < ROUNDING_NOISE {
        return Some(0.0);
    }
    if m3.abs() < ROUNDING_NOISE {
        m3 = 0.0;
    }
    let count = n as f64;
    Some((count * (count - 1.0).sqrt() / (count - 2.0)) * (m3 / m2.powf(1.5)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_quantile_interpolates() {
        let data = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile_sorted(&data, 0.0), Some(1.0));
        assert_eq!(quantile_sorted(&data, 1.0), Some(4.0));
        assert!(close(quantile_sorted(&data, 0.5).unwrap(), 2.5));
        assert!(close(quantile_sorted(&data, 0.25).unwrap(), 1.75));
        assert_eq!(quantile_sorted(&[], 0.5), None);
        assert_eq!(quantile_sorted(&data, 1.5), None);
    }

    #[test]
    fn test_quantile_i64_keeps_precision() {
        let base = 946_684_800_000_000_000_i64;
        let data = [base, base + 3];
        assert_eq!(quantile_sorted_i64(&data, 0.5), Some(base + 2));
        assert_eq!(quantile_sorted_i64(&data, 0.0), Some(base));
        assert_eq!(quantile_sorted_i64(&[7], 0.99), Some(7));
    }

    #[test]
    fn test_sample_std() {
        assert_eq!(sample_std(&[1.0]), None);
        let sd = sample_std(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert!(close(sd, 2.138_089_935_299_395));
    }

    #[test]
    fn test_median_abs_deviation() {
        let sorted = [1.0, 1.0, 2.0, 2.0, 4.0, 6.0, 9.0];
        assert_eq!(median_abs_deviation(&sorted), Some(1.0));
    }

    #[test]
    fn test_skew() {
        assert_eq!(skew(&[1.0, 2.0]), None);
        assert_eq!(skew(&[3.0, 3.0, 3.0]), Some(0.0));
        assert!(close(skew(&[1.0, 2.0, 3.0]).unwrap(), 0.0));
        let right_tailed = skew(&[1.0, 1.0, 1.0, 10.0]).unwrap();
        assert!(close(right_tailed, 2.0));
    }
}
