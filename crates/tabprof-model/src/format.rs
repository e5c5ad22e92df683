//! Display formatting shared by values and reports.

use chrono::{NaiveDateTime, TimeDelta, Timelike};

const NANOS_PER_SECOND: i128 = 1_000_000_000;
const NANOS_PER_DAY: i128 = 86_400 * NANOS_PER_SECOND;

/// Formats a float the way report readers expect: `1.0`, `0.3`, `nan`, `inf`.
pub fn format_float(v: f64) -> String {
    if v.is_nan() {
        "nan".to_string()
    } else if v.is_infinite() {
        if v > 0.0 { "inf" } else { "-inf" }.to_string()
    } else if v.fract() == 0.0 && v.abs() < 1e16 {
        format!("{v:.1}")
    } else {
        format!("{v}")
    }
}

/// Formats a number without a trailing `.0` on integral values.
///
/// Used for the components of complex numbers and interval bounds.
pub fn format_numeric(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e16 {
        format!("{v:.0}")
    } else {
        format_float(v)
    }
}

/// Formats a share in `[0, 1]` as a percentage with two decimals.
pub fn format_percent(share: f64) -> String {
    format!("{:.2}%", share * 100.0)
}

/// Truncates `value` to at most `limit` characters.
pub fn abbreviate_string(value: &str, limit: usize) -> String {
    value.chars().take(limit).collect()
}

fn fraction(nanos: i128) -> String {
    if nanos == 0 {
        String::new()
    } else if nanos % 1_000 == 0 {
        format!(".{:06}", nanos / 1_000)
    } else {
        format!(".{nanos:09}")
    }
}

/// `YYYY-MM-DD HH:MM:SS`, with microseconds or nanoseconds when present.
pub fn format_datetime(value: &NaiveDateTime) -> String {
    let nanos = i128::from(value.nanosecond() % 1_000_000_000);
    format!("{}{}", value.format("%Y-%m-%d %H:%M:%S"), fraction(nanos))
}

/// `D days HH:MM:SS`; negative spans borrow whole days, e.g. `-1 days +23:00:00`.
pub fn format_timedelta(value: &TimeDelta) -> String {
    let total =
        i128::from(value.num_seconds()) * NANOS_PER_SECOND + i128::from(value.subsec_nanos());
    let days = total.div_euclid(NANOS_PER_DAY);
    let rest = total.rem_euclid(NANOS_PER_DAY);
    let seconds = rest / NANOS_PER_SECOND;
    let clock = format!(
        "{:02}:{:02}:{:02}{}",
        seconds / 3600,
        (seconds / 60) % 60,
        seconds % 60,
        fraction(rest % NANOS_PER_SECOND)
    );
    if days < 0 {
        format!("{days} days +{clock}")
    } else {
        format!("{days} days {clock}")
    }
}
