//! Parsing of compact duration strings such as `90s` or `1h30m`.

use chrono::TimeDelta;

fn unit_delta(amount: i64, unit: &str) -> Option<TimeDelta> {
    match unit {
        "ns" => Some(TimeDelta::nanoseconds(amount)),
        "us" => Some(TimeDelta::microseconds(amount)),
        "ms" => TimeDelta::try_milliseconds(amount),
        "s" => TimeDelta::try_seconds(amount),
        "m" => TimeDelta::try_minutes(amount),
        "h" => TimeDelta::try_hours(amount),
        "d" => TimeDelta::try_days(amount),
        "w" => TimeDelta::try_weeks(amount),
        _ => None,
    }
}

/// Parses `<n><unit>` terms with units `ns`, `us`, `ms`, `s`, `m`, `h`, `d`
/// and `w`. Terms add up, so `1h30m` is ninety minutes. A bare `0` is zero.
///
/// # Errors
///
/// Returns a message naming the offending input for empty strings, unknown
/// units, missing amounts and overflow.
pub fn parse_duration(input: &str) -> Result<TimeDelta, String> {
    let input = input.trim();
    if input == "0" {
        return Ok(TimeDelta::zero());
    }
    if input.is_empty() {
        return Err("duration must not be empty".to_string());
    }

    let mut total = TimeDelta::zero();
    let mut rest = input;
    while !rest.is_empty() {
        let digits = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        if digits == 0 {
            return Err(format!("expected a number in duration '{input}'"));
        }
        let (amount, tail) = rest.split_at(digits);
        let letters = tail
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(tail.len());
        let (unit, tail) = tail.split_at(letters);
        if unit.is_empty() {
            return Err(format!(
                "missing unit after {amount} in duration '{input}' (units: ns us ms s m h d w)"
            ));
        }
        let amount: i64 = amount
            .parse()
            .map_err(|_| format!("amount {amount} in duration '{input}' is too large"))?;
        let delta = unit_delta(amount, unit)
            .ok_or_else(|| format!("unknown unit '{unit}' in duration '{input}'"))?;
        total = total
            .checked_add(&delta)
            .ok_or_else(|| format!("duration '{input}' is too large"))?;
        rest = tail;
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(input: &str) -> String {
        parse_duration(input).unwrap_err()
    }

    #[test]
    fn test_single_units() {
        assert_eq!(parse_duration("90s"), Ok(TimeDelta::seconds(90)));
        assert_eq!(parse_duration("500ms"), Ok(TimeDelta::milliseconds(500)));
        assert_eq!(parse_duration("2d"), Ok(TimeDelta::days(2)));
        assert_eq!(parse_duration("1w"), Ok(TimeDelta::weeks(1)));
        assert_eq!(parse_duration("250us"), Ok(TimeDelta::microseconds(250)));
        assert_eq!(parse_duration("7ns"), Ok(TimeDelta::nanoseconds(7)));
        assert_eq!(parse_duration("0"), Ok(TimeDelta::zero()));
    }

    #[test]
    fn test_compound() {
        assert_eq!(parse_duration("1h30m"), Ok(TimeDelta::minutes(90)));
        assert_eq!(parse_duration(" 1d12h "), Ok(TimeDelta::hours(36)));
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(parse_duration("").is_err());
        assert!(message("h").contains("expected a number"));
        assert!(message("10").contains("missing unit"));
        assert!(message("3y").contains("unknown unit 'y'"));
        assert!(parse_duration("-1h").is_err());
        assert!(parse_duration("99999999999999999999s").is_err());
    }
}
