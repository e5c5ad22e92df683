//! Duration arguments accepted by `--threshold`.

use chrono::TimeDelta;
use proptest::prelude::*;

use tabprof_cli::duration::parse_duration;

#[test]
fn error_messages_name_the_input() {
    insta::assert_snapshot!(
        parse_duration("5fortnights").unwrap_err(),
        @"unknown unit 'fortnights' in duration '5fortnights'"
    );
}

proptest! {
    #[test]
    fn compound_terms_add_up([hours, minutes, seconds] in proptest::array::uniform3(0_i64..1_000)) {
        let parsed = parse_duration(&format!("{hours}h{minutes}m{seconds}s")).unwrap();
        let expected = TimeDelta::hours(hours) + TimeDelta::minutes(minutes);
        prop_assert_eq!(parsed, expected + TimeDelta::seconds(seconds));
    }

    #[test]
    fn single_term_matches_unit(amount in 0_i64..1_000_000) {
        let parse = |unit: &str| parse_duration(&format!("{amount}{unit}")).unwrap();
        prop_assert_eq!(parse("ms"), TimeDelta::milliseconds(amount));
        prop_assert_eq!(parse("us"), TimeDelta::microseconds(amount));
        prop_assert_eq!(parse("d"), TimeDelta::days(amount));
    }
}
