//! Neutral and display round trips for every built-in manager.

use std::sync::Arc;

use chrono::NaiveDate;
use formtype_types::prelude::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn en_us() -> Arc<CultureInfo> {
    Arc::new(CultureInfo::en_us())
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// One representative value per manager. Clock values avoid seconds so the
/// short display styles keep everything.
fn samples() -> Vec<(Box<dyn TypeManager>, Value)> {
    let c = en_us;
    vec![
        (Box::new(Integer::new(c())), Value::Integer(-1234)),
        (Box::new(Float::new(c())), Value::Float(1234.5678)),
        (Box::new(Currency::new(c())), Value::Float(-1234.5)),
        (Box::new(Percent::new(c())), Value::Float(12.5)),
        (Box::new(Boolean::new(c())), Value::Boolean(true)),
        (Box::new(BaseString::new(c())), Value::from("hello world")),
        (Box::new(Date::new(c())), Value::Date(date(2024, 2, 29))),
        (
            Box::new(DateTime::new(c())),
            Value::DateTime(date(2024, 3, 5).and_hms_opt(13, 30, 0).unwrap()),
        ),
        (Box::new(DayMonth::new(c())), Value::Date(date(2004, 12, 25))),
        (Box::new(MonthYear::new(c())), Value::Date(date(2027, 3, 1))),
        (Box::new(TimeOfDay::new(c())), Value::time(9, 5, 0)),
        (Box::new(Duration::new(c())), Value::time(125, 5, 30)),
        (Box::new(Email::new(c())), Value::from("jo@example.com")),
        (Box::new(Url::new(c())), Value::from("https://example.com/a?b=c")),
        (Box::new(PhoneNumber::new(c())), Value::from("(425) 555-0123")),
        (Box::new(PostalCode::new(c())), Value::from("98052")),
        (Box::new(CreditCardNumber::new(c())), Value::from("4111111111111111")),
    ]
}

#[test]
fn neutral_round_trip_for_every_manager() {
    for (manager, value) in samples() {
        let neutral = manager.to_text_neutral(&value).unwrap();
        assert_eq!(
            manager.to_value_neutral(&neutral).unwrap(),
            value,
            "{} via {neutral:?}",
            manager.name()
        );
    }
}

#[test]
fn display_round_trip_for_every_manager() {
    for (manager, value) in samples() {
        let text = manager.to_text(&value).unwrap();
        assert_eq!(
            manager.to_value_str(&text).unwrap(),
            value,
            "{} via {text:?}",
            manager.name()
        );
    }
}

#[test]
fn neutral_formats() {
    let c = en_us;
    let cases: Vec<(Box<dyn TypeManager>, Value, &str)> = vec![
        (Box::new(Integer::new(c())), Value::Integer(-42), "-42"),
        (Box::new(Float::new(c())), Value::Float(3.0), "3.0"),
        (Box::new(Date::new(c())), Value::Date(date(2024, 3, 5)), "2024-03-05"),
        (
            Box::new(DateTime::new(c())),
            Value::DateTime(date(2024, 3, 5).and_hms_opt(7, 8, 9).unwrap()),
            "2024-03-05 7:08:09",
        ),
        (Box::new(DayMonth::new(c())), Value::Date(date(2004, 3, 5)), "03-05"),
        (Box::new(MonthYear::new(c())), Value::Date(date(2027, 3, 1)), "2027-03"),
        (Box::new(TimeOfDay::new(c())), Value::time(7, 5, 0), "7:05:00"),
        (Box::new(Boolean::new(c())), Value::Boolean(false), "false"),
    ];
    for (manager, value, expected) in cases {
        assert_eq!(manager.to_text_neutral(&value).unwrap(), expected, "{}", manager.name());
    }
}

#[test]
fn calendar_values_outside_four_digit_years_are_rejected() {
    let c = en_us;
    let beyond = [date(10_000, 3, 5), date(-5, 3, 5)];
    let managers: Vec<Box<dyn TypeManager>> = vec![
        Box::new(Date::new(c())),
        Box::new(DateTime::new(c())),
        Box::new(MonthYear::new(c())),
    ];
    for manager in &managers {
        for outside in beyond {
            let err = manager.to_text(&Value::Date(outside)).unwrap_err();
            assert_eq!(err.code(), "out_of_range", "{} {outside}", manager.name());
            let err = manager.to_text_neutral(&Value::Date(outside)).unwrap_err();
            assert_eq!(err.code(), "out_of_range", "{} {outside}", manager.name());
        }
    }
}

#[test]
fn clock_values_beyond_time_delta_are_rejected() {
    let c = en_us;
    let managers: Vec<Box<dyn TypeManager>> =
        vec![Box::new(TimeOfDay::new(c())), Box::new(Duration::new(c()))];
    for manager in &managers {
        for native in [Value::Integer(i64::MAX), Value::Float(1e18), Value::Float(-1e18)] {
            let err = manager.to_value(&native).unwrap_err();
            assert_eq!(err.code(), "out_of_range", "{} {native}", manager.name());
        }
        let err = manager
            .compare(&Value::Integer(1), &Value::Integer(10_000_000_000_000_000))
            .unwrap_err();
        assert_eq!(err.code(), "out_of_range");
    }
}

proptest! {
    #[test]
    fn integers_round_trip(n in i64::from(i32::MIN)..=i64::from(i32::MAX)) {
        let integer = Integer::new(en_us());
        let value = Value::Integer(n);
        let neutral = integer.to_text_neutral(&value).unwrap();
        prop_assert_eq!(integer.to_value_neutral(&neutral).unwrap(), value.clone());
        let text = integer.to_text(&value).unwrap();
        prop_assert_eq!(integer.to_value_str(&text).unwrap(), value);
    }

    #[test]
    fn floats_round_trip(cents in -100_000_000_i64..100_000_000) {
        let float = Float::new(en_us());
        let value = Value::Float(cents as f64 / 100.0);
        let neutral = float.to_text_neutral(&value).unwrap();
        prop_assert_eq!(float.to_value_neutral(&neutral).unwrap(), value);
    }

    #[test]
    fn dates_round_trip(days in 0_i64..200_000) {
        let manager = Date::new(en_us());
        let value = Value::Date(date(1700, 1, 1) + chrono::TimeDelta::days(days));
        let neutral = manager.to_text_neutral(&value).unwrap();
        prop_assert_eq!(manager.to_value_neutral(&neutral).unwrap(), value.clone());
        let text = manager.to_text(&value).unwrap();
        prop_assert_eq!(manager.to_value_str(&text).unwrap(), value);
    }

    #[test]
    fn dates_round_trip_across_four_digit_years(days in 0_i64..3_652_059) {
        let manager = Date::new(en_us());
        let value = Value::Date(date(1, 1, 1) + chrono::TimeDelta::days(days));
        let neutral = manager.to_text_neutral(&value).unwrap();
        prop_assert_eq!(manager.to_value_neutral(&neutral).unwrap(), value.clone());
        let text = manager.to_text(&value).unwrap();
        prop_assert_eq!(manager.to_value_str(&text).unwrap(), value);
    }

    #[test]
    fn durations_round_trip(seconds in 0_i64..(9999 * 3600 + 3600)) {
        let manager = Duration::new(en_us());
        let value = Value::Time(chrono::TimeDelta::seconds(seconds));
        let neutral = manager.to_text_neutral(&value).unwrap();
        prop_assert_eq!(manager.to_value_neutral(&neutral).unwrap(), value);
    }
}
