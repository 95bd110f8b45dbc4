//! Behaviour users rely on across managers.

use std::cmp::Ordering;
use std::sync::Arc;

use chrono::NaiveDate;
use formtype_types::prelude::*;
use pretty_assertions::assert_eq;

fn en_us() -> Arc<CultureInfo> {
    Arc::new(CultureInfo::en_us())
}

#[test]
fn integer_bounds_are_32_bit() {
    let integer = Integer::new(en_us());
    assert_eq!(
        integer.to_value_str("2147483647").unwrap(),
        Value::Integer(2_147_483_647)
    );
    assert_eq!(
        integer.to_value_str("-2147483648").unwrap(),
        Value::Integer(-2_147_483_648)
    );
    let err = integer.to_value_str("2147483648").unwrap_err();
    assert!(err.is_input());
}

#[test]
fn percent_scaling_does_not_drift() {
    let percent = Percent::with_options(
        en_us(),
        PercentOptions {
            one_equals_one_hundred: true,
            ..PercentOptions::default()
        },
    )
    .unwrap();
    let mut value = Value::Float(0.1);
    for _ in 0..5 {
        let text = percent.to_text(&value).unwrap();
        value = percent.to_value_str(&text).unwrap();
        assert_eq!(value, Value::Float(0.1));
    }
}

#[test]
fn luhn_test_card() {
    let card = CreditCardNumber::new(en_us());
    assert!(card.is_valid("4111111111111111").unwrap());
    assert!(!card.is_valid("4111111111111112").unwrap());
    assert!(!card.is_valid("4111111111111110").unwrap());
}

#[test]
fn day_month_ignores_the_year() {
    let manager = DayMonth::new(en_us());
    // 2001 has no February 29; project the month and day directly
    let leap_from_text = manager.to_value_str("2/29").unwrap();
    let leap_2012 = Value::Date(NaiveDate::from_ymd_opt(2012, 2, 29).unwrap());
    assert_eq!(
        manager.compare(&leap_from_text, &leap_2012).unwrap(),
        Ordering::Equal
    );

    let christmas_2001 = Value::Date(NaiveDate::from_ymd_opt(2001, 12, 25).unwrap());
    let christmas_2030 = Value::Date(NaiveDate::from_ymd_opt(2030, 12, 25).unwrap());
    assert_eq!(
        manager.compare(&christmas_2001, &christmas_2030).unwrap(),
        Ordering::Equal
    );
}

#[test]
fn time_of_day_stops_before_midnight() {
    let manager = TimeOfDay::new(en_us());
    assert!(manager.to_value(&Value::time(23, 59, 59)).is_ok());
    let err = manager.to_value(&Value::time(24, 0, 0)).unwrap_err();
    assert_eq!(err.code(), "out_of_range");
    assert!(manager.to_value(&Value::Integer(86_400)).unwrap_err().is_input());
}

#[test]
fn duration_hours_are_bounded() {
    let manager = Duration::new(en_us());
    assert!(manager.to_value(&Value::time(9999, 59, 59)).is_ok());
    assert!(manager.to_value(&Value::time(10_000, 0, 0)).is_err());

    let short = Duration::with_options(
        en_us(),
        DurationOptions {
            max_hours: 48,
            ..DurationOptions::default()
        },
    )
    .unwrap();
    assert!(short.to_value_str("48:59:59").is_ok());
    assert!(short.to_value_str("49:00:00").is_err());
}

#[test]
fn email_list_with_delimiter() {
    let email = Email::with_options(
        en_us(),
        EmailOptions {
            multiple: true,
            delimiter: "; ".into(),
            ..EmailOptions::default()
        },
    )
    .unwrap();
    assert_eq!(
        email.to_value_str("a@b.com; c@d.org").unwrap(),
        Value::from("a@b.com; c@d.org")
    );
    let err = email.to_value_str("a@b.com, c@d.org").unwrap_err();
    assert!(err.is_input());
}

#[test]
fn config_errors_are_not_input_errors() {
    let err = Integer::new(en_us()).to_value(&Value::Boolean(true)).unwrap_err();
    assert!(!err.is_input());
    assert_eq!(err.code(), "CONFIG_TYPE_MISMATCH");

    let err = Date::with_options(
        en_us(),
        DateOptions {
            min_date: Some("2024-12-31".into()),
            max_date: Some("2024-01-01".into()),
            ..DateOptions::default()
        },
    )
    .unwrap_err();
    assert_eq!(err.code(), "CONFIG_INVALID_OPTION");
}

#[test]
fn empty_input_is_null_everywhere() {
    let managers: Vec<Box<dyn TypeManager>> = vec![
        Box::new(Integer::new(en_us())),
        Box::new(Date::new(en_us())),
        Box::new(Email::new(en_us())),
        Box::new(Boolean::new(en_us())),
        Box::new(Duration::new(en_us())),
    ];
    for manager in managers {
        assert_eq!(manager.to_value_str("  ").unwrap(), Value::Null, "{}", manager.name());
        assert_eq!(manager.to_text(&Value::Null).unwrap(), "", "{}", manager.name());
        assert!(manager.compare(&Value::Null, &Value::Null).is_err());
    }
}

#[test]
fn valid_chars_match_what_parses() {
    let integer = Integer::new(en_us());
    assert!("-1,234".chars().all(|c| integer.is_valid_char(c)));
    assert!(!integer.is_valid_char('x'));

    let phone = PhoneNumber::new(en_us());
    assert!("(425) 555-0123".chars().all(|c| phone.is_valid_char(c)));
    assert!(!phone.is_valid_char('#'));
}
