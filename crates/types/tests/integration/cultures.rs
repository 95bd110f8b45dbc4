//! The same managers under different cultures.

use std::sync::Arc;

use chrono::NaiveDate;
use formtype_types::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn culture(name: &str) -> Arc<CultureInfo> {
    CultureRegistry::with_builtins().get(name).unwrap()
}

#[rstest]
#[case("en-US", "1,234.5")]
#[case("de-DE", "1.234,5")]
#[case("fr-FR", "1\u{a0}234,5")]
fn float_display(#[case] name: &str, #[case] text: &str) {
    let float = Float::new(culture(name));
    assert_eq!(float.to_text(&Value::Float(1234.5)).unwrap(), text);
    assert_eq!(float.to_value_str(text).unwrap(), Value::Float(1234.5));
    assert_eq!(float.to_text_neutral(&Value::Float(1234.5)).unwrap(), "1234.5");
}

#[rstest]
#[case("en-US", "3/5/2024")]
#[case("en-GB", "05/03/2024")]
#[case("de-DE", "05.03.2024")]
#[case("fr-FR", "05/03/2024")]
fn short_dates(#[case] name: &str, #[case] text: &str) {
    let manager = Date::new(culture(name));
    let march_5 = Value::Date(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
    assert_eq!(manager.to_text(&march_5).unwrap(), text);
    assert_eq!(manager.to_value_str(text).unwrap(), march_5);
}

#[test]
fn neutral_text_is_shared_across_cultures() {
    let english = Currency::new(culture("en-US"));
    let german = Currency::new(culture("de-DE"));
    let stored = english.to_text_neutral(&english.to_value_str("$1,234.50").unwrap()).unwrap();
    assert_eq!(stored, "1234.5");
    let value = german.to_value_neutral(&stored).unwrap();
    assert_eq!(german.to_text(&value).unwrap(), "1.234,50 €");
}

#[test]
fn twenty_four_hour_clocks() {
    let manager = TimeOfDay::new(culture("de-DE"));
    assert_eq!(manager.to_text(&Value::time(13, 30, 0)).unwrap(), "13:30");
    assert_eq!(manager.to_value_str("13:30").unwrap(), Value::time(13, 30, 0));
}

#[test]
fn month_names_follow_the_culture() {
    let manager = MonthYear::with_options(
        culture("fr-FR"),
        MonthYearOptions {
            date_format: DateStyle::Long,
        },
    );
    let value = Value::Date(NaiveDate::from_ymd_opt(2027, 3, 1).unwrap());
    let text = manager.to_text(&value).unwrap();
    assert_eq!(text, "mars 2027");
    assert_eq!(manager.to_value_str(&text).unwrap(), value);
}
