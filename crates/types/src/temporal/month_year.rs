//! Month and year, such as a card expiry.

use std::cmp::Ordering;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use formtype_culture::CultureInfo;
use serde::{Deserialize, Serialize};

use super::pattern::Fields;
use super::{DatePatterns, DateStyle, check_year, is_date_char};
use crate::manager::mismatch;
use crate::{InputError, TypeManager, TypeResult, Value};

/// Options for [`MonthYear`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct MonthYearOptions {
    pub date_format: DateStyle,
}

/// Month and year manager. Natives are `Value::Date` on the first of the
/// month; ordering uses `year * 12 + month - 1`.
///
/// ```rust
/// use chrono::NaiveDate;
/// use formtype_types::prelude::*;
///
/// let manager = MonthYear::new(CultureInfo::en_us().into());
/// let expiry = manager.to_value_str("3/2027").unwrap();
/// assert_eq!(expiry, Value::Date(NaiveDate::from_ymd_opt(2027, 3, 1).unwrap()));
/// assert_eq!(manager.to_text_neutral(&expiry).unwrap(), "2027-03");
/// ```
#[derive(Debug, Clone)]
pub struct MonthYear {
    culture: Arc<CultureInfo>,
    options: MonthYearOptions,
}

impl MonthYear {
    #[must_use]
    pub fn new(culture: Arc<CultureInfo>) -> Self {
        Self::with_options(culture, MonthYearOptions::default())
    }

    #[must_use]
    pub fn with_options(culture: Arc<CultureInfo>, options: MonthYearOptions) -> Self {
        Self { culture, options }
    }

    #[must_use]
    pub fn options(&self) -> &MonthYearOptions {
        &self.options
    }

    fn patterns(&self) -> DatePatterns<'_> {
        DatePatterns {
            short: &self.culture.date.short_month_year_pattern,
            abbreviated: &self.culture.date.abbreviated_month_year_pattern,
            long: &self.culture.date.long_month_year_pattern,
            neutral: "yyyy-MM",
        }
    }

    fn date(value: &Value) -> TypeResult<NaiveDate> {
        match value {
            Value::Date(d) => Ok(*d),
            other => Err(mismatch("date", other)),
        }
    }

    /// Months since year zero.
    fn key(value: &Value) -> i64 {
        value
            .as_date()
            .map_or(0, |d| i64::from(d.year()) * 12 + i64::from(d.month0()))
    }
}

impl TypeManager for MonthYear {
    fn name(&self) -> &'static str {
        "MonthYear"
    }

    fn data_type_name(&self) -> &'static str {
        "date"
    }

    fn culture(&self) -> &CultureInfo {
        &self.culture
    }

    fn parse(&self, text: &str) -> TypeResult<Value> {
        self.patterns()
            .accepted(self.options.date_format)
            .iter()
            .find_map(|pattern| {
                let fields = pattern.parse(text, &self.culture)?;
                NaiveDate::from_ymd_opt(fields.year?, fields.month?, 1)
            })
            .map(Value::Date)
            .ok_or_else(|| InputError::invalid_format("month and year").into())
    }

    fn format(&self, value: &Value) -> TypeResult<String> {
        let date = Self::date(value)?;
        let fields = Fields {
            year: Some(date.year()),
            month: Some(date.month()),
            ..Fields::default()
        };
        let pattern = self.patterns().display(self.options.date_format);
        Ok(pattern.format(&fields, &self.culture))
    }

    fn parse_neutral(&self, text: &str) -> TypeResult<Value> {
        NaiveDate::parse_from_str(&format!("{}-01", text.trim()), "%Y-%m-%d")
            .map(Value::Date)
            .map_err(|_| InputError::invalid_format("month and year").into())
    }

    fn format_neutral(&self, value: &Value) -> TypeResult<String> {
        let date = Self::date(value)?;
        Ok(format!("{:04}-{:02}", date.year(), date.month()))
    }

    fn accept_native(&self, value: Value) -> TypeResult<Value> {
        let date = match value {
            Value::Date(d) => d,
            Value::DateTime(dt) => dt.date(),
            other => return Err(mismatch("date", &other)),
        };
        Ok(Value::Date(date.with_day(1).unwrap_or(date)))
    }

    fn review_value(&self, value: Value) -> TypeResult<Value> {
        check_year(Self::date(&value)?)?;
        Ok(value)
    }

    fn is_valid_char(&self, ch: char) -> bool {
        is_date_char(ch, true)
    }

    fn compare_native(&self, a: &Value, b: &Value) -> Ordering {
        Self::key(a).cmp(&Self::key(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn manager() -> MonthYear {
        MonthYear::new(Arc::new(CultureInfo::en_us()))
    }

    fn month(y: i32, m: u32) -> Value {
        Value::Date(NaiveDate::from_ymd_opt(y, m, 1).unwrap())
    }

    #[rstest]
    #[case("3/2027", month(2027, 3))]
    #[case("03/27", month(2027, 3))]
    #[case("Mar 2027", month(2027, 3))]
    #[case("March 2027", month(2027, 3))]
    #[case("2027-03", month(2027, 3))]
    fn parses(#[case] text: &str, #[case] expected: Value) {
        assert_eq!(manager().to_value_str(text).unwrap(), expected);
    }

    #[rstest]
    #[case("13/2027")]
    #[case("3")]
    #[case("3/5/2027")]
    fn rejects(#[case] text: &str) {
        assert!(manager().to_value_str(text).is_err());
    }

    #[test]
    fn natives_move_to_the_first() {
        let date = Value::Date(NaiveDate::from_ymd_opt(2027, 3, 19).unwrap());
        assert_eq!(manager().to_value(&date).unwrap(), month(2027, 3));
    }

    #[test]
    fn orders_across_years() {
        let manager = manager();
        assert_eq!(
            manager.compare(&month(2026, 12), &month(2027, 1)).unwrap(),
            Ordering::Less
        );
        assert_eq!(
            manager
                .compare(&Value::from("Dec 2027"), &Value::from("1/2027"))
                .unwrap(),
            Ordering::Greater
        );
    }

    #[test]
    fn neutral_and_long_forms() {
        assert_eq!(manager().to_text_neutral(&month(2027, 3)).unwrap(), "2027-03");
        assert_eq!(manager().to_value_neutral("2027-03").unwrap(), month(2027, 3));
        assert!(manager().to_value_neutral("2027-13").is_err());

        let long = MonthYear::with_options(
            Arc::new(CultureInfo::en_us()),
            MonthYearOptions {
                date_format: DateStyle::Long,
            },
        );
        assert_eq!(long.to_text(&month(2027, 3)).unwrap(), "March 2027");
    }
}
