//! Anniversaries: a month and day without a year.

use std::cmp::Ordering;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use formtype_culture::CultureInfo;
use serde::{Deserialize, Serialize};

use super::pattern::Fields;
use super::{DatePatterns, DateStyle, is_date_char};
use crate::manager::mismatch;
use crate::{InputError, TypeManager, TypeResult, Value};

/// Year every value is projected onto. A leap year, so February 29 is
/// representable.
pub const DAY_MONTH_YEAR: i32 = 2004;

/// Options for [`DayMonth`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct DayMonthOptions {
    pub date_format: DateStyle,
}

/// Month and day manager. Natives are `Value::Date` in year 2004.
///
/// ```rust
/// use chrono::NaiveDate;
/// use formtype_types::prelude::*;
///
/// let manager = DayMonth::new(CultureInfo::en_us().into());
/// let leap_day = manager.to_value_str("Feb 29").unwrap();
/// assert_eq!(leap_day, Value::Date(NaiveDate::from_ymd_opt(2004, 2, 29).unwrap()));
/// assert_eq!(manager.to_text_neutral(&leap_day).unwrap(), "02-29");
/// ```
#[derive(Debug, Clone)]
pub struct DayMonth {
    culture: Arc<CultureInfo>,
    options: DayMonthOptions,
}

impl DayMonth {
    #[must_use]
    pub fn new(culture: Arc<CultureInfo>) -> Self {
        Self::with_options(culture, DayMonthOptions::default())
    }

    #[must_use]
    pub fn with_options(culture: Arc<CultureInfo>, options: DayMonthOptions) -> Self {
        Self { culture, options }
    }

    #[must_use]
    pub fn options(&self) -> &DayMonthOptions {
        &self.options
    }

    fn patterns(&self) -> DatePatterns<'_> {
        DatePatterns {
            short: &self.culture.date.short_day_month_pattern,
            abbreviated: &self.culture.date.abbreviated_day_month_pattern,
            long: &self.culture.date.long_day_month_pattern,
            neutral: "MM-dd",
        }
    }

    fn project(month: u32, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(DAY_MONTH_YEAR, month, day)
    }

    fn date(value: &Value) -> TypeResult<NaiveDate> {
        match value {
            Value::Date(d) => Ok(*d),
            other => Err(mismatch("date", other)),
        }
    }

    fn key(value: &Value) -> (u32, u32) {
        value.as_date().map_or((0, 0), |d| (d.month(), d.day()))
    }
}

impl TypeManager for DayMonth {
    fn name(&self) -> &'static str {
        "DayMonth"
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
                Self::project(fields.month?, fields.day?)
            })
            .map(Value::Date)
            .ok_or_else(|| InputError::invalid_format("day and month").into())
    }

    fn format(&self, value: &Value) -> TypeResult<String> {
        let fields = Fields::from_date(Self::date(value)?);
        let fields = Fields {
            weekday: None,
            ..fields
        };
        let pattern = self.patterns().display(self.options.date_format);
        Ok(pattern.format(&fields, &self.culture))
    }

    fn parse_neutral(&self, text: &str) -> TypeResult<Value> {
        let invalid = || InputError::invalid_format("day and month");
        let (month, day) = text.split_once('-').ok_or_else(invalid)?;
        let number = |part: &str| -> Option<u32> {
            if part.len() != 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            part.parse().ok()
        };
        let date = number(month)
            .zip(number(day))
            .and_then(|(m, d)| Self::project(m, d))
            .ok_or_else(invalid)?;
        Ok(Value::Date(date))
    }

    fn format_neutral(&self, value: &Value) -> TypeResult<String> {
        let date = Self::date(value)?;
        Ok(format!("{:02}-{:02}", date.month(), date.day()))
    }

    fn accept_native(&self, value: Value) -> TypeResult<Value> {
        let date = match value {
            Value::Date(d) => d,
            Value::DateTime(dt) => dt.date(),
            other => return Err(mismatch("date", &other)),
        };
        Self::project(date.month(), date.day())
            .map(Value::Date)
            .ok_or_else(|| InputError::invalid_format("day and month").into())
    }

    fn is_valid_char(&self, ch: char) -> bool {
        is_date_char(ch, true)
    }

    fn compare_native(&self, a: &Value, b: &Value) -> Ordering {
        Self::key(a).cmp(&Self::key(b))
    }
}
