//! Calendar dates and timestamps.

use std::cmp::Ordering;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use formtype_culture::CultureInfo;
use serde::{Deserialize, Serialize};

use super::pattern::{Fields, Pattern};
use super::{DatePatterns, DateStyle, TimeStyle, check_year, is_date_char};
use crate::manager::mismatch;
use crate::{ConfigError, InputError, TypeManager, TypeResult, Value};

const NEUTRAL_DATE: &str = "yyyy-MM-dd";
const NEUTRAL_TIME: &str = "H:mm:ss";

fn date_patterns(culture: &CultureInfo) -> DatePatterns<'_> {
    DatePatterns {
        short: &culture.date.short_date_pattern,
        abbreviated: &culture.date.abbreviated_date_pattern,
        long: &culture.date.long_date_pattern,
        neutral: NEUTRAL_DATE,
    }
}

fn parse_neutral_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").ok()
}

fn format_neutral_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

// ============================================================================
// DATE
// ============================================================================

/// Options for [`Date`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct DateOptions {
    pub date_format: DateStyle,
    /// Earliest accepted date, `yyyy-MM-dd`.
    pub min_date: Option<String>,
    /// Latest accepted date, `yyyy-MM-dd`.
    pub max_date: Option<String>,
}

/// Date type manager.
///
/// # Examples
///
/// ```rust
/// use chrono::NaiveDate;
/// use formtype_types::prelude::*;
///
/// let date = Date::new(CultureInfo::en_us().into());
/// let march_5 = Value::Date(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
/// assert_eq!(date.to_value_str("3/5/2024").unwrap(), march_5);
/// assert_eq!(date.to_value_str("March 5, 2024").unwrap(), march_5);
/// assert_eq!(date.to_text(&march_5).unwrap(), "3/5/2024");
/// assert_eq!(date.to_text_neutral(&march_5).unwrap(), "2024-03-05");
/// ```
#[derive(Debug, Clone)]
pub struct Date {
    culture: Arc<CultureInfo>,
    options: DateOptions,
    min: Option<NaiveDate>,
    max: Option<NaiveDate>,
}

impl Date {
    /// Creates a date manager with default options.
    #[must_use]
    pub fn new(culture: Arc<CultureInfo>) -> Self {
        Self {
            culture,
            options: DateOptions::default(),
            min: None,
            max: None,
        }
    }

    /// Creates a date manager with explicit options.
    pub fn with_options(culture: Arc<CultureInfo>, options: DateOptions) -> Result<Self, ConfigError> {
        let bound = |option: &str, text: &Option<String>| -> Result<Option<NaiveDate>, ConfigError> {
            text.as_deref()
                .map(|t| {
                    parse_neutral_date(t)
                        .ok_or_else(|| ConfigError::invalid_option(option, "expected yyyy-MM-dd"))
                })
                .transpose()
        };
        let min = bound("minDate", &options.min_date)?;
        let max = bound("maxDate", &options.max_date)?;
        if let (Some(min), Some(max)) = (min, max) {
            if min > max {
                return Err(ConfigError::invalid_option("minDate", "must not be after maxDate"));
            }
        }
        Ok(Self {
            culture,
            options,
            min,
            max,
        })
    }

    #[must_use]
    pub fn options(&self) -> &DateOptions {
        &self.options
    }

    fn date(value: &Value) -> TypeResult<NaiveDate> {
        match value {
            Value::Date(d) => Ok(*d),
            other => Err(mismatch("date", other)),
        }
    }
}

impl TypeManager for Date {
    fn name(&self) -> &'static str {
        "Date"
    }

    fn data_type_name(&self) -> &'static str {
        "date"
    }

    fn culture(&self) -> &CultureInfo {
        &self.culture
    }

    fn parse(&self, text: &str) -> TypeResult<Value> {
        date_patterns(&self.culture)
            .accepted(self.options.date_format)
            .iter()
            .find_map(|pattern| pattern.parse(text, &self.culture)?.date())
            .map(Value::Date)
            .ok_or_else(|| InputError::invalid_format("date").into())
    }

    fn format(&self, value: &Value) -> TypeResult<String> {
        let fields = Fields::from_date(Self::date(value)?);
        let pattern = date_patterns(&self.culture).display(self.options.date_format);
        Ok(pattern.format(&fields, &self.culture))
    }

    fn parse_neutral(&self, text: &str) -> TypeResult<Value> {
        parse_neutral_date(text)
            .map(Value::Date)
            .ok_or_else(|| InputError::invalid_format("date").into())
    }

    fn format_neutral(&self, value: &Value) -> TypeResult<String> {
        Ok(format_neutral_date(Self::date(value)?))
    }

    fn accept_native(&self, value: Value) -> TypeResult<Value> {
        match value {
            Value::Date(_) => Ok(value),
            Value::DateTime(dt) => Ok(Value::Date(dt.date())),
            other => Err(mismatch("date", &other)),
        }
    }

    fn review_value(&self, value: Value) -> TypeResult<Value> {
        let date = Self::date(&value)?;
        check_year(date)?;
        let below = self.min.is_some_and(|min| date < min);
        let above = self.max.is_some_and(|max| date > max);
        if below || above {
            let show = |d: Option<NaiveDate>| d.map(format_neutral_date).unwrap_or_default();
            return Err(InputError::out_of_range(show(self.min), show(self.max)).into());
        }
        Ok(value)
    }

    fn is_valid_char(&self, ch: char) -> bool {
        let patterns = date_patterns(&self.culture);
        let names = [patterns.short, patterns.abbreviated, patterns.long]
            .iter()
            .any(|p| Pattern::new(p).uses_names());
        is_date_char(ch, names)
    }

    fn compare_native(&self, a: &Value, b: &Value) -> Ordering {
        a.as_date().cmp(&b.as_date())
    }
}

// ============================================================================
// DATE TIME
// ============================================================================

/// Options for [`DateTime`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct DateTimeOptions {
    pub date_format: DateStyle,
    pub time_format: TimeStyle,
}

/// Date with time of day.
///
/// Displays as the date pattern, a space, then the time pattern. Input
/// without a time part means midnight.
///
/// ```rust
/// use formtype_types::prelude::*;
///
/// let manager = DateTime::new(CultureInfo::en_us().into());
/// let value = manager.to_value_str("3/5/2024 1:30 PM").unwrap();
/// assert_eq!(manager.to_text(&value).unwrap(), "3/5/2024 1:30 PM");
/// assert_eq!(manager.to_text_neutral(&value).unwrap(), "2024-03-05 13:30:00");
/// ```
#[derive(Debug, Clone)]
pub struct DateTime {
    culture: Arc<CultureInfo>,
    options: DateTimeOptions,
}

impl DateTime {
    /// Creates a date-time manager with default options.
    #[must_use]
    pub fn new(culture: Arc<CultureInfo>) -> Self {
        Self {
            culture,
            options: DateTimeOptions::default(),
        }
    }

    /// Creates a date-time manager with explicit options.
    #[must_use]
    pub fn with_options(culture: Arc<CultureInfo>, options: DateTimeOptions) -> Self {
        Self { culture, options }
    }

    #[must_use]
    pub fn options(&self) -> &DateTimeOptions {
        &self.options
    }

    fn time_pattern(&self, style: TimeStyle) -> &str {
        match style {
            TimeStyle::Short => &self.culture.time.short_time_pattern,
            TimeStyle::Long => &self.culture.time.long_time_pattern,
            TimeStyle::Neutral => NEUTRAL_TIME,
        }
    }

    fn display_pattern(&self) -> Pattern {
        if self.options.date_format == DateStyle::Neutral {
            return Pattern::new(&format!("{NEUTRAL_DATE} {NEUTRAL_TIME}"));
        }
        let date = date_patterns(&self.culture).text(self.options.date_format);
        Pattern::new(&format!("{date} {}", self.time_pattern(self.options.time_format)))
    }

    fn datetime(value: &Value) -> TypeResult<NaiveDateTime> {
        match value {
            Value::DateTime(dt) => Ok(*dt),
            other => Err(mismatch("datetime", other)),
        }
    }

    fn from_fields(fields: &Fields) -> Option<NaiveDateTime> {
        let date = fields.date()?;
        let seconds = match fields.hour {
            None => 0,
            Some(_) => fields.clock_seconds()?,
        };
        date.and_time(NaiveTime::MIN)
            .checked_add_signed(TimeDelta::try_seconds(seconds)?)
    }
}

impl TypeManager for DateTime {
    fn name(&self) -> &'static str {
        "DateTime"
    }

    fn data_type_name(&self) -> &'static str {
        "datetime"
    }

    fn culture(&self) -> &CultureInfo {
        &self.culture
    }

    fn parse(&self, text: &str) -> TypeResult<Value> {
        let dates = date_patterns(&self.culture);
        let times = [
            self.time_pattern(TimeStyle::Long),
            self.time_pattern(TimeStyle::Short),
            NEUTRAL_TIME,
        ];
        let mut candidates = vec![self.display_pattern()];
        for date in [dates.short, dates.abbreviated, dates.long, NEUTRAL_DATE] {
            for time in times {
                candidates.push(Pattern::new(&format!("{date} {time}")));
            }
        }
        candidates
            .iter()
            .find_map(|pattern| Self::from_fields(&pattern.parse(text, &self.culture)?))
            .map(Value::DateTime)
            .ok_or_else(|| InputError::invalid_format("date and time").into())
    }

    fn format(&self, value: &Value) -> TypeResult<String> {
        let fields = Fields::from_datetime(Self::datetime(value)?);
        Ok(self.display_pattern().format(&fields, &self.culture))
    }

    fn parse_neutral(&self, text: &str) -> TypeResult<Value> {
        let text = text.trim();
        NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S")
            .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M"))
            .ok()
            .or_else(|| parse_neutral_date(text).map(|d| d.and_time(NaiveTime::MIN)))
            .map(Value::DateTime)
            .ok_or_else(|| InputError::invalid_format("date and time").into())
    }

    fn format_neutral(&self, value: &Value) -> TypeResult<String> {
        Ok(Self::datetime(value)?.format("%Y-%m-%d %-H:%M:%S").to_string())
    }

    fn accept_native(&self, value: Value) -> TypeResult<Value> {
        match value {
            Value::DateTime(_) => Ok(value),
            Value::Date(d) => Ok(Value::DateTime(d.and_time(NaiveTime::MIN))),
            other => Err(mismatch("datetime", &other)),
        }
    }

    fn review_value(&self, value: Value) -> TypeResult<Value> {
        check_year(Self::datetime(&value)?.date())?;
        Ok(value)
    }

    fn is_valid_char(&self, ch: char) -> bool {
        let time = &self.culture.time;
        is_date_char(ch, true)
            || ch == ':'
            || time.time_separator.contains(ch)
            || time.am_designator.contains(ch)
            || time.pm_designator.contains(ch)
    }

    fn compare_native(&self, a: &Value, b: &Value) -> Ordering {
        let key = |v: &Value| match v {
            Value::DateTime(dt) => Some(*dt),
            _ => None,
        };
        key(a).cmp(&key(b))
    }
}
