//! Clock times and elapsed durations, both stored as `Value::Time`.

use std::cmp::Ordering;
use std::sync::Arc;

use chrono::TimeDelta;
use formtype_culture::CultureInfo;
use serde::{Deserialize, Serialize};

use super::pattern::{Fields, Pattern};
use super::{TimeStyle, TimeUnit, format_clock, parse_clock, split_seconds};
use crate::manager::mismatch;
use crate::{ConfigError, InputError, TypeManager, TypeResult, Value};

const SECONDS_PER_DAY: i64 = 24 * 3600;
const NEUTRAL_TIME: &str = "H:mm:ss";

/// Seconds of a time native. Numeric natives count seconds.
fn seconds_of(value: &Value, expected: &str) -> TypeResult<i64> {
    match value {
        Value::Time(t) => Ok(t.num_seconds()),
        Value::Integer(i) => Ok(*i),
        Value::Float(f) if f.is_finite() => Ok(f.round() as i64),
        other => Err(mismatch(expected, other)),
    }
}

/// `None` beyond what `TimeDelta` can hold.
fn time_value(seconds: i64) -> Option<Value> {
    TimeDelta::try_seconds(seconds).map(Value::Time)
}

fn is_clock_char(ch: char, culture: &CultureInfo) -> bool {
    ch.is_ascii_digit() || ch == ':' || culture.time.time_separator.contains(ch)
}

// ============================================================================
// TIME OF DAY
// ============================================================================

/// Options for [`TimeOfDay`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct TimeOfDayOptions {
    pub time_format: TimeStyle,
    /// Unit returned by `to_number`.
    pub time_unit: TimeUnit,
}

/// Time of day manager: `0:00:00` up to `23:59:59`.
///
/// ```rust
/// use formtype_types::prelude::*;
///
/// let manager = TimeOfDay::new(CultureInfo::en_us().into());
/// assert_eq!(manager.to_value_str("1:30 PM").unwrap(), Value::time(13, 30, 0));
/// assert_eq!(manager.to_text(&Value::Integer(86_399)).unwrap(), "11:59 PM");
/// assert!(manager.to_value(&Value::Integer(86_400)).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct TimeOfDay {
    culture: Arc<CultureInfo>,
    options: TimeOfDayOptions,
}

impl TimeOfDay {
    #[must_use]
    pub fn new(culture: Arc<CultureInfo>) -> Self {
        Self::with_options(culture, TimeOfDayOptions::default())
    }

    #[must_use]
    pub fn with_options(culture: Arc<CultureInfo>, options: TimeOfDayOptions) -> Self {
        Self { culture, options }
    }

    #[must_use]
    pub fn options(&self) -> &TimeOfDayOptions {
        &self.options
    }

    fn range_error() -> InputError {
        InputError::out_of_range("0:00:00", "23:59:59")
    }

    fn check_range(seconds: i64) -> Result<(), InputError> {
        if (0..SECONDS_PER_DAY).contains(&seconds) {
            Ok(())
        } else {
            Err(Self::range_error())
        }
    }

    fn pattern_text(&self, style: TimeStyle) -> &str {
        match style {
            TimeStyle::Short => &self.culture.time.short_time_pattern,
            TimeStyle::Long => &self.culture.time.long_time_pattern,
            TimeStyle::Neutral => NEUTRAL_TIME,
        }
    }
}

impl TypeManager for TimeOfDay {
    fn name(&self) -> &'static str {
        "TimeOfDay"
    }

    fn data_type_name(&self) -> &'static str {
        "time"
    }

    fn culture(&self) -> &CultureInfo {
        &self.culture
    }

    fn parse(&self, text: &str) -> TypeResult<Value> {
        [
            self.pattern_text(self.options.time_format),
            self.pattern_text(TimeStyle::Long),
            self.pattern_text(TimeStyle::Short),
            NEUTRAL_TIME,
        ]
        .iter()
        .find_map(|p| Pattern::new(p).parse(text, &self.culture)?.clock_seconds())
        .and_then(time_value)
        .ok_or_else(|| InputError::invalid_format("time").into())
    }

    fn format(&self, value: &Value) -> TypeResult<String> {
        let (hours, minutes, seconds) = split_seconds(seconds_of(value, "time")?);
        let fields = Fields::from_clock(hours as u32, minutes as u32, seconds as u32);
        let pattern = Pattern::new(self.pattern_text(self.options.time_format));
        Ok(pattern.format(&fields, &self.culture))
    }

    fn parse_neutral(&self, text: &str) -> TypeResult<Value> {
        parse_clock(text, ":", 2)
            .filter(|s| *s < SECONDS_PER_DAY)
            .and_then(time_value)
            .ok_or_else(|| InputError::invalid_format("time").into())
    }

    fn format_neutral(&self, value: &Value) -> TypeResult<String> {
        Ok(format_clock(seconds_of(value, "time")?, ":", true))
    }

    fn accept_native(&self, value: Value) -> TypeResult<Value> {
        let seconds = seconds_of(&value, "time")?;
        Self::check_range(seconds)?;
        time_value(seconds).ok_or_else(|| Self::range_error().into())
    }

    fn review_value(&self, value: Value) -> TypeResult<Value> {
        Self::check_range(seconds_of(&value, "time")?)?;
        Ok(value)
    }

    fn is_valid_char(&self, ch: char) -> bool {
        let time = &self.culture.time;
        is_clock_char(ch, &self.culture)
            || ch == ' '
            || time.am_designator.to_lowercase().contains(ch.to_ascii_lowercase())
            || time.pm_designator.to_lowercase().contains(ch.to_ascii_lowercase())
    }

    fn compare_native(&self, a: &Value, b: &Value) -> Ordering {
        a.as_time().cmp(&b.as_time())
    }

    fn to_number(&self, value: &Value) -> Option<f64> {
        Some(self.options.time_unit.convert(value.as_time()?.num_seconds()))
    }
}

// ============================================================================
// DURATION
// ============================================================================

/// Options for [`Duration`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct DurationOptions {
    pub time_format: TimeStyle,
    pub time_unit: TimeUnit,
    /// Largest hour count accepted.
    pub max_hours: u32,
}

impl Default for DurationOptions {
    fn default() -> Self {
        Self {
            time_format: TimeStyle::Long,
            time_unit: TimeUnit::Seconds,
            max_hours: 9999,
        }
    }
}

/// Elapsed time manager. Hours are not wrapped at 24.
///
/// ```rust
/// use formtype_types::prelude::*;
///
/// let manager = Duration::new(CultureInfo::en_us().into());
/// assert_eq!(manager.to_value_str("125:05").unwrap(), Value::time(125, 5, 0));
/// assert_eq!(manager.to_text(&Value::time(125, 5, 0)).unwrap(), "125:05:00");
/// ```
#[derive(Debug, Clone)]
pub struct Duration {
    culture: Arc<CultureInfo>,
    options: DurationOptions,
}

impl Duration {
    #[must_use]
    pub fn new(culture: Arc<CultureInfo>) -> Self {
        Self {
            culture,
            options: DurationOptions::default(),
        }
    }

    pub fn with_options(culture: Arc<CultureInfo>, options: DurationOptions) -> Result<Self, ConfigError> {
        if options.max_hours > 9999 {
            return Err(ConfigError::invalid_option("maxHours", "cannot exceed 9999"));
        }
        Ok(Self { culture, options })
    }

    #[must_use]
    pub fn options(&self) -> &DurationOptions {
        &self.options
    }

    fn range_error(&self) -> InputError {
        InputError::out_of_range("0:00:00", format!("{}:59:59", self.options.max_hours))
    }

    fn check_range(&self, seconds: i64) -> Result<(), InputError> {
        let max = i64::from(self.options.max_hours) * 3600 + 3599;
        if (0..=max).contains(&seconds) {
            Ok(())
        } else {
            Err(self.range_error())
        }
    }

    fn separator(&self) -> &str {
        match self.options.time_format {
            TimeStyle::Neutral => ":",
            _ => &self.culture.time.time_separator,
        }
    }
}

impl TypeManager for Duration {
    fn name(&self) -> &'static str {
        "Duration"
    }

    fn data_type_name(&self) -> &'static str {
        "time"
    }

    fn culture(&self) -> &CultureInfo {
        &self.culture
    }

    fn parse(&self, text: &str) -> TypeResult<Value> {
        parse_clock(text, &self.culture.time.time_separator, 4)
            .or_else(|| parse_clock(text, ":", 4))
            .and_then(time_value)
            .ok_or_else(|| InputError::invalid_format("duration").into())
    }

    fn format(&self, value: &Value) -> TypeResult<String> {
        let seconds = seconds_of(value, "time")?;
        let with_seconds = self.options.time_format != TimeStyle::Short;
        Ok(format_clock(seconds, self.separator(), with_seconds))
    }

    fn parse_neutral(&self, text: &str) -> TypeResult<Value> {
        parse_clock(text, ":", 4)
            .and_then(time_value)
            .ok_or_else(|| InputError::invalid_format("duration").into())
    }

    fn format_neutral(&self, value: &Value) -> TypeResult<String> {
        Ok(format_clock(seconds_of(value, "time")?, ":", true))
    }

    fn accept_native(&self, value: Value) -> TypeResult<Value> {
        let seconds = seconds_of(&value, "time")?;
        self.check_range(seconds)?;
        time_value(seconds).ok_or_else(|| self.range_error().into())
    }

    fn review_value(&self, value: Value) -> TypeResult<Value> {
        self.check_range(seconds_of(&value, "time")?)?;
        Ok(value)
    }

    fn is_valid_char(&self, ch: char) -> bool {
        is_clock_char(ch, &self.culture)
    }

    fn compare_native(&self, a: &Value, b: &Value) -> Ordering {
        a.as_time().cmp(&b.as_time())
    }

    fn to_number(&self, value: &Value) -> Option<f64> {
        Some(self.options.time_unit.convert(value.as_time()?.num_seconds()))
    }
}
