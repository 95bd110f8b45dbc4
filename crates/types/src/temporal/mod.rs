//! Date and time type managers
//!
//! All of them render through the culture's date and time patterns and
//! accept any of the culture's short, abbreviated or long forms on input,
//! so a user can type `3/5/2024` into a field that displays
//! `March 5, 2024`.
//!
//! | Manager       | Native              | Neutral form          |
//! |---------------|---------------------|-----------------------|
//! | [`Date`]      | `Date`              | `yyyy-MM-dd`          |
//! | [`DateTime`]  | `DateTime`          | `yyyy-MM-dd H:mm:ss`  |
//! | [`DayMonth`]  | `Date` (year 2004)  | `MM-dd`               |
//! | [`MonthYear`] | `Date` (day 1)      | `yyyy-MM`             |
//! | [`TimeOfDay`] | `Time`              | `H:mm:ss`             |
//! | [`Duration`]  | `Time`              | `H:mm:ss`             |

mod date;
mod day_month;
mod month_year;
pub(crate) mod pattern;
mod time;

pub use date::{Date, DateOptions, DateTime, DateTimeOptions};
pub use day_month::{DayMonth, DayMonthOptions};
pub use month_year::{MonthYear, MonthYearOptions};
pub use time::{Duration, DurationOptions, TimeOfDay, TimeOfDayOptions};

use std::ops::RangeInclusive;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::InputError;
use pattern::Pattern;

// ============================================================================
// STYLES
// ============================================================================

/// Which culture pattern a date manager displays with (`dateFormat`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DateStyle {
    #[default]
    Short,
    Abbreviated,
    Long,
    /// The manager's culture-neutral form.
    Neutral,
}

/// Which culture pattern a time manager displays with (`timeFormat`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimeStyle {
    /// Hours and minutes.
    #[default]
    Short,
    /// Hours, minutes and seconds.
    Long,
    /// `H:mm:ss` on a 24-hour clock.
    Neutral,
}

/// Unit of [`TypeManager::to_number`](crate::TypeManager::to_number) for
/// time values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimeUnit {
    #[default]
    Seconds,
    Minutes,
    Hours,
}

impl TimeUnit {
    pub(crate) fn convert(self, seconds: i64) -> f64 {
        let seconds = seconds as f64;
        match self {
            Self::Seconds => seconds,
            Self::Minutes => seconds / 60.0,
            Self::Hours => seconds / 3600.0,
        }
    }
}

// ============================================================================
// SHARED HELPERS
// ============================================================================

/// Culture patterns for one kind of date value, short/abbreviated/long.
pub(crate) struct DatePatterns<'a> {
    pub(crate) short: &'a str,
    pub(crate) abbreviated: &'a str,
    pub(crate) long: &'a str,
    pub(crate) neutral: &'a str,
}

impl<'a> DatePatterns<'a> {
    pub(crate) fn text(&self, style: DateStyle) -> &'a str {
        match style {
            DateStyle::Short => self.short,
            DateStyle::Abbreviated => self.abbreviated,
            DateStyle::Long => self.long,
            DateStyle::Neutral => self.neutral,
        }
    }

    pub(crate) fn display(&self, style: DateStyle) -> Pattern {
        Pattern::new(self.text(style))
    }

    /// Display pattern first, then every other accepted form.
    pub(crate) fn accepted(&self, style: DateStyle) -> Vec<Pattern> {
        let mut patterns = vec![self.display(style)];
        for text in [self.short, self.abbreviated, self.long, self.neutral] {
            let pattern = Pattern::new(text);
            if !patterns.contains(&pattern) {
                patterns.push(pattern);
            }
        }
        patterns
    }
}

/// Years the culture patterns and the neutral forms write as four digits.
pub(crate) const YEAR_RANGE: RangeInclusive<i32> = 1..=9999;

/// Rejects dates whose year cannot round-trip through text.
pub(crate) fn check_year(date: NaiveDate) -> Result<(), InputError> {
    if YEAR_RANGE.contains(&date.year()) {
        Ok(())
    } else {
        Err(InputError::out_of_range("0001-01-01", "9999-12-31"))
    }
}

/// Characters typed into a date field.
pub(crate) fn is_date_char(ch: char, names: bool) -> bool {
    ch.is_ascii_digit()
        || ch.is_whitespace()
        || matches!(ch, '/' | '-' | '.' | ',')
        || (names && ch.is_alphabetic())
}

/// Parses `H:mm[:ss]` with up to `max_hour_digits` hour digits into
/// seconds. Minutes and seconds must be below 60.
pub(crate) fn parse_clock(text: &str, separator: &str, max_hour_digits: usize) -> Option<i64> {
    let separator = if separator.is_empty() { ":" } else { separator };
    let parts: Vec<&str> = text.trim().split(separator).map(str::trim).collect();
    if !(2..=3).contains(&parts.len()) {
        return None;
    }
    let number = |part: &str, max: usize| -> Option<i64> {
        if part.is_empty() || part.len() > max || !part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        part.parse().ok()
    };
    let hours = number(parts[0], max_hour_digits)?;
    let minutes = number(parts[1], 2)?;
    let seconds = match parts.get(2) {
        Some(part) => number(part, 2)?,
        None => 0,
    };
    if minutes > 59 || seconds > 59 {
        return None;
    }
    Some(hours * 3600 + minutes * 60 + seconds)
}

/// Formats seconds as `H:mm:ss` (or `H:mm`) with unpadded hours.
pub(crate) fn format_clock(seconds: i64, separator: &str, with_seconds: bool) -> String {
    let (hours, minutes, secs) = split_seconds(seconds);
    if with_seconds {
        format!("{hours}{separator}{minutes:02}{separator}{secs:02}")
    } else {
        format!("{hours}{separator}{minutes:02}")
    }
}

pub(crate) fn split_seconds(seconds: i64) -> (i64, i64, i64) {
    (seconds / 3600, seconds % 3600 / 60, seconds % 60)
}
