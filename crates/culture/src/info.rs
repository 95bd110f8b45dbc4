//! Culture record types
//!
//! Pattern conventions used across the record:
//!
//! - number patterns use `n` for the digits (`"-n"`, `"(n)"`, `"n-"`)
//! - currency patterns use `n` for the digits and `$` for the symbol
//! - percent patterns use `n` for the digits and `%` for the symbol
//! - date and time patterns use .NET-style tokens (`M/d/yyyy`, `h:mm tt`)

use serde::{Deserialize, Serialize};

use crate::CultureError;

// ============================================================================
// CULTURE INFO
// ============================================================================

/// Formatting and parsing rules for one locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CultureInfo {
    /// Culture name such as `en-US`.
    pub name: String,
    /// Plain number rules.
    pub number: NumberFormat,
    /// Currency rules.
    pub currency: CurrencyFormat,
    /// Percent rules.
    pub percent: PercentFormat,
    /// Calendar rules.
    pub date: DateFormat,
    /// Clock rules.
    pub time: TimeFormat,
}

/// Separators and negative placement for plain numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberFormat {
    pub decimal_separator: String,
    pub group_separator: String,
    /// Digit group sizes from the decimal point outwards. The last entry
    /// repeats; `0` stops grouping.
    pub group_sizes: Vec<usize>,
    pub negative_sign: String,
    /// One of `-n`, `- n`, `n-`, `n -`, `(n)`.
    pub negative_pattern: String,
}

/// Currency symbol and patterns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyFormat {
    pub symbol: String,
    pub decimal_digits: u32,
    pub decimal_separator: String,
    pub group_separator: String,
    pub positive_pattern: String,
    pub negative_pattern: String,
}

/// Percent symbol and patterns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PercentFormat {
    pub symbol: String,
    pub decimal_digits: u32,
    pub positive_pattern: String,
    pub negative_pattern: String,
}

/// Calendar patterns and names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateFormat {
    pub short_date_pattern: String,
    pub abbreviated_date_pattern: String,
    pub long_date_pattern: String,
    pub short_day_month_pattern: String,
    pub abbreviated_day_month_pattern: String,
    pub long_day_month_pattern: String,
    pub short_month_year_pattern: String,
    pub abbreviated_month_year_pattern: String,
    pub long_month_year_pattern: String,
    pub month_names: Vec<String>,
    pub abbreviated_month_names: Vec<String>,
    /// Sunday first.
    pub day_names: Vec<String>,
    pub abbreviated_day_names: Vec<String>,
    /// Two digit years at or below `two_digit_year_max % 100` belong to the
    /// century of `two_digit_year_max`; larger ones to the century before.
    pub two_digit_year_max: i32,
}

/// Clock patterns and designators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeFormat {
    pub short_time_pattern: String,
    pub long_time_pattern: String,
    /// Empty for 24-hour cultures.
    pub am_designator: String,
    pub pm_designator: String,
    pub time_separator: String,
}

impl CultureInfo {
    /// Parses a culture record from JSON and validates it.
    pub fn from_json(json: &str) -> Result<Self, CultureError> {
        let culture: Self = serde_json::from_str(json).map_err(|e| CultureError::Deserialization {
            error: e.to_string(),
        })?;
        culture.validate()?;
        Ok(culture)
    }

    /// The `en-US` culture, used when nothing else is configured.
    #[must_use]
    pub fn en_us() -> Self {
        crate::builtin::en_us()
    }

    /// Culture-neutral rules: `en-US` separators with a 24-hour clock.
    #[must_use]
    pub fn invariant() -> Self {
        let mut culture = crate::builtin::en_us();
        culture.name = String::new();
        culture.time.short_time_pattern = "H:mm".into();
        culture.time.long_time_pattern = "H:mm:ss".into();
        culture
    }

    /// Language part of the name (`"de"` for `"de-DE"`).
    #[must_use]
    pub fn language(&self) -> &str {
        self.name.split(['-', '_']).next().unwrap_or_default()
    }

    /// Whether the clock uses AM/PM designators.
    #[must_use]
    pub fn uses_twelve_hour_clock(&self) -> bool {
        !self.time.am_designator.is_empty() && !self.time.pm_designator.is_empty()
    }

    /// Resolves a two digit year into a full year.
    #[must_use]
    pub fn expand_two_digit_year(&self, year: i32) -> i32 {
        let max = self.date.two_digit_year_max;
        let century = max - max % 100;
        if year <= max % 100 {
            century + year
        } else {
            century - 100 + year
        }
    }

    /// Checks the record for inconsistencies that would make parsing
    /// ambiguous.
    pub fn validate(&self) -> Result<(), CultureError> {
        let invalid = |reason: &str| CultureError::InvalidCulture {
            name: self.name.clone(),
            reason: reason.to_string(),
        };

        if self.number.decimal_separator.is_empty() {
            return Err(invalid("decimal separator cannot be empty"));
        }
        if self.number.decimal_separator == self.number.group_separator {
            return Err(invalid("decimal and group separators must differ"));
        }
        if self.currency.decimal_separator == self.currency.group_separator {
            return Err(invalid("currency decimal and group separators must differ"));
        }
        if !matches!(
            self.number.negative_pattern.as_str(),
            "-n" | "- n" | "n-" | "n -" | "(n)"
        ) {
            return Err(invalid("unsupported negative number pattern"));
        }
        for pattern in [
            &self.currency.positive_pattern,
            &self.currency.negative_pattern,
        ] {
            if !pattern.contains('n') || !pattern.contains('$') {
                return Err(invalid("currency patterns need `n` and `$`"));
            }
        }
        for pattern in [&self.percent.positive_pattern, &self.percent.negative_pattern] {
            if !pattern.contains('n') || !pattern.contains('%') {
                return Err(invalid("percent patterns need `n` and `%`"));
            }
        }
        if self.date.month_names.len() != 12 || self.date.abbreviated_month_names.len() != 12 {
            return Err(invalid("month name tables need 12 entries"));
        }
        if self.date.day_names.len() != 7 || self.date.abbreviated_day_names.len() != 7 {
            return Err(invalid("day name tables need 7 entries"));
        }
        if self.am_pm_mismatch() {
            return Err(invalid("AM and PM designators must both be set or both be empty"));
        }
        Ok(())
    }

    fn am_pm_mismatch(&self) -> bool {
        self.time.am_designator.is_empty() != self.time.pm_designator.is_empty()
    }
}

impl Default for CultureInfo {
    fn default() -> Self {
        Self::en_us()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_prefix() {
        assert_eq!(CultureInfo::en_us().language(), "en");
    }

    #[test]
    fn two_digit_years_pivot_on_year_max() {
        let culture = CultureInfo::en_us();
        assert_eq!(culture.expand_two_digit_year(29), 2029);
        assert_eq!(culture.expand_two_digit_year(30), 1930);
        assert_eq!(culture.expand_two_digit_year(5), 2005);
    }

    #[test]
    fn invariant_uses_24_hour_patterns() {
        let culture = CultureInfo::invariant();
        assert_eq!(culture.time.long_time_pattern, "H:mm:ss");
    }

    #[test]
    fn rejects_equal_separators() {
        let mut culture = CultureInfo::en_us();
        culture.number.group_separator = ".".into();
        assert!(culture.validate().is_err());
    }

    #[test]
    fn rejects_short_month_table() {
        let mut culture = CultureInfo::en_us();
        culture.date.month_names.pop();
        assert!(matches!(
            culture.validate(),
            Err(CultureError::InvalidCulture { .. })
        ));
    }

    #[test]
    fn json_round_trip() {
        let json = serde_json::to_string(&CultureInfo::en_us()).unwrap();
        let parsed = CultureInfo::from_json(&json).unwrap();
        assert_eq!(parsed, CultureInfo::en_us());
    }

    #[test]
    fn json_with_missing_fields_is_rejected() {
        let err = CultureInfo::from_json(r#"{"name":"xx"}"#).unwrap_err();
        assert_eq!(err.code(), "CULTURE_DESER");
    }
}
