//! Numeric type managers
//!
//! [`Integer`], [`Float`], [`Currency`] and [`Percent`] share one parsing and
//! formatting engine ([`NumberRules`]); they differ in which symbol they
//! handle and in their decimal-place policy.
//!
//! Parsing is forgiving about where the user puts the negative sign (left,
//! right, or surrounding parentheses) and strict about everything else:
//! only digits, one decimal separator, group separators (when allowed) and
//! the type's symbol (when accepted) may appear.

mod currency;
mod float;
mod integer;
mod percent;

pub use currency::{Currency, CurrencyOptions};
pub use float::{Float, FloatOptions};
pub use integer::{Integer, IntegerOptions};
pub use percent::{Percent, PercentOptions};

use formtype_culture::CultureInfo;
use rust_decimal::Decimal;

use crate::decimal::{RoundMode, from_float, is_negative, parse_digits, parts, places, rounded};
use crate::{InputError, TypeResult, Value};

// ============================================================================
// RULES
// ============================================================================

/// Which symbol a numeric manager formats and accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SymbolKind {
    None,
    Currency,
    Percent,
}

/// Resolved parsing and formatting rules for one numeric manager.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NumberRules {
    pub(crate) type_name: &'static str,
    pub(crate) integer: bool,
    pub(crate) allow_negatives: bool,
    pub(crate) allow_group_sep: bool,
    pub(crate) show_group_sep: bool,
    pub(crate) max_decimal_places: Option<u32>,
    pub(crate) min_decimal_places: u32,
    /// `None` reports surplus decimal places as an input error.
    pub(crate) round_mode: Option<RoundMode>,
    pub(crate) symbol: SymbolKind,
    pub(crate) show_symbol: bool,
    pub(crate) accept_symbol: bool,
    pub(crate) lead_zeros: usize,
}

impl NumberRules {
    pub(crate) fn new(type_name: &'static str) -> Self {
        Self {
            type_name,
            integer: false,
            allow_negatives: true,
            allow_group_sep: true,
            show_group_sep: true,
            max_decimal_places: None,
            min_decimal_places: 0,
            round_mode: Some(RoundMode::HalfAwayFromZero),
            symbol: SymbolKind::None,
            show_symbol: false,
            accept_symbol: false,
            lead_zeros: 0,
        }
    }

    fn separators<'a>(&self, culture: &'a CultureInfo) -> (&'a str, &'a str) {
        match self.symbol {
            SymbolKind::Currency => (
                &culture.currency.decimal_separator,
                &culture.currency.group_separator,
            ),
            _ => (
                &culture.number.decimal_separator,
                &culture.number.group_separator,
            ),
        }
    }

    fn symbol_text<'a>(&self, culture: &'a CultureInfo) -> Option<&'a str> {
        match self.symbol {
            SymbolKind::None => None,
            SymbolKind::Currency => Some(&culture.currency.symbol),
            SymbolKind::Percent => Some(&culture.percent.symbol),
        }
    }

    // ------------------------------------------------------------------
    // Parsing
    // ------------------------------------------------------------------

    /// Reads culture-formatted text into an exact decimal.
    pub(crate) fn parse(&self, text: &str, culture: &CultureInfo) -> Result<Decimal, InputError> {
        let mut body = text.trim().to_string();

        if let Some(symbol) = self.symbol_text(culture).filter(|s| !s.is_empty()) {
            if let Some(at) = body.find(symbol) {
                if !self.accept_symbol {
                    return Err(InputError::new(
                        "symbol_not_allowed",
                        format!("The symbol '{symbol}' is not allowed"),
                    )
                    .with_param("symbol", symbol.to_string()));
                }
                // the symbol sits at either end, possibly outside a sign
                let (before, after) = (&body[..at], &body[at + symbol.len()..]);
                let sign = culture.number.negative_sign.as_str();
                let at_edge = |side: &str| {
                    side.chars()
                        .all(|c| c.is_whitespace() || c == '(' || c == ')' || sign.contains(c))
                };
                if !at_edge(before) && !at_edge(after) {
                    return Err(InputError::invalid_format(self.type_name));
                }
                body = format!("{}{}", before.trim_end(), after.trim_start());
            }
        }

        let (negative, unsigned) = self.strip_negative(&body, culture)?;
        if negative && !self.allow_negatives {
            return Err(negative_not_allowed());
        }

        let (decimal_sep, group_sep) = self.separators(culture);
        let digits = self.strip_groups(unsigned, group_sep)?;

        let (int_part, frac_part) = match digits.split_once(decimal_sep) {
            Some((i, f)) => {
                if self.integer {
                    return Err(InputError::new(
                        "decimal_not_allowed",
                        "Decimal values are not allowed",
                    ));
                }
                (i.to_string(), f.to_string())
            }
            None => (digits.clone(), String::new()),
        };

        let well_formed = !(int_part.is_empty() && frac_part.is_empty())
            && int_part.chars().all(|c| c.is_ascii_digit())
            && frac_part.chars().all(|c| c.is_ascii_digit());
        if !well_formed {
            return Err(InputError::invalid_format(self.type_name));
        }

        let mut number = parse_digits(&int_part, &frac_part).ok_or_else(beyond_decimal)?;
        number.set_sign_negative(negative);
        Ok(number)
    }

    /// Detects `-n`, `n-` and `(n)` forms, tolerating whitespace between the
    /// sign and the digits.
    fn strip_negative<'a>(
        &self,
        body: &'a str,
        culture: &CultureInfo,
    ) -> Result<(bool, &'a str), InputError> {
        let sign = culture.number.negative_sign.as_str();

        if let Some(inner) = body.strip_prefix('(').and_then(|b| b.strip_suffix(')')) {
            return Ok((true, inner.trim()));
        }
        if let Some(rest) = body.strip_prefix(sign) {
            let rest = rest.trim();
            if rest.starts_with(sign) || rest.ends_with(sign) {
                return Err(InputError::invalid_format(self.type_name));
            }
            return Ok((true, rest));
        }
        if let Some(rest) = body.strip_suffix(sign) {
            return Ok((true, rest.trim()));
        }
        Ok((false, body))
    }

    fn strip_groups(&self, body: &str, group_sep: &str) -> Result<String, InputError> {
        let whitespace_group = !group_sep.is_empty() && group_sep.trim().is_empty();
        let has_group = (!group_sep.is_empty() && body.contains(group_sep))
            || (whitespace_group && body.contains(' '));
        if !has_group {
            return Ok(body.to_string());
        }
        if !self.allow_group_sep {
            return Err(InputError::new(
                "group_separator_not_allowed",
                "Group separators are not allowed",
            )
            .with_param("separator", group_sep.to_string()));
        }
        let mut stripped = body.replace(group_sep, "");
        if whitespace_group {
            stripped.retain(|c| c != ' ');
        }
        Ok(stripped)
    }

    // ------------------------------------------------------------------
    // Review
    // ------------------------------------------------------------------

    /// Applies the decimal-place policy to the displayed magnitude.
    pub(crate) fn apply_decimal_policy(&self, number: &mut Decimal) -> Result<(), InputError> {
        let Some(max) = self.max_decimal_places else {
            return Ok(());
        };
        if places(number) <= max {
            return Ok(());
        }
        match self.round_mode {
            Some(mode) => {
                *number = rounded(*number, max, mode);
                Ok(())
            }
            None => Err(InputError::new(
                "too_many_decimals",
                format!("No more than {max} decimal places are allowed"),
            )
            .with_param("max", max.to_string())),
        }
    }

    pub(crate) fn check_negative(&self, value: f64) -> Result<(), InputError> {
        if value < 0.0 && !self.allow_negatives {
            return Err(negative_not_allowed());
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Formatting
    // ------------------------------------------------------------------

    /// Formats the displayed magnitude with separators, sign and symbol.
    pub(crate) fn format(&self, number: &Decimal, culture: &CultureInfo) -> String {
        let mut number = *number;
        if let Some(max) = self.max_decimal_places {
            number = rounded(number, max, self.round_mode.unwrap_or_default());
        }
        let (decimal_sep, group_sep) = self.separators(culture);
        let (mut int_part, frac_part) = parts(&number, self.min_decimal_places);

        while int_part.len() < self.lead_zeros {
            int_part.insert(0, '0');
        }
        if self.show_group_sep {
            int_part = group_digits(&int_part, &culture.number.group_sizes, group_sep);
        }
        let body = if frac_part.is_empty() {
            int_part
        } else {
            format!("{int_part}{decimal_sep}{frac_part}")
        };

        let pattern = match (self.symbol, is_negative(&number)) {
            (SymbolKind::None, true) => culture.number.negative_pattern.as_str(),
            (SymbolKind::None, false) => "n",
            (SymbolKind::Currency, true) => culture.currency.negative_pattern.as_str(),
            (SymbolKind::Currency, false) => culture.currency.positive_pattern.as_str(),
            (SymbolKind::Percent, true) => culture.percent.negative_pattern.as_str(),
            (SymbolKind::Percent, false) => culture.percent.positive_pattern.as_str(),
        };
        self.apply_pattern(pattern, &body, culture)
    }

    fn apply_pattern(&self, pattern: &str, body: &str, culture: &CultureInfo) -> String {
        let symbol = self.symbol_text(culture).unwrap_or_default();
        let mut out = String::with_capacity(pattern.len() + body.len() + symbol.len());
        for ch in pattern.chars() {
            match ch {
                'n' => out.push_str(body),
                '-' => out.push_str(&culture.number.negative_sign),
                '$' if self.symbol == SymbolKind::Currency => {
                    if self.show_symbol {
                        out.push_str(symbol);
                    }
                }
                '%' if self.symbol == SymbolKind::Percent => {
                    if self.show_symbol {
                        out.push_str(symbol);
                    }
                }
                other => out.push(other),
            }
        }
        if self.show_symbol {
            out
        } else {
            out.trim().to_string()
        }
    }

    // ------------------------------------------------------------------
    // Characters
    // ------------------------------------------------------------------

    pub(crate) fn is_valid_char(&self, ch: char, culture: &CultureInfo) -> bool {
        if ch.is_ascii_digit() {
            return true;
        }
        let (decimal_sep, group_sep) = self.separators(culture);
        if !self.integer && decimal_sep.contains(ch) {
            return true;
        }
        if self.allow_group_sep
            && (group_sep.contains(ch) || (ch == ' ' && group_sep.trim().is_empty()))
        {
            return true;
        }
        if self.allow_negatives
            && (culture.number.negative_sign.contains(ch) || ch == '(' || ch == ')')
        {
            return true;
        }
        if self.accept_symbol {
            if let Some(symbol) = self.symbol_text(culture) {
                if symbol.contains(ch) || ch == ' ' {
                    return true;
                }
            }
        }
        false
    }
}

fn negative_not_allowed() -> InputError {
    InputError::new("negative_not_allowed", "Negative values are not allowed")
}

/// Magnitudes a 96-bit decimal cannot hold.
pub(crate) fn beyond_decimal() -> InputError {
    InputError::out_of_range(Decimal::MIN, Decimal::MAX)
}

/// Inserts group separators into a run of integer digits.
fn group_digits(digits: &str, sizes: &[usize], separator: &str) -> String {
    if sizes.is_empty() || sizes[0] == 0 || separator.is_empty() {
        return digits.to_string();
    }
    let chars: Vec<char> = digits.chars().collect();
    let mut groups: Vec<String> = Vec::new();
    let mut end = chars.len();
    let mut index = 0;
    loop {
        let size = sizes[index.min(sizes.len() - 1)];
        if size == 0 || end <= size {
            groups.push(chars[..end].iter().collect());
            break;
        }
        groups.push(chars[end - size..end].iter().collect());
        end -= size;
        index += 1;
    }
    groups.reverse();
    groups.join(separator)
}

// ============================================================================
// NEUTRAL FORMAT HELPERS
// ============================================================================

/// Parses `[-]digits[.digits]`. Integers reject the fraction.
pub(crate) fn parse_neutral(text: &str, integer: bool, type_name: &str) -> TypeResult<Decimal> {
    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };
    let digits_ok = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
    let valid = digits_ok(int_part)
        && match frac_part {
            None => true,
            Some(f) => !integer && digits_ok(f),
        };
    if !valid {
        return Err(InputError::invalid_format(type_name).into());
    }
    let mut number =
        parse_digits(int_part, frac_part.unwrap_or_default()).ok_or_else(beyond_decimal)?;
    number.set_sign_negative(negative);
    Ok(number)
}

/// Formats `[-]digits.digits` with at least one fraction digit.
pub(crate) fn format_neutral_float(value: f64) -> TypeResult<String> {
    let number = finite_decimal(value)?;
    let (int_part, frac_part) = parts(&number, 1);
    let sign = if is_negative(&number) { "-" } else { "" };
    Ok(format!("{sign}{int_part}.{frac_part}"))
}

pub(crate) fn finite_decimal(value: f64) -> TypeResult<Decimal> {
    if !value.is_finite() {
        return Err(InputError::new("not_finite", "Value must be a finite number").into());
    }
    from_float(value).ok_or_else(|| beyond_decimal().into())
}

/// Extracts a float from numeric natives.
pub(crate) fn native_f64(value: &Value, expected: &str) -> TypeResult<f64> {
    value
        .as_f64()
        .ok_or_else(|| crate::manager::mismatch(expected, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::to_float;
    use rstest::rstest;

    fn rules() -> NumberRules {
        NumberRules::new("float")
    }

    #[rstest]
    #[case("1234567", "1,234,567")]
    #[case("123", "123")]
    #[case("1234", "1,234")]
    #[case("0", "0")]
    fn groups(#[case] digits: &str, #[case] expected: &str) {
        assert_eq!(group_digits(digits, &[3], ","), expected);
    }

    #[test]
    fn indian_style_grouping() {
        assert_eq!(group_digits("123456789", &[3, 2], ","), "12,34,56,789");
    }

    #[test]
    fn grouping_stops_at_zero_size() {
        assert_eq!(group_digits("123456789", &[3, 0], ","), "123456,789");
    }

    #[rstest]
    #[case("-12.5", -12.5)]
    #[case("12.5-", -12.5)]
    #[case("(12.5)", -12.5)]
    #[case("- 12.5", -12.5)]
    #[case(".5", 0.5)]
    #[case("1,000.25", 1000.25)]
    fn parses_negative_forms(#[case] text: &str, #[case] expected: f64) {
        let culture = CultureInfo::en_us();
        let parsed = rules().parse(text, &culture).unwrap();
        assert_eq!(to_float(&parsed), expected);
    }

    #[rstest]
    #[case("--1")]
    #[case("1.2.3")]
    #[case("12a")]
    #[case("-")]
    #[case(".")]
    fn rejects_malformed(#[case] text: &str) {
        let culture = CultureInfo::en_us();
        assert!(rules().parse(text, &culture).is_err());
    }

    #[rstest]
    #[case("$5", 5.0)]
    #[case("5 $", 5.0)]
    #[case("-$5", -5.0)]
    #[case("$-5", -5.0)]
    #[case("($5)", -5.0)]
    #[case("$ 1,200.50", 1200.5)]
    fn currency_symbol_at_either_end(#[case] text: &str, #[case] expected: f64) {
        let mut rules = NumberRules::new("currency");
        rules.symbol = SymbolKind::Currency;
        rules.accept_symbol = true;
        let parsed = rules.parse(text, &CultureInfo::en_us()).unwrap();
        assert_eq!(to_float(&parsed), expected);
    }

    #[rstest]
    #[case("1$2")]
    #[case("1 $ 2")]
    #[case("-1$5")]
    fn currency_symbol_between_digits_is_invalid(#[case] text: &str) {
        let mut rules = NumberRules::new("currency");
        rules.symbol = SymbolKind::Currency;
        rules.accept_symbol = true;
        let err = rules.parse(text, &CultureInfo::en_us()).unwrap_err();
        assert_eq!(err.code, "invalid_format");
    }

    #[test]
    fn digits_beyond_decimal_range_are_out_of_range() {
        let err = rules().parse(&"9".repeat(40), &CultureInfo::en_us()).unwrap_err();
        assert_eq!(err.code, "out_of_range");
        assert!(parse_neutral(&"9".repeat(40), false, "float").is_err());
    }

    #[test]
    fn whitespace_group_separator_accepts_plain_space() {
        let culture = formtype_culture::CultureRegistry::with_builtins()
            .get("fr-FR")
            .unwrap();
        let parsed = rules().parse("1 234,5", &culture).unwrap();
        assert_eq!(to_float(&parsed), 1234.5);
        let parsed = rules().parse("1\u{a0}234,5", &culture).unwrap();
        assert_eq!(to_float(&parsed), 1234.5);
    }

    #[test]
    fn neutral_parse() {
        assert_eq!(to_float(&parse_neutral("-12.50", false, "float").unwrap()), -12.5);
        assert!(parse_neutral("12.5", true, "integer").is_err());
        assert!(parse_neutral("1,2", false, "float").is_err());
        assert!(parse_neutral("-", false, "float").is_err());
        assert!(parse_neutral("5.", false, "float").is_err());
    }

    #[test]
    fn neutral_float_format_keeps_a_fraction_digit() {
        assert_eq!(format_neutral_float(1.0).unwrap(), "1.0");
        assert_eq!(format_neutral_float(-0.25).unwrap(), "-0.25");
        assert!(format_neutral_float(f64::NAN).is_err());
    }
}
