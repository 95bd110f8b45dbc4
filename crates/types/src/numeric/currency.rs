//! Money amounts: a [`Float`] with the culture's currency symbol and digits.

use std::cmp::Ordering;
use std::sync::Arc;

use formtype_culture::CultureInfo;
use serde::{Deserialize, Serialize};

use super::{Float, NumberRules, SymbolKind};
use crate::decimal::RoundMode;
use crate::{ConfigError, TypeManager, TypeResult, Value};

/// Options for [`Currency`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct CurrencyOptions {
    pub allow_negatives: bool,
    pub allow_group_sep: bool,
    pub show_group_sep: bool,
    /// Defaults to the culture's currency digits.
    pub max_decimal_places: Option<u32>,
    /// Defaults to the culture's currency digits.
    pub min_decimal_places: Option<u32>,
    pub round_mode: Option<RoundMode>,
    /// Include the symbol when formatting.
    pub show_symbol: bool,
    /// Tolerate the symbol in input.
    pub accept_symbol: bool,
}

impl Default for CurrencyOptions {
    fn default() -> Self {
        Self {
            allow_negatives: true,
            allow_group_sep: true,
            show_group_sep: true,
            max_decimal_places: None,
            min_decimal_places: None,
            round_mode: Some(RoundMode::HalfAwayFromZero),
            show_symbol: true,
            accept_symbol: true,
        }
    }
}

/// Currency type manager.
///
/// # Examples
///
/// ```rust
/// use formtype_types::prelude::*;
///
/// let currency = Currency::new(CultureInfo::en_us().into());
/// assert_eq!(currency.to_text(&Value::Float(-1234.5)).unwrap(), "($1,234.50)");
/// assert_eq!(currency.to_value_str("$1,234.50").unwrap(), Value::Float(1234.5));
/// assert_eq!(currency.to_value_str("($5)").unwrap(), Value::Float(-5.0));
/// ```
#[derive(Debug, Clone)]
pub struct Currency {
    inner: Float,
    options: CurrencyOptions,
}

impl Currency {
    /// Creates a currency manager with default options.
    #[must_use]
    pub fn new(culture: Arc<CultureInfo>) -> Self {
        let options = CurrencyOptions::default();
        let rules = Self::rules(&culture, &options);
        Self {
            inner: Float::from_rules(culture, rules, 0),
            options,
        }
    }

    /// Creates a currency manager with explicit options.
    pub fn with_options(
        culture: Arc<CultureInfo>,
        options: CurrencyOptions,
    ) -> Result<Self, ConfigError> {
        let rules = Self::rules(&culture, &options);
        if let Some(max) = rules.max_decimal_places {
            if max < rules.min_decimal_places {
                return Err(ConfigError::invalid_option(
                    "maxDecimalPlaces",
                    "must be at least minDecimalPlaces",
                ));
            }
        }
        Ok(Self {
            inner: Float::from_rules(culture, rules, 0),
            options,
        })
    }

    fn rules(culture: &CultureInfo, options: &CurrencyOptions) -> NumberRules {
        let digits = culture.currency.decimal_digits;
        let mut rules = NumberRules::new("currency");
        rules.allow_negatives = options.allow_negatives;
        rules.allow_group_sep = options.allow_group_sep;
        rules.show_group_sep = options.show_group_sep;
        rules.max_decimal_places = Some(options.max_decimal_places.unwrap_or(digits));
        rules.min_decimal_places = options.min_decimal_places.unwrap_or(digits);
        rules.round_mode = options.round_mode;
        rules.symbol = SymbolKind::Currency;
        rules.show_symbol = options.show_symbol;
        rules.accept_symbol = options.accept_symbol;
        rules
    }

    #[must_use]
    pub fn options(&self) -> &CurrencyOptions {
        &self.options
    }
}

impl TypeManager for Currency {
    fn name(&self) -> &'static str {
        "Currency"
    }

    fn data_type_name(&self) -> &'static str {
        "float"
    }

    fn culture(&self) -> &CultureInfo {
        self.inner.culture()
    }

    fn parse(&self, text: &str) -> TypeResult<Value> {
        self.inner.parse(text)
    }

    fn format(&self, value: &Value) -> TypeResult<String> {
        self.inner.format(value)
    }

    fn parse_neutral(&self, text: &str) -> TypeResult<Value> {
        self.inner.parse_neutral(text)
    }

    fn format_neutral(&self, value: &Value) -> TypeResult<String> {
        self.inner.format_neutral(value)
    }

    fn accept_native(&self, value: Value) -> TypeResult<Value> {
        self.inner.accept_native(value)
    }

    fn review_value(&self, value: Value) -> TypeResult<Value> {
        self.inner.review_value(value)
    }

    fn is_valid_char(&self, ch: char) -> bool {
        self.inner.is_valid_char(ch)
    }

    fn compare_native(&self, a: &Value, b: &Value) -> Ordering {
        self.inner.compare_native(a, b)
    }

    fn to_number(&self, value: &Value) -> Option<f64> {
        self.inner.to_number(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formtype_culture::CultureRegistry;
    use rstest::rstest;

    fn currency() -> Currency {
        Currency::new(Arc::new(CultureInfo::en_us()))
    }

    #[rstest]
    #[case("$12.34", 12.34)]
    #[case("12.34", 12.34)]
    #[case("-$12.34", -12.34)]
    #[case("$-12.34", -12.34)]
    #[case("($12.34)", -12.34)]
    #[case("12.345", 12.35)]
    fn parses(#[case] text: &str, #[case] expected: f64) {
        assert_eq!(currency().to_value_str(text).unwrap(), Value::Float(expected));
    }

    #[rstest]
    #[case(0.0, "$0.00")]
    #[case(5.0, "$5.00")]
    #[case(1234.567, "$1,234.57")]
    #[case(-2.5, "($2.50)")]
    fn formats(#[case] value: f64, #[case] expected: &str) {
        assert_eq!(currency().to_text(&Value::Float(value)).unwrap(), expected);
    }

    #[test]
    fn symbol_can_be_rejected() {
        let strict = Currency::with_options(
            Arc::new(CultureInfo::en_us()),
            CurrencyOptions {
                accept_symbol: false,
                ..CurrencyOptions::default()
            },
        )
        .unwrap();
        assert_eq!(
            strict.to_value_str("$5").unwrap_err().code(),
            "symbol_not_allowed"
        );
        assert!(!strict.is_valid_char('$'));
    }

    #[test]
    fn symbol_can_be_hidden() {
        let plain = Currency::with_options(
            Arc::new(CultureInfo::en_us()),
            CurrencyOptions {
                show_symbol: false,
                ..CurrencyOptions::default()
            },
        )
        .unwrap();
        assert_eq!(plain.to_text(&Value::Float(-3.0)).unwrap(), "(3.00)");
        assert_eq!(plain.to_text(&Value::Float(3.0)).unwrap(), "3.00");
    }

    #[test]
    fn german_symbol_trails() {
        let german = CultureRegistry::with_builtins().get("de-DE").unwrap();
        let currency = Currency::new(german);
        assert_eq!(currency.to_text(&Value::Float(1234.5)).unwrap(), "1.234,50 €");
        assert_eq!(currency.to_text(&Value::Float(-1.0)).unwrap(), "-1,00 €");
        assert_eq!(currency.to_value_str("1.234,50 €").unwrap(), Value::Float(1234.5));
    }

    #[test]
    fn banker_rounding_option() {
        let bankers = Currency::with_options(
            Arc::new(CultureInfo::en_us()),
            CurrencyOptions {
                round_mode: Some(RoundMode::HalfEven),
                ..CurrencyOptions::default()
            },
        )
        .unwrap();
        assert_eq!(bankers.to_value_str("0.125").unwrap(), Value::Float(0.12));
        assert_eq!(bankers.to_value_str("0.135").unwrap(), Value::Float(0.14));
    }

    #[test]
    fn neutral_is_plain_float() {
        assert_eq!(currency().to_text_neutral(&Value::Float(1234.5)).unwrap(), "1234.5");
    }
}
