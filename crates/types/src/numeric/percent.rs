//! Percentages, optionally stored as fractions (`0.25` shown as `25%`).

use std::cmp::Ordering;
use std::sync::Arc;

use formtype_culture::CultureInfo;
use serde::{Deserialize, Serialize};

use super::{Float, NumberRules, SymbolKind};
use crate::decimal::RoundMode;
use crate::{ConfigError, TypeManager, TypeResult, Value};

/// Options for [`Percent`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct PercentOptions {
    pub allow_negatives: bool,
    pub allow_group_sep: bool,
    pub show_group_sep: bool,
    /// Applies to the displayed number, not the stored fraction.
    pub max_decimal_places: Option<u32>,
    pub min_decimal_places: u32,
    pub round_mode: Option<RoundMode>,
    pub show_symbol: bool,
    pub accept_symbol: bool,
    /// Store `1.0` for a displayed `100%`.
    pub one_equals_one_hundred: bool,
}

impl Default for PercentOptions {
    fn default() -> Self {
        Self {
            allow_negatives: true,
            allow_group_sep: true,
            show_group_sep: true,
            max_decimal_places: None,
            min_decimal_places: 0,
            round_mode: Some(RoundMode::HalfAwayFromZero),
            show_symbol: true,
            accept_symbol: true,
            one_equals_one_hundred: false,
        }
    }
}

/// Percent type manager.
///
/// # Examples
///
/// ```rust
/// use formtype_types::prelude::*;
///
/// let percent = Percent::with_options(
///     CultureInfo::en_us().into(),
///     PercentOptions { one_equals_one_hundred: true, ..PercentOptions::default() },
/// )
/// .unwrap();
/// assert_eq!(percent.to_value_str("10%").unwrap(), Value::Float(0.1));
/// assert_eq!(percent.to_text(&Value::Float(0.07)).unwrap(), "7%");
/// ```
#[derive(Debug, Clone)]
pub struct Percent {
    inner: Float,
    options: PercentOptions,
}

impl Percent {
    /// Creates a percent manager with default options.
    #[must_use]
    pub fn new(culture: Arc<CultureInfo>) -> Self {
        let options = PercentOptions::default();
        Self {
            inner: Float::from_rules(culture, Self::rules(&options), 0),
            options,
        }
    }

    /// Creates a percent manager with explicit options.
    pub fn with_options(
        culture: Arc<CultureInfo>,
        options: PercentOptions,
    ) -> Result<Self, ConfigError> {
        if let Some(max) = options.max_decimal_places {
            if max < options.min_decimal_places {
                return Err(ConfigError::invalid_option(
                    "maxDecimalPlaces",
                    "must be at least minDecimalPlaces",
                ));
            }
        }
        let scale = if options.one_equals_one_hundred { 2 } else { 0 };
        Ok(Self {
            inner: Float::from_rules(culture, Self::rules(&options), scale),
            options,
        })
    }

    fn rules(options: &PercentOptions) -> NumberRules {
        let mut rules = NumberRules::new("percent");
        rules.allow_negatives = options.allow_negatives;
        rules.allow_group_sep = options.allow_group_sep;
        rules.show_group_sep = options.show_group_sep;
        rules.max_decimal_places = options.max_decimal_places;
        rules.min_decimal_places = options.min_decimal_places;
        rules.round_mode = options.round_mode;
        rules.symbol = SymbolKind::Percent;
        rules.show_symbol = options.show_symbol;
        rules.accept_symbol = options.accept_symbol;
        rules
    }

    #[must_use]
    pub fn options(&self) -> &PercentOptions {
        &self.options
    }
}

impl TypeManager for Percent {
    fn name(&self) -> &'static str {
        "Percent"
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
