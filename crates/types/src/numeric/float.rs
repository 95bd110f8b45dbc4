//! Decimal numbers.

use std::cmp::Ordering;
use std::sync::Arc;

use formtype_culture::CultureInfo;
use serde::{Deserialize, Serialize};

use super::{
    NumberRules, beyond_decimal, finite_decimal, format_neutral_float, native_f64, parse_neutral,
};
use crate::decimal::{RoundMode, shifted, to_float};
use crate::manager::mismatch;
use crate::{ConfigError, TypeManager, TypeResult, Value};

/// Options for [`Float`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct FloatOptions {
    pub allow_negatives: bool,
    pub allow_group_sep: bool,
    pub show_group_sep: bool,
    /// Surplus digits are removed per `round_mode`. Unset means unlimited.
    pub max_decimal_places: Option<u32>,
    /// Formatted output is padded with trailing zeros to this many places.
    pub min_decimal_places: u32,
    /// `None` turns surplus decimal places into an input error.
    pub round_mode: Option<RoundMode>,
}

impl Default for FloatOptions {
    fn default() -> Self {
        Self {
            allow_negatives: true,
            allow_group_sep: true,
            show_group_sep: true,
            max_decimal_places: None,
            min_decimal_places: 0,
            round_mode: Some(RoundMode::HalfAwayFromZero),
        }
    }
}

impl FloatOptions {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if let Some(max) = self.max_decimal_places {
            if max < self.min_decimal_places {
                return Err(ConfigError::invalid_option(
                    "maxDecimalPlaces",
                    "must be at least minDecimalPlaces",
                ));
            }
            if max > 15 {
                return Err(ConfigError::invalid_option(
                    "maxDecimalPlaces",
                    "cannot exceed 15",
                ));
            }
        }
        Ok(())
    }

    pub(crate) fn apply(&self, rules: &mut NumberRules) {
        rules.allow_negatives = self.allow_negatives;
        rules.allow_group_sep = self.allow_group_sep;
        rules.show_group_sep = self.show_group_sep;
        rules.max_decimal_places = self.max_decimal_places;
        rules.min_decimal_places = self.min_decimal_places;
        rules.round_mode = self.round_mode;
    }
}

/// Float type manager.
///
/// Shared by [`Currency`](super::Currency) and [`Percent`](super::Percent),
/// which wrap it with their own symbol rules.
///
/// # Examples
///
/// ```rust
/// use formtype_types::prelude::*;
///
/// let float = Float::with_options(
///     CultureInfo::en_us().into(),
///     FloatOptions { max_decimal_places: Some(2), ..FloatOptions::default() },
/// )
/// .unwrap();
/// assert_eq!(float.to_value_str("1,234.565").unwrap(), Value::Float(1234.57));
/// assert_eq!(float.to_text_neutral(&Value::Float(3.0)).unwrap(), "3.0");
/// ```
#[derive(Debug, Clone)]
pub struct Float {
    culture: Arc<CultureInfo>,
    rules: NumberRules,
    /// Percent display scaling (`0.1` shown as `10`).
    scale_display: i32,
}

impl Float {
    /// Creates a float manager with default options.
    #[must_use]
    pub fn new(culture: Arc<CultureInfo>) -> Self {
        let mut rules = NumberRules::new("float");
        FloatOptions::default().apply(&mut rules);
        Self::from_rules(culture, rules, 0)
    }

    /// Creates a float manager with explicit options.
    pub fn with_options(culture: Arc<CultureInfo>, options: FloatOptions) -> Result<Self, ConfigError> {
        options.validate()?;
        let mut rules = NumberRules::new("float");
        options.apply(&mut rules);
        Ok(Self::from_rules(culture, rules, 0))
    }

    pub(crate) fn from_rules(culture: Arc<CultureInfo>, rules: NumberRules, scale_display: i32) -> Self {
        Self {
            culture,
            rules,
            scale_display,
        }
    }

    pub(crate) fn rules(&self) -> &NumberRules {
        &self.rules
    }

    fn float(value: &Value) -> TypeResult<f64> {
        match value {
            Value::Float(f) => Ok(*f),
            other => Err(mismatch("float", other)),
        }
    }
}

impl TypeManager for Float {
    fn name(&self) -> &'static str {
        "Float"
    }

    fn data_type_name(&self) -> &'static str {
        "float"
    }

    fn culture(&self) -> &CultureInfo {
        &self.culture
    }

    fn parse(&self, text: &str) -> TypeResult<Value> {
        let mut number = self.rules.parse(text, &self.culture)?;
        self.rules.apply_decimal_policy(&mut number)?;
        let number = shifted(number, -self.scale_display).ok_or_else(beyond_decimal)?;
        Ok(Value::Float(to_float(&number)))
    }

    fn format(&self, value: &Value) -> TypeResult<String> {
        let number = finite_decimal(Self::float(value)?)?;
        let number = shifted(number, self.scale_display).ok_or_else(beyond_decimal)?;
        Ok(self.rules.format(&number, &self.culture))
    }

    fn parse_neutral(&self, text: &str) -> TypeResult<Value> {
        let number = parse_neutral(text, false, "float")?;
        Ok(Value::Float(to_float(&number)))
    }

    fn format_neutral(&self, value: &Value) -> TypeResult<String> {
        format_neutral_float(Self::float(value)?)
    }

    fn accept_native(&self, value: Value) -> TypeResult<Value> {
        match value {
            Value::Float(_) => Ok(value),
            Value::Integer(i) => Ok(Value::Float(i as f64)),
            other => Err(mismatch("float", &other)),
        }
    }

    /// Re-applies the decimal policy to the displayed magnitude so native
    /// values obey the same limits as typed ones.
    fn review_value(&self, value: Value) -> TypeResult<Value> {
        let number = Self::float(&value)?;
        self.rules.check_negative(number)?;
        let mut displayed = shifted(finite_decimal(number)?, self.scale_display)
            .ok_or_else(beyond_decimal)?;
        self.rules.apply_decimal_policy(&mut displayed)?;
        let stored = shifted(displayed, -self.scale_display).ok_or_else(beyond_decimal)?;
        Ok(Value::Float(to_float(&stored)))
    }

    fn is_valid_char(&self, ch: char) -> bool {
        self.rules.is_valid_char(ch, &self.culture)
    }

    fn compare_native(&self, a: &Value, b: &Value) -> Ordering {
        let a = native_f64(a, "float").unwrap_or_default();
        let b = native_f64(b, "float").unwrap_or_default();
        a.total_cmp(&b)
    }

    fn to_number(&self, value: &Value) -> Option<f64> {
        value.as_f64()
    }
}
