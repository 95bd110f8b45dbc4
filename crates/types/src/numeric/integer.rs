//! Whole numbers limited to the 32-bit signed range.

use std::cmp::Ordering;
use std::sync::Arc;

use formtype_culture::CultureInfo;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use super::{NumberRules, native_f64, parse_neutral};
use crate::manager::mismatch;
use crate::{ConfigError, InputError, TypeManager, TypeResult, Value};

/// Smallest accepted integer.
pub const MIN_INTEGER: i64 = i32::MIN as i64;
/// Largest accepted integer.
pub const MAX_INTEGER: i64 = i32::MAX as i64;

/// Options for [`Integer`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct IntegerOptions {
    pub allow_negatives: bool,
    /// Accept the culture's group separator in input.
    pub allow_group_sep: bool,
    /// Insert group separators when formatting.
    pub show_group_sep: bool,
    /// Zero-pad formatted output to this many digits.
    pub fill_lead_zeros: usize,
}

impl Default for IntegerOptions {
    fn default() -> Self {
        Self {
            allow_negatives: true,
            allow_group_sep: true,
            show_group_sep: true,
            fill_lead_zeros: 0,
        }
    }
}

/// Integer type manager.
///
/// # Examples
///
/// ```rust
/// use formtype_types::prelude::*;
///
/// let integer = Integer::new(CultureInfo::en_us().into());
/// assert!(integer.to_value_str("2147483647").is_ok());
/// assert!(integer.to_value_str("2147483648").is_err());
/// assert!(integer.to_value_str("1.5").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Integer {
    culture: Arc<CultureInfo>,
    options: IntegerOptions,
    rules: NumberRules,
}

impl Integer {
    /// Creates an integer manager with default options.
    #[must_use]
    pub fn new(culture: Arc<CultureInfo>) -> Self {
        Self::build(culture, IntegerOptions::default())
    }

    /// Creates an integer manager with explicit options.
    pub fn with_options(
        culture: Arc<CultureInfo>,
        options: IntegerOptions,
    ) -> Result<Self, ConfigError> {
        if options.fill_lead_zeros > 10 {
            return Err(ConfigError::invalid_option(
                "fillLeadZeros",
                "cannot exceed 10 digits",
            ));
        }
        Ok(Self::build(culture, options))
    }

    fn build(culture: Arc<CultureInfo>, options: IntegerOptions) -> Self {
        let mut rules = NumberRules::new("integer");
        rules.integer = true;
        rules.allow_negatives = options.allow_negatives;
        rules.allow_group_sep = options.allow_group_sep;
        rules.show_group_sep = options.show_group_sep && options.fill_lead_zeros == 0;
        rules.max_decimal_places = Some(0);
        rules.lead_zeros = options.fill_lead_zeros;
        Self {
            culture,
            options,
            rules,
        }
    }

    #[must_use]
    pub fn options(&self) -> &IntegerOptions {
        &self.options
    }

    fn from_decimal(number: &Decimal) -> TypeResult<Value> {
        match number.to_i64() {
            Some(value) if (MIN_INTEGER..=MAX_INTEGER).contains(&value) => {
                Ok(Value::Integer(value))
            }
            _ => Err(InputError::out_of_range(MIN_INTEGER, MAX_INTEGER).into()),
        }
    }

    fn integer(value: &Value) -> TypeResult<i64> {
        match value {
            Value::Integer(i) => Ok(*i),
            other => Err(mismatch("integer", other)),
        }
    }
}

impl TypeManager for Integer {
    fn name(&self) -> &'static str {
        "Integer"
    }

    fn data_type_name(&self) -> &'static str {
        "integer"
    }

    fn culture(&self) -> &CultureInfo {
        &self.culture
    }

    fn parse(&self, text: &str) -> TypeResult<Value> {
        let number = self.rules.parse(text, &self.culture)?;
        Self::from_decimal(&number)
    }

    fn format(&self, value: &Value) -> TypeResult<String> {
        let value = Self::integer(value)?;
        Ok(self.rules.format(&Decimal::from(value), &self.culture))
    }

    fn parse_neutral(&self, text: &str) -> TypeResult<Value> {
        let number = parse_neutral(text, true, "integer")?;
        Self::from_decimal(&number)
    }

    fn format_neutral(&self, value: &Value) -> TypeResult<String> {
        Ok(Self::integer(value)?.to_string())
    }

    fn accept_native(&self, value: Value) -> TypeResult<Value> {
        match value {
            Value::Integer(_) => Ok(value),
            Value::Float(f) => {
                if f.fract() != 0.0 {
                    return Err(InputError::new(
                        "decimal_not_allowed",
                        "Decimal values are not allowed",
                    )
                    .into());
                }
                let number = super::finite_decimal(f)?;
                Self::from_decimal(&number)
            }
            other => Err(mismatch("integer", &other)),
        }
    }

    fn review_value(&self, value: Value) -> TypeResult<Value> {
        let number = Self::integer(&value)?;
        if !(MIN_INTEGER..=MAX_INTEGER).contains(&number) {
            return Err(InputError::out_of_range(MIN_INTEGER, MAX_INTEGER).into());
        }
        self.rules.check_negative(number as f64)?;
        Ok(value)
    }

    fn is_valid_char(&self, ch: char) -> bool {
        self.rules.is_valid_char(ch, &self.culture)
    }

    fn compare_native(&self, a: &Value, b: &Value) -> Ordering {
        let a = native_f64(a, "integer").unwrap_or_default();
        let b = native_f64(b, "integer").unwrap_or_default();
        a.total_cmp(&b)
    }

    fn to_number(&self, value: &Value) -> Option<f64> {
        value.as_f64()
    }
}
