//! Boolean type manager
//!
//! Text is matched against two case-insensitive regular expressions, one
//! for true words and one for false words, so `yes`, `ON` and `1` all read
//! as true by default.

use std::cmp::Ordering;
use std::sync::{Arc, LazyLock};

use formtype_culture::CultureInfo;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::manager::mismatch;
use crate::{ConfigError, InputError, TypeManager, TypeResult, Value};

const DEFAULT_TRUE: &str = "^(true|yes|1|on)$";
const DEFAULT_FALSE: &str = "^(false|no|0|off)$";

static TRUE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| compile(DEFAULT_TRUE).expect("default true pattern is valid"));
static FALSE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| compile(DEFAULT_FALSE).expect("default false pattern is valid"));

fn compile(pattern: &str) -> Result<Regex, ConfigError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| ConfigError::invalid_pattern(pattern, &e))
}

/// Options for [`Boolean`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct BooleanOptions {
    /// Text matching this reads as true.
    pub true_reg_exp: String,
    /// Text matching this reads as false.
    pub false_reg_exp: String,
    /// Display text for true.
    pub true_text: String,
    /// Display text for false.
    pub false_text: String,
    /// Accept numeric natives: zero is false, anything else true.
    pub numbers: bool,
}

impl Default for BooleanOptions {
    fn default() -> Self {
        Self {
            true_reg_exp: DEFAULT_TRUE.into(),
            false_reg_exp: DEFAULT_FALSE.into(),
            true_text: "true".into(),
            false_text: "false".into(),
            numbers: true,
        }
    }
}

/// Boolean type manager.
///
/// ```rust
/// use formtype_types::prelude::*;
///
/// let boolean = Boolean::new(CultureInfo::en_us().into());
/// assert_eq!(boolean.to_value_str("Yes").unwrap(), Value::Boolean(true));
/// assert_eq!(boolean.to_value_str("off").unwrap(), Value::Boolean(false));
/// assert!(boolean.to_value_str("maybe").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Boolean {
    culture: Arc<CultureInfo>,
    options: BooleanOptions,
    true_regex: Regex,
    false_regex: Regex,
}

impl Boolean {
    /// Creates a boolean manager with default options.
    #[must_use]
    pub fn new(culture: Arc<CultureInfo>) -> Self {
        Self {
            culture,
            options: BooleanOptions::default(),
            true_regex: TRUE_REGEX.clone(),
            false_regex: FALSE_REGEX.clone(),
        }
    }

    /// Creates a boolean manager with explicit options. Patterns are
    /// compiled here so bad ones surface as configuration errors.
    pub fn with_options(culture: Arc<CultureInfo>, options: BooleanOptions) -> Result<Self, ConfigError> {
        let true_regex = compile(&options.true_reg_exp)?;
        let false_regex = compile(&options.false_reg_exp)?;
        Ok(Self {
            culture,
            options,
            true_regex,
            false_regex,
        })
    }

    #[must_use]
    pub fn options(&self) -> &BooleanOptions {
        &self.options
    }

    fn boolean(value: &Value) -> TypeResult<bool> {
        value.as_bool().ok_or_else(|| mismatch("boolean", value))
    }
}

impl TypeManager for Boolean {
    fn name(&self) -> &'static str {
        "Boolean"
    }

    fn data_type_name(&self) -> &'static str {
        "boolean"
    }

    fn culture(&self) -> &CultureInfo {
        &self.culture
    }

    fn parse(&self, text: &str) -> TypeResult<Value> {
        let text = text.trim();
        if self.true_regex.is_match(text) {
            Ok(Value::Boolean(true))
        } else if self.false_regex.is_match(text) {
            Ok(Value::Boolean(false))
        } else {
            Err(InputError::invalid_format("boolean").into())
        }
    }

    fn format(&self, value: &Value) -> TypeResult<String> {
        Ok(if Self::boolean(value)? {
            self.options.true_text.clone()
        } else {
            self.options.false_text.clone()
        })
    }

    fn parse_neutral(&self, text: &str) -> TypeResult<Value> {
        match text {
            "true" => Ok(Value::Boolean(true)),
            "false" => Ok(Value::Boolean(false)),
            _ => Err(InputError::invalid_format("boolean").into()),
        }
    }

    fn format_neutral(&self, value: &Value) -> TypeResult<String> {
        Ok(Self::boolean(value)?.to_string())
    }

    fn accept_native(&self, value: Value) -> TypeResult<Value> {
        match value {
            Value::Boolean(_) => Ok(value),
            Value::Integer(_) | Value::Float(_) if self.options.numbers => {
                Ok(Value::Boolean(value.as_f64() != Some(0.0)))
            }
            other => Err(mismatch("boolean", &other)),
        }
    }

    fn is_valid_char(&self, ch: char) -> bool {
        !ch.is_control()
    }

    fn compare_native(&self, a: &Value, b: &Value) -> Ordering {
        a.as_bool().cmp(&b.as_bool())
    }

    fn to_number(&self, value: &Value) -> Option<f64> {
        value.as_bool().map(|b| if b { 1.0 } else { 0.0 })
    }
}
