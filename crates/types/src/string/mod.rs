//! String-family type managers
//!
//! Every manager here produces `Value::String`. [`BaseString`] only trims
//! and limits length; the others check the text against a regular
//! expression built from their options:
//!
//! - [`StrongPattern`]: a caller-supplied pattern
//! - [`Email`], [`Url`]: patterns assembled from domain, scheme and path rules
//! - [`CreditCardNumber`]: brand table plus the Luhn checksum
//! - [`PhoneNumber`], [`PostalCode`]: named regions from a [`RegionTable`]

mod credit_card;
mod email;
mod pattern;
mod region;
mod url;

pub use credit_card::{CardBrand, CreditCardNumber, CreditCardOptions};
pub use email::{Email, EmailOptions};
pub use pattern::{StrongPattern, StrongPatternOptions};
pub use region::{
    PhoneNumber, PostalCode, RegionEntry, RegionOptions, RegionPattern, RegionTable, phone_regions,
    postal_regions,
};
pub use url::{Url, UrlOptions};

use std::cmp::Ordering;
use std::sync::Arc;

use formtype_culture::CultureInfo;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::manager::mismatch;
use crate::{ConfigError, InputError, TypeManager, TypeResult, Value};

// ============================================================================
// SHARED HELPERS
// ============================================================================

/// Borrows the text of a string native.
pub(crate) fn text_of(value: &Value) -> TypeResult<&str> {
    value.as_str().ok_or_else(|| mismatch("string", value))
}

/// Orders two string natives, optionally ignoring case.
pub(crate) fn compare_text(a: &Value, b: &Value, case_insensitive: bool) -> Ordering {
    let (a, b) = (a.as_str().unwrap_or_default(), b.as_str().unwrap_or_default());
    if case_insensitive {
        a.to_lowercase().cmp(&b.to_lowercase())
    } else {
        a.cmp(b)
    }
}

/// Compiles an anchored, optionally case-insensitive pattern.
pub(crate) fn compile_anchored(pattern: &str, case_insensitive: bool) -> Result<Regex, ConfigError> {
    regex::RegexBuilder::new(&format!("^(?:{pattern})$"))
        .case_insensitive(case_insensitive)
        .build()
        .map_err(|e| ConfigError::invalid_pattern(pattern, &e))
}

/// Rejects anything but a string native; strings reach `parse` instead.
pub(crate) fn accept_string(value: Value) -> TypeResult<Value> {
    match value {
        Value::String(_) => Ok(value),
        other => Err(mismatch("string", &other)),
    }
}

// ============================================================================
// BASE STRING
// ============================================================================

/// Options for [`BaseString`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct StringOptions {
    /// `compare` ignores case.
    pub case_insensitive: bool,
    /// Strip leading and trailing whitespace on conversion.
    pub trim: bool,
    /// Longest accepted text in characters.
    pub max_length: Option<usize>,
    /// Character class each character must match, such as `[A-Za-z0-9 ]`.
    pub valid_chars: Option<String>,
}

impl Default for StringOptions {
    fn default() -> Self {
        Self {
            case_insensitive: false,
            trim: true,
            max_length: None,
            valid_chars: None,
        }
    }
}

/// Plain text manager.
///
/// ```rust
/// use formtype_types::prelude::*;
///
/// let text = BaseString::new(CultureInfo::en_us().into());
/// assert_eq!(text.to_value_str("  hello ").unwrap(), Value::from("hello"));
/// assert_eq!(text.to_value_str("   ").unwrap(), Value::Null);
/// ```
#[derive(Debug, Clone)]
pub struct BaseString {
    culture: Arc<CultureInfo>,
    options: StringOptions,
    valid_chars: Option<Regex>,
}

impl BaseString {
    #[must_use]
    pub fn new(culture: Arc<CultureInfo>) -> Self {
        Self {
            culture,
            options: StringOptions::default(),
            valid_chars: None,
        }
    }

    pub fn with_options(culture: Arc<CultureInfo>, options: StringOptions) -> Result<Self, ConfigError> {
        let valid_chars = options
            .valid_chars
            .as_deref()
            .map(|class| compile_anchored(class, false))
            .transpose()?;
        Ok(Self {
            culture,
            options,
            valid_chars,
        })
    }

    #[must_use]
    pub fn options(&self) -> &StringOptions {
        &self.options
    }
}

impl TypeManager for BaseString {
    fn name(&self) -> &'static str {
        "String"
    }

    fn data_type_name(&self) -> &'static str {
        "string"
    }

    fn culture(&self) -> &CultureInfo {
        &self.culture
    }

    fn parse(&self, text: &str) -> TypeResult<Value> {
        let text = if self.options.trim { text.trim() } else { text };
        if let Some(bad) = text.chars().find(|c| !self.is_valid_char(*c)) {
            return Err(InputError::new("invalid_characters", format!("'{bad}' is not allowed"))
                .with_param("char", bad.to_string())
                .into());
        }
        Ok(Value::from(text))
    }

    fn format(&self, value: &Value) -> TypeResult<String> {
        Ok(text_of(value)?.to_string())
    }

    fn parse_neutral(&self, text: &str) -> TypeResult<Value> {
        self.parse(text)
    }

    fn format_neutral(&self, value: &Value) -> TypeResult<String> {
        self.format(value)
    }

    fn accept_native(&self, value: Value) -> TypeResult<Value> {
        accept_string(value)
    }

    fn review_value(&self, value: Value) -> TypeResult<Value> {
        if let Some(max) = self.options.max_length {
            if text_of(&value)?.chars().count() > max {
                return Err(InputError::new(
                    "too_long",
                    format!("No more than {max} characters are allowed"),
                )
                .with_param("max", max.to_string())
                .into());
            }
        }
        Ok(value)
    }

    fn is_valid_char(&self, ch: char) -> bool {
        match &self.valid_chars {
            Some(class) => class.is_match(ch.encode_utf8(&mut [0; 4])),
            None => true,
        }
    }

    fn compare_native(&self, a: &Value, b: &Value) -> Ordering {
        compare_text(a, b, self.options.case_insensitive)
    }
}
