//! Credit card numbers: brand table plus the Luhn checksum.

use std::cmp::Ordering;
use std::sync::{Arc, LazyLock};

use formtype_culture::CultureInfo;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{accept_string, text_of};
use crate::{ConfigError, InputError, TypeManager, TypeResult, Value};

/// Lengths accepted when the brand table is empty.
const ANY_BRAND_LENGTHS: std::ops::RangeInclusive<usize> = 13..=19;

// ============================================================================
// BRANDS
// ============================================================================

/// One card brand: accepted lengths and a prefix pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CardBrand {
    pub name: String,
    pub lengths: Vec<usize>,
    /// Matched against the start of the digits.
    pub prefix: String,
}

impl CardBrand {
    fn new(name: &str, lengths: &[usize], prefix: &str) -> Self {
        Self {
            name: name.into(),
            lengths: lengths.to_vec(),
            prefix: prefix.into(),
        }
    }

    /// Visa, MasterCard, American Express, Discover, Diners Club and JCB.
    #[must_use]
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new("Visa", &[13, 16], "4"),
            Self::new(
                "MasterCard",
                &[16],
                r"5[1-5]|222[1-9]|22[3-9]\d|2[3-6]\d{2}|27[01]\d|2720",
            ),
            Self::new("AmericanExpress", &[15], "3[47]"),
            Self::new("Discover", &[16], "6011|65|64[4-9]"),
            Self::new("DinersClub", &[14], "30[0-5]|36|38"),
            Self::new("JCB", &[16], "35"),
        ]
    }
}

#[derive(Debug, Clone)]
struct CompiledBrand {
    brand: CardBrand,
    prefix: Regex,
}

impl CompiledBrand {
    fn compile(brand: CardBrand) -> Result<Self, ConfigError> {
        let prefix = Regex::new(&format!("^(?:{})", brand.prefix))
            .map_err(|e| ConfigError::invalid_pattern(&brand.prefix, &e))?;
        Ok(Self { brand, prefix })
    }

    fn accepts(&self, digits: &str) -> bool {
        self.brand.lengths.contains(&digits.len()) && self.prefix.is_match(digits)
    }
}

fn compile_all(brands: Vec<CardBrand>) -> Result<Vec<CompiledBrand>, ConfigError> {
    brands.into_iter().map(CompiledBrand::compile).collect()
}

static DEFAULT_BRANDS: LazyLock<Vec<CompiledBrand>> = LazyLock::new(|| {
    compile_all(CardBrand::defaults()).expect("default brand prefixes are valid")
});

/// Mod 10 check over ASCII digits.
pub(crate) fn luhn_valid(digits: &str) -> bool {
    let sum: u32 = digits
        .bytes()
        .rev()
        .enumerate()
        .map(|(i, b)| {
            let digit = u32::from(b - b'0');
            if i % 2 == 1 {
                let doubled = digit * 2;
                if doubled > 9 { doubled - 9 } else { doubled }
            } else {
                digit
            }
        })
        .sum();
    sum % 10 == 0
}

// ============================================================================
// MANAGER
// ============================================================================

/// Options for [`CreditCardNumber`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct CreditCardOptions {
    /// Separator characters users may type between digit groups.
    pub allow_seps: String,
    /// Brand table; `None` uses [`CardBrand::defaults`]. An empty table
    /// accepts any brand of 13 to 19 digits.
    pub brands: Option<Vec<CardBrand>>,
    /// Store the digits only.
    pub strip_seps: bool,
}

impl Default for CreditCardOptions {
    fn default() -> Self {
        Self {
            allow_seps: " -".into(),
            brands: None,
            strip_seps: true,
        }
    }
}

/// Credit card number manager.
///
/// Checks run in order and report the first failure: unexpected
/// characters (`cc_invalid_chars`), no brand matching both prefix and
/// length (`cc_brand`), then the checksum (`cc_checksum`).
///
/// ```rust
/// use formtype_types::prelude::*;
///
/// let card = CreditCardNumber::new(CultureInfo::en_us().into());
/// assert_eq!(
///     card.to_value_str("4111 1111 1111 1111").unwrap(),
///     Value::from("4111111111111111")
/// );
/// assert_eq!(card.to_value_str("4111111111111112").unwrap_err().code(), "cc_checksum");
/// ```
#[derive(Debug, Clone)]
pub struct CreditCardNumber {
    culture: Arc<CultureInfo>,
    options: CreditCardOptions,
    brands: Vec<CompiledBrand>,
}

impl CreditCardNumber {
    #[must_use]
    pub fn new(culture: Arc<CultureInfo>) -> Self {
        Self {
            culture,
            options: CreditCardOptions::default(),
            brands: DEFAULT_BRANDS.clone(),
        }
    }

    /// Brand prefixes are compiled here; a bad one is a configuration error.
    pub fn with_options(
        culture: Arc<CultureInfo>,
        options: CreditCardOptions,
    ) -> Result<Self, ConfigError> {
        let brands = match &options.brands {
            Some(brands) => compile_all(brands.clone())?,
            None => DEFAULT_BRANDS.clone(),
        };
        Ok(Self {
            culture,
            options,
            brands,
        })
    }

    #[must_use]
    pub fn options(&self) -> &CreditCardOptions {
        &self.options
    }

    /// Name of the brand the digits belong to.
    #[must_use]
    pub fn brand_of(&self, digits: &str) -> Option<&str> {
        self.brands
            .iter()
            .find(|b| b.accepts(digits))
            .map(|b| b.brand.name.as_str())
    }

    fn digits(&self, text: &str) -> Result<String, InputError> {
        let mut digits = String::with_capacity(text.len());
        for c in text.chars() {
            if c.is_ascii_digit() {
                digits.push(c);
            } else if !self.options.allow_seps.contains(c) {
                return Err(InputError::new(
                    "cc_invalid_chars",
                    format!("Invalid character '{c}' in credit card number"),
                )
                .with_param("char", c.to_string()));
            }
        }
        Ok(digits)
    }

    fn check(&self, text: &str) -> Result<String, InputError> {
        let digits = self.digits(text)?;
        let branded = if self.brands.is_empty() {
            ANY_BRAND_LENGTHS.contains(&digits.len())
        } else {
            self.brand_of(&digits).is_some()
        };
        if !branded {
            return Err(InputError::new(
                "cc_brand",
                "Card number does not match an accepted card brand",
            )
            .with_param("length", digits.len().to_string()));
        }
        if !luhn_valid(&digits) {
            return Err(InputError::new(
                "cc_checksum",
                "Credit card number failed the checksum",
            ));
        }
        Ok(digits)
    }
}

impl TypeManager for CreditCardNumber {
    fn name(&self) -> &'static str {
        "CreditCardNumber"
    }

    fn data_type_name(&self) -> &'static str {
        "string"
    }

    fn culture(&self) -> &CultureInfo {
        &self.culture
    }

    fn parse(&self, text: &str) -> TypeResult<Value> {
        let text = text.trim();
        let digits = self.check(text)?;
        Ok(if self.options.strip_seps {
            Value::String(digits)
        } else {
            Value::from(text)
        })
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

    fn is_valid_char(&self, ch: char) -> bool {
        ch.is_ascii_digit() || self.options.allow_seps.contains(ch)
    }

    fn compare_native(&self, a: &Value, b: &Value) -> Ordering {
        let key = |v: &Value| -> String {
            v.as_str()
                .unwrap_or_default()
                .chars()
                .filter(char::is_ascii_digit)
                .collect()
        };
        key(a).cmp(&key(b))
    }
}
