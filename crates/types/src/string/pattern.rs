//! Text constrained by a caller-supplied regular expression.

use std::cmp::Ordering;
use std::sync::{Arc, OnceLock};

use formtype_culture::CultureInfo;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{accept_string, compare_text, compile_anchored, text_of};
use crate::{ConfigError, InputError, TypeManager, TypeResult, Value};

/// Options for [`StrongPattern`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct StrongPatternOptions {
    /// Pattern the whole text must match.
    pub pattern: String,
    /// Replaces `pattern` when set.
    #[serde(rename = "altREPattern")]
    pub alt_re_pattern: Option<String>,
    pub case_insensitive: bool,
}

impl StrongPatternOptions {
    fn effective(&self) -> &str {
        self.alt_re_pattern.as_deref().unwrap_or(&self.pattern)
    }
}

/// Pattern-checked text manager.
///
/// The expression is anchored and compiled on first use; a bad expression
/// surfaces as a [`ConfigError`] from that first conversion.
///
/// ```rust
/// use formtype_types::prelude::*;
///
/// let sku = StrongPattern::with_options(
///     CultureInfo::en_us().into(),
///     StrongPatternOptions {
///         pattern: "[A-Z]{3}-\\d{4}".into(),
///         ..StrongPatternOptions::default()
///     },
/// )
/// .unwrap();
/// assert!(sku.to_value_str("ABC-1234").is_ok());
/// assert!(sku.to_value_str("abc-1234").is_err());
/// ```
#[derive(Debug)]
pub struct StrongPattern {
    culture: Arc<CultureInfo>,
    options: StrongPatternOptions,
    regex: OnceLock<Result<Regex, ConfigError>>,
}

impl StrongPattern {
    /// Fails when neither `pattern` nor `altREPattern` is given.
    pub fn with_options(
        culture: Arc<CultureInfo>,
        options: StrongPatternOptions,
    ) -> Result<Self, ConfigError> {
        if options.effective().is_empty() {
            return Err(ConfigError::invalid_option("pattern", "a pattern is required"));
        }
        Ok(Self {
            culture,
            options,
            regex: OnceLock::new(),
        })
    }

    #[must_use]
    pub fn options(&self) -> &StrongPatternOptions {
        &self.options
    }

    fn regex(&self) -> Result<&Regex, ConfigError> {
        self.regex
            .get_or_init(|| {
                let pattern = self.options.effective();
                debug!(pattern, "compiling strong pattern");
                compile_anchored(pattern, self.options.case_insensitive)
            })
            .as_ref()
            .map_err(Clone::clone)
    }
}

impl TypeManager for StrongPattern {
    fn name(&self) -> &'static str {
        "StrongPattern"
    }

    fn data_type_name(&self) -> &'static str {
        "string"
    }

    fn culture(&self) -> &CultureInfo {
        &self.culture
    }

    fn parse(&self, text: &str) -> TypeResult<Value> {
        Ok(Value::from(text.trim()))
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
        if !self.regex()?.is_match(text_of(&value)?) {
            return Err(InputError::new("pattern_mismatch", "Value does not match the required pattern")
                .with_param("pattern", self.options.effective().to_string())
                .into());
        }
        Ok(value)
    }

    fn is_valid_char(&self, ch: char) -> bool {
        !ch.is_control()
    }

    fn compare_native(&self, a: &Value, b: &Value) -> Ordering {
        compare_text(a, b, self.options.case_insensitive)
    }
}
