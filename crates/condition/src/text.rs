//! Regular-expression condition

use std::sync::{Arc, OnceLock};

use formtype_types::ConfigError;
use regex::{Regex, RegexBuilder};
use tracing::debug;

use crate::condition::{Condition, ConditionOptions, condition_options};
use crate::connection::Connection;
use crate::error::ConditionError;
use crate::result::ConditionResult;

/// Succeeds when the field's text contains a match for an expression.
///
/// The expression is not anchored; add `^` and `$` to match the whole
/// text. It is compiled on first evaluation, so a bad expression surfaces
/// as a [`ConditionError::Config`] then. Empty fields cannot be evaluated.
///
/// ```rust
/// use std::sync::Arc;
/// use formtype_condition::prelude::*;
///
/// let code = Arc::new(MemoryConnection::new("code").with_text("ab-12"));
/// let condition = RegExp::new(code, r"^[a-z]{2}-\d+$");
/// assert_eq!(condition.evaluate().unwrap(), ConditionResult::Success);
/// ```
#[derive(Debug)]
pub struct RegExp {
    connection: Arc<dyn Connection>,
    expression: String,
    case_insensitive: bool,
    multiline: bool,
    regex: OnceLock<Result<Regex, ConfigError>>,
    options: ConditionOptions,
}

impl RegExp {
    pub fn new(connection: Arc<dyn Connection>, expression: impl Into<String>) -> Self {
        Self {
            connection,
            expression: expression.into(),
            case_insensitive: false,
            multiline: false,
            regex: OnceLock::new(),
            options: ConditionOptions::default(),
        }
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn case_insensitive(mut self) -> Self {
        self.case_insensitive = true;
        self
    }

    /// `^` and `$` match at line breaks.
    #[must_use = "builder methods must be chained or built"]
    pub fn multiline(mut self) -> Self {
        self.multiline = true;
        self
    }

    #[must_use]
    pub fn expression(&self) -> &str {
        &self.expression
    }

    fn regex(&self) -> Result<&Regex, ConfigError> {
        self.regex
            .get_or_init(|| {
                debug!(expression = %self.expression, "compiling condition expression");
                RegexBuilder::new(&self.expression)
                    .case_insensitive(self.case_insensitive)
                    .multi_line(self.multiline)
                    .build()
                    .map_err(|e| ConfigError::invalid_pattern(&self.expression, &e))
            })
            .as_ref()
            .map_err(Clone::clone)
    }
}

impl Condition for RegExp {
    fn name(&self) -> &'static str {
        "RegExp"
    }

    fn options(&self) -> &ConditionOptions {
        &self.options
    }

    fn can_evaluate(&self) -> bool {
        !self.expression.is_empty()
    }

    fn evaluate_rule(&self) -> Result<ConditionResult, ConditionError> {
        let regex = self.regex()?;
        if self.connection.is_null_value(false) {
            return Ok(ConditionResult::CannotEvaluate);
        }
        Ok(regex.is_match(&self.connection.text_value()).into())
    }
}

condition_options!(RegExp);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::MemoryConnection;

    fn text(value: &str) -> Arc<MemoryConnection> {
        Arc::new(MemoryConnection::new("t").with_text(value))
    }

    #[test]
    fn searches_anywhere_in_the_text() {
        let digits = RegExp::new(text("order 42 shipped"), r"\d+");
        assert_eq!(digits.evaluate().unwrap(), ConditionResult::Success);
        let anchored = RegExp::new(text("order 42"), r"^\d+$");
        assert_eq!(anchored.evaluate().unwrap(), ConditionResult::Failed);
    }

    #[test]
    fn flags() {
        let upper = RegExp::new(text("HELLO"), "^hello$");
        assert_eq!(upper.evaluate().unwrap(), ConditionResult::Failed);
        let upper = RegExp::new(text("HELLO"), "^hello$").case_insensitive();
        assert_eq!(upper.evaluate().unwrap(), ConditionResult::Success);

        let lines = RegExp::new(text("a\nb"), "^b$").multiline();
        assert_eq!(lines.evaluate().unwrap(), ConditionResult::Success);
    }

    #[test]
    fn empty_fields_and_expressions() {
        let empty = RegExp::new(text(""), "x");
        assert_eq!(empty.evaluate().unwrap(), ConditionResult::CannotEvaluate);
        assert!(!RegExp::new(text("x"), "").can_evaluate());
    }

    #[test]
    fn bad_expression_is_a_config_error() {
        let broken = RegExp::new(text("x"), "(unclosed");
        assert_eq!(broken.evaluate().unwrap_err().code(), "CONFIG_INVALID_PATTERN");
        assert_eq!(broken.evaluate().unwrap_err().code(), "CONFIG_INVALID_PATTERN");
    }

    #[test]
    fn negation() {
        let no_spaces = RegExp::new(text("two words"), r"\s").negated();
        assert_eq!(no_spaces.evaluate().unwrap(), ConditionResult::Failed);
    }
}
