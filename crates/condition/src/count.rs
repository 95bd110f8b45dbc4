//! Conditions that count across one or more fields
//!
//! Each condition totals an integer over its connections and tests it
//! against inclusive bounds. Read-only connections are skipped unless
//! [`include_not_editable`](CharacterCount::include_not_editable) is set.

use std::sync::Arc;

use formtype_types::ConfigError;
use serde::{Deserialize, Serialize};

use crate::condition::{Condition, ConditionOptions, condition_options};
use crate::connection::Connection;
use crate::error::ConditionError;
use crate::result::ConditionResult;

/// Connections filtered by editability.
fn considered(
    connections: &[Arc<dyn Connection>],
    ignore_not_editable: bool,
) -> impl Iterator<Item = &Arc<dyn Connection>> {
    connections
        .iter()
        .filter(move |c| !ignore_not_editable || c.is_editable())
}

fn check_bounds(minimum: Option<usize>, maximum: Option<usize>) -> Result<(), ConditionError> {
    match (minimum, maximum) {
        (Some(min), Some(max)) if min > max => Err(ConfigError::invalid_option(
            "maximum",
            format!("maximum {max} is below minimum {min}"),
        )
        .into()),
        _ => Ok(()),
    }
}

// ============================================================================
// REQUIRED
// ============================================================================

/// How many of a [`Required`] condition's fields must hold a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RequiredMode {
    /// Every field.
    #[default]
    All,
    OneOrMore,
    /// Exactly one.
    One,
    /// Every field or none of them.
    AllOrNone,
    /// Between `minimum` and `maximum` fields, inclusive.
    Range { minimum: usize, maximum: usize },
}

/// Succeeds when enough fields are filled in.
///
/// Whitespace-only text counts as empty. With no editable fields left to
/// inspect the condition cannot be evaluated.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use formtype_condition::prelude::*;
///
/// let phone = Arc::new(MemoryConnection::new("phone"));
/// let email = Arc::new(MemoryConnection::new("email").with_text("jo@example.com"));
/// let contact = Required::new(phone)
///     .with_connection(email)
///     .with_mode(RequiredMode::OneOrMore);
/// assert_eq!(contact.evaluate().unwrap(), ConditionResult::Success);
/// ```
#[derive(Debug)]
pub struct Required {
    connections: Vec<Arc<dyn Connection>>,
    mode: RequiredMode,
    ignore_not_editable: bool,
    options: ConditionOptions,
}

impl Required {
    pub fn new(connection: Arc<dyn Connection>) -> Self {
        Self {
            connections: vec![connection],
            mode: RequiredMode::All,
            ignore_not_editable: true,
            options: ConditionOptions::default(),
        }
    }

    /// Adds another field.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_connection(mut self, connection: Arc<dyn Connection>) -> Self {
        self.connections.push(connection);
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_mode(mut self, mode: RequiredMode) -> Self {
        self.mode = mode;
        self
    }

    /// Counts read-only fields too.
    #[must_use = "builder methods must be chained or built"]
    pub fn include_not_editable(mut self) -> Self {
        self.ignore_not_editable = false;
        self
    }
}

impl Condition for Required {
    fn name(&self) -> &'static str {
        "Required"
    }

    fn options(&self) -> &ConditionOptions {
        &self.options
    }

    fn can_evaluate(&self) -> bool {
        !self.connections.is_empty()
    }

    fn evaluate_rule(&self) -> Result<ConditionResult, ConditionError> {
        if let RequiredMode::Range { minimum, maximum } = self.mode {
            check_bounds(Some(minimum), Some(maximum))?;
        }
        let mut total = 0;
        let mut filled = 0;
        for connection in considered(&self.connections, self.ignore_not_editable) {
            total += 1;
            if !connection.is_null_value(true) {
                filled += 1;
            }
        }
        if total == 0 {
            return Ok(ConditionResult::CannotEvaluate);
        }
        let ok = match self.mode {
            RequiredMode::All => filled == total,
            RequiredMode::OneOrMore => filled >= 1,
            RequiredMode::One => filled == 1,
            RequiredMode::AllOrNone => filled == 0 || filled == total,
            RequiredMode::Range { minimum, maximum } => (minimum..=maximum).contains(&filled),
        };
        Ok(ok.into())
    }
}

// ============================================================================
// BOUNDED COUNTS
// ============================================================================

/// Fields and bounds shared by the counting conditions.
#[derive(Debug)]
struct Tally {
    connections: Vec<Arc<dyn Connection>>,
    minimum: Option<usize>,
    maximum: Option<usize>,
    ignore_not_editable: bool,
}

impl Tally {
    fn new(connection: Arc<dyn Connection>) -> Self {
        Self {
            connections: vec![connection],
            minimum: None,
            maximum: None,
            ignore_not_editable: true,
        }
    }

    fn ready(&self) -> bool {
        !self.connections.is_empty() && (self.minimum.is_some() || self.maximum.is_some())
    }

    fn fields(&self) -> impl Iterator<Item = &Arc<dyn Connection>> {
        considered(&self.connections, self.ignore_not_editable)
    }

    fn test(&self, count: usize) -> Result<ConditionResult, ConditionError> {
        check_bounds(self.minimum, self.maximum)?;
        let above = self.minimum.is_none_or(|min| count >= min);
        let below = self.maximum.is_none_or(|max| count <= max);
        Ok((above && below).into())
    }
}

/// Builders for conditions holding a [`Tally`].
macro_rules! tally_builders {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $ty {
                /// Adds another field to the total.
                #[must_use = "builder methods must be chained or built"]
                pub fn with_connection(mut self, connection: Arc<dyn Connection>) -> Self {
                    self.tally.connections.push(connection);
                    self
                }

                /// Inclusive lower bound.
                #[must_use = "builder methods must be chained or built"]
                pub fn with_minimum(mut self, minimum: usize) -> Self {
                    self.tally.minimum = Some(minimum);
                    self
                }

                /// Inclusive upper bound.
                #[must_use = "builder methods must be chained or built"]
                pub fn with_maximum(mut self, maximum: usize) -> Self {
                    self.tally.maximum = Some(maximum);
                    self
                }

                /// Counts read-only fields too.
                #[must_use = "builder methods must be chained or built"]
                pub fn include_not_editable(mut self) -> Self {
                    self.tally.ignore_not_editable = false;
                    self
                }
            }
        )+
    };
}

/// Total number of characters across the fields.
///
/// Text is trimmed first unless [`untrimmed`](Self::untrimmed) is set.
/// When every field is empty the condition cannot be evaluated, leaving
/// emptiness to [`Required`].
#[derive(Debug)]
pub struct CharacterCount {
    tally: Tally,
    trim: bool,
    options: ConditionOptions,
}

impl CharacterCount {
    pub fn new(connection: Arc<dyn Connection>) -> Self {
        Self {
            tally: Tally::new(connection),
            trim: true,
            options: ConditionOptions::default(),
        }
    }

    /// Counts leading and trailing whitespace.
    #[must_use = "builder methods must be chained or built"]
    pub fn untrimmed(mut self) -> Self {
        self.trim = false;
        self
    }
}

impl Condition for CharacterCount {
    fn name(&self) -> &'static str {
        "CharacterCount"
    }

    fn options(&self) -> &ConditionOptions {
        &self.options
    }

    fn can_evaluate(&self) -> bool {
        self.tally.ready()
    }

    fn evaluate_rule(&self) -> Result<ConditionResult, ConditionError> {
        let count: usize = self
            .tally
            .fields()
            .map(|c| {
                let text = c.text_value();
                if self.trim {
                    text.trim().chars().count()
                } else {
                    text.chars().count()
                }
            })
            .sum();
        if count == 0 {
            return Ok(ConditionResult::CannotEvaluate);
        }
        self.tally.test(count)
    }
}

/// Total number of whitespace-separated words across the fields.
///
/// Like [`CharacterCount`], all-empty fields cannot be evaluated.
#[derive(Debug)]
pub struct WordCount {
    tally: Tally,
    options: ConditionOptions,
}

impl WordCount {
    pub fn new(connection: Arc<dyn Connection>) -> Self {
        Self {
            tally: Tally::new(connection),
            options: ConditionOptions::default(),
        }
    }
}

impl Condition for WordCount {
    fn name(&self) -> &'static str {
        "WordCount"
    }

    fn options(&self) -> &ConditionOptions {
        &self.options
    }

    fn can_evaluate(&self) -> bool {
        self.tally.ready()
    }

    fn evaluate_rule(&self) -> Result<ConditionResult, ConditionError> {
        let count: usize = self
            .tally
            .fields()
            .map(|c| c.text_value().split_whitespace().count())
            .sum();
        if count == 0 {
            return Ok(ConditionResult::CannotEvaluate);
        }
        self.tally.test(count)
    }
}

/// Total number of selected items across list fields.
///
/// A field without selections counts one when filled in, zero otherwise.
/// Zero selections is an ordinary count.
#[derive(Debug)]
pub struct CountSelections {
    tally: Tally,
    options: ConditionOptions,
}

impl CountSelections {
    pub fn new(connection: Arc<dyn Connection>) -> Self {
        Self {
            tally: Tally::new(connection),
            options: ConditionOptions::default(),
        }
    }
}

impl Condition for CountSelections {
    fn name(&self) -> &'static str {
        "CountSelections"
    }

    fn options(&self) -> &ConditionOptions {
        &self.options
    }

    fn can_evaluate(&self) -> bool {
        self.tally.ready()
    }

    fn evaluate_rule(&self) -> Result<ConditionResult, ConditionError> {
        let mut fields = 0;
        let mut count = 0;
        for connection in self.tally.fields() {
            fields += 1;
            count += connection
                .selection_count()
                .unwrap_or_else(|| usize::from(!connection.is_null_value(true)));
        }
        if fields == 0 {
            return Ok(ConditionResult::CannotEvaluate);
        }
        self.tally.test(count)
    }
}

tally_builders!(CharacterCount, WordCount, CountSelections);

condition_options!(Required, CharacterCount, WordCount, CountSelections);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::MemoryConnection;
    use rstest::rstest;

    fn text(value: &str) -> Arc<MemoryConnection> {
        Arc::new(MemoryConnection::new("t").with_text(value))
    }

    fn required(texts: &[&str], mode: RequiredMode) -> Required {
        let mut fields = texts.iter().map(|t| text(t));
        let mut condition = Required::new(fields.next().unwrap()).with_mode(mode);
        for field in fields {
            condition = condition.with_connection(field);
        }
        condition
    }

    #[rstest]
    #[case(&["a", "b"], RequiredMode::All, ConditionResult::Success)]
    #[case(&["a", " "], RequiredMode::All, ConditionResult::Failed)]
    #[case(&["", "b"], RequiredMode::OneOrMore, ConditionResult::Success)]
    #[case(&["", ""], RequiredMode::OneOrMore, ConditionResult::Failed)]
    #[case(&["a", "b"], RequiredMode::One, ConditionResult::Failed)]
    #[case(&["", "b"], RequiredMode::One, ConditionResult::Success)]
    #[case(&["", ""], RequiredMode::AllOrNone, ConditionResult::Success)]
    #[case(&["a", ""], RequiredMode::AllOrNone, ConditionResult::Failed)]
    #[case(&["a", "b", ""], RequiredMode::Range { minimum: 1, maximum: 2 }, ConditionResult::Success)]
    #[case(&["a", "b", "c"], RequiredMode::Range { minimum: 1, maximum: 2 }, ConditionResult::Failed)]
    fn required_modes(
        #[case] texts: &[&str],
        #[case] mode: RequiredMode,
        #[case] expected: ConditionResult,
    ) {
        assert_eq!(required(texts, mode).evaluate().unwrap(), expected);
    }

    #[test]
    fn required_skips_read_only_fields() {
        let locked = Arc::new(MemoryConnection::new("locked").read_only());
        let condition = Required::new(text("a")).with_connection(locked.clone());
        assert_eq!(condition.evaluate().unwrap(), ConditionResult::Success);
        let condition = condition.include_not_editable();
        assert_eq!(condition.evaluate().unwrap(), ConditionResult::Failed);

        let only_locked = Required::new(locked);
        assert_eq!(only_locked.evaluate().unwrap(), ConditionResult::CannotEvaluate);
    }

    #[test]
    fn required_range_must_be_ordered() {
        let condition = required(&["a"], RequiredMode::Range { minimum: 3, maximum: 1 });
        assert_eq!(condition.evaluate().unwrap_err().code(), "CONFIG_INVALID_OPTION");
    }

    #[test]
    fn required_mode_serde() {
        let mode: RequiredMode =
            serde_json::from_str(r#"{"Range": {"minimum": 1, "maximum": 3}}"#).unwrap();
        assert_eq!(mode, RequiredMode::Range { minimum: 1, maximum: 3 });
        assert_eq!(serde_json::to_string(&RequiredMode::One).unwrap(), r#""One""#);
    }

    #[rstest]
    #[case("  hello  ", true, ConditionResult::Success)]
    #[case("  hello  ", false, ConditionResult::Failed)]
    #[case("hi", true, ConditionResult::Failed)]
    #[case("   ", true, ConditionResult::CannotEvaluate)]
    fn character_count_three_to_five(
        #[case] value: &str,
        #[case] trim: bool,
        #[case] expected: ConditionResult,
    ) {
        let mut condition = CharacterCount::new(text(value)).with_minimum(3).with_maximum(5);
        if !trim {
            condition = condition.untrimmed();
        }
        assert_eq!(condition.evaluate().unwrap(), expected);
    }

    #[test]
    fn character_count_sums_fields() {
        let condition = CharacterCount::new(text("abc"))
            .with_connection(text("de"))
            .with_maximum(4);
        assert_eq!(condition.evaluate().unwrap(), ConditionResult::Failed);
        assert!(!CharacterCount::new(text("abc")).can_evaluate());
    }

    #[test]
    fn characters_not_bytes() {
        let condition = CharacterCount::new(text("héllo")).with_maximum(5);
        assert_eq!(condition.evaluate().unwrap(), ConditionResult::Success);
    }

    #[test]
    fn word_count() {
        let condition = WordCount::new(text("one two  three"))
            .with_connection(text("four"))
            .with_minimum(2)
            .with_maximum(4);
        assert_eq!(condition.evaluate().unwrap(), ConditionResult::Success);
        let short = WordCount::new(text("one")).with_minimum(2);
        assert_eq!(short.evaluate().unwrap(), ConditionResult::Failed);
    }

    #[test]
    fn count_selections() {
        let list = Arc::new(MemoryConnection::new("list").with_selections(0));
        let condition = CountSelections::new(list.clone()).with_minimum(1).with_maximum(2);
        assert_eq!(condition.evaluate().unwrap(), ConditionResult::Failed);
        list.set_selections(2);
        assert_eq!(condition.evaluate().unwrap(), ConditionResult::Success);

        let condition = condition.with_connection(text("x"));
        assert_eq!(condition.evaluate().unwrap(), ConditionResult::Failed);
    }
}
