//! Conditions that compare converted values
//!
//! Every comparison is delegated to a [`TypeManager`]: dates compare as
//! dates, strings follow the manager's case policy, numbers compare
//! numerically. Empty or unconvertible fields cannot be evaluated here;
//! [`DataTypeCheck`] is the condition that reports bad input.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use formtype_types::{ConfigError, TypeError, TypeManager, Value};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::condition::{
    Condition, ConditionOptions, FieldValue, condition_options, configured_value, read_field,
    resolve_manager,
};
use crate::connection::Connection;
use crate::error::ConditionError;
use crate::result::ConditionResult;

// ============================================================================
// OPERATOR
// ============================================================================

/// Comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CompareOperator {
    #[default]
    #[serde(rename = "=")]
    Equal,
    #[serde(rename = "<>")]
    NotEqual,
    #[serde(rename = "<")]
    LessThan,
    #[serde(rename = "<=")]
    LessThanOrEqual,
    #[serde(rename = ">")]
    GreaterThan,
    #[serde(rename = ">=")]
    GreaterThanOrEqual,
}

impl CompareOperator {
    /// Whether `left <op> right` holds given `left.cmp(right)`.
    #[must_use]
    pub fn matches(self, ordering: Ordering) -> bool {
        match self {
            Self::Equal => ordering == Ordering::Equal,
            Self::NotEqual => ordering != Ordering::Equal,
            Self::LessThan => ordering == Ordering::Less,
            Self::LessThanOrEqual => ordering != Ordering::Greater,
            Self::GreaterThan => ordering == Ordering::Greater,
            Self::GreaterThanOrEqual => ordering != Ordering::Less,
        }
    }

    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Equal => "=",
            Self::NotEqual => "<>",
            Self::LessThan => "<",
            Self::LessThanOrEqual => "<=",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqual => ">=",
        }
    }
}

impl fmt::Display for CompareOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for CompareOperator {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "=" | "==" => Ok(Self::Equal),
            "<>" | "!=" => Ok(Self::NotEqual),
            "<" => Ok(Self::LessThan),
            "<=" => Ok(Self::LessThanOrEqual),
            ">" => Ok(Self::GreaterThan),
            ">=" => Ok(Self::GreaterThanOrEqual),
            other => Err(ConfigError::invalid_option(
                "operator",
                format!("unknown operator `{other}`"),
            )),
        }
    }
}

/// Compares through the manager. A null operand yields `None`.
fn compare_with(
    manager: &dyn TypeManager,
    a: &Value,
    b: &Value,
) -> Result<Option<Ordering>, ConditionError> {
    match manager.compare(a, b) {
        Ok(ordering) => Ok(Some(ordering)),
        Err(TypeError::Input(e)) => {
            trace!(code = %e.code, "comparison skipped");
            Ok(None)
        }
        Err(TypeError::Config(e)) => Err(e.into()),
    }
}

// ============================================================================
// DATA TYPE CHECK
// ============================================================================

/// Succeeds when the field converts under its type manager.
///
/// An empty field cannot be evaluated; pair with
/// [`Required`](crate::Required) to demand a value.
#[derive(Debug)]
pub struct DataTypeCheck {
    connection: Arc<dyn Connection>,
    manager: Option<Arc<dyn TypeManager>>,
    options: ConditionOptions,
}

impl DataTypeCheck {
    pub fn new(connection: Arc<dyn Connection>) -> Self {
        Self {
            connection,
            manager: None,
            options: ConditionOptions::default(),
        }
    }

    /// Uses `manager` instead of the connection's.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_type_manager(mut self, manager: Arc<dyn TypeManager>) -> Self {
        self.manager = Some(manager);
        self
    }
}

impl Condition for DataTypeCheck {
    fn name(&self) -> &'static str {
        "DataTypeCheck"
    }

    fn options(&self) -> &ConditionOptions {
        &self.options
    }

    fn can_evaluate(&self) -> bool {
        true
    }

    fn evaluate_rule(&self) -> Result<ConditionResult, ConditionError> {
        let manager = resolve_manager(self.manager.as_ref(), self.connection.as_ref())?;
        Ok(match read_field(self.connection.as_ref(), manager.as_ref())? {
            FieldValue::Empty => ConditionResult::CannotEvaluate,
            FieldValue::Invalid => ConditionResult::Failed,
            FieldValue::Present(_) => ConditionResult::Success,
        })
    }
}

// ============================================================================
// RANGE
// ============================================================================

/// Succeeds when the field lies within inclusive bounds.
///
/// Bounds are native values or culture-neutral strings, so `"2024-01-01"`
/// bounds a date field under any culture.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use formtype_condition::prelude::*;
///
/// let manager: Arc<dyn TypeManager> = Arc::new(Integer::new(CultureInfo::en_us().into()));
/// let age = Arc::new(MemoryConnection::new("age").with_type_manager(manager).with_text("42"));
/// let range = Range::new(age).with_minimum(18).with_maximum(120);
/// assert_eq!(range.evaluate().unwrap(), ConditionResult::Success);
/// ```
#[derive(Debug)]
pub struct Range {
    connection: Arc<dyn Connection>,
    manager: Option<Arc<dyn TypeManager>>,
    minimum: Option<Value>,
    maximum: Option<Value>,
    options: ConditionOptions,
}

impl Range {
    pub fn new(connection: Arc<dyn Connection>) -> Self {
        Self {
            connection,
            manager: None,
            minimum: None,
            maximum: None,
            options: ConditionOptions::default(),
        }
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_type_manager(mut self, manager: Arc<dyn TypeManager>) -> Self {
        self.manager = Some(manager);
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_minimum(mut self, minimum: impl Into<Value>) -> Self {
        self.minimum = Some(minimum.into());
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_maximum(mut self, maximum: impl Into<Value>) -> Self {
        self.maximum = Some(maximum.into());
        self
    }

    fn bound(
        manager: &dyn TypeManager,
        bound: Option<&Value>,
        option: &'static str,
    ) -> Result<Option<Value>, ConditionError> {
        match bound {
            None | Some(Value::Null) => Ok(None),
            Some(value) => {
                let value = configured_value(manager, value, option)?;
                Ok((!value.is_null()).then_some(value))
            }
        }
    }
}

impl Condition for Range {
    fn name(&self) -> &'static str {
        "Range"
    }

    fn options(&self) -> &ConditionOptions {
        &self.options
    }

    fn can_evaluate(&self) -> bool {
        let set = |bound: &Option<Value>| bound.as_ref().is_some_and(|v| !v.is_null());
        set(&self.minimum) || set(&self.maximum)
    }

    fn evaluate_rule(&self) -> Result<ConditionResult, ConditionError> {
        let manager = resolve_manager(self.manager.as_ref(), self.connection.as_ref())?;
        let manager = manager.as_ref();
        let minimum = Self::bound(manager, self.minimum.as_ref(), "minimum")?;
        let maximum = Self::bound(manager, self.maximum.as_ref(), "maximum")?;
        if let (Some(min), Some(max)) = (&minimum, &maximum)
            && compare_with(manager, min, max)? == Some(Ordering::Greater)
        {
            return Err(ConfigError::invalid_option(
                "maximum",
                format!("maximum {max} is below minimum {min}"),
            )
            .into());
        }

        let FieldValue::Present(value) = read_field(self.connection.as_ref(), manager)? else {
            return Ok(ConditionResult::CannotEvaluate);
        };
        if let Some(min) = &minimum {
            match compare_with(manager, &value, min)? {
                None => return Ok(ConditionResult::CannotEvaluate),
                Some(Ordering::Less) => return Ok(ConditionResult::Failed),
                Some(_) => {}
            }
        }
        if let Some(max) = &maximum {
            match compare_with(manager, &value, max)? {
                None => return Ok(ConditionResult::CannotEvaluate),
                Some(Ordering::Greater) => return Ok(ConditionResult::Failed),
                Some(_) => {}
            }
        }
        Ok(ConditionResult::Success)
    }
}

// ============================================================================
// COMPARE TO VALUE
// ============================================================================

/// Compares the field to a fixed value: `field <op> value`.
#[derive(Debug)]
pub struct CompareToValue {
    connection: Arc<dyn Connection>,
    manager: Option<Arc<dyn TypeManager>>,
    operator: CompareOperator,
    value_to_compare: Value,
    options: ConditionOptions,
}

impl CompareToValue {
    /// `value_to_compare` may be native or a culture-neutral string.
    pub fn new(
        connection: Arc<dyn Connection>,
        operator: CompareOperator,
        value_to_compare: impl Into<Value>,
    ) -> Self {
        Self {
            connection,
            manager: None,
            operator,
            value_to_compare: value_to_compare.into(),
            options: ConditionOptions::default(),
        }
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_type_manager(mut self, manager: Arc<dyn TypeManager>) -> Self {
        self.manager = Some(manager);
        self
    }
}

impl Condition for CompareToValue {
    fn name(&self) -> &'static str {
        "CompareToValue"
    }

    fn options(&self) -> &ConditionOptions {
        &self.options
    }

    fn can_evaluate(&self) -> bool {
        !self.value_to_compare.is_null()
    }

    fn evaluate_rule(&self) -> Result<ConditionResult, ConditionError> {
        let manager = resolve_manager(self.manager.as_ref(), self.connection.as_ref())?;
        let manager = manager.as_ref();
        let other = configured_value(manager, &self.value_to_compare, "valueToCompare")?;
        let FieldValue::Present(value) = read_field(self.connection.as_ref(), manager)? else {
            return Ok(ConditionResult::CannotEvaluate);
        };
        Ok(match compare_with(manager, &value, &other)? {
            Some(ordering) => self.operator.matches(ordering).into(),
            None => ConditionResult::CannotEvaluate,
        })
    }
}

// ============================================================================
// COMPARE TWO ELEMENTS
// ============================================================================

/// Compares two fields: `first <op> second`.
#[derive(Debug)]
pub struct CompareTwoElements {
    connection: Arc<dyn Connection>,
    connection2: Arc<dyn Connection>,
    manager: Option<Arc<dyn TypeManager>>,
    operator: CompareOperator,
    options: ConditionOptions,
}

impl CompareTwoElements {
    pub fn new(
        connection: Arc<dyn Connection>,
        operator: CompareOperator,
        connection2: Arc<dyn Connection>,
    ) -> Self {
        Self {
            connection,
            connection2,
            manager: None,
            operator,
            options: ConditionOptions::default(),
        }
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_type_manager(mut self, manager: Arc<dyn TypeManager>) -> Self {
        self.manager = Some(manager);
        self
    }
}

/// Manager for a pair of fields: explicit, then the first field's, then
/// the second's.
fn pair_manager(
    explicit: Option<&Arc<dyn TypeManager>>,
    first: &dyn Connection,
    second: &dyn Connection,
) -> Result<Arc<dyn TypeManager>, ConditionError> {
    resolve_manager(explicit, first).or_else(|_| resolve_manager(None, second))
}

impl Condition for CompareTwoElements {
    fn name(&self) -> &'static str {
        "CompareTwoElements"
    }

    fn options(&self) -> &ConditionOptions {
        &self.options
    }

    fn can_evaluate(&self) -> bool {
        true
    }

    fn evaluate_rule(&self) -> Result<ConditionResult, ConditionError> {
        let manager = pair_manager(
            self.manager.as_ref(),
            self.connection.as_ref(),
            self.connection2.as_ref(),
        )?;
        let manager = manager.as_ref();
        let (FieldValue::Present(first), FieldValue::Present(second)) = (
            read_field(self.connection.as_ref(), manager)?,
            read_field(self.connection2.as_ref(), manager)?,
        ) else {
            return Ok(ConditionResult::CannotEvaluate);
        };
        Ok(match compare_with(manager, &first, &second)? {
            Some(ordering) => self.operator.matches(ordering).into(),
            None => ConditionResult::CannotEvaluate,
        })
    }
}

// ============================================================================
// DIFFERENCE
// ============================================================================

/// Compares the numeric distance between two fields to a threshold:
/// `|first - second| <op> difference`.
///
/// Uses [`TypeManager::to_number`], so durations compare in their
/// configured unit and currency amounts as plain numbers.
#[derive(Debug)]
pub struct Difference {
    connection: Arc<dyn Connection>,
    connection2: Arc<dyn Connection>,
    manager: Option<Arc<dyn TypeManager>>,
    difference: f64,
    operator: CompareOperator,
    absolute: bool,
    options: ConditionOptions,
}

impl Difference {
    /// Defaults to `|first - second| <= difference`.
    pub fn new(
        connection: Arc<dyn Connection>,
        connection2: Arc<dyn Connection>,
        difference: f64,
    ) -> Self {
        Self {
            connection,
            connection2,
            manager: None,
            difference,
            operator: CompareOperator::LessThanOrEqual,
            absolute: true,
            options: ConditionOptions::default(),
        }
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_type_manager(mut self, manager: Arc<dyn TypeManager>) -> Self {
        self.manager = Some(manager);
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_operator(mut self, operator: CompareOperator) -> Self {
        self.operator = operator;
        self
    }

    /// Keeps the sign of `first - second`.
    #[must_use = "builder methods must be chained or built"]
    pub fn signed(mut self) -> Self {
        self.absolute = false;
        self
    }
}

impl Condition for Difference {
    fn name(&self) -> &'static str {
        "Difference"
    }

    fn options(&self) -> &ConditionOptions {
        &self.options
    }

    fn can_evaluate(&self) -> bool {
        self.difference.is_finite()
    }

    fn evaluate_rule(&self) -> Result<ConditionResult, ConditionError> {
        let manager = pair_manager(
            self.manager.as_ref(),
            self.connection.as_ref(),
            self.connection2.as_ref(),
        )?;
        let manager = manager.as_ref();
        let (FieldValue::Present(first), FieldValue::Present(second)) = (
            read_field(self.connection.as_ref(), manager)?,
            read_field(self.connection2.as_ref(), manager)?,
        ) else {
            return Ok(ConditionResult::CannotEvaluate);
        };
        let (Some(a), Some(b)) = (manager.to_number(&first), manager.to_number(&second)) else {
            return Err(ConfigError::invalid_option(
                "typeManager",
                format!("{} values have no numeric form", manager.name()),
            )
            .into());
        };
        let mut delta = a - b;
        if self.absolute {
            delta = delta.abs();
        }
        Ok(match delta.partial_cmp(&self.difference) {
            Some(ordering) => self.operator.matches(ordering).into(),
            None => ConditionResult::CannotEvaluate,
        })
    }
}

condition_options!(
    DataTypeCheck,
    Range,
    CompareToValue,
    CompareTwoElements,
    Difference
);
