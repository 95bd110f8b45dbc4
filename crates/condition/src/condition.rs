//! The [`Condition`] trait and helpers shared by concrete conditions

use std::fmt;
use std::sync::Arc;

use formtype_types::{ConfigError, TypeError, TypeManager, Value};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::connection::Connection;
use crate::error::ConditionError;
use crate::result::ConditionResult;

/// Flags every condition carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ConditionOptions {
    /// A disabled condition always reports cannot-evaluate.
    pub enabled: bool,
    /// Swaps success and failure.
    pub not: bool,
}

impl Default for ConditionOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            not: false,
        }
    }
}

/// A rule over one or more connections with a tri-state outcome.
///
/// Implementors supply [`can_evaluate`](Self::can_evaluate) and
/// [`evaluate_rule`](Self::evaluate_rule); callers use
/// [`evaluate`](Self::evaluate), which applies the shared flags.
pub trait Condition: fmt::Debug + Send + Sync {
    /// Tag used in logs.
    fn name(&self) -> &'static str;

    fn options(&self) -> &ConditionOptions;

    /// False when required settings are missing, such as a range with no
    /// bounds. Such a condition is skipped.
    fn can_evaluate(&self) -> bool;

    /// The rule itself, before `enabled` and `not` are applied.
    fn evaluate_rule(&self) -> Result<ConditionResult, ConditionError>;

    /// Evaluates the condition.
    ///
    /// Disabled or unevaluable conditions report
    /// [`ConditionResult::CannotEvaluate`]. Only configuration faults are
    /// returned as errors.
    fn evaluate(&self) -> Result<ConditionResult, ConditionError> {
        let options = self.options();
        if !options.enabled || !self.can_evaluate() {
            return Ok(ConditionResult::CannotEvaluate);
        }
        let mut result = self.evaluate_rule()?;
        if options.not {
            result = result.invert();
        }
        trace!(condition = self.name(), %result, "condition evaluated");
        Ok(result)
    }
}

impl<C: Condition + ?Sized> Condition for Box<C> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn options(&self) -> &ConditionOptions {
        (**self).options()
    }

    fn can_evaluate(&self) -> bool {
        (**self).can_evaluate()
    }

    fn evaluate_rule(&self) -> Result<ConditionResult, ConditionError> {
        (**self).evaluate_rule()
    }

    fn evaluate(&self) -> Result<ConditionResult, ConditionError> {
        (**self).evaluate()
    }
}

/// Adds `with_options` and `negated` builders to condition structs with an
/// `options` field.
macro_rules! condition_options {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $ty {
                /// Replaces the shared flags.
                #[must_use = "builder methods must be chained or built"]
                pub fn with_options(mut self, options: $crate::ConditionOptions) -> Self {
                    self.options = options;
                    self
                }

                /// Inverts the outcome.
                #[must_use = "builder methods must be chained or built"]
                pub fn negated(mut self) -> Self {
                    self.options.not = true;
                    self
                }
            }
        )+
    };
}

pub(crate) use condition_options;

// ============================================================================
// FIELD ACCESS
// ============================================================================

/// A connection's content after conversion.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum FieldValue {
    Empty,
    Invalid,
    Present(Value),
}

/// Picks the condition's own manager, falling back to the connection's.
pub(crate) fn resolve_manager(
    explicit: Option<&Arc<dyn TypeManager>>,
    connection: &dyn Connection,
) -> Result<Arc<dyn TypeManager>, ConditionError> {
    explicit
        .cloned()
        .or_else(|| connection.type_manager())
        .ok_or_else(|| ConditionError::MissingTypeManager {
            connection: connection.id().to_owned(),
        })
}

/// Reads and converts a connection. Input errors become
/// [`FieldValue::Invalid`]; configuration errors propagate.
pub(crate) fn read_field(
    connection: &dyn Connection,
    manager: &dyn TypeManager,
) -> Result<FieldValue, ConditionError> {
    if connection.is_null_value(true) {
        return Ok(FieldValue::Empty);
    }
    match connection.typed_value(manager) {
        Ok(Value::Null) => Ok(FieldValue::Empty),
        Ok(value) => Ok(FieldValue::Present(value)),
        Err(TypeError::Input(e)) => {
            trace!(connection = connection.id(), code = %e.code, "input rejected");
            Ok(FieldValue::Invalid)
        }
        Err(TypeError::Config(e)) => Err(e.into()),
    }
}

/// Converts a configured operand such as a range bound. Strings are read
/// in the culture-neutral format.
pub(crate) fn configured_value(
    manager: &dyn TypeManager,
    value: &Value,
    option: &'static str,
) -> Result<Value, ConditionError> {
    let converted = match value {
        Value::String(text) => manager.to_value_neutral(text),
        other => manager.to_value(other),
    };
    match converted {
        Ok(value) => Ok(value),
        Err(TypeError::Input(e)) => {
            Err(ConfigError::invalid_option(option, format!("{value}: {}", e.message)).into())
        }
        Err(TypeError::Config(e)) => Err(e.into()),
    }
}
