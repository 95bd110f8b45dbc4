//! Errors raised while evaluating calculations
//!
//! Bad user input never appears here: an unconvertible field evaluates to
//! its `value_when_invalid` item. Only setup faults are errors.

use formtype_condition::ConditionError;
use formtype_types::ConfigError;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalcError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A condition inside a [`Conditional`](crate::Conditional) failed to
    /// evaluate.
    #[error(transparent)]
    Condition(#[from] ConditionError),

    /// Neither the element nor its connection supplies a type manager.
    #[error("no type manager for connection `{connection}`")]
    MissingTypeManager { connection: String },

    /// The manager's values have no numeric form.
    #[error("type manager `{manager}` cannot produce numbers")]
    NotNumeric { manager: String },
}

impl CalcError {
    /// Stable error code.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::Config(e) => e.code(),
            Self::Condition(e) => e.code(),
            Self::MissingTypeManager { .. } => "CALC_NO_TYPE_MANAGER",
            Self::NotNumeric { .. } => "CALC_NOT_NUMERIC",
        }
    }
}
