//! Errors raised while evaluating conditions
//!
//! Conditions absorb [`InputError`](formtype_types::InputError)s: bad user
//! input becomes a failed or cannot-evaluate result. Only faults in how the
//! condition was set up reach the caller.

use formtype_types::ConfigError;

/// A misconfigured condition.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConditionError {
    /// A type manager or option was configured wrongly.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Neither the condition nor its connection supplies a type manager.
    #[error("no type manager for connection `{connection}`")]
    MissingTypeManager { connection: String },
}

impl ConditionError {
    /// Stable error code.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::Config(e) => e.code(),
            Self::MissingTypeManager { .. } => "CONDITION_NO_TYPE_MANAGER",
        }
    }
}
