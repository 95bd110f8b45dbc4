//! Tri-state outcome of a condition

use std::fmt;

use serde::{Deserialize, Serialize};

/// Outcome of [`Condition::evaluate`](crate::Condition::evaluate).
///
/// Discriminants match the numeric codes hosts exchange: `1`, `0`, `-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i8)]
pub enum ConditionResult {
    Success = 1,
    Failed = 0,
    /// Not enough data to decide, for example an empty field.
    CannotEvaluate = -1,
}

impl ConditionResult {
    /// Swaps success and failure. Cannot-evaluate is unchanged.
    #[must_use]
    pub fn invert(self) -> Self {
        match self {
            Self::Success => Self::Failed,
            Self::Failed => Self::Success,
            Self::CannotEvaluate => Self::CannotEvaluate,
        }
    }

    #[must_use]
    pub fn from_bool(success: bool) -> Self {
        if success { Self::Success } else { Self::Failed }
    }

    /// The numeric code.
    #[must_use]
    pub fn code(self) -> i8 {
        self as i8
    }
}

impl From<bool> for ConditionResult {
    fn from(success: bool) -> Self {
        Self::from_bool(success)
    }
}

impl fmt::Display for ConditionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Failed => write!(f, "failed"),
            Self::CannotEvaluate => write!(f, "cannot evaluate"),
        }
    }
}
