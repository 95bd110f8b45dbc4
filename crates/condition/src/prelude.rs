//! Prelude module for convenient imports.
//!
//! Re-exports everything from `formtype_types::prelude` along with the
//! condition types, so one glob import covers managers and rules.

pub use formtype_types::prelude::*;

// ============================================================================
// CONDITIONS
// ============================================================================

pub use crate::compare::{
    CompareOperator, CompareToValue, CompareTwoElements, DataTypeCheck, Difference, Range,
};
pub use crate::condition::{Condition, ConditionOptions};
pub use crate::connection::{Connection, MemoryConnection};
pub use crate::count::{CharacterCount, CountSelections, Required, RequiredMode, WordCount};
pub use crate::error::ConditionError;
pub use crate::logic::{BooleanLogic, LogicOperator};
pub use crate::result::ConditionResult;
pub use crate::text::RegExp;
