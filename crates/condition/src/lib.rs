//! # formtype-condition
//!
//! Tri-state validation rules over form fields.
//!
//! A [`Condition`] reads one or more [`Connection`]s, converts their text
//! through a [`TypeManager`](formtype_types::TypeManager) and reports
//! [`ConditionResult::Success`], [`ConditionResult::Failed`] or
//! [`ConditionResult::CannotEvaluate`]. User input problems never escape
//! as errors; only a misconfigured condition returns a [`ConditionError`].
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use formtype_condition::prelude::*;
//!
//! let manager: Arc<dyn TypeManager> = Arc::new(Integer::new(CultureInfo::en_us().into()));
//! let quantity = Arc::new(MemoryConnection::new("quantity").with_type_manager(manager));
//! let rule = BooleanLogic::and()
//!     .with(Required::new(quantity.clone()))
//!     .with(Range::new(quantity.clone()).with_minimum(1).with_maximum(10));
//!
//! assert_eq!(rule.evaluate().unwrap(), ConditionResult::Failed);
//! quantity.set_text("5");
//! assert_eq!(rule.evaluate().unwrap(), ConditionResult::Success);
//! ```
//!
//! ## Conditions
//!
//! - **Values**: [`DataTypeCheck`], [`Range`], [`CompareToValue`],
//!   [`CompareTwoElements`], [`Difference`], [`RegExp`]
//! - **Counts**: [`Required`], [`CharacterCount`], [`WordCount`],
//!   [`CountSelections`]
//! - **Logic**: [`BooleanLogic`]

pub mod compare;
mod condition;
pub mod connection;
pub mod count;
pub mod error;
pub mod logic;
pub mod prelude;
pub mod result;
pub mod text;

pub use compare::{
    CompareOperator, CompareToValue, CompareTwoElements, DataTypeCheck, Difference, Range,
};
pub use condition::{Condition, ConditionOptions};
pub use connection::{Connection, MemoryConnection};
pub use count::{CharacterCount, CountSelections, Required, RequiredMode, WordCount};
pub use error::ConditionError;
pub use logic::{BooleanLogic, LogicOperator};
pub use result::ConditionResult;
pub use text::RegExp;
