//! Prelude module for convenient imports.
//!
//! Re-exports `formtype_condition::prelude` (and with it every type
//! manager) along with the calculation nodes.

pub use formtype_condition::prelude::*;

// ============================================================================
// CALCULATIONS
// ============================================================================

pub use crate::conditional::Conditional;
pub use crate::element::Element;
pub use crate::error::CalcError;
pub use crate::function::{Abs, Aggregate, AggregateFunction, Fix, Round};
pub use crate::group::Group;
pub use crate::item::{CalcItem, List, NaN, Null, Number};
pub use crate::value::{CalcValue, Operator};
