//! # formtype-calc
//!
//! Calculation trees over form fields.
//!
//! Every node implements [`CalcItem`] and evaluates to a [`CalcValue`]: a
//! number, `NaN` when something could not be computed, or `Null` when
//! there was nothing to compute. `NaN` spreads through arithmetic while
//! `Null` drops out of it, and [`Fix`] turns either into a default.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use formtype_calc::prelude::*;
//!
//! let float: Arc<dyn TypeManager> = Arc::new(Float::new(CultureInfo::en_us().into()));
//! let quantity = Arc::new(MemoryConnection::new("qty").with_type_manager(float.clone()));
//! let price = Arc::new(MemoryConnection::new("price").with_type_manager(float));
//!
//! let total = Round::new(
//!     Group::new()
//!         .plus(Element::new(quantity.clone()))
//!         .times(Element::new(price.clone())),
//! )
//! .with_decimals(2);
//!
//! quantity.set_text("3");
//! price.set_text("19.999");
//! assert_eq!(total.evaluate().unwrap(), CalcValue::Number(60.0));
//!
//! price.set_text("free");
//! assert_eq!(total.evaluate().unwrap(), CalcValue::NaN);
//! ```
//!
//! ## Nodes
//!
//! - **Leaves**: [`Number`], [`NaN`], [`Null`], [`Element`]
//! - **Arithmetic**: [`Group`], [`List`]
//! - **Functions**: [`Aggregate`] (avg, min, max, sum), [`Abs`], [`Round`],
//!   [`Fix`]
//! - **Branching**: [`Conditional`]

pub mod conditional;
pub mod element;
pub mod error;
pub mod function;
pub mod group;
pub mod item;
pub mod prelude;
pub mod value;

pub use conditional::Conditional;
pub use element::Element;
pub use error::CalcError;
pub use function::{Abs, Aggregate, AggregateFunction, Fix, Round};
pub use group::Group;
pub use item::{CalcItem, List, NaN, Null, Number};
pub use value::{CalcValue, Operator};
