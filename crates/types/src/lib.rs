//! # formtype-types
//!
//! Culture-aware conversion, formatting and validation of form values.
//!
//! A [`TypeManager`] owns one kind of native value and moves it between
//! three forms: the culture-formatted text a user types, the native
//! [`Value`], and a culture-neutral string used for storage and for
//! configuration such as range bounds.
//!
//! ## Quick Start
//!
//! ```rust
//! use formtype_types::prelude::*;
//!
//! let amount = Float::new(CultureInfo::en_us().into());
//! let value = amount.to_value_str("1,234.5").unwrap();
//! assert_eq!(value, Value::Float(1234.5));
//! assert_eq!(amount.to_text_neutral(&value).unwrap(), "1234.5");
//! ```
//!
//! ## Built-in Managers
//!
//! - **Numeric**: [`Integer`], [`Float`], [`Currency`], [`Percent`]
//! - **Calendar**: [`Date`], [`DateTime`], [`DayMonth`], [`MonthYear`]
//! - **Clock**: [`TimeOfDay`], [`Duration`]
//! - **Text**: [`BaseString`], [`StrongPattern`], [`Email`], [`Url`],
//!   [`PhoneNumber`], [`PostalCode`], [`CreditCardNumber`]
//! - [`Boolean`]
//!
//! Managers described in configuration are built by tag through
//! [`TypeManagerRegistry`].
//!
//! ## Errors
//!
//! Conversions return [`TypeError`]: an [`InputError`] when the user's
//! text is unusable, a [`ConfigError`] when the manager was set up wrongly.

pub mod boolean;
pub mod decimal;
pub mod error;
mod manager;
pub mod numeric;
pub mod prelude;
pub mod registry;
pub mod string;
pub mod temporal;
pub mod value;

pub use boolean::{Boolean, BooleanOptions};
pub use decimal::RoundMode;
pub use error::{ConfigError, InputError, TypeError, TypeResult};
pub use manager::TypeManager;
pub use numeric::{
    Currency, CurrencyOptions, Float, FloatOptions, Integer, IntegerOptions, Percent,
    PercentOptions,
};
pub use registry::{Constructor, TypeManagerRegistry, read_options};
pub use string::{
    BaseString, CardBrand, CreditCardNumber, CreditCardOptions, Email, EmailOptions,
    PhoneNumber, PostalCode, RegionEntry, RegionOptions, RegionPattern, RegionTable,
    StringOptions, StrongPattern, StrongPatternOptions, Url, UrlOptions,
};
pub use temporal::{
    Date, DateOptions, DateStyle, DateTime, DateTimeOptions, DayMonth, DayMonthOptions, Duration,
    DurationOptions, MonthYear, MonthYearOptions, TimeOfDay, TimeOfDayOptions, TimeStyle,
    TimeUnit,
};
pub use value::Value;
