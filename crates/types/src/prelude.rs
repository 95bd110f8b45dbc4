//! Prelude module for convenient imports.
//!
//! `use formtype_types::prelude::*;` brings in the [`TypeManager`] trait,
//! [`Value`], the error types, every built-in manager with its options, and
//! [`CultureInfo`].
//!
//! # Examples
//!
//! ```rust
//! use formtype_types::prelude::*;
//!
//! let price = Currency::new(CultureInfo::en_us().into());
//! assert_eq!(price.to_text(&Value::Float(1234.5)).unwrap(), "$1,234.50");
//! ```

// ============================================================================
// FOUNDATION: Trait, values, errors
// ============================================================================

pub use crate::error::{ConfigError, InputError, TypeError, TypeResult};
pub use crate::manager::TypeManager;
pub use crate::value::Value;
pub use formtype_culture::{CultureInfo, CultureRegistry};

// ============================================================================
// MANAGERS
// ============================================================================

pub use crate::boolean::{Boolean, BooleanOptions};
pub use crate::decimal::RoundMode;
pub use crate::numeric::{
    Currency, CurrencyOptions, Float, FloatOptions, Integer, IntegerOptions, Percent,
    PercentOptions,
};
pub use crate::string::{
    BaseString, CardBrand, CreditCardNumber, CreditCardOptions, Email, EmailOptions,
    PhoneNumber, PostalCode, RegionEntry, RegionOptions, RegionPattern, RegionTable,
    StringOptions, StrongPattern, StrongPatternOptions, Url, UrlOptions,
};
pub use crate::temporal::{
    Date, DateOptions, DateStyle, DateTime, DateTimeOptions, DayMonth, DayMonthOptions, Duration,
    DurationOptions, MonthYear, MonthYearOptions, TimeOfDay, TimeOfDayOptions, TimeStyle,
    TimeUnit,
};

// ============================================================================
// REGISTRY
// ============================================================================

pub use crate::registry::TypeManagerRegistry;
