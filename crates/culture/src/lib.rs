//! # formtype-culture
//!
//! Culture records consumed by every formtype `TypeManager`.
//!
//! A [`CultureInfo`] bundles the rules needed to format and parse numbers,
//! currency, percentages, dates and times for one locale. Cultures are plain
//! data: they are passed explicitly to each type manager at construction
//! (there is no process-wide "current culture"), which keeps multi-locale
//! callers straightforward.
//!
//! ## Quick Start
//!
//! ```rust
//! use formtype_culture::CultureRegistry;
//!
//! let registry = CultureRegistry::with_builtins();
//! let german = registry.get("de-DE").unwrap();
//! assert_eq!(german.number.decimal_separator, ",");
//! ```
//!
//! Hosts that ship their own locale tables deserialize them into
//! [`CultureInfo`] and [`register`](CultureRegistry::register) them.

mod builtin;
pub mod error;
pub mod info;
pub mod registry;

pub use error::CultureError;
pub use info::{CultureInfo, CurrencyFormat, DateFormat, NumberFormat, PercentFormat, TimeFormat};
pub use registry::CultureRegistry;
