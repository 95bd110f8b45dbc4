//! Tag → type manager construction
//!
//! Managers described in configuration documents are created by tag:
//!
//! ```json
//! { "type": "Currency", "options": { "showSymbol": false } }
//! ```
//!
//! Tags match case-insensitively. Options deserialize into the manager's
//! option record, so an unknown option is a [`ConfigError::Deserialization`].

use std::sync::Arc;

use formtype_culture::CultureInfo;
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::boolean::Boolean;
use crate::numeric::{Currency, Float, Integer, Percent};
use crate::string::{
    BaseString, CreditCardNumber, Email, PhoneNumber, PostalCode, StrongPattern, Url,
};
use crate::temporal::{Date, DateTime, DayMonth, Duration, MonthYear, TimeOfDay};
use crate::{ConfigError, TypeManager};

/// Builds a manager from raw JSON options.
pub type Constructor =
    fn(&serde_json::Value, Arc<CultureInfo>) -> Result<Box<dyn TypeManager>, ConfigError>;

/// Reads an option record; `null` means all defaults.
pub fn read_options<O>(tag: &str, raw: &serde_json::Value) -> Result<O, ConfigError>
where
    O: DeserializeOwned + Default,
{
    if raw.is_null() {
        return Ok(O::default());
    }
    serde_json::from_value(raw.clone()).map_err(|e| ConfigError::Deserialization {
        tag: tag.to_string(),
        error: e.to_string(),
    })
}

macro_rules! builtin {
    ($registry:ident, $tag:literal, $manager:ident, fallible) => {
        $registry.register($tag, |raw, culture| {
            let options = read_options($tag, raw)?;
            Ok(Box::new($manager::with_options(culture, options)?))
        });
    };
    ($registry:ident, $tag:literal, $manager:ident) => {
        $registry.register($tag, |raw, culture| {
            let options = read_options($tag, raw)?;
            Ok(Box::new($manager::with_options(culture, options)))
        });
    };
}

// ============================================================================
// REGISTRY
// ============================================================================

/// Case-insensitive map from tag to [`Constructor`].
///
/// # Examples
///
/// ```rust
/// use formtype_types::prelude::*;
/// use serde_json::json;
///
/// let registry = TypeManagerRegistry::with_builtins();
/// let manager = registry
///     .create_from_json(
///         &json!({ "type": "integer", "options": { "allowNegatives": false } }),
///         CultureInfo::en_us().into(),
///     )
///     .unwrap();
/// assert_eq!(manager.name(), "Integer");
/// assert!(manager.to_value_str("-1").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct TypeManagerRegistry {
    constructors: IndexMap<String, (String, Constructor)>,
}

impl TypeManagerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every built-in manager.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        builtin!(registry, "Integer", Integer, fallible);
        builtin!(registry, "Float", Float, fallible);
        builtin!(registry, "Currency", Currency, fallible);
        builtin!(registry, "Percent", Percent, fallible);
        builtin!(registry, "Boolean", Boolean, fallible);
        builtin!(registry, "String", BaseString, fallible);
        builtin!(registry, "StrongPattern", StrongPattern, fallible);
        builtin!(registry, "Date", Date, fallible);
        builtin!(registry, "DateTime", DateTime);
        builtin!(registry, "DayMonth", DayMonth);
        builtin!(registry, "MonthYear", MonthYear);
        builtin!(registry, "TimeOfDay", TimeOfDay);
        builtin!(registry, "Duration", Duration, fallible);
        builtin!(registry, "Email", Email, fallible);
        builtin!(registry, "Url", Url, fallible);
        builtin!(registry, "PhoneNumber", PhoneNumber, fallible);
        builtin!(registry, "PostalCode", PostalCode, fallible);
        builtin!(registry, "CreditCardNumber", CreditCardNumber, fallible);
        registry
    }

    /// Adds a constructor, returning the one it replaced.
    pub fn register(&mut self, tag: &str, constructor: Constructor) -> Option<Constructor> {
        self.constructors
            .insert(tag.to_ascii_lowercase(), (tag.to_string(), constructor))
            .map(|(_, replaced)| replaced)
    }

    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.constructors.contains_key(&tag.to_ascii_lowercase())
    }

    /// Registered tags in registration order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.constructors.values().map(|(tag, _)| tag.as_str())
    }

    /// Creates the manager registered under `tag`.
    pub fn create(
        &self,
        tag: &str,
        options: &serde_json::Value,
        culture: Arc<CultureInfo>,
    ) -> Result<Box<dyn TypeManager>, ConfigError> {
        let (_, constructor) = self
            .constructors
            .get(&tag.to_ascii_lowercase())
            .ok_or_else(|| ConfigError::UnknownTypeManager {
                tag: tag.to_string(),
            })?;
        debug!(tag, culture = %culture.name, "creating type manager");
        constructor(options, culture)
    }

    /// Creates a manager from `{"type": ..., "options": {...}}`.
    pub fn create_from_json(
        &self,
        document: &serde_json::Value,
        culture: Arc<CultureInfo>,
    ) -> Result<Box<dyn TypeManager>, ConfigError> {
        let tag = document
            .get("type")
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| ConfigError::invalid_option("type", "a type manager tag is required"))?;
        let options = document.get("options").unwrap_or(&serde_json::Value::Null);
        self.create(tag, options, culture)
    }
}
