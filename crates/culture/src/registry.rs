//! Culture lookup by name

use std::sync::Arc;

use indexmap::IndexMap;
use tracing::debug;

use crate::{CultureError, CultureInfo};

// ============================================================================
// CULTURE REGISTRY
// ============================================================================

/// Name → culture lookup table.
///
/// Names are matched case-insensitively. When an exact name is missing the
/// registry falls back to the first culture with the same language, so
/// `"en-AU"` resolves to `en-US` when only the built-ins are loaded.
///
/// # Examples
///
/// ```rust
/// use formtype_culture::CultureRegistry;
///
/// let registry = CultureRegistry::with_builtins();
/// assert_eq!(registry.get("EN-gb").unwrap().name, "en-GB");
/// assert_eq!(registry.get("en-AU").unwrap().name, "en-US");
/// assert!(registry.get("ja-JP").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CultureRegistry {
    cultures: IndexMap<String, Arc<CultureInfo>>,
}

impl CultureRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding `en-US`, `en-GB`, `de-DE` and `fr-FR`.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for culture in crate::builtin::all() {
            registry.insert(culture);
        }
        registry
    }

    /// Adds or replaces a culture after validating it.
    pub fn register(&mut self, culture: CultureInfo) -> Result<(), CultureError> {
        culture.validate()?;
        debug!(culture = %culture.name, "registering culture");
        self.insert(culture);
        Ok(())
    }

    fn insert(&mut self, culture: CultureInfo) {
        self.cultures
            .insert(culture.name.to_ascii_lowercase(), Arc::new(culture));
    }

    /// Looks up a culture by name, falling back to the language prefix.
    pub fn get(&self, name: &str) -> Result<Arc<CultureInfo>, CultureError> {
        let key = name.to_ascii_lowercase();
        if let Some(culture) = self.cultures.get(&key) {
            return Ok(Arc::clone(culture));
        }

        let language = key.split(['-', '_']).next().unwrap_or_default();
        self.cultures
            .values()
            .find(|c| c.language().eq_ignore_ascii_case(language))
            .cloned()
            .ok_or_else(|| CultureError::UnknownCulture {
                name: name.to_string(),
            })
    }

    /// The first registered culture.
    pub fn default_culture(&self) -> Result<Arc<CultureInfo>, CultureError> {
        self.cultures
            .values()
            .next()
            .cloned()
            .ok_or_else(|| CultureError::UnknownCulture {
                name: String::new(),
            })
    }

    /// Registered culture names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.cultures.values().map(|c| c.name.as_str())
    }

    /// Number of registered cultures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cultures.len()
    }

    /// Returns true if no culture is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cultures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("en-US", "en-US")]
    #[case("en-us", "en-US")]
    #[case("de-AT", "de-DE")]
    #[case("fr", "fr-FR")]
    fn resolves_names(#[case] requested: &str, #[case] expected: &str) {
        let registry = CultureRegistry::with_builtins();
        assert_eq!(registry.get(requested).unwrap().name, expected);
    }

    #[test]
    fn unknown_culture_is_an_error() {
        let registry = CultureRegistry::with_builtins();
        assert_eq!(
            registry.get("ja-JP").unwrap_err(),
            CultureError::UnknownCulture {
                name: "ja-JP".into()
            }
        );
    }

    #[test]
    fn register_replaces_existing() {
        let mut registry = CultureRegistry::with_builtins();
        let mut custom = CultureInfo::en_us();
        custom.currency.symbol = "US$".into();
        registry.register(custom).unwrap();
        assert_eq!(registry.len(), 4);
        assert_eq!(registry.get("en-US").unwrap().currency.symbol, "US$");
    }

    #[test]
    fn register_rejects_invalid_culture() {
        let mut registry = CultureRegistry::new();
        let mut broken = CultureInfo::en_us();
        broken.number.decimal_separator = String::new();
        assert!(registry.register(broken).is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn default_is_first_registered() {
        let registry = CultureRegistry::with_builtins();
        assert_eq!(registry.default_culture().unwrap().name, "en-US");
        assert_eq!(
            registry.names().collect::<Vec<_>>(),
            vec!["en-US", "en-GB", "de-DE", "fr-FR"]
        );
    }
}
