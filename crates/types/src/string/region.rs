//! Region-specific text: phone numbers and postal codes
//!
//! A [`RegionTable`] maps region names to either a pattern entry or an
//! alias naming other regions (`"UnitedStates|Canada"`). A manager selects
//! regions with a pipe-delimited list; aliases are expanded recursively
//! and a value is accepted when any selected region's pattern matches it.
//!
//! ```text
//!   "NorthAmerica" ──alias──▶ "UnitedStates|Canada" ──▶ [UnitedStates, Canada]
//! ```

use std::cmp::Ordering;
use std::sync::{Arc, LazyLock};

use formtype_culture::CultureInfo;
use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{accept_string, compare_text, compile_anchored, text_of};
use crate::{ConfigError, InputError, TypeManager, TypeResult, Value};

/// Digit slot in a mask.
const MASK_DIGIT: char = '9';

const DEFAULT_VALID_CHARS: &str = r"[0-9A-Za-z ()+\-./]";

// ============================================================================
// REGION TABLE
// ============================================================================

/// Pattern entry of a [`RegionTable`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RegionPattern {
    /// Expression the whole value must match.
    pub pattern: String,
    /// Character class for input filtering.
    #[serde(default)]
    pub valid_chars: Option<String>,
    /// Display layout where `9` is a digit slot, such as `(999) 999-9999`.
    #[serde(default)]
    pub mask: Option<String>,
}

/// A region: its own pattern, or an alias for other regions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RegionEntry {
    /// Pipe-delimited region names.
    Alias(String),
    Pattern(RegionPattern),
}

impl RegionEntry {
    fn pattern(pattern: &str, valid_chars: Option<&str>, mask: Option<&str>) -> Self {
        Self::Pattern(RegionPattern {
            pattern: pattern.into(),
            valid_chars: valid_chars.map(Into::into),
            mask: mask.map(Into::into),
        })
    }

    fn alias(targets: &str) -> Self {
        Self::Alias(targets.into())
    }
}

/// Named regions in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionTable {
    entries: IndexMap<String, RegionEntry>,
}

impl RegionTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a region.
    pub fn insert(&mut self, name: impl Into<String>, entry: RegionEntry) {
        self.entries.insert(name.into(), entry);
    }

    /// Looks a region up, falling back to a case-insensitive match.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&RegionEntry> {
        self.get_key_value(name).map(|(_, entry)| entry)
    }

    fn get_key_value(&self, name: &str) -> Option<(&str, &RegionEntry)> {
        self.entries
            .get_key_value(name)
            .or_else(|| self.entries.iter().find(|(k, _)| k.eq_ignore_ascii_case(name)))
            .map(|(k, v)| (k.as_str(), v))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Expands a pipe-delimited list of names into pattern entries,
    /// following aliases. Duplicates are dropped.
    pub fn resolve(&self, names: &str) -> Result<Vec<(&str, &RegionPattern)>, ConfigError> {
        let mut resolved = Vec::new();
        let mut trail = Vec::new();
        for name in split_names(names) {
            self.collect(name, &mut trail, &mut resolved)?;
        }
        if resolved.is_empty() {
            return Err(ConfigError::invalid_option("regions", "no region named"));
        }
        Ok(resolved)
    }

    fn collect<'a>(
        &'a self,
        name: &str,
        trail: &mut Vec<&'a str>,
        out: &mut Vec<(&'a str, &'a RegionPattern)>,
    ) -> Result<(), ConfigError> {
        let (key, entry) = self
            .get_key_value(name)
            .ok_or_else(|| ConfigError::UnknownRegion {
                region: name.to_string(),
            })?;
        if trail.contains(&key) {
            return Err(ConfigError::invalid_option(
                "regions",
                format!("alias cycle through `{key}`"),
            ));
        }
        match entry {
            RegionEntry::Pattern(pattern) => {
                if !out.iter().any(|(n, _)| *n == key) {
                    out.push((key, pattern));
                }
            }
            RegionEntry::Alias(targets) => {
                trail.push(key);
                for target in split_names(targets) {
                    self.collect(target, trail, out)?;
                }
                trail.pop();
            }
        }
        Ok(())
    }
}

fn split_names(names: &str) -> impl Iterator<Item = &str> {
    names.split('|').map(str::trim).filter(|n| !n.is_empty())
}

/// Built-in phone number regions.
#[must_use]
pub fn phone_regions() -> RegionTable {
    const CHARS: Option<&str> = Some(r"[0-9 ()+\-.]");
    let mut table = RegionTable::new();
    table.insert(
        "NorthAmerica",
        RegionEntry::pattern(
            r"(?:\+?1[ .\-]?)?(?:\(\d{3}\)|\d{3})[ .\-]?\d{3}[ .\-]?\d{4}",
            CHARS,
            Some("(999) 999-9999"),
        ),
    );
    table.insert("UnitedStates", RegionEntry::alias("NorthAmerica"));
    table.insert("Canada", RegionEntry::alias("NorthAmerica"));
    table.insert(
        "UnitedKingdom",
        RegionEntry::pattern(r"(?:\+44 ?(?:\(0\) ?)?|0)(?:\d ?){9,10}", CHARS, None),
    );
    table.insert(
        "France",
        RegionEntry::pattern(
            r"(?:\+33 ?(?:\(0\) ?)?|0)[1-9](?:[ .\-]?\d{2}){4}",
            CHARS,
            Some("99 99 99 99 99"),
        ),
    );
    table.insert(
        "Germany",
        RegionEntry::pattern(
            r"(?:\+49 ?(?:\(0\) ?)?|0)\(?[1-9]\d{1,4}\)?[ /\-]?\d{3,9}(?:[ \-]?\d{1,5})?",
            Some(r"[0-9 ()+\-/]"),
            None,
        ),
    );
    table.insert(
        "Japan",
        RegionEntry::pattern(
            r"(?:\+81[ \-]?|0)\d{1,4}[ \-]?\d{1,4}[ \-]?\d{4}",
            CHARS,
            None,
        ),
    );
    table.insert(
        "China",
        RegionEntry::pattern(
            r"(?:\+86[ \-]?)?1[3-9]\d[ \-]?\d{4}[ \-]?\d{4}|(?:\+86[ \-]?|0)\d{2,3}[ \-]?\d{7,8}",
            CHARS,
            None,
        ),
    );
    table.insert(
        "International",
        RegionEntry::pattern(r"\+\d(?:[ .()\-]{0,2}\d){6,14}", CHARS, None),
    );
    table
}

/// Built-in postal code regions.
#[must_use]
pub fn postal_regions() -> RegionTable {
    let mut table = RegionTable::new();
    table.insert(
        "UnitedStates",
        RegionEntry::pattern(r"\d{5}(?:-\d{4})?", Some(r"[0-9\-]"), None),
    );
    table.insert(
        "Canada",
        RegionEntry::pattern(
            r"[ABCEGHJ-NPRSTVXY]\d[ABCEGHJ-NPRSTV-Z] ?\d[ABCEGHJ-NPRSTV-Z]\d",
            Some("[0-9A-Za-z ]"),
            None,
        ),
    );
    table.insert("NorthAmerica", RegionEntry::alias("UnitedStates|Canada"));
    table.insert(
        "UnitedKingdom",
        RegionEntry::pattern(
            r"[A-Z]{1,2}\d[A-Z\d]? ?\d[A-Z]{2}|GIR ?0AA",
            Some("[0-9A-Za-z ]"),
            None,
        ),
    );
    table.insert("France", RegionEntry::pattern(r"\d{5}", Some("[0-9]"), None));
    table.insert("Germany", RegionEntry::pattern(r"\d{5}", Some("[0-9]"), None));
    table.insert(
        "Japan",
        RegionEntry::pattern(r"\d{3}-?\d{4}", Some(r"[0-9\-]"), Some("999-9999")),
    );
    table.insert(
        "Netherlands",
        RegionEntry::pattern(r"\d{4} ?[A-Z]{2}", Some("[0-9A-Za-z ]"), None),
    );
    table
}

// ============================================================================
// MATCHER
// ============================================================================

/// Options shared by [`PhoneNumber`] and [`PostalCode`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct RegionOptions {
    /// Pipe-delimited region names.
    pub regions: String,
    /// Entries added to, or replacing those of, the built-in table.
    pub region_table: Option<RegionTable>,
    /// Lay the digits out with the region mask when exactly one region
    /// matches and the digit count fills the mask.
    pub format_with_mask: bool,
}

impl Default for RegionOptions {
    fn default() -> Self {
        Self {
            regions: "UnitedStates".into(),
            region_table: None,
            format_with_mask: false,
        }
    }
}

#[derive(Debug, Clone)]
struct CompiledRegion {
    name: String,
    regex: Regex,
    mask: Option<String>,
}

/// Compiled form of the selected regions.
#[derive(Debug, Clone)]
struct RegionMatcher {
    regions: Vec<CompiledRegion>,
    valid_chars: Regex,
}

impl RegionMatcher {
    fn build(builtin: RegionTable, options: &RegionOptions) -> Result<Self, ConfigError> {
        let mut table = builtin;
        if let Some(extra) = &options.region_table {
            for (name, entry) in &extra.entries {
                table.insert(name.clone(), entry.clone());
            }
        }

        let selected = table.resolve(&options.regions)?;
        let regions = selected
            .iter()
            .map(|(name, region)| {
                Ok(CompiledRegion {
                    name: (*name).to_string(),
                    regex: compile_anchored(&region.pattern, true)?,
                    mask: region.mask.clone(),
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        let classes: Vec<&str> = selected
            .iter()
            .map(|(_, region)| region.valid_chars.as_deref().unwrap_or(DEFAULT_VALID_CHARS))
            .collect();
        let valid_chars = compile_anchored(&classes.join("|"), false)?;

        debug!(
            regions = %options.regions,
            resolved = regions.len(),
            "built region matcher"
        );
        Ok(Self {
            regions,
            valid_chars,
        })
    }

    fn matching<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'a CompiledRegion> {
        self.regions.iter().filter(move |r| r.regex.is_match(text))
    }

    /// Checks the text and applies a mask when requested.
    fn review(&self, text: &str, use_mask: bool) -> Option<String> {
        let mut matches = self.matching(text);
        let first = matches.next()?;
        if !use_mask || matches.next().is_some() {
            return Some(text.to_string());
        }
        Some(
            first
                .mask
                .as_deref()
                .and_then(|mask| apply_mask(mask, text))
                .unwrap_or_else(|| text.to_string()),
        )
    }

    fn is_valid_char(&self, ch: char) -> bool {
        self.valid_chars.is_match(ch.encode_utf8(&mut [0; 4]))
    }
}

/// Fills the digit slots of `mask` with the digits of `text`, when the
/// counts agree.
fn apply_mask(mask: &str, text: &str) -> Option<String> {
    let slots = mask.chars().filter(|&c| c == MASK_DIGIT).count();
    let mut digits = text.chars().filter(char::is_ascii_digit);
    if text.chars().filter(char::is_ascii_digit).count() != slots {
        return None;
    }
    mask.chars()
        .map(|c| if c == MASK_DIGIT { digits.next() } else { Some(c) })
        .collect()
}

// ============================================================================
// MANAGERS
// ============================================================================

static US_PHONE: LazyLock<RegionMatcher> = LazyLock::new(|| {
    RegionMatcher::build(phone_regions(), &RegionOptions::default())
        .expect("built-in phone table resolves")
});

static US_POSTAL: LazyLock<RegionMatcher> = LazyLock::new(|| {
    RegionMatcher::build(postal_regions(), &RegionOptions::default())
        .expect("built-in postal table resolves")
});

macro_rules! region_manager {
    (
        $(#[$meta:meta])*
        $name:ident, tag = $tag:literal, table = $table:ident, default = $default:ident,
        error = ($code:literal, $message:literal)
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name {
            culture: Arc<CultureInfo>,
            options: RegionOptions,
            matcher: RegionMatcher,
        }

        impl $name {
            #[must_use]
            pub fn new(culture: Arc<CultureInfo>) -> Self {
                Self {
                    culture,
                    options: RegionOptions::default(),
                    matcher: $default.clone(),
                }
            }

            /// Resolves and compiles the selected regions.
            pub fn with_options(
                culture: Arc<CultureInfo>,
                options: RegionOptions,
            ) -> Result<Self, ConfigError> {
                let matcher = RegionMatcher::build($table(), &options)?;
                Ok(Self {
                    culture,
                    options,
                    matcher,
                })
            }

            #[must_use]
            pub fn options(&self) -> &RegionOptions {
                &self.options
            }

            /// Names of the regions the text matches.
            pub fn matching_regions<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'a str> {
                self.matcher.matching(text).map(|r| r.name.as_str())
            }
        }

        impl TypeManager for $name {
            fn name(&self) -> &'static str {
                $tag
            }

            fn data_type_name(&self) -> &'static str {
                "string"
            }

            fn culture(&self) -> &CultureInfo {
                &self.culture
            }

            fn parse(&self, text: &str) -> TypeResult<Value> {
                Ok(Value::from(text.trim()))
            }

            fn format(&self, value: &Value) -> TypeResult<String> {
                Ok(text_of(value)?.to_string())
            }

            fn parse_neutral(&self, text: &str) -> TypeResult<Value> {
                self.parse(text)
            }

            fn format_neutral(&self, value: &Value) -> TypeResult<String> {
                self.format(value)
            }

            fn accept_native(&self, value: Value) -> TypeResult<Value> {
                accept_string(value)
            }

            fn review_value(&self, value: Value) -> TypeResult<Value> {
                let text = text_of(&value)?;
                self.matcher
                    .review(text, self.options.format_with_mask)
                    .map(Value::String)
                    .ok_or_else(|| {
                        InputError::new($code, $message)
                            .with_param("regions", self.options.regions.clone())
                            .into()
                    })
            }

            fn is_valid_char(&self, ch: char) -> bool {
                self.matcher.is_valid_char(ch)
            }

            fn compare_native(&self, a: &Value, b: &Value) -> Ordering {
                compare_text(a, b, false)
            }
        }
    };
}

region_manager! {
    /// Phone number manager over [`phone_regions`].
    ///
    /// ```rust
    /// use formtype_types::prelude::*;
    ///
    /// let phone = PhoneNumber::new(CultureInfo::en_us().into());
    /// assert!(phone.to_value_str("(425) 555-0123").is_ok());
    /// assert!(phone.to_value_str("555-0123").is_err());
    /// ```
    PhoneNumber, tag = "PhoneNumber", table = phone_regions, default = US_PHONE,
    error = ("invalid_phone", "Not a valid phone number")
}

region_manager! {
    /// Postal code manager over [`postal_regions`].
    ///
    /// ```rust
    /// use formtype_types::prelude::*;
    ///
    /// let zip = PostalCode::new(CultureInfo::en_us().into());
    /// assert!(zip.to_value_str("98052-6399").is_ok());
    /// assert!(zip.to_value_str("9805").is_err());
    /// ```
    PostalCode, tag = "PostalCode", table = postal_regions, default = US_POSTAL,
    error = ("invalid_postal_code", "Not a valid postal code")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn phone(regions: &str) -> PhoneNumber {
        PhoneNumber::with_options(
            Arc::new(CultureInfo::en_us()),
            RegionOptions {
                regions: regions.into(),
                ..RegionOptions::default()
            },
        )
        .unwrap()
    }

    fn postal(regions: &str) -> PostalCode {
        PostalCode::with_options(
            Arc::new(CultureInfo::en_us()),
            RegionOptions {
                regions: regions.into(),
                ..RegionOptions::default()
            },
        )
        .unwrap()
    }

    #[rstest]
    #[case("UnitedStates", "425-555-0123")]
    #[case("UnitedStates", "+1 (425) 555 0123")]
    #[case("UnitedKingdom", "020 7946 0958")]
    #[case("France", "01 23 45 67 89")]
    #[case("France", "+33 1 23 45 67 89")]
    #[case("Germany", "030 1234567")]
    #[case("Japan", "03-1234-5678")]
    #[case("China", "138 0013 8000")]
    #[case("International", "+44 20 7946 0958")]
    fn phone_numbers(#[case] regions: &str, #[case] text: &str) {
        assert!(phone(regions).to_value_str(text).is_ok(), "{regions}: {text}");
    }

    #[rstest]
    #[case("UnitedStates", "98052")]
    #[case("Canada", "K1A 0B1")]
    #[case("Canada", "k1a0b1")]
    #[case("UnitedKingdom", "SW1A 1AA")]
    #[case("Japan", "100-0001")]
    #[case("Netherlands", "1012 AB")]
    fn postal_codes(#[case] regions: &str, #[case] text: &str) {
        assert!(postal(regions).to_value_str(text).is_ok(), "{regions}: {text}");
    }

    #[test]
    fn mismatch_is_an_input_error() {
        let err = postal("UnitedStates").to_value_str("K1A 0B1").unwrap_err();
        assert_eq!(err.code(), "invalid_postal_code");
        assert_eq!(err.as_input().unwrap().param("regions"), Some("UnitedStates"));
    }

    #[test]
    fn alias_expands_to_both_countries() {
        let manager = postal("NorthAmerica");
        assert!(manager.to_value_str("98052").is_ok());
        assert!(manager.to_value_str("K1A 0B1").is_ok());
        assert_eq!(manager.matching_regions("K1A 0B1").collect::<Vec<_>>(), ["Canada"]);
    }

    #[test]
    fn pipe_lists_combine() {
        let manager = postal("France|Netherlands");
        assert!(manager.to_value_str("75008").is_ok());
        assert!(manager.to_value_str("1012 AB").is_ok());
        assert!(manager.to_value_str("SW1A 1AA").is_err());
        assert!(manager.is_valid_char('B'));
    }

    #[test]
    fn aliases_share_one_pattern() {
        let table = phone_regions();
        let resolved = table.resolve("UnitedStates|Canada").unwrap();
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].0, "NorthAmerica");
    }

    #[test]
    fn unknown_region() {
        let err = PhoneNumber::with_options(
            Arc::new(CultureInfo::en_us()),
            RegionOptions {
                regions: "Atlantis".into(),
                ..RegionOptions::default()
            },
        )
        .unwrap_err();
        assert_eq!(err, ConfigError::UnknownRegion { region: "Atlantis".into() });
    }

    #[test]
    fn alias_cycles_are_rejected() {
        let mut table = RegionTable::new();
        table.insert("A", RegionEntry::alias("B"));
        table.insert("B", RegionEntry::alias("C|A"));
        table.insert("C", RegionEntry::pattern(r"\d", None, None));
        let err = table.resolve("A").unwrap_err();
        assert_eq!(err.code(), "CONFIG_INVALID_OPTION");
    }

    #[test]
    fn mask_reformats_digits() {
        let manager = PhoneNumber::with_options(
            Arc::new(CultureInfo::en_us()),
            RegionOptions {
                format_with_mask: true,
                ..RegionOptions::default()
            },
        )
        .unwrap();
        assert_eq!(
            manager.to_value_str("425.555.0123").unwrap(),
            Value::from("(425) 555-0123")
        );
        assert_eq!(
            manager.to_value_str("+1 425 555 0123").unwrap(),
            Value::from("+1 425 555 0123")
        );
    }

    #[test]
    fn custom_table_entries() {
        let extra: RegionTable =
            serde_json::from_str(r#"{"Local": {"pattern": "\\d{3}-?\\d{4}", "mask": "999-9999"}, "Both": "Local|UnitedStates"}"#)
                .unwrap();
        let manager = PhoneNumber::with_options(
            Arc::new(CultureInfo::en_us()),
            RegionOptions {
                regions: "Both".into(),
                region_table: Some(extra),
                format_with_mask: true,
            },
        )
        .unwrap();
        assert_eq!(manager.to_value_str("5550123").unwrap(), Value::from("555-0123"));
        assert!(manager.to_value_str("425-555-0123").is_ok());
    }

    #[test]
    fn apply_mask_requires_matching_counts() {
        assert_eq!(apply_mask("999-9999", "5550123").as_deref(), Some("555-0123"));
        assert_eq!(apply_mask("999-9999", "555012"), None);
    }
}
