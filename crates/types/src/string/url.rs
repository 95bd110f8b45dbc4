//! Web addresses.

use std::cmp::Ordering;
use std::sync::{Arc, OnceLock};

use formtype_culture::CultureInfo;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::email::{domain_pattern, ipv4_pattern};
use super::{accept_string, compare_text, text_of};
use crate::{ConfigError, InputError, TypeManager, TypeResult, Value};

/// Options for [`Url`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct UrlOptions {
    /// Accepted schemes, without `://`.
    pub schemes: Vec<String>,
    pub require_scheme: bool,
    #[serde(rename = "allowIPDomain")]
    pub allow_ip_domain: bool,
    pub allow_localhost: bool,
    pub allow_port: bool,
    /// Accept a path, query or fragment after the host.
    pub allow_path: bool,
    /// Accepted top level domains; empty accepts any.
    pub allow_top_level_domains: Vec<String>,
}

impl Default for UrlOptions {
    fn default() -> Self {
        Self {
            schemes: vec!["http".into(), "https".into()],
            require_scheme: true,
            allow_ip_domain: true,
            allow_localhost: false,
            allow_port: true,
            allow_path: true,
            allow_top_level_domains: Vec::new(),
        }
    }
}

/// URL manager.
///
/// ```rust
/// use formtype_types::prelude::*;
///
/// let url = Url::new(CultureInfo::en_us().into());
/// assert!(url.to_value_str("https://example.com/a?b=c").is_ok());
/// assert!(url.to_value_str("example.com").is_err());
/// ```
#[derive(Debug)]
pub struct Url {
    culture: Arc<CultureInfo>,
    options: UrlOptions,
    regex: OnceLock<Result<Regex, ConfigError>>,
}

impl Url {
    #[must_use]
    pub fn new(culture: Arc<CultureInfo>) -> Self {
        Self {
            culture,
            options: UrlOptions::default(),
            regex: OnceLock::new(),
        }
    }

    /// Fails when a scheme is required but none are listed.
    pub fn with_options(culture: Arc<CultureInfo>, options: UrlOptions) -> Result<Self, ConfigError> {
        if options.require_scheme && options.schemes.is_empty() {
            return Err(ConfigError::invalid_option("schemes", "at least one scheme is required"));
        }
        Ok(Self {
            culture,
            options,
            regex: OnceLock::new(),
        })
    }

    #[must_use]
    pub fn options(&self) -> &UrlOptions {
        &self.options
    }

    fn build_pattern(&self) -> String {
        let options = &self.options;
        let schemes: Vec<String> = options.schemes.iter().map(|s| regex::escape(s)).collect();
        let scheme = match (schemes.is_empty(), options.require_scheme) {
            (true, _) => String::new(),
            (false, true) => format!("(?:{})://", schemes.join("|")),
            (false, false) => format!("(?:(?:{})://)?", schemes.join("|")),
        };

        let mut hosts = vec![domain_pattern(&options.allow_top_level_domains, true)];
        if options.allow_ip_domain {
            hosts.push(ipv4_pattern());
        }
        if options.allow_localhost {
            hosts.push("localhost".into());
        }
        let host = format!("(?:{})", hosts.join("|"));

        let port = if options.allow_port { r"(?::\d{1,5})?" } else { "" };
        let path = if options.allow_path { r"(?:[/?#]\S*)?" } else { "/?" };
        format!("^{scheme}{host}{port}{path}$")
    }

    fn regex(&self) -> Result<&Regex, ConfigError> {
        self.regex
            .get_or_init(|| {
                let pattern = self.build_pattern();
                debug!(%pattern, "compiling url pattern");
                RegexBuilder::new(&pattern)
                    .case_insensitive(true)
                    .build()
                    .map_err(|e| ConfigError::invalid_pattern(&pattern, &e))
            })
            .as_ref()
            .map_err(Clone::clone)
    }
}

impl TypeManager for Url {
    fn name(&self) -> &'static str {
        "Url"
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
        if !self.regex()?.is_match(text_of(&value)?) {
            return Err(InputError::new("invalid_url", "Not a valid web address").into());
        }
        Ok(value)
    }

    fn is_valid_char(&self, ch: char) -> bool {
        !ch.is_control() && !ch.is_whitespace()
    }

    fn compare_native(&self, a: &Value, b: &Value) -> Ordering {
        compare_text(a, b, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn url(options: UrlOptions) -> Url {
        Url::with_options(Arc::new(CultureInfo::en_us()), options).unwrap()
    }

    #[rstest]
    #[case("http://example.com")]
    #[case("HTTPS://Example.COM/")]
    #[case("https://sub.example.co.uk:8443/path/to?q=1#top")]
    #[case("http://192.168.0.1/admin")]
    fn accepts(#[case] text: &str) {
        assert!(url(UrlOptions::default()).to_value_str(text).is_ok());
    }

    #[rstest]
    #[case("example.com")]
    #[case("ftp://example.com")]
    #[case("http://")]
    #[case("http://localhost")]
    #[case("http://exa mple.com")]
    #[case("http://example.com:123456")]
    fn rejects(#[case] text: &str) {
        let err = url(UrlOptions::default()).to_value_str(text).unwrap_err();
        assert_eq!(err.code(), "invalid_url");
    }

    #[test]
    fn optional_scheme_and_localhost() {
        let manager = url(UrlOptions {
            require_scheme: false,
            allow_localhost: true,
            ..UrlOptions::default()
        });
        assert!(manager.to_value_str("example.com/a").is_ok());
        assert!(manager.to_value_str("http://localhost:3000").is_ok());
    }

    #[test]
    fn restrictions() {
        let manager = url(UrlOptions {
            schemes: vec!["ftp".into()],
            allow_ip_domain: false,
            allow_port: false,
            allow_path: false,
            ..UrlOptions::default()
        });
        assert!(manager.to_value_str("ftp://files.example.com").is_ok());
        assert!(manager.to_value_str("ftp://files.example.com/").is_ok());
        assert!(manager.to_value_str("ftp://files.example.com/pub").is_err());
        assert!(manager.to_value_str("ftp://files.example.com:21").is_err());
        assert!(manager.to_value_str("ftp://10.0.0.1").is_err());
    }

    #[test]
    fn scheme_list_required() {
        let err = Url::with_options(
            Arc::new(CultureInfo::en_us()),
            UrlOptions {
                schemes: Vec::new(),
                ..UrlOptions::default()
            },
        )
        .unwrap_err();
        assert_eq!(err.code(), "CONFIG_INVALID_OPTION");
    }
}
