//! Email addresses, one or a delimited list.

use std::cmp::Ordering;
use std::sync::{Arc, OnceLock};

use formtype_culture::CultureInfo;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{accept_string, compare_text, text_of};
use crate::{ConfigError, InputError, TypeManager, TypeResult, Value};

const LOCAL_PART: &str = r"[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*";
const LABEL: &str = r"[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?";
const OCTET: &str = r"(?:25[0-5]|2[0-4]\d|1?\d?\d)";

/// Alternation of the allowed top level domains, or any 2 to 63 letters.
pub(crate) fn tld_pattern(allowed: &[String]) -> String {
    if allowed.is_empty() {
        "[A-Za-z]{2,63}".to_string()
    } else {
        let names: Vec<String> = allowed
            .iter()
            .map(|tld| regex::escape(tld.trim_start_matches('.')))
            .collect();
        format!("(?:{})", names.join("|"))
    }
}

/// Dotted-quad IPv4 address.
pub(crate) fn ipv4_pattern() -> String {
    format!(r"{OCTET}(?:\.{OCTET}){{3}}")
}

/// Domain labels ending in a top level domain.
pub(crate) fn domain_pattern(allowed_tlds: &[String], require_tld: bool) -> String {
    let tld = tld_pattern(allowed_tlds);
    if require_tld {
        format!(r"(?:{LABEL}\.)+{tld}")
    } else {
        format!(r"(?:(?:{LABEL}\.)+{tld}|{LABEL})")
    }
}

/// Options for [`Email`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct EmailOptions {
    /// Accept a delimited list of addresses.
    pub multiple: bool,
    /// List separator; surrounding whitespace is tolerated.
    pub delimiter: String,
    /// Accept `user@[10.0.0.1]` and `user@10.0.0.1`.
    #[serde(rename = "allowIPDomain")]
    pub allow_ip_domain: bool,
    /// Accepted top level domains; empty accepts any.
    pub allow_top_level_domains: Vec<String>,
    /// Reject a domain made of a single label.
    #[serde(rename = "requireTLD")]
    pub require_tld: bool,
}

impl Default for EmailOptions {
    fn default() -> Self {
        Self {
            multiple: false,
            delimiter: ";".into(),
            allow_ip_domain: false,
            allow_top_level_domains: Vec::new(),
            require_tld: true,
        }
    }
}

/// Email address manager.
///
/// ```rust
/// use formtype_types::prelude::*;
///
/// let email = Email::new(CultureInfo::en_us().into());
/// assert!(email.to_value_str("jo.smith@example.com").is_ok());
/// assert!(email.to_value_str("jo.smith@example").is_err());
/// ```
#[derive(Debug)]
pub struct Email {
    culture: Arc<CultureInfo>,
    options: EmailOptions,
    address: OnceLock<Result<Regex, ConfigError>>,
    delimiter: OnceLock<Result<Regex, ConfigError>>,
}

impl Email {
    #[must_use]
    pub fn new(culture: Arc<CultureInfo>) -> Self {
        Self {
            culture,
            options: EmailOptions::default(),
            address: OnceLock::new(),
            delimiter: OnceLock::new(),
        }
    }

    /// Fails when `multiple` is set with a blank delimiter.
    pub fn with_options(culture: Arc<CultureInfo>, options: EmailOptions) -> Result<Self, ConfigError> {
        if options.multiple && options.delimiter.trim().is_empty() {
            return Err(ConfigError::invalid_option("delimiter", "must not be blank"));
        }
        Ok(Self {
            culture,
            options,
            address: OnceLock::new(),
            delimiter: OnceLock::new(),
        })
    }

    #[must_use]
    pub fn options(&self) -> &EmailOptions {
        &self.options
    }

    fn address(&self) -> Result<&Regex, ConfigError> {
        self.address
            .get_or_init(|| {
                let options = &self.options;
                let mut domain =
                    domain_pattern(&options.allow_top_level_domains, options.require_tld);
                if options.allow_ip_domain {
                    let ip = ipv4_pattern();
                    domain = format!(r"(?:{domain}|{ip}|\[{ip}\])");
                }
                let pattern = format!("^{LOCAL_PART}@{domain}$");
                debug!(%pattern, "compiling email pattern");
                Regex::new(&pattern).map_err(|e| ConfigError::invalid_pattern(&pattern, &e))
            })
            .as_ref()
            .map_err(Clone::clone)
    }

    fn delimiter(&self) -> Result<&Regex, ConfigError> {
        self.delimiter
            .get_or_init(|| {
                let pattern = format!(r"\s*{}\s*", regex::escape(self.options.delimiter.trim()));
                Regex::new(&pattern).map_err(|e| ConfigError::invalid_pattern(&pattern, &e))
            })
            .as_ref()
            .map_err(Clone::clone)
    }

    fn check(&self, address: &str) -> TypeResult<()> {
        if self.address()?.is_match(address) {
            Ok(())
        } else {
            Err(InputError::new("invalid_email", "Not a valid email address")
                .with_param("address", address.to_string())
                .into())
        }
    }
}

impl TypeManager for Email {
    fn name(&self) -> &'static str {
        "Email"
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
        if self.options.multiple {
            let mut addresses: Vec<&str> = self.delimiter()?.split(text).collect();
            // one closing delimiter is allowed
            if addresses.len() > 1 && addresses.last().is_some_and(|a| a.trim().is_empty()) {
                addresses.pop();
            }
            for address in addresses {
                self.check(address)?;
            }
        } else {
            self.check(text)?;
        }
        Ok(value)
    }

    fn is_valid_char(&self, ch: char) -> bool {
        !ch.is_control() && (self.options.multiple || !ch.is_whitespace())
    }

    fn compare_native(&self, a: &Value, b: &Value) -> Ordering {
        compare_text(a, b, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn email(options: EmailOptions) -> Email {
        Email::with_options(Arc::new(CultureInfo::en_us()), options).unwrap()
    }

    #[rstest]
    #[case("a@b.com")]
    #[case("first.last+tag@mail.example.co.uk")]
    #[case("o'brien@example.ie")]
    #[case(" padded@example.org ")]
    fn accepts(#[case] text: &str) {
        assert!(email(EmailOptions::default()).to_value_str(text).is_ok());
    }

    #[rstest]
    #[case("plain")]
    #[case("a@b")]
    #[case("a@@b.com")]
    #[case("a@b.c")]
    #[case(".a@b.com")]
    #[case("a b@c.com")]
    #[case("a@-b.com")]
    #[case("a@10.0.0.1")]
    fn rejects(#[case] text: &str) {
        let err = email(EmailOptions::default()).to_value_str(text).unwrap_err();
        assert_eq!(err.code(), "invalid_email");
    }

    #[test]
    fn ip_domains_when_allowed() {
        let manager = email(EmailOptions {
            allow_ip_domain: true,
            ..EmailOptions::default()
        });
        assert!(manager.to_value_str("a@10.0.0.1").is_ok());
        assert!(manager.to_value_str("a@[192.168.1.20]").is_ok());
        assert!(manager.to_value_str("a@256.0.0.1").is_err());
    }

    #[test]
    fn restricted_top_level_domains() {
        let manager = email(EmailOptions {
            allow_top_level_domains: vec!["com".into(), ".org".into()],
            ..EmailOptions::default()
        });
        assert!(manager.to_value_str("a@b.com").is_ok());
        assert!(manager.to_value_str("a@b.org").is_ok());
        assert!(manager.to_value_str("a@b.net").is_err());
    }

    #[test]
    fn single_label_without_tld_requirement() {
        let manager = email(EmailOptions {
            require_tld: false,
            ..EmailOptions::default()
        });
        assert!(manager.to_value_str("root@localhost").is_ok());
    }

    #[test]
    fn delimited_lists() {
        let manager = email(EmailOptions {
            multiple: true,
            delimiter: "; ".into(),
            ..EmailOptions::default()
        });
        assert!(manager.to_value_str("a@b.com; c@d.org").is_ok());
        assert!(manager.to_value_str("a@b.com;c@d.org ;e@f.net;").is_ok());
        let err = manager.to_value_str("a@b.com, c@d.org").unwrap_err();
        assert!(err.is_input());
    }

    #[rstest]
    #[case("a@b.com;;c@d.org")]
    #[case("a@b.com; ;c@d.org")]
    #[case(";a@b.com")]
    #[case("a@b.com;;")]
    fn empty_list_entries_are_invalid(#[case] text: &str) {
        let manager = email(EmailOptions {
            multiple: true,
            ..EmailOptions::default()
        });
        let err = manager.to_value_str(text).unwrap_err();
        assert_eq!(err.code(), "invalid_email");
    }

    #[test]
    fn single_address_rejects_lists() {
        assert!(
            email(EmailOptions::default())
                .to_value_str("a@b.com; c@d.org")
                .is_err()
        );
    }

    #[test]
    fn blank_delimiter_is_a_config_error() {
        let err = Email::with_options(
            Arc::new(CultureInfo::en_us()),
            EmailOptions {
                multiple: true,
                delimiter: "  ".into(),
                ..EmailOptions::default()
            },
        )
        .unwrap_err();
        assert_eq!(err.code(), "CONFIG_INVALID_OPTION");
    }
}
