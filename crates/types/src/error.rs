//! Error taxonomy for type managers
//!
//! Two tiers:
//!
//! - [`InputError`]: the user typed something that cannot be converted
//!   (bad format, out of range, pattern mismatch). Always recoverable; the
//!   condition engine turns it into a failed or cannot-evaluate result.
//! - [`ConfigError`]: the programmer configured something impossible
//!   (bad option value, unknown region, wrong native type). Surfaces
//!   immediately and is never swallowed by conditions.
//!
//! [`TypeError`] joins both for operations that can raise either.

use std::borrow::Cow;

use formtype_culture::CultureError;

// ============================================================================
// INPUT ERROR
// ============================================================================

/// A user-correctable conversion failure.
///
/// Uses `Cow<'static, str>` so static codes and messages do not allocate.
///
/// # Examples
///
/// ```rust
/// use formtype_types::InputError;
///
/// let error = InputError::new("out_of_range", "Value is too large")
///     .with_param("max", "2147483647");
/// assert_eq!(error.code, "out_of_range");
/// assert_eq!(error.param("max"), Some("2147483647"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct InputError {
    /// Stable identifier for programmatic handling (`invalid_format`,
    /// `cc_checksum`, ...).
    pub code: Cow<'static, str>,
    /// Default English message.
    pub message: Cow<'static, str>,
    /// Ordered message parameters.
    pub params: Vec<(Cow<'static, str>, Cow<'static, str>)>,
}

impl InputError {
    /// Creates a new input error with a code and message.
    pub fn new(code: impl Into<Cow<'static, str>>, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            params: Vec::new(),
        }
    }

    /// Adds a parameter to the error.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_param(
        mut self,
        key: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Looks up a parameter value by key.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v.as_ref())
    }

    /// The input could not be read in the expected format.
    pub fn invalid_format(type_name: &str) -> Self {
        Self::new("invalid_format", format!("Not a valid {type_name} value"))
            .with_param("type", type_name.to_string())
    }

    /// The value converted but is outside the permitted range.
    pub fn out_of_range(min: impl ToString, max: impl ToString) -> Self {
        let (min, max) = (min.to_string(), max.to_string());
        Self::new(
            "out_of_range",
            format!("Value must be between {min} and {max}"),
        )
        .with_param("min", min)
        .with_param("max", max)
    }
}

// ============================================================================
// CONFIG ERROR
// ============================================================================

/// A programmer misconfiguration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// An option holds an illegal value.
    #[error("invalid option `{option}`: {reason}")]
    InvalidOption { option: String, reason: String },

    /// No type manager is registered under the tag.
    #[error("unknown type manager `{tag}`")]
    UnknownTypeManager { tag: String },

    /// A region name does not exist in the region table.
    #[error("unknown region `{region}`")]
    UnknownRegion { region: String },

    /// A regular expression failed to compile.
    #[error("invalid pattern `{pattern}`: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// A native value of the wrong kind was handed to a type manager.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: String, actual: String },

    /// Option record could not be deserialized.
    #[error("options for `{tag}` could not be read: {error}")]
    Deserialization { tag: String, error: String },

    /// Culture lookup or validation failed.
    #[error(transparent)]
    Culture(#[from] CultureError),
}

impl ConfigError {
    /// Shorthand for [`ConfigError::InvalidOption`].
    pub fn invalid_option(option: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidOption {
            option: option.into(),
            reason: reason.into(),
        }
    }

    /// Wraps a regex compile failure.
    pub fn invalid_pattern(pattern: &str, error: &regex::Error) -> Self {
        Self::InvalidPattern {
            pattern: pattern.to_string(),
            reason: error.to_string(),
        }
    }

    /// Machine-readable error code for programmatic handling.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::InvalidOption { .. } => "CONFIG_INVALID_OPTION",
            Self::UnknownTypeManager { .. } => "CONFIG_UNKNOWN_TYPE",
            Self::UnknownRegion { .. } => "CONFIG_UNKNOWN_REGION",
            Self::InvalidPattern { .. } => "CONFIG_INVALID_PATTERN",
            Self::TypeMismatch { .. } => "CONFIG_TYPE_MISMATCH",
            Self::Deserialization { .. } => "CONFIG_DESER",
            Self::Culture(_) => "CONFIG_CULTURE",
        }
    }
}

// ============================================================================
// TYPE ERROR
// ============================================================================

/// Either tier of failure, returned by every conversion path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl TypeError {
    /// Returns true for user-correctable failures.
    #[must_use]
    pub fn is_input(&self) -> bool {
        matches!(self, Self::Input(_))
    }

    /// The input error, if this is one.
    #[must_use]
    pub fn as_input(&self) -> Option<&InputError> {
        match self {
            Self::Input(e) => Some(e),
            Self::Config(_) => None,
        }
    }

    /// The error code of either tier.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::Input(e) => &e.code,
            Self::Config(e) => e.code(),
        }
    }
}

/// Result alias used by type manager operations.
pub type TypeResult<T> = Result<T, TypeError>;
