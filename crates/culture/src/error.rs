/// Error type for culture lookup and culture record validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CultureError {
    /// No culture with the given name (or language prefix) is registered.
    #[error("unknown culture `{name}`")]
    UnknownCulture { name: String },

    /// A culture record is internally inconsistent.
    #[error("invalid culture `{name}`: {reason}")]
    InvalidCulture { name: String, reason: String },

    /// A culture record could not be deserialized.
    #[error("culture deserialization failed: {error}")]
    Deserialization { error: String },
}

impl CultureError {
    /// Machine-readable error code for programmatic handling.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::UnknownCulture { .. } => "CULTURE_UNKNOWN",
            Self::InvalidCulture { .. } => "CULTURE_INVALID",
            Self::Deserialization { .. } => "CULTURE_DESER",
        }
    }
}
