use std::fmt;

/// Errors that occur when constructing or validating core types.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CoreError {
    /// A record identifier failed to parse or carried the wrong prefix.
    InvalidRecordId { expected_prefix: String, reason: String },
    /// Model identifier is not in the registry.
    UnknownModel(String),
    /// Setting key is not one of the recognized keys.
    UnknownSettingKey(String),
    /// Enum variants list was empty.
    EmptyEnumVariants,
    /// Duplicate enum variant found.
    DuplicateEnumVariant(String),
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRecordId {
                expected_prefix,
                reason,
            } => {
                write!(f, "invalid {expected_prefix} id: {reason}")
            }
            Self::UnknownModel(m) => {
                write!(
                    f,
                    "unknown model '{m}': expected one of gemini-2.5-flash, gpt-4o-mini"
                )
            }
            Self::UnknownSettingKey(k) => {
                write!(
                    f,
                    "unknown setting key '{k}': expected openai_api_key or gemini_api_key"
                )
            }
            Self::EmptyEnumVariants => write!(f, "enum variants must not be empty"),
            Self::DuplicateEnumVariant(v) => write!(f, "duplicate enum variant '{v}'"),
        }
    }
}

impl std::error::Error for CoreError {}
