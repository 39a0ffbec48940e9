use serde::{Deserialize, Serialize};

/// Outcome of validating candidate output text against a compiled schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ValidationResult {
    pub const INVALID_JSON: &'static str = "Invalid JSON";
    pub const VALIDATION_FAILED: &'static str = "Validation failed";

    pub fn valid() -> Self {
        Self {
            valid: true,
            error: None,
        }
    }

    pub fn invalid(error: impl Into<String>) -> Self {
        Self {
            valid: false,
            error: Some(error.into()),
        }
    }

    pub fn invalid_json() -> Self {
        Self::invalid(Self::INVALID_JSON)
    }

    pub fn validation_failed() -> Self {
        Self::invalid(Self::VALIDATION_FAILED)
    }
}
