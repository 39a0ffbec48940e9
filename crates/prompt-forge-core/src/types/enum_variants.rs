use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CoreError;

/// A non-empty, deduplicated list of string values accepted by an `enum` node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumVariants(Vec<String>);

impl EnumVariants {
    /// Creates a new `EnumVariants`, rejecting an empty list and duplicates.
    pub fn new(variants: Vec<String>) -> Result<Self, CoreError> {
        if variants.is_empty() {
            return Err(CoreError::EmptyEnumVariants);
        }
        let mut seen = HashSet::with_capacity(variants.len());
        for v in &variants {
            if !seen.insert(v.as_str()) {
                return Err(CoreError::DuplicateEnumVariant(v.clone()));
            }
        }
        Ok(Self(variants))
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always returns false (guaranteed non-empty by construction).
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn contains(&self, value: &str) -> bool {
        self.0.iter().any(|v| v == value)
    }

    /// Renders the variants as `'a' | 'b' | 'c'` for diagnostics.
    pub fn expected_list(&self) -> String {
        self.0
            .iter()
            .map(|v| format!("'{v}'"))
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

impl fmt::Display for EnumVariants {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.join(", "))
    }
}

impl Serialize for EnumVariants {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for EnumVariants {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let variants = Vec::<String>::deserialize(deserializer)?;
        Self::new(variants).map_err(serde::de::Error::custom)
    }
}
