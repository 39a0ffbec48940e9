use std::fmt;
use std::str::FromStr;

use mti::prelude::{MagicTypeId, MagicTypeIdExt, V7};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CoreError;

/// Declares a TypeID-based record identifier with a fixed prefix.
macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(MagicTypeId);

        impl $name {
            pub const PREFIX: &'static str = $prefix;

            /// Generates a new random id using UUIDv7.
            pub fn new() -> Self {
                Self(Self::PREFIX.create_type_id::<V7>())
            }

            /// Parses an id from its string representation, validating the prefix.
            pub fn parse(s: &str) -> Result<Self, CoreError> {
                let id = MagicTypeId::from_str(s).map_err(|e| CoreError::InvalidRecordId {
                    expected_prefix: Self::PREFIX.to_string(),
                    reason: e.to_string(),
                })?;
                if id.prefix().as_str() != Self::PREFIX {
                    return Err(CoreError::InvalidRecordId {
                        expected_prefix: Self::PREFIX.to_string(),
                        reason: format!("got prefix '{}'", id.prefix().as_str()),
                    });
                }
                Ok(Self(id))
            }

            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.0.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                Self::parse(&s).map_err(serde::de::Error::custom)
            }
        }
    };
}

record_id!(
    /// Identifier of a [`Project`](super::Project), prefix `project`.
    ProjectId,
    "project"
);
record_id!(
    /// Identifier of a [`Prompt`](super::Prompt), prefix `prompt`.
    PromptId,
    "prompt"
);
record_id!(
    /// Identifier of a [`Version`](super::Version), prefix `version`.
    VersionId,
    "version"
);
record_id!(
    /// Identifier of a [`RunResult`](super::RunResult), prefix `result`.
    ResultId,
    "result"
);
