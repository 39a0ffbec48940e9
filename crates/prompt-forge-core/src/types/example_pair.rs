use std::fmt;

use mti::prelude::{MagicTypeIdExt, V7};
use serde::{Deserialize, Serialize};

/// Caller-assigned, opaque identifier of an example pair.
///
/// Used for keying and removal only; the assembler never reads it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExampleId(String);

impl ExampleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Mints a fresh `example_…` TypeID.
    pub fn generate() -> Self {
        Self("example".create_type_id::<V7>().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ExampleId {
    fn default() -> Self {
        Self::generate()
    }
}

impl fmt::Display for ExampleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A few-shot example: sample input plus the output the model is expected to produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamplePair {
    #[serde(default)]
    pub id: ExampleId,
    #[serde(default)]
    pub input: String,
    #[serde(default)]
    pub output: String,
}

impl ExamplePair {
    pub fn new(input: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            id: ExampleId::generate(),
            input: input.into(),
            output: output.into(),
        }
    }

    /// A new example with empty input and output.
    pub fn blank() -> Self {
        Self::new("", "")
    }

    /// True when both input and output are empty after trimming.
    pub fn is_blank(&self) -> bool {
        self.input.trim().is_empty() && self.output.trim().is_empty()
    }

    /// Copy with a freshly minted id.
    pub fn reissued(&self) -> Self {
        Self {
            id: ExampleId::generate(),
            ..self.clone()
        }
    }
}
