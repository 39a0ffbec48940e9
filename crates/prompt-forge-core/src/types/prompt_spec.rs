use serde::{Deserialize, Serialize};

use super::example_pair::ExamplePair;
use super::records::VersionContent;
use super::user_input::UserInput;

/// Structured input to prompt assembly. Built fresh for every assembly call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptSpec {
    #[serde(default)]
    pub agent_role: String,
    #[serde(default)]
    pub schema_source: String,
    #[serde(default)]
    pub examples: Vec<ExamplePair>,
    #[serde(default)]
    pub instructions: String,
    #[serde(default)]
    pub user_input: UserInput,
}

impl PromptSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bridges a stored version's content and live user input into a spec.
    pub fn from_version(content: &VersionContent, user_input: UserInput) -> Self {
        Self {
            agent_role: content.agent_role.clone(),
            schema_source: content.schema.clone(),
            examples: content.examples.clone(),
            instructions: content.instructions.clone(),
            user_input,
        }
    }

    pub fn with_agent_role(mut self, role: impl Into<String>) -> Self {
        self.agent_role = role.into();
        self
    }

    pub fn with_schema(mut self, source: impl Into<String>) -> Self {
        self.schema_source = source.into();
        self
    }

    pub fn with_example(mut self, example: ExamplePair) -> Self {
        self.examples.push(example);
        self
    }

    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = instructions.into();
        self
    }

    pub fn with_input(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.user_input.set(key, value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_fields() {
        let spec = PromptSpec::new()
            .with_agent_role("role")
            .with_schema("string()")
            .with_example(ExamplePair::new("a", "b"))
            .with_instructions("do it")
            .with_input("input", "x");
        assert_eq!(spec.agent_role, "role");
        assert_eq!(spec.schema_source, "string()");
        assert_eq!(spec.examples.len(), 1);
        assert_eq!(spec.instructions, "do it");
        assert_eq!(spec.user_input.get("input"), Some("x"));
    }

    #[test]
    fn from_version_copies_content() {
        let content = VersionContent {
            agent_role: "Editor".into(),
            schema: "object({ a: string() })".into(),
            examples: vec![ExamplePair::new("q", "{\"a\":\"x\"}")],
            instructions: "Be brief".into(),
        };
        let spec = PromptSpec::from_version(&content, UserInput::single("text"));
        assert_eq!(spec.agent_role, "Editor");
        assert_eq!(spec.schema_source, content.schema);
        assert_eq!(spec.examples, content.examples);
        assert_eq!(spec.user_input.get("input"), Some("text"));
    }
}
