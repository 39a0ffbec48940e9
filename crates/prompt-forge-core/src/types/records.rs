use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::example_pair::ExamplePair;
use super::model_id::{ModelId, SettingKey};
use super::record_id::{ProjectId, PromptId, ResultId, VersionId};
use super::user_input::UserInput;
use crate::slug::slugify;

/// Schema source given to versions created from scratch.
pub const DEFAULT_SCHEMA: &str = "z.object({\n  result: z.string(),\n})";

/// A top-level container for related prompts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: ProjectId::new(),
            slug: slugify(&name),
            name,
            created_at: Utc::now(),
        }
    }
}

/// A named prompt belonging to a [`Project`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    pub id: PromptId,
    pub project_id: ProjectId,
    pub name: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
}

impl Prompt {
    pub fn new(project_id: ProjectId, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: PromptId::new(),
            project_id,
            slug: slugify(&name),
            name,
            created_at: Utc::now(),
        }
    }
}

/// The editable, Version-shaped payload the core consumes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionContent {
    #[serde(default)]
    pub agent_role: String,
    #[serde(default)]
    pub schema: String,
    #[serde(default)]
    pub examples: Vec<ExamplePair>,
    #[serde(default)]
    pub instructions: String,
}

impl VersionContent {
    /// Content for a brand-new version: the default schema and nothing else.
    pub fn initial() -> Self {
        Self {
            schema: DEFAULT_SCHEMA.to_string(),
            ..Self::default()
        }
    }

    pub fn apply(&mut self, update: VersionUpdate) {
        if let Some(schema) = update.schema {
            self.schema = schema;
        }
        if let Some(examples) = update.examples {
            self.examples = examples;
        }
        if let Some(instructions) = update.instructions {
            self.instructions = instructions;
        }
        if let Some(agent_role) = update.agent_role {
            self.agent_role = agent_role;
        }
    }
}

/// Partial update of a version's mutable fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub examples: Option<Vec<ExamplePair>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_role: Option<String>,
}

impl VersionUpdate {
    pub fn is_empty(&self) -> bool {
        self.schema.is_none()
            && self.examples.is_none()
            && self.instructions.is_none()
            && self.agent_role.is_none()
    }
}

/// A numbered snapshot of a prompt's configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    pub id: VersionId,
    pub prompt_id: PromptId,
    pub version_number: u32,
    #[serde(flatten)]
    pub content: VersionContent,
    pub created_at: DateTime<Utc>,
}

impl Version {
    /// Creates a version numbered one past `latest`, forking `from` when given.
    ///
    /// Forked examples receive fresh ids.
    pub fn next(prompt_id: PromptId, latest: u32, from: Option<&VersionContent>) -> Self {
        let content = match from {
            Some(source) => VersionContent {
                examples: source.examples.iter().map(ExamplePair::reissued).collect(),
                ..source.clone()
            },
            None => VersionContent::initial(),
        };
        Self {
            id: VersionId::new(),
            prompt_id,
            version_number: latest + 1,
            content,
            created_at: Utc::now(),
        }
    }
}

/// Output of running a version against a model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunResult {
    pub id: ResultId,
    pub version_id: VersionId,
    pub input_values: UserInput,
    pub model: ModelId,
    pub output: String,
    pub created_at: DateTime<Utc>,
}

impl RunResult {
    pub fn new(
        version_id: VersionId,
        input_values: UserInput,
        model: ModelId,
        output: impl Into<String>,
    ) -> Self {
        Self {
            id: ResultId::new(),
            version_id,
            input_values,
            model,
            output: output.into(),
            created_at: Utc::now(),
        }
    }
}

/// A stored key/value setting such as an API key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Setting {
    pub key: SettingKey,
    pub value: String,
}
