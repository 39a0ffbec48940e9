mod constraints;
mod enum_variants;
mod example_pair;
mod issue;
mod literal_value;
mod model_id;
mod object_shape;
mod prompt_spec;
mod record_id;
mod records;
mod schema_node;
mod user_input;
mod validation_result;

pub use constraints::{Bound, LengthChecks, NumberChecks, StringChecks, StringFormat};
pub use enum_variants::EnumVariants;
pub use example_pair::{ExampleId, ExamplePair};
pub use issue::{Issue, IssuePath, PathSegment};
pub use literal_value::{format_number, LiteralValue};
pub use model_id::{ModelId, Provider, SettingKey};
pub use object_shape::{ObjectShape, ShapeField, UnknownKeys};
pub use prompt_spec::PromptSpec;
pub use record_id::{ProjectId, PromptId, ResultId, VersionId};
pub use records::{
    Project, Prompt, RunResult, Setting, Version, VersionContent, VersionUpdate, DEFAULT_SCHEMA,
};
pub use schema_node::{NodeKind, SchemaNode};
pub use user_input::UserInput;
pub use validation_result::ValidationResult;
