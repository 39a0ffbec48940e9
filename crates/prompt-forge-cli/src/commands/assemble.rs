use std::path::{Path, PathBuf};

use prompt_forge_core::types::{ExamplePair, PromptSpec, UserInput, VersionContent};
use prompt_forge_dsl::ExampleCheck;
use serde::Deserialize;

use crate::cli::AssembleArgs;
use crate::config::CliConfig;
use crate::error::CliError;
use crate::output::{example_checks_json, OutputContext, OutputMode};

use super::read_file;

/// On-disk prompt: a version's content plus optional default inputs.
#[derive(Debug, Default, Deserialize)]
struct PromptFile {
    #[serde(default)]
    agent_role: String,
    #[serde(default)]
    schema: String,
    #[serde(default)]
    examples: Vec<ExamplePair>,
    #[serde(default)]
    instructions: String,
    #[serde(default)]
    inputs: UserInput,
}

impl PromptFile {
    fn into_parts(self) -> (VersionContent, UserInput) {
        let content = VersionContent {
            agent_role: self.agent_role,
            schema: self.schema,
            examples: self.examples,
            instructions: self.instructions,
        };
        (content, self.inputs)
    }
}

/// Run the `assemble` command: render a prompt file into prompt text.
pub fn run(args: AssembleArgs, config: &CliConfig, output: &OutputContext) -> Result<(), CliError> {
    let prompt = load_prompt_file(&args.prompt_file)?;
    let (content, mut user_input) = prompt.into_parts();
    user_input.merge(parse_inputs(
        &args.inputs,
        &config.assemble.default_input_field,
    ));

    let check = config.assemble.check_examples && !args.no_check_examples;
    let checks = if check {
        check_examples(&content, output)
    } else {
        Vec::new()
    };

    let spec = PromptSpec::from_version(&content, user_input);
    let text = prompt_forge_core::assemble(&spec);
    tracing::debug!(bytes = text.len(), examples = spec.examples.len(), "assembled prompt");

    if let Some(path) = &args.output {
        std::fs::write(path, &text).map_err(|e| CliError::Io {
            path: path.clone(),
            source: e,
        })?;
    }

    match output.mode {
        OutputMode::Json => {
            let mut json = serde_json::json!({ "examples": example_checks_json(&checks) });
            match &args.output {
                Some(path) => json["output"] = serde_json::json!(path.display().to_string()),
                None => json["prompt"] = serde_json::Value::String(text),
            }
            output.print_json(&json);
        }
        OutputMode::Human | OutputMode::Plain => match &args.output {
            Some(path) => output.success(&format!("Wrote prompt to {}", path.display())),
            None => println!("{text}"),
        },
    }

    Ok(())
}

/// Load a prompt file; `.json` files are JSON, anything else is TOML.
fn load_prompt_file(path: &Path) -> Result<PromptFile, CliError> {
    let text = read_file(path)?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let parsed = if is_json {
        serde_json::from_str(&text).map_err(|e| e.to_string())
    } else {
        toml::from_str(&text).map_err(|e| e.to_string())
    };
    parsed.map_err(|message| CliError::PromptFile {
        path: PathBuf::from(path),
        message,
    })
}

/// Parse `--input` values. `key=value` sets a named field; anything else
/// (including a value whose text before `=` is not a plain key) sets
/// `default_field`.
fn parse_inputs(raw: &[String], default_field: &str) -> UserInput {
    raw.iter()
        .map(|item| match item.split_once('=') {
            Some((key, value)) if is_input_key(key) => (key.to_string(), value.to_string()),
            _ => (default_field.to_string(), item.clone()),
        })
        .collect()
}

fn is_input_key(key: &str) -> bool {
    !key.is_empty() && !key.chars().any(char::is_whitespace)
}

/// Validate example outputs, warning about each failure without blocking.
fn check_examples(content: &VersionContent, output: &OutputContext) -> Vec<ExampleCheck> {
    if content.schema.trim().is_empty() || content.examples.is_empty() {
        return Vec::new();
    }
    let Some(validator) = prompt_forge_dsl::compile(&content.schema) else {
        output.warn("schema does not compile; skipping example checks");
        return Vec::new();
    };

    let checks = prompt_forge_dsl::check_examples(Some(&validator), &content.examples);
    output.example_checks(&checks);
    checks
}
