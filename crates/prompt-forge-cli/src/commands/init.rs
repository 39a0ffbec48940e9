use std::fs;
use std::path::{Path, PathBuf};

use console::Term;
use prompt_forge_core::types::DEFAULT_SCHEMA;

use crate::cli::InitArgs;
use crate::error::CliError;
use crate::output::{OutputContext, OutputMode};

const EXAMPLE_PROMPT: &str = r#"# Render with: prompt-forge assemble prompts/example.toml --input "..."
agent_role = "You are a concise technical writer."

schema = """
z.object({
  result: z.string(),
  confidence: z.number().min(0).max(1).optional(),
})
"""

instructions = "Answer in one sentence. Respond with JSON only."

[[examples]]
input = "What does a compiler do?"
output = '{"result": "It translates source code into a lower-level form.", "confidence": 0.9}'

[inputs]
input = ""
"#;

const CONFIG: &str = r#"[cli]
default_schema_dir = "schemas/"
schema_extension = "schema"

[assemble]
check_examples = true
default_input_field = "input"
"#;

/// Run the `init` command: scaffold a new prompt workspace.
pub fn run(args: InitArgs, output: &OutputContext) -> Result<(), CliError> {
    let project_dir = PathBuf::from(&args.name);

    if project_dir.exists() && !args.force {
        if args.yes || !Term::stderr().is_term() || output.mode != OutputMode::Human {
            return Err(CliError::DirectoryExists { path: project_dir });
        }
        let confirm = dialoguer::Confirm::new()
            .with_prompt(format!(
                "'{}' already exists. Write scaffold files into it?",
                project_dir.display()
            ))
            .default(false)
            .interact()
            .map_err(|_| CliError::Cancelled)?;
        if !confirm {
            return Err(CliError::Cancelled);
        }
    }

    create_project_structure(&project_dir)?;
    tracing::debug!(path = %project_dir.display(), "scaffolded workspace");

    match output.mode {
        OutputMode::Human => {
            output.success(&format!("Created prompt workspace '{}'.", args.name));
            println!();
            print_project_tree(&project_dir);
            println!();
            println!("Next steps:");
            println!("  cd {}", args.name);
            println!("  prompt-forge check                                  Compile schemas");
            println!("  prompt-forge assemble prompts/example.toml -i \"...\"  Render a prompt");
        }
        OutputMode::Json => {
            let json = serde_json::json!({
                "project": args.name,
                "path": project_dir.display().to_string(),
                "files": ["config.toml", "schemas/result.schema", "prompts/example.toml"],
            });
            output.print_json(&json);
        }
        OutputMode::Plain => {
            println!("{}\t{}", args.name, project_dir.display());
        }
    }

    Ok(())
}

fn create_project_structure(project_dir: &Path) -> Result<(), CliError> {
    create_dir(project_dir)?;
    create_dir(&project_dir.join("schemas"))?;
    create_dir(&project_dir.join("prompts"))?;

    write_file(&project_dir.join("config.toml"), CONFIG)?;
    write_file(
        &project_dir.join("schemas/result.schema"),
        &format!("{DEFAULT_SCHEMA}\n"),
    )?;
    write_file(&project_dir.join("prompts/example.toml"), EXAMPLE_PROMPT)
}

fn create_dir(path: &Path) -> Result<(), CliError> {
    fs::create_dir_all(path).map_err(|e| CliError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

fn write_file(path: &Path, content: &str) -> Result<(), CliError> {
    fs::write(path, content).map_err(|e| CliError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

fn print_project_tree(project_dir: &Path) {
    println!("  {}/", project_dir.display());
    println!("    config.toml");
    println!("    schemas/");
    println!("      result.schema");
    println!("    prompts/");
    println!("      example.toml");
}
