use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

/// Prompt assembly and output-schema validation.
///
/// Prompt Forge renders a structured prompt (role, output schema, few-shot
/// examples, instructions and user input) into one canonical text document,
/// and validates JSON outputs against a schema written in a small,
/// zod-compatible expression language.
#[derive(Parser)]
#[command(
    name = "prompt-forge",
    version,
    about = "Prompt assembly and output-schema validation",
    after_help = "Use 'prompt-forge <command> --help' for more information about a command.",
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Global options available to all subcommands.
#[derive(Args, Debug)]
pub struct GlobalOpts {
    /// Configuration file path [env: PROMPT_FORGE_CONFIG]
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        env = "PROMPT_FORGE_CONFIG"
    )]
    pub config: Option<PathBuf>,

    /// Output format: human (default), json, plain
    #[arg(
        long,
        global = true,
        default_value = "human",
        value_parser = ["human", "json", "plain"]
    )]
    pub format: String,

    /// Increase verbosity (-v, -vv)
    #[arg(short = 'v', long = "verbose", global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all non-error output
    #[arg(short = 'q', long = "quiet", global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output [env: NO_COLOR]
    #[arg(long = "no-color", global = true, env = "NO_COLOR", value_parser = clap::builder::FalseyValueParser::new())]
    pub no_color: bool,
}

/// Top-level subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Scaffold a new prompt workspace
    Init(InitArgs),

    /// Compile schema files and report diagnostics
    Check(CheckArgs),

    /// Validate JSON values against a schema
    Validate(ValidateArgs),

    /// List the top-level fields of a schema
    Fields(FieldsArgs),

    /// Render a prompt file into the canonical prompt text
    Assemble(AssembleArgs),

    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

/// Arguments for `prompt-forge init`.
#[derive(Args)]
pub struct InitArgs {
    /// Workspace name (becomes directory name)
    pub name: String,

    /// Write into the directory even if it already exists
    #[arg(short = 'f', long = "force")]
    pub force: bool,

    /// Skip interactive prompts, use defaults
    #[arg(short = 'y', long = "yes")]
    pub yes: bool,
}

/// Arguments for `prompt-forge check`.
#[derive(Args)]
pub struct CheckArgs {
    /// Schema files or directories (default: the configured schema directory)
    pub paths: Vec<PathBuf>,

    /// Print each schema in canonical form
    #[arg(long = "print")]
    pub print: bool,

    /// Print each schema's top-level fields
    #[arg(long = "fields")]
    pub fields: bool,
}

/// Arguments for `prompt-forge validate`.
#[derive(Args)]
pub struct ValidateArgs {
    /// Schema file to validate against
    #[arg(short = 's', long = "schema")]
    pub schema: PathBuf,

    /// Inline JSON value to validate
    #[arg(long = "value", conflicts_with = "files")]
    pub value: Option<String>,

    /// Files holding JSON values (stdin when neither files nor --value are given)
    pub files: Vec<PathBuf>,
}

/// Arguments for `prompt-forge fields`.
#[derive(Args)]
pub struct FieldsArgs {
    /// Schema file to inspect
    pub schema: PathBuf,
}

/// Arguments for `prompt-forge assemble`.
#[derive(Args)]
pub struct AssembleArgs {
    /// Prompt file (TOML or JSON)
    pub prompt_file: PathBuf,

    /// User input as `key=value`, or a bare value for the default field
    #[arg(short = 'i', long = "input", value_name = "[KEY=]VALUE")]
    pub inputs: Vec<String>,

    /// Write the prompt to a file instead of stdout
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Skip validating example outputs against the schema
    #[arg(long = "no-check-examples")]
    pub no_check_examples: bool,
}

/// Arguments for `prompt-forge completions`.
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_parser = ["bash", "zsh", "fish", "powershell", "elvish"])]
    pub shell: String,
}
