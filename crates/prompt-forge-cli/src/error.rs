use std::path::PathBuf;

use prompt_forge_dsl::DslError;

/// Exit codes for the CLI process.
///
/// - 0: success
/// - 1: general error
/// - 2: invalid arguments / usage error
/// - 3: schema parse error
/// - 4: candidate output failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(dead_code)]
pub enum ExitCode {
    Success = 0,
    GeneralError = 1,
    InvalidArguments = 2,
    ParseError = 3,
    ValidationFailed = 4,
}

/// Errors returned by CLI command handlers.
///
/// Each variant maps to an `ExitCode` and can produce structured
/// output in JSON mode.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Schema source that does not compile.
    #[error("parse errors in {file}")]
    Parse {
        errors: Vec<DslError>,
        source_text: String,
        file: PathBuf,
    },

    /// One or more candidates did not satisfy the schema.
    #[error("{invalid} of {total} value(s) failed validation")]
    ValidationFailed { invalid: usize, total: usize },

    /// IO errors (file not found, permission denied).
    #[error("IO error for {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Configuration errors.
    #[error("configuration error: {message}")]
    Config { message: String },

    /// A prompt file that is not valid TOML or JSON prompt content.
    #[error("invalid prompt file {path}: {message}")]
    PromptFile { path: PathBuf, message: String },

    /// A malformed command-line argument value.
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// User cancelled operation.
    #[error("operation cancelled")]
    Cancelled,

    /// Schema file or directory not found.
    #[error("no schema files found in {path}")]
    NoSchemaFiles { path: PathBuf },

    /// Directory already exists (init without --force).
    #[error("directory '{path}' already exists (use --force to overwrite)")]
    DirectoryExists { path: PathBuf },

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl CliError {
    /// Maps this error to the appropriate exit code.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::Parse { .. } => ExitCode::ParseError,
            Self::ValidationFailed { .. } => ExitCode::ValidationFailed,
            Self::Config { .. }
            | Self::NoSchemaFiles { .. }
            | Self::InvalidArgument { .. }
            | Self::PromptFile { .. } => ExitCode::InvalidArguments,
            Self::Io { .. } | Self::Cancelled | Self::DirectoryExists { .. } | Self::Other(_) => {
                ExitCode::GeneralError
            }
        }
    }

    /// Serializes this error as a JSON value for `--format json` output.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Parse { errors, file, .. } => {
                let error_list: Vec<serde_json::Value> = errors
                    .iter()
                    .map(|e| {
                        serde_json::json!({
                            "message": e.to_string(),
                            "span": e.span().map(|s| serde_json::json!([s.start, s.end])),
                        })
                    })
                    .collect();
                serde_json::json!({
                    "error": "parse_error",
                    "file": file.display().to_string(),
                    "errors": error_list,
                })
            }
            Self::ValidationFailed { invalid, total } => serde_json::json!({
                "error": "validation_failed",
                "invalid": invalid,
                "total": total,
            }),
            Self::Io { path, source } => serde_json::json!({
                "error": "io_error",
                "path": path.display().to_string(),
                "message": source.to_string(),
            }),
            Self::Config { message } => serde_json::json!({
                "error": "config_error",
                "message": message,
            }),
            Self::PromptFile { path, message } => serde_json::json!({
                "error": "prompt_file_error",
                "path": path.display().to_string(),
                "message": message,
            }),
            other => serde_json::json!({
                "error": "error",
                "message": other.to_string(),
            }),
        }
    }
}
