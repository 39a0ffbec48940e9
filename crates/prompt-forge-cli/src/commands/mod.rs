pub mod assemble;
pub mod check;
pub mod completions;
pub mod fields;
pub mod init;
pub mod validate;

use std::path::{Path, PathBuf};

use prompt_forge_dsl::CompiledValidator;

use crate::error::CliError;

/// Read a file to a string, mapping failures to `CliError::Io`.
pub fn read_file(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|e| CliError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Compile a schema file, keeping the diagnostics for rendering.
pub fn compile_schema_file(path: &Path) -> Result<CompiledValidator, CliError> {
    let source_text = read_file(path)?;
    prompt_forge_dsl::try_compile(&source_text).map_err(|errors| CliError::Parse {
        errors,
        source_text,
        file: path.to_path_buf(),
    })
}

/// Discover schema files from a list of paths.
///
/// Paths can be files (used directly) or directories (searched recursively
/// for files matching `**/*.<extension>`).
pub fn discover_schema_files(paths: &[PathBuf], extension: &str) -> Result<Vec<PathBuf>, CliError> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            files.push(path.clone());
        } else if path.is_dir() {
            let pattern = format!("{}/**/*.{extension}", path.display());
            let entries = glob::glob(&pattern).map_err(|e| CliError::Other(e.to_string()))?;
            for entry in entries {
                let entry = entry.map_err(|e| CliError::Other(e.to_string()))?;
                files.push(entry);
            }
        } else {
            return Err(CliError::NoSchemaFiles { path: path.clone() });
        }
    }

    if files.is_empty() {
        let display_path = paths
            .first()
            .cloned()
            .unwrap_or_else(|| PathBuf::from("schemas/"));
        return Err(CliError::NoSchemaFiles { path: display_path });
    }

    files.sort();
    files.dedup();
    tracing::debug!(count = files.len(), "discovered schema files");
    Ok(files)
}
