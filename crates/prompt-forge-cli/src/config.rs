use std::path::{Path, PathBuf};

use prompt_forge_core::types::UserInput;
use serde::{Deserialize, Serialize};

use crate::error::CliError;

/// CLI configuration loaded from config.toml.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CliConfig {
    #[serde(default)]
    pub cli: CliSettings,
    #[serde(default)]
    pub assemble: AssembleSettings,
}

/// Where schema files live.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliSettings {
    #[serde(default = "default_schema_dir")]
    pub default_schema_dir: String,
    #[serde(default = "default_schema_extension")]
    pub schema_extension: String,
}

impl Default for CliSettings {
    fn default() -> Self {
        Self {
            default_schema_dir: default_schema_dir(),
            schema_extension: default_schema_extension(),
        }
    }
}

/// Defaults for `prompt-forge assemble`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssembleSettings {
    #[serde(default = "default_true")]
    pub check_examples: bool,
    #[serde(default = "default_input_field")]
    pub default_input_field: String,
}

impl Default for AssembleSettings {
    fn default() -> Self {
        Self {
            check_examples: true,
            default_input_field: default_input_field(),
        }
    }
}

fn default_schema_dir() -> String {
    "schemas/".to_string()
}

fn default_schema_extension() -> String {
    "schema".to_string()
}

fn default_true() -> bool {
    true
}

fn default_input_field() -> String {
    UserInput::DEFAULT_FIELD.to_string()
}

/// Discovery order for config file:
/// 1. `--config <path>` (explicit)
/// 2. `PROMPT_FORGE_CONFIG` env var
/// 3. `./config.toml` (project-local)
/// 4. `$XDG_CONFIG_HOME/prompt-forge/config.toml`
/// 5. `~/.config/prompt-forge/config.toml`
pub fn load_config(explicit_path: Option<&Path>) -> Result<CliConfig, CliError> {
    if let Some(path) = explicit_path {
        return load_config_from_path(path);
    }

    if let Ok(env_path) = std::env::var("PROMPT_FORGE_CONFIG") {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return load_config_from_path(&path);
        }
    }

    let local = PathBuf::from("config.toml");
    if local.exists() {
        return load_config_from_path(&local);
    }

    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
        let path = PathBuf::from(xdg).join("prompt-forge/config.toml");
        if path.exists() {
            return load_config_from_path(&path);
        }
    }

    if let Some(home) = std::env::var_os("HOME") {
        let path = PathBuf::from(home).join(".config/prompt-forge/config.toml");
        if path.exists() {
            return load_config_from_path(&path);
        }
    }

    tracing::debug!("no config file found, using defaults");
    Ok(CliConfig::default())
}

fn load_config_from_path(path: &Path) -> Result<CliConfig, CliError> {
    let contents = std::fs::read_to_string(path).map_err(|e| CliError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let config = toml::from_str(&contents).map_err(|e| CliError::Config {
        message: format!("failed to parse {}: {}", path.display(), e),
    })?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}
