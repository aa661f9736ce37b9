use std::path::{Path, PathBuf};

use dbml_dsl::ParseOptions;
use serde::{Deserialize, Serialize};

use crate::error::CliError;

/// CLI configuration loaded from `dbml.toml`.
///
/// Top-level `strict` and `[type_aliases]` feed the parser directly.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CliConfig {
    #[serde(flatten)]
    pub parse: ParseOptions,
    #[serde(default)]
    pub cli: CliSettings,
}

/// CLI-specific settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliSettings {
    #[serde(default = "default_schema_dir")]
    pub default_schema_dir: String,
}

impl Default for CliSettings {
    fn default() -> Self {
        Self {
            default_schema_dir: default_schema_dir(),
        }
    }
}

fn default_schema_dir() -> String {
    "schemas/".to_string()
}

impl CliConfig {
    /// Parser options from the config file, overlaid with command-line flags.
    ///
    /// Flag aliases win over file aliases; `--strict` can only turn strict on.
    pub fn parse_options(&self, aliases: &[(String, String)], strict: bool) -> ParseOptions {
        let mut options = self.parse.clone().strict(self.parse.strict || strict);
        for (from, to) in aliases {
            options = options.with_type_alias(from.clone(), to.clone());
        }
        options
    }

    /// The paths to read: the given ones, or the configured schema directory.
    pub fn schema_paths(&self, paths: &[PathBuf]) -> Vec<PathBuf> {
        if paths.is_empty() {
            vec![PathBuf::from(&self.cli.default_schema_dir)]
        } else {
            paths.to_vec()
        }
    }
}

/// Discovery order for config file:
/// 1. `--config <path>` (explicit)
/// 2. `DBML_CONFIG` env var
/// 3. `./dbml.toml` (project-local)
/// 4. `$XDG_CONFIG_HOME/dbml/config.toml`
/// 5. `~/.config/dbml/config.toml`
pub fn load_config(explicit_path: Option<&Path>) -> Result<CliConfig, CliError> {
    if let Some(path) = explicit_path {
        return load_config_from_path(path);
    }

    if let Ok(env_path) = std::env::var("DBML_CONFIG") {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return load_config_from_path(&path);
        }
    }

    let local = PathBuf::from("dbml.toml");
    if local.exists() {
        return load_config_from_path(&local);
    }

    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
        let path = PathBuf::from(xdg).join("dbml/config.toml");
        if path.exists() {
            return load_config_from_path(&path);
        }
    }

    if let Some(home) = std::env::var_os("HOME") {
        let path = PathBuf::from(home).join(".config/dbml/config.toml");
        if path.exists() {
            return load_config_from_path(&path);
        }
    }

    tracing::debug!("no config file found; using defaults");
    Ok(CliConfig::default())
}

fn load_config_from_path(path: &Path) -> Result<CliConfig, CliError> {
    tracing::debug!(path = %path.display(), "loading config");
    let contents = std::fs::read_to_string(path).map_err(|e| CliError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&contents).map_err(|e| CliError::Config {
        message: format!("failed to parse {}: {}", path.display(), e),
    })
}
