//! Configuration management for the CLI
//!
//! This module handles loading configuration from:
//! - An explicit `--config` file
//! - A project file in the working directory (`.techform.{toml,yaml,json}`)
//! - The user config directory (`<config_dir>/techform/config.{toml,yaml,json}`)
//! - Default values
//!
//! The first file found wins; command-line flags override its values.

use crate::cli::{ModeArg, OutputFormat};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Project config file names, in lookup order
const PROJECT_CONFIG_FILES: [&str; 4] = [
    ".techform.toml",
    ".techform.yaml",
    ".techform.yml",
    ".techform.json",
];

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,

    /// Validation settings
    pub validation: ValidationSettings,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format
    pub format: OutputFormat,

    /// Use colored output by default
    pub color: bool,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level used when neither `-v` nor `RUST_LOG` is given
    pub level: Option<String>,

    /// Log format (compact, full, json)
    pub format: Option<String>,

    /// Log file path
    pub file: Option<PathBuf>,

    /// Include thread IDs
    pub thread_ids: bool,
}

/// Validation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationSettings {
    /// Mode used when `--mode` is not given
    pub mode: ModeArg,

    /// Maximum number of errors printed per submission (0 = unlimited)
    pub max_errors: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Human,
            color: true,
        }
    }
}

impl Default for ValidationSettings {
    fn default() -> Self {
        Self {
            mode: ModeArg::Strict,
            max_errors: 0,
        }
    }
}

/// On-disk configuration formats, chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Toml,
    Yaml,
    Json,
}

impl FileFormat {
    fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => FileFormat::Yaml,
            Some("json") => FileFormat::Json,
            _ => FileFormat::Toml,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        let config = match FileFormat::from_path(path) {
            FileFormat::Yaml => serde_yaml::from_str(&content)?,
            FileFormat::Json => serde_json::from_str(&content)?,
            FileFormat::Toml => toml::from_str(&content)
                .map_err(|e| Error::config(format!("{}: {}", path.display(), e)))?,
        };

        tracing::debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Load configuration from the default locations
    pub fn load() -> Result<Self> {
        let mut paths = Self::project_config_paths(Path::new("."));
        paths.extend(Self::user_config_paths());

        for path in &paths {
            if path.exists() {
                match Self::from_file(path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable config file");
                    }
                }
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file or the default locations
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        if let Some(path) = file {
            Self::from_file(path)
        } else {
            Self::load()
        }
    }

    /// Project config candidates inside `dir`
    pub fn project_config_paths(dir: &Path) -> Vec<PathBuf> {
        PROJECT_CONFIG_FILES.iter().map(|name| dir.join(name)).collect()
    }

    /// User config candidates
    pub fn user_config_paths() -> Vec<PathBuf> {
        match dirs::config_dir() {
            Some(config_dir) => {
                let techform_dir = config_dir.join("techform");
                vec![
                    techform_dir.join("config.toml"),
                    techform_dir.join("config.yaml"),
                    techform_dir.join("config.json"),
                ]
            }
            None => Vec::new(),
        }
    }

    /// Default path written by `config init`
    pub fn default_project_path() -> PathBuf {
        PathBuf::from(PROJECT_CONFIG_FILES[0])
    }

    /// Render the configuration for display or saving
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Save configuration to a file, formatted by extension
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = match FileFormat::from_path(path) {
            FileFormat::Yaml => serde_yaml::to_string(self)?,
            FileFormat::Json => serde_json::to_string_pretty(self)?,
            FileFormat::Toml => self.to_toml()?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}
