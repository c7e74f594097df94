use anyhow::{Context, Result};
use config::{Config as ConfigBuilder, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = "gopkg.toml";
pub const ENV_PREFIX: &str = "GOPKG";

/// Main configuration structure for gopkg-rewrite
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub rewrite: RewriteSettings,
    pub logging: LoggingConfig,
}

/// Uncompiled rewrite settings as they appear in files, env and flags
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RewriteSettings {
    /// Regex the package name must match; its groups feed the template
    pub package: String,
    /// Template rendered into the `go_package` value
    pub go_package: String,
    /// Treat files without a package directive as errors
    pub require_package: bool,
    /// File name suffix selecting schema files
    pub extension: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for RewriteSettings {
    fn default() -> Self {
        Self {
            package: "(.*)".to_string(),
            go_package: "github.com/example/example/{{index . 1}}".to_string(),
            require_package: false,
            extension: ".proto".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "compact".to_string(), // pretty, json, compact
        }
    }
}

impl Config {
    /// Load configuration from multiple sources with precedence:
    /// 1. Environment variables (GOPKG__*)
    /// 2. gopkg.toml file (if exists)
    /// 3. Default values
    pub fn load() -> Result<Self> {
        Self::load_from_dir(&std::env::current_dir()?)
    }

    /// Load configuration, looking for gopkg.toml in a specific directory
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let config_file = dir.join(CONFIG_FILE_NAME);
        Self::build(config_file.exists().then_some(config_file.as_path()))
    }

    /// Load configuration from an explicit file, which must exist
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.is_file() {
            anyhow::bail!("Config file not found: {}", path.display());
        }
        Self::build(Some(path))
    }

    fn build(config_file: Option<&Path>) -> Result<Self> {
        let mut builder = ConfigBuilder::builder();

        if let Some(config_file) = config_file {
            builder = builder.add_source(File::from(config_file));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize::<Config>()
            .context("Failed to deserialize configuration")
    }
}
