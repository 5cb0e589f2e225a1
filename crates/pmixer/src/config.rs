//! pmixer configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use pmixer_core::{VOLUME_NORM, VolumeStep};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// pmixer configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Sound server client settings
    #[serde(default)]
    pub client: ClientConfig,
    /// Volume step settings
    #[serde(default)]
    pub volume: VolumeConfig,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level() }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Sound server client settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    /// Client name shown by the server
    #[serde(default = "default_client_name")]
    pub name: String,
    /// Server address (optional, uses the library default if not set)
    pub server: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { name: default_client_name(), server: None }
    }
}

fn default_client_name() -> String {
    "pmixer".to_string()
}

/// Volume step settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VolumeConfig {
    /// Number of steps between silence and 100%
    #[serde(default = "default_steps")]
    pub steps: u32,
    /// Allow `inc` past 100% up to the server's UI maximum
    #[serde(default = "default_true")]
    pub allow_boost: bool,
}

impl Default for VolumeConfig {
    fn default() -> Self {
        Self { steps: default_steps(), allow_boost: true }
    }
}

fn default_steps() -> u32 {
    pmixer_core::volume::DEFAULT_STEPS
}

fn default_true() -> bool {
    true
}

impl VolumeConfig {
    /// Build the step policy, using `ui_max` as the ceiling when boosting.
    ///
    /// # Errors
    /// Returns an error if `steps` is zero.
    pub fn step(&self, ui_max: u32) -> Result<VolumeStep> {
        let ceiling = if self.allow_boost { ui_max } else { VOLUME_NORM };
        VolumeStep::from_steps(self.steps, ceiling).context("Invalid [volume] configuration")
    }
}

/// Load configuration from `path`, or from the default location.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let config_path = match path {
        Some(path) => path.to_path_buf(),
        None => config_path()?,
    };

    if config_path.exists() {
        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {config_path:?}"))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {config_path:?}"))?;
        Ok(config)
    } else {
        debug!(?config_path, "Config file not found, using defaults");
        Ok(Config::default())
    }
}

/// Get the configuration file path.
fn config_path() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("", "", "pmixer").context("Could not determine config directory")?;
    Ok(dirs.config_dir().join("config.toml"))
}
