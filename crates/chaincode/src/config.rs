//! Harness configuration (`simpleapp.toml`)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// `--config` names a file that does not exist
    #[error("config file not found: {0}")]
    NotFound(String),

    /// The config file exists but could not be read
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),

    /// Not valid TOML, or a field has the wrong type
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Parsed, but unusable (empty MSP id or state path)
    #[error("invalid config: {0}")]
    Validation(String),
}

/// Top-level harness configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub state: StateConfig,
    pub identity: IdentityConfig,
    pub logging: LoggingConfig,
}

/// Where the world state is persisted between runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StateConfig {
    pub path: PathBuf,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/world_state.json"),
        }
    }
}

/// Caller identity presented to the contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    pub msp_id: String,
    /// PEM certificate of the caller
    pub cert_path: Option<PathBuf>,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            msp_id: "Org0MSP".to_string(),
            cert_path: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)?;
        Self::load_str(&content)
    }

    /// Load configuration from string
    pub fn load_str(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.identity.msp_id.trim().is_empty() {
            return Err(ConfigError::Validation(
                "identity.msp_id must not be empty".to_string(),
            ));
        }
        if self.state.path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "state.path must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
