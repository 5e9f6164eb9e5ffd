//! Configuration loading and typed config structures for a game session.
//!
//! The configuration lives in `heterotroph-config.yaml` next to the binary's
//! working directory. Every field has a default, so an empty or missing file
//! yields a playable setup.

use std::path::Path;

use heterotroph_types::{ScenarioId, TransferPolicy};
use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level game configuration.
///
/// Mirrors the structure of `heterotroph-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GameConfig {
    /// Rule set selection.
    #[serde(default)]
    pub rules: RulesConfig,

    /// Session driver settings.
    #[serde(default)]
    pub session: SessionConfig,
}

impl GameConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// An empty document yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }
}

/// Which transfer rules a game plays by.
///
/// The two policies are alternatives; a game never mixes them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct RulesConfig {
    /// Transfer and upkeep policy.
    #[serde(default)]
    pub policy: TransferPolicy,
}

/// Settings for the command-driven session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SessionConfig {
    /// Scenario the driver starts before running a script.
    #[serde(default = "default_scenario")]
    pub default_scenario: ScenarioId,

    /// Upper bound on turns a scripted session may advance.
    #[serde(default = "default_max_turns")]
    pub max_turns: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_scenario: default_scenario(),
            max_turns: default_max_turns(),
        }
    }
}

const fn default_scenario() -> ScenarioId {
    ScenarioId::UnlimitedOxygen
}

const fn default_max_turns() -> u64 {
    200
}
