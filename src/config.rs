//! Configuration loading and management
//!
//! Handles parsing of `.rollup.toml` configuration files.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::analyzer::PERCENTAGE_PRECISION;

/// File name looked up in the working directory.
pub const CONFIG_FILE: &str = ".rollup.toml";

const MAX_PRECISION: u32 = 6;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Analysis configuration
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Analysis-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Reject cyclic hierarchies before computing stats
    #[serde(default = "default_true")]
    pub validate: bool,
}

fn default_true() -> bool {
    true
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self { validate: true }
    }
}

/// Output-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Decimal places for printed percentages
    #[serde(default = "default_precision")]
    pub precision: u32,
}

fn default_precision() -> u32 {
    PERCENTAGE_PRECISION
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            precision: default_precision(),
        }
    }
}

impl Config {
    /// Load configuration from a `.rollup.toml` file
    pub fn load(path: &Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a directory, or return defaults
    pub fn load_from_dir(dir: &Path) -> Self {
        let config_path = dir.join(CONFIG_FILE);
        if config_path.exists() {
            Self::load(&config_path).unwrap_or_else(|err| {
                tracing::warn!(path = %config_path.display(), error = %err, "ignoring invalid config");
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> crate::error::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn validate(&self) -> crate::error::Result<()> {
        if self.output.precision > MAX_PRECISION {
            return Err(crate::error::Error::InvalidConfig(format!(
                "output.precision must be <= {MAX_PRECISION}"
            )));
        }
        Ok(())
    }
}
