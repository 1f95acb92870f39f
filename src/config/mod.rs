//! # Configuration
//!
//! Settings for the `coinage` binary, read from a TOML file.
//!
//! ```toml
//! [engine]
//! seed_file = "data/seeds/currencies.json"
//! include_builtin = true
//! default_currency = "dollars"
//! default_style = "wordy"
//!
//! [logging]
//! level = "info"
//! file = "coinage.log"
//! ```
//!
//! Every section and key is optional; missing values fall back to
//! [`Config::default`]. Command-line flags take precedence over the file.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::currency::Style;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Extra currencies loaded from a JSON seed file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed_file: Option<String>,
    /// Publish the stock currencies (dollars, pounds sterling, roman) as well.
    pub include_builtin: bool,
    /// Currency used when a command does not name one.
    pub default_currency: String,
    pub default_style: Style,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed_file: None,
            include_builtin: true,
            default_currency: "dollars".to_string(),
            default_style: Style::Wordy,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub engine: EngineConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path.display(), e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path.display(), e))?;

        Ok(config)
    }

    /// Load `path` if it exists, otherwise use defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Create a default configuration file
    pub fn create_default<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        let config = Config {
            engine: EngineConfig {
                seed_file: Some("data/seeds/currencies.json".to_string()),
                ..EngineConfig::default()
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file: Some("coinage.log".to_string()),
            },
        };
        let content = toml::to_string_pretty(&config)
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;

        fs::write(path, content)
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path.display(), e))?;

        Ok(())
    }
}
