//! Application configuration.
//!
//! Values come from an optional TOML file; command-line flags are applied on
//! top by `main`. Every section may be omitted.
//!
//! ```toml
//! [store]
//! backend = "sqlite"
//! connection_string = "steuer.db"
//!
//! [ai]
//! api_key = "..."
//! model = "gemini-2.5-flash"
//!
//! [wizard]
//! default_year = 2024
//!
//! [logging]
//! level = "info"
//! file = "steuer-wizard.log"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tax_ai::GeminiConfig;
use tax_core::{DEFAULT_TAX_YEAR, StoreConfig, SUPPORTED_TAX_YEARS, is_supported_tax_year};
use thiserror::Error;

/// Environment variables consulted, in order, when no API key is configured.
pub const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub store: StoreSection,
    pub ai: GeminiConfig,
    pub wizard: WizardSection,
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSection {
    pub backend: String,
    pub connection_string: String,
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            backend: "sqlite".to_string(),
            connection_string: "steuer.db".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WizardSection {
    pub default_year: i32,
}

impl Default for WizardSection {
    fn default() -> Self {
        Self {
            default_year: DEFAULT_TAX_YEAR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Any `EnvFilter` directive; `RUST_LOG` wins when set.
    pub level: String,
    pub file: Option<PathBuf>,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
        }
    }
}

impl AppConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Read `path` if given, otherwise start from defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Fill in the API key from the environment when the file has none.
    pub fn apply_env<F>(
        &mut self,
        lookup: F,
    ) where
        F: Fn(&str) -> Option<String>,
    {
        let configured = self
            .ai
            .api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty());
        if configured {
            return;
        }

        self.ai.api_key = API_KEY_VARS
            .iter()
            .find_map(|var| lookup(var).filter(|value| !value.trim().is_empty()));
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store.backend.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "store.backend",
                reason: "must not be empty".to_string(),
            });
        }
        if !is_supported_tax_year(self.wizard.default_year) {
            return Err(ConfigError::Invalid {
                field: "wizard.default_year",
                reason: format!(
                    "{} is not one of {:?}",
                    self.wizard.default_year, SUPPORTED_TAX_YEARS
                ),
            });
        }
        if self.ai.model.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "ai.model",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            backend: self.store.backend.clone(),
            connection_string: self.store.connection_string.clone(),
        }
    }
}
