//! Configuration types for the Keyward multitenant token manager.
//!
//! The whole configuration surface is read once at startup (typically from
//! a `keyward.yaml` file), validated, and passed immutably into the manager
//! facade. There is no ambient global state; changing the configuration
//! requires a restart and never retroactively alters already-issued tokens.

pub mod errors;
pub mod expiry;
pub mod manager;
pub mod signing;
pub mod store;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub use errors::ErrorsConfig;
pub use expiry::{ExpiryUnit, TokenExpiryConfig};
pub use manager::{ManagerConfig, WalletStrategyKind};
pub use signing::{SigningAlgorithm, SigningConfig};
pub use store::StoreConfig;

/// Complete Keyward configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeywardConfig {
    /// Project name.
    #[serde(default)]
    pub project: Option<String>,

    /// Configuration version.
    #[serde(default)]
    pub version: Option<String>,

    /// Manager settings: strategy selection and wallet-key checking.
    #[serde(default)]
    pub manager: ManagerConfig,

    /// Token expiry settings.
    #[serde(default)]
    pub token_expiry: TokenExpiryConfig,

    /// Error behavior toggles.
    #[serde(default)]
    pub errors: ErrorsConfig,

    /// Signing secret resolution and algorithm.
    #[serde(default)]
    pub signing: SigningConfig,

    /// External wallet store settings.
    #[serde(default)]
    pub store: StoreConfig,
}

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl KeywardConfig {
    /// Load configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML content.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints that serde defaults cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.token_expiry.validate()?;
        self.store.validate()?;
        Ok(())
    }
}
