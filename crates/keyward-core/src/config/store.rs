//! External wallet store settings.

use super::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Settings for calls into the external wallet store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Upper bound on any single store call, in seconds. A call that runs
    /// past this fails as storage-unavailable with no partial state.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl StoreConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::Config(
                "store.timeout_secs must be a positive integer".to_string(),
            ));
        }
        Ok(())
    }

    /// The configured timeout as a concrete duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
