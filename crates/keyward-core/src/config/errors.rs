//! Error behavior toggles.

use serde::{Deserialize, Serialize};

/// Configurable error behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorsConfig {
    /// Fail a request that supplies a wallet key the tenant does not need.
    /// When false the key is ignored and the request proceeds.
    #[serde(default = "default_true")]
    pub on_unneeded_wallet_key: bool,
}

impl Default for ErrorsConfig {
    fn default() -> Self {
        Self {
            on_unneeded_wallet_key: true,
        }
    }
}

fn default_true() -> bool {
    true
}
