//! Manager configuration: strategy selection and wallet-key checking.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which wallet provisioning strategy the manager runs with.
///
/// A closed set chosen by configuration; there is no runtime class
/// loading. Adding a variant means adding a strategy implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WalletStrategyKind {
    /// One dedicated storage unit per tenant.
    MultiWallet,
    /// One process-wide storage unit shared by all tenants.
    SingleWallet,
}

impl fmt::Display for WalletStrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MultiWallet => f.write_str("multi_wallet"),
            Self::SingleWallet => f.write_str("single_wallet"),
        }
    }
}

/// Manager-level settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManagerConfig {
    /// Strategy variant in use.
    #[serde(default = "default_strategy")]
    pub strategy: WalletStrategyKind,

    /// Verify any provided wallet key against stored or generated key
    /// material, even when the strategy would not need it to open storage.
    #[serde(default = "default_true")]
    pub always_check_provided_wallet_key: bool,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            strategy: default_strategy(),
            always_check_provided_wallet_key: true,
        }
    }
}

fn default_strategy() -> WalletStrategyKind {
    WalletStrategyKind::MultiWallet
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_parses_snake_case() {
        let kind: WalletStrategyKind = serde_yaml::from_str("single_wallet").unwrap();
        assert_eq!(kind, WalletStrategyKind::SingleWallet);
        assert_eq!(kind.to_string(), "single_wallet");
    }
}
