//! Identifier newtypes shared across Keyward crates.
//!
//! Both identifiers are opaque strings (UUID v4 when minted by Keyward
//! itself); the host may supply its own values when it already tracks
//! tenants or storage units elsewhere.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a tenant. Assigned at creation, immutable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantId(String);

impl TenantId {
    /// Mint a fresh random tenant identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TenantId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for TenantId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for TenantId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Opaque handle to a wallet storage unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WalletId(String);

impl WalletId {
    /// Mint a fresh random wallet identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for WalletId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for WalletId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for WalletId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for WalletId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tenant_ids_are_unique() {
        assert_ne!(TenantId::new(), TenantId::new());
    }

    #[test]
    fn test_id_serde_is_transparent() {
        let id = TenantId::from("tenant-a");
        let yaml = serde_yaml::to_string(&id).unwrap();
        assert_eq!(yaml.trim(), "tenant-a");

        let back: TenantId = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, id);
    }
}
