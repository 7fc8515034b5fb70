//! Error type for manager operations.

use keyward_core::TenantId;
use keyward_token::TokenError;
use keyward_wallet::WalletError;
use thiserror::Error;

/// Errors surfaced by the manager facade.
#[derive(Debug, Error)]
pub enum ManagerError {
    /// The tenant id is unknown, or the tenant has been removed.
    #[error("tenant not found: {0}")]
    TenantNotFound(TenantId),

    /// Wallet storage or key admission failure.
    #[error(transparent)]
    Wallet(#[from] WalletError),

    /// Token signing or verification failure.
    #[error(transparent)]
    Token(#[from] TokenError),
}

impl ManagerError {
    /// Whether the caller may retry the operation after backoff.
    ///
    /// Only storage unavailability is retryable; every other failure is
    /// deterministic for the same inputs.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Wallet(WalletError::StorageUnavailable(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_storage_unavailable_is_retryable() {
        assert!(ManagerError::from(WalletError::StorageUnavailable("down".into())).is_retryable());
        assert!(!ManagerError::from(WalletError::WalletKeyMismatch).is_retryable());
        assert!(!ManagerError::TenantNotFound(TenantId::new()).is_retryable());
    }
}
