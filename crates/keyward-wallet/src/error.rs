//! Error types for wallet storage and provisioning.

use thiserror::Error;

/// Errors that can occur while provisioning or opening wallet storage.
#[derive(Debug, Error)]
pub enum WalletError {
    /// The external wallet store is unreachable, failed internally, or
    /// timed out. The caller may retry after backoff; no partial state
    /// was left behind.
    #[error("wallet store unavailable: {0}")]
    StorageUnavailable(String),

    /// No wallet key was supplied where one is required to open storage.
    #[error("wallet key required")]
    WalletKeyRequired,

    /// A supplied wallet key does not match the stored or recorded key
    /// material.
    #[error("wallet key does not match")]
    WalletKeyMismatch,

    /// A wallet key was supplied for a tenant that does not use one.
    #[error("wallet key provided but not needed")]
    UnneededWalletKey,
}
