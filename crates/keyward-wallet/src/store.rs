//! Wallet store abstraction.
//!
//! The store owns the actual encrypted storage engine and is supplied by
//! the host. Keyward only drives its lifecycle primitives.

use crate::error::WalletError;
use crate::key::{KeyVerifier, WalletKey};
use async_trait::async_trait;
use keyward_core::WalletId;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Trait for wallet storage backends.
#[async_trait]
pub trait WalletStore: Send + Sync {
    /// Create a new storage unit. When a key is supplied it becomes the
    /// unit's opening material.
    async fn create_wallet(
        &self,
        label: &str,
        key: Option<&WalletKey>,
    ) -> Result<WalletId, WalletError>;

    /// Open an existing storage unit for use.
    async fn open_wallet(&self, id: &WalletId, key: Option<&WalletKey>)
    -> Result<(), WalletError>;

    /// Check a key against the unit's key material without opening it.
    async fn verify_wallet_key(&self, id: &WalletId, key: &WalletKey)
    -> Result<bool, WalletError>;

    /// Destroy a storage unit and its contents.
    async fn delete_wallet(&self, id: &WalletId) -> Result<(), WalletError>;
}

struct StoredWallet {
    label: String,
    verifier: Option<KeyVerifier>,
}

/// In-memory wallet store for tests and local development.
///
/// Keeps only labels and key verifiers; there is no storage engine behind
/// it.
#[derive(Default)]
pub struct InMemoryWalletStore {
    wallets: RwLock<HashMap<WalletId, StoredWallet>>,
}

impl InMemoryWalletStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of storage units currently held.
    pub async fn wallet_count(&self) -> usize {
        self.wallets.read().await.len()
    }
}

#[async_trait]
impl WalletStore for InMemoryWalletStore {
    async fn create_wallet(
        &self,
        label: &str,
        key: Option<&WalletKey>,
    ) -> Result<WalletId, WalletError> {
        let id = WalletId::new();
        let wallet = StoredWallet {
            label: label.to_string(),
            verifier: key.map(KeyVerifier::for_key),
        };
        self.wallets.write().await.insert(id.clone(), wallet);
        tracing::debug!(wallet = %id, label, "wallet created");
        Ok(id)
    }

    async fn open_wallet(
        &self,
        id: &WalletId,
        key: Option<&WalletKey>,
    ) -> Result<(), WalletError> {
        let wallets = self.wallets.read().await;
        let wallet = wallets
            .get(id)
            .ok_or_else(|| WalletError::StorageUnavailable(format!("unknown wallet {id}")))?;

        match (&wallet.verifier, key) {
            (Some(verifier), Some(key)) => {
                if !verifier.verify(key) {
                    return Err(WalletError::WalletKeyMismatch);
                }
            }
            (Some(_), None) => return Err(WalletError::WalletKeyRequired),
            // A keyless unit opens regardless of what was supplied
            (None, _) => {}
        }

        tracing::debug!(wallet = %id, label = %wallet.label, "wallet opened");
        Ok(())
    }

    async fn verify_wallet_key(
        &self,
        id: &WalletId,
        key: &WalletKey,
    ) -> Result<bool, WalletError> {
        let wallets = self.wallets.read().await;
        let wallet = wallets
            .get(id)
            .ok_or_else(|| WalletError::StorageUnavailable(format!("unknown wallet {id}")))?;
        Ok(wallet
            .verifier
            .as_ref()
            .map(|v| v.verify(key))
            .unwrap_or(false))
    }

    async fn delete_wallet(&self, id: &WalletId) -> Result<(), WalletError> {
        self.wallets
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| WalletError::StorageUnavailable(format!("unknown wallet {id}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_open_delete() {
        let store = InMemoryWalletStore::new();
        let key = WalletKey::new("k1");

        let id = store.create_wallet("alice", Some(&key)).await.unwrap();
        assert_eq!(store.wallet_count().await, 1);

        store.open_wallet(&id, Some(&key)).await.unwrap();
        store.delete_wallet(&id).await.unwrap();
        assert_eq!(store.wallet_count().await, 0);
    }

    #[tokio::test]
    async fn test_open_with_wrong_key() {
        let store = InMemoryWalletStore::new();
        let id = store
            .create_wallet("alice", Some(&WalletKey::new("k1")))
            .await
            .unwrap();

        let err = store
            .open_wallet(&id, Some(&WalletKey::new("wrong")))
            .await
            .unwrap_err();
        assert!(matches!(err, WalletError::WalletKeyMismatch));
    }

    #[tokio::test]
    async fn test_open_keyed_wallet_without_key() {
        let store = InMemoryWalletStore::new();
        let id = store
            .create_wallet("alice", Some(&WalletKey::new("k1")))
            .await
            .unwrap();

        let err = store.open_wallet(&id, None).await.unwrap_err();
        assert!(matches!(err, WalletError::WalletKeyRequired));
    }

    #[tokio::test]
    async fn test_unknown_wallet_is_unavailable() {
        let store = InMemoryWalletStore::new();
        let err = store.open_wallet(&WalletId::new(), None).await.unwrap_err();
        assert!(matches!(err, WalletError::StorageUnavailable(_)));
    }

    #[tokio::test]
    async fn test_verify_key() {
        let store = InMemoryWalletStore::new();
        let key = WalletKey::new("k1");
        let id = store.create_wallet("alice", Some(&key)).await.unwrap();

        assert!(store.verify_wallet_key(&id, &key).await.unwrap());
        assert!(
            !store
                .verify_wallet_key(&id, &WalletKey::new("wrong"))
                .await
                .unwrap()
        );
    }
}
