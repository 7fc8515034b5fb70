//! Wallet provisioning strategies.
//!
//! A strategy decides which physical storage unit backs a tenant: a
//! dedicated unit per tenant, or one shared unit for the whole process.
//! Every call into the external store is bounded by the configured
//! timeout; a timeout surfaces as storage-unavailable with no partial
//! state.

use crate::error::WalletError;
use crate::key::WalletKey;
use crate::store::WalletStore;
use async_trait::async_trait;
use keyward_core::{WalletId, WalletStrategyKind};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;

/// Label the shared storage unit is created under.
const SHARED_WALLET_LABEL: &str = "keyward-shared";

/// Decides which storage unit backs a tenant and how keys relate to it.
#[async_trait]
pub trait WalletStrategy: Send + Sync {
    /// Resolve (creating if needed) the storage unit for a new tenant.
    async fn create_storage(
        &self,
        label: &str,
        key: Option<&WalletKey>,
    ) -> Result<WalletId, WalletError>;

    /// Open a tenant's storage unit for a token request.
    async fn open_storage(
        &self,
        id: &WalletId,
        key: Option<&WalletKey>,
    ) -> Result<(), WalletError>;

    /// Release a tenant's claim on its storage unit.
    async fn delete_storage(&self, id: &WalletId) -> Result<(), WalletError>;

    /// Whether tenants must present a wallet key to operate their storage.
    fn requires_wallet_key(&self) -> bool;

    /// Whether provided keys are checked against the store's own key
    /// material rather than a per-tenant recorded verifier.
    fn checks_key_against_store(&self) -> bool;

    /// Check a key against the store. Only meaningful when
    /// [`checks_key_against_store`](Self::checks_key_against_store) is true.
    async fn verify_key(&self, id: &WalletId, key: &WalletKey) -> Result<bool, WalletError>;
}

/// Build the strategy selected by configuration.
pub fn strategy_for(
    kind: WalletStrategyKind,
    store: Arc<dyn WalletStore>,
    call_timeout: Duration,
) -> Arc<dyn WalletStrategy> {
    match kind {
        WalletStrategyKind::MultiWallet => Arc::new(MultiWalletStrategy::new(store, call_timeout)),
        WalletStrategyKind::SingleWallet => {
            Arc::new(SingleWalletStrategy::new(store, call_timeout))
        }
    }
}

async fn bounded<T>(
    timeout: Duration,
    call: impl Future<Output = Result<T, WalletError>> + Send,
) -> Result<T, WalletError> {
    match tokio::time::timeout(timeout, call).await {
        Ok(result) => result,
        Err(_) => Err(WalletError::StorageUnavailable(format!(
            "store call timed out after {}s",
            timeout.as_secs()
        ))),
    }
}

/// One dedicated storage unit per tenant.
///
/// The supplied wallet key is the unit's opening material: the store
/// enforces it, so the key is required both at creation and whenever the
/// unit is opened.
pub struct MultiWalletStrategy {
    store: Arc<dyn WalletStore>,
    call_timeout: Duration,
}

impl MultiWalletStrategy {
    pub fn new(store: Arc<dyn WalletStore>, call_timeout: Duration) -> Self {
        Self {
            store,
            call_timeout,
        }
    }
}

#[async_trait]
impl WalletStrategy for MultiWalletStrategy {
    async fn create_storage(
        &self,
        label: &str,
        key: Option<&WalletKey>,
    ) -> Result<WalletId, WalletError> {
        let key = key.ok_or(WalletError::WalletKeyRequired)?;
        bounded(self.call_timeout, self.store.create_wallet(label, Some(key))).await
    }

    async fn open_storage(
        &self,
        id: &WalletId,
        key: Option<&WalletKey>,
    ) -> Result<(), WalletError> {
        let key = key.ok_or(WalletError::WalletKeyRequired)?;
        bounded(self.call_timeout, self.store.open_wallet(id, Some(key))).await
    }

    async fn delete_storage(&self, id: &WalletId) -> Result<(), WalletError> {
        bounded(self.call_timeout, self.store.delete_wallet(id)).await
    }

    fn requires_wallet_key(&self) -> bool {
        true
    }

    fn checks_key_against_store(&self) -> bool {
        true
    }

    async fn verify_key(&self, id: &WalletId, key: &WalletKey) -> Result<bool, WalletError> {
        bounded(self.call_timeout, self.store.verify_wallet_key(id, key)).await
    }
}

/// One process-wide storage unit shared by all tenants.
///
/// The shared unit is created lazily on first use with an internally
/// generated key and lives for the whole process; tenant removal never
/// deletes it. Tenant-level wallet keys are never used to open storage.
pub struct SingleWalletStrategy {
    store: Arc<dyn WalletStore>,
    call_timeout: Duration,
    internal_key: WalletKey,
    shared: OnceCell<WalletId>,
}

impl SingleWalletStrategy {
    pub fn new(store: Arc<dyn WalletStore>, call_timeout: Duration) -> Self {
        Self {
            store,
            call_timeout,
            internal_key: WalletKey::random(),
            shared: OnceCell::new(),
        }
    }

    async fn shared_wallet(&self) -> Result<WalletId, WalletError> {
        self.shared
            .get_or_try_init(|| async {
                let id = bounded(
                    self.call_timeout,
                    self.store
                        .create_wallet(SHARED_WALLET_LABEL, Some(&self.internal_key)),
                )
                .await?;
                tracing::info!(wallet = %id, "shared wallet created");
                Ok(id)
            })
            .await
            .cloned()
    }
}

#[async_trait]
impl WalletStrategy for SingleWalletStrategy {
    async fn create_storage(
        &self,
        _label: &str,
        _key: Option<&WalletKey>,
    ) -> Result<WalletId, WalletError> {
        self.shared_wallet().await
    }

    async fn open_storage(
        &self,
        id: &WalletId,
        _key: Option<&WalletKey>,
    ) -> Result<(), WalletError> {
        // The shared unit opens with its own internal key; the tenant key
        // is an authorization check handled by policy, not opening material
        self.shared_wallet().await?;
        bounded(
            self.call_timeout,
            self.store.open_wallet(id, Some(&self.internal_key)),
        )
        .await
    }

    async fn delete_storage(&self, id: &WalletId) -> Result<(), WalletError> {
        // Detach only: the shared unit outlives every tenant
        tracing::debug!(wallet = %id, "tenant detached from shared wallet");
        Ok(())
    }

    fn requires_wallet_key(&self) -> bool {
        false
    }

    fn checks_key_against_store(&self) -> bool {
        false
    }

    async fn verify_key(&self, _id: &WalletId, _key: &WalletKey) -> Result<bool, WalletError> {
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryWalletStore;

    const TIMEOUT: Duration = Duration::from_secs(5);

    #[tokio::test]
    async fn test_multi_wallet_creates_one_unit_per_tenant() {
        let store = Arc::new(InMemoryWalletStore::new());
        let strategy = MultiWalletStrategy::new(store.clone(), TIMEOUT);

        let key = WalletKey::new("k1");
        let a = strategy.create_storage("alice", Some(&key)).await.unwrap();
        let b = strategy.create_storage("bob", Some(&key)).await.unwrap();

        assert_ne!(a, b);
        assert_eq!(store.wallet_count().await, 2);
    }

    #[tokio::test]
    async fn test_multi_wallet_requires_key() {
        let store = Arc::new(InMemoryWalletStore::new());
        let strategy = MultiWalletStrategy::new(store, TIMEOUT);

        let err = strategy.create_storage("alice", None).await.unwrap_err();
        assert!(matches!(err, WalletError::WalletKeyRequired));
    }

    #[tokio::test]
    async fn test_multi_wallet_delete_removes_unit() {
        let store = Arc::new(InMemoryWalletStore::new());
        let strategy = MultiWalletStrategy::new(store.clone(), TIMEOUT);

        let key = WalletKey::new("k1");
        let id = strategy.create_storage("alice", Some(&key)).await.unwrap();
        strategy.delete_storage(&id).await.unwrap();
        assert_eq!(store.wallet_count().await, 0);
    }

    #[tokio::test]
    async fn test_single_wallet_is_shared_and_lazy() {
        let store = Arc::new(InMemoryWalletStore::new());
        let strategy = SingleWalletStrategy::new(store.clone(), TIMEOUT);
        assert_eq!(store.wallet_count().await, 0);

        let a = strategy.create_storage("alice", None).await.unwrap();
        let b = strategy
            .create_storage("bob", Some(&WalletKey::new("ignored")))
            .await
            .unwrap();

        assert_eq!(a, b);
        assert_eq!(store.wallet_count().await, 1);
    }

    #[tokio::test]
    async fn test_single_wallet_survives_delete() {
        let store = Arc::new(InMemoryWalletStore::new());
        let strategy = SingleWalletStrategy::new(store.clone(), TIMEOUT);

        let id = strategy.create_storage("alice", None).await.unwrap();
        strategy.delete_storage(&id).await.unwrap();

        assert_eq!(store.wallet_count().await, 1);
        strategy.open_storage(&id, None).await.unwrap();
    }

    #[tokio::test]
    async fn test_single_wallet_opens_without_tenant_key() {
        let store = Arc::new(InMemoryWalletStore::new());
        let strategy = SingleWalletStrategy::new(store, TIMEOUT);

        let id = strategy.create_storage("alice", None).await.unwrap();
        strategy.open_storage(&id, None).await.unwrap();
        strategy
            .open_storage(&id, Some(&WalletKey::new("whatever")))
            .await
            .unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_maps_to_storage_unavailable() {
        struct StalledStore;

        #[async_trait]
        impl WalletStore for StalledStore {
            async fn create_wallet(
                &self,
                _label: &str,
                _key: Option<&WalletKey>,
            ) -> Result<WalletId, WalletError> {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(WalletId::new())
            }

            async fn open_wallet(
                &self,
                _id: &WalletId,
                _key: Option<&WalletKey>,
            ) -> Result<(), WalletError> {
                Ok(())
            }

            async fn verify_wallet_key(
                &self,
                _id: &WalletId,
                _key: &WalletKey,
            ) -> Result<bool, WalletError> {
                Ok(true)
            }

            async fn delete_wallet(&self, _id: &WalletId) -> Result<(), WalletError> {
                Ok(())
            }
        }

        let strategy = MultiWalletStrategy::new(Arc::new(StalledStore), Duration::from_millis(50));
        let err = strategy
            .create_storage("alice", Some(&WalletKey::new("k1")))
            .await
            .unwrap_err();
        assert!(matches!(err, WalletError::StorageUnavailable(_)));
    }
}
