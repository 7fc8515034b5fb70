//! In-memory tenant registry and per-tenant mutual exclusion.

use chrono::{DateTime, Utc};
use keyward_core::{TenantId, WalletId};
use keyward_wallet::KeyVerifier;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};

/// Record kept for each registered tenant.
///
/// Removal deletes the record, so liveness checks reduce to presence in
/// the registry.
#[derive(Debug)]
pub struct TenantEntry {
    pub id: TenantId,
    pub label: String,
    pub wallet_id: WalletId,
    /// Recorded check value when the tenant registered with a wallet key.
    pub key_verifier: Option<KeyVerifier>,
    pub created_at: DateTime<Utc>,
}

/// Registry of live tenants.
#[derive(Default)]
pub struct TenantRegistry {
    tenants: RwLock<HashMap<TenantId, Arc<TenantEntry>>>,
}

impl TenantRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, entry: Arc<TenantEntry>) {
        self.tenants.write().await.insert(entry.id.clone(), entry);
    }

    pub async fn get(&self, id: &TenantId) -> Option<Arc<TenantEntry>> {
        self.tenants.read().await.get(id).cloned()
    }

    pub async fn remove(&self, id: &TenantId) -> Option<Arc<TenantEntry>> {
        self.tenants.write().await.remove(id)
    }

    pub async fn contains(&self, id: &TenantId) -> bool {
        self.tenants.read().await.contains_key(id)
    }

    pub async fn len(&self) -> usize {
        self.tenants.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.tenants.read().await.is_empty()
    }
}

/// Keyed async mutexes: at most one in-flight state transition per tenant,
/// with no serialization across different tenants.
#[derive(Default)]
pub struct TenantLocks {
    locks: Mutex<HashMap<TenantId, Arc<Mutex<()>>>>,
}

impl TenantLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock for a tenant id, creating it on first use.
    pub async fn acquire(&self, id: &TenantId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            locks.entry(id.clone()).or_default().clone()
        };
        lock.lock_owned().await
    }

    /// Drop the lock entry for a removed tenant.
    pub async fn forget(&self, id: &TenantId) {
        self.locks.lock().await.remove(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn entry(id: &TenantId) -> Arc<TenantEntry> {
        Arc::new(TenantEntry {
            id: id.clone(),
            label: "test".to_string(),
            wallet_id: WalletId::new(),
            key_verifier: None,
            created_at: Utc::now(),
        })
    }

    #[tokio::test]
    async fn test_insert_get_remove() {
        let registry = TenantRegistry::new();
        let id = TenantId::new();

        registry.insert(entry(&id)).await;
        assert!(registry.contains(&id).await);
        assert_eq!(registry.len().await, 1);

        let removed = registry.remove(&id).await.unwrap();
        assert_eq!(removed.id, id);
        assert!(!registry.contains(&id).await);
        assert!(registry.remove(&id).await.is_none());
    }

    #[tokio::test]
    async fn test_same_tenant_lock_is_exclusive() {
        let locks = Arc::new(TenantLocks::new());
        let id = TenantId::new();

        let guard = locks.acquire(&id).await;

        let contended = {
            let locks = locks.clone();
            let id = id.clone();
            tokio::spawn(async move {
                let _guard = locks.acquire(&id).await;
            })
        };

        // The second acquire must block while the guard is held
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!contended.is_finished());

        drop(guard);
        contended.await.unwrap();
    }

    #[tokio::test]
    async fn test_different_tenants_do_not_contend() {
        let locks = TenantLocks::new();
        let _a = locks.acquire(&TenantId::new()).await;
        // Must not deadlock
        let _b = locks.acquire(&TenantId::new()).await;
    }
}
