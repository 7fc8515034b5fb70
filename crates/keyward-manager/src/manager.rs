//! The manager facade.
//!
//! Single entry point for the host: register tenants, mint tokens, remove
//! tenants, and authorize presented tokens. Per tenant the lifecycle is
//! `Unregistered -> Registered -> Removed`, with `Removed` terminal; any
//! operation on a removed or never-registered tenant fails as not-found.

use crate::error::ManagerError;
use crate::policy::TokenPolicy;
use crate::registry::{TenantEntry, TenantLocks, TenantRegistry};
use keyward_core::{Clock, KeywardConfig, TenantId, WalletId};
use keyward_token::{TokenClaims, TokenCodec};
use keyward_wallet::{WalletKey, WalletStore, WalletStrategy, strategy_for};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Request to register a new tenant.
#[derive(Debug)]
pub struct CreateTenantRequest {
    /// Display label for the tenant.
    pub label: String,

    /// Wallet key. Required under the dedicated-wallet strategy, where it
    /// becomes the storage unit's opening material; optional under the
    /// shared-wallet strategy, where it is recorded for authorization
    /// checks only.
    pub wallet_key: Option<WalletKey>,

    /// Mint the first token atomically with the registration.
    pub issue_token: bool,

    /// Extra claims for the first token.
    pub extra_claims: BTreeMap<String, Value>,
}

impl CreateTenantRequest {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            wallet_key: None,
            issue_token: false,
            extra_claims: BTreeMap::new(),
        }
    }

    pub fn with_wallet_key(mut self, key: impl Into<WalletKey>) -> Self {
        self.wallet_key = Some(key.into());
        self
    }

    pub fn with_first_token(mut self) -> Self {
        self.issue_token = true;
        self
    }

    pub fn with_extra_claims(mut self, extra: BTreeMap<String, Value>) -> Self {
        self.extra_claims = extra;
        self
    }
}

/// Result of a successful tenant registration.
#[derive(Debug)]
pub struct CreatedTenant {
    pub tenant_id: TenantId,
    pub wallet_id: WalletId,
    /// First token, when the request asked for one.
    pub token: Option<String>,
}

/// The multitenant token manager.
pub struct TokenManager {
    strategy: Arc<dyn WalletStrategy>,
    policy: TokenPolicy,
    codec: TokenCodec,
    clock: Arc<dyn Clock>,
    registry: TenantRegistry,
    locks: TenantLocks,
}

impl TokenManager {
    /// Build a manager from configuration, a wallet store, and a clock.
    ///
    /// Fails fast when no usable signing secret is configured.
    pub fn new(
        config: &KeywardConfig,
        store: Arc<dyn WalletStore>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, ManagerError> {
        let codec = TokenCodec::from_config(&config.signing)?;
        let strategy = strategy_for(config.manager.strategy, store, config.store.timeout());
        tracing::info!(strategy = %config.manager.strategy, "token manager initialized");

        Ok(Self {
            strategy,
            policy: TokenPolicy::from_config(config),
            codec,
            clock,
            registry: TenantRegistry::new(),
            locks: TenantLocks::new(),
        })
    }

    /// Register a new tenant: `Unregistered -> Registered`.
    ///
    /// Either the tenant record and its storage unit both exist afterward
    /// or neither does; a failure while minting the optional first token
    /// rolls the registration back.
    pub async fn create_tenant(
        &self,
        request: CreateTenantRequest,
    ) -> Result<CreatedTenant, ManagerError> {
        let tenant_id = TenantId::new();
        let _guard = self.locks.acquire(&tenant_id).await;

        let wallet_id = self
            .strategy
            .create_storage(&request.label, request.wallet_key.as_ref())
            .await?;

        let entry = Arc::new(TenantEntry {
            id: tenant_id.clone(),
            label: request.label,
            wallet_id: wallet_id.clone(),
            key_verifier: request
                .wallet_key
                .as_ref()
                .map(keyward_wallet::KeyVerifier::for_key),
            created_at: self.clock.now(),
        });
        self.registry.insert(entry.clone()).await;

        let token = if request.issue_token {
            match self.mint(&entry, request.extra_claims) {
                Ok(token) => Some(token),
                Err(err) => {
                    self.rollback_creation(&entry).await;
                    return Err(err);
                }
            }
        } else {
            None
        };

        tracing::info!(tenant = %tenant_id, wallet = %wallet_id, "tenant created");
        Ok(CreatedTenant {
            tenant_id,
            wallet_id,
            token,
        })
    }

    /// Mint a new token for a registered tenant.
    ///
    /// Every successful call produces an independent token; previously
    /// issued tokens are unaffected.
    pub async fn get_token(
        &self,
        tenant_id: &TenantId,
        wallet_key: Option<WalletKey>,
        extra_claims: BTreeMap<String, Value>,
    ) -> Result<String, ManagerError> {
        let _guard = self.locks.acquire(tenant_id).await;

        let entry = self
            .registry
            .get(tenant_id)
            .await
            .ok_or_else(|| ManagerError::TenantNotFound(tenant_id.clone()))?;

        self.policy
            .admit_wallet_key(self.strategy.as_ref(), &entry, wallet_key.as_ref())
            .await?;
        self.strategy
            .open_storage(&entry.wallet_id, wallet_key.as_ref())
            .await?;

        let token = self.mint(&entry, extra_claims)?;
        tracing::debug!(tenant = %tenant_id, "token issued");
        Ok(token)
    }

    /// Remove a tenant: `Registered -> Removed` (terminal).
    ///
    /// Under the dedicated-wallet strategy the tenant's storage unit is
    /// deleted; under the shared-wallet strategy the record is only
    /// detached. Not idempotent: removing an already-removed tenant fails
    /// as not-found. All outstanding tokens for the tenant stop
    /// authorizing immediately.
    pub async fn remove_tenant(&self, tenant_id: &TenantId) -> Result<(), ManagerError> {
        let _guard = self.locks.acquire(tenant_id).await;

        let entry = self
            .registry
            .remove(tenant_id)
            .await
            .ok_or_else(|| ManagerError::TenantNotFound(tenant_id.clone()))?;

        if let Err(err) = self.strategy.delete_storage(&entry.wallet_id).await {
            // Removal must not half-complete: restore the record
            self.registry.insert(entry).await;
            return Err(err.into());
        }

        self.locks.forget(tenant_id).await;
        tracing::info!(tenant = %tenant_id, "tenant removed");
        Ok(())
    }

    /// Verify a presented token and resolve the tenant it belongs to.
    ///
    /// Decoding checks signature, structure, and expiry; on top of that
    /// the tenant must still be registered, so removal revokes every
    /// outstanding token even before it expires.
    pub async fn decode_and_authorize(
        &self,
        token: &str,
    ) -> Result<(TenantId, TokenClaims), ManagerError> {
        let claims = self.codec.decode(token, self.clock.now())?;

        if !self.registry.contains(&claims.sub).await {
            return Err(ManagerError::TenantNotFound(claims.sub.clone()));
        }
        Ok((claims.sub.clone(), claims))
    }

    /// Number of currently registered tenants.
    pub async fn tenant_count(&self) -> usize {
        self.registry.len().await
    }

    fn mint(
        &self,
        entry: &TenantEntry,
        extra: BTreeMap<String, Value>,
    ) -> Result<String, ManagerError> {
        let claims = self.policy.assemble_claims(entry, self.clock.now(), extra);
        Ok(self.codec.encode(&claims)?)
    }

    async fn rollback_creation(&self, entry: &TenantEntry) {
        self.registry.remove(&entry.id).await;
        if let Err(err) = self.strategy.delete_storage(&entry.wallet_id).await {
            tracing::warn!(
                tenant = %entry.id,
                wallet = %entry.wallet_id,
                error = %err,
                "failed to roll back storage unit after token failure"
            );
        }
        self.locks.forget(&entry.id).await;
    }
}
