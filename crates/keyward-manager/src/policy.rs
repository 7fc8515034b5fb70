//! Token policy: wallet-key admission, expiry computation, and claim
//! assembly.

use crate::registry::TenantEntry;
use chrono::{DateTime, Utc};
use keyward_core::KeywardConfig;
use keyward_core::config::TokenExpiryConfig;
use keyward_token::TokenClaims;
use keyward_wallet::{WalletError, WalletKey, WalletStrategy};
use serde_json::Value;
use std::collections::BTreeMap;

/// Policy applied to every tenant registration and token request.
///
/// There is no cap on concurrently valid tokens: every successful grant
/// mints an independent token with its own expiry.
pub struct TokenPolicy {
    always_check_provided_wallet_key: bool,
    error_on_unneeded_wallet_key: bool,
    expiry: TokenExpiryConfig,
}

impl TokenPolicy {
    pub fn from_config(config: &KeywardConfig) -> Self {
        Self {
            always_check_provided_wallet_key: config.manager.always_check_provided_wallet_key,
            error_on_unneeded_wallet_key: config.errors.on_unneeded_wallet_key,
            expiry: config.token_expiry.clone(),
        }
    }

    /// Decide whether a token request's wallet key is admissible.
    ///
    /// The rules, in order:
    /// - A provided key is verified against the store's key material
    ///   (dedicated-wallet strategies) or the tenant's recorded verifier
    ///   (shared-wallet) when `always_check_provided_wallet_key` is set;
    ///   a mismatch fails the request.
    /// - A key provided for a tenant that has no use for one either fails
    ///   (`errors.on_unneeded_wallet_key`) or is ignored.
    /// - A missing key where the strategy requires one fails.
    pub async fn admit_wallet_key(
        &self,
        strategy: &dyn WalletStrategy,
        entry: &TenantEntry,
        provided: Option<&WalletKey>,
    ) -> Result<(), WalletError> {
        let Some(key) = provided else {
            if strategy.requires_wallet_key() {
                return Err(WalletError::WalletKeyRequired);
            }
            return Ok(());
        };

        if strategy.checks_key_against_store() {
            if self.always_check_provided_wallet_key
                && !strategy.verify_key(&entry.wallet_id, key).await?
            {
                return Err(WalletError::WalletKeyMismatch);
            }
            return Ok(());
        }

        match &entry.key_verifier {
            Some(verifier) => {
                if self.always_check_provided_wallet_key && !verifier.verify(key) {
                    return Err(WalletError::WalletKeyMismatch);
                }
                Ok(())
            }
            None => {
                if self.error_on_unneeded_wallet_key {
                    return Err(WalletError::UnneededWalletKey);
                }
                tracing::debug!(tenant = %entry.id, "ignoring unneeded wallet key");
                Ok(())
            }
        }
    }

    /// Compute the issuance window starting at `now`.
    pub fn issue_window(&self, now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
        (now, now + self.expiry.duration())
    }

    /// Assemble the claim set for a token issued to `entry` at `now`.
    ///
    /// Caller extras are merged but can never override the mandatory
    /// claims.
    pub fn assemble_claims(
        &self,
        entry: &TenantEntry,
        now: DateTime<Utc>,
        extra: BTreeMap<String, Value>,
    ) -> TokenClaims {
        let (issued_at, expires_at) = self.issue_window(now);
        TokenClaims::new(
            entry.id.clone(),
            entry.wallet_id.clone(),
            issued_at,
            expires_at,
        )
        .with_extra(extra)
    }
}
