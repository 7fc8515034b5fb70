//! Claim set carried by issued tenant tokens.

use chrono::{DateTime, Utc};
use keyward_core::{TenantId, WalletId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Claim names owned by the issuer. Caller-supplied extras under these
/// names are dropped so they can never override the mandatory fields.
pub const RESERVED_CLAIMS: [&str; 4] = ["sub", "wallet", "iat", "exp"];

/// Claims contained in a tenant token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Tenant the token was issued to.
    pub sub: TenantId,

    /// Storage unit backing the tenant.
    pub wallet: WalletId,

    /// Issued-at, seconds since the epoch.
    pub iat: i64,

    /// Expiry, seconds since the epoch.
    pub exp: i64,

    /// Caller-supplied extra claims.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl TokenClaims {
    /// Assemble the mandatory claim set.
    pub fn new(
        sub: TenantId,
        wallet: WalletId,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            sub,
            wallet,
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            extra: BTreeMap::new(),
        }
    }

    /// Merge caller-supplied extra claims, dropping reserved names.
    pub fn with_extra(mut self, extra: BTreeMap<String, Value>) -> Self {
        for (name, value) in extra {
            if RESERVED_CLAIMS.contains(&name.as_str()) {
                tracing::warn!(claim = %name, "dropping reserved claim supplied by caller");
                continue;
            }
            self.extra.insert(name, value);
        }
        self
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.iat, 0).unwrap_or(DateTime::UNIX_EPOCH)
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or(DateTime::UNIX_EPOCH)
    }

    /// Whether the token is expired at `now`.
    ///
    /// A token whose expiry equals `now` is already expired; validity is
    /// the half-open window `[iat, exp)`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use serde_json::json;

    fn claims(lifetime: Duration) -> TokenClaims {
        let now = Utc::now();
        TokenClaims::new(TenantId::new(), WalletId::new(), now, now + lifetime)
    }

    #[test]
    fn test_extra_claims_merge() {
        let merged = claims(Duration::hours(1)).with_extra(BTreeMap::from([
            ("role".to_string(), json!("admin")),
            ("seat".to_string(), json!(3)),
        ]));

        assert_eq!(merged.extra.get("role"), Some(&json!("admin")));
        assert_eq!(merged.extra.get("seat"), Some(&json!(3)));
    }

    #[test]
    fn test_reserved_claims_dropped() {
        let original = claims(Duration::hours(1));
        let exp = original.exp;
        let merged = original.with_extra(BTreeMap::from([
            ("exp".to_string(), json!(0)),
            ("sub".to_string(), json!("intruder")),
            ("role".to_string(), json!("admin")),
        ]));

        assert_eq!(merged.exp, exp);
        assert!(!merged.extra.contains_key("exp"));
        assert!(!merged.extra.contains_key("sub"));
        assert!(merged.extra.contains_key("role"));
    }

    #[test]
    fn test_expiry_boundary() {
        let now = Utc::now();
        let claims = TokenClaims::new(
            TenantId::new(),
            WalletId::new(),
            now,
            now + Duration::seconds(60),
        );

        assert!(!claims.is_expired_at(now + Duration::seconds(59)));
        // Exactly at expiry counts as expired
        assert!(claims.is_expired_at(now + Duration::seconds(60)));
        assert!(claims.is_expired_at(now + Duration::seconds(61)));
    }
}
