//! Token commands.
//!
//! `keyward token mint` - Create a tenant against an in-memory store and
//! print its first token.
//! `keyward token inspect` - Print a token's claims without verification.

use anyhow::Context;
use keyward_core::{KeywardConfig, SystemClock};
use keyward_manager::{CreateTenantRequest, TokenManager};
use keyward_token::inspect_unverified;
use keyward_wallet::InMemoryWalletStore;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

pub async fn mint(
    config: &Path,
    label: &str,
    wallet_key: Option<&str>,
    claims: &[String],
) -> anyhow::Result<()> {
    let config = KeywardConfig::from_file(config)
        .with_context(|| format!("failed to load {}", config.display()))?;
    let extra = parse_claims(claims)?;

    let manager = TokenManager::new(
        &config,
        Arc::new(InMemoryWalletStore::new()),
        Arc::new(SystemClock),
    )?;

    let mut request = CreateTenantRequest::new(label)
        .with_first_token()
        .with_extra_claims(extra);
    if let Some(key) = wallet_key {
        request = request.with_wallet_key(key);
    }

    let created = manager.create_tenant(request).await?;
    let token = created.token.context("no token issued")?;

    println!("Tenant:  {}", created.tenant_id);
    println!("Wallet:  {}", created.wallet_id);
    println!("Token:");
    println!("{token}");

    Ok(())
}

pub fn inspect(token: &str) -> anyhow::Result<()> {
    let payload = inspect_unverified(token)?;
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

/// Parse `key=value` pairs. Values that parse as JSON keep their type;
/// everything else becomes a string.
fn parse_claims(pairs: &[String]) -> anyhow::Result<BTreeMap<String, Value>> {
    let mut extra = BTreeMap::new();
    for pair in pairs {
        let (key, value) = pair
            .split_once('=')
            .with_context(|| format!("claim '{pair}' is not key=value"))?;
        let value =
            serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
        extra.insert(key.to_string(), value);
    }
    Ok(extra)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_claims_types() {
        let pairs = vec![
            "role=steward".to_string(),
            "seat=3".to_string(),
            "beta=true".to_string(),
        ];
        let extra = parse_claims(&pairs).unwrap();
        assert_eq!(extra["role"], json!("steward"));
        assert_eq!(extra["seat"], json!(3));
        assert_eq!(extra["beta"], json!(true));
    }

    #[test]
    fn test_parse_claims_rejects_bare_words() {
        assert!(parse_claims(&["no-equals-sign".to_string()]).is_err());
    }
}
