//! Signing secret resolution and generation.

use crate::error::TokenError;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use keyward_core::config::{SigningAlgorithm, SigningConfig};
use rand::RngCore;
use std::fmt;

/// Secrets shorter than this are accepted but logged as weak.
const MIN_SECRET_BYTES: usize = 32;

/// The symmetric secret and algorithm used to sign tokens.
///
/// Supplied by host configuration; Keyward never persists it.
#[derive(Clone)]
pub struct SigningSecret {
    bytes: Vec<u8>,
    algorithm: SigningAlgorithm,
}

impl SigningSecret {
    /// Build a secret from raw bytes.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>, algorithm: SigningAlgorithm) -> Result<Self, TokenError> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(TokenError::Signing(
                "signing secret must not be empty".to_string(),
            ));
        }
        if bytes.len() < MIN_SECRET_BYTES {
            tracing::warn!(
                len = bytes.len(),
                "signing secret is shorter than {} bytes",
                MIN_SECRET_BYTES
            );
        }
        Ok(Self { bytes, algorithm })
    }

    /// Resolve the secret from configuration (env var, file, or inline).
    pub fn from_config(config: &SigningConfig) -> Result<Self, TokenError> {
        let secret = config
            .resolve_secret()
            .map_err(|e| TokenError::Signing(format!("failed to read signing secret: {e}")))?
            .ok_or_else(|| TokenError::Signing("no signing secret configured".to_string()))?;
        Self::from_bytes(secret.into_bytes(), config.algorithm)
    }

    /// Generate a fresh random secret, base64-encoded for configuration.
    pub fn generate(len: usize) -> String {
        let mut rng = rand::rng();
        let mut bytes = vec![0u8; len];
        rng.fill_bytes(&mut bytes);
        STANDARD.encode(&bytes)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn algorithm(&self) -> SigningAlgorithm {
        self.algorithm
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningSecret")
            .field("bytes", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .finish()
    }
}
