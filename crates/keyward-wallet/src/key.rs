//! Wallet key material.
//!
//! A wallet key is a caller-supplied secret used to open or authorize a
//! storage unit. Keyward never stores the key itself; where a recorded
//! check value is needed it keeps a salted digest instead.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use rand::RngCore;
use sha2::{Digest, Sha256};
use std::fmt;

/// A caller-supplied wallet key.
#[derive(Clone, PartialEq, Eq)]
pub struct WalletKey(String);

impl WalletKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Generate a random key for internally managed storage units.
    pub fn random() -> Self {
        let mut rng = rand::rng();
        let mut bytes = [0u8; 24];
        rng.fill_bytes(&mut bytes);
        Self(STANDARD.encode(bytes))
    }

    /// The raw key material.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl From<String> for WalletKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for WalletKey {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Debug for WalletKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WalletKey(<redacted>)")
    }
}

/// Salted digest recorded in place of a wallet key.
#[derive(Clone)]
pub struct KeyVerifier {
    salt: [u8; 16],
    digest: [u8; 32],
}

impl KeyVerifier {
    /// Record a verifier for the given key.
    pub fn for_key(key: &WalletKey) -> Self {
        let mut rng = rand::rng();
        let mut salt = [0u8; 16];
        rng.fill_bytes(&mut salt);

        Self {
            digest: Self::digest_with(&salt, key),
            salt,
        }
    }

    /// Check a key against the recorded digest.
    pub fn verify(&self, key: &WalletKey) -> bool {
        Self::digest_with(&self.salt, key) == self.digest
    }

    fn digest_with(salt: &[u8], key: &WalletKey) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(salt);
        hasher.update(key.expose().as_bytes());
        hasher.finalize().into()
    }
}

impl fmt::Debug for KeyVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("KeyVerifier(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verifier_accepts_matching_key() {
        let key = WalletKey::new("k1");
        let verifier = KeyVerifier::for_key(&key);
        assert!(verifier.verify(&key));
    }

    #[test]
    fn test_verifier_rejects_other_key() {
        let verifier = KeyVerifier::for_key(&WalletKey::new("k1"));
        assert!(!verifier.verify(&WalletKey::new("wrong")));
    }

    #[test]
    fn test_salts_differ_between_verifiers() {
        let key = WalletKey::new("k1");
        let a = KeyVerifier::for_key(&key);
        let b = KeyVerifier::for_key(&key);
        assert_ne!(a.salt, b.salt);
        assert!(a.verify(&key) && b.verify(&key));
    }

    #[test]
    fn test_debug_never_prints_material() {
        let key = WalletKey::new("top-secret");
        assert_eq!(format!("{:?}", key), "WalletKey(<redacted>)");
    }
}
