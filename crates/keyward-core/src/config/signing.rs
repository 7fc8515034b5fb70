//! Signing secret configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// HMAC algorithm used to sign tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SigningAlgorithm {
    HS256,
    HS384,
    HS512,
}

impl Default for SigningAlgorithm {
    fn default() -> Self {
        Self::HS256
    }
}

/// Configuration for the token signing secret.
///
/// The secret can come from an environment variable, a file, or (for
/// development) inline configuration, resolved in that order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SigningConfig {
    /// Environment variable containing the secret.
    #[serde(default)]
    pub secret_env: Option<String>,

    /// Path to a file containing the secret.
    #[serde(default)]
    pub secret_file: Option<PathBuf>,

    /// Inline secret. Lowest precedence; intended for development only.
    #[serde(default)]
    pub secret: Option<String>,

    /// Signing algorithm.
    #[serde(default)]
    pub algorithm: SigningAlgorithm,
}

impl SigningConfig {
    /// Resolve the signing secret from environment, file, or inline value.
    pub fn resolve_secret(&self) -> Result<Option<String>, std::io::Error> {
        // Try environment variable first
        if let Some(env_var) = &self.secret_env {
            if let Ok(secret) = std::env::var(env_var) {
                return Ok(Some(secret));
            }
        }

        // Try file path
        if let Some(path) = &self.secret_file {
            if path.exists() {
                let secret = std::fs::read_to_string(path)?;
                return Ok(Some(secret.trim().to_string()));
            }
        }

        // Fall back to the inline value
        Ok(self.secret.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_inline_secret_resolves() {
        let config = SigningConfig {
            secret: Some("dev-secret".to_string()),
            ..Default::default()
        };
        assert_eq!(config.resolve_secret().unwrap().as_deref(), Some("dev-secret"));
    }

    #[test]
    fn test_file_beats_inline() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "file-secret").unwrap();

        let config = SigningConfig {
            secret_file: Some(file.path().to_path_buf()),
            secret: Some("inline-secret".to_string()),
            ..Default::default()
        };
        assert_eq!(config.resolve_secret().unwrap().as_deref(), Some("file-secret"));
    }

    #[test]
    fn test_nothing_configured_is_none() {
        let config = SigningConfig::default();
        assert_eq!(config.resolve_secret().unwrap(), None);
    }
}
