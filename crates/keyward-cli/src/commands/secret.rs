//! Signing secret generation.
//!
//! `keyward secret` - Generate a random base64-encoded signing secret.

use keyward_token::SigningSecret;

pub fn generate(bytes: usize) -> anyhow::Result<()> {
    anyhow::ensure!(bytes >= 16, "secret must be at least 16 bytes");

    let secret = SigningSecret::generate(bytes);
    println!("Signing secret (keep secure!):");
    println!("{secret}");
    println!();
    println!("Export it and point signing.secret_env at the variable:");
    println!("  export KEYWARD_SIGNING_SECRET={secret}");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_secret_rejected() {
        assert!(generate(8).is_err());
        assert!(generate(32).is_ok());
    }
}
