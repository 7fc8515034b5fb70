//! Configuration validation.
//!
//! `keyward check` - Parse and validate a configuration file.

use anyhow::Context;
use keyward_core::KeywardConfig;
use std::path::Path;

pub fn run(file: &Path) -> anyhow::Result<()> {
    let config = KeywardConfig::from_file(file)
        .with_context(|| format!("failed to load {}", file.display()))?;

    println!("✔ {} parses and validates", file.display());
    println!("  strategy:       {}", config.manager.strategy);
    println!(
        "  token expiry:   {} {}",
        config.token_expiry.amount, config.token_expiry.units
    );
    match config.signing.resolve_secret()? {
        Some(_) => println!("  signing secret: resolved"),
        None => println!("  signing secret: NOT configured"),
    }

    Ok(())
}
