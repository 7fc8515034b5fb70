//! Token expiry configuration.

use super::ConfigError;
use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Unit for the configured token lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpiryUnit {
    Weeks,
    Days,
    Hours,
    Minutes,
}

impl std::fmt::Display for ExpiryUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Weeks => "weeks",
            Self::Days => "days",
            Self::Hours => "hours",
            Self::Minutes => "minutes",
        };
        f.write_str(name)
    }
}

/// How long a newly issued token stays valid.
///
/// The duration is captured at issuance: reconfiguring never changes the
/// expiry of tokens already in the wild.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenExpiryConfig {
    /// Lifetime unit.
    #[serde(default = "default_units")]
    pub units: ExpiryUnit,

    /// Lifetime amount, in `units`. Must be positive.
    #[serde(default = "default_amount")]
    pub amount: u32,
}

impl Default for TokenExpiryConfig {
    fn default() -> Self {
        Self {
            units: default_units(),
            amount: default_amount(),
        }
    }
}

impl TokenExpiryConfig {
    /// Reject non-positive lifetimes.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.amount == 0 {
            return Err(ConfigError::Config(
                "token_expiry.amount must be a positive integer".to_string(),
            ));
        }
        Ok(())
    }

    /// The configured lifetime as a concrete duration.
    pub fn duration(&self) -> Duration {
        let amount = i64::from(self.amount);
        match self.units {
            ExpiryUnit::Weeks => Duration::weeks(amount),
            ExpiryUnit::Days => Duration::days(amount),
            ExpiryUnit::Hours => Duration::hours(amount),
            ExpiryUnit::Minutes => Duration::minutes(amount),
        }
    }
}

fn default_units() -> ExpiryUnit {
    ExpiryUnit::Weeks
}

fn default_amount() -> u32 {
    52
}
