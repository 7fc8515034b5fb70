//! Error types for token handling.

use thiserror::Error;

/// Errors that can occur while signing or verifying tokens.
#[derive(Debug, Error)]
pub enum TokenError {
    /// The signing secret is absent or malformed. Fatal configuration
    /// defect: the process cannot safely issue tokens until it is fixed.
    #[error("signing error: {0}")]
    Signing(String),

    /// The token's expiry has passed.
    #[error("token expired at {expired_at}")]
    Expired { expired_at: String },

    /// Signature did not verify, or a required claim is missing.
    #[error("malformed token: {0}")]
    Malformed(String),

    /// Any other structural violation.
    #[error("invalid token: {0}")]
    Invalid(String),
}
