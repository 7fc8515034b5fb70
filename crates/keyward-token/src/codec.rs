//! Token encoding and decoding.

use crate::claims::TokenClaims;
use crate::error::TokenError;
use crate::secret::SigningSecret;
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use keyward_core::config::{SigningAlgorithm, SigningConfig};

/// Encodes and decodes signed tenant tokens.
///
/// Decoding is pure given the fixed secret and the supplied `now`: expiry
/// is checked here against that instant, not against the wall clock, and
/// signature verification is the only cryptographic operation.
pub struct TokenCodec {
    header: Header,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    /// Create a codec over the given secret.
    pub fn new(secret: &SigningSecret) -> Self {
        let algorithm = map_algorithm(secret.algorithm());
        let mut validation = Validation::new(algorithm);
        // Expiry is validated against the injected clock in `decode`, and
        // claim presence is enforced by the TokenClaims field types.
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        Self {
            header: Header::new(algorithm),
            encoding_key: EncodingKey::from_secret(secret.bytes()),
            decoding_key: DecodingKey::from_secret(secret.bytes()),
            validation,
        }
    }

    /// Resolve the secret from configuration and build a codec.
    pub fn from_config(config: &SigningConfig) -> Result<Self, TokenError> {
        let secret = SigningSecret::from_config(config)?;
        Ok(Self::new(&secret))
    }

    /// Sign a claim set into a token string.
    pub fn encode(&self, claims: &TokenClaims) -> Result<String, TokenError> {
        jsonwebtoken::encode(&self.header, claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verify a token and extract its claims, checking expiry against `now`.
    pub fn decode(&self, token: &str, now: DateTime<Utc>) -> Result<TokenClaims, TokenError> {
        let data = jsonwebtoken::decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map_err(map_decode_error)?;

        let claims = data.claims;
        if claims.is_expired_at(now) {
            return Err(TokenError::Expired {
                expired_at: claims.expires_at().to_rfc3339(),
            });
        }
        Ok(claims)
    }
}

fn map_algorithm(algorithm: SigningAlgorithm) -> Algorithm {
    match algorithm {
        SigningAlgorithm::HS256 => Algorithm::HS256,
        SigningAlgorithm::HS384 => Algorithm::HS384,
        SigningAlgorithm::HS512 => Algorithm::HS512,
    }
}

fn map_decode_error(error: jsonwebtoken::errors::Error) -> TokenError {
    match error.kind() {
        ErrorKind::InvalidSignature
        | ErrorKind::InvalidToken
        | ErrorKind::MissingRequiredClaim(_)
        | ErrorKind::Base64(_)
        | ErrorKind::Json(_)
        | ErrorKind::Utf8(_) => TokenError::Malformed(error.to_string()),
        _ => TokenError::Invalid(error.to_string()),
    }
}

/// Decode a token's claim payload without verifying the signature.
///
/// For inspection and debugging only; never use the result to authorize.
pub fn inspect_unverified(token: &str) -> Result<serde_json::Value, TokenError> {
    let mut parts = token.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(TokenError::Malformed(
            "expected three dot-separated segments".to_string(),
        ));
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|e| TokenError::Malformed(e.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|e| TokenError::Malformed(e.to_string()))
}
