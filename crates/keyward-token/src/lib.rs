//! # keyward-token
//!
//! Token handling for the Keyward multitenant manager.
//!
//! This crate provides functionality for:
//! - Resolving and generating the HMAC signing secret
//! - Assembling the claim set for a tenant token
//! - Encoding and decoding signed tokens
//!
//! ## Token Model
//!
//! A Keyward token is a JWT signed with a process-wide symmetric secret.
//! The claim set carries the tenant identity, the storage unit backing it,
//! and the issuance window:
//!
//! | Claim | Meaning |
//! |-------|---------|
//! | `sub` | Tenant identifier |
//! | `wallet` | Storage unit the tenant is bound to |
//! | `iat` | Issued-at, seconds since the epoch |
//! | `exp` | Expiry, seconds since the epoch |
//!
//! Callers may attach extra claims, but never under the four reserved
//! names above. Expiry is checked by the codec against a caller-supplied
//! `now` rather than by the JWT library, so simulated time and the
//! manager's tenant-liveness re-check both work.

pub mod claims;
pub mod codec;
pub mod error;
pub mod secret;

pub use claims::{RESERVED_CLAIMS, TokenClaims};
pub use codec::{TokenCodec, inspect_unverified};
pub use error::TokenError;
pub use secret::SigningSecret;
