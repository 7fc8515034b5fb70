//! # keyward-wallet
//!
//! Wallet storage for the Keyward multitenant manager.
//!
//! This crate provides:
//! - The [`WalletStore`] trait the host implements over its storage engine,
//!   plus an in-memory implementation for tests and local development
//! - Wallet key material and the salted verifier recorded for key checks
//! - The two provisioning strategies: one dedicated wallet per tenant, or
//!   one shared wallet for the whole process
//!
//! Strategy selection is a closed set driven by configuration; see
//! [`strategy_for`].

pub mod error;
pub mod key;
pub mod store;
pub mod strategy;

pub use error::WalletError;
pub use key::{KeyVerifier, WalletKey};
pub use store::{InMemoryWalletStore, WalletStore};
pub use strategy::{MultiWalletStrategy, SingleWalletStrategy, WalletStrategy, strategy_for};
