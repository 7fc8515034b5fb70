//! # keyward-manager
//!
//! The manager facade for the Keyward multitenant token manager: the
//! single entry point the host calls to register tenants, mint tokens,
//! remove tenants, and authorize presented tokens.
//!
//! The facade composes a wallet strategy (which physical storage unit
//! backs a tenant) with the token policy (wallet-key admission, expiry,
//! claim assembly) and the token codec. Operations on different tenants
//! run in parallel; operations on the same tenant are serialized by a
//! per-tenant async mutex so a removal can never race a token grant.

pub mod error;
pub mod manager;
pub mod policy;
pub mod registry;

pub use error::ManagerError;
pub use manager::{CreateTenantRequest, CreatedTenant, TokenManager};
pub use policy::TokenPolicy;
pub use registry::{TenantEntry, TenantRegistry};
