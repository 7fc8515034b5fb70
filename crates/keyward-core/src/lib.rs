// Shared types used across all Keyward crates: identifiers, the clock
// abstraction, and the unified configuration model.

pub mod clock;
pub mod config;
pub mod ids;

// Re-export commonly used types for convenience
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{
    ConfigError,
    ErrorsConfig,
    ExpiryUnit,
    KeywardConfig,
    ManagerConfig,
    SigningAlgorithm,
    SigningConfig,
    StoreConfig,
    TokenExpiryConfig,
    WalletStrategyKind,
};
pub use ids::{TenantId, WalletId};
