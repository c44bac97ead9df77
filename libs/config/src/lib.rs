//! # Pool Factory Configuration
//!
//! Centralized protocol limits and runtime configuration for the pool
//! factory workspace, so that validation bounds live in exactly one place.
//!
//! ## Features
//!
//! - **Protocol Limits**: coin counts, decimal bounds, fee ceilings
//! - **Registry Configuration**: initial admin, fee receiver, implementation slots
//! - **Logging**: `tracing-subscriber` initialization with `RUST_LOG` overrides
//!
//! ## Usage
//!
//! ```rust
//! use factory_config::{limits, RegistryConfig};
//!
//! assert_eq!(limits::MAX_COINS, 8);
//!
//! let config = RegistryConfig::from_toml_str(r#"
//! admin = "0x1111111111111111111111111111111111111111"
//! fee_receiver = "0x2222222222222222222222222222222222222222"
//! "#).unwrap();
//! assert_eq!(config.log_level, "info");
//! ```

pub mod limits;
pub mod logging;
pub mod registry_config;

// Re-export commonly used types
pub use logging::init_logging;
pub use registry_config::{load_config, ImplementationConfig, RegistryConfig};
