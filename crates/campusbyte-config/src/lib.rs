//! # Campusbyte Config
//!
//! Configuration types for the Campusbyte API, loaded from environment variables:
//!
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`provisioning`]: default password and hashing cost for new accounts
//! - [`server`]: listen address
//! - [`store`]: persistence backend selection
//!
//! # Example
//!
//! ```ignore
//! use campusbyte_config::{CorsConfig, ProvisioningConfig, ServerConfig, StoreConfig};
//!
//! let cors_config = CorsConfig::from_env();
//! let provisioning = ProvisioningConfig::from_env();
//! let server = ServerConfig::from_env();
//! let store = StoreConfig::from_env();
//! ```

pub mod cors;
pub mod provisioning;
pub mod server;
pub mod store;

pub use cors::CorsConfig;
pub use provisioning::ProvisioningConfig;
pub use server::ServerConfig;
pub use store::{StoreBackend, StoreConfig};
