//! Configuration management
//!
//! TOML-based configuration with `${VAR}` substitution, `MERIDIAN_*`
//! environment overrides, typed validation, and secret-wrapped credentials.

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::load_config;
pub use schema::{
    ApplicationConfig, AuthConfig, BootstrapConfig, Environment, LoggingConfig, MeridianConfig,
    StorageBackend, StorageConfig,
};
pub use secret::{SecretString, SecretValue};
