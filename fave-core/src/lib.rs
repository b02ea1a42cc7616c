//! # fave-core
//!
//! Runtime plumbing shared by the fave crates: layered configuration
//! ([`FaveConfig`]) and the global `tracing` subscriber ([`init_tracing`]).

pub mod config;
pub mod layers;

pub use config::{
    ConfigError, ConfigProperties, ConfigValue, DatabaseConfig, DefaultSecretResolver, FaveConfig,
    FromConfigValue, LogConfig, LogFormat, SecretResolver,
};
pub use layers::init_tracing;
