//! Plinth startup layer
//!
//! Everything a hosted site needs before its first request: assembling the
//! layered configuration store and reconciling it against the deployment
//! environment. The request pipeline itself lives outside this crate; by
//! the time it takes over, the store is frozen and the typed providers are
//! registered.

pub mod config;
pub mod error;
pub mod startup;

pub use config::{AppConfig, CodegenMode, GlobalConfig, MediaConfig, TemplatesConfig};
pub use config::{Config, EnvSnapshot, Environment};
pub use error::ConfigError;
pub use startup::{BootReport, MediaDirOutcome};
