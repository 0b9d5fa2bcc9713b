//! Configuration module for the Plinth startup layer
//!
//! Layered, Laravel-flavored configuration management:
//! - automatic `.env` file loading with environment-based precedence
//! - an ordered store of named sources (startup overrides, environment
//!   variables, settings files) resolved first-match-wins
//! - typed providers for the settings the host reads at initialization
//!
//! # Example
//!
//! ```rust,no_run
//! use plinth::{Config, GlobalConfig};
//!
//! fn main() -> Result<(), plinth::ConfigError> {
//!     let report = Config::init(std::path::Path::new("."))?;
//!     println!("booted into {}", report.environment);
//!
//!     if let Some(global) = Config::get::<GlobalConfig>() {
//!         println!("forcing https: {}", global.force_https);
//!     }
//!     Ok(())
//! }
//! ```

pub mod env;
pub mod keys;
pub mod providers;
pub mod repository;
pub mod sources;

pub use env::{load_dotenv, EnvSnapshot, Environment};
pub use providers::{AppConfig, CodegenMode, GlobalConfig, MediaConfig, TemplatesConfig};

use std::path::Path;

use crate::error::ConfigError;
use crate::startup::{self, BootReport};

/// Main Config facade for accessing configuration
///
/// `Config::init` runs the boot sequence once at application startup;
/// afterwards the frozen store and the typed providers are available
/// process-wide through the other methods.
pub struct Config;

impl Config {
    /// Run the boot sequence: load the `.env` layers, assemble the layered
    /// store, apply the production overrides, and register the typed
    /// providers.
    pub fn init(project_root: &Path) -> Result<BootReport, ConfigError> {
        startup::boot(project_root)
    }

    /// Raw value of a dotted configuration key from the frozen store.
    pub fn value(key: &str) -> Option<String> {
        repository::store()
            .and_then(|store| store.get(key))
            .map(str::to_string)
    }

    /// Get a typed provider registered during boot.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use plinth::{Config, MediaConfig};
    ///
    /// let media = Config::get::<MediaConfig>().unwrap_or_default();
    /// println!("media root: {:?}", media.physical_root_path);
    /// ```
    pub fn get<T: std::any::Any + Send + Sync + Clone + 'static>() -> Option<T> {
        repository::get::<T>()
    }

    /// Register a custom provider instance.
    pub fn register<T: std::any::Any + Send + Sync + 'static>(provider: T) {
        repository::register(provider);
    }

    /// Check if a provider type is registered.
    pub fn has<T: std::any::Any + 'static>() -> bool {
        repository::has::<T>()
    }

    /// The current environment, from the registered [`AppConfig`] when boot
    /// has run, otherwise detected from the process environment.
    pub fn environment() -> Environment {
        Self::get::<AppConfig>()
            .map(|config| config.environment)
            .unwrap_or_else(Environment::detect)
    }

    /// Check if running in production environment
    pub fn is_production() -> bool {
        Self::environment().is_production()
    }

    /// Check if running in development environment (local or development)
    pub fn is_development() -> bool {
        Self::environment().is_development()
    }

    /// Check if debug mode is enabled
    pub fn is_debug() -> bool {
        Self::get::<AppConfig>()
            .map(|config| config.debug)
            .unwrap_or(true)
    }
}
