//! Framework-wide error types
//!
//! Startup treats absent data (missing variables, blank values) as fallbacks,
//! not failures. The only fatal condition while assembling configuration is a
//! settings file that exists on disk but cannot be read or parsed.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while assembling the layered configuration store.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A settings file exists but could not be read.
    #[error("failed to read settings file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A settings file exists but does not contain valid JSON.
    #[error("failed to parse settings file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
