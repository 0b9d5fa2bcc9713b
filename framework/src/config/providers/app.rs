//! Application-level configuration

use crate::config::env::{EnvSnapshot, Environment};

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Application name
    pub name: String,
    /// Current environment
    pub environment: Environment,
    /// Debug mode enabled
    pub debug: bool,
}

impl AppConfig {
    /// Build the config from a captured environment snapshot.
    pub fn from_snapshot(snapshot: &EnvSnapshot) -> Self {
        Self {
            name: snapshot
                .get_nonblank("APP_NAME")
                .unwrap_or("Plinth Application")
                .to_string(),
            environment: Environment::from_snapshot(snapshot),
            debug: snapshot.parse("APP_DEBUG", true),
        }
    }

    /// Check if debug mode is enabled
    pub fn is_debug(&self) -> bool {
        self.debug
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_snapshot() {
        let snapshot: EnvSnapshot = [
            ("APP_NAME", "My Site"),
            ("APP_ENV", "production"),
            ("APP_DEBUG", "false"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let config = AppConfig::from_snapshot(&snapshot);
        assert_eq!(config.name, "My Site");
        assert!(config.is_production());
        assert!(!config.is_debug());
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_snapshot(&EnvSnapshot::default());
        assert_eq!(config.name, "Plinth Application");
        assert_eq!(config.environment, Environment::Local);
        assert!(config.debug);
    }
}
