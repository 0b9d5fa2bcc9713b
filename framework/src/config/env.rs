//! Environment detection and process-environment snapshots
//!
//! The deployment environment is selected with the `APP_ENV` variable.
//! Everything else startup reads from the environment goes through an
//! [`EnvSnapshot`]: an immutable capture of the process environment taken
//! once, so the resolution logic is a plain function of its inputs and can
//! be exercised in tests without touching the real process environment.

use std::collections::BTreeMap;
use std::path::Path;

/// Environment type enumeration
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Local,
    Development,
    Staging,
    Production,
    Testing,
    Custom(String),
}

impl Environment {
    /// Detect the environment from the current process environment.
    pub fn detect() -> Self {
        Self::from_value(std::env::var("APP_ENV").ok().as_deref())
    }

    /// Detect the environment from a captured snapshot.
    pub fn from_snapshot(snapshot: &EnvSnapshot) -> Self {
        Self::from_value(snapshot.get_nonblank("APP_ENV"))
    }

    fn from_value(value: Option<&str>) -> Self {
        match value {
            Some("production") => Self::Production,
            Some("staging") => Self::Staging,
            Some("development") => Self::Development,
            Some("testing") => Self::Testing,
            Some("local") | None => Self::Local,
            Some(other) => Self::Custom(other.to_string()),
        }
    }

    /// File-name suffix for environment-specific configuration
    /// (`.env.{suffix}`, `settings.{suffix}.json`).
    pub fn suffix(&self) -> &str {
        match self {
            Self::Local => "local",
            Self::Development => "development",
            Self::Staging => "staging",
            Self::Production => "production",
            Self::Testing => "testing",
            Self::Custom(name) => name.as_str(),
        }
    }

    /// Check if this is a production environment
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    /// Check if this is a development environment (local or development)
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Local | Self::Development)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.suffix())
    }
}

/// Immutable capture of the process environment.
///
/// Taken once at the top of the boot sequence, after the `.env` layers have
/// been loaded. Lookups treat blank values the same as missing ones, which
/// matches how hosting platforms hand over unset-but-declared variables.
///
/// # Example
///
/// ```rust
/// use plinth::EnvSnapshot;
///
/// let snapshot: EnvSnapshot = [("WEBSITE_HOSTNAME", "example.com")]
///     .into_iter()
///     .map(|(k, v)| (k.to_string(), v.to_string()))
///     .collect();
/// assert_eq!(snapshot.get_nonblank("WEBSITE_HOSTNAME"), Some("example.com"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct EnvSnapshot {
    vars: BTreeMap<String, String>,
}

impl EnvSnapshot {
    /// Capture the current process environment.
    pub fn capture() -> Self {
        std::env::vars().collect()
    }

    /// Raw lookup, blank values included.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Lookup that trims the value and treats blanks as absent.
    pub fn get_nonblank(&self, key: &str) -> Option<&str> {
        self.get(key).map(str::trim).filter(|v| !v.is_empty())
    }

    /// Parse a variable into `T`, falling back to `default` when the
    /// variable is missing, blank, or unparseable.
    pub fn parse<T: std::str::FromStr>(&self, key: &str, default: T) -> T {
        self.get_nonblank(key)
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    /// Iterate over all captured variables.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for EnvSnapshot {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            vars: iter.into_iter().collect(),
        }
    }
}

/// Load environment variables from .env files with proper precedence
///
/// Precedence (later files override earlier):
/// 1. .env (base defaults)
/// 2. .env.local (local overrides, not committed)
/// 3. .env.{environment} (environment-specific)
/// 4. .env.{environment}.local (environment-specific local overrides)
/// 5. Actual system environment variables (highest priority)
///
/// Files are loaded most-specific first because `dotenvy` never overwrites a
/// variable that is already set, so the less specific layers cannot clobber
/// the more specific ones.
pub fn load_dotenv(project_root: &Path) -> Environment {
    let env = Environment::detect();

    let layers = [
        format!(".env.{}.local", env.suffix()),
        format!(".env.{}", env.suffix()),
        ".env.local".to_string(),
        ".env".to_string(),
    ];
    for layer in layers {
        let _ = dotenvy::from_path(project_root.join(layer));
    }

    env
}
