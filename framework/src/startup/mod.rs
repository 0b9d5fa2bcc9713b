//! Application bootstrap
//!
//! `boot` runs the whole startup sequence, strictly before anything else
//! reads configuration:
//!
//! 1. Load the `.env` layers and detect the environment.
//! 2. Capture the process environment into an immutable snapshot.
//! 3. Assemble the layered store: environment variables over the
//!    environment-specific settings file over the base settings file.
//! 4. Run the production override resolver and inject its output as the
//!    highest-priority source.
//! 5. Make sure the resolved media directory exists (best effort).
//! 6. Freeze the store in the global repository and register the typed
//!    providers.
//!
//! The sequence is synchronous and runs exactly once per process. Only a
//! malformed settings file aborts it; everything the resolver does falls
//! back instead of failing.

pub mod resolver;

pub use resolver::{resolve, Resolution};

use std::fs;
use std::path::Path;

use crate::config::env::{self, EnvSnapshot, Environment};
use crate::config::providers::{AppConfig, GlobalConfig, MediaConfig, TemplatesConfig};
use crate::config::repository;
use crate::config::sources::{ConfigSource, ConfigStore};
use crate::error::ConfigError;

/// Name of the override source injected by the resolver.
pub const OVERRIDES_SOURCE: &str = "startup-overrides";

/// Base settings file looked up under the project root.
pub const SETTINGS_FILE: &str = "settings.json";

/// What happened to the media directory during boot.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaDirOutcome {
    Created,
    AlreadyExists,
    Failed(String),
}

/// Record of what the boot sequence did.
#[derive(Debug, Clone, serde::Serialize)]
pub struct BootReport {
    /// Environment the process booted into.
    pub environment: Environment,
    /// Number of settings the resolver overrode.
    pub overrides_applied: usize,
    /// Media directory side effect, when one was scheduled.
    pub media_dir: Option<MediaDirOutcome>,
}

/// Run the startup sequence against the given project root.
///
/// # Example
///
/// ```rust,no_run
/// let report = plinth::startup::boot(std::path::Path::new(".")).unwrap();
/// println!("booted into {}", report.environment);
/// ```
pub fn boot(project_root: &Path) -> Result<BootReport, ConfigError> {
    let environment = env::load_dotenv(project_root);
    let snapshot = EnvSnapshot::capture();
    let mut store = layered_store(project_root, &snapshot, &environment)?;

    let resolution = resolver::resolve(&snapshot, &store, &environment);
    let overrides_applied = resolution.overrides().len();
    let media_dir = resolution.media_dir().map(ensure_media_dir);
    if overrides_applied > 0 {
        store.push_front(ConfigSource::memory(
            OVERRIDES_SOURCE,
            resolution.into_overrides(),
        ));
    }

    tracing::info!(
        environment = %environment,
        sources = ?store.source_names().collect::<Vec<_>>(),
        overrides_applied,
        "configuration assembled"
    );

    if !repository::install_store(store) {
        tracing::warn!("configuration store already installed, keeping the existing one");
    }
    register_providers(&snapshot);

    Ok(BootReport {
        environment,
        overrides_applied,
        media_dir,
    })
}

/// Assemble the pre-override layers for `project_root`.
pub fn layered_store(
    project_root: &Path,
    snapshot: &EnvSnapshot,
    environment: &Environment,
) -> Result<ConfigStore, ConfigError> {
    let mut store = ConfigStore::new();
    store.push_back(ConfigSource::from_env(snapshot));

    let env_settings = project_root.join(format!("settings.{}.json", environment.suffix()));
    if let Some(source) = ConfigSource::from_json_file(&env_settings)? {
        store.push_back(source);
    }
    if let Some(source) = ConfigSource::from_json_file(&project_root.join(SETTINGS_FILE))? {
        store.push_back(source);
    }

    Ok(store)
}

/// Make sure the media directory exists.
///
/// Failure is logged and reported, never propagated. The host raises a
/// clearer error later if the path is truly unusable.
pub fn ensure_media_dir(path: &Path) -> MediaDirOutcome {
    if path.is_dir() {
        return MediaDirOutcome::AlreadyExists;
    }
    match fs::create_dir_all(path) {
        Ok(()) => MediaDirOutcome::Created,
        Err(err) => {
            tracing::warn!(
                path = %path.display(),
                error = %err,
                "could not create media directory, continuing startup"
            );
            MediaDirOutcome::Failed(err.to_string())
        }
    }
}

fn register_providers(snapshot: &EnvSnapshot) {
    repository::register(AppConfig::from_snapshot(snapshot));
    if let Some(store) = repository::store() {
        repository::register(GlobalConfig::from_store(store));
        repository::register(MediaConfig::from_store(store));
        repository::register(TemplatesConfig::from_store(store));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::keys;
    use pretty_assertions::assert_eq;

    fn unique_temp_dir(label: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("plinth-startup-{}-{}", label, std::process::id()))
    }

    #[test]
    fn test_ensure_media_dir_creates_then_reports_existing() {
        let dir = unique_temp_dir("media").join("wwwroot").join("media");
        fs::remove_dir_all(&dir).ok();

        assert_eq!(ensure_media_dir(&dir), MediaDirOutcome::Created);
        assert!(dir.is_dir());
        assert_eq!(ensure_media_dir(&dir), MediaDirOutcome::AlreadyExists);

        fs::remove_dir_all(dir.parent().unwrap().parent().unwrap()).ok();
    }

    #[test]
    fn test_ensure_media_dir_failure_is_nonfatal_and_observable() {
        let dir = unique_temp_dir("media-blocked");
        fs::create_dir_all(&dir).unwrap();
        let blocker = dir.join("not-a-directory");
        fs::write(&blocker, "plain file").unwrap();

        // Creating a directory underneath a regular file cannot succeed.
        let outcome = ensure_media_dir(&blocker.join("media"));
        assert!(matches!(outcome, MediaDirOutcome::Failed(_)));

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_layered_store_precedence() {
        let root = unique_temp_dir("layers");
        fs::create_dir_all(&root).unwrap();
        fs::write(
            root.join("settings.json"),
            r#"{"global": {"force_https": false, "public_base_url": "http://localhost:8080"}}"#,
        )
        .unwrap();
        fs::write(
            root.join("settings.production.json"),
            r#"{"global": {"force_https": true}}"#,
        )
        .unwrap();

        let snapshot: EnvSnapshot = [(
            "PLINTH__GLOBAL__PUBLIC_BASE_URL".to_string(),
            "https://env.test".to_string(),
        )]
        .into_iter()
        .collect();

        let store = layered_store(&root, &snapshot, &Environment::Production).unwrap();

        // Environment beats both files, the environment-specific file beats
        // the base file, and the base file fills the rest in.
        assert_eq!(store.get(keys::PUBLIC_BASE_URL), Some("https://env.test"));
        assert_eq!(store.get(keys::FORCE_HTTPS), Some("true"));

        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_layered_store_skips_missing_files() {
        let root = unique_temp_dir("no-files");
        fs::create_dir_all(&root).unwrap();

        let store = layered_store(&root, &EnvSnapshot::default(), &Environment::Local).unwrap();
        assert_eq!(store.source_names().collect::<Vec<_>>(), vec!["environment"]);

        fs::remove_dir_all(&root).ok();
    }
}
