//! Production override resolution
//!
//! Hosted deployments arrive with configuration spread across environment
//! variables, settings files, and platform-supplied values, and those
//! sources routinely disagree. The resolver reconciles them in one pass at
//! boot: it derives the effective public base URL, HTTPS enforcement,
//! template codegen mode, and media root path, and emits them as a single
//! override map that outranks every source already loaded. Outside
//! production it does nothing.
//!
//! Resolution is a pure function of the environment snapshot and the
//! pre-override store. It never touches the filesystem; the one side effect
//! (making sure the media directory exists) is described in the returned
//! [`Resolution`] and carried out by the caller.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use url::Url;

use crate::config::env::{EnvSnapshot, Environment};
use crate::config::keys;
use crate::config::providers::CodegenMode;
use crate::config::sources::ConfigStore;

/// Where the hosting platform expects media, relative to the deployment
/// home directory.
const MEDIA_DIR_UNDER_HOME: [&str; 4] = ["site", "wwwroot", "wwwroot", "media"];

/// Output of a resolution pass: the override map to inject ahead of every
/// other source, plus the media directory the caller must ensure exists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    overrides: BTreeMap<String, String>,
    media_dir: Option<PathBuf>,
}

impl Resolution {
    /// True when the pass produced no overrides and no filesystem work.
    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty() && self.media_dir.is_none()
    }

    /// The resolved overrides, keyed by dotted configuration key.
    pub fn overrides(&self) -> &BTreeMap<String, String> {
        &self.overrides
    }

    /// Directory that must exist for media storage, when one was resolved.
    pub fn media_dir(&self) -> Option<&Path> {
        self.media_dir.as_deref()
    }

    pub fn into_overrides(self) -> BTreeMap<String, String> {
        self.overrides
    }
}

/// Reconcile the captured environment and the pre-override store into the
/// effective production settings.
///
/// Nothing here is fatal: a missing hostname, home directory, or settings
/// value just skips that derivation. A misconfigured deployment surfaces
/// later as an application symptom, not as a boot failure.
pub fn resolve(
    snapshot: &EnvSnapshot,
    store: &ConfigStore,
    environment: &Environment,
) -> Resolution {
    if !environment.is_production() {
        return Resolution::default();
    }

    let mut overrides = BTreeMap::new();

    // HTTPS is never optional in production, whatever other sources say.
    overrides.insert(keys::FORCE_HTTPS.to_string(), "true".to_string());

    if let Some(url) = resolve_public_base_url(snapshot, store, &overrides) {
        overrides.insert(keys::PUBLIC_BASE_URL.to_string(), url);
    }

    // Live template codegen must stay off in production.
    overrides.insert(
        keys::TEMPLATE_CODEGEN_MODE.to_string(),
        CodegenMode::Nothing.as_str().to_string(),
    );

    let media_dir = resolve_media_root(snapshot, store).map(|path| {
        overrides.insert(keys::MEDIA_PHYSICAL_ROOT_PATH.to_string(), path.clone());
        PathBuf::from(path)
    });

    Resolution {
        overrides,
        media_dir,
    }
}

/// First well-formed candidate out of: the explicit environment override,
/// the value already in the store, and `scheme://{hostname}` synthesized
/// from the platform hostname. The scheme follows the already-resolved
/// HTTPS enforcement setting.
fn resolve_public_base_url(
    snapshot: &EnvSnapshot,
    store: &ConfigStore,
    overrides: &BTreeMap<String, String>,
) -> Option<String> {
    let synthesized = snapshot.get_nonblank(keys::ENV_WEBSITE_HOSTNAME).map(|host| {
        let https = overrides.get(keys::FORCE_HTTPS).map(String::as_str) == Some("true");
        let scheme = if https { "https" } else { "http" };
        format!("{scheme}://{host}")
    });

    [
        snapshot
            .get_nonblank(keys::ENV_PUBLIC_BASE_URL)
            .map(str::to_string),
        store
            .get_nonblank(keys::PUBLIC_BASE_URL)
            .map(str::to_string),
        synthesized,
    ]
    .into_iter()
    .flatten()
    .find_map(|candidate| well_formed_base_url(&candidate))
}

/// A candidate qualifies when, after trimming, it parses as an absolute URL
/// with a host. Anything else is skipped so the next source gets a turn.
fn well_formed_base_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let url = Url::parse(trimmed).ok()?;
    url.host_str()?;
    Some(trimmed.to_string())
}

/// Media root resolution: explicit environment overrides win (the primary
/// name first, then the clipped alternate the platform sometimes leaves
/// behind), an existing store value is left untouched, and otherwise the
/// platform layout under the home directory is computed.
fn resolve_media_root(snapshot: &EnvSnapshot, store: &ConfigStore) -> Option<String> {
    let from_env = snapshot
        .get_nonblank(keys::ENV_MEDIA_PHYSICAL_ROOT_PATH)
        .or_else(|| snapshot.get_nonblank(keys::ENV_MEDIA_PHYSICAL_ROOT_PATH_TRUNCATED));
    if let Some(path) = from_env {
        return Some(path.to_string());
    }

    if store.get_nonblank(keys::MEDIA_PHYSICAL_ROOT_PATH).is_some() {
        return None;
    }

    snapshot
        .get_nonblank(keys::ENV_HOME)
        .map(default_media_path)
}

/// `{home}/site/wwwroot/wwwroot/media`, the layout the hosting platform
/// provisions for every deployment.
fn default_media_path(home: &str) -> String {
    let mut path = PathBuf::from(home);
    for segment in MEDIA_DIR_UNDER_HOME {
        path.push(segment);
    }
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::sources::ConfigSource;
    use pretty_assertions::assert_eq;

    fn snapshot(pairs: &[(&str, &str)]) -> EnvSnapshot {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn settings(pairs: &[(&str, &str)]) -> ConfigStore {
        let mut store = ConfigStore::new();
        store.push_back(ConfigSource::memory(
            "settings.json",
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        ));
        store
    }

    fn resolve_production(snapshot: &EnvSnapshot, store: &ConfigStore) -> Resolution {
        resolve(snapshot, store, &Environment::Production)
    }

    #[test]
    fn test_non_production_is_a_no_op() {
        let snap = snapshot(&[
            (keys::ENV_WEBSITE_HOSTNAME, "example.com"),
            (keys::ENV_HOME, "/home/site"),
        ]);
        let store = settings(&[(keys::FORCE_HTTPS, "false")]);

        for env in [
            Environment::Local,
            Environment::Development,
            Environment::Staging,
            Environment::Testing,
        ] {
            let resolution = resolve(&snap, &store, &env);
            assert!(resolution.is_empty());
            assert_eq!(resolution.media_dir(), None);
        }
    }

    #[test]
    fn test_force_https_is_unconditional() {
        let snap = snapshot(&[("PLINTH__GLOBAL__FORCE_HTTPS", "false")]);
        let store = settings(&[(keys::FORCE_HTTPS, "false")]);
        let resolution = resolve_production(&snap, &store);

        assert_eq!(
            resolution.overrides().get(keys::FORCE_HTTPS).map(String::as_str),
            Some("true")
        );
    }

    #[test]
    fn test_codegen_mode_is_always_disabled() {
        let store = settings(&[(keys::TEMPLATE_CODEGEN_MODE, "Auto")]);
        let resolution = resolve_production(&EnvSnapshot::default(), &store);

        assert_eq!(
            resolution
                .overrides()
                .get(keys::TEMPLATE_CODEGEN_MODE)
                .map(String::as_str),
            Some("Nothing")
        );
    }

    #[test]
    fn test_public_url_synthesized_from_hostname() {
        let snap = snapshot(&[(keys::ENV_WEBSITE_HOSTNAME, "example.com")]);
        let resolution = resolve_production(&snap, &ConfigStore::new());

        assert_eq!(
            resolution
                .overrides()
                .get(keys::PUBLIC_BASE_URL)
                .map(String::as_str),
            Some("https://example.com")
        );
    }

    #[test]
    fn test_explicit_public_url_wins_and_is_trimmed() {
        let snap = snapshot(&[
            (keys::ENV_PUBLIC_BASE_URL, "  https://foo.test  "),
            (keys::ENV_WEBSITE_HOSTNAME, "example.com"),
        ]);
        let store = settings(&[(keys::PUBLIC_BASE_URL, "https://bar.test")]);
        let resolution = resolve_production(&snap, &store);

        assert_eq!(
            resolution
                .overrides()
                .get(keys::PUBLIC_BASE_URL)
                .map(String::as_str),
            Some("https://foo.test")
        );
    }

    #[test]
    fn test_malformed_candidates_fall_through() {
        let snap = snapshot(&[
            (keys::ENV_PUBLIC_BASE_URL, "not a url"),
            (keys::ENV_WEBSITE_HOSTNAME, "example.com"),
        ]);
        let resolution = resolve_production(&snap, &ConfigStore::new());

        assert_eq!(
            resolution
                .overrides()
                .get(keys::PUBLIC_BASE_URL)
                .map(String::as_str),
            Some("https://example.com")
        );
    }

    #[test]
    fn test_missing_public_url_sources_leave_setting_unset() {
        let resolution = resolve_production(&EnvSnapshot::default(), &ConfigStore::new());

        assert_eq!(resolution.overrides().get(keys::PUBLIC_BASE_URL), None);
        // The unconditional pair is still emitted.
        assert_eq!(resolution.overrides().len(), 2);
    }

    #[test]
    fn test_media_path_computed_from_home() {
        let snap = snapshot(&[(keys::ENV_HOME, "/home/site")]);
        let resolution = resolve_production(&snap, &ConfigStore::new());

        let expected = "/home/site/site/wwwroot/wwwroot/media";
        assert_eq!(
            resolution
                .overrides()
                .get(keys::MEDIA_PHYSICAL_ROOT_PATH)
                .map(String::as_str),
            Some(expected)
        );
        assert_eq!(resolution.media_dir(), Some(Path::new(expected)));
    }

    #[test]
    fn test_media_env_override_beats_computed_path() {
        let snap = snapshot(&[
            (keys::ENV_MEDIA_PHYSICAL_ROOT_PATH, "/mnt/media"),
            (keys::ENV_HOME, "/home/site"),
        ]);
        let resolution = resolve_production(&snap, &ConfigStore::new());

        assert_eq!(
            resolution
                .overrides()
                .get(keys::MEDIA_PHYSICAL_ROOT_PATH)
                .map(String::as_str),
            Some("/mnt/media")
        );
        assert_eq!(resolution.media_dir(), Some(Path::new("/mnt/media")));
    }

    #[test]
    fn test_media_truncated_name_is_a_valid_fallback() {
        let snap = snapshot(&[
            (keys::ENV_MEDIA_PHYSICAL_ROOT_PATH_TRUNCATED, "/mnt/clipped"),
            (keys::ENV_HOME, "/home/site"),
        ]);
        let resolution = resolve_production(&snap, &ConfigStore::new());

        // The value surfaces under the primary key regardless of which
        // variable carried it.
        assert_eq!(
            resolution
                .overrides()
                .get(keys::MEDIA_PHYSICAL_ROOT_PATH)
                .map(String::as_str),
            Some("/mnt/clipped")
        );
    }

    #[test]
    fn test_media_existing_configuration_is_left_alone() {
        let snap = snapshot(&[(keys::ENV_HOME, "/home/site")]);
        let store = settings(&[(keys::MEDIA_PHYSICAL_ROOT_PATH, "custom/media")]);
        let resolution = resolve_production(&snap, &store);

        assert_eq!(
            resolution.overrides().get(keys::MEDIA_PHYSICAL_ROOT_PATH),
            None
        );
        assert_eq!(resolution.media_dir(), None);
    }

    #[test]
    fn test_media_unresolvable_without_home_or_overrides() {
        let resolution = resolve_production(&EnvSnapshot::default(), &ConfigStore::new());

        assert_eq!(
            resolution.overrides().get(keys::MEDIA_PHYSICAL_ROOT_PATH),
            None
        );
        assert_eq!(resolution.media_dir(), None);
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let snap = snapshot(&[
            (keys::ENV_WEBSITE_HOSTNAME, "example.com"),
            (keys::ENV_HOME, "/home/site"),
        ]);
        let store = settings(&[(keys::FORCE_HTTPS, "false")]);

        let first = resolve_production(&snap, &store);
        let second = resolve_production(&snap, &store);
        assert_eq!(first, second);
    }
}
