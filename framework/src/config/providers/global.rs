//! Site-wide settings: public base URL and HTTPS enforcement

use url::Url;

use crate::config::keys;
use crate::config::sources::ConfigStore;

/// Global site configuration
#[derive(Debug, Clone)]
pub struct GlobalConfig {
    /// Public base URL of the site, when one could be resolved and parses
    /// as an absolute `scheme://host` URL.
    pub public_base_url: Option<Url>,
    /// Whether HTTPS is enforced.
    pub force_https: bool,
}

impl GlobalConfig {
    /// Build the config from the frozen store.
    pub fn from_store(store: &ConfigStore) -> Self {
        let public_base_url = store
            .get_nonblank(keys::PUBLIC_BASE_URL)
            .and_then(|raw| Url::parse(raw).ok())
            .filter(|url| url.host_str().is_some());
        let force_https = store
            .get_nonblank(keys::FORCE_HTTPS)
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Self {
            public_base_url,
            force_https,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::sources::ConfigSource;
    use pretty_assertions::assert_eq;

    fn store(pairs: &[(&str, &str)]) -> ConfigStore {
        let mut store = ConfigStore::new();
        store.push_back(ConfigSource::memory(
            "test",
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        ));
        store
    }

    #[test]
    fn test_from_store() {
        let store = store(&[
            (keys::PUBLIC_BASE_URL, "https://example.com"),
            (keys::FORCE_HTTPS, "True"),
        ]);
        let config = GlobalConfig::from_store(&store);

        assert_eq!(
            config.public_base_url.map(String::from),
            Some("https://example.com/".to_string())
        );
        assert!(config.force_https);
    }

    #[test]
    fn test_unparseable_url_becomes_none() {
        let store = store(&[(keys::PUBLIC_BASE_URL, "not a url")]);
        let config = GlobalConfig::from_store(&store);

        assert_eq!(config.public_base_url, None);
        assert!(!config.force_https);
    }
}
