//! Layered configuration sources
//!
//! Configuration is assembled from an ordered list of named sources. Each
//! source is an immutable key/value map; the store scans the list front to
//! back and the first source that defines a key wins. Precedence is
//! therefore fixed by the order sources are inserted, not by mutating values
//! in place.
//!
//! # Example
//!
//! ```rust
//! use plinth::config::sources::{ConfigSource, ConfigStore};
//!
//! let mut store = ConfigStore::new();
//! store.push_back(ConfigSource::memory(
//!     "defaults",
//!     [("global.force_https".to_string(), "false".to_string())].into(),
//! ));
//! store.push_front(ConfigSource::memory(
//!     "overrides",
//!     [("global.force_https".to_string(), "true".to_string())].into(),
//! ));
//! assert_eq!(store.get("global.force_https"), Some("true"));
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde_json::Value;

use crate::config::env::EnvSnapshot;
use crate::config::keys;
use crate::error::ConfigError;

/// A named, immutable key/value source.
#[derive(Debug, Clone)]
pub struct ConfigSource {
    name: String,
    values: BTreeMap<String, String>,
}

impl ConfigSource {
    /// In-memory source, typically used for startup overrides.
    pub fn memory(name: impl Into<String>, values: BTreeMap<String, String>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Source backed by `PLINTH__`-prefixed environment variables.
    ///
    /// `PLINTH__GLOBAL__FORCE_HTTPS=true` becomes `global.force_https=true`.
    /// Variables without the prefix are ignored, and so are declared-but-blank
    /// ones: a blank variable must not shadow a real value in a lower layer.
    pub fn from_env(snapshot: &EnvSnapshot) -> Self {
        let values = snapshot
            .iter()
            .filter_map(|(name, value)| {
                let rest = name.strip_prefix(keys::ENV_PREFIX)?;
                if value.trim().is_empty() {
                    return None;
                }
                Some((env_name_to_key(rest), value.to_string()))
            })
            .collect();
        Self {
            name: "environment".to_string(),
            values,
        }
    }

    /// Source backed by a JSON settings file.
    ///
    /// A missing file is not an error (`Ok(None)`); the file layers are all
    /// optional. Nested objects flatten to dotted keys, array elements get
    /// their index as a segment, and `null` entries are skipped.
    pub fn from_json_file(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.is_file() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let document: Value = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let mut values = BTreeMap::new();
        flatten(&document, String::new(), &mut values);
        Ok(Some(Self {
            name: path.display().to_string(),
            values,
        }))
    }

    /// Source name, used in logs.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value for `key` in this source alone.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// `GLOBAL__FORCE_HTTPS` (prefix already stripped) to `global.force_https`.
fn env_name_to_key(name: &str) -> String {
    name.split("__")
        .map(|segment| segment.to_ascii_lowercase())
        .collect::<Vec<_>>()
        .join(".")
}

fn flatten(value: &Value, prefix: String, out: &mut BTreeMap<String, String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten(child, path, out);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                flatten(child, format!("{prefix}.{index}"), out);
            }
        }
        Value::String(s) => {
            out.insert(prefix, s.clone());
        }
        Value::Bool(_) | Value::Number(_) => {
            out.insert(prefix, value.to_string());
        }
        Value::Null => {}
    }
}

/// Ordered list of configuration sources, highest priority first.
///
/// Built once during boot and frozen afterwards; nothing reads the store
/// until the startup sequence has finished inserting sources.
#[derive(Debug, Clone, Default)]
pub struct ConfigStore {
    sources: Vec<ConfigSource>,
}

impl ConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a source with lower priority than everything already present.
    pub fn push_back(&mut self, source: ConfigSource) {
        self.sources.push(source);
    }

    /// Insert a source that overrides everything already present.
    pub fn push_front(&mut self, source: ConfigSource) {
        self.sources.insert(0, source);
    }

    /// First-match-wins lookup across the sources.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.sources.iter().find_map(|source| source.get(key))
    }

    /// Like [`get`](Self::get), but trims the value and treats blanks as
    /// absent.
    pub fn get_nonblank(&self, key: &str) -> Option<&str> {
        self.get(key).map(str::trim).filter(|v| !v.is_empty())
    }

    /// Source names in priority order, used in logs.
    pub fn source_names(&self) -> impl Iterator<Item = &str> {
        self.sources.iter().map(ConfigSource::name)
    }
}
