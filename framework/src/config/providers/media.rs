//! Media storage configuration

use std::path::PathBuf;

use crate::config::keys;
use crate::config::sources::ConfigStore;

/// Media storage configuration
#[derive(Debug, Clone, Default)]
pub struct MediaConfig {
    /// Physical root path for uploaded media. `None` lets the host fall
    /// back to its relative default under the content root.
    pub physical_root_path: Option<PathBuf>,
}

impl MediaConfig {
    /// Build the config from the frozen store.
    pub fn from_store(store: &ConfigStore) -> Self {
        Self {
            physical_root_path: store
                .get_nonblank(keys::MEDIA_PHYSICAL_ROOT_PATH)
                .map(PathBuf::from),
        }
    }
}
