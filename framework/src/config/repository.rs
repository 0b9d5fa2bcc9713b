//! Global configuration repository
//!
//! Home of the frozen [`ConfigStore`] plus the typed provider instances
//! derived from it. The store is installed exactly once at the end of the
//! boot sequence and is immutable for the rest of the process lifetime;
//! providers are plain values registered by type and handed out by clone.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{OnceLock, RwLock};

use crate::config::sources::ConfigStore;

static STORE: OnceLock<ConfigStore> = OnceLock::new();

static PROVIDERS: OnceLock<RwLock<HashMap<TypeId, Box<dyn Any + Send + Sync>>>> = OnceLock::new();

/// Install the frozen store. Returns `false` if a store was already
/// installed, in which case the existing one is kept.
pub fn install_store(store: ConfigStore) -> bool {
    STORE.set(store).is_ok()
}

/// The frozen store, if boot has completed.
pub fn store() -> Option<&'static ConfigStore> {
    STORE.get()
}

/// Register a typed provider instance, replacing any previous one.
pub fn register<T: Any + Send + Sync + 'static>(provider: T) {
    let providers = PROVIDERS.get_or_init(|| RwLock::new(HashMap::new()));
    if let Ok(mut providers) = providers.write() {
        providers.insert(TypeId::of::<T>(), Box::new(provider));
    }
}

/// Fetch a clone of a registered provider.
pub fn get<T: Any + Send + Sync + Clone + 'static>() -> Option<T> {
    let providers = PROVIDERS.get()?;
    let providers = providers.read().ok()?;
    providers
        .get(&TypeId::of::<T>())
        .and_then(|boxed| boxed.downcast_ref::<T>())
        .cloned()
}

/// Check whether a provider of type `T` has been registered.
pub fn has<T: Any + 'static>() -> bool {
    PROVIDERS
        .get()
        .and_then(|providers| providers.read().ok())
        .map(|providers| providers.contains_key(&TypeId::of::<T>()))
        .unwrap_or(false)
}
