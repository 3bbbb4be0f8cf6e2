use std::sync::Arc;

use arc_swap::ArcSwap;
use tracing::debug;

use super::{ThemeRegistry, ThemeTree};
use crate::error::ThemeError;

/// A registry that many threads read while others register themes.
///
/// Readers take an immutable snapshot; a writer validates, copies the current
/// registry, inserts, and publishes the copy with compare-and-swap. A reader
/// holding a snapshot keeps seeing it unchanged.
#[derive(Debug)]
pub struct SharedRegistry {
    snap: ArcSwap<ThemeRegistry>,
}

impl SharedRegistry {
    pub fn new(registry: ThemeRegistry) -> Self {
        Self {
            snap: ArcSwap::from_pointee(registry),
        }
    }

    /// The registry as currently published.
    pub fn snapshot(&self) -> Arc<ThemeRegistry> {
        self.snap.load_full()
    }

    pub fn get(&self, name: &str) -> Result<Arc<ThemeTree>, ThemeError> {
        self.snap.load().get(name)
    }

    pub fn names(&self) -> Vec<String> {
        self.snap.load().names().map(str::to_string).collect()
    }

    /// Registers `tree` under `name`, retrying if another writer published first.
    pub fn register(&self, name: impl Into<String>, tree: ThemeTree) -> Result<(), ThemeError> {
        let name = name.into();
        loop {
            let old = self.snap.load_full();
            let mut next = ThemeRegistry::clone(&old);
            next.register(name.clone(), tree.clone())?;

            let prev = self.snap.compare_and_swap(&old, Arc::new(next));
            if Arc::ptr_eq(&prev, &old) {
                return Ok(());
            }
            debug!(theme = %name, "Registry changed during registration, retrying");
        }
    }

    /// Replaces the whole registry, e.g. after a batch load.
    pub fn publish(&self, registry: ThemeRegistry) {
        self.snap.store(Arc::new(registry));
    }
}
