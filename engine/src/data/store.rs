use anyhow::{anyhow, Context, Result};
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{error, info, warn};

use super::merge::deep_merge;
use crate::error::ThemeError;
use crate::registry::{ThemeRegistry, ThemeTree};

/// What `ThemeStore::apply` did with each stored theme.
#[derive(Debug, Default)]
pub struct StoreSummary {
    /// Stored overrides merged onto an already registered theme.
    pub merged: Vec<String>,
    /// Stored themes with no registered counterpart, registered as new.
    pub added: Vec<String>,
    pub rejected: Vec<(String, ThemeError)>,
}

/// Persists a registry's themes as one JSON object `{ name: tree, ... }`.
#[derive(Debug, Clone)]
pub struct ThemeStore {
    path: PathBuf,
    auto_save: bool,
}

impl ThemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            auto_save: true,
        }
    }

    pub fn with_auto_save(mut self, auto_save: bool) -> Self {
        self.auto_save = auto_save;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether callers should save after every successful runtime registration.
    pub fn auto_save(&self) -> bool {
        self.auto_save
    }

    /// Writes every registered theme in registration order.
    ///
    /// The JSON goes to a temporary file next to the store, which is then renamed
    /// over it, so readers never see a partly written store.
    pub fn save(&self, registry: &ThemeRegistry) -> Result<()> {
        let mut themes = Map::new();
        for (name, tree) in registry.themes() {
            themes.insert(name.to_string(), tree.as_value().clone());
        }

        let dir = match self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => parent,
            None => Path::new("."),
        };
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create store directory '{}'", dir.display()))?;

        let json = serde_json::to_string_pretty(&Value::Object(themes))?;
        let mut file = NamedTempFile::new_in(dir)
            .with_context(|| format!("Failed to create temporary file in '{}'", dir.display()))?;
        file.write_all(json.as_bytes())
            .with_context(|| format!("Failed to write theme store '{}'", self.path.display()))?;
        file.persist(&self.path)
            .with_context(|| format!("Failed to replace theme store '{}'", self.path.display()))?;

        info!(path = %self.path.display(), themes = registry.len(), "Saved theme store");
        Ok(())
    }

    /// Reads the stored themes. `Ok(None)` when nothing has been saved yet.
    pub fn load(&self) -> Result<Option<IndexMap<String, ThemeTree>>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read theme store '{}'", self.path.display()))?;
        let value: Value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse theme store '{}'", self.path.display()))?;

        match value {
            Value::Object(map) => Ok(Some(
                map.into_iter()
                    .map(|(name, tree)| (name, ThemeTree::from_value(tree)))
                    .collect(),
            )),
            _ => Err(anyhow!(
                "Theme store '{}' must hold an object of named themes",
                self.path.display()
            )),
        }
    }

    /// Merges stored themes into `registry`.
    ///
    /// A stored theme whose name is already registered is deep-merged onto the
    /// registered tree; an unknown name is registered as a new theme. Each result
    /// is validated; rejected entries leave the registry as it was.
    pub fn apply(registry: &mut ThemeRegistry, stored: IndexMap<String, ThemeTree>) -> StoreSummary {
        let mut summary = StoreSummary::default();
        for (name, overlay) in stored {
            let (merged, existed) = match registry.get(&name) {
                Ok(current) => {
                    let mut base = current.as_value().clone();
                    deep_merge(&mut base, overlay.as_value());
                    (ThemeTree::from_value(base), true)
                }
                Err(_) => (overlay, false),
            };

            match registry.register(name.clone(), merged) {
                Ok(()) if existed => summary.merged.push(name),
                Ok(()) => summary.added.push(name),
                Err(e) => {
                    warn!(theme = %name, "Stored theme rejected: {}", e);
                    summary.rejected.push((name, e));
                }
            }
        }
        summary
    }

    /// `load` followed by `apply`; an empty summary when nothing is stored.
    pub fn restore(&self, registry: &mut ThemeRegistry) -> Result<StoreSummary> {
        match self.load()? {
            Some(stored) => {
                let summary = Self::apply(registry, stored);
                info!(
                    path = %self.path.display(),
                    merged = summary.merged.len(),
                    added = summary.added.len(),
                    rejected = summary.rejected.len(),
                    "Restored theme store"
                );
                Ok(summary)
            }
            None => Ok(StoreSummary::default()),
        }
    }

    /// Like `restore`, but an unreadable or malformed store is logged and the
    /// registry is left as it was.
    pub fn restore_or_warn(&self, registry: &mut ThemeRegistry) -> StoreSummary {
        match self.restore(registry) {
            Ok(summary) => summary,
            Err(e) => {
                error!(path = %self.path.display(), "Stored themes not loaded: {:#}", e);
                StoreSummary::default()
            }
        }
    }
}
