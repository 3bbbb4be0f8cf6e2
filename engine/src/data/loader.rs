use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::registry::{ThemeRegistry, ThemeTree};

/// Outcome of registering a directory of theme files.
#[derive(Debug, Default)]
pub struct LoadSummary {
    pub registered: Vec<String>,
    /// Files that could not be read, parsed or validated, with the reason.
    pub rejected: Vec<(PathBuf, anyhow::Error)>,
}

impl LoadSummary {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

pub struct ThemeLoader;

impl ThemeLoader {
    /// Reads one theme file. The theme is named by its `"name"` field, or the file stem.
    pub fn load_file(path: &Path) -> Result<(String, ThemeTree)> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read theme file '{}'", path.display()))?;
        let tree = ThemeTree::from_json_str(&content)
            .with_context(|| format!("Failed to parse theme file '{}'", path.display()))?;

        let name = match tree.declared_name() {
            Some(name) => name.to_string(),
            None => path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .map(str::to_string)
                .ok_or_else(|| anyhow!("Cannot derive a theme name from '{}'", path.display()))?,
        };
        Ok((name, tree))
    }

    /// Every `*.json` file in `dir`, sorted by file name. Each file gets its own result.
    pub fn load_dir(dir: &Path) -> Result<Vec<(PathBuf, Result<(String, ThemeTree)>)>> {
        let mut paths: Vec<PathBuf> = fs::read_dir(dir)
            .with_context(|| format!("Failed to read theme directory '{}'", dir.display()))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file() && path.extension().map_or(false, |ext| ext == "json"))
            .collect();
        paths.sort();

        Ok(paths
            .into_iter()
            .map(|path| {
                let loaded = Self::load_file(&path);
                (path, loaded)
            })
            .collect())
    }

    /// Registers every theme file in `dir`. A bad file is logged and collected
    /// in the summary; the rest of the directory is still registered.
    pub fn register_dir(registry: &mut ThemeRegistry, dir: &Path) -> Result<LoadSummary> {
        let mut summary = LoadSummary::default();
        for (path, loaded) in Self::load_dir(dir)? {
            let outcome = loaded.and_then(|(name, tree)| {
                registry.register(name.clone(), tree)?;
                Ok(name)
            });
            match outcome {
                Ok(name) => summary.registered.push(name),
                Err(e) => {
                    warn!(path = %path.display(), "Skipping theme file: {:#}", e);
                    summary.rejected.push((path, e));
                }
            }
        }
        info!(
            dir = %dir.display(),
            registered = summary.registered.len(),
            rejected = summary.rejected.len(),
            "Loaded theme directory"
        );
        Ok(summary)
    }
}
