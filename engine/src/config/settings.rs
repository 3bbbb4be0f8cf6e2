// Engine settings, loaded from an optional JSON file
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::data::ThemeStore;
use crate::error::ThemeError;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct EngineSettings {
    pub host: String,
    pub port: u16,
    /// Used by the service only when a request names no theme.
    pub default_theme: String,
    /// Extra theme files registered at startup.
    pub themes_dir: Option<PathBuf>,
    pub store: StoreSettings,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct StoreSettings {
    pub path: Option<PathBuf>,
    pub auto_save: bool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            host: "localhost".to_string(),
            port: 50051,
            default_theme: "Light".to_string(),
            themes_dir: None,
            store: StoreSettings::default(),
        }
    }
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            path: None,
            auto_save: true,
        }
    }
}

impl EngineSettings {
    pub fn load(path: &Path) -> Result<Self, ThemeError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ThemeError::ConfigError(format!("cannot read '{}': {}", path.display(), e))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            ThemeError::ConfigError(format!("invalid settings in '{}': {}", path.display(), e))
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// The configured theme store, if persistence is enabled.
    pub fn theme_store(&self) -> Option<ThemeStore> {
        self.store
            .path
            .as_ref()
            .map(|path| ThemeStore::new(path).with_auto_save(self.store.auto_save))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let settings = EngineSettings::default();
        assert_eq!(settings.listen_addr(), "localhost:50051");
        assert_eq!(settings.default_theme, "Light");
        assert!(settings.store.auto_save);
        assert!(settings.theme_store().is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"{{"port": 6000, "default_theme": "Dark", "store": {{"path": "/tmp/themes.json", "auto_save": false}}}}"#
        )
        .unwrap();
        let settings = EngineSettings::load(file.path()).unwrap();
        assert_eq!(settings.port, 6000);
        assert_eq!(settings.host, "localhost");
        assert_eq!(settings.default_theme, "Dark");
        let store = settings.theme_store().unwrap();
        assert!(!store.auto_save());
        assert_eq!(store.path(), Path::new("/tmp/themes.json"));
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{{ \"port\": \"not a number\" }}").unwrap();
        let err = EngineSettings::load(file.path()).unwrap_err();
        assert!(matches!(err, ThemeError::ConfigError(_)));

        let err = EngineSettings::load(Path::new("/definitely/missing.json")).unwrap_err();
        assert!(matches!(err, ThemeError::ConfigError(_)));
    }
}
