//! Named theme trees, validated against a style schema before they become visible.
//!
//! A registry is an explicit value. Readers share published trees through
//! `Arc`, and registration swaps whole trees, so a tree handed out by `get`
//! never changes underneath its holder. For concurrent writers see
//! [`SharedRegistry`].

mod shared_registry;

pub use self::shared_registry::SharedRegistry;

use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::StylePath;
use tracing::{info, warn};

use crate::data::BUILTIN_THEMES;
use crate::error::ThemeError;
use crate::resolver::StyleResolver;
use crate::schema::{chart_schema, StyleSchema, ValidationReport};

/// Nested plain-data theme, exactly as authored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThemeTree(Value);

impl ThemeTree {
    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ThemeError> {
        Ok(Self(serde_json::from_str(json)?))
    }

    /// Walks `path` from the root. `null` nodes count as absent.
    pub fn get(&self, path: &StylePath) -> Option<&Value> {
        let mut node = &self.0;
        for segment in path.iter() {
            node = node.as_object()?.get(segment)?;
            if node.is_null() {
                return None;
            }
        }
        Some(node)
    }

    /// The `"name"` the author gave the theme, if any.
    pub fn declared_name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for ThemeTree {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone)]
pub struct ThemeRegistry {
    schema: Arc<StyleSchema>,
    themes: IndexMap<String, Arc<ThemeTree>>,
}

impl Default for ThemeRegistry {
    fn default() -> Self {
        Self::new(chart_schema())
    }
}

impl ThemeRegistry {
    pub fn new(schema: StyleSchema) -> Self {
        Self {
            schema: Arc::new(schema),
            themes: IndexMap::new(),
        }
    }

    /// A chart-schema registry holding the embedded `Dark`, `Light` and `Beet` themes.
    pub fn with_builtin_themes() -> Result<Self, ThemeError> {
        let mut registry = Self::default();
        for builtin in BUILTIN_THEMES {
            let tree = ThemeTree::from_json_str(builtin.json)?;
            registry.register(builtin.name, tree)?;
        }
        Ok(registry)
    }

    pub fn schema(&self) -> &StyleSchema {
        &self.schema
    }

    /// Exact, case-sensitive lookup. Never falls back to another theme.
    pub fn get(&self, name: &str) -> Result<Arc<ThemeTree>, ThemeError> {
        self.themes
            .get(name)
            .cloned()
            .ok_or_else(|| ThemeError::unknown_theme(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.themes.contains_key(name)
    }

    /// Registered names in registration order. The iterator can be cloned to restart.
    pub fn names(&self) -> impl Iterator<Item = &str> + Clone + '_ {
        self.themes.keys().map(String::as_str)
    }

    pub fn themes(&self) -> impl Iterator<Item = (&str, &Arc<ThemeTree>)> + '_ {
        self.themes.iter().map(|(name, tree)| (name.as_str(), tree))
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }

    pub fn validate(&self, tree: &ThemeTree) -> ValidationReport {
        self.schema.validate(tree.as_value())
    }

    /// Validates `tree` and adds it under `name`, replacing any theme of that name
    /// in place. A rejected tree leaves the registry untouched.
    pub fn register(&mut self, name: impl Into<String>, tree: ThemeTree) -> Result<(), ThemeError> {
        let name = name.into();
        let report = self.validate(&tree);
        if !report.is_valid() {
            warn!(theme = %name, issues = report.len(), "Rejected theme");
            return Err(ThemeError::InvalidTheme { name, report });
        }

        let replaced = self.themes.insert(name.clone(), Arc::new(tree)).is_some();
        info!(theme = %name, replaced, "Registered theme");
        Ok(())
    }

    pub fn resolver(&self) -> StyleResolver<'_> {
        StyleResolver::new(self)
    }
}
