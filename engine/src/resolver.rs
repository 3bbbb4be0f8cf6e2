//! Turns `(theme, path)` into a fully populated leaf style.
//!
//! Resolution is a shallow merge: the canonical defaults for the leaf's kind,
//! overlaid with every field the theme sets at that path. Explicit falsy
//! values (`false`, `0`, `""`) win over defaults; `null` is treated as unset.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use shared::{FillTheme, Gradient, LeafKind, LeafStyle, StrokeTheme, StylePath, TextTheme};
use tracing::debug;

use crate::error::ThemeError;
use crate::registry::ThemeRegistry;

/// Read-only view over a registry. Holds no state of its own.
#[derive(Debug, Clone, Copy)]
pub struct StyleResolver<'a> {
    registry: &'a ThemeRegistry,
}

impl<'a> StyleResolver<'a> {
    pub fn new(registry: &'a ThemeRegistry) -> Self {
        Self { registry }
    }

    pub fn resolve(&self, theme: &str, path: &StylePath) -> Result<LeafStyle, ThemeError> {
        let tree = self.registry.get(theme)?;
        let not_found = || ThemeError::PathNotFound {
            theme: theme.to_string(),
            path: path.clone(),
        };

        let entry = self.registry.schema().entry(path).ok_or_else(not_found)?;
        let leaf = match (tree.get(path), &entry.fallback) {
            (Some(value), _) => value,
            (None, Some(fallback)) => fallback,
            (None, None) => return Err(not_found()),
        };
        let fields = leaf.as_object().ok_or_else(not_found)?;

        debug!(theme, path = %path, kind = %entry.kind, "Resolving style");
        let present = present_fields(fields);
        let style = match entry.kind {
            LeafKind::Stroke => LeafStyle::Stroke(overlay(path, entry.kind, present)?),
            LeafKind::Fill => LeafStyle::Fill(overlay(path, entry.kind, present)?),
            LeafKind::Text => LeafStyle::Text(overlay(path, entry.kind, present)?),
        };
        Ok(style)
    }

    pub fn resolve_stroke(&self, theme: &str, path: &StylePath) -> Result<StrokeTheme, ThemeError> {
        match self.resolve(theme, path)? {
            LeafStyle::Stroke(stroke) => Ok(stroke),
            other => Err(mismatch(path, "stroke", other.kind())),
        }
    }

    pub fn resolve_fill(&self, theme: &str, path: &StylePath) -> Result<FillTheme, ThemeError> {
        match self.resolve(theme, path)? {
            LeafStyle::Fill(fill) => Ok(fill),
            other => Err(mismatch(path, "fill", other.kind())),
        }
    }

    pub fn resolve_text(&self, theme: &str, path: &StylePath) -> Result<TextTheme, ThemeError> {
        match self.resolve(theme, path)? {
            LeafStyle::Text(text) => Ok(text),
            other => Err(mismatch(path, "text", other.kind())),
        }
    }

    /// The gradient of a fill-capable leaf, or `None` when it only has a flat color.
    pub fn resolve_gradient(&self, theme: &str, path: &StylePath) -> Result<Option<Gradient>, ThemeError> {
        let style = self.resolve(theme, path)?;
        let fill = style
            .fill_capability()
            .ok_or_else(|| mismatch(path, "fill or text", style.kind()))?;
        Ok(fill.gradient())
    }
}

fn mismatch(path: &StylePath, expected: &'static str, found: LeafKind) -> ThemeError {
    ThemeError::LeafKindMismatch {
        path: path.clone(),
        expected,
        found,
    }
}

fn present_fields(fields: &Map<String, Value>) -> Map<String, Value> {
    fields
        .iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

// Leaf structs default every missing field, so deserializing the present
// fields is the overlay onto the kind's defaults.
fn overlay<T: DeserializeOwned>(path: &StylePath, kind: LeafKind, present: Map<String, Value>) -> Result<T, ThemeError> {
    serde_json::from_value(Value::Object(present)).map_err(|source| ThemeError::MalformedLeaf {
        path: path.clone(),
        kind,
        source,
    })
}
