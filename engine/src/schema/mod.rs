//! Style schema: which leaf paths a theme must provide and of which kind.
//!
//! The schema is plain data, a list of `path -> leaf kind` declarations, so
//! validation and resolution stay generic instead of needing one accessor
//! per path. `chart_schema()` declares the charting widget's tree.

use indexmap::IndexMap;
use serde_json::Value;
use shared::{LeafKind, LeafStyle, StylePath};

pub mod chart;
mod validate;

pub use chart::chart_schema;
pub use validate::{IssueKind, ValidationIssue, ValidationReport};

/// Canonical default object for a leaf kind.
pub fn defaults_for(kind: LeafKind) -> LeafStyle {
    LeafStyle::default_for(kind)
}

/// A declared leaf.
///
/// Entries carrying a `fallback` are theme-optional: a theme may omit the
/// whole sub-tree and the fallback object is resolved in its place.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaEntry {
    pub path: StylePath,
    pub kind: LeafKind,
    pub fallback: Option<Value>,
}

impl SchemaEntry {
    pub fn is_optional(&self) -> bool {
        self.fallback.is_some()
    }
}

#[derive(Debug, Clone, Default)]
pub struct StyleSchema {
    entries: IndexMap<StylePath, SchemaEntry>,
}

impl StyleSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stroke(self, path: impl Into<StylePath>) -> Self {
        self.leaf(path, LeafKind::Stroke)
    }

    pub fn fill(self, path: impl Into<StylePath>) -> Self {
        self.leaf(path, LeafKind::Fill)
    }

    pub fn text(self, path: impl Into<StylePath>) -> Self {
        self.leaf(path, LeafKind::Text)
    }

    pub fn leaf(mut self, path: impl Into<StylePath>, kind: LeafKind) -> Self {
        self.declare(SchemaEntry {
            path: path.into(),
            kind,
            fallback: None,
        });
        self
    }

    /// Declares a theme-optional leaf resolved from `fallback` when absent.
    pub fn optional(mut self, path: impl Into<StylePath>, kind: LeafKind, fallback: Value) -> Self {
        self.declare(SchemaEntry {
            path: path.into(),
            kind,
            fallback: Some(fallback),
        });
        self
    }

    /// Adds or replaces a declaration, keeping its position on replace.
    pub fn declare(&mut self, entry: SchemaEntry) {
        self.entries.insert(entry.path.clone(), entry);
    }

    pub fn entry(&self, path: &StylePath) -> Option<&SchemaEntry> {
        self.entries.get(path)
    }

    pub fn entries(&self) -> impl Iterator<Item = &SchemaEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Checks `tree` against every declared path and returns all issues found.
    /// Never stops at the first problem.
    pub fn validate(&self, tree: &Value) -> ValidationReport {
        validate::validate_tree(self, tree)
    }
}
