use shared::{LeafKind, StylePath};
use thiserror::Error;

use crate::schema::ValidationReport;

#[derive(Error, Debug)]
pub enum ThemeError {
    /// The requested theme was never registered. Callers pick their own fallback.
    #[error("Unknown theme '{name}'")]
    UnknownTheme { name: String },

    #[error("Theme '{name}' failed validation with {} issue(s):\n{report}", .report.len())]
    InvalidTheme {
        name: String,
        report: ValidationReport,
    },

    /// The path is not a declared leaf, or the theme has nothing there.
    #[error("Style path '{path}' does not resolve to a leaf in theme '{theme}'")]
    PathNotFound { theme: String, path: StylePath },

    #[error("Style path '{path}' is a {found} leaf, expected {expected}")]
    LeafKindMismatch {
        path: StylePath,
        expected: &'static str,
        found: LeafKind,
    },

    #[error("Malformed {kind} leaf at '{path}': {source}")]
    MalformedLeaf {
        path: StylePath,
        kind: LeafKind,
        #[source]
        source: serde_json::Error,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("JSON error: {source}")]
    JsonError {
        #[from]
        source: serde_json::Error,
    },
}

impl ThemeError {
    pub fn unknown_theme(name: impl Into<String>) -> Self {
        ThemeError::UnknownTheme { name: name.into() }
    }
}

#[cfg(feature = "grpc")]
impl From<ThemeError> for tonic::Status {
    fn from(err: ThemeError) -> Self {
        tracing::error!("Mapping ThemeError to tonic::Status: {:?}", err);
        match err {
            ThemeError::UnknownTheme { .. } | ThemeError::PathNotFound { .. } => {
                tonic::Status::not_found(err.to_string())
            }
            ThemeError::InvalidTheme { .. }
            | ThemeError::LeafKindMismatch { .. }
            | ThemeError::MalformedLeaf { .. }
            | ThemeError::JsonError { .. } => tonic::Status::invalid_argument(err.to_string()),
            ThemeError::ConfigError(msg) => {
                tonic::Status::failed_precondition(format!("Configuration error: {}", msg))
            }
            ThemeError::IoError { source } => {
                tonic::Status::internal(format!("I/O error: {}", source))
            }
        }
    }
}
