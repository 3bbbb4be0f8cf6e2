// Engine library root
// Theme schema, registry and resolver for the chart widget, plus loading,
// persistence and the optional gRPC service.

pub mod config;
pub mod data;
pub mod error;
pub mod registry;
pub mod resolver;
pub mod schema;
#[cfg(feature = "grpc")]
pub mod services;

pub use error::ThemeError;
pub use registry::{SharedRegistry, ThemeRegistry, ThemeTree};
pub use resolver::StyleResolver;
pub use schema::{chart_schema, defaults_for, StyleSchema, ValidationReport};
