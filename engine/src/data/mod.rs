// Theme data: embedded themes, theme files on disk and the persistent store.
pub mod builtin;
pub mod loader;
pub mod merge;
pub mod store;

pub use builtin::{BuiltinTheme, BUILTIN_THEMES};
pub use loader::{LoadSummary, ThemeLoader};
pub use merge::deep_merge;
pub use store::{StoreSummary, ThemeStore};
