//! # Settings Module
//!
//! User preferences and the settings state driven by the settings dialog and
//! keyboard shortcuts.
//!
//! ```text
//! SettingsState ──► PreferencesRepository ──┬─► InMemoryPreferences
//!                                           └─► FilePreferences (config.toml)
//! ```

pub mod model;
pub mod repository;
pub mod state;

pub use model::SettingsModel;
pub use repository::{FilePreferences, InMemoryPreferences, PreferencesRepository};
pub use state::SettingsState;

#[cfg(test)]
pub use repository::MockPreferencesRepository;
