//! Preference storage backends.

use crate::config::ClockConfig;
use crate::logger::log;
use crate::settings::SettingsModel;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Storage for [`SettingsModel`].
///
/// Implementations use interior mutability so a single repository can be
/// shared between the settings state and the weather controller.
#[cfg_attr(test, mockall::automock)]
pub trait PreferencesRepository: Send + Sync {
    /// Current settings snapshot
    fn settings(&self) -> SettingsModel;

    /// Replace all settings
    fn update_settings(&self, settings: SettingsModel);

    fn current_city(&self) -> Option<String> {
        self.settings().current_city
    }

    fn set_current_city(&self, city: &str) {
        let mut settings = self.settings();
        settings.current_city = Some(city.to_string());
        self.update_settings(settings);
    }

    fn auto_play_status(&self) -> bool {
        self.settings().auto_play_enabled
    }

    fn set_auto_play_status(&self, enabled: bool) {
        let mut settings = self.settings();
        settings.auto_play_enabled = enabled;
        self.update_settings(settings);
    }

    fn shuffle_status(&self) -> bool {
        self.settings().shuffle_enabled
    }

    fn set_shuffle_status(&self, enabled: bool) {
        let mut settings = self.settings();
        settings.shuffle_enabled = enabled;
        self.update_settings(settings);
    }

    fn selected_design(&self) -> u8 {
        self.settings().selected_design_id
    }

    fn set_selected_design(&self, design_id: u8) {
        let mut settings = self.settings();
        settings.selected_design_id = design_id;
        self.update_settings(settings);
    }
}

/// Preferences that live only as long as the process.
#[derive(Debug, Default)]
pub struct InMemoryPreferences {
    settings: Mutex<SettingsModel>,
}

impl InMemoryPreferences {
    pub fn new(settings: SettingsModel) -> Self {
        Self {
            settings: Mutex::new(settings),
        }
    }
}

impl PreferencesRepository for InMemoryPreferences {
    fn settings(&self) -> SettingsModel {
        self.settings
            .lock()
            .map(|settings| settings.clone())
            .unwrap_or_default()
    }

    fn update_settings(&self, settings: SettingsModel) {
        if let Ok(mut current) = self.settings.lock() {
            *current = settings;
        }
    }
}

/// Preferences written through to a TOML config file on every change.
///
/// The whole [`ClockConfig`] is kept in memory so hand-edited sections such as
/// `[weather]` survive preference updates.
#[derive(Debug)]
pub struct FilePreferences {
    path: PathBuf,
    config: Mutex<ClockConfig>,
}

impl FilePreferences {
    /// Load preferences from `path`, falling back to defaults.
    pub fn open(path: PathBuf) -> Self {
        let config = ClockConfig::load_from(&path);
        Self::with_config(path, config)
    }

    /// Use an already loaded config, persisting future updates to `path`.
    pub fn with_config(path: PathBuf, config: ClockConfig) -> Self {
        Self {
            path,
            config: Mutex::new(config),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Snapshot of the full configuration
    pub fn config(&self) -> ClockConfig {
        self.config
            .lock()
            .map(|config| config.clone())
            .unwrap_or_default()
    }
}

impl PreferencesRepository for FilePreferences {
    fn settings(&self) -> SettingsModel {
        self.config
            .lock()
            .map(|config| config.preferences.clone())
            .unwrap_or_default()
    }

    fn update_settings(&self, settings: SettingsModel) {
        // The lock is held across the write so saves land in update order.
        let Ok(mut config) = self.config.lock() else {
            log::error!("Preferences lock poisoned; dropping update");
            return;
        };
        if config.preferences == settings {
            return;
        }
        config.preferences = settings;

        if let Err(e) = config.save_to(&self.path) {
            log::error!("Failed to save preferences to {}: {}", self.path.display(), e);
        }
    }
}
