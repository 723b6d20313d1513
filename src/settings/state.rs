//! Settings state behind the settings dialog.
//!
//! Every mutation is written straight through to the repository; reads always
//! come from the repository so there is a single source of truth.

use crate::clock::is_valid_design;
use crate::logger::log;
use crate::settings::{PreferencesRepository, SettingsModel};
use std::sync::Arc;

pub struct SettingsState {
    repository: Arc<dyn PreferencesRepository>,
    dialog_open: bool,
}

impl SettingsState {
    pub fn new(repository: Arc<dyn PreferencesRepository>) -> Self {
        Self {
            repository,
            dialog_open: false,
        }
    }

    /// Shared handle to the underlying repository
    pub fn repository(&self) -> Arc<dyn PreferencesRepository> {
        Arc::clone(&self.repository)
    }

    pub fn settings(&self) -> SettingsModel {
        self.repository.settings()
    }

    /// Toggle between dark and light theme. Returns `true` for dark.
    pub fn toggle_theme(&self) -> bool {
        let mut settings = self.settings();
        settings.dark_theme = !settings.dark_theme;
        let dark = settings.dark_theme;
        self.update(settings);
        dark
    }

    pub fn set_theme(&self, dark: bool) {
        let mut settings = self.settings();
        settings.dark_theme = dark;
        self.update(settings);
    }

    /// Toggle between 12 and 24 hour format. Returns `true` for 24-hour.
    pub fn toggle_clock_format(&self) -> bool {
        let mut settings = self.settings();
        settings.use_24_hour = !settings.use_24_hour;
        let use_24_hour = settings.use_24_hour;
        self.update(settings);
        use_24_hour
    }

    pub fn set_clock_format(&self, use_24_hour: bool) {
        let mut settings = self.settings();
        settings.use_24_hour = use_24_hour;
        self.update(settings);
    }

    pub fn set_current_city(&self, city: &str) {
        let mut settings = self.settings();
        settings.current_city = Some(city.to_string());
        self.update(settings);
    }

    pub fn toggle_auto_play(&self) -> bool {
        let mut settings = self.settings();
        settings.auto_play_enabled = !settings.auto_play_enabled;
        let enabled = settings.auto_play_enabled;
        self.update(settings);
        enabled
    }

    pub fn set_auto_play(&self, enabled: bool) {
        let mut settings = self.settings();
        settings.auto_play_enabled = enabled;
        self.update(settings);
    }

    pub fn toggle_shuffle(&self) -> bool {
        let mut settings = self.settings();
        settings.shuffle_enabled = !settings.shuffle_enabled;
        let enabled = settings.shuffle_enabled;
        self.update(settings);
        enabled
    }

    pub fn set_shuffle(&self, enabled: bool) {
        let mut settings = self.settings();
        settings.shuffle_enabled = enabled;
        self.update(settings);
    }

    /// Persist the selected design. Ids outside 1-8 are ignored; returns
    /// whether the id was accepted.
    pub fn set_selected_design(&self, design_id: u8) -> bool {
        if !is_valid_design(design_id) {
            log::warn!("Ignoring invalid design id {}", design_id);
            return false;
        }
        let mut settings = self.settings();
        settings.selected_design_id = design_id;
        self.update(settings);
        true
    }

    pub fn is_dialog_open(&self) -> bool {
        self.dialog_open
    }

    pub fn open_dialog(&mut self) {
        self.dialog_open = true;
    }

    pub fn close_dialog(&mut self) {
        self.dialog_open = false;
    }

    fn update(&self, settings: SettingsModel) {
        log::debug!("Settings updated: {:?}", settings);
        self.repository.update_settings(settings);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{InMemoryPreferences, MockPreferencesRepository};

    #[test]
    fn toggle_theme_writes_inverted_theme() {
        let mut mock = MockPreferencesRepository::new();
        mock.expect_settings().returning(|| SettingsModel::default());
        mock.expect_update_settings()
            .withf(|settings| !settings.dark_theme && settings.use_24_hour)
            .times(1)
            .return_const(());

        let state = SettingsState::new(Arc::new(mock));
        assert!(!state.toggle_theme());
    }

    #[test]
    fn invalid_design_never_reaches_repository() {
        let mut mock = MockPreferencesRepository::new();
        mock.expect_update_settings().never();

        let state = SettingsState::new(Arc::new(mock));
        assert!(!state.set_selected_design(0));
        assert!(!state.set_selected_design(9));
    }

    #[test]
    fn toggles_round_trip_through_repository() {
        let state = SettingsState::new(Arc::new(InMemoryPreferences::default()));

        assert!(!state.toggle_clock_format());
        assert!(state.toggle_clock_format());
        assert!(state.toggle_auto_play());
        assert!(state.toggle_shuffle());
        assert!(state.set_selected_design(8));
        state.set_current_city("Perth");

        let settings = state.settings();
        assert!(settings.use_24_hour);
        assert!(settings.auto_play_enabled);
        assert!(settings.shuffle_enabled);
        assert_eq!(settings.selected_design_id, 8);
        assert_eq!(settings.current_city.as_deref(), Some("Perth"));
    }

    #[test]
    fn dialog_flag_toggles() {
        let mut state = SettingsState::new(Arc::new(InMemoryPreferences::default()));
        assert!(!state.is_dialog_open());
        state.open_dialog();
        assert!(state.is_dialog_open());
        state.close_dialog();
        assert!(!state.is_dialog_open());
    }
}
