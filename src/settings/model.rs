use serde::{Deserialize, Serialize};

/// User-facing preferences persisted between sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsModel {
    /// Dark theme (default) or light theme
    pub dark_theme: bool,

    /// 24-hour clock (default); 12-hour with AM/PM otherwise
    pub use_24_hour: bool,

    /// City shown in the weather line. `None` means resolve it from the
    /// system timezone on next start.
    pub current_city: Option<String>,

    /// Whether the clock design advances automatically
    pub auto_play_enabled: bool,

    /// Whether auto-change picks designs at random instead of in order
    pub shuffle_enabled: bool,

    /// Clock design shown at start-up (1-8)
    pub selected_design_id: u8,
}

impl Default for SettingsModel {
    fn default() -> Self {
        Self {
            dark_theme: true,
            use_24_hour: true,
            current_city: None,
            auto_play_enabled: false,
            shuffle_enabled: false,
            selected_design_id: 1,
        }
    }
}
